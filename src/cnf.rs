//! # Clausification
//!
//! Turns an arbitrary first-order formula into a set of clauses, in four
//! passes:
//!
//! 1. [`eliminate_connectives`] rewrites `Implies`/`Iff` away in terms of
//!    `And`/`Or`/`Not`.
//! 2. [`nnf`] pushes `Not` down to the leaves (De Morgan, double-negation,
//!    and quantifier-flip), and simultaneously eliminates `Implies`/`Iff`
//!    wherever an intervening `Not` would otherwise have to cross one — so
//!    callers normally only need to call [`nnf`] directly; it calls
//!    [`eliminate_connectives`] itself wherever needed.
//! 3. [`skolemize`] strips every quantifier: universal variables are left
//!    free (to be re-bound, implicitly, by the clause they end up in),
//!    existential variables are replaced by a fresh Skolem term applied to
//!    the universal variables enclosing the existential at the point of
//!    occurrence.
//! 4. [`distribute`] pushes `Or` inside `And` (the usual CNF distributive
//!    law) and reads the resulting top-level conjunction off as a set of
//!    clauses.
//!
//! [`clausify`] validates its input (see [`validate_formula`]), runs all
//! four passes, and returns the resulting clause set; it is the entry point
//! [`crate::engine::Engine`] calls for every axiom and for the negated
//! conjecture.

use crate::clause::{Clause, Literal};
use crate::error::ProverError;
use crate::subst::{substitute, Substitution};
use crate::symbol::{Ident, SymbolTable};
use crate::term::Term;
use std::collections::HashSet;
use std::rc::Rc;

/// Rewrites `Implies` and `Iff` away: `a ⇒ b` becomes `¬a ∨ b`, and
/// `a ⇔ b` becomes `(¬a ∨ b) ∧ (¬b ∨ a)`. Leaves every other node
/// structurally intact (but reconstructed, since children are rewritten
/// recursively first).
pub fn eliminate_connectives(t: &Rc<Term>) -> Rc<Term> {
    match t.as_ref() {
        Term::Implies(l, r) => {
            let l = eliminate_connectives(l);
            let r = eliminate_connectives(r);
            Term::or(Term::not(l), r)
        }
        Term::Iff(l, r) => {
            let l = eliminate_connectives(l);
            let r = eliminate_connectives(r);
            let forward = Term::or(Term::not(l.clone()), r.clone());
            let backward = Term::or(Term::not(r), l);
            Term::and(forward, backward)
        }
        Term::And(l, r) => Term::and(eliminate_connectives(l), eliminate_connectives(r)),
        Term::Or(l, r) => Term::or(eliminate_connectives(l), eliminate_connectives(r)),
        Term::Not(b) => Term::not(eliminate_connectives(b)),
        Term::Universal(v, b) => Term::universal(*v, eliminate_connectives(b)),
        Term::Existential(v, b) => Term::existential(*v, eliminate_connectives(b)),
        Term::Atom(_) | Term::Functor(..) | Term::Relation(..) | Term::Args(_) => t.clone(),
    }
}

/// Pushes negation down to the atomic relations, eliminating `Implies`/
/// `Iff` along the way (see [`eliminate_connectives`]). The result contains
/// no `Implies`, `Iff`, or `Not` wrapping anything other than a bare
/// `Relation`.
pub fn nnf(t: &Rc<Term>) -> Rc<Term> {
    let t = eliminate_connectives(t);
    nnf_inner(&t)
}

fn nnf_inner(t: &Rc<Term>) -> Rc<Term> {
    match t.as_ref() {
        Term::Not(body) => push_negation(body),
        Term::And(l, r) => Term::and(nnf_inner(l), nnf_inner(r)),
        Term::Or(l, r) => Term::or(nnf_inner(l), nnf_inner(r)),
        Term::Universal(v, b) => Term::universal(*v, nnf_inner(b)),
        Term::Existential(v, b) => Term::existential(*v, nnf_inner(b)),
        Term::Atom(_) | Term::Functor(..) | Term::Relation(..) | Term::Args(_) => t.clone(),
        // Implies/Iff cannot appear here: eliminate_connectives already ran.
        Term::Implies(..) | Term::Iff(..) => unreachable!("connectives already eliminated"),
    }
}

/// Pushes a negation that sits immediately above `body` further down,
/// applying De Morgan's laws, double-negation elimination, and the
/// quantifier-flip (`¬∀x. p` becomes `∃x. ¬p`, and symmetrically).
fn push_negation(body: &Rc<Term>) -> Rc<Term> {
    match body.as_ref() {
        Term::Not(inner) => nnf_inner(inner),
        Term::And(l, r) => Term::or(push_negation(l), push_negation(r)),
        Term::Or(l, r) => Term::and(push_negation(l), push_negation(r)),
        Term::Universal(v, b) => Term::existential(*v, push_negation(b)),
        Term::Existential(v, b) => Term::universal(*v, push_negation(b)),
        Term::Atom(_) | Term::Functor(..) | Term::Relation(..) | Term::Args(_) => {
            Term::not(nnf_inner(body))
        }
        Term::Implies(..) | Term::Iff(..) => unreachable!("connectives already eliminated"),
    }
}

/// Strips every quantifier from a negation-normal-form formula, replacing
/// each existential variable with a fresh Skolem term applied to the
/// universal variables that enclose it at the point of occurrence (its
/// "enclosing universals"). Universal variables are simply dropped from the
/// tree; they survive as the term's free variables, which the clause they
/// end up in treats as implicitly universally quantified — the standard
/// convention this prover follows throughout (see the module docs of
/// [`crate::clause`]).
///
/// A straightforward top-down traversal carrying the stack of enclosing
/// universal variables seen so far: since a Skolem term only ever needs to
/// mention the universals *enclosing* a given existential, that stack is
/// exactly the right accumulator, and top-down is simpler to state correctly
/// than threading the same information bottom-up.
pub fn skolemize(t: &Rc<Term>, table: &mut SymbolTable) -> Rc<Term> {
    skolemize_inner(t, &mut Vec::new(), table)
}

fn skolemize_inner(t: &Rc<Term>, enclosing: &mut Vec<Ident>, table: &mut SymbolTable) -> Rc<Term> {
    match t.as_ref() {
        Term::Universal(v, body) => {
            enclosing.push(*v);
            let body = skolemize_inner(body, enclosing, table);
            enclosing.pop();
            body
        }
        Term::Existential(v, body) => {
            let skolem_args: Vec<Rc<Term>> = enclosing.iter().map(|id| Term::atom(*id)).collect();
            let skolem_head = table.fresh_constant(Some(format!(
                "sk{}",
                table.display_name_or_generated(*v)
            )));
            let replacement = if skolem_args.is_empty() {
                Term::atom(skolem_head)
            } else {
                Term::functor(skolem_head, Term::args(skolem_args))
            };

            log::trace!(
                "skolemizing {} with {} enclosing universal(s) as {}",
                table.display_name_or_generated(*v),
                enclosing.len(),
                table.display_name_or_generated(skolem_head)
            );

            let mut sigma = Substitution::new();
            sigma.insert(*v, replacement);
            let substituted = substitute(body, &sigma);
            skolemize_inner(&substituted, enclosing, table)
        }
        Term::And(l, r) => Term::and(
            skolemize_inner(l, enclosing, table),
            skolemize_inner(r, enclosing, table),
        ),
        Term::Or(l, r) => Term::or(
            skolemize_inner(l, enclosing, table),
            skolemize_inner(r, enclosing, table),
        ),
        Term::Not(b) => Term::not(skolemize_inner(b, enclosing, table)),
        Term::Atom(_) | Term::Functor(..) | Term::Relation(..) | Term::Args(_) => t.clone(),
        Term::Implies(..) | Term::Iff(..) => unreachable!("connectives already eliminated"),
    }
}

/// Distributes `Or` over `And` (`a ∨ (b ∧ c) ≡ (a ∨ b) ∧ (a ∨ c)`,
/// and symmetrically) on a quantifier-free formula, and reads the resulting
/// top-level conjunction off as a set of clauses. Each clause is the set of
/// `Relation`/`Not(Relation)` literals found along an `Or`-spine.
///
/// `t` must be quantifier-free (see [`crate::term::Term::is_quantifier_free`]);
/// callers are expected to have run [`skolemize`] first.
pub fn distribute(t: &Rc<Term>) -> HashSet<Clause> {
    distribute_conjuncts(t)
        .into_iter()
        .map(|disjunction| collect_literals(&disjunction))
        .collect()
}

fn distribute_conjuncts(t: &Rc<Term>) -> Vec<Rc<Term>> {
    match t.as_ref() {
        Term::And(l, r) => {
            let mut conjuncts = distribute_conjuncts(l);
            conjuncts.extend(distribute_conjuncts(r));
            conjuncts
        }
        _ => vec![distribute_disjunction(t)],
    }
}

/// Normalizes a single `Or`/`And`-mixed formula (with no quantifiers) into a
/// disjunction-of-literals by repeatedly applying the distributive law,
/// returning the distributed formula itself (still `Or`/`And`-shaped if it
/// contains a nested conjunction that could not be flattened away — which
/// cannot happen once this function's own recursion has finished, since
/// every `And` it encounters gets hoisted above every `Or`).
fn distribute_disjunction(t: &Rc<Term>) -> Rc<Term> {
    match t.as_ref() {
        Term::Or(l, r) => {
            let l = distribute_disjunction(l);
            let r = distribute_disjunction(r);
            or_distributed(&l, &r)
        }
        Term::And(l, r) => Term::and(distribute_disjunction(l), distribute_disjunction(r)),
        _ => t.clone(),
    }
}

/// Builds `l ∨ r`, pushing the disjunction inside any `And` found in either
/// side.
fn or_distributed(l: &Rc<Term>, r: &Rc<Term>) -> Rc<Term> {
    match (l.as_ref(), r.as_ref()) {
        (Term::And(l0, l1), _) => Term::and(or_distributed(l0, r), or_distributed(l1, r)),
        (_, Term::And(r0, r1)) => Term::and(or_distributed(l, r0), or_distributed(l, r1)),
        _ => Term::or(l.clone(), r.clone()),
    }
}

/// Reads the literals off an `Or`-spine (which, after [`distribute`] has
/// flattened away every nested `And`, is all that can remain).
fn collect_literals(t: &Rc<Term>) -> Clause {
    match t.as_ref() {
        Term::Or(l, r) => {
            let mut clause = collect_literals(l);
            clause.extend(collect_literals(r));
            clause
        }
        Term::And(..) => unreachable!("distribute_disjunction leaves no nested And"),
        _ => {
            let mut clause = Clause::new();
            clause.insert(Literal::new(t.clone()));
            clause
        }
    }
}

/// Checks that every identifier `formula` mentions as a bare [`Term::Atom`]
/// is registered with `table`. An identifier that was never allocated by
/// any [`SymbolTable`] is not meaningfully a variable or a constant, and
/// every later pass (Skolemization, `is_variable` checks in the unifier)
/// would silently treat it as a constant rather than signal the mistake.
fn validate_registered(t: &Rc<Term>, table: &SymbolTable) -> Result<(), ProverError> {
    match t.as_ref() {
        Term::Atom(id) => {
            if table.is_registered(*id) {
                Ok(())
            } else {
                Err(ProverError::UnknownIdentifier { id: *id })
            }
        }
        Term::Functor(_, args) | Term::Relation(_, args) => validate_registered(args, table),
        Term::Args(elems) => elems.iter().try_for_each(|e| validate_registered(e, table)),
        Term::And(l, r) | Term::Or(l, r) | Term::Implies(l, r) | Term::Iff(l, r) => {
            validate_registered(l, table)?;
            validate_registered(r, table)
        }
        Term::Not(b) => validate_registered(b, table),
        Term::Universal(_, b) | Term::Existential(_, b) => validate_registered(b, table),
    }
}

/// Checks that no [`Term::Relation`] node ever appears inside the argument
/// tuple of a [`Term::Functor`], at any depth — a relation denotes a truth
/// value, a functor's arguments denote individuals, and the two are never
/// interchangeable (see the module docs of [`crate::term`]).
fn validate_no_relation_in_functor(t: &Rc<Term>, inside_functor_args: bool) -> Result<(), ProverError> {
    if inside_functor_args && t.is_relation() {
        return Err(ProverError::MalformedInput {
            detail: "a Relation node appears inside a Functor's arguments".to_string(),
        });
    }

    match t.as_ref() {
        Term::Functor(_, args) => validate_no_relation_in_functor(args, true),
        Term::Relation(_, args) => validate_no_relation_in_functor(args, false),
        Term::Args(elems) => elems
            .iter()
            .try_for_each(|e| validate_no_relation_in_functor(e, inside_functor_args)),
        Term::And(l, r) | Term::Or(l, r) | Term::Implies(l, r) | Term::Iff(l, r) => {
            validate_no_relation_in_functor(l, inside_functor_args)?;
            validate_no_relation_in_functor(r, inside_functor_args)
        }
        Term::Not(b) => validate_no_relation_in_functor(b, inside_functor_args),
        Term::Universal(_, b) | Term::Existential(_, b) => {
            validate_no_relation_in_functor(b, inside_functor_args)
        }
        Term::Atom(_) => Ok(()),
    }
}

/// Checks that every variable `formula` mentions is bound by some enclosing
/// [`Term::Universal`] or [`Term::Existential`] at the point it occurs. A
/// variable that occurs free at top level has no quantifier to give it
/// meaning — it is neither "for all" nor "there exists" anything — and is a
/// caller mistake this prover detects rather than silently treating as
/// implicitly universal.
fn validate_closed(t: &Rc<Term>, table: &SymbolTable, bound: &mut Vec<Ident>) -> Result<(), ProverError> {
    match t.as_ref() {
        Term::Atom(id) => {
            if table.is_variable(*id) && !bound.contains(id) {
                return Err(ProverError::MalformedInput {
                    detail: format!(
                        "variable {} occurs free, with no enclosing quantifier",
                        table.display_name_or_generated(*id)
                    ),
                });
            }
            Ok(())
        }
        Term::Functor(_, args) | Term::Relation(_, args) => validate_closed(args, table, bound),
        Term::Args(elems) => elems.iter().try_for_each(|e| validate_closed(e, table, bound)),
        Term::And(l, r) | Term::Or(l, r) | Term::Implies(l, r) | Term::Iff(l, r) => {
            validate_closed(l, table, bound)?;
            validate_closed(r, table, bound)
        }
        Term::Not(b) => validate_closed(b, table, bound),
        Term::Universal(v, b) | Term::Existential(v, b) => {
            bound.push(*v);
            let result = validate_closed(b, table, bound);
            bound.pop();
            result
        }
    }
}

/// Runs every check the CNF pipeline boundary is responsible for (see
/// `MalformedInput`/`UnknownIdentifier` in [`crate::error::ProverError`]):
/// every atom is a registered identifier, no `Relation` is nested inside a
/// `Functor`'s arguments, and every variable occurring in `formula` is
/// bound by some enclosing quantifier.
pub fn validate_formula(formula: &Rc<Term>, table: &SymbolTable) -> Result<(), ProverError> {
    validate_registered(formula, table)?;
    validate_no_relation_in_functor(formula, false)?;
    validate_closed(formula, table, &mut Vec::new())
}

/// Runs the full pipeline — validation, [`nnf`], [`skolemize`],
/// [`distribute`] — and returns the resulting clause set for `formula`, or
/// a [`ProverError::MalformedInput`]/[`ProverError::UnknownIdentifier`] if
/// `formula` fails the checks [`validate_formula`] runs at this pipeline's
/// boundary.
pub fn clausify(formula: &Rc<Term>, table: &mut SymbolTable) -> Result<HashSet<Clause>, ProverError> {
    validate_formula(formula, table)?;
    let formula = nnf(formula);
    let formula = skolemize(&formula, table);
    let clauses = distribute(&formula);
    log::debug!("clausified formula into {} clause(s)", clauses.len());
    Ok(clauses)
}
