//! # Inference rules
//!
//! Binary resolution and paramodulation, the two rules the saturation
//! engine combines clause pairs with: given two clauses, enumerate every way
//! the rule applies and return the resulting (un-canonicalized) clauses.
//!
//! Every derivation here freshens its right-hand operand with
//! [`crate::clause::uniquify`] before doing anything else, and then asserts
//! that the two operands now share no free variable. A violation means a
//! caller skipped the freshening step, which is a defect in this crate, not
//! a malformed input, so the assertion is a hard panic rather than a
//! `Result`.

use crate::clause::{uniquify, Clause, Literal};
use crate::subst::{substitute, Substitution};
use crate::symbol::{Ident, SymbolTable};
use crate::term::Term;
use crate::unify::{mgu, shared_variables};
use std::rc::Rc;

fn assert_disjoint(a: &Clause, b: &Clause, table: &SymbolTable) {
    let is_variable = |id: Ident| table.is_variable(id);
    for lit in a {
        for other in b {
            let shared = shared_variables(lit.term(), other.term(), &is_variable);
            if !shared.is_empty() {
                panic!(
                    "infer: operands share variables {:?}; caller must uniquify before combining",
                    shared
                );
            }
        }
    }
}

/// All binary resolvents of `a` against `b`: for every pair of
/// opposite-polarity literals `l ∈ a`, `m ∈ b` whose atoms unify via `sigma`,
/// the resolvent `sigma(a \ {l}) ∪ sigma(b \ {m})`.
///
/// `b` is freshened with [`uniquify`] before any unification is attempted,
/// so that `a` and `b` can safely share variable names at the call site
/// (this is in fact the common case: every clause drawn from the
/// saturation frontier was itself canonicalized onto the same small pool of
/// variable names).
pub fn binary_resolution(a: &Clause, b: &Clause, table: &mut SymbolTable) -> Vec<Clause> {
    let b = uniquify(b, table);
    assert_disjoint(a, &b, table);

    let is_variable = |id: Ident| table.is_variable(id);
    let mut resolvents = Vec::new();

    for l in a {
        for m in &b {
            if l.is_positive() == m.is_positive() {
                continue;
            }

            let Some(sigma) = mgu(&l.atom(), &m.atom(), &is_variable) else {
                continue;
            };

            let mut resolvent = Clause::new();
            for lit in a.iter().filter(|lit| *lit != l) {
                resolvent.insert(lit.substitute(&sigma));
            }
            for lit in b.iter().filter(|lit| lit != m) {
                resolvent.insert(lit.substitute(&sigma));
            }

            resolvents.push(resolvent);
        }
    }

    resolvents
}

/// All subterm positions within `t` eligible for paramodulation rewriting:
/// every node reachable from `t` except `t` itself when it is an `Args`
/// node standing directly beneath a `Relation`/`Functor` head (an `Args`
/// node is a carrier, never a term in its own right — see
/// [`crate::term`]'s module docs), and except any position that would place
/// a bare `Relation` inside a `Functor`'s argument list, which is ill-typed:
/// relations denote truth values, functors denote individuals, and the two
/// are never interchangeable.
///
/// Returns each eligible subterm together with whether it sits inside a
/// `Functor`'s argument list, and a rebuilder closure that, given a
/// replacement term, reconstructs the whole of `t` with that one position
/// replaced. The "inside a `Functor`'s arguments" flag travels with each
/// site so that a caller can reject a rewrite whose *replacement* term would
/// itself be a `Relation` landing in a term position — the same ill-typed
/// shape this function already refuses to pick as a match site.
fn rewrite_positions(
    t: &Rc<Term>,
    inside_functor_args: bool,
) -> Vec<(Rc<Term>, bool, Box<dyn Fn(Rc<Term>) -> Rc<Term>>)> {
    let mut sites: Vec<(Rc<Term>, bool, Box<dyn Fn(Rc<Term>) -> Rc<Term>>)> = Vec::new();

    if !t.is_args() && !(inside_functor_args && t.is_relation()) {
        let t2 = t.clone();
        sites.push((t2, inside_functor_args, Box::new(|r| r)));
    }

    match t.as_ref() {
        Term::Functor(head, args) => {
            let head = *head;
            for (child, inside, rebuild) in rewrite_positions(args, true) {
                let rebuild_args = rebuild;
                sites.push((
                    child,
                    inside,
                    Box::new(move |r| Term::functor(head, rebuild_args(r))),
                ));
            }
        }
        Term::Relation(head, args) => {
            let head = *head;
            for (child, inside, rebuild) in rewrite_positions(args, false) {
                let rebuild_args = rebuild;
                sites.push((
                    child,
                    inside,
                    Box::new(move |r| Term::relation(head, rebuild_args(r))),
                ));
            }
        }
        Term::Args(elems) => {
            for (i, elem) in elems.iter().enumerate() {
                let elems = elems.clone();
                for (child, inside, rebuild) in rewrite_positions(elem, inside_functor_args) {
                    let i = i;
                    let elems = elems.clone();
                    let rebuild_elem = rebuild;
                    sites.push((
                        child,
                        inside,
                        Box::new(move |r| {
                            let mut new_elems = elems.clone();
                            new_elems[i] = rebuild_elem(r);
                            Term::args(new_elems)
                        }),
                    ));
                }
            }
        }
        _ => {}
    }

    sites
}

/// Rewrites every eligible subterm of `target` that unifies with `from`,
/// replacing it with `to` (under the unifying substitution), and applying
/// that same substitution to the rest of `target`. A rewrite whose
/// substituted replacement term is itself a `Relation` landing inside a
/// `Functor`'s argument list is skipped: a relation denotes a truth value,
/// never an individual, so no rewrite may produce that shape (see
/// [`crate::term`]'s module docs on the restriction of paramodulation
/// rewrite sites).
///
/// Returns the rewritten term together with the unifying substitution
/// `sigma` itself, since `sigma` must also be applied to every other
/// literal retained from the two clauses being combined — not just the one
/// being rewritten (see [`paramodulation`]).
fn paramodulate_with(
    from: &Rc<Term>,
    to: &Rc<Term>,
    target: &Rc<Term>,
    is_variable: &impl Fn(Ident) -> bool,
) -> Vec<(Rc<Term>, Substitution)> {
    rewrite_positions(target, false)
        .into_iter()
        .filter_map(|(site, inside_functor_args, rebuild)| {
            let sigma = mgu(from, &site, is_variable)?;
            let rewritten_to = substitute(to, &sigma);
            if inside_functor_args && rewritten_to.is_relation() {
                return None;
            }
            let rebuilt = rebuild(rewritten_to);
            Some((substitute(&rebuilt, &sigma), sigma))
        })
        .collect()
}

/// All paramodulants of `a` into `b`: for every positive equality literal
/// `s = t` in `a` (tried in both the `s → t` and `t → s` orientations) and
/// every literal `m` in `b`, every way of rewriting a subterm of `m` that
/// unifies with the equation's left-hand side, yielding the clause
/// `sigma((a \ {s=t}) ∪ (b \ {m}) ∪ {m[s↦t]})` — `sigma` applied to every
/// surviving literal of both clauses, not only the one being rewritten,
/// exactly as [`binary_resolution`] applies its unifier across the board.
///
/// `b` is freshened with [`uniquify`] first, exactly as in
/// [`binary_resolution`].
pub fn paramodulation(a: &Clause, b: &Clause, table: &mut SymbolTable) -> Vec<Clause> {
    let b = uniquify(b, table);
    assert_disjoint(a, &b, table);

    let is_variable = |id: Ident| table.is_variable(id);
    let mut results = Vec::new();

    for eq_lit in a.iter().filter(|lit| lit.is_positive()) {
        let Some((left, right)) = eq_lit.atom().split_equality() else {
            continue;
        };

        for (from, to) in [(left.clone(), right.clone()), (right.clone(), left.clone())] {
            for m in &b {
                for (rewritten, sigma) in paramodulate_with(&from, &to, m.term(), &is_variable) {
                    let mut clause = Clause::new();
                    for lit in a.iter().filter(|lit| *lit != eq_lit) {
                        clause.insert(lit.substitute(&sigma));
                    }
                    for lit in b.iter().filter(|lit| lit != m) {
                        clause.insert(lit.substitute(&sigma));
                    }
                    clause.insert(Literal::new(rewritten));
                    results.push(clause);
                }
            }
        }
    }

    results
}

/// Shorthand helper used by the saturation engine: `true` iff `clause` is
/// the empty clause, the refutation's success condition.
pub fn is_empty_clause(clause: &Clause) -> bool {
    clause.is_empty()
}
