//! # Clauses and clause normalization
//!
//! A [`Clause`] is a set of [`Literal`]s, interpreted as their disjunction;
//! the empty clause denotes falsity. Clauses are kept as a `BTreeSet` rather
//! than a hash set, ordered by each literal's stable hash (with a
//! structural tiebreak for the — astronomically unlikely — case of a hash
//! collision): canonicalization requires a deterministic linearization of
//! the literal set wherever iteration order matters (variable numbering
//! during canonicalization, clause-to-clause comparison for dedup), and a
//! `HashSet`'s iteration order is an implementation detail, not something
//! to build determinism on top of.
//!
//! [`canon`] and [`uniquify`] are the two clause-level operations every
//! other component depends on: the saturation engine canonicalizes every
//! admitted clause so that alpha-equivalent clauses collapse to one
//! representative, and every inference freshens its right-hand clause with
//! `uniquify` before ever attempting to unify anything in it.

use crate::subst::{free_variables, substitute, Substitution};
use crate::symbol::{Ident, SymbolTable};
use crate::term::Term;
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A stable (not process-randomized) hash of a hashable value, used to
/// linearize literal sets deterministically. `DefaultHasher::new()` always
/// starts from the same fixed keys, unlike the `RandomState` a `HashMap`
/// seeds itself with, so this hash is reproducible across runs and across
/// processes — a prerequisite for canonicalization being deterministic at
/// all.
fn stable_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A literal: an atomic relation, or its negation. Ordered by a stable hash
/// of the underlying term (tiebroken by the term's own derived `Ord`, for
/// the rare case of a hash collision), so that a `BTreeSet<Literal>`
/// iterates in the hash order the canonicalization algorithm below
/// requires.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Literal(Rc<Term>);

impl Literal {
    /// Wraps `term` as a literal. `term` is expected to be a `Relation` node
    /// or a `Not` wrapping one; this is not validated here (validation
    /// happens once, at the CNF pipeline's output boundary — see
    /// [`crate::error::ProverError::MalformedInput`]).
    pub fn new(term: Rc<Term>) -> Self {
        Literal(term)
    }

    /// The underlying term (a `Relation`, or `Not` of one).
    pub fn term(&self) -> &Rc<Term> {
        &self.0
    }

    /// `true` iff this literal is not negated.
    pub fn is_positive(&self) -> bool {
        !matches!(self.0.as_ref(), Term::Not(_))
    }

    /// The atomic relation this literal asserts or denies, with any `Not`
    /// wrapper stripped.
    pub fn atom(&self) -> Rc<Term> {
        match self.0.as_ref() {
            Term::Not(body) => body.clone(),
            _ => self.0.clone(),
        }
    }

    /// Returns `true` iff this literal is the negation of a reflexive
    /// equality, `¬(t = t)`. `canon` prunes literals of exactly this shape.
    pub fn is_antireflexive(&self) -> bool {
        if let Term::Not(body) = self.0.as_ref() {
            if let Some((left, right)) = body.split_equality() {
                return left == right;
            }
        }
        false
    }

    /// Rebuilds this literal with `sigma` applied to its underlying term.
    pub fn substitute(&self, sigma: &Substitution) -> Literal {
        Literal(substitute(&self.0, sigma))
    }

    fn hash_key(&self) -> u64 {
        stable_hash(&self.0)
    }
}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.hash_key()
            .cmp(&other.hash_key())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// A finite set of literals, interpreted as their disjunction. The empty
/// clause denotes falsity and is the saturation engine's success condition.
pub type Clause = BTreeSet<Literal>;

/// Rebuilds every literal of `clause` with `sigma` applied.
pub fn substitute_clause(clause: &Clause, sigma: &Substitution) -> Clause {
    clause.iter().map(|lit| lit.substitute(sigma)).collect()
}

/// The free variables of `clause`, in first-appearance order, where the
/// clause's literals are visited in their `BTreeSet` (hash) order — the
/// deterministic linearization [`crate::subst::free_variables`]'s
/// single-term traversal needs to be extended to a whole literal set.
pub fn clause_variables(clause: &Clause, is_variable: &impl Fn(Ident) -> bool) -> Vec<Ident> {
    let mut seen = std::collections::HashSet::new();
    let mut order = Vec::new();

    for lit in clause {
        for v in free_variables(lit.term(), is_variable) {
            if seen.insert(v) {
                order.push(v);
            }
        }
    }

    order
}

/// A source of canonical variable identifiers: a fixed, deterministic
/// enumeration `x_0, x_1, x_2, ...` that `canon` maps a clause's free
/// variables onto. Identifiers are allocated lazily, the first time a given
/// index is requested, and cached from then on, so `canonical_variable(i)`
/// always returns the same identifier for a given `i` — the property
/// `canon`'s idempotence depends on.
#[derive(Clone, Debug, Default)]
pub struct CanonicalVariables {
    pool: Vec<Ident>,
}

impl CanonicalVariables {
    pub fn new() -> Self {
        Self { pool: Vec::new() }
    }

    /// Returns the `index`-th canonical variable identifier, allocating it
    /// in `table` if this is the first time it has been requested.
    pub fn get(&mut self, index: usize, table: &mut SymbolTable) -> Ident {
        while self.pool.len() <= index {
            let i = self.pool.len();
            let id = table.fresh_variable(Some(format!("x{}", i)));
            self.pool.push(id);
        }
        self.pool[index]
    }
}

/// Produces the canonical representative of `clause`:
///
/// 1. Every literal of shape `¬(t = t)` is removed (antireflexive pruning).
///    Positive reflexive literals (`t = t`) are *not* pruned — only their
///    negation is, matching the source this prover is modeled on.
/// 2. The free variables of the remaining literals are enumerated in
///    first-appearance order (literals visited in hash order).
/// 3. Those variables are mapped, in that order, onto a prefix of the fixed
///    canonical variable enumeration and substituted.
///
/// Two clauses whose literal sets are equal modulo alpha-renaming produce
/// identical canonical forms, provided their literal-hash orderings
/// coincide — an approximation of alpha-equivalence, not a complete
/// equivalence check, since a hash collision between two differently-shaped
/// literals could in principle desynchronize the orderings. In practice
/// this approximation is good enough: deduplication only ever loses a
/// clause that is already subsumed by another equivalent one.
pub fn canon(
    clause: &Clause,
    table: &mut SymbolTable,
    canonical: &mut CanonicalVariables,
) -> Clause {
    let pruned: Clause = clause
        .iter()
        .filter(|lit| !lit.is_antireflexive())
        .cloned()
        .collect();

    let is_variable = |id: Ident| table.is_variable(id);
    let vars = clause_variables(&pruned, &is_variable);

    let mut sigma = Substitution::new();
    for (i, v) in vars.into_iter().enumerate() {
        let canon_id = canonical.get(i, table);
        sigma.insert(v, Term::atom(canon_id));
    }

    substitute_clause(&pruned, &sigma)
}

/// Produces a variable-freshened copy of `clause`: every free variable is
/// replaced with a newly allocated variable, retaining a display-name hint
/// for debugging (`x'` for a variable previously displayed as `x`). Called
/// before any inference rule combines two clauses, so that the two
/// operands never share variable bindings.
pub fn uniquify(clause: &Clause, table: &mut SymbolTable) -> Clause {
    let is_variable = |id: Ident| table.is_variable(id);
    let vars = clause_variables(clause, &is_variable);

    let mut sigma = Substitution::new();
    for v in vars {
        let hint = table
            .display_name(v)
            .map(|name| format!("{}'", name));
        let fresh = table.fresh_variable(hint);
        sigma.insert(v, Term::atom(fresh));
    }

    substitute_clause(clause, &sigma)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbol::SymbolTable;

    fn relation(table: &mut SymbolTable, args: Vec<Rc<Term>>) -> Rc<Term> {
        let r = table.fresh_constant(None);
        Term::relation(r, Term::args(args))
    }

    #[test]
    pub fn canon_prunes_reflexive_negation() {
        let mut table = SymbolTable::new();
        let mut canonical = CanonicalVariables::new();
        let c = table.fresh_constant(None);

        let mut clause: Clause = BTreeSet::new();
        clause.insert(Literal::new(Term::not(Term::equality(
            Term::atom(c),
            Term::atom(c),
        ))));

        let result = canon(&clause, &mut table, &mut canonical);
        assert!(result.is_empty());
    }

    #[test]
    pub fn canon_keeps_positive_reflexive_literal() {
        let mut table = SymbolTable::new();
        let mut canonical = CanonicalVariables::new();
        let c = table.fresh_constant(None);

        let mut clause: Clause = BTreeSet::new();
        clause.insert(Literal::new(Term::equality(Term::atom(c), Term::atom(c))));

        let result = canon(&clause, &mut table, &mut canonical);
        assert_eq!(result.len(), 1);
    }

    #[test]
    pub fn canon_is_idempotent() {
        let mut table = SymbolTable::new();
        let mut canonical = CanonicalVariables::new();
        let v = table.fresh_variable(None);
        let lit = Literal::new(relation(&mut table, vec![Term::atom(v)]));
        let mut clause: Clause = BTreeSet::new();
        clause.insert(lit);

        let once = canon(&clause, &mut table, &mut canonical);
        let twice = canon(&once, &mut table, &mut canonical);
        assert_eq!(once, twice);
    }

    #[test]
    pub fn canon_is_alpha_insensitive() {
        let mut table = SymbolTable::new();
        let mut canonical = CanonicalVariables::new();
        let r = table.fresh_constant(None);
        let v1 = table.fresh_variable(None);
        let v2 = table.fresh_variable(None);

        let mut clause_a: Clause = BTreeSet::new();
        clause_a.insert(Literal::new(Term::relation(r, Term::args(vec![Term::atom(v1)]))));

        let mut clause_b: Clause = BTreeSet::new();
        clause_b.insert(Literal::new(Term::relation(r, Term::args(vec![Term::atom(v2)]))));

        let canon_a = canon(&clause_a, &mut table, &mut canonical);
        let canon_b = canon(&clause_b, &mut table, &mut canonical);
        assert_eq!(canon_a, canon_b);
    }

    #[test]
    pub fn uniquify_produces_disjoint_variables() {
        let mut table = SymbolTable::new();
        let v = table.fresh_variable(Some("x".to_string()));
        let r = table.fresh_constant(None);

        let mut clause: Clause = BTreeSet::new();
        clause.insert(Literal::new(Term::relation(r, Term::args(vec![Term::atom(v)]))));

        let fresh = uniquify(&clause, &mut table);
        let is_variable = |id: Ident| table.is_variable(id);
        let original_vars: std::collections::HashSet<_> =
            clause_variables(&clause, &is_variable).into_iter().collect();
        let fresh_vars: std::collections::HashSet<_> =
            clause_variables(&fresh, &is_variable).into_iter().collect();

        assert!(original_vars.is_disjoint(&fresh_vars));
    }
}
