//! # Configuration
//!
//! [`Config`] bundles the knobs an embedding application is expected to
//! tune: the cost budget that bounds the saturation loop, and the cost
//! heuristic itself. The defaults (`max_cost = 1000` and the 3/1/+20
//! weighting scheme) are a reasonable starting point; this crate exposes
//! them as fields rather than constants so a caller working a harder
//! problem can raise the budget without forking the engine.

use crate::clause::Clause;
use crate::symbol::{Ident, SymbolTable};
use crate::term::Term;
use std::rc::Rc;

/// The default cost budget: the saturation loop gives up once every clause
/// on its frontier would exceed this cost, without finding the empty
/// clause.
pub const DEFAULT_BUDGET: u64 = 1000;

/// Per-term cost weights used by [`default_cost`]. A variable occurrence
/// costs the least (unifying it away is cheap and common); a constant
/// occurrence costs more; and a non-builtin relation or functor head costs
/// a flat surcharge on top of its arguments' cost, biasing the search
/// toward clauses built from fewer, simpler relations.
#[derive(Clone, Copy, Debug)]
pub struct CostWeights {
    pub variable: u64,
    pub constant: u64,
    pub head_surcharge: u64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            variable: 3,
            constant: 1,
            head_surcharge: 20,
        }
    }
}

/// Tunable parameters for a single proof attempt.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub budget: u64,
    pub weights: CostWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            weights: CostWeights::default(),
        }
    }
}

/// The cost of a single term, by recursive weighted count: every variable
/// occurrence costs `weights.variable`, every constant occurrence costs
/// `weights.constant`, and every `Relation`/`Functor` head other than
/// equality adds `weights.head_surcharge` on top of its arguments' cost.
/// Equality itself is not surcharged, since it is a builtin the prover
/// introduces freely during paramodulation and should not be penalized
/// relative to a user-declared relation.
fn term_cost(t: &Rc<Term>, table: &SymbolTable, weights: &CostWeights) -> u64 {
    match t.as_ref() {
        Term::Atom(id) => {
            if table.is_variable(*id) {
                weights.variable
            } else {
                weights.constant
            }
        }
        Term::Functor(_, args) => weights.head_surcharge + term_cost(args, table, weights),
        Term::Relation(head, args) => {
            let surcharge = if is_builtin(*head) {
                0
            } else {
                weights.head_surcharge
            };
            surcharge + term_cost(args, table, weights)
        }
        Term::Args(elems) => elems.iter().map(|e| term_cost(e, table, weights)).sum(),
        Term::And(l, r)
        | Term::Or(l, r)
        | Term::Implies(l, r)
        | Term::Iff(l, r) => term_cost(l, table, weights) + term_cost(r, table, weights),
        Term::Not(b) => term_cost(b, table, weights),
        Term::Universal(_, b) | Term::Existential(_, b) => term_cost(b, table, weights),
    }
}

/// The cost of a clause: the sum of its literals' term costs. Used by the
/// saturation engine both to order its frontier (cheapest first) and to
/// decide whether a derived clause still fits within [`Config::budget`].
pub fn default_cost(clause: &Clause, table: &SymbolTable, weights: &CostWeights) -> u64 {
    clause
        .iter()
        .map(|lit| term_cost(lit.term(), table, weights))
        .sum()
}

/// Identifiers the cost heuristic never surcharges. Only the built-in
/// equality relation, at present; [`term_cost`] consults this rather than
/// comparing against [`crate::symbol::EQUALITY`] directly, so a caller
/// extending the set of surcharge-exempt heads has one place to change.
pub fn is_builtin(id: Ident) -> bool {
    id == crate::symbol::EQUALITY
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::clause::Literal;
    use crate::symbol::SymbolTable;

    #[test]
    pub fn variable_cost_is_cheaper_than_constant() {
        let mut table = SymbolTable::new();
        let v = table.fresh_variable(None);
        let c = table.fresh_constant(None);
        let weights = CostWeights::default();

        assert!(term_cost(&Term::atom(v), &table, &weights) < term_cost(&Term::atom(c), &table, &weights));
    }

    #[test]
    pub fn relation_head_adds_surcharge() {
        let mut table = SymbolTable::new();
        let v = table.fresh_variable(None);
        let r = table.fresh_constant(None);
        let weights = CostWeights::default();

        let bare = Term::atom(v);
        let wrapped = Term::relation(r, Term::args(vec![Term::atom(v)]));

        assert_eq!(
            term_cost(&wrapped, &table, &weights),
            term_cost(&bare, &table, &weights) + weights.head_surcharge
        );
    }

    #[test]
    pub fn equality_is_not_surcharged() {
        let mut table = SymbolTable::new();
        let v = table.fresh_variable(None);
        let weights = CostWeights::default();

        let eq = Term::equality(Term::atom(v), Term::atom(v));
        assert_eq!(term_cost(&eq, &table, &weights), weights.variable * 2);
    }

    #[test]
    pub fn clause_cost_sums_its_literals() {
        let mut table = SymbolTable::new();
        let v = table.fresh_variable(None);
        let r = table.fresh_constant(None);
        let weights = CostWeights::default();

        let mut clause = Clause::new();
        clause.insert(Literal::new(Term::relation(r, Term::args(vec![Term::atom(v)]))));
        clause.insert(Literal::new(Term::not(Term::relation(
            r,
            Term::args(vec![Term::atom(v)]),
        ))));

        let single = term_cost(&Term::relation(r, Term::args(vec![Term::atom(v)])), &table, &weights);
        assert_eq!(default_cost(&clause, &table, &weights), single * 2);
    }
}
