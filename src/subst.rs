//! # Substitution and free variables
//!
//! A substitution is a finite mapping from variable identifiers to terms.
//! [`substitute`] applies one to a term in a single pass: it does not
//! recurse into the range of the substitution, and it does not iterate to a
//! fixpoint. Callers that need a substitution composed with itself (as the
//! unifier does, see [`crate::unify`]) are responsible for building that
//! composition before calling `substitute`.

use crate::symbol::Ident;
use crate::term::Term;
use std::collections::HashMap;
use std::rc::Rc;

/// A variable-to-term mapping.
pub type Substitution = HashMap<Ident, Rc<Term>>;

/// Replaces every `Atom(v)` in `t` for which `v ∈ dom(sigma)` with
/// `sigma[v]`, leaving every other node structurally intact and recursing
/// into its children. Performs no occurs check (that is the unifier's duty,
/// see [`crate::unify::mgu`]) and does not iterate to a fixpoint.
pub fn substitute(t: &Rc<Term>, sigma: &Substitution) -> Rc<Term> {
    match t.as_ref() {
        Term::Atom(id) => sigma.get(id).cloned().unwrap_or_else(|| t.clone()),
        Term::Functor(head, args) => Term::functor(*head, substitute(args, sigma)),
        Term::Relation(head, args) => Term::relation(*head, substitute(args, sigma)),
        Term::Args(elems) => {
            Term::args(elems.iter().map(|e| substitute(e, sigma)).collect())
        }
        Term::And(l, r) => Term::and(substitute(l, sigma), substitute(r, sigma)),
        Term::Or(l, r) => Term::or(substitute(l, sigma), substitute(r, sigma)),
        Term::Not(b) => Term::not(substitute(b, sigma)),
        Term::Implies(l, r) => Term::implies(substitute(l, sigma), substitute(r, sigma)),
        Term::Iff(l, r) => Term::iff(substitute(l, sigma), substitute(r, sigma)),
        Term::Universal(v, b) => Term::universal(*v, substitute(b, sigma)),
        Term::Existential(v, b) => Term::existential(*v, substitute(b, sigma)),
    }
}

/// Composes a new binding `v ↦ t` into an existing substitution,
/// closing over it: every existing binding in `sigma` has `v ↦ t`
/// applied to its range before the new binding is inserted. This is what
/// lets a single, non-recursive call to [`substitute`] fully resolve chains
/// of bindings (`v1 ↦ v2, v2 ↦ c` composes down to `v1 ↦ c`),
/// which the unifier's most-general-unifier property depends on.
pub fn compose(sigma: &mut Substitution, v: Ident, t: Rc<Term>) {
    let singleton: Substitution = std::iter::once((v, t.clone())).collect();

    for existing in sigma.values_mut() {
        *existing = substitute(existing, &singleton);
    }

    sigma.insert(v, t);
}

/// Returns the free variables of `t`, in first-appearance order under a
/// fixed pre-order, left-to-right traversal of children. Constants are
/// never included; whether an atom denotes a variable or a constant is a
/// fact about the symbol table, not about this term in isolation, so
/// callers pass in a predicate rather than consulting a global registry.
pub fn free_variables(t: &Rc<Term>, is_variable: &impl Fn(Ident) -> bool) -> Vec<Ident> {
    let mut seen = std::collections::HashSet::new();
    let mut order = Vec::new();
    collect_free_variables(t, is_variable, &mut seen, &mut order);
    order
}

fn collect_free_variables(
    t: &Rc<Term>,
    is_variable: &impl Fn(Ident) -> bool,
    seen: &mut std::collections::HashSet<Ident>,
    order: &mut Vec<Ident>,
) {
    match t.as_ref() {
        Term::Atom(id) => {
            if is_variable(*id) && seen.insert(*id) {
                order.push(*id);
            }
        }
        Term::Functor(_, args) | Term::Relation(_, args) => {
            collect_free_variables(args, is_variable, seen, order)
        }
        Term::Args(elems) => {
            for e in elems {
                collect_free_variables(e, is_variable, seen, order);
            }
        }
        Term::And(l, r)
        | Term::Or(l, r)
        | Term::Implies(l, r)
        | Term::Iff(l, r) => {
            collect_free_variables(l, is_variable, seen, order);
            collect_free_variables(r, is_variable, seen, order);
        }
        Term::Not(b) => collect_free_variables(b, is_variable, seen, order),
        Term::Universal(v, b) | Term::Existential(v, b) => {
            if is_variable(*v) && seen.insert(*v) {
                order.push(*v);
            }
            collect_free_variables(b, is_variable, seen, order);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    pub fn substitute_replaces_only_bound_variables() {
        let mut table = SymbolTable::new();
        let x = table.fresh_variable(None);
        let y = table.fresh_variable(None);
        let c = table.fresh_constant(None);

        let t = Term::args(vec![Term::atom(x), Term::atom(y), Term::atom(c)]);
        let mut sigma = Substitution::new();
        sigma.insert(x, Term::atom(c));

        let result = substitute(&t, &sigma);
        assert_eq!(result, Term::args(vec![Term::atom(c), Term::atom(y), Term::atom(c)]));
    }

    #[test]
    pub fn substitute_is_single_pass() {
        // sigma: x -> y, y -> c. A single substitute() call should only
        // perform the direct replacement, not chase the chain.
        let mut table = SymbolTable::new();
        let x = table.fresh_variable(None);
        let y = table.fresh_variable(None);
        let c = table.fresh_constant(None);

        let mut sigma = Substitution::new();
        sigma.insert(x, Term::atom(y));
        sigma.insert(y, Term::atom(c));

        let result = substitute(&Term::atom(x), &sigma);
        assert_eq!(result, Term::atom(y));
    }

    #[test]
    pub fn compose_closes_over_chains() {
        let mut table = SymbolTable::new();
        let x = table.fresh_variable(None);
        let y = table.fresh_variable(None);
        let c = table.fresh_constant(None);

        let mut sigma = Substitution::new();
        compose(&mut sigma, x, Term::atom(y));
        compose(&mut sigma, y, Term::atom(c));

        let result = substitute(&Term::atom(x), &sigma);
        assert_eq!(result, Term::atom(c));
    }

    #[test]
    pub fn free_variables_first_appearance_order() {
        let mut table = SymbolTable::new();
        let x = table.fresh_variable(None);
        let y = table.fresh_variable(None);
        let c = table.fresh_constant(None);

        let t = Term::args(vec![Term::atom(y), Term::atom(c), Term::atom(x), Term::atom(y)]);
        let is_var = |id| table.is_variable(id);

        assert_eq!(free_variables(&t, &is_var), vec![y, x]);
    }
}
