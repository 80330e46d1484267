//! # The unifier
//!
//! Computes the most general unifier (MGU) of two terms by repeatedly
//! finding their leftmost disagreement and extending a substitution: rather
//! than a structurally-recursive unifier, this walks the *pair* of terms,
//! re-substituting both sides after every extension, until they agree or a
//! disagreement cannot be resolved.
//!
//! Two properties are non-negotiable here:
//!
//! - The occurs check runs unconditionally on every variable binding, with
//!   no shortcut branch that skips it.
//! - The substitution returned is *closed*: applying it once,
//!   non-recursively (see [`crate::subst::substitute`]), to the original
//!   inputs is enough to make them agree. A substitution built by naively
//!   accumulating `{v: t}` entries without composing them can leave chains
//!   (`v1 ↦ v2`, `v2 ↦ c`) that a single-pass `substitute` won't fully
//!   resolve; [`crate::subst::compose`] closes over exactly this case.

use crate::subst::{compose, free_variables, substitute, Substitution};
use crate::symbol::Ident;
use crate::term::Term;
use std::rc::Rc;

/// Returns the leftmost pair of nodes, at the same tree position in `a` and
/// `b`, where the two disagree: either their variant tags differ, or both
/// are atoms with differing identifiers. Returns `None` if `a` and `b` are
/// structurally identical.
fn disagree(a: &Rc<Term>, b: &Rc<Term>) -> Option<(Rc<Term>, Rc<Term>)> {
    match (a.as_ref(), b.as_ref()) {
        (Term::Atom(x), Term::Atom(y)) => {
            if x == y {
                None
            } else {
                Some((a.clone(), b.clone()))
            }
        }
        (Term::Functor(hf, af), Term::Functor(hg, ag)) => {
            if hf != hg {
                Some((a.clone(), b.clone()))
            } else {
                disagree(af, ag)
            }
        }
        (Term::Relation(hf, af), Term::Relation(hg, ag)) => {
            if hf != hg {
                Some((a.clone(), b.clone()))
            } else {
                disagree(af, ag)
            }
        }
        (Term::Args(xs), Term::Args(ys)) => {
            if xs.len() != ys.len() {
                return Some((a.clone(), b.clone()));
            }
            xs.iter().zip(ys.iter()).find_map(|(x, y)| disagree(x, y))
        }
        (Term::And(l0, r0), Term::And(l1, r1))
        | (Term::Or(l0, r0), Term::Or(l1, r1))
        | (Term::Implies(l0, r0), Term::Implies(l1, r1))
        | (Term::Iff(l0, r0), Term::Iff(l1, r1)) => {
            disagree(l0, l1).or_else(|| disagree(r0, r1))
        }
        (Term::Not(x), Term::Not(y)) => disagree(x, y),
        (Term::Universal(v0, b0), Term::Universal(v1, b1))
        | (Term::Existential(v0, b0), Term::Existential(v1, b1)) => {
            if v0 != v1 {
                Some((a.clone(), b.clone()))
            } else {
                disagree(b0, b1)
            }
        }
        _otherwise => Some((a.clone(), b.clone())),
    }
}

/// Returns `true` iff `v` occurs free as an `Atom(v)` anywhere in `t`.
/// `is_variable` disambiguates atoms, since `v` is always a variable
/// identifier but `t` may mix variables and constants.
fn occurs(v: Ident, t: &Rc<Term>) -> bool {
    match t.as_ref() {
        Term::Atom(id) => *id == v,
        Term::Functor(_, args) | Term::Relation(_, args) => occurs(v, args),
        Term::Args(elems) => elems.iter().any(|e| occurs(v, e)),
        Term::And(l, r)
        | Term::Or(l, r)
        | Term::Implies(l, r)
        | Term::Iff(l, r) => occurs(v, l) || occurs(v, r),
        Term::Not(b) => occurs(v, b),
        Term::Universal(bv, b) | Term::Existential(bv, b) => *bv == v || occurs(v, b),
    }
}

/// Computes the most general unifier of `a` and `b`, or `None` if they
/// cannot be unified. `is_variable` tells the unifier which identifiers
/// denote variables (as opposed to constants).
///
/// An `Args` node is never bound to a variable: `disagree` only ever
/// produces a disagreement pair whose non-variable side is a variable's
/// binding target, and `Args` never appears where a bare variable could be
/// standing in its place (it is only ever the second component of a
/// `Functor`/`Relation`), so an `Args` node reaching this far against a
/// mismatched shape simply falls into the "not unifiable" case.
pub fn mgu(a: &Rc<Term>, b: &Rc<Term>, is_variable: &impl Fn(Ident) -> bool) -> Option<Substitution> {
    let mut sigma = Substitution::new();
    let mut a = a.clone();
    let mut b = b.clone();

    loop {
        let diff = match disagree(&a, &b) {
            None => return Some(sigma),
            Some(d) => d,
        };

        let (left, right) = diff;

        let binding = if let Some(v) = left.split_atom().filter(|v| is_variable(*v)) {
            if occurs(v, &right) {
                return None;
            }
            (v, right.clone())
        } else if let Some(v) = right.split_atom().filter(|v| is_variable(*v)) {
            if occurs(v, &left) {
                return None;
            }
            (v, left.clone())
        } else {
            return None;
        };

        compose(&mut sigma, binding.0, binding.1);

        a = substitute(&a, &sigma);
        b = substitute(&b, &sigma);
    }
}

/// Returns `true` iff applying `sigma` to `a` and to `b` (each in a single,
/// non-recursive pass) yields structurally identical terms. Used by tests
/// to check the unifier's soundness property.
pub fn unifies(a: &Rc<Term>, b: &Rc<Term>, sigma: &Substitution) -> bool {
    substitute(a, sigma) == substitute(b, sigma)
}

/// Returns the free variables shared between `a` and `b`, useful for
/// asserting variable-disjointness before binary resolution (see
/// [`crate::infer`]).
pub fn shared_variables(
    a: &Rc<Term>,
    b: &Rc<Term>,
    is_variable: &impl Fn(Ident) -> bool,
) -> Vec<Ident> {
    let avars: std::collections::HashSet<Ident> =
        free_variables(a, is_variable).into_iter().collect();
    free_variables(b, is_variable)
        .into_iter()
        .filter(|v| avars.contains(v))
        .collect()
}
