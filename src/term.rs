//! # The term algebra
//!
//! A [`Term`] is the tagged-variant tree that the whole prover is built
//! from: bare identifiers, applied function and relation symbols, the
//! propositional connectives, and the two quantifiers. Children are shared
//! via `Rc` rather than owned directly, so that structurally-equal subterms
//! (which arise constantly once clauses start getting resolved against one
//! another) are cheap to clone and cheap to compare: `Rc<Term>`'s `Eq`/`Hash`
//! implementations delegate straight to the pointee, so two `Rc<Term>`
//! handles compare equal exactly when the trees they point at are
//! structurally equal, not when the pointers coincide.
//!
//! Variant tags are always significant, even when two variants happen to
//! carry identical children: `Functor(f, args) != Relation(f, args)` for any
//! `f` and `args`. This matters because Skolemization turns a bare
//! existentially-quantified variable (an `Atom`) into an applied Skolem
//! function (a `Functor`); a substitution that confused the two variants
//! could quietly apply itself to the wrong kind of node.
//!
//! `Args` is a distinguished carrier for the argument tuple of a `Functor`
//! or a `Relation`. It is never meaningful on its own: the unifier refuses
//! to unify an `Args` node against anything, and the paramodulator refuses
//! to treat one as a rewrite site (see [`crate::infer`]).

use crate::symbol::Ident;
use std::fmt;
use std::rc::Rc;

/// A first-order term, formula, or clause fragment.
///
/// After the CNF pipeline (see [`crate::cnf`]) has run, only a restricted
/// shape of this type should appear in clauses: `Relation` nodes, `Not`
/// wrapping a `Relation`, `Functor`, `Args`, and `Atom`. The connective and
/// quantifier variants exist to represent formulas *before* clausification;
/// the saturation engine never sees them.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A bare identifier: a variable or a constant, disambiguated by the
    /// symbol table, never by this node itself.
    Atom(Ident),
    /// An applied function symbol, `head(args)`. `args` is always an
    /// [`Term::Args`] node.
    Functor(Ident, Rc<Term>),
    /// An applied relation symbol, `head(args)`. Equality is
    /// `Relation(0, Args(s, t))`. `args` is always an [`Term::Args`] node.
    Relation(Ident, Rc<Term>),
    /// An ordered argument tuple. Only ever appears as the second component
    /// of a `Functor` or `Relation`; never a unification or paramodulation
    /// target in its own right.
    Args(Vec<Rc<Term>>),
    And(Rc<Term>, Rc<Term>),
    Or(Rc<Term>, Rc<Term>),
    Not(Rc<Term>),
    /// A derived connective, eliminated by [`crate::cnf::eliminate_connectives`]
    /// before negation normal form is computed.
    Implies(Rc<Term>, Rc<Term>),
    /// A derived connective, eliminated by [`crate::cnf::eliminate_connectives`]
    /// before negation normal form is computed.
    Iff(Rc<Term>, Rc<Term>),
    /// A universally quantified variable and its body. Stripped (but not
    /// discarded: the variable survives as a free variable) by
    /// [`crate::cnf::skolemize`].
    Universal(Ident, Rc<Term>),
    /// An existentially quantified variable and its body. Stripped and
    /// Skolemized by [`crate::cnf::skolemize`].
    Existential(Ident, Rc<Term>),
}

impl Term {
    #[inline]
    pub fn atom(id: Ident) -> Rc<Term> {
        Rc::new(Term::Atom(id))
    }

    #[inline]
    pub fn args(children: Vec<Rc<Term>>) -> Rc<Term> {
        Rc::new(Term::Args(children))
    }

    #[inline]
    pub fn functor(head: Ident, args: Rc<Term>) -> Rc<Term> {
        debug_assert!(matches!(args.as_ref(), Term::Args(_)));
        Rc::new(Term::Functor(head, args))
    }

    #[inline]
    pub fn relation(head: Ident, args: Rc<Term>) -> Rc<Term> {
        debug_assert!(matches!(args.as_ref(), Term::Args(_)));
        Rc::new(Term::Relation(head, args))
    }

    /// Builds `Relation(0, Args(left, right))`, i.e. `left = right`.
    #[inline]
    pub fn equality(left: Rc<Term>, right: Rc<Term>) -> Rc<Term> {
        Term::relation(crate::symbol::EQUALITY, Term::args(vec![left, right]))
    }

    #[inline]
    pub fn and(left: Rc<Term>, right: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::And(left, right))
    }

    #[inline]
    pub fn or(left: Rc<Term>, right: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Or(left, right))
    }

    #[inline]
    pub fn not(body: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Not(body))
    }

    #[inline]
    pub fn implies(left: Rc<Term>, right: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Implies(left, right))
    }

    #[inline]
    pub fn iff(left: Rc<Term>, right: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Iff(left, right))
    }

    #[inline]
    pub fn universal(var: Ident, body: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Universal(var, body))
    }

    #[inline]
    pub fn existential(var: Ident, body: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Existential(var, body))
    }

    /// Returns `Some(id)` iff this term is a bare atom.
    pub fn split_atom(&self) -> Option<Ident> {
        if let Term::Atom(id) = self {
            Some(*id)
        } else {
            None
        }
    }

    /// Returns `Some((left, right))` iff this term is an equality relation,
    /// `Relation(0, Args(left, right))`.
    pub fn split_equality(&self) -> Option<(&Rc<Term>, &Rc<Term>)> {
        if let Term::Relation(head, args) = self {
            if *head == crate::symbol::EQUALITY {
                if let Term::Args(elems) = args.as_ref() {
                    if let [left, right] = elems.as_slice() {
                        return Some((left, right));
                    }
                }
            }
        }
        None
    }

    /// Returns `true` iff this term is a `Relation` node (of any head,
    /// including equality).
    #[inline]
    pub fn is_relation(&self) -> bool {
        matches!(self, Term::Relation(..))
    }

    /// Returns `true` iff this term is the distinguished `Args` carrier.
    #[inline]
    pub fn is_args(&self) -> bool {
        matches!(self, Term::Args(..))
    }

    /// Returns `true` iff this term contains no quantifier node anywhere in
    /// its structure. An invariant the CNF pipeline's Skolemization pass
    /// must establish before clause extraction runs.
    pub fn is_quantifier_free(&self) -> bool {
        match self {
            Term::Universal(..) | Term::Existential(..) => false,
            Term::Atom(_) => true,
            Term::Functor(_, args) | Term::Relation(_, args) => args.is_quantifier_free(),
            Term::Args(elems) => elems.iter().all(|e| e.is_quantifier_free()),
            Term::And(l, r) | Term::Or(l, r) | Term::Implies(l, r) | Term::Iff(l, r) => {
                l.is_quantifier_free() && r.is_quantifier_free()
            }
            Term::Not(b) => b.is_quantifier_free(),
        }
    }
}

impl fmt::Display for Term {
    /// A bare structural rendering, with no symbol-table-derived names and
    /// no infix/postfix preferences. See [`crate::render`] for the
    /// configurable renderer used by [`crate::engine::Engine`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(id) => write!(f, "#{}", id),
            Term::Functor(head, args) => write!(f, "#{}{}", head, args),
            Term::Relation(head, args) => write!(f, "#{}{}", head, args),
            Term::Args(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, ")")
            }
            Term::And(l, r) => write!(f, "({} \u{2227} {})", l, r),
            Term::Or(l, r) => write!(f, "({} \u{2228} {})", l, r),
            Term::Not(b) => write!(f, "\u{ac}({})", b),
            Term::Implies(l, r) => write!(f, "({} \u{21d2} {})", l, r),
            Term::Iff(l, r) => write!(f, "({} \u{21d4} {})", l, r),
            Term::Universal(v, b) => write!(f, "\u{2200}#{}. ({})", v, b),
            Term::Existential(v, b) => write!(f, "\u{2203}#{}. ({})", v, b),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn tag_sensitive_equality() {
        let args = Term::args(vec![Term::atom(1), Term::atom(2)]);
        let functor = Term::functor(7, args.clone());
        let relation = Term::relation(7, args);

        assert_ne!(functor, relation);
    }

    #[test]
    pub fn structural_equality_ignores_identity() {
        let a = Term::functor(1, Term::args(vec![Term::atom(2)]));
        let b = Term::functor(1, Term::args(vec![Term::atom(2)]));

        assert_eq!(a, b);
        assert!(!std::rc::Rc::ptr_eq(&a, &b));
    }

    #[test]
    pub fn quantifier_free_detection() {
        let quantified = Term::universal(1, Term::atom(1));
        let plain = Term::atom(1);

        assert!(!quantified.is_quantifier_free());
        assert!(plain.is_quantifier_free());
    }
}
