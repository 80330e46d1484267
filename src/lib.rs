//! # A first-order resolution prover
//!
//! This crate implements automated theorem proving for classical
//! first-order logic with equality, by refutation: to show that a goal
//! follows from a set of axioms, negate the goal, clausify everything, and
//! search for a derivation of the empty clause — a contradiction — using
//! binary resolution and paramodulation. If the empty clause is found, the
//! axioms and the negated goal are jointly unsatisfiable, which is exactly
//! to say the goal follows from the axioms.
//!
//! ## Pipeline
//!
//! A formula passes through four stages before it becomes a set of clauses
//! the saturation engine can reason over (see [`cnf`]):
//!
//! 1. [`cnf::eliminate_connectives`] rewrites away `⇒` and `⇔`.
//! 2. [`cnf::nnf`] pushes negation down to the leaves.
//! 3. [`cnf::skolemize`] strips quantifiers, replacing existentials with
//!    fresh function symbols applied to their enclosing universals.
//! 4. [`cnf::distribute`] pushes disjunction inside conjunction and reads
//!    the result off as a set of clauses.
//!
//! [`unify::mgu`] computes most general unifiers — the substitutions that
//! make two terms syntactically identical — which both [`infer::binary_resolution`]
//! and [`infer::paramodulation`] build on: resolution eliminates a pair of
//! unifiable, opposite-polarity literals from two clauses; paramodulation
//! rewrites a subterm of one clause using an equation asserted by another.
//!
//! [`engine::Engine`] drives the search: a best-first loop over a frontier
//! of pending clauses ordered by an estimated cost (see [`config`]),
//! admitting the cheapest clause not already seen, deriving everything
//! reachable from it in combination with every clause admitted so far, and
//! stopping when the empty clause is admitted, the frontier runs dry, or
//! the cost budget is spent.
//!
//! ## What this prover does not do
//!
//! It has no notion of higher-order quantification, no modal, temporal, or
//! intuitionistic extensions, and no built-in decision procedure for any
//! particular theory (arithmetic, lists, and so on are just more function
//! and relation symbols to it). It gives no completeness guarantee beyond
//! "exhausted its budget without finding a contradiction" and no guarantee
//! that a found proof is of minimal size. It does not accept a textual
//! surface syntax: formulas are built directly as [`term::Term`] trees
//! through an [`engine::Engine`]'s symbol table, the way an embedding
//! application or a test would, rather than parsed from source text.
//!
//! ## Diagnostics
//!
//! Every module that allocates symbols or admits clauses emits `log::trace!`
//! and `log::debug!` events; an embedding binary is expected to install
//! `env_logger` (see `demos/`) the way this crate's own test suite does not
//! need to.

pub mod clause;
pub mod cnf;
pub mod config;
pub mod engine;
pub mod error;
pub mod infer;
pub mod render;
pub mod subst;
pub mod symbol;
pub mod term;
pub mod unify;
