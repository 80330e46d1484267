//! # The saturation engine
//!
//! [`Engine`] owns everything a proof attempt needs — the symbol table, the
//! canonical-variable pool, and a set of accumulated theorems — and drives
//! the best-first saturation loop that is this prover's refutation
//! procedure: a min-cost frontier of pending clauses, a `canon` set of
//! everything already admitted, and a proof map recording how each admitted
//! clause was derived.
//!
//! Deliberately encapsulated rather than kept in a process-wide global:
//! several proof attempts, each with their own symbol namespace, can run
//! side by side without stepping on one another, rather than sharing a
//! single `lazy_static!`-backed table.

use crate::clause::{canon, uniquify, CanonicalVariables, Clause};
use crate::cnf::clausify;
use crate::config::{default_cost, Config};
use crate::error::ProverError;
use crate::infer::{binary_resolution, is_empty_clause, paramodulation};
use crate::render::{render_proof, RenderPreferences};
use crate::symbol::{Ident, SymbolTable};
use crate::term::Term;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::rc::Rc;

/// How a clause in the proof DAG was obtained.
#[derive(Clone, Debug)]
pub enum ProofEntry {
    /// Asserted directly: an axiom, or the negated conjecture.
    Axiom,
    /// Derived from two parent clauses by the named rule.
    Derived {
        parent_a: Clause,
        parent_b: Clause,
        justification: Justification,
    },
}

/// Which inference rule produced a derived clause.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Justification {
    BinaryResolution,
    Paramodulation,
}

/// The outcome of a refutation attempt.
#[derive(Clone, Debug)]
pub enum ProofOutcome {
    /// The empty clause was derived; the accumulated theorems and the
    /// negated goal are jointly unsatisfiable.
    Proved { proof: HashMap<Clause, ProofEntry> },
    /// The saturation loop reached a fixed point — nothing left on the
    /// frontier — without deriving the empty clause. The goal is not
    /// provable from what was asserted (within this complete-within-budget
    /// search), though this prover gives no completeness guarantee in
    /// general (see the module docs of [`crate`]).
    Saturated,
    /// The cost budget was exhausted before either of the above.
    BudgetExceeded,
}

#[derive(Clone, Eq, PartialEq)]
struct Frontier {
    cost: u64,
    // BinaryHeap is a max-heap; order ties by insertion sequence so that
    // the heap's pop order is fully deterministic rather than depending on
    // Clause's own Ord, which is itself derived from literal hashes.
    sequence: u64,
    clause: Clause,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse by cost and sequence jointly: we want the *smallest* cost
        // (and, among ties, the earliest-pushed clause) to be popped first
        // from a max-heap.
        Reverse((self.cost, self.sequence)).cmp(&Reverse((other.cost, other.sequence)))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Owns the symbol namespace and the accumulated set of asserted theorems
/// for one line of reasoning. Cheap to create; nothing about it is process
/// global.
pub struct Engine {
    table: SymbolTable,
    canonical: CanonicalVariables,
    config: Config,
    prefs: RenderPreferences,
    theorems: HashSet<Clause>,
}

impl Engine {
    /// Creates a fresh engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a fresh engine with a caller-supplied cost budget and
    /// weights.
    pub fn with_config(config: Config) -> Self {
        Self {
            table: SymbolTable::new(),
            canonical: CanonicalVariables::new(),
            config,
            prefs: RenderPreferences::new(),
            theorems: HashSet::new(),
        }
    }

    /// The symbol table backing this engine, for callers that need to mint
    /// their own identifiers before building a formula.
    pub fn symbols(&mut self) -> &mut SymbolTable {
        &mut self.table
    }

    /// The notational-preference map used by [`Engine::render_proof`] and
    /// [`Engine::render_clause`].
    pub fn preferences(&mut self) -> &mut RenderPreferences {
        &mut self.prefs
    }

    /// Clausifies `formula` without asserting it, for callers that want to
    /// inspect the CNF of a formula on its own. Fails at this pipeline's
    /// boundary (see [`crate::cnf::validate_formula`]) if `formula` mentions
    /// an unregistered identifier, nests a `Relation` inside a `Functor`'s
    /// arguments, or has a variable occurring free with no enclosing
    /// quantifier.
    pub fn cnf(&mut self, formula: &Rc<Term>) -> Result<HashSet<Clause>, ProverError> {
        Ok(clausify(formula, &mut self.table)?
            .into_iter()
            .map(|c| canon(&c, &mut self.table, &mut self.canonical))
            .collect())
    }

    /// Clausifies `formula` and adds its clauses to this engine's
    /// accumulated theorem set. A later call to [`Engine::prove`] treats
    /// every accumulated theorem as an additional axiom, alongside whatever
    /// is passed to that call directly, so this crate's `Engine` can
    /// accumulate background theory incrementally, the way an interactive
    /// session would, rather than clausifying and proving in one shot.
    pub fn assert_theorem(&mut self, formula: &Rc<Term>) -> Result<(), ProverError> {
        for clause in self.cnf(formula)? {
            self.theorems.insert(clause);
        }
        Ok(())
    }

    /// All theorems asserted on this engine so far.
    pub fn theorems(&self) -> &HashSet<Clause> {
        &self.theorems
    }

    /// Renders a clause using this engine's symbol table and notational
    /// preferences.
    pub fn render_clause(&self, clause: &Clause) -> String {
        crate::render::render_clause(clause, &self.table, &self.prefs)
    }

    /// Renders a completed proof using this engine's symbol table and
    /// notational preferences.
    pub fn render_proof(&self, proof: &HashMap<Clause, ProofEntry>, goal: &Clause) -> String {
        render_proof(proof, goal, &self.table, &self.prefs)
    }

    /// Attempts to refute `negated_goal` against every accumulated theorem
    /// plus every clause of `axioms`: runs the best-first saturation loop
    /// until the empty clause is derived, the frontier runs dry, or the
    /// cost budget in [`Config`] is exhausted.
    ///
    /// Callers pass in the *negated* goal (the standard refutation setup:
    /// a goal is a theorem iff its negation, together with the axioms, is
    /// unsatisfiable) already clausified — typically via
    /// [`Engine::cnf`] applied to `Term::not(goal)`.
    pub fn prove(
        &mut self,
        axioms: impl IntoIterator<Item = Clause>,
        negated_goal: impl IntoIterator<Item = Clause>,
    ) -> Result<ProofOutcome, ProverError> {
        let mut canon_set: HashSet<Clause> = HashSet::new();
        let mut order: Vec<Clause> = Vec::new();
        let mut proof: HashMap<Clause, ProofEntry> = HashMap::new();
        let mut cost_map: HashMap<Clause, u64> = HashMap::new();
        let mut frontier: BinaryHeap<Frontier> = BinaryHeap::new();
        let mut sequence: u64 = 0;

        let initial: Vec<Clause> = self
            .theorems
            .iter()
            .cloned()
            .chain(axioms)
            .chain(negated_goal)
            .map(|c| canon(&c, &mut self.table, &mut self.canonical))
            .collect();

        for clause in initial {
            if canon_set.contains(&clause) {
                continue;
            }
            // Axioms and the negated conjecture enter the frontier at cost
            // 0, regardless of their syntactic size; the cost heuristic only
            // penalizes clauses *derived* from them.
            let cost = 0;
            proof.insert(clause.clone(), ProofEntry::Axiom);
            cost_map.insert(clause.clone(), cost);
            frontier.push(Frontier {
                cost,
                sequence,
                clause,
            });
            sequence += 1;
        }

        while let Some(Frontier { cost, clause, .. }) = frontier.pop() {
            log::trace!("popped clause {} at cost {}", self.render_clause(&clause), cost);

            if canon_set.contains(&clause) {
                continue;
            }

            // A derived empty clause is a completed proof, full stop: it is
            // reported as such even if its own cost exceeds the budget,
            // since the budget exists to bound further search, not to
            // discard a refutation that has already been found.
            if is_empty_clause(&clause) {
                log::info!("derived the empty clause; proof found");
                return Ok(ProofOutcome::Proved { proof });
            }
            if cost > self.config.budget {
                log::info!("saturation gave up: cost {} exceeded budget {}", cost, self.config.budget);
                return Ok(ProofOutcome::BudgetExceeded);
            }

            log::debug!("admitting clause {} into the canon", self.render_clause(&clause));
            canon_set.insert(clause.clone());
            order.push(clause.clone());

            // Pair the newly admitted clause against every clause in `order`,
            // including itself: self-resolution (a clause resolving against
            // its own freshened copy) is a deliberate case the search must
            // not skip.
            for existing in order.clone().iter() {
                self.push_derivations(
                    existing,
                    &clause,
                    &mut canon_set,
                    &mut order,
                    &mut proof,
                    &mut cost_map,
                    &mut frontier,
                    &mut sequence,
                );
            }
        }

        log::info!("saturated: frontier exhausted without finding a contradiction");
        Ok(ProofOutcome::Saturated)
    }

    #[allow(clippy::too_many_arguments)]
    fn push_derivations(
        &mut self,
        a: &Clause,
        b: &Clause,
        canon_set: &mut HashSet<Clause>,
        order: &mut Vec<Clause>,
        proof: &mut HashMap<Clause, ProofEntry>,
        cost_map: &mut HashMap<Clause, u64>,
        frontier: &mut BinaryHeap<Frontier>,
        sequence: &mut u64,
    ) {
        let _ = order;

        log::trace!(
            "reducing {} with {}",
            self.render_clause(a),
            self.render_clause(b)
        );

        let resolvents = binary_resolution(a, b, &mut self.table);
        for derived in resolvents {
            self.admit_derivation(
                a,
                b,
                derived,
                Justification::BinaryResolution,
                canon_set,
                proof,
                cost_map,
                frontier,
                sequence,
            );
        }

        let paramodulants = paramodulation(a, b, &mut self.table);
        for derived in paramodulants {
            self.admit_derivation(
                a,
                b,
                derived,
                Justification::Paramodulation,
                canon_set,
                proof,
                cost_map,
                frontier,
                sequence,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn admit_derivation(
        &mut self,
        a: &Clause,
        b: &Clause,
        derived: Clause,
        justification: Justification,
        canon_set: &HashSet<Clause>,
        proof: &mut HashMap<Clause, ProofEntry>,
        cost_map: &mut HashMap<Clause, u64>,
        frontier: &mut BinaryHeap<Frontier>,
        sequence: &mut u64,
    ) {
        let derived = canon(&derived, &mut self.table, &mut self.canonical);

        if canon_set.contains(&derived) || proof.contains_key(&derived) {
            return;
        }

        log::trace!("pushing {}", self.render_clause(&derived));

        let a_cost = cost_map.get(a).copied().unwrap_or(0);
        let b_cost = cost_map.get(b).copied().unwrap_or(0);
        let cost = default_cost(&derived, &self.table, &self.config.weights)
            + a_cost.max(b_cost)
            + 1;

        proof.insert(
            derived.clone(),
            ProofEntry::Derived {
                parent_a: a.clone(),
                parent_b: b.clone(),
                justification,
            },
        );
        cost_map.insert(derived.clone(), cost);
        frontier.push(Frontier {
            cost,
            sequence: *sequence,
            clause: derived,
        });
        *sequence += 1;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Freshens `clause`'s variables against `engine`'s symbol table. A thin,
/// public re-export of [`uniquify`] for callers assembling axiom sets by
/// hand outside of [`Engine::cnf`].
pub fn freshen(clause: &Clause, engine: &mut Engine) -> Clause {
    uniquify(clause, &mut engine.table)
}
