//! # Rendering
//!
//! Turns terms, clauses, and proofs into readable text, using a symbol
//! table's display names instead of [`crate::term::Term`]'s bare `Display`
//! impl (which only ever shows raw identifiers). Grounded on the original
//! model's `render_cnf`/`render_tree`/`render_proof` trio, including the
//! same per-relation notational preference (prefix, infix, or postfix) a
//! caller can register for a given head identifier.
//!
//! Proof rendering walks the proof DAG in topological order — parents
//! before children — labeling each derived clause with the rule and parent
//! labels that produced it, the way the original's `render_proof` numbers
//! its derivation steps, but without reproducing that function's stray
//! formatting slips (a dropped plural and a literal `$s` placeholder that
//! was never substituted). Labels here are assigned deterministically by
//! visit order, not reused from any upstream numbering.

use crate::clause::{Clause, Literal};
use crate::engine::{Justification, ProofEntry};
use crate::symbol::{Ident, SymbolTable};
use crate::term::Term;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;

/// How a relation's applied form should be displayed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Style {
    /// `R(a, b, c)`
    Prefix,
    /// `a R b` — only sensible for binary relations; falls back to prefix
    /// notation if the relation is not applied to exactly two arguments.
    Infix,
    /// `(a, b, c) R`
    Postfix,
}

/// A per-identifier notational preference map. Identifiers with no entry
/// render in [`Style::Prefix`], except for equality, which defaults to
/// [`Style::Infix`] (rendered as `=`) since that is universally how it
/// reads.
#[derive(Clone, Debug, Default)]
pub struct RenderPreferences {
    styles: HashMap<Ident, Style>,
}

impl RenderPreferences {
    pub fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    pub fn set(&mut self, head: Ident, style: Style) {
        self.styles.insert(head, style);
    }

    fn style_for(&self, head: Ident) -> Style {
        if let Some(style) = self.styles.get(&head) {
            return *style;
        }
        if head == crate::symbol::EQUALITY {
            Style::Infix
        } else {
            Style::Prefix
        }
    }
}

/// Renders `t` using `table`'s display names and `prefs`' notational
/// choices.
pub fn render_term(t: &Rc<Term>, table: &SymbolTable, prefs: &RenderPreferences) -> String {
    let mut out = String::new();
    write_term(&mut out, t, table, prefs);
    out
}

fn write_term(out: &mut String, t: &Rc<Term>, table: &SymbolTable, prefs: &RenderPreferences) {
    match t.as_ref() {
        Term::Atom(id) => {
            let _ = write!(out, "{}", table.display_name_or_generated(*id));
        }
        Term::Functor(head, args) => write_applied(out, *head, args, table, prefs),
        Term::Relation(head, args) => write_applied(out, *head, args, table, prefs),
        Term::Args(elems) => {
            out.push('(');
            for (i, e) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_term(out, e, table, prefs);
            }
            out.push(')');
        }
        Term::And(l, r) => write_binary(out, "\u{2227}", l, r, table, prefs),
        Term::Or(l, r) => write_binary(out, "\u{2228}", l, r, table, prefs),
        Term::Not(b) => {
            out.push('\u{ac}');
            write_term(out, b, table, prefs);
        }
        Term::Implies(l, r) => write_binary(out, "\u{21d2}", l, r, table, prefs),
        Term::Iff(l, r) => write_binary(out, "\u{21d4}", l, r, table, prefs),
        Term::Universal(v, b) => {
            let _ = write!(out, "\u{2200}{}. ", table.display_name_or_generated(*v));
            write_term(out, b, table, prefs);
        }
        Term::Existential(v, b) => {
            let _ = write!(out, "\u{2203}{}. ", table.display_name_or_generated(*v));
            write_term(out, b, table, prefs);
        }
    }
}

fn write_binary(
    out: &mut String,
    op: &str,
    l: &Rc<Term>,
    r: &Rc<Term>,
    table: &SymbolTable,
    prefs: &RenderPreferences,
) {
    out.push('(');
    write_term(out, l, table, prefs);
    let _ = write!(out, " {} ", op);
    write_term(out, r, table, prefs);
    out.push(')');
}

fn write_applied(
    out: &mut String,
    head: Ident,
    args: &Rc<Term>,
    table: &SymbolTable,
    prefs: &RenderPreferences,
) {
    let name = table.display_name_or_generated(head);
    let elems: Option<&[Rc<Term>]> = match args.as_ref() {
        Term::Args(elems) => Some(elems.as_slice()),
        _ => None,
    };

    let style = prefs.style_for(head);
    match (style, elems) {
        (Style::Infix, Some([left, right])) => {
            write_term(out, left, table, prefs);
            let _ = write!(out, " {} ", name);
            write_term(out, right, table, prefs);
        }
        (Style::Postfix, Some(elems)) => {
            out.push('(');
            for (i, e) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_term(out, e, table, prefs);
            }
            let _ = write!(out, ") {}", name);
        }
        _ => {
            out.push_str(&name);
            write_term(out, args, table, prefs);
        }
    }
}

/// Renders a literal: `¬` prefixed iff negated, followed by its atom.
pub fn render_literal(lit: &Literal, table: &SymbolTable, prefs: &RenderPreferences) -> String {
    if lit.is_positive() {
        render_term(lit.term(), table, prefs)
    } else {
        format!("\u{ac}{}", render_term(&lit.atom(), table, prefs))
    }
}

/// Renders a clause as its literals joined by `\/`, or `\u{22a5}` (falsity)
/// for the empty clause.
pub fn render_clause(clause: &Clause, table: &SymbolTable, prefs: &RenderPreferences) -> String {
    if clause.is_empty() {
        return "\u{22a5}".to_string();
    }

    clause
        .iter()
        .map(|lit| render_literal(lit, table, prefs))
        .collect::<Vec<_>>()
        .join(" \u{2228} ")
}

fn justification_label(j: &Justification) -> &'static str {
    match j {
        Justification::BinaryResolution => "resolution",
        Justification::Paramodulation => "paramodulation",
    }
}

/// Renders a derivation's proof DAG as a numbered, topologically-ordered
/// list of steps: every clause's parents are listed (and therefore
/// rendered) before the clause itself. `goal` is the clause the proof ends
/// at — normally the empty clause.
pub fn render_proof(
    proof: &HashMap<Clause, ProofEntry>,
    goal: &Clause,
    table: &SymbolTable,
    prefs: &RenderPreferences,
) -> String {
    let mut order = Vec::new();
    let mut visited = std::collections::HashSet::new();
    topological_visit(goal, proof, &mut visited, &mut order);

    let mut labels: HashMap<Clause, usize> = HashMap::new();
    for (i, clause) in order.iter().enumerate() {
        labels.insert(clause.clone(), i + 1);
    }

    let mut out = String::new();
    for clause in &order {
        let label = labels[clause];
        let rendered = render_clause(clause, table, prefs);
        match proof.get(clause) {
            Some(ProofEntry::Axiom) | None => {
                let _ = writeln!(out, "{}. {}  [axiom]", label, rendered);
            }
            Some(ProofEntry::Derived {
                parent_a,
                parent_b,
                justification,
            }) => {
                let a_label = labels.get(parent_a).copied().unwrap_or(0);
                let b_label = labels.get(parent_b).copied().unwrap_or(0);
                let _ = writeln!(
                    out,
                    "{}. {}  [{} from {}, {}]",
                    label,
                    rendered,
                    justification_label(justification),
                    a_label,
                    b_label
                );
            }
        }
    }

    out
}

fn topological_visit(
    clause: &Clause,
    proof: &HashMap<Clause, ProofEntry>,
    visited: &mut std::collections::HashSet<Clause>,
    order: &mut Vec<Clause>,
) {
    if visited.contains(clause) {
        return;
    }
    visited.insert(clause.clone());

    if let Some(ProofEntry::Derived {
        parent_a,
        parent_b,
        ..
    }) = proof.get(clause)
    {
        topological_visit(parent_a, proof, visited, order);
        topological_visit(parent_b, proof, visited, order);
    }

    order.push(clause.clone());
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    pub fn equality_renders_infix_by_default() {
        let mut table = SymbolTable::new();
        let c = table.fresh_constant(None);
        let prefs = RenderPreferences::new();

        let eq = Term::equality(Term::atom(c), Term::atom(c));
        let rendered = render_term(&eq, &table, &prefs);
        assert!(rendered.contains('='));
    }

    #[test]
    pub fn relation_renders_prefix_by_default() {
        let mut table = SymbolTable::new();
        let r = table.fresh_constant(Some("R".to_string()));
        let c = table.fresh_constant(None);
        let prefs = RenderPreferences::new();

        let rel = Term::relation(r, Term::args(vec![Term::atom(c)]));
        let rendered = render_term(&rel, &table, &prefs);
        assert!(rendered.starts_with('R'));
    }

    #[test]
    pub fn empty_clause_renders_as_falsity() {
        let table = SymbolTable::new();
        let prefs = RenderPreferences::new();
        let clause = Clause::new();
        assert_eq!(render_clause(&clause, &table, &prefs), "\u{22a5}");
    }
}
