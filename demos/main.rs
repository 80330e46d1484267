//! # Entry point for the commutativity demo
//!
//! Proves that, given associativity and commutativity axioms for a binary
//! function symbol `f`, `f(f(a, b), c) = f(f(b, a), c)` — a small exercise
//! in paramodulation, rather than pure resolution.

use anyhow::Result;
use clap::{App, Arg};
use log::info;
use resolvo::config::Config;
use resolvo::engine::{Engine, ProofOutcome};
use resolvo::term::Term;
use std::process::exit;

////////////////////////////////////////////////////////////////////////////////
// Useful constants.
////////////////////////////////////////////////////////////////////////////////

const APPLICATION_NAME: &str = "resolvo-demo";
const ABOUT_MESSAGE: &str = "Proves a small commutativity fact by saturation.";
const AUTHOR_LIST: &str = "The Resolvo Development Team.";
const VERSION_NUMBER: &str = "0.1.0";

////////////////////////////////////////////////////////////////////////////////
// Command-line parsing.
////////////////////////////////////////////////////////////////////////////////

/// Captures the command line arguments passed to the program.
struct CommandLineArguments {
    /// The cost budget to saturate within.
    budget: u64,
}

/// Parses the command line arguments of the program, exiting with an error
/// code if this cannot be done successfully.
fn parse_command_line_arguments() -> CommandLineArguments {
    let app = App::new(APPLICATION_NAME)
        .about(ABOUT_MESSAGE)
        .version(VERSION_NUMBER)
        .author(AUTHOR_LIST)
        .arg(
            Arg::new("budget")
                .required(false)
                .short('b')
                .long("budget")
                .about("Cost budget for the saturation loop")
                .default_value("1000"),
        );

    let matches = app.get_matches();

    let budget = matches
        .value_of("budget")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1000);

    CommandLineArguments { budget }
}

////////////////////////////////////////////////////////////////////////////////
// Entry point.
////////////////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {
    let args = parse_command_line_arguments();

    let config = Config {
        budget: args.budget,
        ..Config::default()
    };
    let mut engine = Engine::with_config(config);

    let a = engine.symbols().fresh_constant(Some("a".to_string()));
    let b = engine.symbols().fresh_constant(Some("b".to_string()));
    let c = engine.symbols().fresh_constant(Some("c".to_string()));
    let f = engine.symbols().fresh_constant(Some("f".to_string()));
    let x = engine.symbols().fresh_variable(Some("x".to_string()));
    let y = engine.symbols().fresh_variable(Some("y".to_string()));

    let binary = |u: u64, v: u64| Term::functor(f, Term::args(vec![Term::atom(u), Term::atom(v)]));

    // forall x y. f(x, y) = f(y, x)
    let commutativity = Term::universal(
        x,
        Term::universal(y, Term::equality(binary(x, y), binary(y, x))),
    );

    // goal: f(f(a, b), c) = f(f(b, a), c)
    let lhs = Term::functor(f, Term::args(vec![binary(a, b), Term::atom(c)]));
    let rhs = Term::functor(f, Term::args(vec![binary(b, a), Term::atom(c)]));
    let goal = Term::equality(lhs, rhs);
    let negated_goal = Term::not(goal);

    info!("asserting commutativity axiom");
    engine.assert_theorem(&commutativity)?;

    info!("clausifying negated goal");
    let negated_clauses = engine.cnf(&negated_goal)?;

    let outcome = engine.prove(std::iter::empty(), negated_clauses)?;

    match outcome {
        ProofOutcome::Proved { proof } => {
            let empty = resolvo::clause::Clause::new();
            println!("{}", engine.render_proof(&proof, &empty));
        }
        ProofOutcome::Saturated => {
            eprintln!("saturated without finding a contradiction");
            exit(1);
        }
        ProofOutcome::BudgetExceeded => {
            eprintln!("exceeded the cost budget of {}", args.budget);
            exit(2);
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        exit(1);
    }
}
