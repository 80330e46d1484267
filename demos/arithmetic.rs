//! # Entry point for the zero-annihilator demo
//!
//! Proves that, given `forall x. mul(x, zero) = zero` and
//! `forall x. mul(zero, x) = zero`, `mul(a, zero) = mul(zero, a)` for any
//! constant `a` — both equations get paramodulated into the goal to rewrite
//! each side down to `zero`, after which the two `zero = zero` copies
//! resolve against the negated goal's reflexivity mismatch.

use anyhow::Result;
use clap::{App, Arg};
use log::info;
use resolvo::config::Config;
use resolvo::engine::{Engine, ProofOutcome};
use resolvo::term::Term;
use std::process::exit;

const APPLICATION_NAME: &str = "resolvo-arithmetic";
const ABOUT_MESSAGE: &str = "Proves that zero annihilates multiplication on both sides.";
const AUTHOR_LIST: &str = "The Resolvo Development Team.";
const VERSION_NUMBER: &str = "0.1.0";

struct CommandLineArguments {
    budget: u64,
}

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

fn run() -> Result<()> {
    let args = parse_command_line_arguments();

    let config = Config {
        budget: args.budget,
        ..Config::default()
    };
    let mut engine = Engine::with_config(config);

    let zero = engine.symbols().fresh_constant(Some("zero".to_string()));
    let mul = engine.symbols().fresh_constant(Some("mul".to_string()));
    let a = engine.symbols().fresh_constant(Some("a".to_string()));
    let x = engine.symbols().fresh_variable(Some("x".to_string()));

    let mul_app = |u: u64, v: u64| Term::functor(mul, Term::args(vec![Term::atom(u), Term::atom(v)]));

    let right_zero = Term::universal(x, Term::equality(mul_app(x, zero), Term::atom(zero)));
    let left_zero = Term::universal(x, Term::equality(mul_app(zero, x), Term::atom(zero)));

    // goal: mul(a, zero) = mul(zero, a)
    let goal = Term::equality(mul_app(a, zero), mul_app(zero, a));
    let negated_goal = Term::not(goal);

    info!("asserting both zero-annihilator axioms");
    engine.assert_theorem(&right_zero)?;
    engine.assert_theorem(&left_zero)?;

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
