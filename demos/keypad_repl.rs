//! Keypad REPL
//!
//! Reads lines from stdin and feeds each character to an evaluator, printing
//! the display after every line and the latest phase change when there was
//! one. On end of input, prints the journaled phase path and its time span.
//!
//! Keys: digits, `.`, `+ - * / % ^`, `=` evaluates, `<` deletes, `c` clears.
//!
//! Run with: RUST_LOG=keypad=debug cargo run --example keypad_repl

use keypad::{Evaluator, EvaluatorConfig, State};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::var("KEYPAD_CONFIG") {
        Ok(json) => EvaluatorConfig::from_json(&json)?,
        Err(_) => EvaluatorConfig::default(),
    };
    let mut calc = Evaluator::with_config(config)?;

    println!("=== Keypad ===");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let seen = calc.journal().last().map(|t| t.timestamp);
        calc.feed(&line);

        let marker = if calc.is_error() { " !" } else { "" };
        writeln!(stdout, "[{:>10}]{marker}", calc.display())?;
        if let Some(t) = calc.journal().last().filter(|t| Some(t.timestamp) != seen) {
            writeln!(stdout, "  {} -> {} on '{}'", t.from.name(), t.to.name(), t.trigger)?;
        }
        stdout.flush()?;
    }

    let journal = calc.journal();
    if !journal.is_empty() {
        let path: Vec<&str> = journal.get_path().into_iter().map(|p| p.name()).collect();
        println!("phases: {}", path.join(" -> "));
        if let Some(span) = journal.duration() {
            println!("{} changes over {:.3}s", journal.len(), span.as_secs_f64());
        }
    }

    Ok(())
}
