//! Peg Solitaire Solver
//!
//! Exhaustively explores the game tree of the cross-shaped 33-hole
//! board from the canonical center-empty start, deduplicating states
//! that were already reached in any of their 8 symmetry orientations.

mod movegen;
mod reporter;
mod search;
mod stats;

use std::env;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use solitaire_core::Board;

use crate::reporter::ConsoleReporter;
use crate::search::{SearchConfig, SearchEngine};

fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let symmetry = !args.contains(&"--no-symmetry".to_string());
    let threshold = match parse_threshold(&args) {
        Ok(value) => value,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    println!("Peg Solitaire Solver");
    println!("====================");
    println!(
        "Mode: {}",
        if symmetry {
            "symmetry dedup"
        } else {
            "full enumeration (no dedup)"
        }
    );
    println!("Game-over report threshold: {} stones", threshold);
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, stopping search...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let board = Board::new();
    println!("Starting position:\n{}", board);
    println!("Starting search...\n");

    let config = SearchConfig {
        report_threshold: threshold,
        symmetry_pruning: symmetry,
        log_interval_secs: 5,
    };
    let mut engine = SearchEngine::new(config, ConsoleReporter);

    let start = Instant::now();
    engine.run(&board, &running);
    let elapsed = start.elapsed();

    if !running.load(Ordering::SeqCst) {
        println!("\nSearch interrupted.");
        engine.stats.print_summary();
    }
    println!("\nTime: {:.2}s", elapsed.as_secs_f64());
}

/// Read `--threshold N` from the arguments; defaults to 3.
fn parse_threshold(args: &[String]) -> Result<u32, String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--threshold" {
            let value = iter
                .next()
                .ok_or_else(|| "--threshold requires a value".to_string())?;
            return value
                .parse()
                .map_err(|_| format!("invalid threshold: {}", value));
        }
    }
    Ok(3)
}
