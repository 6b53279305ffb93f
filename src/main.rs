use std::hint::black_box;
use std::time::Instant;

use clap::Parser;
use roam::prelude::*;

fn main() -> miette::Result<()> {
    init();

    let cli = Cli::parse();
    if cli.verbose {
        set_log_level(Level::DEBUG)?;
    }
    if cli.log_file {
        toggle_file_logging(true)?;
    }

    match cli.command {
        Some(Commands::Eval { fen }) => {
            let board = Board::from_fen(&fen)?;
            println!("{board}");
            println!("{}", evaluation::trace(&board));
        }
        Some(Commands::Bench { fen, iterations }) => {
            let board = Board::from_fen(&fen)?;
            run_bench(&board, iterations);
        }
        None => {
            let board = Board::new();
            println!("{board}");
            println!("{}", evaluation::trace(&board));
        }
    }
    Ok(())
}

fn run_bench(board: &Board, iterations: u64) {
    info!("benching {} iterations on {:016x}", iterations, board.hash);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(fast_mobility(black_box(board), board.stm));
    }
    let raw = start.elapsed();

    let mut evaluator = MobilityEvaluator::new();
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(evaluator.evaluate(black_box(board)));
    }
    let cached = start.elapsed();

    let per_sec = |elapsed: std::time::Duration| {
        let ms = elapsed.as_millis().max(1) as u64;
        iterations * 1000 / ms
    };

    println!("fast_mobility:    {raw:>10.2?} total, {:>12} calls/s", per_sec(raw));
    println!("cached evaluate:  {cached:>10.2?} total, {:>12} calls/s", per_sec(cached));
}
