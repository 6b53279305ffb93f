use clap::{Parser, Subcommand};

use crate::consts::{KIWIPETE, START_FEN};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("APP_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Raise console logging to debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Mirror logs into /tmp/roam_logs
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the board and its mobility evaluation trace
    Eval {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },

    /// Time the mobility counter and the cached evaluator on a position
    Bench {
        /// FEN string for the position
        #[arg(short, long, default_value = KIWIPETE)]
        fen: String,
        /// evaluations per timed run
        #[arg(short, long, default_value = "5000000")]
        iterations: u64,
    },
}
