use std::{
    fs::{self, read_dir},
    path::{Path, PathBuf},
    time::Instant,
};

use clap::Parser;
use roam::prelude::*;
use serde::Deserialize;

/// Runs TOML suites of positions with expected mobility counts and
/// terminal verdicts against the evaluator
#[derive(Parser, Debug)]
#[command(version, about)]
struct TesterCli {
    /// Path to a suite file or a directory containing .toml suites
    #[arg(required = true)]
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Suite {
    #[serde(default)]
    positions: Vec<PositionCase>,
}

#[derive(Debug, Deserialize)]
struct PositionCase {
    id: String,
    fen: String,
    /// Expected fast-counter mobility for white, if pinned down
    white_mobility: Option<i32>,
    /// Expected fast-counter mobility for black, if pinned down
    black_mobility: Option<i32>,
    /// Expected classification of the evaluation
    verdict: Option<Verdict>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Verdict {
    /// Ordinary graded score inside the heuristic band
    Scored,
    /// Side to move has no reply and is in check
    Mated,
    /// Opponent has no reply and is in check
    Mate,
    /// Either side has no reply without being in check
    Draw,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Scored => "scored",
            Verdict::Mated => "mated",
            Verdict::Mate => "mate",
            Verdict::Draw => "draw",
        };
        write!(f, "{s}")
    }
}

fn main() -> miette::Result<()> {
    init();
    let cli = TesterCli::parse();

    let suite_files = find_suite_files(&cli.path)?;
    miette::ensure!(
        !suite_files.is_empty(),
        "No .toml suites found in path: {}",
        cli.path.display()
    );

    let mut total = 0usize;
    let mut passed = 0usize;
    let start_time = Instant::now();

    for file_path in suite_files {
        println!("Running suite: {}", file_path.display());
        println!("{:-<100}", "");
        let suite = parse_suite(&file_path)?;

        for case in &suite.positions {
            total += 1;
            match run_case(case) {
                Ok(()) => {
                    passed += 1;
                    println!("[{GREEN}PASS{RESET}] {:<24}", case.id);
                }
                Err(reason) => {
                    println!(
                        "[{RED}FAIL{RESET}] {:<24} | {} | FEN: {}",
                        case.id, reason, case.fen
                    );
                }
            }
        }
        println!();
    }

    println!("{:-<100}", "");
    println!(
        "{passed}/{total} cases passed in {:.2?}",
        start_time.elapsed()
    );
    miette::ensure!(passed == total, "{} case(s) failed", total - passed);
    Ok(())
}

/// Error text describes the first mismatch; Ok means every pinned
/// expectation held
fn run_case(case: &PositionCase) -> Result<(), String> {
    let board = match Board::from_fen(&case.fen) {
        Ok(board) => board,
        Err(e) => return Err(format!("unparseable FEN: {e}")),
    };

    let white = fast_mobility(&board, Side::White);
    let black = fast_mobility(&board, Side::Black);

    if let Some(expected) = case.white_mobility
        && white != expected
    {
        return Err(format!("white mobility {white}, expected {expected}"));
    }
    if let Some(expected) = case.black_mobility
        && black != expected
    {
        return Err(format!("black mobility {black}, expected {expected}"));
    }

    if let Some(expected) = case.verdict {
        let actual = classify(&board);
        if actual != expected {
            return Err(format!("verdict {actual}, expected {expected}"));
        }
    }

    Ok(())
}

fn classify(board: &Board) -> Verdict {
    let our = fast_mobility(board, board.stm);
    let their = fast_mobility(board, board.stm.flip());

    if our == 0 {
        return if board.is_in_check(board.stm) {
            Verdict::Mated
        } else {
            Verdict::Draw
        };
    }
    if their == 0 {
        return if board.is_in_check(board.stm.flip()) {
            Verdict::Mate
        } else {
            Verdict::Draw
        };
    }
    Verdict::Scored
}

fn find_suite_files(path: &Path) -> miette::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if path.is_dir() {
        for entry in read_dir(path).into_diagnostic()?.flatten() {
            let entry_path = entry.path();
            if entry_path.extension().is_some_and(|e| e == "toml") {
                files.push(entry_path);
            }
        }
        files.sort();
    } else if path.is_file() {
        files.push(path.to_path_buf());
    }
    Ok(files)
}

fn parse_suite(path: &Path) -> miette::Result<Suite> {
    let contents = fs::read_to_string(path)
        .into_diagnostic()
        .with_context(|| format!("reading suite {}", path.display()))?;
    toml::from_str(&contents)
        .into_diagnostic()
        .with_context(|| format!("parsing suite {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_matches_known_positions() {
        let startpos = Board::new();
        assert_eq!(classify(&startpos), Verdict::Scored);

        let mate = Board::from_fen("KRBRRRRR/PPnPPPPP/8/8/8/8/8/7k w - - 0 1").unwrap();
        assert_eq!(classify(&mate), Verdict::Mated);

        let stale = Board::from_fen("KRBRRRRR/PP1PPPPP/8/8/8/8/8/7k w - - 0 1").unwrap();
        assert_eq!(classify(&stale), Verdict::Draw);
    }

    #[test]
    fn test_suite_format_parses() {
        let suite: Suite = toml::from_str(
            r#"
            [[positions]]
            id = "startpos"
            fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            white_mobility = 20
            black_mobility = 20
            verdict = "scored"

            [[positions]]
            id = "bare"
            fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
            "#,
        )
        .unwrap();
        assert_eq!(suite.positions.len(), 2);
        assert_eq!(suite.positions[0].verdict, Some(Verdict::Scored));
        assert_eq!(suite.positions[1].white_mobility, None);
        assert!(run_case(&suite.positions[0]).is_ok());
    }
}
