use std::fmt::Write;

use crate::prelude::*;

pub mod bounds;
pub mod cache;
pub mod history;
pub mod mobility;
pub mod score;
pub mod tables;

use mobility::{MobilityInfo, mobility_info, mobility_score};

pub trait Evaluator {
    /// Static score of the position from the side to move's perspective
    fn evaluate(&mut self, board: &Board) -> i32;
    fn name(&self) -> &str;
}

/// Pure-mobility evaluator with a per-instance memo of mobility counts.
///
/// Owned by the search context for the lifetime of a search; `clear`
/// between independent searches instead of rebuilding, so the backing
/// table allocation survives.
pub struct MobilityEvaluator {
    cache: MobilityCache,
}

impl MobilityEvaluator {
    pub fn new() -> Self {
        Self {
            cache: MobilityCache::new(),
        }
    }

    /// Mobility counts for the position, through the cache
    pub fn cached_info(&mut self, board: &Board) -> MobilityInfo {
        if let Some(info) = self.cache.probe(board.hash) {
            return info;
        }
        let info = mobility_info(board);
        self.cache.store(board.hash, info);
        info
    }

    /// Invalidates memoized counts between searches
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for MobilityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for MobilityEvaluator {
    fn evaluate(&mut self, board: &Board) -> i32 {
        let info = self.cached_info(board);
        mobility_score(
            &info,
            board.is_in_check(board.stm),
            board.is_in_check(board.stm.flip()),
        )
    }

    fn name(&self) -> &str {
        "Mobility"
    }
}

/// One-shot evaluation without a cache
pub fn evaluate(board: &Board) -> i32 {
    let info = mobility_info(board);
    mobility_score(
        &info,
        board.is_in_check(board.stm),
        board.is_in_check(board.stm.flip()),
    )
}

/// Renders the evaluation breakdown for a position. Scores are shown from
/// white's point of view in pawn units.
pub fn trace(board: &Board) -> String {
    let us = board.stm;
    let our = fast_mobility(board, us);
    let their = fast_mobility(board, us.flip());
    let info = MobilityInfo::new(our, their);

    let white_in_check = board.is_in_check(Side::White);
    let black_in_check = board.is_in_check(Side::Black);
    let (us_in_check, them_in_check) = match us {
        Side::White => (white_in_check, black_in_check),
        Side::Black => (black_in_check, white_in_check),
    };

    // Mirrors the evaluator's contract: a position with moves left but the
    // mover in check has no static evaluation.
    if info.our_mobility != 0 && us_in_check {
        return "Final evaluation: none (in check)".to_string();
    }

    let (white_mobility, black_mobility) = match us {
        Side::White => (our, their),
        Side::Black => (their, our),
    };

    let v = mobility_score(&info, us_in_check, them_in_check);
    let white_pov = if us == Side::White { v } else { -v };

    let mut out = String::new();
    let _ = writeln!(out, "Mobility evaluation");
    let _ = writeln!(out);
    let _ = writeln!(out, "White mobility     {white_mobility:>7}");
    let _ = writeln!(out, "Black mobility     {black_mobility:>7}");
    let _ = writeln!(
        out,
        "White in check     {:>7}",
        if white_in_check { "yes" } else { "no" }
    );
    let _ = writeln!(
        out,
        "Black in check     {:>7}",
        if black_in_check { "yes" } else { "no" }
    );
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Final evaluation   {:>+7.2} (white side)",
        score::to_pawns(white_pov)
    );
    if score::is_mate_score(white_pov) {
        let _ = write!(out, " [terminal]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::mobility::MATED_SCORE;

    #[test]
    fn test_cached_and_uncached_agree() {
        let mut evaluator = MobilityEvaluator::new();
        for fen in [START_FEN, KIWIPETE, "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1"] {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(evaluator.evaluate(&board), evaluate(&board), "fen: {fen}");
            // Second call hits the cache and must not drift.
            assert_eq!(evaluator.evaluate(&board), evaluate(&board), "fen: {fen}");
        }
    }

    #[test]
    fn test_evaluator_survives_clear() {
        let mut evaluator = MobilityEvaluator::new();
        let board = Board::from_fen(KIWIPETE).unwrap();
        let before = evaluator.evaluate(&board);
        evaluator.clear();
        assert_eq!(evaluator.evaluate(&board), before);
    }

    #[test]
    fn test_startpos_evaluates_to_zero() {
        let board = Board::new();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn test_evaluate_is_side_relative() {
        // Same placement, opposite movers: white has the big mobility edge.
        let white_to_move =
            Board::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        let black_to_move =
            Board::from_fen("4k3/8/8/8/3Q4/8/8/4K3 b - - 0 1").unwrap();
        let w = evaluate(&white_to_move);
        let b = evaluate(&black_to_move);
        assert!(w > 0);
        assert!(b < 0);
        assert_eq!(w, -b);
    }

    #[test]
    fn test_trace_contains_counts_and_verdict() {
        let board = Board::new();
        let report = trace(&board);
        assert!(report.contains("White mobility"));
        assert!(report.contains("20"));
        assert!(report.contains("Final evaluation"));
        assert!(report.contains("+0.00"));
        assert!(!report.contains("[terminal]"));
    }

    #[test]
    fn test_trace_declines_in_check_positions() {
        // Black queen checks the white king; white still has moves.
        let board = Board::from_fen("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1").unwrap();
        assert_eq!(trace(&board), "Final evaluation: none (in check)");
    }

    #[test]
    fn test_trace_marks_terminal_positions() {
        let board = Board::from_fen("KRBRRRRR/PPnPPPPP/8/8/8/8/8/7k w - - 0 1").unwrap();
        assert_eq!(evaluate(&board), MATED_SCORE);
        let report = trace(&board);
        assert!(report.contains("[terminal]"));
        let white_line = report
            .lines()
            .find(|l| l.starts_with("White mobility"))
            .unwrap();
        assert!(white_line.ends_with('0'));
        let check_line = report
            .lines()
            .find(|l| l.starts_with("White in check"))
            .unwrap();
        assert!(check_line.ends_with("yes"));
    }
}
