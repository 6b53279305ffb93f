pub mod components;
pub mod fen;
pub mod zobrist;

use std::fmt::Display;

use crate::prelude::*;

/// Full position state: piece placement plus the FEN side fields and the
/// zobrist fingerprint. Immutable once built; this crate never plays moves.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Board {
    pub positions: BoardState,
    pub stm: Side,
    pub castling_rights: CastlingRights,
    pub enpassant_square: Option<Square>,
    pub halfmove_clock: u8,
    pub fullmove_counter: u16,
    pub hash: u64,
}

impl Board {
    /// Standard starting position
    pub fn new() -> Self {
        Self::from_fen(START_FEN).expect("start position FEN is valid")
    }

    pub(crate) fn empty() -> Self {
        Self {
            positions: BoardState::default(),
            stm: Side::White,
            castling_rights: CastlingRights::empty(),
            enpassant_square: None,
            halfmove_clock: 0,
            fullmove_counter: 1,
            hash: 0,
        }
    }

    pub fn from_fen(fen: &str) -> miette::Result<Self> {
        let mut board = fen::parse_fen(fen).with_context(|| format!("parsing FEN '{fen}'"))?;
        board.hash = zobrist::calculate_hash(&board);
        Ok(board)
    }

    #[inline(always)]
    pub fn get_piece_at(&self, square: Square) -> Option<(Piece, Side)> {
        self.positions.get_piece_at(square)
    }

    #[inline(always)]
    pub fn king_square(&self, side: Side) -> Option<usize> {
        self.positions
            .get_piece_bb(side, Piece::King)
            .lsb()
            .map(|sq| sq as usize)
    }

    /// Whether any piece of `by` attacks `square` under the current
    /// occupancy
    pub fn is_square_attacked(&self, square: usize, by: Side) -> bool {
        let occupied = self.positions.get_occupied_bb();

        // A pawn of `by` attacks `square` iff it stands on a square the
        // defender's pawn-attack pattern reaches from there.
        let pawn_origins = MOVE_TABLES.pawn_attacks(square, by.flip());
        if (pawn_origins & *self.positions.get_piece_bb(by, Piece::Pawn)).any() {
            return true;
        }

        if (MOVE_TABLES.knight_moves[square] & *self.positions.get_piece_bb(by, Piece::Knight))
            .any()
        {
            return true;
        }

        if (MOVE_TABLES.king_moves[square] & *self.positions.get_piece_bb(by, Piece::King)).any() {
            return true;
        }

        if (MOVE_TABLES.bishop_attacks(square, occupied) & self.positions.diag_sliders_bb(by))
            .any()
        {
            return true;
        }

        (MOVE_TABLES.rook_attacks(square, occupied) & self.positions.ortho_sliders_bb(by)).any()
    }

    /// Whether `side`'s king is currently attacked by the other side
    #[inline]
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(king_sq) => self.is_square_attacked(king_sq, side.flip()),
            None => false,
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..NUM_RANKS).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..NUM_FILES {
                let square = Square::from_coords(file, rank).expect("coords are in range");
                let c = match self.positions.get_piece_at(square) {
                    Some((piece, side)) => Piece::PIECE_CHARS[side.index()][piece.index()],
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f)?;
        writeln!(
            f,
            "stm: {} | castling: {} | ep: {} | hash: {:016x}",
            self.stm,
            self.castling_rights,
            self.enpassant_square
                .map_or("-".to_string(), |sq| sq.to_string().to_ascii_lowercase()),
            self.hash
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_basics() {
        let board = Board::new();
        assert_eq!(board.stm, Side::White);
        assert_eq!(board.king_square(Side::White), Some(4));
        assert_eq!(board.king_square(Side::Black), Some(60));
        assert!(!board.is_in_check(Side::White));
        assert!(!board.is_in_check(Side::Black));
        assert_ne!(board.hash, 0);
    }

    #[test]
    fn test_square_attack_detection() {
        // Lone white rook on e4 against the black king walk
        let board = Board::from_fen("4k3/8/8/8/4R3/8/8/4K3 b - - 0 1").unwrap();
        let e8 = Square::from_str("e8").unwrap().index();
        let d5 = Square::from_str("d5").unwrap().index();
        assert!(board.is_square_attacked(e8, Side::White));
        assert!(!board.is_square_attacked(d5, Side::White));
        assert!(board.is_in_check(Side::Black));
        assert!(!board.is_in_check(Side::White));
    }

    #[test]
    fn test_sliding_attack_blocked_by_any_piece() {
        // Same rook, but a white pawn shields e7: no check.
        let board = Board::from_fen("4k3/4P3/8/8/4R3/8/8/4K3 b - - 0 1").unwrap();
        assert!(!board.is_in_check(Side::Black));
        // The shield itself is attacked (defended, in movegen terms).
        let e7 = Square::from_str("e7").unwrap().index();
        assert!(board.is_square_attacked(e7, Side::White));
    }

    #[test]
    fn test_pawn_and_knight_checks() {
        let by_pawn = Board::from_fen("8/8/8/8/8/5p2/4K3/7k w - - 0 1").unwrap();
        assert!(by_pawn.is_in_check(Side::White));

        let by_knight = Board::from_fen("8/8/8/8/8/5n2/8/4K2k w - - 0 1").unwrap();
        assert!(by_knight.is_in_check(Side::White));
    }

    #[test]
    fn test_kings_attack_adjacent_squares() {
        let board = Board::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        let b1 = Square::from_str("b1").unwrap().index();
        let g1 = Square::from_str("g1").unwrap().index();
        assert!(board.is_square_attacked(b1, Side::White));
        assert!(board.is_square_attacked(g1, Side::Black));
        assert!(!board.is_square_attacked(b1, Side::Black));
    }
}
