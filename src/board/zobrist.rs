use std::sync::LazyLock;

use crate::prelude::*;

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

/// Seed chosen once; the key tables must be identical across runs so that
/// cached fingerprints stay comparable between sessions of the same build.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
pub struct ZobristKeys {
    /// For each side, piece type and square
    pub pieces: [[[u64; NUM_SQUARES]; NUM_PIECES]; NUM_SIDES],
    /// For each of the 16 possible castling rights states
    pub castling: [u64; NUM_CASTLING_RIGHTS],
    /// For each of the 8 possible en passant files
    pub en_passant_file: [u64; NUM_FILES],
    /// Single key to flip when stm changes
    pub black_to_move: u64,
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = Prng::init(ZOBRIST_SEED);
        let mut keys = Self {
            pieces: [[[0; NUM_SQUARES]; NUM_PIECES]; NUM_SIDES],
            castling: [0; NUM_CASTLING_RIGHTS],
            en_passant_file: [0; NUM_FILES],
            black_to_move: rng.rand(),
        };

        for side in Side::SIDES {
            for piece in Piece::all_pieces() {
                for square in 0..NUM_SQUARES {
                    keys.pieces[side.index()][piece.index()][square] = rng.rand();
                }
            }
        }

        for key in keys.castling.iter_mut() {
            *key = rng.rand();
        }

        for key in keys.en_passant_file.iter_mut() {
            *key = rng.rand();
        }

        keys
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Full-board fingerprint used as the mobility cache key
pub fn calculate_hash(board: &Board) -> u64 {
    let mut hash = 0;

    Piece::all().for_each(|(piece, side)| {
        let mut piece_bb = *board.positions.get_piece_bb(side, piece);
        while let Some(sq) = piece_bb.try_pop_lsb() {
            hash ^= ZOBRIST.pieces[side.index()][piece.index()][sq as usize];
        }
    });

    hash ^= ZOBRIST.castling[board.castling_rights.0 as usize];

    // Only hash the en passant file when a capture is actually possible,
    // so transpositions with a dead ep square collapse to one fingerprint.
    if let Some(ep_sq) = board.enpassant_square {
        let capturing_pawns = board.positions.get_piece_bb(board.stm, Piece::Pawn);
        let capture_origins = MOVE_TABLES.pawn_attacks(ep_sq.index(), board.stm.flip());

        if (*capturing_pawns & capture_origins).any() {
            hash ^= ZOBRIST.en_passant_file[ep_sq.col()];
        }
    }

    if board.stm == Side::Black {
        hash ^= ZOBRIST.black_to_move;
    }

    hash
}
