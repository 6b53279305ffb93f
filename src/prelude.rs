pub use crate::ansi_colors::*;
pub use crate::board::fen;
pub use crate::board::{
    self, Board,
    components::{BitBoard, BitBoardIterator, BoardState, CastlingRights, Piece, PieceInfo, Side, Square},
    zobrist::ZOBRIST,
};
pub use crate::consts::*;
pub use crate::evaluation::{
    self, Evaluator, MobilityEvaluator,
    bounds::MobilityBounds,
    cache::MobilityCache,
    history::MobilityHistory,
    mobility::{MobilityInfo, fast_mobility},
    score, tables,
};
pub use crate::moves::{self, move_info::Move, precomputed::MOVE_TABLES};
pub use crate::utils::{self, cli::*, log::*, prng::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
