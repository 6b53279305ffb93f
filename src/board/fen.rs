use miette::{Context, IntoDiagnostic};

use super::Board;
use super::components::{CastlingRights, Piece, Side, Square};

/// Builds a [`Board`] from the six whitespace-separated FEN fields:
/// placement, side to move, castling rights, en passant square, halfmove
/// clock and fullmove counter. The zobrist hash is left for the caller.
pub fn parse_fen(fen: &str) -> miette::Result<Board> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    miette::ensure!(
        parts.len() == 6,
        "FEN needs 6 fields, got {}: '{fen}'",
        parts.len()
    );

    let mut board = Board::empty();
    place_pieces(&mut board, parts[0])
        .with_context(|| format!("placing pieces from '{}'", parts[0]))?;
    board.stm = parse_stm(parts[1]).with_context(|| format!("parsed stm input: {}", parts[1]))?;
    board.castling_rights =
        parse_castle(parts[2]).with_context(|| format!("parsed castle input: {}", parts[2]))?;
    board.enpassant_square = parse_enpassant(parts[3])
        .with_context(|| format!("parsed enpassant input: {}", parts[3]))?;
    board.halfmove_clock = parts[4]
        .parse::<u8>()
        .into_diagnostic()
        .with_context(|| format!("attempt to parse halfmove clock '{}'", parts[4]))?;
    board.fullmove_counter = parts[5]
        .parse::<u16>()
        .into_diagnostic()
        .with_context(|| format!("attempt to parse fullmove counter '{}'", parts[5]))?;
    Ok(board)
}

fn place_pieces(board: &mut Board, placement: &str) -> miette::Result<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    miette::ensure!(
        ranks.len() == 8,
        "piece placement needs 8 ranks, got {}",
        ranks.len()
    );

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i; // FEN lists rank 8 first
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let (piece, side) = Piece::from_fen_char(c)
                .ok_or_else(|| miette::miette!("unexpected piece char '{c}'"))?;
            let square = Square::from_coords(file, rank)
                .ok_or_else(|| miette::miette!("rank {rank_str} overflows the board"))?;
            board.positions.set(side, piece, square.index())?;
            file += 1;
        }
        miette::ensure!(file == 8, "rank '{rank_str}' does not describe 8 files");
    }
    Ok(())
}

fn parse_stm(stm: &str) -> miette::Result<Side> {
    match stm {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => Err(miette::miette!("invalid side to move '{stm}'")),
    }
}

fn parse_castle(castle: &str) -> miette::Result<CastlingRights> {
    let mut res = CastlingRights::NO_CASTLING;
    for c in castle.chars() {
        match c {
            'K' => res |= CastlingRights::WHITE_00,
            'Q' => res |= CastlingRights::WHITE_000,
            'k' => res |= CastlingRights::BLACK_00,
            'q' => res |= CastlingRights::BLACK_000,
            '-' => res = CastlingRights::NO_CASTLING,
            _ => {
                return Err(miette::miette!(
                    "unexpected character '{c}' while parsing castling rights"
                ));
            }
        };
    }
    Ok(CastlingRights(res))
}

fn parse_enpassant(enpassant: &str) -> miette::Result<Option<Square>> {
    if enpassant == "-" {
        return Ok(None);
    }
    let mut chars = enpassant.chars();
    let file = chars.next().context("missing en passant file")?;
    let rank = chars.next().context("missing en passant rank")?;
    Ok(Some(Square::enpassant_from_chars(file, rank)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_FEN;
    use std::str::FromStr;

    #[test]
    fn test_parse_startpos() {
        let board = parse_fen(START_FEN).unwrap();
        assert_eq!(board.stm, Side::White);
        assert_eq!(board.castling_rights, CastlingRights::all());
        assert_eq!(board.enpassant_square, None);
        assert_eq!(board.halfmove_clock, 0);
        assert_eq!(board.fullmove_counter, 1);
        assert_eq!(
            board.positions.get_piece_bb(Side::White, Piece::Pawn).pop_count(),
            8
        );
        assert_eq!(
            board
                .positions
                .get_piece_at(Square::from_str("e1").unwrap()),
            Some((Piece::King, Side::White))
        );
    }

    #[test]
    fn test_parse_enpassant_field() {
        let square = parse_enpassant("e3").unwrap().unwrap();
        assert_eq!(square, Square::from_str("e3").unwrap());

        assert!(parse_enpassant("e").is_err());
        assert!(parse_enpassant("e5").is_err());
        assert_eq!(parse_enpassant("-").unwrap(), None);
    }

    #[test]
    fn test_rejects_malformed_fen() {
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1").is_err());
    }
}
