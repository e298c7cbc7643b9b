//! PDN-flavoured position notation for 10x10 draughts.
//!
//! `R:R1-20:B31-50` is the starting position: side to move first, then one
//! section per side listing occupied squares by number. A `K` prefix marks
//! kings and applies to the single entry or range it precedes, for example
//! `B:RK4,32:B19,K50`.

use crate::prelude::*;

pub fn parse_position(notation: &str) -> Result<Board> {
    let mut parts = notation.trim().split(':');

    let stm_token = parts
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| miette::miette!("empty position notation"))?;
    let stm = parse_side(stm_token)
        .with_context(|| format!("parsing side to move from '{stm_token}'"))?;

    let mut board = Board::empty();
    for section in parts {
        parse_section(&mut board, section)
            .with_context(|| format!("parsing piece section '{section}'"))?;
    }
    board.set_stm(stm);
    Ok(board)
}

pub fn format_position(board: &Board) -> String {
    let mut out = String::new();
    out.push(side_char(board.stm));
    for side in Side::SIDES {
        out.push(':');
        out.push(side_char(side));
        let mut first = true;
        for (sq, piece) in board.pieces(side) {
            if !first {
                out.push(',');
            }
            if piece.king {
                out.push('K');
            }
            out.push_str(&sq.number().to_string());
            first = false;
        }
    }
    out
}

fn side_char(side: Side) -> char {
    match side {
        Side::Red => 'R',
        Side::Black => 'B',
    }
}

fn parse_side(token: &str) -> Result<Side> {
    match token {
        "R" | "r" => Ok(Side::Red),
        "B" | "b" => Ok(Side::Black),
        _ => miette::bail!("expected side 'R' or 'B', got '{token}'"),
    }
}

fn parse_section(board: &mut Board, section: &str) -> Result<()> {
    let mut chars = section.chars();
    let side = parse_side(&chars.next().map(String::from).unwrap_or_default())?;
    let body = chars.as_str();
    if body.is_empty() {
        return Ok(());
    }

    for entry in body.split(',') {
        let (king, numbers) = match entry.strip_prefix(['K', 'k']) {
            Some(rest) => (true, rest),
            None => (false, entry),
        };
        let (start, end) = match numbers.split_once('-') {
            Some((a, b)) => (parse_number(a)?, parse_number(b)?),
            None => {
                let n = parse_number(numbers)?;
                (n, n)
            }
        };
        miette::ensure!(start <= end, "descending square range '{entry}'");
        for number in start..=end {
            let sq = Square::from_number(number)
                .ok_or_else(|| miette::miette!("square number {number} out of range"))?;
            miette::ensure!(
                board.get(sq).is_none(),
                "square {sq} listed twice in position notation"
            );
            let piece = if king {
                Piece::king(side)
            } else {
                Piece::man(side)
            };
            board.place(sq, piece);
        }
    }
    Ok(())
}

fn parse_number(token: &str) -> Result<u8> {
    token
        .trim()
        .parse()
        .into_diagnostic()
        .with_context(|| format!("parsing square number '{token}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_position() {
        let board = parse_position(START_POSITION).unwrap();
        assert_eq!(board.stm, Side::Red);
        assert_eq!(board.side_count(Side::Red), 20);
        assert_eq!(board.side_count(Side::Black), 20);
        // Red fills rows 0..4, black rows 6..10, no kings anywhere.
        for (sq, piece) in board.pieces(Side::Red) {
            assert!(sq.row() < 4);
            assert!(!piece.king);
        }
        for (sq, piece) in board.pieces(Side::Black) {
            assert!(sq.row() >= 6);
            assert!(!piece.king);
        }
    }

    #[test]
    fn parses_kings_and_sparse_lists() {
        let board = parse_position("B:RK4,32:B19,K50").unwrap();
        assert_eq!(board.stm, Side::Black);
        assert_eq!(
            board.get(Square::from_number(4).unwrap()),
            Some(Piece::king(Side::Red))
        );
        assert_eq!(
            board.get(Square::from_number(32).unwrap()),
            Some(Piece::man(Side::Red))
        );
        assert_eq!(
            board.get(Square::from_number(19).unwrap()),
            Some(Piece::man(Side::Black))
        );
        assert_eq!(
            board.get(Square::from_number(50).unwrap()),
            Some(Piece::king(Side::Black))
        );
        assert_eq!(board.piece_count(), 4);
    }

    #[test]
    fn round_trips_through_format() {
        for notation in [START_POSITION, "B:RK4,32:B19,K50", "R:R5:BK46"] {
            let board = parse_position(notation).unwrap();
            let formatted = format_position(&board);
            let reparsed = parse_position(&formatted).unwrap();
            assert_eq!(board, reparsed, "round trip failed for '{notation}'");
        }
    }

    #[test]
    fn rejects_malformed_notation() {
        assert!(parse_position("").is_err());
        assert!(parse_position("X:R1:B50").is_err());
        assert!(parse_position("R:R0:B50").is_err());
        assert!(parse_position("R:R51:B50").is_err());
        assert!(parse_position("R:R5,5:B50").is_err());
        assert!(parse_position("R:R9-5:B50").is_err());
    }

    #[test]
    fn parsed_hash_matches_recalculation() {
        let board = parse_position("B:RK4,32:B19,K50").unwrap();
        assert_eq!(board.hash, zobrist::calculate_hash(&board));
    }
}
