use std::fmt::Display;

use crate::prelude::*;

pub mod components;
pub mod fen;
pub mod zobrist;

#[cfg(test)]
mod tests;

/// Outcome classification for a position. The side to move with no legal
/// moves has lost; one bare king each is a dead draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Win(Side),
    Draw,
}

/// Snapshot of a position: 50 playable cells, side to move and the zobrist
/// hash, kept in sync incrementally. `Copy`, so every search ply works on
/// a fresh derived copy and the caller's board is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub cells: [Option<Piece>; NUM_SQUARES],
    pub stm: Side,
    pub hash: u64,
    pub plies: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position: red men on squares 1-20, black men on 31-50.
    pub fn new() -> Self {
        fen::parse_position(START_POSITION).expect("start position notation is valid")
    }

    /// Empty board, Red to move. Squares are filled via [`Board::place`].
    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
            stm: Side::Red,
            hash: 0,
            plies: 0,
        }
    }

    pub fn from_position(notation: &str) -> Result<Self> {
        fen::parse_position(notation)
    }

    pub fn to_position(&self) -> String {
        fen::format_position(self)
    }

    #[inline(always)]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Puts a piece on an empty square, updating the hash.
    pub fn place(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.cells[sq.index()].is_none(), "square already occupied");
        self.cells[sq.index()] = Some(piece);
        self.hash ^= ZOBRIST.pieces[piece.kind_index()][sq.index()];
    }

    /// Clears a square, updating the hash. Returns the removed piece.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.cells[sq.index()].take();
        if let Some(p) = piece {
            self.hash ^= ZOBRIST.pieces[p.kind_index()][sq.index()];
        }
        piece
    }

    pub(crate) fn set_stm(&mut self, side: Side) {
        if self.stm != side {
            self.hash ^= ZOBRIST.black_to_move;
            self.stm = side;
        }
    }

    /// Flips the side to move without making a move. Used by null-move pruning.
    pub fn make_null_move(&mut self) {
        self.set_stm(self.stm.flip());
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn side_count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.side == side)
            .count()
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(p) if p.side == side => Some((sq, p)),
            _ => None,
        })
    }

    /// Applies a fully resolved move for the side to move: vacates the
    /// origin, clears every captured square, lands the piece, promotes a
    /// man ending on its promotion row and flips the turn.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        let piece = self
            .remove(mv.from)
            .ok_or_else(|| miette::miette!("no piece on {} to move", mv.from))?;
        miette::ensure!(
            piece.side == self.stm,
            "piece on {} belongs to {}, but {} is to move",
            mv.from,
            piece.side,
            self.stm
        );

        for captured_sq in mv.captures.iter() {
            let victim = self.remove(captured_sq).ok_or_else(|| {
                miette::miette!("capture lists empty square {captured_sq} in {mv}")
            })?;
            miette::ensure!(
                victim.side != piece.side,
                "capture of own piece on {captured_sq} in {mv}"
            );
        }

        miette::ensure!(
            self.get(mv.to).is_none(),
            "landing square {} of {mv} is occupied",
            mv.to
        );

        // A man passing over the promotion row mid-chain does not promote;
        // only the final landing square counts.
        let landed = if !piece.king && mv.to.row() == piece.side.promotion_row() {
            Piece::king(piece.side)
        } else {
            piece
        };
        self.place(mv.to, landed);

        self.set_stm(self.stm.flip());
        self.plies += 1;
        Ok(())
    }

    /// One bare king per side and nothing else cannot be won by either player.
    pub fn is_material_draw(&self) -> bool {
        let mut counts = [0usize; 2];
        for piece in self.cells.iter().flatten() {
            if !piece.king {
                return false;
            }
            counts[piece.side.index()] += 1;
        }
        counts == [1, 1]
    }

    /// Terminal-state check for the side to move.
    pub fn game_status(&self) -> GameStatus {
        if self.is_material_draw() {
            return GameStatus::Draw;
        }
        let mut moves = MoveBuffer::new();
        move_gen::generate_moves(self, self.stm, &mut moves);
        if moves.is_empty() {
            GameStatus::Win(self.stm.flip())
        } else {
            GameStatus::Ongoing
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "   +{}+", "-".repeat(2 * NUM_COLS + 1))?;
        for row in 0..NUM_ROWS as i8 {
            write!(f, "{row:2} |")?;
            for col in 0..NUM_COLS as i8 {
                match Square::from_coords(row, col) {
                    Some(sq) => match self.get(sq) {
                        Some(piece) => write!(f, " {}", piece.glyph())?,
                        None => write!(f, " .")?,
                    },
                    None => write!(f, "  ")?,
                }
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "   +{}+", "-".repeat(2 * NUM_COLS + 1))?;
        writeln!(f, "{} to move, ply {}", self.stm, self.plies)
    }
}
