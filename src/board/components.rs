use std::fmt::Display;
use std::str::FromStr;

use crate::prelude::*;

/// One of the two players. Red sits on rows 0..4 and advances toward row 9,
/// Black sits on rows 6..10 and advances toward row 0. Red moves first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    #[default]
    Red,
    Black,
}

impl Side {
    pub const SIDES: [Side; 2] = [Side::Red, Side::Black];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn flip(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta in which this side's men advance.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// The row on which a man of this side promotes to king.
    #[inline(always)]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Side::Red => 9,
            Side::Black => 0,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => write!(f, "Red"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// A piece on the board. Kings are promoted men, never placed directly
/// except through position notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub king: bool,
}

impl Piece {
    #[inline(always)]
    pub const fn man(side: Side) -> Self {
        Self { side, king: false }
    }

    #[inline(always)]
    pub const fn king(side: Side) -> Self {
        Self { side, king: true }
    }

    /// Index into zobrist key tables: red man, red king, black man, black king.
    #[inline(always)]
    pub const fn kind_index(self) -> usize {
        self.side.index() * 2 + self.king as usize
    }

    pub const fn glyph(self) -> char {
        match (self.side, self.king) {
            (Side::Red, false) => 'r',
            (Side::Red, true) => 'R',
            (Side::Black, false) => 'b',
            (Side::Black, true) => 'B',
        }
    }
}

/// A playable (dark) square, indexed 0..50. Dark squares are those with
/// `(row + col) % 2 == 1`, numbered 1..=50 left-to-right, top-to-bottom in
/// standard draughts notation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Square(pub u8);

impl Square {
    pub const fn new(index: u8) -> Option<Self> {
        if index < NUM_SQUARES as u8 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// From the 1-based square number used in draughts notation.
    pub const fn from_number(number: u8) -> Option<Self> {
        if number >= 1 && number <= NUM_SQUARES as u8 {
            Some(Self(number - 1))
        } else {
            None
        }
    }

    /// From grid coordinates; `None` off-board or on a light square.
    pub const fn from_coords(row: i8, col: i8) -> Option<Self> {
        if row < 0 || row >= NUM_ROWS as i8 || col < 0 || col >= NUM_COLS as i8 {
            return None;
        }
        if (row + col) % 2 == 0 {
            return None;
        }
        Some(Self((row * 5 + col / 2) as u8))
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.0 / 5
    }

    #[inline(always)]
    pub const fn col(self) -> u8 {
        let offset = (self.0 % 5) * 2;
        if self.row() % 2 == 0 { offset + 1 } else { offset }
    }

    /// The adjacent playable square in the given direction, if on board.
    #[inline]
    pub const fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        Self::from_coords(self.row() as i8 + dr, self.col() as i8 + dc)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Square {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s
            .parse()
            .into_diagnostic()
            .with_context(|| format!("parsing square number from '{s}'"))?;
        Square::from_number(number)
            .ok_or_else(|| miette::miette!("square number {number} out of range 1..=50"))
    }
}

/// The four diagonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    #[inline(always)]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    #[inline(always)]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    /// The two directions in which a man of `side` may make quiet moves.
    #[inline(always)]
    pub const fn forward_for(side: Side) -> [Direction; 2] {
        match side {
            Side::Red => [Direction::SouthWest, Direction::SouthEast],
            Side::Black => [Direction::NorthWest, Direction::NorthEast],
        }
    }
}
