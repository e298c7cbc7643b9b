use std::fmt::Display;

use crate::prelude::*;

pub mod move_gen;

/// Ordered list of squares captured by one move, fixed-capacity so `Move`
/// stays `Copy`. A chain can never capture more than `MAX_CHAIN_CAPTURES`
/// pieces (each side starts with 20).
#[derive(Debug, Clone, Copy)]
pub struct CaptureList {
    squares: [Square; MAX_CHAIN_CAPTURES],
    len: u8,
}

impl CaptureList {
    pub const fn new() -> Self {
        Self {
            squares: [Square(0); MAX_CHAIN_CAPTURES],
            len: 0,
        }
    }

    pub const fn push(&mut self, sq: Square) {
        debug_assert!((self.len as usize) < MAX_CHAIN_CAPTURES, "CaptureList overflow");
        self.squares[self.len as usize] = sq;
        self.len += 1;
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }

    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.as_slice().iter().copied()
    }

    /// Same squares regardless of capture order.
    pub fn same_set(&self, other: &CaptureList) -> bool {
        self.len == other.len && self.iter().all(|sq| other.contains(sq))
    }
}

impl Default for CaptureList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CaptureList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for CaptureList {}

/// A fully resolved move: for multi-jump chains, `from` is the origin,
/// `to` the final landing square and `captures` every square cleared along
/// the way, in jump order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captures: CaptureList,
    /// At least one captured piece was a king.
    pub king_capture: bool,
}

impl Move {
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captures: CaptureList::new(),
            king_capture: false,
        }
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    #[inline(always)]
    pub const fn capture_count(&self) -> usize {
        self.captures.len()
    }

    /// Standard short notation: `32-28` for quiet moves, `28x17` for captures.
    pub fn notation(&self) -> String {
        let sep = if self.is_capture() { 'x' } else { '-' };
        format!("{}{}{}", self.from, sep, self.to)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// Parses user/remote move input of the form `32-28` or `28x17` into a
/// (from, to) pair. Legality is resolved separately against the generated
/// move set.
pub fn parse_move_spec(s: &str) -> Result<(Square, Square)> {
    let (from, to) = s
        .split_once(['-', 'x'])
        .ok_or_else(|| miette::miette!("expected move like '32-28' or '28x17', got '{s}'"))?;
    Ok((from.trim().parse()?, to.trim().parse()?))
}

/// Fixed-capacity move list, filled by the generator. Avoids per-node heap
/// allocation in the search recursion.
#[derive(Debug, Clone)]
pub struct MoveBuffer {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveBuffer {
    pub const fn new() -> Self {
        Self {
            moves: [Move {
                from: Square(0),
                to: Square(0),
                captures: CaptureList::new(),
                king_capture: false,
            }; MAX_MOVES],
            len: 0,
        }
    }

    pub const fn push(&mut self, m: Move) {
        debug_assert!(self.len < MAX_MOVES, "MoveBuffer overflow");
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn clear(&mut self) {
        self.len = 0;
    }

    pub fn first(&self) -> Option<&Move> {
        self.as_slice().first()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    /// Keeps only moves matching the predicate, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            if keep(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    pub fn sort_by_key<K: Ord>(&mut self, f: impl FnMut(&Move) -> K) {
        self.as_mut_slice().sort_unstable_by_key(f);
    }
}

impl Default for MoveBuffer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MoveBufferIter<'a> {
    buf: &'a MoveBuffer,
    pos: usize,
}

impl<'a> Iterator for MoveBufferIter<'a> {
    type Item = &'a Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.buf.len {
            let item = &self.buf.moves[self.pos];
            self.pos += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveBufferIter<'_> {
    fn len(&self) -> usize {
        self.buf.len - self.pos
    }
}

impl<'a> IntoIterator for &'a MoveBuffer {
    type Item = &'a Move;
    type IntoIter = MoveBufferIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        MoveBufferIter { buf: self, pos: 0 }
    }
}
