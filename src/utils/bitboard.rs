use crate::utils::square::{BOARD_SIDE, BOARD_SQUARES, BoardSquare, Coordinate};
use crate::utils::square::BoardSquareExt;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

const WORD_BITS: usize = 64;
const HIGH_BIT: u64 = 1 << 63;

/// A set of the 125 board squares packed into two words.
///
/// Square `i` lives in word `i / 64`, counted from the most significant bit.
/// The three lowest bits of the second word are never set.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitboard {
    words: [u64; 2],
}

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard { words: [0, 0] };
    pub const FULL: Bitboard = Bitboard {
        words: [u64::MAX, u64::MAX << (2 * WORD_BITS - BOARD_SQUARES)],
    };

    pub const fn new(high: u64, low: u64) -> Self {
        Self {
            words: [high & Self::FULL.words[0], low & Self::FULL.words[1]],
        }
    }

    pub const fn from_square(square: BoardSquare) -> Self {
        let mut bitboard = Self::EMPTY;
        bitboard.words[square as usize / WORD_BITS] = HIGH_BIT >> (square as usize % WORD_BITS);
        bitboard
    }

    #[inline]
    pub const fn is_set(&self, square: BoardSquare) -> bool {
        debug_assert!((square as usize) < BOARD_SQUARES);
        self.words[square as usize / WORD_BITS] & (HIGH_BIT >> (square as usize % WORD_BITS)) != 0
    }

    #[inline]
    pub fn set(&mut self, square: BoardSquare, flag: bool) {
        debug_assert!((square as usize) < BOARD_SQUARES);
        let mask = HIGH_BIT >> (square as usize % WORD_BITS);
        let word = &mut self.words[square as usize / WORD_BITS];

        if flag {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.words[0] == 0 && self.words[1] == 0
    }

    pub const fn count(&self) -> u32 {
        self.words[0].count_ones() + self.words[1].count_ones()
    }

    /// The lowest set square, if any.
    pub fn next_index(&self) -> Option<BoardSquare> {
        if self.words[0] != 0 {
            Some(self.words[0].leading_zeros() as BoardSquare)
        } else if self.words[1] != 0 {
            Some((WORD_BITS as u32 + self.words[1].leading_zeros()) as BoardSquare)
        } else {
            None
        }
    }

    pub fn iter_positions(&self) -> BitboardIterator {
        BitboardIterator { remaining: *self }
    }

    pub fn to_coordinates(&self) -> Vec<Coordinate> {
        self.iter_positions().map(Coordinate::from).collect()
    }

    pub fn print(&self, title: Option<&str>, position: Option<BoardSquare>) {
        if let Some(title_text) = title {
            log::debug!("\x1b[97m{}\x1b[0m", title_text);
        }

        // all five levels side by side, rank 5 on top
        for y in (0..BOARD_SIDE as u8).rev() {
            let mut line = String::new();
            for z in 0..BOARD_SIDE as u8 {
                for x in 0..BOARD_SIDE as u8 {
                    let square = BoardSquare::from_position(x, y, z);

                    line.push_str(match (self.is_set(square), position == Some(square)) {
                        (_, true) => "\x1b[93m●\x1b[0m",
                        (true, false) => "\x1b[97m1\x1b[0m",
                        (false, false) => "\x1b[90m0\x1b[0m",
                    });
                }
                line.push(' ');
            }
            log::debug!("{}", line);
        }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter_positions().map(|square| square.unparse()))
            .finish()
    }
}

impl FromIterator<BoardSquare> for Bitboard {
    fn from_iter<I: IntoIterator<Item = BoardSquare>>(iter: I) -> Self {
        let mut bitboard = Bitboard::EMPTY;
        for square in iter {
            bitboard.set(square, true);
        }
        bitboard
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            words: [self.words[0] & rhs.words[0], self.words[1] & rhs.words[1]],
        }
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            words: [self.words[0] | rhs.words[0], self.words[1] | rhs.words[1]],
        }
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self {
            words: [self.words[0] ^ rhs.words[0], self.words[1] ^ rhs.words[1]],
        }
    }
}

impl Not for Bitboard {
    type Output = Self;

    // masked so the padding bits past square 124 stay clear
    fn not(self) -> Self::Output {
        Self {
            words: [
                !self.words[0] & Self::FULL.words[0],
                !self.words[1] & Self::FULL.words[1],
            ],
        }
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

pub struct BitboardIterator {
    remaining: Bitboard,
}

impl Iterator for BitboardIterator {
    type Item = BoardSquare;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.remaining.next_index()?;
        self.remaining.set(index, false);

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIterator {}
