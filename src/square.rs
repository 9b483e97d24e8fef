use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 8;

/// Total number of squares.
pub const TOTAL_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A square of the 8x8 board.
///
/// Squares are indexed row-major: `index = row * 8 + col`, with row and
/// col in `[0, 8)`. In algebraic notation files (columns) are labeled a-h
/// and ranks (rows) 1-8, so A1 is (row 0, col 0) and H8 is (row 7, col 7):
///
/// ```text
///   a  b  c  d  e  f  g  h
/// 1 00 01 02 03 04 05 06 07
/// 2 08 09 10 11 12 13 14 15
/// 3 16 17 18 19 20 21 22 23
/// 4 24 25 26 27 28 29 30 31
/// 5 32 33 34 35 36 37 38 39
/// 6 40 41 42 43 44 45 46 47
/// 7 48 49 50 51 52 53 54 55
/// 8 56 57 58 59 60 61 62 63
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Returns the row-major index of this square (0-63).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the row of this square (0-7).
    #[inline]
    pub fn row(self) -> usize {
        self.index() / BOARD_SIZE
    }

    /// Returns the column of this square (0-7).
    #[inline]
    pub fn col(self) -> usize {
        self.index() % BOARD_SIZE
    }

    /// Returns a bitboard with only this square's bit set.
    #[inline]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::from_square(self)
    }

    /// Converts a row-major index into a `Square` without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `index` >= 64.
    #[inline]
    pub fn from_index_unchecked(index: usize) -> Square {
        debug_assert!(
            index < TOTAL_SQUARES,
            "Index out of bounds for Square enum. index: {index:?}"
        );
        unsafe { std::mem::transmute(index as u8) }
    }

    /// Safely converts a row-major index into a `Square`.
    #[inline]
    pub fn from_index(index: usize) -> Option<Square> {
        if index < TOTAL_SQUARES {
            Some(Square::from_index_unchecked(index))
        } else {
            None
        }
    }

    /// Creates a `Square` from (row, col) coordinates.
    ///
    /// Returns `None` when either coordinate lies outside the board, so
    /// callers at the grid boundary can reject bad input without panicking.
    #[inline]
    pub fn from_row_col(row: usize, col: usize) -> Option<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square::from_index_unchecked(row * BOARD_SIZE + col))
        } else {
            None
        }
    }

    /// Steps one cell in the given (row, col) direction.
    ///
    /// Returns `None` when the step leaves the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Square::from_index_unchecked(
                row as usize * BOARD_SIZE + col as usize,
            ))
        } else {
            None
        }
    }

    /// Returns an iterator over all 64 squares in row-major order (A1..H8).
    #[inline]
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..TOTAL_SQUARES).map(Square::from_index_unchecked)
    }
}

/// Error type for square parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Invalid square string format (must be 2 characters)
    InvalidFormat,
    /// Invalid file character (must be a-h or A-H)
    InvalidFile(char),
    /// Invalid rank character (must be 1-8)
    InvalidRank(char),
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidFormat => write!(
                f,
                "Invalid square format: must be 2 characters (e.g., 'd3')"
            ),
            SquareError::InvalidFile(c) => write!(f, "Invalid file '{c}': must be a-h or A-H"),
            SquareError::InvalidRank(c) => write!(f, "Invalid rank '{c}': must be 1-8"),
        }
    }
}

impl std::error::Error for SquareError {}

impl FromStr for Square {
    type Err = SquareError;

    /// Parses algebraic notation (e.g., "d3", "H8") into a `Square`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareError::InvalidFormat);
        };

        let file = file_char.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareError::InvalidFile(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::InvalidRank(rank_char));
        }

        let col = file as usize - 'a' as usize;
        let row = rank_char as usize - '1' as usize;
        Ok(Square::from_index_unchecked(row * BOARD_SIZE + col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (self.col() as u8 + b'a') as char;
        let rank = (self.row() as u8 + b'1') as char;
        write!(f, "{file}{rank}")
    }
}
