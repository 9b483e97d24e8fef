//! Flanking and flip computation.
//!
//! Placing a disc flips every unbroken run of opposing discs caught between
//! the new disc and an existing disc of the mover's color. The computation
//! is the rule as written: walk outward from the placed square in each
//! compass direction, collect the opposing run, and keep it only when the
//! walk ends in-bounds on one of the mover's own discs.

use arrayvec::ArrayVec;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::disc::Disc;
use crate::square::Square;

/// The eight compass directions as (row, col) steps, in scan order.
///
/// The order is fixed so flip sets are deterministic: north-west first,
/// row by row, south-east last.
#[rustfmt::skip]
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Longest run a directional walk can collect before it resolves.
///
/// A walk that reaches the seventh square without resolving has left no
/// room for a terminating disc, but it only finds that out at the edge.
const MAX_RUN: usize = 7;

/// Upper bound on the number of discs a single move can flip.
///
/// The row and the column through the placed square contribute at most six
/// flips each, the two diagonals at most eleven combined.
pub const MAX_FLIPS: usize = 24;

/// The ordered set of squares reversed by one move.
///
/// Squares appear grouped by direction in the fixed scan order and
/// nearest-to-move first within each direction, so a caller animating the
/// flips can rely on a stable sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipSet {
    flips: ArrayVec<Square, MAX_FLIPS>,
}

impl FlipSet {
    /// Creates an empty flip set.
    pub fn new() -> FlipSet {
        FlipSet::default()
    }

    /// Returns the number of flipped squares.
    #[inline]
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    /// Checks whether no squares are flipped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    /// Checks whether the set contains the given square.
    pub fn contains(&self, sq: Square) -> bool {
        self.flips.contains(&sq)
    }

    /// Returns the flipped squares in flip order.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.flips
    }

    /// Returns an iterator over the flipped squares in flip order.
    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.flips.iter().copied()
    }

    /// Renders the set as a square mask.
    pub fn bitboard(&self) -> Bitboard {
        self.flips
            .iter()
            .fold(Bitboard::EMPTY, |acc, &sq| acc.set(sq))
    }

    fn push(&mut self, sq: Square) {
        debug_assert!(!self.flips.is_full());
        self.flips.push(sq);
    }
}

impl<'a> IntoIterator for &'a FlipSet {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.flips.iter()
    }
}

/// Computes the discs flipped by `player` placing a disc at `sq`.
///
/// Returns an empty set when the target square is occupied or when no
/// direction holds a flanked run. The board is read-only; a move is applied
/// separately via [`Board::try_apply`].
pub fn compute_flips(board: &Board, sq: Square, player: Disc) -> FlipSet {
    debug_assert!(player != Disc::Empty);

    let mut flips = FlipSet::new();
    if board.disc_at(sq) != Disc::Empty {
        return flips;
    }

    let opponent = player.opposite();
    for (dr, dc) in DIRECTIONS {
        let mut run: ArrayVec<Square, MAX_RUN> = ArrayVec::new();
        let mut cursor = sq.offset(dr, dc);
        while let Some(step) = cursor {
            let disc = board.disc_at(step);
            if disc == opponent {
                run.push(step);
                cursor = step.offset(dr, dc);
            } else {
                if disc == player {
                    for flipped in run.drain(..) {
                        flips.push(flipped);
                    }
                }
                break;
            }
        }
        // A walk that ran off the board leaves its run uncommitted.
    }

    flips
}

/// Checks whether placing `player`'s disc at `sq` flips at least one disc.
///
/// An occupied square is never legal, regardless of its surroundings.
#[inline]
pub fn is_legal(board: &Board, sq: Square, player: Disc) -> bool {
    !compute_flips(board, sq, player).is_empty()
}
