//! Turn management for a single game.
//!
//! [`GameSession`] drives a game from the opening position to the terminal
//! state: it validates and applies submitted moves, forfeits a player's
//! turn automatically when they have no legal reply, and detects the end of
//! the game. Everything the caller needs to animate a move or update a turn
//! indicator is reported through [`MoveOutcome`]; the board never has to be
//! diffed.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::board::Board;
use crate::disc::Disc;
use crate::flip::FlipSet;
use crate::move_list::MoveList;
use crate::square::Square;

/// Disc counts for both colors.
///
/// Recomputed from the board on demand; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    /// The game result this score decides: higher count wins, equal is a
    /// draw.
    pub fn outcome(self) -> GameOutcome {
        match self.black.cmp(&self.white) {
            Ordering::Greater => GameOutcome::BlackWins,
            Ordering::Less => GameOutcome::WhiteWins,
            Ordering::Equal => GameOutcome::Draw,
        }
    }
}

/// Final result of a finished game, decided purely by disc count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl GameOutcome {
    /// The winning color, or `None` for a draw.
    pub fn winner(self) -> Option<Disc> {
        match self {
            GameOutcome::BlackWins => Some(Disc::Black),
            GameOutcome::WhiteWins => Some(Disc::White),
            GameOutcome::Draw => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::BlackWins => write!(f, "Black wins"),
            GameOutcome::WhiteWins => write!(f, "White wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The named player is to move.
    InProgress(Disc),
    /// Terminal: no further moves are accepted, ever.
    Finished(GameOutcome),
}

/// Report returned by a successful [`GameSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Square the mover's disc was placed on.
    pub placed: Square,
    /// The discs reversed by the move, in flip order.
    pub flipped: FlipSet,
    /// The player forced to forfeit their turn while the move settled, if
    /// any.
    pub passed: Option<Disc>,
    /// Turn state after the move settled: the next player, or the final
    /// result.
    pub phase: Phase,
}

/// Error returned by move submission.
///
/// Both conditions are recoverable and mutate nothing: the session is left
/// exactly as it was, and the caller should re-query
/// [`GameSession::legal_moves`] or [`GameSession::phase`] and react rather
/// than retry blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The coordinates do not name a legal move for the player to move:
    /// occupied square, no flanked run, or out of bounds.
    Illegal { row: usize, col: usize },
    /// The game is over; the session no longer accepts moves.
    Finished,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Illegal { row, col } => {
                write!(f, "illegal move at ({row}, {col})")
            }
            MoveError::Finished => write!(f, "the game is already finished"),
        }
    }
}

impl std::error::Error for MoveError {}

/// One game of Othello, from the opening position to the terminal state.
///
/// The session owns its [`Board`] exclusively; [`submit`] (and its
/// (row, col) twin [`submit_at`]) is the only mutator. Every operation runs
/// to completion before returning and the type holds no interior
/// mutability, so independent games are simply independent `GameSession`
/// values.
///
/// [`submit`]: GameSession::submit
/// [`submit_at`]: GameSession::submit_at
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    phase: Phase,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}

impl GameSession {
    /// Starts a fresh game on the standard opening position, Black to move.
    pub fn new() -> GameSession {
        GameSession::from_position(Board::new(), Disc::Black)
    }

    /// Starts a session from an arbitrary position.
    ///
    /// The turn-transition rules run immediately: if `to_move` has no legal
    /// move the turn passes silently to the opponent, and if neither player
    /// can move (or the board is full) the session begins already finished.
    /// The settled state is visible through [`phase`](Self::phase) and
    /// [`to_move`](Self::to_move).
    pub fn from_position(board: Board, to_move: Disc) -> GameSession {
        debug_assert!(to_move != Disc::Empty);
        let mut session = GameSession {
            board,
            phase: Phase::InProgress(to_move),
        };
        session.settle();
        session
    }

    /// Returns the current board position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the player to move, or `None` once the game is finished.
    pub fn to_move(&self) -> Option<Disc> {
        match self.phase {
            Phase::InProgress(player) => Some(player),
            Phase::Finished(_) => None,
        }
    }

    /// Enumerates the legal moves for the player to move.
    ///
    /// Empty once the game is finished. The order is row-major, so a caller
    /// highlighting the squares sees a reproducible sequence.
    pub fn legal_moves(&self) -> MoveList {
        match self.phase {
            Phase::InProgress(player) => MoveList::generate(&self.board, player),
            Phase::Finished(_) => MoveList::default(),
        }
    }

    /// Returns the current disc counts.
    pub fn score(&self) -> Score {
        Score {
            black: self.board.count(Disc::Black),
            white: self.board.count(Disc::White),
        }
    }

    /// Submits a move for the player to move.
    ///
    /// On success the board is updated atomically, the turn advances
    /// (forfeiting the opponent's turn automatically when they have no
    /// reply), and the returned [`MoveOutcome`] describes exactly what
    /// changed.
    ///
    /// # Errors
    ///
    /// [`MoveError::Finished`] when the game is over, and
    /// [`MoveError::Illegal`] when the square is not a legal move. Neither
    /// error mutates the session.
    pub fn submit(&mut self, sq: Square) -> Result<MoveOutcome, MoveError> {
        let player = match self.phase {
            Phase::InProgress(player) => player,
            Phase::Finished(_) => return Err(MoveError::Finished),
        };

        let (board, flipped) = self.board.try_apply(sq, player).ok_or(MoveError::Illegal {
            row: sq.row(),
            col: sq.col(),
        })?;

        trace!("{player} plays {sq}, flipping {} discs", flipped.len());
        self.board = board;
        self.phase = Phase::InProgress(player.opposite());
        let passed = self.settle();

        Ok(MoveOutcome {
            placed: sq,
            flipped,
            passed,
            phase: self.phase,
        })
    }

    /// Submits a move by (row, col) coordinates.
    ///
    /// Coordinates outside the board are rejected as illegal moves without
    /// touching the session, so grid-addressed callers need no bounds
    /// checks of their own.
    pub fn submit_at(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        match Square::from_row_col(row, col) {
            Some(sq) => self.submit(sq),
            None => match self.phase {
                Phase::InProgress(_) => Err(MoveError::Illegal { row, col }),
                Phase::Finished(_) => Err(MoveError::Finished),
            },
        }
    }

    /// Runs the turn-transition rules until a player with a legal move is
    /// found or the game ends. Returns the player forced to pass, if any.
    ///
    /// At most one pass can occur per settle: a pass requires the opponent
    /// to have a move, so the loop stops on the very next evaluation. Both
    /// players being stuck ends the game instead.
    fn settle(&mut self) -> Option<Disc> {
        let mut passed = None;
        while let Phase::InProgress(player) = self.phase {
            let opponent = player.opposite();
            let player_can_move = self.board.has_moves(player);
            let opponent_can_move = self.board.has_moves(opponent);

            if self.board.is_full() || (!player_can_move && !opponent_can_move) {
                let score = self.score();
                let outcome = score.outcome();
                debug!("game over: {outcome} ({} - {})", score.black, score.white);
                self.phase = Phase::Finished(outcome);
            } else if !player_can_move {
                debug!("{player} has no legal moves and passes");
                passed = Some(player);
                self.phase = Phase::InProgress(opponent);
            } else {
                break;
            }
        }
        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Square {
        Square::from_row_col(row, col).unwrap()
    }

    #[test]
    fn test_new_game() {
        let session = GameSession::new();
        assert_eq!(session.phase(), Phase::InProgress(Disc::Black));
        assert_eq!(session.to_move(), Some(Disc::Black));
        assert_eq!(
            session.score(),
            Score {
                black: 2,
                white: 2
            }
        );
        assert_eq!(session.legal_moves().len(), 4);
    }

    #[test]
    fn test_submit_advances_turn() {
        let mut session = GameSession::new();
        let outcome = session.submit(Square::D3).unwrap();

        assert_eq!(outcome.placed, Square::D3);
        assert_eq!(outcome.flipped.as_slice(), &[Square::D4]);
        assert_eq!(outcome.passed, None);
        assert_eq!(outcome.phase, Phase::InProgress(Disc::White));
        assert_eq!(session.to_move(), Some(Disc::White));
        assert_eq!(
            session.score(),
            Score {
                black: 4,
                white: 1
            }
        );
    }

    #[test]
    fn test_illegal_move_leaves_session_untouched() {
        let mut session = GameSession::new();
        let before_board = *session.board();
        let before_phase = session.phase();

        let err = session.submit(Square::A1).unwrap_err();
        assert_eq!(err, MoveError::Illegal { row: 0, col: 0 });

        let err = session.submit(Square::D4).unwrap_err();
        assert_eq!(err, MoveError::Illegal { row: 3, col: 3 });

        assert_eq!(*session.board(), before_board);
        assert_eq!(session.phase(), before_phase);
    }

    #[test]
    fn test_submit_at_rejects_out_of_bounds() {
        let mut session = GameSession::new();
        let err = session.submit_at(8, 0).unwrap_err();
        assert_eq!(err, MoveError::Illegal { row: 8, col: 0 });

        let outcome = session.submit_at(2, 3).unwrap();
        assert_eq!(outcome.placed, Square::D3);
    }

    #[test]
    fn test_finished_session_rejects_moves() {
        let board = Board::from_string("X");
        let mut session = GameSession::from_position(board, Disc::Black);
        assert!(matches!(session.phase(), Phase::Finished(_)));

        assert_eq!(session.submit(Square::D3), Err(MoveError::Finished));
        assert_eq!(session.submit_at(9, 9), Err(MoveError::Finished));
        assert!(session.legal_moves().is_empty());
        assert_eq!(session.to_move(), None);
    }

    #[test]
    fn test_from_position_passes_stuck_player() {
        // White has no legal move anywhere, Black can play (0,2).
        let board = Board::from_string(
            "XO------\
             --------\
             --------\
             --------\
             --------\
             --------\
             --------\
             XO------",
        );
        let session = GameSession::from_position(board, Disc::White);
        assert_eq!(session.to_move(), Some(Disc::Black));
    }

    #[test]
    fn test_forced_pass_is_reported() {
        let board = Board::from_string(
            "XO------\
             --------\
             --------\
             --------\
             --------\
             --------\
             --------\
             XO------",
        );
        let mut session = GameSession::from_position(board, Disc::Black);

        // After Black's move White still has no reply, so the turn comes
        // straight back to Black.
        let outcome = session.submit(at(0, 2)).unwrap();
        assert_eq!(outcome.flipped.as_slice(), &[at(0, 1)]);
        assert_eq!(outcome.passed, Some(Disc::White));
        assert_eq!(outcome.phase, Phase::InProgress(Disc::Black));
        assert_eq!(session.to_move(), Some(Disc::Black));
    }

    #[test]
    fn test_both_players_stuck_finishes_mid_game() {
        // Black wipes out every white disc; nobody can move on a
        // single-color board.
        let board = Board::from_string("XO------");
        let mut session = GameSession::from_position(board, Disc::Black);

        let outcome = session.submit(at(0, 2)).unwrap();
        assert_eq!(outcome.phase, Phase::Finished(GameOutcome::BlackWins));
        assert_eq!(session.phase(), Phase::Finished(GameOutcome::BlackWins));
        assert_eq!(
            session.score(),
            Score {
                black: 3,
                white: 0
            }
        );
    }

    #[test]
    fn test_full_board_is_finished_by_disc_count() {
        let mut cells = "XXXXXXXX".repeat(5);
        cells.push_str(&"OOOOOOOO".repeat(3));
        let session = GameSession::from_position(Board::from_string(&cells), Disc::Black);

        assert_eq!(session.phase(), Phase::Finished(GameOutcome::BlackWins));
        assert_eq!(
            session.score(),
            Score {
                black: 40,
                white: 24
            }
        );
    }

    #[test]
    fn test_full_board_draw() {
        let mut cells = "XXXXXXXX".repeat(4);
        cells.push_str(&"OOOOOOOO".repeat(4));
        let session = GameSession::from_position(Board::from_string(&cells), Disc::White);

        assert_eq!(session.phase(), Phase::Finished(GameOutcome::Draw));
        assert_eq!(GameOutcome::Draw.winner(), None);
    }

    #[test]
    fn test_turn_alternates_without_pass() {
        let mut session = GameSession::new();
        assert_eq!(session.to_move(), Some(Disc::Black));

        session.submit(Square::D3).unwrap();
        assert_eq!(session.to_move(), Some(Disc::White));

        session.submit(Square::C3).unwrap();
        assert_eq!(session.to_move(), Some(Disc::Black));
    }

    #[test]
    fn test_score_never_loses_discs() {
        let mut session = GameSession::new();
        session.submit(Square::D3).unwrap();
        let score = session.score();
        assert_eq!(
            score.black + score.white + session.board().empty_count(),
            64
        );
    }

    #[test]
    fn test_outcome_from_score() {
        assert_eq!(
            Score {
                black: 33,
                white: 31
            }
            .outcome(),
            GameOutcome::BlackWins
        );
        assert_eq!(
            Score {
                black: 0,
                white: 1
            }
            .outcome(),
            GameOutcome::WhiteWins
        );
        assert_eq!(
            Score {
                black: 32,
                white: 32
            }
            .outcome(),
            GameOutcome::Draw
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MoveError::Illegal { row: 3, col: 3 }.to_string(),
            "illegal move at (3, 3)"
        );
        assert_eq!(
            MoveError::Finished.to_string(),
            "the game is already finished"
        );
    }
}
