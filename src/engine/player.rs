use crate::engine::params::{DEFAULT_DEPTH, DEFAULT_THREADS};
use crate::engine::search::{SearchLimits, SearchResult, find_best_move};
use crate::engine::table::TranspositionTable;
use crate::game::board::Board;
use crate::game::pieces::{Color, Piece};
use crate::utils::square::BoardSquare;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The kind of player, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    Human,
    Ai,
}

pub struct AiPlayer {
    pub color: Color,
    pub limits: SearchLimits,
    tt: TranspositionTable,
    tie_break: Option<StdRng>,
}

impl AiPlayer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            limits: SearchLimits {
                depth: DEFAULT_DEPTH,
                threads: DEFAULT_THREADS,
            },
            tt: TranspositionTable::new(),
            tie_break: None,
        }
    }

    /// Equal-best moves are picked at random from now on.
    pub fn with_tie_break(mut self, seed: u64) -> Self {
        self.tie_break = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Searches a copy of `board`; the caller's board is never touched.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        let mut board = board.clone();

        find_best_move(
            &mut board,
            self.color,
            self.limits,
            &mut self.tt,
            self.tie_break.as_mut(),
        )
    }
}

pub enum Player {
    Human,
    Ai(AiPlayer),
}

impl Player {
    pub fn new(kind: PlayerKind, color: Color) -> Self {
        match kind {
            PlayerKind::Human => Player::Human,
            PlayerKind::Ai => Player::Ai(AiPlayer::new(color)),
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Player::Ai(_))
    }

    /// The move this player wants to play, or `None` for a human (whose
    /// moves arrive as commands) and for an AI without legal moves.
    pub fn get_move(&mut self, board: &Board) -> Option<(Piece, BoardSquare)> {
        match self {
            Player::Human => None,
            Player::Ai(ai) => ai
                .search(board)
                .best_move
                .map(|best_move| (best_move.piece, best_move.destination)),
        }
    }
}
