use crate::engine::params::{INFINITY, MATE_SCORE};
use crate::engine::table::{NodeType, TranspositionTable};
use crate::game::board::Board;
use crate::game::moves::Move;
use crate::game::pieces::Color;
use rand::Rng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::fmt::{Display, Formatter, Result};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub evaluation: i32,
    pub nodes: u64,
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.best_move {
            Some(best_move) => write!(f, "{} ({})", best_move.unparse(), self.evaluation),
            None => write!(f, "(none) ({})", self.evaluation),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Plies searched, the root move included.
    pub depth: usize,
    pub threads: usize,
}

#[derive(Default)]
pub struct SearchStats {
    pub nodes: u64,
}

/// Ordering score of a move: where the piece lands plus what it takes there.
pub fn move_heuristic(board_move: &Move, board: &Board) -> i32 {
    board_move.piece.position_worth(board_move.destination)
        + board
            .get_piece(board_move.destination)
            .map_or(0, |captured| captured.worth())
}

/// Scores the moves and sorts them, most promising first.
pub fn order_moves(moves: &mut [Move], board: &Board) {
    for board_move in moves.iter_mut() {
        board_move.heuristic = move_heuristic(board_move, board);
    }

    moves.sort_by_key(|board_move| Reverse(board_move.heuristic));
}

pub struct Search<'t> {
    tt: &'t mut TranspositionTable,
    pub stats: SearchStats,
}

impl<'t> Search<'t> {
    pub fn new(tt: &'t mut TranspositionTable) -> Self {
        Self {
            tt,
            stats: SearchStats::default(),
        }
    }

    /// Negamax alpha-beta; the result is from `color`'s point of view.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: usize,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        color: Color,
    ) -> i32 {
        self.stats.nodes += 1;

        if board.is_insufficient_material() {
            return 0;
        }

        if depth == 0 {
            return board.get_material_balance() * color.sign();
        }

        let zobrist_key = board.get_hash();
        let original_alpha = alpha;

        if let Some(tt_entry) = self.tt.probe(depth as u8, zobrist_key) {
            match tt_entry.node_type {
                NodeType::Exact => return tt_entry.evaluation,
                NodeType::LowerBound => alpha = alpha.max(tt_entry.evaluation),
                NodeType::UpperBound => beta = beta.min(tt_entry.evaluation),
            }

            if alpha >= beta {
                return tt_entry.evaluation;
            }
        }

        let mut moves = board.get_possible_moves(color);

        if moves.is_empty() {
            let evaluation = if board.king_in_check(color) {
                -MATE_SCORE + ply as i32
            } else {
                0
            };

            self.tt
                .store(depth as u8, zobrist_key, evaluation, NodeType::Exact);

            return evaluation;
        }

        order_moves(&mut moves, board);

        let mut best_value = -INFINITY;

        for board_move in &moves {
            let value = self.search_move(board, board_move, depth, ply, alpha, beta, color);

            best_value = best_value.max(value);
            alpha = alpha.max(value);

            if alpha >= beta {
                break;
            }
        }

        let node_type = if best_value <= original_alpha {
            NodeType::UpperBound
        } else if best_value >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        };

        self.tt
            .store(depth as u8, zobrist_key, best_value, node_type);

        best_value
    }

    /// Plays `board_move`, searches the reply and takes the move back.
    #[allow(clippy::too_many_arguments)]
    fn search_move(
        &mut self,
        board: &mut Board,
        board_move: &Move,
        depth: usize,
        ply: usize,
        alpha: i32,
        beta: i32,
        color: Color,
    ) -> i32 {
        let Some(mut scope) = board.scoped_move(
            board_move.piece,
            board_move.destination,
            &board_move.piece_moves,
            true,
        ) else {
            return -INFINITY;
        };

        -self.alpha_beta(&mut scope, depth - 1, ply + 1, -beta, -alpha, !color)
    }
}

/// Picks the move for `color`.
///
/// The transposition table is cleared first. With `tie_break` a random move
/// among the equally best ones is returned, otherwise the first in order.
pub fn find_best_move(
    board: &mut Board,
    color: Color,
    limits: SearchLimits,
    tt: &mut TranspositionTable,
    tie_break: Option<&mut StdRng>,
) -> SearchResult {
    let start_time = Instant::now();
    let depth = limits.depth.max(1);

    tt.clear();

    let mut moves = board.get_possible_moves(color);

    if moves.is_empty() {
        let evaluation = if board.king_in_check(color) {
            -MATE_SCORE
        } else {
            0
        };

        return SearchResult {
            best_move: None,
            evaluation,
            nodes: 1,
        };
    }

    order_moves(&mut moves, board);

    let (values, nodes) = if limits.threads > 1 && moves.len() > 1 {
        match search_parallel(board, &moves, depth, limits.threads, color) {
            Some(scored) => scored,
            None => search_sequential(board, &moves, depth, color, tt, tie_break.is_some()),
        }
    } else {
        search_sequential(board, &moves, depth, color, tt, tie_break.is_some())
    };

    let evaluation = values.iter().copied().max().unwrap_or(-INFINITY);
    let best: Vec<usize> = (0..moves.len())
        .filter(|&index| values[index] == evaluation)
        .collect();

    let chosen = match tie_break {
        Some(rng) if best.len() > 1 => best[rng.random_range(0..best.len())],
        _ => best[0],
    };

    let elapsed_ms = start_time.elapsed().as_millis();
    log::debug!(
        "Searched {} root moves to depth {} ({} nodes, {} ms, {} equal best, tt {}% hits)",
        moves.len(),
        depth,
        nodes,
        elapsed_ms,
        best.len(),
        tt.get_hit_rate_percent()
    );

    SearchResult {
        best_move: Some(moves[chosen]),
        evaluation,
        nodes,
    }
}

/// Root moves one after another with a shared table and a narrowing window.
///
/// With `keep_ties` the window stays one below the best value so moves that
/// equal it come back exact rather than as upper bounds.
fn search_sequential(
    board: &mut Board,
    moves: &[Move],
    depth: usize,
    color: Color,
    tt: &mut TranspositionTable,
    keep_ties: bool,
) -> (Vec<i32>, u64) {
    let mut search = Search::new(tt);
    let mut values = Vec::with_capacity(moves.len());
    let mut alpha = -INFINITY;

    for board_move in moves {
        let lower = if keep_ties { alpha - 1 } else { alpha };
        let value = search.search_move(board, board_move, depth, 0, lower, INFINITY, color);

        alpha = alpha.max(value);
        values.push(value);
    }

    (values, search.stats.nodes)
}

/// Root moves spread over a rayon pool, each worker on its own board copy and
/// table with a full window. Returns `None` when the pool cannot be built.
fn search_parallel(
    board: &Board,
    moves: &[Move],
    depth: usize,
    threads: usize,
    color: Color,
) -> Option<(Vec<i32>, u64)> {
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("Failed to start {} search threads: {}", threads, e);
            return None;
        }
    };

    let scored: Vec<(i32, u64)> = pool.install(|| {
        moves
            .par_iter()
            .map(|board_move| {
                let mut board = board.clone();
                let mut tt = TranspositionTable::new();
                let mut search = Search::new(&mut tt);

                let value = search.search_move(
                    &mut board,
                    board_move,
                    depth,
                    0,
                    -INFINITY,
                    INFINITY,
                    color,
                );

                (value, search.stats.nodes)
            })
            .collect()
    });

    let nodes = scored.iter().map(|(_, nodes)| nodes).sum();
    Some((scored.into_iter().map(|(value, _)| value).collect(), nodes))
}
