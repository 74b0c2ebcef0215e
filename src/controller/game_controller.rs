use crate::engine::params::{MAX_DEPTH, MAX_THREADS};
use crate::engine::player::{AiPlayer, Player};
use crate::game::board::{Board, KingState};
use crate::game::moves::{Move, MovePool};
use crate::game::pieces::Color;
use crate::game::save::{SaveError, SavedGame, load_from_file, save_to_file};
use crate::utils::bitboard::Bitboard;
use crate::utils::square::{BOARD_SIDE, BoardSquare, BoardSquareExt};
use fxhash::FxHashMap;
use std::path::Path;
use strum::EnumCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResultType {
    Success,         // move played
    InvalidNotation, // not two squares like Ba2Ba3
    WrongSource,     // no piece of the side to move on the source square
    InvalidMove,     // the piece cannot go there
    GameOver,        // nothing can be played anymore
}

type PerftTable = FxHashMap<u64, usize>;

/// One game session: the board, whose turn it is and who plays each side.
pub struct GameController<'a> {
    pub board: Board<'a>,
    pub turn: Color,
    pub state: KingState,
    pub game_over: bool,
    pub perft_hash: bool,
    players: [Player; Color::COUNT],
}

impl<'a> GameController<'a> {
    pub fn new(move_pool: &'a MovePool, players: [Player; Color::COUNT]) -> Self {
        Self {
            board: Board::starting(move_pool),
            turn: Color::White,
            state: KingState::Normal,
            game_over: false,
            perft_hash: true,
            players,
        }
    }

    pub fn new_game(&mut self) {
        self.board = Board::starting(self.board.move_pool());
        self.turn = Color::White;
        self.state = KingState::Normal;
        self.game_over = false;

        log::info!("New game started");
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color as usize]
    }

    pub fn set_option(&mut self, name: &str, value: &str) {
        match name.to_lowercase().as_str() {
            "depth" => match value.parse::<usize>() {
                Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => {
                    self.for_each_ai(|ai| ai.limits.depth = depth)
                }
                _ => log::warn!(
                    "Invalid value for depth option: {}. Expected value between 1 and {}",
                    value,
                    MAX_DEPTH
                ),
            },
            "threads" => match value.parse::<usize>() {
                Ok(threads) if (1..=MAX_THREADS).contains(&threads) => {
                    self.for_each_ai(|ai| ai.limits.threads = threads)
                }
                _ => log::warn!(
                    "Invalid value for threads option: {}. Expected value between 1 and {}",
                    value,
                    MAX_THREADS
                ),
            },
            "perfthash" => match value.to_lowercase().as_str() {
                "true" => self.perft_hash = true,
                "false" => self.perft_hash = false,
                _ => log::warn!(
                    "Invalid value for perfthash option: {}. Expected 'true' or 'false'",
                    value
                ),
            },
            _ => log::warn!("Unknown option: {}", name),
        }
    }

    fn for_each_ai(&mut self, mut apply: impl FnMut(&mut AiPlayer)) {
        for player in self.players.iter_mut() {
            if let Player::Ai(ai) = player {
                apply(ai);
            }
        }
    }

    /// Plays a move written as `<from><to>`, e.g. `Ba2Ba3`.
    pub fn try_move_piece(&mut self, notation: &str) -> MoveResultType {
        if self.game_over {
            return MoveResultType::GameOver;
        }

        let (source, destination) = match parse_move(notation) {
            Some(squares) => squares,
            None => return MoveResultType::InvalidNotation,
        };

        let piece = match self.board.get_piece(source) {
            Some(piece) if piece.color() == self.turn => piece,
            _ => return MoveResultType::WrongSource,
        };

        let moves = self.board.piece_moves(piece);

        match self.board.move_piece(piece, destination, &moves, false) {
            Some(made) => {
                log::info!("{:?} played {}", self.turn, notation);

                if made.promoted {
                    log::info!("Pawn promoted on {}", destination.unparse());
                }

                self.end_turn();
                MoveResultType::Success
            }
            None => MoveResultType::InvalidMove,
        }
    }

    fn end_turn(&mut self) {
        self.turn = !self.turn;
        self.update_state();
    }

    /// Classifies the position of the side to move and ends the game when
    /// nothing can be played anymore.
    pub fn update_state(&mut self) -> KingState {
        let state = self.board.king_check_state(self.turn);

        match state {
            KingState::NoKing => {
                log::error!("{:?} has no king, the game cannot continue", self.turn);
            }
            KingState::Checkmate => log::info!("Checkmate, {:?} wins", !self.turn),
            KingState::Stalemate => log::info!("Stalemate"),
            KingState::Check => log::info!("{:?} is in check", self.turn),
            KingState::Normal => {}
        }

        if state.is_game_over() {
            self.game_over = true;
        }

        self.state = state;
        state
    }

    /// Lets the AI to move play once; returns the move it made.
    pub fn play_ai_move(&mut self) -> Option<Move> {
        if self.game_over {
            return None;
        }

        let color = self.turn;
        let Player::Ai(ai) = &mut self.players[color as usize] else {
            return None;
        };

        let result = ai.search(&self.board);
        let best_move = result.best_move?;

        let moves = self.board.piece_moves(best_move.piece);
        if self
            .board
            .move_piece(best_move.piece, best_move.destination, &moves, false)
            .is_none()
        {
            log::error!("Search returned an illegal move {:?}", best_move);
            return None;
        }

        log::info!("{:?} played {} ({})", color, best_move.unparse(), result.evaluation);

        self.end_turn();
        Some(best_move)
    }

    /// Searches for the side to move without playing, whoever plays it.
    pub fn suggest_move(&self) -> Option<Move> {
        let mut ai = AiPlayer::new(self.turn);

        if let Player::Ai(player) = &self.players[self.turn as usize] {
            ai.limits = player.limits;
        }

        ai.search(&self.board).best_move
    }

    /// Legal destinations of the piece of the side to move on `square`.
    pub fn legal_destinations(&mut self, square: BoardSquare) -> Option<Bitboard> {
        let piece = self.board.get_piece(square)?;

        if piece.color() != self.turn {
            return None;
        }

        let moves = self.board.legal_moves(piece);
        moves.print(Some(format!("{:?} destinations", piece).as_str()), Some(square));

        Some(moves)
    }

    pub fn perft(&mut self, depth: usize) -> Vec<(Move, usize)> {
        let mut table: PerftTable = FxHashMap::default();
        let mut move_breakdown = vec![];
        let color = self.turn;

        for board_move in self.board.get_possible_moves(color) {
            let cache = self.perft_hash.then_some(&mut table);
            let count = count_moves(&mut self.board, board_move, depth, !color, cache);
            move_breakdown.push((board_move, count));
        }

        move_breakdown
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
        let game = SavedGame {
            turn: self.turn,
            game_over: self.game_over,
            pieces: self.board.all_pieces().copied().collect(),
        };

        save_to_file(path, &game)
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SaveError> {
        let game = load_from_file(path)?;

        self.board = Board::from_pieces(&game.pieces, self.board.move_pool());
        self.turn = game.turn;
        self.game_over = game.game_over;
        self.update_state();

        Ok(())
    }

    /// Five levels side by side, White in uppercase and Black in lowercase.
    /// Highlighted empty squares show as `*`.
    pub fn render(&self, highlight: Bitboard) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:?} to move\n", self.turn));

        for level in 0..BOARD_SIDE {
            output.push_str(&format!("  Level {}   ", (b'A' + level as u8) as char));
        }
        output.push('\n');

        for rank in (0..BOARD_SIDE).rev() {
            for level in 0..BOARD_SIDE {
                output.push_str(&format!("{} ", rank + 1));

                for file in 0..BOARD_SIDE {
                    let square = BoardSquare::from_position(file as u8, rank as u8, level as u8);

                    let c = match self.board.get_piece(square) {
                        Some(piece) => piece.to_char(),
                        None if highlight.is_set(square) => '*',
                        None => '.',
                    };

                    output.push(c);
                    output.push(' ');
                }

                output.push_str("  ");
            }
            output.push('\n');
        }

        for _ in 0..BOARD_SIDE {
            output.push_str("  a b c d e   ");
        }
        output.push('\n');

        output
    }

    pub fn print(&self, highlight: Option<Bitboard>) {
        print!("{}", self.render(highlight.unwrap_or(Bitboard::EMPTY)));
    }
}

/// Splits `Ba2Ba3` into its source and destination squares.
pub fn parse_move(notation: &str) -> Option<(BoardSquare, BoardSquare)> {
    if !notation.is_ascii() || notation.len() != 6 {
        return None;
    }

    let (source, destination) = notation.split_at(3);
    Some((BoardSquare::parse(source)?, BoardSquare::parse(destination)?))
}

fn count_moves(
    board: &mut Board,
    initial_move: Move,
    depth: usize,
    color: Color,
    mut table: Option<&mut PerftTable>,
) -> usize {
    if depth <= 1 {
        return 1;
    }

    let Some(mut scope) = board.scoped_move(
        initial_move.piece,
        initial_move.destination,
        &initial_move.piece_moves,
        true,
    ) else {
        return 0;
    };

    let key = scope.get_hash() ^ depth as u64;

    if let Some(count) = table.as_ref().and_then(|table| table.get(&key)) {
        return *count;
    }

    let moves = scope.get_possible_moves(color);

    // Bulk counting
    let total_count = if depth == 2 {
        moves.len()
    } else {
        moves
            .into_iter()
            .map(|board_move| {
                count_moves(&mut scope, board_move, depth - 1, !color, table.as_deref_mut())
            })
            .sum()
    };

    if let Some(table) = table {
        table.insert(key, total_count);
    }

    total_count
}
