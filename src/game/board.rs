use crate::game::moves::{Move, MovePool};
use crate::game::pieces::{Color, Piece, PieceType};
use crate::game::setup::INITIAL_PIECES;
use crate::utils::bitboard::Bitboard;
use crate::utils::square::{BoardSquare, Coordinate};
use std::fmt;
use std::ops::{Deref, DerefMut};
use strum::{EnumCount, IntoEnumIterator};

/// Everything needed to take a move back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MadeMove {
    /// The piece as it stands after the move, already promoted if it was.
    pub moved: Piece,
    pub source: BoardSquare,
    pub captured: Option<Piece>,
    pub promoted: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KingState {
    Normal,
    Check,
    Checkmate,
    Stalemate,
    /// The side has no king at all; only reachable through an engine bug.
    NoKing,
}

impl KingState {
    pub fn is_game_over(self) -> bool {
        matches!(
            self,
            KingState::Checkmate | KingState::Stalemate | KingState::NoKing
        )
    }
}

/// The authoritative game position.
///
/// Piece lists are kept sorted by square and mirrored by one occupancy
/// bitboard per colour; the Zobrist key is updated with every add/remove.
#[derive(Clone)]
pub struct Board<'a> {
    pieces: [Vec<Piece>; Color::COUNT],
    bitboards: [Bitboard; Color::COUNT],
    zobrist_key: u64,
    move_pool: &'a MovePool,
}

impl<'a> Board<'a> {
    pub fn new(move_pool: &'a MovePool) -> Self {
        Self {
            pieces: [Vec::with_capacity(20), Vec::with_capacity(20)],
            bitboards: [Bitboard::EMPTY; Color::COUNT],
            zobrist_key: 0,
            move_pool,
        }
    }

    pub fn from_pieces(pieces: &[Piece], move_pool: &'a MovePool) -> Self {
        let mut board = Self::new(move_pool);

        for piece in pieces {
            if let Some(replaced) = board.add_piece(*piece) {
                log::warn!("{:?} replaced {:?} while building the board", piece, replaced);
            }
        }

        board
    }

    pub fn starting(move_pool: &'a MovePool) -> Self {
        Self::from_pieces(&INITIAL_PIECES, move_pool)
    }

    pub fn move_pool(&self) -> &'a MovePool {
        self.move_pool
    }

    fn get_piece_index(&self, color: Color, square: BoardSquare) -> Result<usize, usize> {
        self.pieces[color as usize].binary_search_by_key(&square, |piece| piece.square())
    }

    fn get_square_color(&self, square: BoardSquare) -> Option<Color> {
        Color::iter().find(|&color| self.bitboards[color as usize].is_set(square))
    }

    pub fn get_piece(&self, square: BoardSquare) -> Option<Piece> {
        let color = self.get_square_color(square)?;

        self.get_piece_index(color, square)
            .ok()
            .map(|index| self.pieces[color as usize][index])
    }

    pub fn get_piece_at(&self, position: Coordinate) -> Option<Piece> {
        self.get_piece(position.to_square()?)
    }

    pub fn get_pieces(&self, color: Color) -> &[Piece] {
        &self.pieces[color as usize]
    }

    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }

    pub fn get_pieces_bitboard(&self, color: Color) -> Bitboard {
        self.bitboards[color as usize]
    }

    pub fn get_occupancy(&self) -> Bitboard {
        self.bitboards[Color::White as usize] | self.bitboards[Color::Black as usize]
    }

    pub fn get_king(&self, color: Color) -> Option<Piece> {
        self.pieces[color as usize]
            .iter()
            .find(|piece| piece.piece_type() == PieceType::King)
            .copied()
    }

    /// Puts `piece` on its square, returning whatever stood there before.
    pub fn add_piece(&mut self, piece: Piece) -> Option<Piece> {
        let replaced = self.remove_piece(piece.square());
        let color = piece.color() as usize;

        if let Err(index) = self.get_piece_index(piece.color(), piece.square()) {
            self.pieces[color].insert(index, piece);
        }

        self.bitboards[color].set(piece.square(), true);
        self.zobrist_key ^= self.move_pool.zobrist().piece_key(piece);

        replaced
    }

    pub fn remove_piece(&mut self, square: BoardSquare) -> Option<Piece> {
        let color = self.get_square_color(square)?;
        let index = self.get_piece_index(color, square).ok()?;

        let piece = self.pieces[color as usize].remove(index);
        self.bitboards[color as usize].set(square, false);
        self.zobrist_key ^= self.move_pool.zobrist().piece_key(piece);

        Some(piece)
    }

    /// The destinations of `piece` on this board, before the king-exposure check.
    pub fn piece_moves(&self, piece: Piece) -> Bitboard {
        let color = piece.color();

        self.move_pool.get_piece_moves(
            piece,
            &self.bitboards[color as usize],
            &self.bitboards[!color as usize],
            self,
            false,
        )
    }

    /// True when `piece` stands where it claims, `destination` is in `moves`
    /// and playing the move does not leave the mover's king in check.
    pub fn valid_move(&mut self, piece: Piece, destination: BoardSquare, moves: &Bitboard) -> bool {
        if self.get_piece(piece.square()) != Some(piece) || !moves.is_set(destination) {
            return false;
        }

        let made = self.apply_move(piece, destination);
        let scope = ScopedMove {
            board: self,
            made: Some(made),
        };

        !scope.king_in_check(piece.color())
    }

    /// Plays a move, validating it first unless `pretested` is set.
    ///
    /// A pawn reaching its promotion rank becomes a queen.
    pub fn move_piece(
        &mut self,
        piece: Piece,
        destination: BoardSquare,
        moves: &Bitboard,
        pretested: bool,
    ) -> Option<MadeMove> {
        if !pretested && !self.valid_move(piece, destination, moves) {
            return None;
        }

        Some(self.apply_move(piece, destination))
    }

    /// Like [`Board::move_piece`], but the move is taken back when the
    /// returned guard is dropped.
    pub fn scoped_move(
        &mut self,
        piece: Piece,
        destination: BoardSquare,
        moves: &Bitboard,
        pretested: bool,
    ) -> Option<ScopedMove<'_, 'a>> {
        let made = self.move_piece(piece, destination, moves, pretested)?;

        Some(ScopedMove {
            board: self,
            made: Some(made),
        })
    }

    fn apply_move(&mut self, piece: Piece, destination: BoardSquare) -> MadeMove {
        let captured = self.remove_piece(destination);
        self.remove_piece(piece.square());

        let promoted = piece.is_promotion_square(destination);
        let moved = if promoted {
            piece.with_type(PieceType::Queen).with_square(destination)
        } else {
            piece.with_square(destination)
        };

        self.add_piece(moved);

        MadeMove {
            moved,
            source: piece.square(),
            captured,
            promoted,
        }
    }

    /// Restores the position from before `made`, demoting a promoted queen
    /// back to its pawn.
    pub fn undo_move(&mut self, made: MadeMove) {
        self.remove_piece(made.moved.square());

        let original = if made.promoted {
            made.moved.with_type(PieceType::Pawn)
        } else {
            made.moved
        };
        self.add_piece(original.with_square(made.source));

        if let Some(captured) = made.captured {
            self.add_piece(captured);
        }
    }

    pub fn king_in_check(&self, color: Color) -> bool {
        self.get_king(color)
            .is_some_and(|king| self.tile_threatened(king.square(), !color))
    }

    /// Whether any piece of `by` attacks `square`, defended squares included.
    pub fn tile_threatened(&self, square: BoardSquare, by: Color) -> bool {
        let friendly = &self.bitboards[by as usize];
        let enemy = &self.bitboards[!by as usize];

        self.pieces[by as usize].iter().any(|&piece| {
            if !self.move_pool.get_piece_attacks(piece).is_set(square) {
                return false;
            }

            // short-range pieces cannot be blocked
            if !piece.piece_type().is_slider() {
                return true;
            }

            self.move_pool
                .get_piece_moves(piece, friendly, enemy, self, true)
                .is_set(square)
        })
    }

    /// Legal destinations of one piece, with the king-exposure check applied.
    pub fn legal_moves(&mut self, piece: Piece) -> Bitboard {
        let moves = self.piece_moves(piece);

        moves
            .iter_positions()
            .filter(|&destination| self.valid_move(piece, destination, &moves))
            .collect()
    }

    fn has_legal_move(&mut self, color: Color) -> bool {
        // the king goes first, it is the cheapest way out
        let mut pieces = self.pieces[color as usize].clone();
        pieces.sort_by_key(|piece| piece.piece_type() != PieceType::King);

        pieces.into_iter().any(|piece| {
            let moves = self.piece_moves(piece);
            moves
                .iter_positions()
                .any(|destination| self.valid_move(piece, destination, &moves))
        })
    }

    pub fn king_check_state(&mut self, color: Color) -> KingState {
        let king = match self.get_king(color) {
            Some(king) => king,
            None => return KingState::NoKing,
        };

        if self.is_insufficient_material() {
            return KingState::Stalemate;
        }

        let in_check = self.tile_threatened(king.square(), !color);

        match (in_check, self.has_legal_move(color)) {
            (true, true) => KingState::Check,
            (false, true) => KingState::Normal,
            (true, false) => KingState::Checkmate,
            (false, false) => KingState::Stalemate,
        }
    }

    /// No queens, no pawns and at most two of rook/bishop/knight/unicorn per side.
    pub fn is_insufficient_material(&self) -> bool {
        self.pieces.iter().all(|pieces| {
            let mut minor_count = 0;

            for piece in pieces {
                match piece.piece_type() {
                    PieceType::Queen | PieceType::Pawn => return false,
                    PieceType::Rook | PieceType::Bishop | PieceType::Knight | PieceType::Unicorn => {
                        minor_count += 1
                    }
                    PieceType::King | PieceType::None => {}
                }
            }

            minor_count <= 2
        })
    }

    /// Every legal move of `color`, unordered and with zero heuristic.
    pub fn get_possible_moves(&mut self, color: Color) -> Vec<Move> {
        let pieces = self.pieces[color as usize].clone();
        let mut moves = Vec::with_capacity(pieces.len() * 8);

        for piece in pieces {
            let piece_moves = self.piece_moves(piece);

            for destination in piece_moves.iter_positions() {
                if self.valid_move(piece, destination, &piece_moves) {
                    moves.push(Move::new(piece, destination, piece_moves));
                }
            }
        }

        moves
    }

    /// White-relative sum of piece worth plus positional worth.
    pub fn get_material_balance(&self) -> i32 {
        self.all_pieces()
            .map(|piece| piece.color().sign() * (piece.worth() + piece.position_worth(piece.square())))
            .sum()
    }

    pub fn get_hash(&self) -> u64 {
        self.zobrist_key
    }

    /// The hash recomputed from scratch; always equal to [`Board::get_hash`].
    pub fn compute_hash(&self) -> u64 {
        self.all_pieces()
            .fold(0, |key, piece| key ^ self.move_pool.zobrist().piece_key(*piece))
    }

    /// Checks the invariants tying piece lists, bitboards and hash together.
    pub fn is_consistent(&self) -> bool {
        Color::iter().all(|color| {
            let pieces = &self.pieces[color as usize];

            let sorted = pieces.windows(2).all(|w| w[0].square() < w[1].square());
            let colored = pieces.iter().all(|piece| piece.color() == color);
            let bitboard: Bitboard = pieces.iter().map(|piece| piece.square()).collect();

            sorted && colored && bitboard == self.bitboards[color as usize]
        }) && (self.bitboards[0] & self.bitboards[1]).is_empty()
            && self.compute_hash() == self.zobrist_key
    }
}

impl fmt::Debug for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("white", &self.pieces[Color::White as usize])
            .field("black", &self.pieces[Color::Black as usize])
            .field("zobrist_key", &format_args!("{:#018x}", self.zobrist_key))
            .finish()
    }
}

impl PartialEq for Board<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces && self.bitboards == other.bitboards
    }
}

/// A move that is taken back when the guard goes out of scope, so an early
/// return or a panic cannot leave the board half-mutated.
pub struct ScopedMove<'b, 'a> {
    board: &'b mut Board<'a>,
    made: Option<MadeMove>,
}

impl ScopedMove<'_, '_> {
    pub fn made(&self) -> Option<&MadeMove> {
        self.made.as_ref()
    }
}

impl<'a> Deref for ScopedMove<'_, 'a> {
    type Target = Board<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}

impl DerefMut for ScopedMove<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.board
    }
}

impl Drop for ScopedMove<'_, '_> {
    fn drop(&mut self) {
        if let Some(made) = self.made.take() {
            self.board.undo_move(made);
        }
    }
}
