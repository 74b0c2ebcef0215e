use crate::game::board::Board;
use crate::game::pieces::{Color, Piece, PieceType, get_pawn_capture_deltas, get_pawn_push_deltas};
use crate::utils::bitboard::Bitboard;
use crate::utils::square::{BOARD_SQUARES, BoardSquare, BoardSquareExt, Coordinate};
use crate::utils::zobrist::ZobristKeys;
use rand::RngCore;
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};

type PieceBitboards = [Bitboard; BOARD_SQUARES];

/// A candidate move produced during search.
///
/// `piece_moves` is the full destination set of `piece` at generation time,
/// so the move can be replayed with `pretested` set.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub piece: Piece,
    pub destination: BoardSquare,
    pub piece_moves: Bitboard,
    pub heuristic: i32,
}

impl Move {
    pub fn new(piece: Piece, destination: BoardSquare, piece_moves: Bitboard) -> Self {
        Self {
            piece,
            destination,
            piece_moves,
            heuristic: 0,
        }
    }

    pub fn unparse(&self) -> String {
        format!("{}{}", self.piece.square().unparse(), self.destination.unparse())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece.to_char(), self.unparse())
    }
}

/// Precomputed move masks and Zobrist keys shared by every board of a game.
///
/// Built once at startup; boards only ever borrow it.
pub struct MovePool {
    full_moves: [PieceBitboards; PieceType::COUNT],
    pawn_pushes: [PieceBitboards; Color::COUNT],
    pawn_captures: [PieceBitboards; Color::COUNT],
    zobrist: ZobristKeys,
}

fn create_bitboard_for_piece(square: BoardSquare, deltas: &[[i8; 3]], slider: bool) -> Bitboard {
    let origin = square.to_coordinate();
    let mut bitboard = Bitboard::EMPTY;

    for delta in deltas {
        let direction = Coordinate::from_delta(*delta);
        let mut position = origin + direction;

        while let Some(target) = position.to_square() {
            bitboard.set(target, true);

            if !slider {
                break;
            }

            position = position + direction;
        }
    }

    bitboard
}

impl MovePool {
    /// Builds every per-square mask and fills the Zobrist table from `rng`.
    pub fn new<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut full_moves = [[Bitboard::EMPTY; BOARD_SQUARES]; PieceType::COUNT];
        let mut pawn_pushes = [[Bitboard::EMPTY; BOARD_SQUARES]; Color::COUNT];
        let mut pawn_captures = [[Bitboard::EMPTY; BOARD_SQUARES]; Color::COUNT];

        for piece_type in PieceType::iter() {
            let deltas = piece_type.get_deltas();

            for square in 0..BOARD_SQUARES as BoardSquare {
                full_moves[piece_type as usize][square as usize] =
                    create_bitboard_for_piece(square, deltas, piece_type.is_slider());
            }
        }

        for color in Color::iter() {
            for square in 0..BOARD_SQUARES as BoardSquare {
                pawn_pushes[color as usize][square as usize] =
                    create_bitboard_for_piece(square, get_pawn_push_deltas(color), false);
                pawn_captures[color as usize][square as usize] =
                    create_bitboard_for_piece(square, get_pawn_capture_deltas(color), false);
            }
        }

        log::debug!("Move pool initialized");

        Self {
            full_moves,
            pawn_pushes,
            pawn_captures,
            zobrist: ZobristKeys::new(rng),
        }
    }

    pub fn zobrist(&self) -> &ZobristKeys {
        &self.zobrist
    }

    /// Every square the piece could reach on an empty board.
    ///
    /// Only good for a cheap first-pass visibility test; blocking is ignored.
    pub fn get_piece_full_moves(&self, piece: Piece) -> Bitboard {
        let square = piece.square() as usize;

        match piece.piece_type() {
            PieceType::Pawn => {
                let color = piece.color() as usize;
                self.pawn_pushes[color][square] | self.pawn_captures[color][square]
            }
            piece_type => self.full_moves[piece_type as usize][square],
        }
    }

    /// Like [`MovePool::get_piece_full_moves`] but only the squares the piece
    /// could capture on, which differs from the full set for pawns.
    pub fn get_piece_attacks(&self, piece: Piece) -> Bitboard {
        match piece.piece_type() {
            PieceType::Pawn => self.pawn_captures[piece.color() as usize][piece.square() as usize],
            _ => self.get_piece_full_moves(piece),
        }
    }

    /// The destinations of `piece` given the current occupancy.
    ///
    /// With `include_friendly` the first friendly piece on each line is kept
    /// too, which answers "does this piece defend that square". King moves
    /// onto threatened squares are dropped, hence the `board` argument.
    pub fn get_piece_moves(
        &self,
        piece: Piece,
        friendly: &Bitboard,
        enemy: &Bitboard,
        board: &Board,
        include_friendly: bool,
    ) -> Bitboard {
        let square = piece.square() as usize;
        let piece_type = piece.piece_type();

        if piece_type.is_slider() {
            return self.cast_rays(piece, friendly, enemy, include_friendly);
        }

        let reachable = if include_friendly {
            Bitboard::FULL
        } else {
            !*friendly
        };

        match piece_type {
            PieceType::Pawn => {
                let color = piece.color() as usize;
                let empty = !(*friendly | *enemy);
                let capturable = if include_friendly {
                    *enemy | *friendly
                } else {
                    *enemy
                };

                (self.pawn_pushes[color][square] & empty)
                    | (self.pawn_captures[color][square] & capturable)
            }
            PieceType::Knight => self.full_moves[piece_type as usize][square] & reachable,
            PieceType::King => {
                let candidates = self.full_moves[piece_type as usize][square] & reachable;

                if include_friendly {
                    return candidates;
                }

                candidates
                    .iter_positions()
                    .filter(|&target| !board.tile_threatened(target, !piece.color()))
                    .collect()
            }
            _ => Bitboard::EMPTY,
        }
    }

    fn cast_rays(
        &self,
        piece: Piece,
        friendly: &Bitboard,
        enemy: &Bitboard,
        include_friendly: bool,
    ) -> Bitboard {
        let origin = piece.coordinate();
        let mut bitboard = Bitboard::EMPTY;

        for delta in piece.piece_type().get_deltas() {
            let direction = Coordinate::from_delta(*delta);
            let mut position = origin + direction;

            while let Some(target) = position.to_square() {
                if friendly.is_set(target) {
                    if include_friendly {
                        bitboard.set(target, true);
                    }
                    break;
                }

                bitboard.set(target, true);

                if enemy.is_set(target) {
                    break;
                }

                position = position + direction;
            }
        }

        bitboard
    }
}
