use crate::game::pieces::{Color, Piece, PieceType};
use crate::utils::square::BOARD_SQUARES;
use rand::RngCore;
use strum::EnumCount;

/// One random key per (colour, piece type, square).
///
/// The position hash is the XOR of the keys of every piece on the board, so
/// it depends only on placement and not on the move order that produced it.
pub struct ZobristKeys {
    pieces: [[[u64; BOARD_SQUARES]; PieceType::COUNT]; Color::COUNT],
}

impl ZobristKeys {
    pub fn new<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut pieces = [[[0u64; BOARD_SQUARES]; PieceType::COUNT]; Color::COUNT];

        for color_keys in pieces.iter_mut() {
            // PieceType::None never appears on the board and keeps zero keys
            for piece_keys in color_keys.iter_mut().skip(1) {
                for key in piece_keys.iter_mut() {
                    *key = rng.next_u64();
                }
            }
        }

        Self { pieces }
    }

    #[inline]
    pub fn piece_key(&self, piece: Piece) -> u64 {
        self.pieces[piece.color() as usize][piece.piece_type() as usize][piece.square() as usize]
    }
}
