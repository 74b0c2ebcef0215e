use crate::game::pieces::{Color, Piece, PieceType};
use crate::utils::square::{BOARD_LEVEL, BOARD_SIDE, BoardSquare};

const fn square(x: usize, y: usize, z: usize) -> BoardSquare {
    (z * BOARD_LEVEL + y * BOARD_SIDE + x) as BoardSquare
}

const BACK_RANK: [PieceType; BOARD_SIDE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::King,
    PieceType::Knight,
    PieceType::Rook,
];

const SECOND_RANK: [PieceType; BOARD_SIDE] = [
    PieceType::Bishop,
    PieceType::Unicorn,
    PieceType::Queen,
    PieceType::Bishop,
    PieceType::Unicorn,
];

/// The standard Raumschach opening position.
///
/// White fills ranks 1-2 of levels A and B, Black mirrors it on ranks 4-5 of
/// levels E and D; each side has twenty pieces.
pub const INITIAL_PIECES: [Piece; 4 * BOARD_SIDE * 2] = {
    let mut pieces = [Piece::new(PieceType::None, Color::White, 0); 4 * BOARD_SIDE * 2];
    let last = BOARD_SIDE - 1;

    let mut i = 0;
    let mut x = 0;
    while x < BOARD_SIDE {
        pieces[i] = Piece::new(BACK_RANK[x], Color::White, square(x, 0, 0));
        pieces[i + 1] = Piece::new(PieceType::Pawn, Color::White, square(x, 1, 0));
        pieces[i + 2] = Piece::new(SECOND_RANK[x], Color::White, square(x, 0, 1));
        pieces[i + 3] = Piece::new(PieceType::Pawn, Color::White, square(x, 1, 1));

        pieces[i + 4] = Piece::new(BACK_RANK[x], Color::Black, square(x, last, last));
        pieces[i + 5] = Piece::new(PieceType::Pawn, Color::Black, square(x, last - 1, last));
        pieces[i + 6] = Piece::new(SECOND_RANK[x], Color::Black, square(x, last, last - 1));
        pieces[i + 7] = Piece::new(PieceType::Pawn, Color::Black, square(x, last - 1, last - 1));

        i += 8;
        x += 1;
    }

    pieces
};
