use crate::utils::square::{BOARD_SIDE, BOARD_SQUARES, BoardSquare, BoardSquareExt, Coordinate};
use std::fmt;
use std::ops::Not;
use strum_macros::{EnumCount, EnumIter, FromRepr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum PieceType {
    None = 0,
    King = 1,
    Queen = 2,
    Rook = 3,
    Bishop = 4,
    Knight = 5,
    Unicorn = 6,
    Pawn = 7,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Color {
    /// +1 for White, -1 for Black; scores are White-relative.
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The (rank, level) a pawn of this colour promotes on.
    pub const fn promotion_rank(self) -> (u8, u8) {
        match self {
            Color::White => (BOARD_SIDE as u8 - 1, BOARD_SIDE as u8 - 1),
            Color::Black => (0, 0),
        }
    }
}

#[rustfmt::skip]
const ROOK_DELTAS: [[i8; 3]; 6] = [
    [1, 0, 0], [-1, 0, 0],
    [0, 1, 0], [0, -1, 0],
    [0, 0, 1], [0, 0, -1],
];

#[rustfmt::skip]
const BISHOP_DELTAS: [[i8; 3]; 12] = [
    [1, 1, 0], [-1, 1, 0], [1, -1, 0], [-1, -1, 0],
    [1, 0, 1], [-1, 0, 1], [1, 0, -1], [-1, 0, -1],
    [0, 1, 1], [0, -1, 1], [0, 1, -1], [0, -1, -1],
];

#[rustfmt::skip]
const UNICORN_DELTAS: [[i8; 3]; 8] = [
    [1, 1, 1], [-1, 1, 1], [1, -1, 1], [1, 1, -1],
    [-1, -1, 1], [-1, 1, -1], [1, -1, -1], [-1, -1, -1],
];

// rook + bishop + unicorn, shared by the queen (sliding) and the king (one step)
const ROYAL_DELTAS: [[i8; 3]; 26] = {
    let mut deltas = [[0; 3]; 26];
    let mut i = 0;
    while i < 6 {
        deltas[i] = ROOK_DELTAS[i];
        i += 1;
    }
    while i < 18 {
        deltas[i] = BISHOP_DELTAS[i - 6];
        i += 1;
    }
    while i < 26 {
        deltas[i] = UNICORN_DELTAS[i - 18];
        i += 1;
    }
    deltas
};

#[rustfmt::skip]
const KNIGHT_DELTAS: [[i8; 3]; 24] = [
    [0, 1, 2], [0, -1, 2], [0, 1, -2], [0, -1, -2],
    [1, 0, 2], [-1, 0, 2], [1, 0, -2], [-1, 0, -2],
    [1, 2, 0], [-1, 2, 0], [1, -2, 0], [-1, -2, 0],
    [2, 1, 0], [-2, 1, 0], [2, -1, 0], [-2, -1, 0],
    [2, 0, 1], [-2, 0, 1], [2, 0, -1], [-2, 0, -1],
    [0, 2, 1], [0, -2, 1], [0, 2, -1], [0, -2, -1],
];

/// Non-capturing pawn steps: one rank forward or one level up (down for Black).
pub const fn get_pawn_push_deltas(color: Color) -> &'static [[i8; 3]] {
    match color {
        Color::White => &[[0, 1, 0], [0, 0, 1]],
        Color::Black => &[[0, -1, 0], [0, 0, -1]],
    }
}

/// Capturing pawn steps; the extra dimension adds the level diagonals.
pub const fn get_pawn_capture_deltas(color: Color) -> &'static [[i8; 3]] {
    match color {
        Color::White => &[[1, 1, 0], [-1, 1, 0], [1, 0, 1], [-1, 0, 1], [0, 1, 1]],
        Color::Black => &[[1, -1, 0], [-1, -1, 0], [1, 0, -1], [-1, 0, -1], [0, -1, -1]],
    }
}

impl PieceType {
    /// Direction vectors of every type except the pawn, whose moves depend on colour.
    pub const fn get_deltas(self) -> &'static [[i8; 3]] {
        match self {
            PieceType::King | PieceType::Queen => &ROYAL_DELTAS,
            PieceType::Rook => &ROOK_DELTAS,
            PieceType::Bishop => &BISHOP_DELTAS,
            PieceType::Knight => &KNIGHT_DELTAS,
            PieceType::Unicorn => &UNICORN_DELTAS,
            PieceType::None | PieceType::Pawn => &[],
        }
    }

    pub const fn is_slider(self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Unicorn
        )
    }

    pub const fn worth(self) -> i32 {
        match self {
            PieceType::None => 0,
            PieceType::King => 80,
            PieceType::Queen => 14,
            PieceType::Rook => 6,
            PieceType::Bishop => 4,
            PieceType::Knight => 4,
            PieceType::Unicorn => 3,
            PieceType::Pawn => 1,
        }
    }

    #[rustfmt::skip]
    pub fn to_char(self) -> char {
        match self {
            PieceType::None    => '.',
            PieceType::King    => 'k',
            PieceType::Queen   => 'q',
            PieceType::Rook    => 'r',
            PieceType::Bishop  => 'b',
            PieceType::Knight  => 'n',
            PieceType::Unicorn => 'u',
            PieceType::Pawn    => 'p',
        }
    }
}

const POSITION_MASK: u16 = 0x007f;
const POSITION_SHIFT: u16 = 0;
const COLOR_MASK: u16 = 0x0080;
const COLOR_SHIFT: u16 = 7;
const TYPE_MASK: u16 = 0x0700;
const TYPE_SHIFT: u16 = 8;

/// Largest |dy| + |dz| a pawn can be away from its promotion rank.
const PAWN_DISTANCE_TO_PROMOTION: i32 = 2 * (BOARD_SIDE as i32 - 1);

/// A piece packed into 16 bits: position (bits 0-6), colour (bit 7) and type (bits 8-10).
///
/// Pieces have no identity beyond their value; moving one means replacing it
/// with a copy at the new square.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    bits: u16,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color, square: BoardSquare) -> Self {
        Self {
            bits: ((piece_type as u16) << TYPE_SHIFT)
                | ((color as u16) << COLOR_SHIFT)
                | ((square as u16) << POSITION_SHIFT),
        }
    }

    /// Decodes a packed record, rejecting off-board squares, the `None`
    /// type and stray high bits.
    pub fn from_bits(bits: u16) -> Option<Self> {
        if bits & !(POSITION_MASK | COLOR_MASK | TYPE_MASK) != 0 {
            return None;
        }

        let piece = Self { bits };

        let on_board = (piece.square() as usize) < BOARD_SQUARES;
        match piece.piece_type() {
            PieceType::None => None,
            _ if on_board => Some(piece),
            _ => None,
        }
    }

    pub const fn bits(&self) -> u16 {
        self.bits
    }

    pub fn piece_type(&self) -> PieceType {
        PieceType::from_repr(((self.bits & TYPE_MASK) >> TYPE_SHIFT) as u8).unwrap_or(PieceType::None)
    }

    pub fn color(&self) -> Color {
        if self.bits & COLOR_MASK == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub const fn square(&self) -> BoardSquare {
        ((self.bits & POSITION_MASK) >> POSITION_SHIFT) as BoardSquare
    }

    pub fn coordinate(&self) -> Coordinate {
        self.square().to_coordinate()
    }

    pub const fn with_square(self, square: BoardSquare) -> Self {
        Self {
            bits: (self.bits & !POSITION_MASK) | ((square as u16) << POSITION_SHIFT),
        }
    }

    pub const fn with_type(self, piece_type: PieceType) -> Self {
        Self {
            bits: (self.bits & !TYPE_MASK) | ((piece_type as u16) << TYPE_SHIFT),
        }
    }

    pub fn worth(&self) -> i32 {
        self.piece_type().worth()
    }

    /// Positional worth this piece would have standing on `square`.
    ///
    /// Pawns score by closeness to their promotion rank, everything else by
    /// Manhattan distance from the centre of the cube.
    pub fn position_worth(&self, square: BoardSquare) -> i32 {
        let position = square.to_coordinate();

        match self.piece_type() {
            PieceType::Pawn => {
                let (rank, level) = self.color().promotion_rank();
                PAWN_DISTANCE_TO_PROMOTION
                    - (position.y as i32 - rank as i32).abs()
                    - (position.z as i32 - level as i32).abs()
            }
            _ => position.manhattan_distance(Coordinate::CENTER),
        }
    }

    pub fn is_promotion_square(&self, square: BoardSquare) -> bool {
        let (rank, level) = self.color().promotion_rank();
        self.piece_type() == PieceType::Pawn && square.get_y() == rank && square.get_z() == level
    }

    /// Uppercase for White, lowercase for Black.
    pub fn to_char(&self) -> char {
        let c = self.piece_type().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.to_char(), self.square().unparse())
    }
}
