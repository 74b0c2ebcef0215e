use std::ops::Add;

/// Length of one side of the cube.
pub const BOARD_SIDE: usize = 5;
pub const BOARD_LEVEL: usize = BOARD_SIDE * BOARD_SIDE;
pub const BOARD_SQUARES: usize = BOARD_LEVEL * BOARD_SIDE;

/// Linear index `z * 25 + y * 5 + x` of a square, always in `0..125`.
pub type BoardSquare = u8;

pub trait BoardSquareExt {
    fn get_x(&self) -> u8;
    fn get_y(&self) -> u8;
    fn get_z(&self) -> u8;
    fn parse(string: &str) -> Option<BoardSquare>;
    fn unparse(&self) -> String;
    fn from_position(x: u8, y: u8, z: u8) -> BoardSquare;
    fn to_coordinate(&self) -> Coordinate;
}

impl BoardSquareExt for u8 {
    fn get_x(&self) -> u8 {
        self % BOARD_SIDE as u8
    }

    fn get_y(&self) -> u8 {
        (self % BOARD_LEVEL as u8) / BOARD_SIDE as u8
    }

    fn get_z(&self) -> u8 {
        self / BOARD_LEVEL as u8
    }

    /// Parses `<level><file><rank>`, e.g. `Bc1` is level B, file c, rank 1.
    fn parse(string: &str) -> Option<BoardSquare> {
        let mut chars = string.chars();

        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(level @ 'A'..='E'), Some(file @ 'a'..='e'), Some(rank @ '1'..='5'), None) => {
                Some(BoardSquare::from_position(
                    file as u8 - b'a',
                    rank as u8 - b'1',
                    level as u8 - b'A',
                ))
            }
            _ => None,
        }
    }

    fn unparse(&self) -> String {
        format!(
            "{}{}{}",
            (self.get_z() + b'A') as char,
            (self.get_x() + b'a') as char,
            (self.get_y() + b'1') as char
        )
    }

    fn from_position(x: u8, y: u8, z: u8) -> BoardSquare {
        z * BOARD_LEVEL as u8 + y * BOARD_SIDE as u8 + x
    }

    fn to_coordinate(&self) -> Coordinate {
        Coordinate::new(self.get_x() as i8, self.get_y() as i8, self.get_z() as i8)
    }
}

/// A signed 3-D vector used both for squares and for move directions.
///
/// Only coordinates with every component in `0..5` are on the board;
/// [`Coordinate::INVALID`] stands for "no square".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Coordinate {
    pub const INVALID: Coordinate = Coordinate::new(-1, -1, -1);
    pub const CENTER: Coordinate = Coordinate::new(2, 2, 2);

    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    pub const fn from_delta(delta: [i8; 3]) -> Self {
        Self::new(delta[0], delta[1], delta[2])
    }

    pub const fn is_valid(&self) -> bool {
        is_position_valid(self.x as isize, self.y as isize, self.z as isize)
    }

    pub fn to_square(&self) -> Option<BoardSquare> {
        if self.is_valid() {
            Some(BoardSquare::from_position(
                self.x as u8,
                self.y as u8,
                self.z as u8,
            ))
        } else {
            None
        }
    }

    pub fn manhattan_distance(&self, to: Coordinate) -> i32 {
        (self.x as i32 - to.x as i32).abs()
            + (self.y as i32 - to.y as i32).abs()
            + (self.z as i32 - to.z as i32).abs()
    }
}

impl From<BoardSquare> for Coordinate {
    fn from(square: BoardSquare) -> Self {
        square.to_coordinate()
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

pub const fn is_position_valid(x: isize, y: isize, z: isize) -> bool {
    let side = BOARD_SIDE as isize;
    x >= 0 && x < side && y >= 0 && y < side && z >= 0 && z < side
}
