use crate::game::pieces::{Color, Piece};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const BLACK_TO_MOVE: u16 = 0b01;
const GAME_OVER: u16 = 0b10;

const RECORD_SIZE: usize = 2;

#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    InvalidPiece(u16),
    Truncated,
    MissingHeader,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(error) => write!(f, "I/O error: {}", error),
            SaveError::InvalidPiece(bits) => write!(f, "invalid piece record {:#06x}", bits),
            SaveError::Truncated => write!(f, "file ends in the middle of a piece record"),
            SaveError::MissingHeader => write!(f, "file is too short to hold the header"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(error: std::io::Error) -> Self {
        SaveError::Io(error)
    }
}

/// A game as persisted: whose turn it is, whether it ended, and the pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub turn: Color,
    pub game_over: bool,
    pub pieces: Vec<Piece>,
}

/// Writes the flags header and one little-endian record per piece.
pub fn write_game<W: Write>(writer: &mut W, game: &SavedGame) -> Result<(), SaveError> {
    let mut flags = 0;
    if game.turn == Color::Black {
        flags |= BLACK_TO_MOVE;
    }
    if game.game_over {
        flags |= GAME_OVER;
    }

    writer.write_all(&flags.to_le_bytes())?;

    for piece in &game.pieces {
        writer.write_all(&piece.bits().to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a game written by [`write_game`]; records run to the end of input.
pub fn read_game<R: Read>(reader: &mut R) -> Result<SavedGame, SaveError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() < RECORD_SIZE {
        return Err(SaveError::MissingHeader);
    }

    let (header, records) = bytes.split_at(RECORD_SIZE);

    if records.len() % RECORD_SIZE != 0 {
        return Err(SaveError::Truncated);
    }

    let flags = u16::from_le_bytes([header[0], header[1]]);

    let pieces = records
        .chunks_exact(RECORD_SIZE)
        .map(|record| {
            let bits = u16::from_le_bytes([record[0], record[1]]);
            Piece::from_bits(bits).ok_or(SaveError::InvalidPiece(bits))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SavedGame {
        turn: if flags & BLACK_TO_MOVE != 0 {
            Color::Black
        } else {
            Color::White
        },
        game_over: flags & GAME_OVER != 0,
        pieces,
    })
}

pub fn save_to_file<P: AsRef<Path>>(path: P, game: &SavedGame) -> Result<(), SaveError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_game(&mut writer, game)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<SavedGame, SaveError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_game(&mut reader)
}
