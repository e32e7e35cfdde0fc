use crate::game::error::GameError;
use crate::game::letter::Letter;
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 7;

/// A cell on the board. Always in bounds, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = GameError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl Position {
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Position { row, col })
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Neighbour `distance` steps along `(d_row, d_col)`, if still on the board.
    pub fn offset(self, d_row: isize, d_col: isize, distance: isize) -> Option<Position> {
        let row = self.row as isize + d_row * distance;
        let col = self.col as isize + d_col * distance;
        let range = 0..BOARD_SIZE as isize;
        if range.contains(&row) && range.contains(&col) {
            Some(Position {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }
}

/// Row-major 7×7 grid; `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: Vec<Option<Letter>>,
}

pub fn create_board_empty() -> Board {
    Board {
        cells: vec![None; BOARD_SIZE * BOARD_SIZE],
    }
}

impl Board {
    pub fn get(&self, position: Position) -> Option<Letter> {
        self.cells.get(position.index()).copied().flatten()
    }

    /// A deserialized board may be short, so the cell lookup stays checked.
    pub fn place(&mut self, position: Position, letter: Letter) -> Result<(), GameError> {
        let cell = self
            .cells
            .get_mut(position.index())
            .ok_or(GameError::OutOfBounds {
                row: position.row,
                col: position.col,
            })?;
        if cell.is_some() {
            return Err(GameError::CellOccupied {
                row: position.row,
                col: position.col,
            });
        }
        *cell = Some(letter);
        Ok(())
    }

    /// One string per row, `.` for empty cells.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(BOARD_SIZE)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(Letter::as_char).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}
