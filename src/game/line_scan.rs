use crate::game::board::{Board, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Reading direction of a run of letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Scan order used when scoring a placement.
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }
}

/// Maximal run of occupied cells through `position`, read left-to-right or
/// top-to-bottom. Empty when `position` itself is empty.
pub fn run_through(board: &Board, position: Position, direction: Direction) -> String {
    if board.get(position).is_none() {
        return String::new();
    }
    let (d_row, d_col) = direction.step();

    let mut start = position;
    for distance in 1..BOARD_SIZE as isize {
        match position.offset(d_row, d_col, -distance) {
            Some(p) if board.get(p).is_some() => start = p,
            _ => break,
        }
    }

    let mut run = String::with_capacity(BOARD_SIZE);
    let mut distance = 0;
    while let Some(p) = start.offset(d_row, d_col, distance) {
        match board.get(p) {
            Some(letter) => run.push(letter.as_char()),
            None => break,
        }
        distance += 1;
    }
    run
}
