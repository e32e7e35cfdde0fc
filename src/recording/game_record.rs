//! Game recording data structures.

use serde::{Deserialize, Serialize};

/// Record of a single placed letter. Also the row layout of the CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub game_id: String,
    /// 1-based count of letters on the board after this move
    pub turn: usize,
    pub player: String,
    pub row: usize,
    pub col: usize,
    pub letter: char,
    /// Words scored by this move, `|`-separated
    pub new_words: String,
    pub points: u32,
    /// Mover's total after this move
    pub total_score: u32,
    pub timestamp: i64,
}

/// Complete record of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    /// Game start timestamp
    pub timestamp: i64,
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    pub fn new(game_id: String) -> Self {
        Self {
            game_id,
            timestamp: chrono::Utc::now().timestamp(),
            moves: Vec::new(),
        }
    }

    pub fn record_move(&mut self, move_record: MoveRecord) {
        self.moves.push(move_record);
    }
}
