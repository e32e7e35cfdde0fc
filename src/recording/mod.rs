//! Game recording module.
//!
//! Keeps a CSV log of every move of finished games.
//!
//! # Components
//!
//! - `game_record`: Data structures for game records
//! - `game_recorder`: Thread-safe game recording service
//! - `csv_writer`: Daily-rotated CSV output

pub mod csv_writer;
pub mod game_record;
pub mod game_recorder;

pub use csv_writer::{load_moves_from_csv, CsvWriter};
pub use game_record::{GameRecord, MoveRecord};
pub use game_recorder::GameRecorder;
