//! Game recorder for capturing played games.
//!
//! Moves are buffered per game and written to CSV once the game finishes.

use crate::recording::csv_writer::CsvWriter;
use crate::recording::game_record::{GameRecord, MoveRecord};
use crate::services::game_manager::MoveResult;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Thread-safe game recorder
pub struct GameRecorder {
    /// Active game records, indexed by game_id
    active_games: Mutex<HashMap<String, GameRecord>>,
    /// `None` when recording is disabled
    csv_writer: Option<Mutex<CsvWriter>>,
}

impl GameRecorder {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> std::io::Result<Self> {
        let csv_writer = CsvWriter::new(output_dir)?;
        Ok(Self {
            active_games: Mutex::new(HashMap::new()),
            csv_writer: Some(Mutex::new(csv_writer)),
        })
    }

    /// Create a disabled recorder (for testing or when recording is not needed)
    pub fn disabled() -> Self {
        Self {
            active_games: Mutex::new(HashMap::new()),
            csv_writer: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.csv_writer.is_some()
    }

    /// Records an applied move and writes the game out once it is over.
    pub fn record_move(&self, move_result: &MoveResult) -> std::io::Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let state = &move_result.new_game_state;
        let mover = state.player(move_result.player);
        let move_record = MoveRecord {
            game_id: state.game_id.clone(),
            turn: state.turn_number,
            player: mover.name.clone(),
            row: move_result.position.row(),
            col: move_result.position.col(),
            letter: move_result.letter.as_char(),
            new_words: move_result.new_words.join("|"),
            points: move_result.points_earned,
            total_score: mover.score,
            timestamp: chrono::Utc::now().timestamp(),
        };

        {
            let mut games = lock(&self.active_games);
            games
                .entry(state.game_id.clone())
                .or_insert_with(|| {
                    log::info!(
                        "Started recording game {} of session {}",
                        state.game_id,
                        state.session_id
                    );
                    GameRecord::new(state.game_id.clone())
                })
                .record_move(move_record);
        }

        if move_result.is_game_over {
            self.finalize_game(&state.game_id)?;
        }
        Ok(())
    }

    /// Writes a game's buffered moves and forgets it.
    pub fn finalize_game(&self, game_id: &str) -> std::io::Result<()> {
        let Some(csv_writer) = &self.csv_writer else {
            return Ok(());
        };

        let record = lock(&self.active_games).remove(game_id);

        if let Some(record) = record {
            lock(csv_writer).write_game(&record)?;
            log::info!(
                "Finalized game {}: {} moves recorded",
                game_id,
                record.moves.len()
            );
        } else {
            log::warn!("Attempted to finalize unknown game: {}", game_id);
        }

        Ok(())
    }

    /// Drops an unfinished game without saving (reset, quit or idle eviction)
    pub fn cancel_game(&self, game_id: &str) {
        if lock(&self.active_games).remove(game_id).is_some() {
            log::info!("Cancelled recording for game: {}", game_id);
        }
    }

    pub fn active_game_count(&self) -> usize {
        lock(&self.active_games).len()
    }

    pub fn flush(&self) -> std::io::Result<()> {
        if let Some(csv_writer) = &self.csv_writer {
            lock(csv_writer).flush()?;
        }
        Ok(())
    }
}

/// Recording must keep working after a panicked holder, the data is append-only.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::game::board::Position;
    use crate::game::letter::Letter;
    use crate::game::player::PlayerSlot;
    use crate::recording::csv_writer::load_moves_from_csv;
    use crate::services::game_manager::{
        apply_player_move, create_word_grid_game, reset_game, PlayerMove,
    };
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_game_recorder_buffers_until_finalized() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let recorder = GameRecorder::new(dir.path())?;
        let dictionary = WordList::from_words(["cat"]);

        let game = create_word_grid_game("rec".to_string(), "Ada", "Bob");
        let game_id = game.game_id.clone();
        let mut game_state = game;
        for (player, col, c) in [
            (PlayerSlot::One, 0, 'C'),
            (PlayerSlot::Two, 1, 'A'),
            (PlayerSlot::One, 2, 'T'),
        ] {
            let player_move = PlayerMove::new(player, Position::new(0, col)?, Letter::new(c)?);
            let result = apply_player_move(game_state, player_move, &dictionary).await?;
            recorder.record_move(&result)?;
            game_state = result.new_game_state;
        }

        assert_eq!(recorder.active_game_count(), 1);
        recorder.finalize_game(&game_id)?;
        assert_eq!(recorder.active_game_count(), 0);

        let file = std::fs::read_dir(dir.path())?
            .filter_map(|e| e.ok())
            .next()
            .expect("one csv file");
        let moves = load_moves_from_csv(file.path())?;
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.game_id == game_id));
        assert_eq!(moves[2].player, "Ada");
        assert_eq!(moves[2].letter, 'T');
        assert_eq!(moves[2].new_words, "CAT");
        assert_eq!(moves[2].total_score, 3);
        assert_eq!(moves[1].turn, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_recorder() {
        let recorder = GameRecorder::disabled();
        assert!(!recorder.is_enabled());

        let game = create_word_grid_game("off".to_string(), "", "");
        let player_move = PlayerMove::new(
            PlayerSlot::One,
            Position::new(0, 0).unwrap(),
            Letter::new('A').unwrap(),
        );
        let result = apply_player_move(game, player_move, &WordList::default())
            .await
            .unwrap();

        recorder.record_move(&result).unwrap();
        recorder.cancel_game(&result.new_game_state.game_id);
        assert_eq!(recorder.active_game_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_game_is_recorded_under_a_new_id() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let recorder = GameRecorder::new(dir.path())?;
        let dictionary = WordList::default();

        let game = create_word_grid_game("same-session".to_string(), "Ada", "Bob");
        let first = PlayerMove::new(PlayerSlot::One, Position::new(0, 0)?, Letter::new('A')?);
        let result = apply_player_move(game, first, &dictionary).await?;
        recorder.record_move(&result)?;
        let old_id = result.new_game_state.game_id.clone();

        let reset = reset_game(result.new_game_state, None, None);
        assert_eq!(reset.session_id, "same-session");
        assert_ne!(reset.game_id, old_id);

        let second = PlayerMove::new(PlayerSlot::One, Position::new(0, 0)?, Letter::new('B')?);
        let result = apply_player_move(reset, second, &dictionary).await?;
        recorder.record_move(&result)?;
        assert_eq!(recorder.active_game_count(), 2);

        recorder.cancel_game(&old_id);
        assert_eq!(recorder.active_game_count(), 1);
        recorder.finalize_game(&result.new_game_state.game_id)?;
        assert_eq!(recorder.active_game_count(), 0);
        Ok(())
    }
}
