//! CSV writer for game recordings.
//!
//! Format: game_id,turn,player,row,col,letter,new_words,points,total_score,timestamp

use crate::recording::game_record::{GameRecord, MoveRecord};
use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// CSV writer for game recordings with daily rotation
pub struct CsvWriter {
    base_dir: PathBuf,
    current_file: Option<csv::Writer<File>>,
    current_date: String,
}

impl CsvWriter {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> std::io::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;

        Ok(Self {
            base_dir,
            current_file: None,
            current_date: String::new(),
        })
    }

    fn get_date_string() -> String {
        Utc::now().format("%Y%m%d").to_string()
    }

    fn get_file_path(&self, date: &str) -> PathBuf {
        self.base_dir.join(format!("games_{}.csv", date))
    }

    /// Ensure the file is open for the current date, with rotation
    fn ensure_file_open(&mut self) -> std::io::Result<()> {
        let today = Self::get_date_string();

        if self.current_date != today || self.current_file.is_none() {
            if let Some(mut writer) = self.current_file.take() {
                writer.flush()?;
            }

            let file_path = self.get_file_path(&today);
            let file_exists = file_path.exists();

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file_path)?;

            // Header only on a fresh file; serde writes it from MoveRecord's fields.
            let writer = csv::WriterBuilder::new()
                .has_headers(!file_exists)
                .from_writer(file);

            self.current_file = Some(writer);
            self.current_date = today;
        }

        Ok(())
    }

    /// Write a complete game record
    pub fn write_game(&mut self, record: &GameRecord) -> std::io::Result<()> {
        self.ensure_file_open()?;

        if let Some(ref mut writer) = self.current_file {
            for move_record in &record.moves {
                writer.serialize(move_record)?;
            }
            writer.flush()?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn close(&mut self) -> std::io::Result<()> {
        if let Some(mut writer) = self.current_file.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for CsvWriter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Load recorded moves back from a CSV file
pub fn load_moves_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MoveRecord>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}
