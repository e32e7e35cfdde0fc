//! # Word Grid Game Library
//!
//! A two-player word-building game played on a 7×7 letter grid.
//!
//! ## Features
//!
//! - **Game Engine**: board, letters, turn flow and end-of-game detection
//! - **Scoring**: row/column scanning and per-player word bookkeeping
//! - **Dictionary**: remote dictionary lookups, offline word lists, caching
//! - **Server Components**: JSON HTTP API with in-memory game sessions
//! - **Recording**: CSV log of played moves
//!
//! ## Usage
//!
//! ```rust
//! use word_grid::{
//!     dictionary::{Dictionary, WordList},
//!     services::game_manager::{apply_player_move, create_word_grid_game, PlayerMove},
//!     Letter, PlayerSlot, Position,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> word_grid::Result<()> {
//! let dictionary = Dictionary::Offline(WordList::from_words(["cat", "cats"]));
//! let mut game = create_word_grid_game("local".to_string(), "Ada", "");
//! assert_eq!(game.players[1].name, "Player 2");
//!
//! for (player, col, c) in [(PlayerSlot::One, 0, 'C'), (PlayerSlot::Two, 1, 'A'), (PlayerSlot::One, 2, 'T')] {
//!     let player_move = PlayerMove::new(player, Position::new(0, col)?, Letter::new(c)?);
//!     game = apply_player_move(game, player_move, &dictionary).await?.new_game_state;
//! }
//! assert_eq!(game.players[0].words, ["CAT"]);
//! assert_eq!(game.players[0].score, 3);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Word extraction and turn scoring
pub mod scoring;

/// Word validation backends
pub mod dictionary;

/// Turn flow and game sessions
pub mod services;

/// Server components (JSON HTTP API)
pub mod servers;

/// Move recording to CSV
pub mod recording;

/// Terminal hot-seat play
pub mod terminal;

/// Logger initialisation
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::*;

pub use dictionary::{Dictionary, DictionaryError, WordValidator};

pub use servers::{WebApiConfig, WebApiServer};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Word Grid library
#[derive(Debug, thiserror::Error)]
pub enum WordGridError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Session error: {0}")]
    Session(#[from] services::session_manager::SessionError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordGridError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
