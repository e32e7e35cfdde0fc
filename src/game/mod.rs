pub mod board;
pub mod board_is_full;
pub mod error;
pub mod get_empty_cells;
pub mod letter;
pub mod line_scan;
pub mod player;

pub use board::{create_board_empty, Board, Position, BOARD_SIZE};
pub use board_is_full::is_board_full;
pub use error::GameError;
pub use get_empty_cells::get_empty_cells;
pub use letter::Letter;
pub use line_scan::{run_through, Direction};
pub use player::PlayerSlot;
