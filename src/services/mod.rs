pub mod game_manager;
pub mod session_manager;
