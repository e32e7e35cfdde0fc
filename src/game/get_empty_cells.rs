use crate::game::board::{Board, Position, BOARD_SIZE};

/// Returns every empty position on the board, row-major.
pub fn get_empty_cells(board: &Board) -> Vec<Position> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_none())
        .filter_map(|(i, _)| Position::new(i / BOARD_SIZE, i % BOARD_SIZE).ok())
        .collect()
}
