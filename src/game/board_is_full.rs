use crate::game::board::Board;

pub fn is_board_full(board: &Board) -> bool {
    board.cells.iter().all(|cell| cell.is_some())
}
