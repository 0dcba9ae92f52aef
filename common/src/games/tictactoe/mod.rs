mod board;
mod bot_controller;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{get_available_moves, has_empty_cell, is_empty, is_valid_move};
pub use bot_controller::{
    BestMove, MoveStrategy, calculate_move, calculate_random_move, minimax, select_strategy,
};
pub use game_state::{FIRST_MARK, GameSnapshot, TicTacToeGameState};
pub use session::{DEFAULT_COMPUTER_DELAY, RESULT_DISPLAY_DELAY, TicTacToeSession};
pub use types::{
    BOARD_SIZE, CELL_COUNT, Difficulty, GamePhase, GameResult, Grid, Mark, Outcome, Players,
    StrikeGeometry, WinLine,
};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, winning_line};
