use crate::games::SessionRng;
use super::board::{get_available_moves, is_empty};
use super::types::{Difficulty, Grid, Mark, Outcome};
use super::win_detector::check_win;

const WIN_SCORE: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveStrategy {
    Random,
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestMove {
    pub score: i32,
    pub index: usize,
}

/// Picks how the computer chooses its next move.
///
/// `coin` is a fair random draw supplied by the caller; only medium looks at it.
/// An empty board never triggers a search: every opening scores the same and
/// the full tree is the most expensive one to walk.
pub fn select_strategy(difficulty: Difficulty, board_is_empty: bool, coin: bool) -> MoveStrategy {
    match difficulty {
        Difficulty::Easy => MoveStrategy::Random,
        Difficulty::Medium if !board_is_empty && coin => MoveStrategy::Search,
        Difficulty::Medium => MoveStrategy::Random,
        Difficulty::Difficult if board_is_empty => MoveStrategy::Random,
        Difficulty::Difficult => MoveStrategy::Search,
    }
}

pub fn calculate_move(
    difficulty: Difficulty,
    grid: &Grid,
    bot_mark: Mark,
    rng: &mut SessionRng,
) -> Result<usize, String> {
    let coin = rng.random_bool();
    match select_strategy(difficulty, is_empty(grid), coin) {
        MoveStrategy::Random => calculate_random_move(grid, rng),
        MoveStrategy::Search => minimax(grid, bot_mark).map(|best| best.index),
    }
}

pub fn calculate_random_move(grid: &Grid, rng: &mut SessionRng) -> Result<usize, String> {
    let available_moves = get_available_moves(grid);
    rng.pick(&available_moves)
        .ok_or_else(|| "No empty cell left for a random move".to_string())
}

/// Full-depth minimax for `bot_mark`, who is to move on `grid`.
///
/// Wins score `10 - depth`, losses `depth - 10`, draws `0`, with depth counted in
/// plies from `grid`. Ties keep the lowest index.
pub fn minimax(grid: &Grid, bot_mark: Mark) -> Result<BestMove, String> {
    let available_moves = get_available_moves(grid);
    if available_moves.is_empty() {
        return Err("Cannot search a full board".to_string());
    }

    let mut best: Option<BestMove> = None;
    for index in available_moves {
        let child = grid.with_mark(index, bot_mark);
        let score = score_node(&child, bot_mark, bot_mark.opponent(), 1);

        if best.is_none_or(|current| score > current.score) {
            best = Some(BestMove { score, index });
        }
    }

    best.ok_or_else(|| "Search produced no move".to_string())
}

fn score_node(grid: &Grid, bot_mark: Mark, to_move: Mark, depth: i32) -> i32 {
    match check_win(grid) {
        Outcome::Win(mark) if mark == bot_mark => return WIN_SCORE - depth,
        Outcome::Win(_) => return depth - WIN_SCORE,
        Outcome::Draw => return 0,
        Outcome::Ongoing => {}
    }

    let scores = get_available_moves(grid).into_iter().map(|index| {
        score_node(&grid.with_mark(index, to_move), bot_mark, to_move.opponent(), depth + 1)
    });

    let best = if to_move == bot_mark {
        scores.max()
    } else {
        scores.min()
    };
    // Ongoing implies at least one empty cell.
    best.unwrap_or(0)
}
