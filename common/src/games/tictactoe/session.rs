use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};

use crate::config::GameConfig;
use crate::games::{DeferredTask, SessionRng};
use crate::log;
use super::board::is_empty;
use super::bot_controller::{MoveStrategy, calculate_random_move, minimax, select_strategy};
use super::game_state::{GameSnapshot, TicTacToeGameState};
use super::types::{Difficulty, Mark};

/// Pause before the computer answers, so the human's move shows first.
pub const DEFAULT_COMPUTER_DELAY: Duration = Duration::from_millis(500);
/// Pause a renderer may take between the final move and the result.
pub const RESULT_DISPLAY_DELAY: Duration = Duration::from_millis(300);

/// Drives a [`TicTacToeGameState`] for an interactive front end.
///
/// Human input is applied right away; the computer's reply is scheduled on a
/// [`DeferredTask`] after `computer_delay`. A pending reply is dropped if the
/// game changes underneath it (reset, new game) before it fires.
pub struct TicTacToeSession {
    state: Arc<Mutex<TicTacToeGameState>>,
    rng: Arc<Mutex<SessionRng>>,
    updates: Arc<watch::Sender<GameSnapshot>>,
    pending_move: DeferredTask,
    computer_delay: Duration,
}

impl TicTacToeSession {
    pub fn new(difficulty: Difficulty, computer_delay: Duration, rng: SessionRng) -> Self {
        let state = TicTacToeGameState::new(difficulty);
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            state: Arc::new(Mutex::new(state)),
            rng: Arc::new(Mutex::new(rng)),
            updates: Arc::new(updates),
            pending_move: DeferredTask::new(),
            computer_delay,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let rng = SessionRng::from_random();
        log!("Session seed {}", rng.seed());
        Self::new(config.difficulty, config.computer_delay(), rng)
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.state.lock().await.snapshot()
    }

    pub fn has_pending_move(&self) -> bool {
        self.pending_move.is_pending()
    }

    pub async fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        let mut state = self.state.lock().await;
        let applied = state.select_difficulty(difficulty);
        if applied {
            self.updates.send_replace(state.snapshot());
        }
        applied
    }

    pub async fn choose_player(&mut self, human: Mark) -> bool {
        let mut state = self.state.lock().await;
        if !state.choose_player(human) {
            return false;
        }
        if self.pending_move.cancel() {
            log!("Cancelled pending computer move from the previous game");
        }

        self.updates.send_replace(state.snapshot());
        let computer_opens = state.is_computer_turn();
        let generation = state.generation();
        drop(state);

        if computer_opens {
            self.schedule_computer_move(generation);
        }
        true
    }

    pub async fn human_move(&mut self, index: usize) -> bool {
        let mut state = self.state.lock().await;
        if !state.human_move(index) {
            return false;
        }

        self.updates.send_replace(state.snapshot());
        let computer_next = state.is_computer_turn();
        let generation = state.generation();
        drop(state);

        if computer_next {
            self.schedule_computer_move(generation);
        }
        true
    }

    pub async fn reset(&mut self) {
        self.cancel_pending_move();
        let mut state = self.state.lock().await;
        state.reset();
        self.updates.send_replace(state.snapshot());
    }

    fn cancel_pending_move(&mut self) {
        if self.pending_move.cancel() {
            log!("Cancelled pending computer move");
        }
    }

    fn schedule_computer_move(&mut self, generation: u64) {
        let state = Arc::clone(&self.state);
        let rng = Arc::clone(&self.rng);
        let updates = Arc::clone(&self.updates);

        self.pending_move.schedule(self.computer_delay, async move {
            play_computer_turn(&state, &rng, &updates, generation).await;
        });
    }
}

/// Search runs on a blocking thread with the state unlocked, so the game is
/// checked again before the result is applied.
async fn play_computer_turn(
    state: &Mutex<TicTacToeGameState>,
    rng: &Mutex<SessionRng>,
    updates: &watch::Sender<GameSnapshot>,
    generation: u64,
) {
    let mut game_state = state.lock().await;
    if game_state.generation() != generation || !game_state.is_computer_turn() {
        log!("Dropping stale computer move for generation {}", generation);
        return;
    }
    let Some(players) = game_state.players() else {
        return;
    };

    let grid = game_state.grid();
    let coin = rng.lock().await.random_bool();
    let strategy = select_strategy(game_state.difficulty(), is_empty(&grid), coin);
    let picked = match strategy {
        MoveStrategy::Random => {
            let mut rng = rng.lock().await;
            calculate_random_move(&grid, &mut rng)
        }
        MoveStrategy::Search => {
            drop(game_state);
            let computer = players.computer;
            let result = tokio::task::spawn_blocking(move || minimax(&grid, computer)).await;

            game_state = state.lock().await;
            if game_state.generation() != generation {
                log!("Game changed during search, dropping move for generation {}", generation);
                return;
            }
            match result {
                Ok(search) => search.map(|best| best.index),
                Err(e) => Err(format!("Search task failed: {}", e)),
            }
        }
    };

    match picked {
        Ok(index) => {
            if game_state.apply_computer_move(index) {
                updates.send_replace(game_state.snapshot());
            }
        }
        Err(e) => log!("Computer could not pick a move: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{GamePhase, Grid, Outcome};

    const DELAY: Duration = Duration::from_millis(500);

    fn session(difficulty: Difficulty, seed: u64) -> TicTacToeSession {
        TicTacToeSession::new(difficulty, DELAY, SessionRng::new(seed))
    }

    async fn let_computer_move() {
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_replies_after_delay() {
        let mut session = session(Difficulty::Easy, 1);
        assert!(session.choose_player(Mark::X).await);
        assert!(!session.has_pending_move());

        assert!(session.human_move(4).await);
        assert!(session.has_pending_move());
        assert_eq!(session.snapshot().await.grid.filled_count(), 1);

        let_computer_move().await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.grid.filled_count(), 2);
        assert_eq!(snapshot.current_mark, Some(Mark::X));
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_opens_when_human_plays_o() {
        let mut session = session(Difficulty::Difficult, 2);
        assert!(session.choose_player(Mark::O).await);
        assert!(session.has_pending_move());

        let_computer_move().await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.grid.filled_count(), 1);
        let opening = snapshot.last_move.unwrap();
        assert_eq!(snapshot.grid.get(opening), Some(Mark::X));
        assert_eq!(snapshot.current_mark, Some(Mark::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_difficult_reply_comes_from_search() {
        // Against a corner opening only the center holds the draw.
        let mut session = session(Difficulty::Difficult, 8);
        session.choose_player(Mark::X).await;
        assert!(session.human_move(0).await);

        let_computer_move().await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.grid.get(4), Some(Mark::O));
        assert_eq!(snapshot.last_move, Some(4));
        assert_eq!(snapshot.current_mark, Some(Mark::X));
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_move_on_computer_turn_is_ignored() {
        let mut session = session(Difficulty::Easy, 3);
        session.choose_player(Mark::O).await;
        let before = session.snapshot().await;

        assert!(!session.human_move(4).await);
        assert_eq!(session.snapshot().await, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending_move() {
        let mut session = session(Difficulty::Easy, 4);
        session.choose_player(Mark::X).await;
        session.human_move(0).await;

        tokio::time::sleep(DELAY / 2).await;
        session.reset().await;
        assert!(!session.has_pending_move());

        tokio::time::sleep(DELAY * 2).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.grid, Grid::new());
        assert_eq!(snapshot.phase, GamePhase::NotStarted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_game_after_reset_gets_only_its_own_move() {
        let mut session = session(Difficulty::Easy, 5);
        session.choose_player(Mark::O).await;
        session.reset().await;
        session.choose_player(Mark::O).await;

        tokio::time::sleep(DELAY * 3).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.grid.filled_count(), 1);
        assert_eq!(snapshot.current_mark, Some(Mark::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_computer_move() {
        let mut session = session(Difficulty::Medium, 6);
        let mut updates = session.subscribe();
        session.choose_player(Mark::X).await;
        session.human_move(8).await;
        let _ = updates.borrow_and_update();

        updates.changed().await.unwrap();
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.grid.filled_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_difficult_session_never_loses() {
        for seed in 0..5 {
            let mut session = session(Difficulty::Difficult, seed);
            let mut picker = SessionRng::new(seed + 100);
            session.choose_player(Mark::X).await;

            loop {
                let snapshot = session.snapshot().await;
                if snapshot.phase == GamePhase::Over {
                    assert_ne!(snapshot.outcome, Outcome::Win(Mark::X));
                    assert!(snapshot.result.is_some());
                    break;
                }
                let empty: Vec<usize> =
                    (0..9).filter(|&i| !snapshot.grid.is_occupied(i)).collect();
                let index = picker.pick(&empty).unwrap();
                assert!(session.human_move(index).await);
                let_computer_move().await;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_difficulty_locked_during_game() {
        let mut session = session(Difficulty::Easy, 7);
        assert!(session.select_difficulty(Difficulty::Difficult).await);
        session.choose_player(Mark::X).await;
        assert!(!session.select_difficulty(Difficulty::Easy).await);
        assert_eq!(session.snapshot().await.difficulty, Difficulty::Difficult);
    }
}
