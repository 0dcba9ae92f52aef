use crate::games::SessionRng;
use crate::log;
use super::board::is_valid_move;
use super::bot_controller::calculate_move;
use super::types::{
    Difficulty, GamePhase, GameResult, Grid, Mark, Outcome, Players, StrikeGeometry, WinLine,
};
use super::win_detector::{check_win, winning_line};

/// X always opens, whichever side the human picked.
pub const FIRST_MARK: Mark = Mark::X;

/// Everything a renderer needs, copied out of the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub players: Option<Players>,
    pub current_mark: Option<Mark>,
    pub outcome: Outcome,
    pub result: Option<GameResult>,
    pub winning_line: Option<WinLine>,
    pub strike: Option<StrikeGeometry>,
    pub last_move: Option<usize>,
}

/// Authoritative state of one human-vs-computer game.
///
/// Calls that are not legal in the current state are ignored and return `false`,
/// so a UI can forward clicks without checking them first.
#[derive(Debug)]
pub struct TicTacToeGameState {
    grid: Grid,
    phase: GamePhase,
    difficulty: Difficulty,
    players: Option<Players>,
    current_mark: Option<Mark>,
    outcome: Outcome,
    result: Option<GameResult>,
    last_move: Option<usize>,
    generation: u64,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl TicTacToeGameState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            grid: Grid::new(),
            phase: GamePhase::NotStarted,
            difficulty,
            players: None,
            current_mark: None,
            outcome: Outcome::Ongoing,
            result: None,
            last_move: None,
            generation: 0,
        }
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != GamePhase::NotStarted {
            log!("Ignoring difficulty change to {} while game is {:?}", difficulty, self.phase);
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    pub fn choose_player(&mut self, human: Mark) -> bool {
        if self.phase != GamePhase::NotStarted {
            log!("Ignoring player choice {} while game is {:?}", human, self.phase);
            return false;
        }

        let players = Players::with_human(human);
        self.players = Some(players);
        self.phase = GamePhase::InProgress;
        self.current_mark = Some(FIRST_MARK);
        self.generation += 1;

        log!(
            "New game: human {}, computer {}, difficulty {}",
            players.human,
            players.computer,
            self.difficulty
        );
        true
    }

    pub fn human_move(&mut self, index: usize) -> bool {
        let Some(players) = self.players else {
            log!("Ignoring move at {}: no game in progress", index);
            return false;
        };

        match self.place_mark(players.human, index) {
            Ok(()) => true,
            Err(e) => {
                log!("Human failed to place {} at {}: {}", players.human, index, e);
                false
            }
        }
    }

    /// Picks the computer's move according to the difficulty and applies it.
    pub fn computer_move(&mut self, rng: &mut SessionRng) -> bool {
        let Some(players) = self.players else {
            return false;
        };
        if !self.is_computer_turn() {
            log!("Ignoring computer move: not the computer's turn");
            return false;
        }

        match calculate_move(self.difficulty, &self.grid, players.computer, rng) {
            Ok(index) => self.apply_computer_move(index),
            Err(e) => {
                log!("Computer could not pick a move: {}", e);
                false
            }
        }
    }

    /// Applies a move the computer picked elsewhere, e.g. on a blocking thread.
    pub fn apply_computer_move(&mut self, index: usize) -> bool {
        let Some(players) = self.players else {
            return false;
        };

        match self.place_mark(players.computer, index) {
            Ok(()) => true,
            Err(e) => {
                log!("Computer failed to place {} at {}: {}", players.computer, index, e);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.phase = GamePhase::NotStarted;
        self.players = None;
        self.current_mark = None;
        self.outcome = Outcome::Ongoing;
        self.result = None;
        self.last_move = None;
        self.generation += 1;
    }

    fn place_mark(&mut self, mark: Mark, index: usize) -> Result<(), String> {
        if self.phase != GamePhase::InProgress {
            return Err(format!("Game is {:?}", self.phase));
        }

        if self.current_mark != Some(mark) {
            return Err("Not this player's turn".to_string());
        }

        if !is_valid_move(&self.grid, index) {
            return Err("Cell is out of bounds or already marked".to_string());
        }

        self.grid = self.grid.with_mark(index, mark);
        self.last_move = Some(index);
        self.current_mark = Some(mark.opponent());
        self.generation += 1;
        log!("{} placed at {}", mark, index);

        self.check_game_over();
        Ok(())
    }

    fn check_game_over(&mut self) {
        self.outcome = check_win(&self.grid);
        if !self.outcome.is_terminal() {
            return;
        }

        self.phase = GamePhase::Over;
        self.current_mark = None;
        self.result = GameResult::from_outcome(self.outcome);

        if let Some(result) = &self.result {
            log!("Game over: {}", result.text);
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn players(&self) -> Option<Players> {
        self.players
    }

    pub fn current_mark(&self) -> Option<Mark> {
        self.current_mark
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        winning_line(&self.grid)
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Bumped by every change that a pending computer move must not outlive.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_computer_turn(&self) -> bool {
        self.phase == GamePhase::InProgress
            && self.players.map(|p| p.computer) == self.current_mark
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let winning_line = self.winning_line();
        GameSnapshot {
            grid: self.grid,
            phase: self.phase,
            difficulty: self.difficulty,
            players: self.players,
            current_mark: self.current_mark,
            outcome: self.outcome,
            result: self.result.clone(),
            winning_line,
            strike: winning_line.map(|line| line.geometry()),
            last_move: self.last_move,
        }
    }
}
