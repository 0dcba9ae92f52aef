use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            other => Err(format!("Unknown mark '{}', expected X or O", other)),
        }
    }
}

/// A full 3x3 board snapshot, cells in row-major order.
///
/// `Grid` is a plain value: placing a mark produces a new grid and never
/// touches the one it was derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns a copy of this grid with `mark` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CELL_COUNT`]. Check it with
    /// `is_valid_move` first when it comes from outside.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Grid {
        let mut cells = self.cells;
        cells[index] = Some(mark);
        Grid { cells }
    }
}

impl FromStr for Grid {
    type Err = String;

    /// Parses nine cells, `X`/`O` for marks and `.`, `_` or a space for empty.
    /// Newlines and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !matches!(c, '\n' | '\r' | '|')).collect();
        if symbols.len() != CELL_COUNT {
            return Err(format!(
                "Grid needs {} cells, got {} in '{}'",
                CELL_COUNT,
                symbols.len(),
                s
            ));
        }

        let mut cells = [None; CELL_COUNT];
        for (index, symbol) in symbols.into_iter().enumerate() {
            cells[index] = match symbol {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | ' ' => None,
                other => {
                    return Err(format!(
                        "Invalid cell '{}' at position {} in '{}'",
                        other, index, s
                    ));
                }
            };
        }
        Ok(Grid { cells })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let line: Vec<String> = (0..BOARD_SIZE)
                .map(|col| {
                    let index = row * BOARD_SIZE + col;
                    match self.cells[index] {
                        Some(mark) => format!(" {} ", mark),
                        None => format!(" {} ", index),
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win(Mark),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Where the renderer should draw the strike-through, in cell units.
/// Cell `(row, col)` covers `[col, col + 1] x [row, row + 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrikeGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub rotation_degrees: f64,
    pub length: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinLine {
    pub cells: [usize; 3],
}

impl WinLine {
    pub const fn new(cells: [usize; 3]) -> Self {
        Self { cells }
    }

    pub fn geometry(&self) -> StrikeGeometry {
        let (first_x, first_y) = cell_center(self.cells[0]);
        let (last_x, last_y) = cell_center(self.cells[2]);
        let dx = last_x - first_x;
        let dy = last_y - first_y;

        StrikeGeometry {
            center_x: (first_x + last_x) / 2.0,
            center_y: (first_y + last_y) / 2.0,
            rotation_degrees: dy.atan2(dx).to_degrees(),
            length: dx.hypot(dy) * 1.5,
        }
    }
}

fn cell_center(index: usize) -> (f64, f64) {
    let col = (index % BOARD_SIZE) as f64;
    let row = (index / BOARD_SIZE) as f64;
    (col + 0.5, row + 0.5)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Difficult,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Difficult => "difficult",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "difficult" | "hard" => Ok(Difficulty::Difficult),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium or difficult",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Players {
    pub human: Mark,
    pub computer: Mark,
}

impl Players {
    pub fn with_human(human: Mark) -> Self {
        Self {
            human,
            computer: human.opponent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub text: String,
}

impl GameResult {
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        let text = match outcome {
            Outcome::Win(mark) => format!("Player {} wins!", mark),
            Outcome::Draw => "It's a draw".to_string(),
            Outcome::Ongoing => return None,
        };
        Some(Self { outcome, text })
    }
}
