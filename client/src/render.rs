use tictactoe_common::games::tictactoe::{GamePhase, GameSnapshot};

pub fn render(snapshot: &GameSnapshot) -> String {
    match snapshot.phase {
        GamePhase::NotStarted => format!(
            "\nDifficulty: {}. Choose your player: x or o\n",
            snapshot.difficulty
        ),
        GamePhase::InProgress => {
            let status = match (snapshot.players, snapshot.current_mark) {
                (Some(players), Some(mark)) if mark == players.human => {
                    format!("Your move ({})", mark)
                }
                (Some(players), _) => format!("Computer ({}) is thinking...", players.computer),
                _ => String::new(),
            };
            format!("\n{}\n{}\n", snapshot.grid, status)
        }
        GamePhase::Over => format!("\n{}", snapshot.grid),
    }
}

pub fn render_result(snapshot: &GameSnapshot) -> Option<String> {
    let result = snapshot.result.as_ref()?;
    let line = match snapshot.winning_line {
        Some(line) => format!(
            " (line {}-{}-{})",
            line.cells[0], line.cells[1], line.cells[2]
        ),
        None => String::new(),
    };
    Some(format!("{}{}\nType 'new' to play again.", result.text, line))
}
