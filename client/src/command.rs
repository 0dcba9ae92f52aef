use tictactoe_common::games::tictactoe::{CELL_COUNT, Difficulty, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(usize),
    Choose(Mark),
    SelectDifficulty(Difficulty),
    NewGame,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  x | o                       choose your side (X moves first)
  easy | medium | difficult   pick difficulty before choosing a side
  0-8                         place your mark on that cell
  new                         abandon the game and start over
  help                        show this text
  quit                        leave";

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim().to_ascii_lowercase();
    if input.is_empty() {
        return Err("Type 'help' for the list of commands".to_string());
    }

    if let Ok(index) = input.parse::<usize>() {
        if index >= CELL_COUNT {
            return Err(format!("Cell must be between 0 and {}", CELL_COUNT - 1));
        }
        return Ok(Command::Move(index));
    }

    match input.as_str() {
        "new" | "reset" => Ok(Command::NewGame),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => other
            .parse::<Mark>()
            .map(Command::Choose)
            .or_else(|_| other.parse::<Difficulty>().map(Command::SelectDifficulty))
            .map_err(|_| format!("Unknown command '{}'. Type 'help' for the list of commands", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(parse_command("4"), Ok(Command::Move(4)));
        assert_eq!(parse_command(" 0\n"), Ok(Command::Move(0)));
        assert!(parse_command("9").is_err());
    }

    #[test]
    fn test_parse_sides_and_difficulty() {
        assert_eq!(parse_command("X"), Ok(Command::Choose(Mark::X)));
        assert_eq!(parse_command("o"), Ok(Command::Choose(Mark::O)));
        assert_eq!(parse_command("Difficult"), Ok(Command::SelectDifficulty(Difficulty::Difficult)));
        assert_eq!(parse_command("easy"), Ok(Command::SelectDifficulty(Difficulty::Easy)));
    }

    #[test]
    fn test_parse_control_words() {
        assert_eq!(parse_command("new"), Ok(Command::NewGame));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert!(parse_command("").is_err());
        assert!(parse_command("castle").is_err());
    }
}
