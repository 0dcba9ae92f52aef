mod command;
mod render;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tictactoe_common::config::{self, DEFAULT_CONFIG_FILE_NAME, Validate};
use tictactoe_common::games::tictactoe::{
    Difficulty, GamePhase, Mark, RESULT_DISPLAY_DELAY, TicTacToeSession,
};
use tictactoe_common::{log, logger};

use command::{Command, HELP, parse_command};
use render::{render, render_result};

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    player: Option<Mark>,
    #[arg(long)]
    delay_ms: Option<u64>,
    #[arg(long)]
    verbose: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        let prefix = if args.use_log_prefix {
            Some("Client".to_string())
        } else {
            None
        };
        logger::init_logger(prefix);
    }

    let mut config = config::load_config(&args.config)?;
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.computer_delay_ms = delay_ms;
    }
    config.validate()?;
    log!("Loaded config from {}: {:?}", args.config, config);

    let mut session = TicTacToeSession::from_config(&config);
    let mut updates = session.subscribe();
    println!("{}", HELP);
    print!("{}", render(&updates.borrow_and_update()));

    if let Some(mark) = args.player.or(config.preferred_mark) {
        session.choose_player(mark).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                print!("{}", render(&snapshot));
                if snapshot.phase == GamePhase::Over {
                    tokio::time::sleep(RESULT_DISPLAY_DELAY).await;
                    if let Some(result) = render_result(&snapshot) {
                        println!("{}", result);
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Move(index)) => {
                        if !session.human_move(index).await {
                            println!("Cell {} is not available right now.", index);
                        }
                    }
                    Ok(Command::Choose(mark)) => {
                        if !session.choose_player(mark).await {
                            println!("A game is already running. Type 'new' to start over.");
                        }
                    }
                    Ok(Command::SelectDifficulty(difficulty)) => {
                        if !session.select_difficulty(difficulty).await {
                            println!("Difficulty can only change before choosing a side.");
                        }
                    }
                    Ok(Command::NewGame) => session.reset().await,
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(Command::Quit) => break,
                    Err(e) => println!("{}", e),
                }
            }
        }
    }

    log!("Client shut down");
    Ok(())
}
