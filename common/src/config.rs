use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{DEFAULT_COMPUTER_DELAY, Difficulty, Mark};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const MAX_COMPUTER_DELAY_MS: u64 = 10_000;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub computer_delay_ms: u64,
    #[serde(default)]
    pub preferred_mark: Option<Mark>,
}

impl GameConfig {
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            computer_delay_ms: DEFAULT_COMPUTER_DELAY.as_millis() as u64,
            preferred_mark: None,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.computer_delay_ms > MAX_COMPUTER_DELAY_MS {
            return Err(format!(
                "computer_delay_ms must not exceed {}, got {}",
                MAX_COMPUTER_DELAY_MS, self.computer_delay_ms
            ));
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<GameConfig, String> {
    let config: GameConfig = serde_yaml_ng::from_str(content)
        .map_err(|e| format!("Failed to deserialize config: {}", e))?;
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;
    Ok(config)
}

/// Loads the config at `path`, falling back to defaults when the file is absent.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => parse_config(&content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(GameConfig::default()),
        Err(err) => Err(format!("Failed to read config file: {}", err)),
    }
}

pub fn save_config(path: impl AsRef<Path>, config: &GameConfig) -> Result<(), String> {
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;
    let content = serde_yaml_ng::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path.as_ref(), content)
        .map_err(|e| format!("Failed to write config file: {}", e))
}
