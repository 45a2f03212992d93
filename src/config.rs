use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_DIMENSION, DEFAULT_THRESHOLD, MAX_COMMANDS, MAX_DIMENSION, QUEUE_DELAY};
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub dimension: usize,
    /// Tile value that wins the game.
    pub threshold: u32,
    pub queue_delay_ms: u64,
    pub max_commands: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            dimension: DEFAULT_DIMENSION,
            threshold: DEFAULT_THRESHOLD,
            queue_delay_ms: QUEUE_DELAY.as_millis() as u64,
            max_commands: MAX_COMMANDS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn queue_delay(&self) -> Duration {
        Duration::from_millis(self.queue_delay_ms)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(2..=MAX_DIMENSION).contains(&self.dimension) {
            return Err(GameError::InvalidConfig(format!(
                "dimension must be between 2 and {}, got {}",
                MAX_DIMENSION, self.dimension
            )));
        }
        if self.threshold < 4 || !self.threshold.is_power_of_two() {
            return Err(GameError::InvalidConfig(format!(
                "threshold must be a power of two of at least 4, got {}",
                self.threshold
            )));
        }
        if !(1..=MAX_COMMANDS).contains(&self.max_commands) {
            return Err(GameError::InvalidConfig(format!(
                "max_commands must be between 1 and {}, got {}",
                MAX_COMMANDS, self.max_commands
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_start_screen() {
        let config = GameConfig::default();
        assert_eq!(config.dimension, 8);
        assert_eq!(config.threshold, 2048);
        assert_eq!(config.queue_delay(), Duration::from_millis(300));
        assert_eq!(config.max_commands, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "dimension": 4, "seed": 7 }"#).unwrap();
        assert_eq!(config.dimension, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.threshold, 2048);
    }

    #[test]
    fn rejects_bad_threshold() {
        let err = GameConfig::from_json(r#"{ "threshold": 100 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_oversized_board() {
        let err = GameConfig::from_json(r#"{ "dimension": 9 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_single_cell_board() {
        let err = GameConfig::from_json(r#"{ "dimension": 1 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_queue() {
        let err = GameConfig::from_json(r#"{ "max_commands": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unbounded_queue() {
        let err = GameConfig::from_json(r#"{ "max_commands": 18446744073709551615 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert!(GameConfig::from_json(r#"{ "max_commands": 100 }"#).is_ok());
        assert!(GameConfig::from_json(r#"{ "max_commands": 101 }"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GameConfig::from_json("{ dimension").unwrap_err();
        assert!(matches!(err, GameError::Json(_)));
    }
}
