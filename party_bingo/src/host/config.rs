//! Host configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::constants::{DEFAULT_CALL_INTERVAL, FAST_MODE_DIVISOR};
use crate::game::session::GameSettings;

/// Configuration for one hosted game.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HostConfig {
    /// Session settings (minimum players, pool replenishment, autoplay).
    pub game: GameSettings,

    /// Wall-clock delay between number calls.
    pub call_interval: Duration,

    /// Compress the call interval for test acceleration.
    pub fast_mode: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            call_interval: DEFAULT_CALL_INTERVAL,
            fast_mode: false,
        }
    }
}

impl HostConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.game.min_players == 0 {
            return Err("minimum player count must be at least 1".to_string());
        }
        if !self.game.replenish_cards && self.game.min_players > 15 {
            return Err(
                "minimum player count cannot exceed the 15-card pool without replenishment"
                    .to_string(),
            );
        }
        if self.call_interval.is_zero() {
            return Err("call interval must be positive".to_string());
        }
        Ok(())
    }

    /// The effective delay between call ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        if self.fast_mode {
            self.call_interval / FAST_MODE_DIVISOR
        } else {
            self.call_interval
        }
    }
}
