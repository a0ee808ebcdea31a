//! Engine configuration.
//!
//! `EngineConfig` carries the table limits and economic constants the rules
//! read at runtime. The defaults reproduce the standard game; embedders may
//! load an override from JSON:
//!
//! ```
//! use wonders_engine::core::{EngineConfig, TradePolicy};
//!
//! let config = EngineConfig::from_json(r#"{ "starting_coins": 5, "trade_policy": "Priced" }"#)
//!     .unwrap();
//! assert_eq!(config.starting_coins, 5);
//! assert_eq!(config.trade_policy, TradePolicy::Priced);
//! assert_eq!(config.max_players, 7);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How resources bought from neighbours are paid for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradePolicy {
    /// A neighbour shortfall is covered if the two neighbours together
    /// produce enough. Nothing is charged.
    #[default]
    Free,
    /// Every neighbour-sourced unit costs coins at the buyer's price
    /// multiplier for that side and class. Coins go to the seller.
    Priced,
}

/// Configuration validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player limits {min}..={max} are invalid (allowed range is 2..=255)")]
    PlayerLimits { min: usize, max: usize },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i32 },

    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Tunable rules constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fewest players a game can start with.
    pub min_players: usize,
    /// Most players a game accepts.
    pub max_players: usize,
    /// Coins each player starts with.
    pub starting_coins: i32,
    /// Coins granted for discarding a card.
    pub discard_reward: i32,
    /// Initial price of one base unit bought from a neighbour.
    pub base_trade_price: i32,
    /// Initial price of one advanced unit bought from a neighbour.
    pub advanced_trade_price: i32,
    /// Guild cards dealt in age III beyond one per player.
    pub extra_guilds: usize,
    /// Neighbour trade payment policy.
    pub trade_policy: TradePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 7,
            starting_coins: 3,
            discard_reward: 3,
            base_trade_price: 2,
            advanced_trade_price: 2,
            extra_guilds: 2,
            trade_policy: TradePolicy::Free,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON override. Missing fields keep their
    /// defaults. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the trade policy.
    #[must_use]
    pub fn with_trade_policy(mut self, policy: TradePolicy) -> Self {
        self.trade_policy = policy;
        self
    }

    /// Set the player limits.
    #[must_use]
    pub fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 || self.min_players > self.max_players || self.max_players > 255 {
            return Err(ConfigError::PlayerLimits {
                min: self.min_players,
                max: self.max_players,
            });
        }

        let amounts = [
            ("starting_coins", self.starting_coins),
            ("discard_reward", self.discard_reward),
            ("base_trade_price", self.base_trade_price),
            ("advanced_trade_price", self.advanced_trade_price),
        ];
        for (field, value) in amounts {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}
