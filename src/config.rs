//! Declarative matcher setup.
//!
//! A [`MatcherConfig`] names a strategy, either a [`Preset`] or a custom
//! [`Delimited`] table, and the patterns to register:
//!
//! ```toml
//! strategy = "mqtt"
//!
//! [[patterns]]
//! pattern = "iot/bms/things/+/up/props"
//!
//! [[patterns]]
//! pattern = "iot/bms/things/+/up/#"
//! priority = 10
//! ```
//!
//! or with a custom strategy:
//!
//! ```toml
//! [strategy]
//! delimiter = ":"
//! param = { kind = "named", sigil = "$" }
//! wildcard = { kind = "exact", token = "**" }
//! ```

use crate::{ConfigError, Delimited, Matcher, Preset};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration for a [`Matcher`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// How paths are segmented and classified.
    pub strategy: StrategyConfig,

    /// Patterns registered, in order, when the matcher is built.
    pub patterns: Vec<PatternConfig>,
}

/// Either a preset name or a custom strategy table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StrategyConfig {
    Preset(Preset),
    Custom(Delimited),
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Preset(Preset::Router)
    }
}

impl From<StrategyConfig> for Delimited {
    fn from(config: StrategyConfig) -> Self {
        match config {
            StrategyConfig::Preset(preset) => preset.into(),
            StrategyConfig::Custom(strategy) => strategy,
        }
    }
}

/// A single pattern to register.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternConfig {
    pub pattern: String,

    #[serde(default)]
    pub priority: i32,
}

impl MatcherConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<MatcherConfig, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<MatcherConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        MatcherConfig::from_toml(&text)
    }
}

impl<T> Matcher<T> {
    /// Builds a matcher with the configured strategy and registers every
    /// configured pattern without a payload.
    ///
    /// Fails on the first pattern the strategy rejects.
    ///
    /// ```rust
    /// use segmatch::{Matcher, MatcherConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = MatcherConfig::from_toml(
    ///     r#"
    ///     strategy = "nats"
    ///
    ///     [[patterns]]
    ///     pattern = "iot.bms.things.prop.>.>"
    ///     "#,
    /// )?;
    ///
    /// let matcher = Matcher::<()>::from_config(&config)?;
    /// let matched = matcher.match_positional("iot.bms.things.prop.edge1.temp").unwrap();
    /// assert_eq!(matched.params, ["edge1", "temp"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &MatcherConfig) -> Result<Matcher<T>, ConfigError> {
        let mut matcher = Matcher::new(Delimited::from(config.strategy.clone()));

        for entry in &config.patterns {
            matcher.insert_with_priority(&entry.pattern, entry.priority)?;
        }

        tracing::debug!(
            strategy = ?matcher.strategy(),
            patterns = matcher.len(),
            "built matcher from config"
        );

        Ok(matcher)
    }
}
