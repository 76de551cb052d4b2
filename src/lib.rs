//! A backtracking trie matcher for segmented paths.
//!
//! `segmatch` stores a set of patterns, such as HTTP routes, MQTT topic
//! filters, or NATS subjects, and finds the pattern(s) a concrete path
//! matches, along with the captured parameters and the payloads attached to
//! the pattern.
//!
//! ```rust
//! use segmatch::Matcher;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut matcher = Matcher::mqtt();
//! matcher.insert_with_payload("iot/bms/things/+/up/props", "props")?;
//! matcher.insert_with_payload("iot/bms/things/+/up/ota/+", "ota")?;
//!
//! let matched = matcher
//!     .match_positional("iot/bms/things/edge1/up/ota/upgradePost")
//!     .unwrap();
//! assert_eq!(matched.pattern, "iot/bms/things/+/up/ota/+");
//! assert_eq!(matched.params, ["edge1", "upgradePost"]);
//! assert_eq!(matched.payloads, ["ota"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Strategies
//!
//! How a path is split, and which segments are parameters or wildcards, is
//! decided by a [`Strategy`]. Three presets are provided:
//!
//! ```text
//!  Preset     Delimiter   Parameter          Wildcard
//!  router     /           :name              * or *name
//!  mqtt       /           +                  #
//!  nats       .           >                  *
//! ```
//!
//! Parameters match exactly one segment. Wildcards match whatever is left of
//! the path, including nothing at all, so `/files/*` matches `/files`,
//! `/files/a`, and `/files/a/b/c`. A wildcard ends matching wherever it
//! appears in a pattern.
//!
//! # Priority
//!
//! Sibling segments are tried in order of ascending priority (registered with
//! [`Matcher::insert_with_priority`]), then literals before parameters before
//! wildcards, then in registration order. The search backtracks, so
//! `/user/admin` is preferred over `/user/:id` for the path `/user/admin`,
//! while `/user/7` still matches `/user/:id`.
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod matcher;
mod params;
mod segment;
mod strategy;
mod tree;

pub use config::{MatcherConfig, PatternConfig, StrategyConfig};
pub use error::{ConfigError, InvalidPath};
pub use matcher::{Match, Matcher, PositionalMatch};
pub use params::{Params, ParamsIter};
pub use strategy::{Delimited, Preset, Rule, Strategy};
