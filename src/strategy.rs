use crate::InvalidPath;

use serde::{Deserialize, Serialize};

/// The pluggable half of a [`Matcher`](crate::Matcher): how a path is cut into
/// segments, and which segments are parameters or wildcards.
///
/// The same strategy is used when registering patterns and when matching
/// queries, which is what makes the two comparable.
///
/// Detectors return the key the segment is indexed under in the trie, or
/// `None` if the segment does not have that role. Parameter detection always
/// runs first, so a segment detected as a parameter is never a wildcard.
pub trait Strategy {
    /// Returns the parameter name if `segment` is a parameter.
    fn param<'s>(&self, segment: &'s str) -> Option<&'s str>;

    /// Returns the wildcard marker if `segment` is a wildcard.
    fn wildcard<'s>(&self, segment: &'s str) -> Option<&'s str>;

    /// Splits a pattern or query into its ordered segments.
    fn split<'p>(&self, path: &'p str) -> Result<Vec<&'p str>, InvalidPath>;
}

/// How a single segment role is recognized.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// The segment is exactly `token`, and is indexed under it.
    Exact { token: String },
    /// The segment is `sigil` followed by a non-empty name, indexed under the
    /// name (`:id` is indexed as `id`).
    Named { sigil: String },
    /// The segment starts with `sigil` and is indexed under the sigil alone
    /// (`*path` is indexed as `*`).
    Marker { sigil: String },
    /// No segment has this role.
    Never,
}

impl Rule {
    pub fn exact(token: impl Into<String>) -> Rule {
        Rule::Exact {
            token: token.into(),
        }
    }

    pub fn named(sigil: impl Into<String>) -> Rule {
        Rule::Named {
            sigil: sigil.into(),
        }
    }

    pub fn marker(sigil: impl Into<String>) -> Rule {
        Rule::Marker {
            sigil: sigil.into(),
        }
    }

    /// Returns the key `segment` is indexed under if it matches this rule.
    ///
    /// The key always borrows from `segment`: an exact token or a marker is a
    /// prefix of the segment itself.
    pub fn detect<'s>(&self, segment: &'s str) -> Option<&'s str> {
        match self {
            Rule::Exact { token } => (segment == token).then_some(segment),
            Rule::Named { sigil } => segment
                .strip_prefix(sigil.as_str())
                .filter(|name| !name.is_empty()),
            Rule::Marker { sigil } => segment
                .starts_with(sigil.as_str())
                .then(|| &segment[..sigil.len()]),
            Rule::Never => None,
        }
    }
}

/// A strategy that splits on a single delimiter character and detects
/// parameters and wildcards with a [`Rule`] each.
///
/// The splitter rejects the empty string and keeps empty segments otherwise,
/// so `/a` splits into `["", "a"]`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Delimited {
    pub delimiter: char,
    pub param: Rule,
    pub wildcard: Rule,
}

impl Delimited {
    pub fn new(delimiter: char, param: Rule, wildcard: Rule) -> Delimited {
        Delimited {
            delimiter,
            param,
            wildcard,
        }
    }

    /// HTTP router paths: `/users/:id/files/*`.
    pub fn router() -> Delimited {
        Delimited::new('/', Rule::named(":"), Rule::marker("*"))
    }

    /// MQTT topic filters, with `+` as the parameter and `#` as the wildcard.
    pub fn mqtt() -> Delimited {
        Delimited::new('/', Rule::exact("+"), Rule::exact("#"))
    }

    /// NATS subjects, with `>` as the parameter and `*` as the wildcard.
    ///
    /// Note that these roles are the reverse of the NATS server's own
    /// semantics for the two tokens.
    pub fn nats() -> Delimited {
        Delimited::new('.', Rule::exact(">"), Rule::exact("*"))
    }
}

impl Default for Delimited {
    fn default() -> Self {
        Delimited::router()
    }
}

impl Strategy for Delimited {
    fn param<'s>(&self, segment: &'s str) -> Option<&'s str> {
        self.param.detect(segment)
    }

    fn wildcard<'s>(&self, segment: &'s str) -> Option<&'s str> {
        self.wildcard.detect(segment)
    }

    fn split<'p>(&self, path: &'p str) -> Result<Vec<&'p str>, InvalidPath> {
        if path.is_empty() {
            return Err(InvalidPath::new(path));
        }

        Ok(path.split(self.delimiter).collect())
    }
}

/// The built-in strategies, by name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Router,
    Mqtt,
    Nats,
}

impl From<Preset> for Delimited {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Router => Delimited::router(),
            Preset::Mqtt => Delimited::mqtt(),
            Preset::Nats => Delimited::nats(),
        }
    }
}
