use crate::tree::{Node, Tree, Visitor};
use crate::{Delimited, InvalidPath, Params, Strategy};

use std::fmt;
use std::ops::ControlFlow;

/// A set of segmented path patterns, each with optional payloads, that
/// concrete paths are matched against.
///
/// Patterns are split and classified by the matcher's [`Strategy`]. Segments
/// are either literals, which match the same text, parameters, which match
/// and capture any single segment, or wildcards, which match everything that
/// is left of the path.
///
/// Candidates are tried depth-first in order of ascending priority, literals
/// before parameters before wildcards, and otherwise in registration order.
/// A failed branch is backtracked out of, so a more specific pattern only
/// shadows a more general one for the paths it actually matches.
///
/// ```rust
/// use segmatch::Matcher;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut matcher = Matcher::router();
/// matcher.insert_with_payload("/user/admin", "admin")?;
/// matcher.insert_with_payload("/user/:id", "user")?;
/// matcher.insert_with_payload("/static/*", "files")?;
///
/// let matched = matcher.match_named("/user/admin").unwrap();
/// assert_eq!(matched.pattern, "/user/admin");
/// assert_eq!(matched.payloads, ["admin"]);
///
/// let matched = matcher.match_named("/user/42").unwrap();
/// assert_eq!(matched.pattern, "/user/:id");
/// assert_eq!(matched.params.get("id"), Some("42"));
///
/// let matched = matcher.match_positional("/static/css/site.css").unwrap();
/// assert_eq!(matched.pattern, "/static/*");
/// assert!(matched.params.is_empty());
///
/// assert!(matcher.match_named("/about").is_none());
/// # Ok(())
/// # }
/// ```
///
/// A matcher only reads its trie while matching, so it can be shared between
/// threads for lookups. Registration needs `&mut self`; wrap the matcher in a
/// lock if patterns change while lookups are running.
pub struct Matcher<T, S = Delimited> {
    strategy: S,
    tree: Tree<T>,
}

/// The first match found by [`Matcher::match_named`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<'m, 'p, T> {
    /// The registered pattern that matched.
    pub pattern: &'m str,
    /// The parameters captured along the way, by name.
    pub params: Params<'m, 'p>,
    /// The payloads registered for the pattern, in registration order.
    pub payloads: &'m [T],
}

/// A match with parameters captured by position, as returned by
/// [`Matcher::match_positional`] and [`Matcher::match_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionalMatch<'m, 'p, T> {
    /// The registered pattern that matched.
    pub pattern: &'m str,
    /// The captured parameter values, in the order they appear in the path.
    pub params: Vec<&'p str>,
    /// The payloads registered for the pattern, in registration order.
    pub payloads: &'m [T],
}

impl<T> Matcher<T> {
    /// A matcher for HTTP router paths: `/users/:id/files/*`.
    pub fn router() -> Self {
        Matcher::new(Delimited::router())
    }

    /// A matcher for MQTT topic filters: `devices/+/telemetry/#`.
    pub fn mqtt() -> Self {
        Matcher::new(Delimited::mqtt())
    }

    /// A matcher for NATS subjects: `orders.>.created.*`.
    pub fn nats() -> Self {
        Matcher::new(Delimited::nats())
    }
}

impl<T, S: Strategy> Matcher<T, S> {
    /// Creates an empty matcher that segments and classifies paths with the
    /// given strategy.
    pub fn new(strategy: S) -> Self {
        Matcher {
            strategy,
            tree: Tree::new(),
        }
    }

    /// The strategy this matcher was built with.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Registers a pattern with the default priority and no payload.
    ///
    /// Registering a pattern more than once is allowed; payloads accumulate.
    pub fn insert(&mut self, pattern: &str) -> Result<(), InvalidPath> {
        self.register(pattern, 0, None)
    }

    /// Registers a pattern without a payload.
    ///
    /// Priority only applies to the trie nodes this call creates: segments
    /// shared with an earlier pattern keep the priority they were created
    /// with. Lower values are tried first.
    pub fn insert_with_priority(
        &mut self,
        pattern: &str,
        priority: i32,
    ) -> Result<(), InvalidPath> {
        self.register(pattern, priority, None)
    }

    /// Registers a pattern with the default priority and attaches `payload`.
    pub fn insert_with_payload(&mut self, pattern: &str, payload: T) -> Result<(), InvalidPath> {
        self.register(pattern, 0, Some(payload))
    }

    /// Registers a pattern with the given priority and attaches `payload`.
    pub fn insert_with(
        &mut self,
        pattern: &str,
        priority: i32,
        payload: T,
    ) -> Result<(), InvalidPath> {
        self.register(pattern, priority, Some(payload))
    }

    fn register(
        &mut self,
        pattern: &str,
        priority: i32,
        payload: Option<T>,
    ) -> Result<(), InvalidPath> {
        let has_payload = payload.is_some();

        match self.tree.insert(&self.strategy, pattern, priority, payload) {
            Ok(created) => {
                tracing::debug!(pattern, priority, has_payload, created, "registered pattern");
                Ok(())
            }
            Err(err) => {
                tracing::debug!(pattern, %err, "rejected pattern");
                Err(err)
            }
        }
    }

    /// Unregisters a pattern, returning the payloads it held.
    ///
    /// Returns `None` if the pattern is not registered or cannot be split.
    ///
    /// ```rust
    /// use segmatch::Matcher;
    ///
    /// let mut matcher = Matcher::mqtt();
    /// matcher.insert_with_payload("sensors/+/temp", 1).unwrap();
    /// matcher.insert_with_payload("sensors/+/temp", 2).unwrap();
    ///
    /// assert_eq!(matcher.delete("sensors/+/temp"), Some(vec![1, 2]));
    /// assert_eq!(matcher.delete("sensors/+/temp"), None);
    /// assert!(matcher.match_named("sensors/kitchen/temp").is_none());
    /// ```
    pub fn delete(&mut self, pattern: &str) -> Option<Vec<T>> {
        let removed = self.tree.delete(&self.strategy, pattern);
        tracing::debug!(pattern, removed = removed.is_some(), "deleted pattern");
        removed
    }

    /// Returns the number of registered patterns.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if no pattern is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first<'m, 'p, C>(&'m self, query: &'p str, captures: C) -> Option<(&'m Node<T>, C)>
    where
        C: Captures<'m, 'p>,
    {
        let segments = self.strategy.split(query).ok()?;

        let mut first = First {
            captures,
            matched: None,
        };

        if self.tree.search(&segments, &mut first).is_continue() {
            return None;
        }

        first.matched.map(|node| (node, first.captures))
    }

    /// Returns the first pattern matching `query`, with parameters captured
    /// by name.
    ///
    /// Only the parameters of the pattern that matched are captured; values
    /// bound while exploring branches that failed are discarded.
    pub fn match_named<'m, 'p>(&'m self, query: &'p str) -> Option<Match<'m, 'p, T>> {
        let matched = self
            .first(query, Params::new())
            .map(|(node, params)| Match {
                pattern: node.pattern(),
                params,
                payloads: node.payloads(),
            });

        tracing::trace!(query, pattern = matched.as_ref().map(|m| m.pattern), "match_named");
        matched
    }

    /// Returns the first pattern matching `query`, with parameter values
    /// captured by position.
    ///
    /// ```rust
    /// use segmatch::Matcher;
    ///
    /// let mut matcher = Matcher::<()>::router();
    /// matcher.insert("/:year/:month/:day").unwrap();
    ///
    /// let matched = matcher.match_positional("/2023/04/05").unwrap();
    /// assert_eq!(matched.params, ["2023", "04", "05"]);
    /// ```
    pub fn match_positional<'m, 'p>(
        &'m self,
        query: &'p str,
    ) -> Option<PositionalMatch<'m, 'p, T>> {
        let matched = self
            .first(query, Vec::new())
            .map(|(node, params)| PositionalMatch {
                pattern: node.pattern(),
                params,
                payloads: node.payloads(),
            });

        tracing::trace!(
            query,
            pattern = matched.as_ref().map(|m| m.pattern),
            "match_positional"
        );
        matched
    }

    /// Returns every match for `query`, in search order.
    ///
    /// Each entry is one distinct way through the trie, carrying only the
    /// parameters captured along that way.
    ///
    /// ```rust
    /// use segmatch::Matcher;
    ///
    /// let mut matcher = Matcher::<()>::mqtt();
    /// matcher.insert("home/+/light").unwrap();
    /// matcher.insert("home/kitchen/light").unwrap();
    /// matcher.insert("home/#").unwrap();
    ///
    /// let patterns = matcher
    ///     .match_all("home/kitchen/light")
    ///     .into_iter()
    ///     .map(|m| m.pattern)
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(patterns, ["home/kitchen/light", "home/+/light", "home/#"]);
    /// ```
    pub fn match_all<'m, 'p>(&'m self, query: &'p str) -> Vec<PositionalMatch<'m, 'p, T>> {
        let Ok(segments) = self.strategy.split(query) else {
            return Vec::new();
        };

        let mut all = All {
            captures: Vec::new(),
            results: Vec::new(),
        };
        // `All` never breaks, so the search always runs to completion.
        let flow = self.tree.search(&segments, &mut all);
        debug_assert!(flow.is_continue());

        tracing::trace!(query, matches = all.results.len(), "match_all");
        all.results
    }

    /// Returns `true` if any pattern matches `query`.
    pub fn is_match(&self, query: &str) -> bool {
        self.first(query, ()).is_some()
    }

    /// Returns the payloads of the first pattern matching `query`.
    ///
    /// ```rust
    /// use segmatch::Matcher;
    ///
    /// let mut matcher = Matcher::nats();
    /// matcher.insert_with_payload("orders.>.created", "audit").unwrap();
    /// matcher.insert_with_payload("orders.>.created", "notify").unwrap();
    ///
    /// assert_eq!(matcher.payloads("orders.eu.created"), Some(&["audit", "notify"][..]));
    /// assert_eq!(matcher.payloads("orders.eu.deleted"), None);
    /// ```
    pub fn payloads(&self, query: &str) -> Option<&[T]> {
        self.first(query, ()).map(|(node, ())| node.payloads())
    }
}

impl<T, S: Strategy + Default> Default for Matcher<T, S> {
    fn default() -> Self {
        Matcher::new(S::default())
    }
}

/// Dumps the trie, one node per line, siblings in the order they are tried.
impl<T, S> fmt::Debug for Matcher<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

// A capture buffer that follows the search's bind/unbind discipline.
trait Captures<'m, 'p> {
    fn push(&mut self, name: &'m str, value: &'p str);
    fn pop(&mut self);
}

impl<'m, 'p> Captures<'m, 'p> for Params<'m, 'p> {
    fn push(&mut self, name: &'m str, value: &'p str) {
        Params::push(self, name, value);
    }

    fn pop(&mut self) {
        Params::pop(self);
    }
}

impl<'m, 'p> Captures<'m, 'p> for Vec<&'p str> {
    fn push(&mut self, _: &'m str, value: &'p str) {
        Vec::push(self, value);
    }

    fn pop(&mut self) {
        Vec::pop(self);
    }
}

impl<'m, 'p> Captures<'m, 'p> for () {
    fn push(&mut self, _: &'m str, _: &'p str) {}

    fn pop(&mut self) {}
}

// Stops at the first accepting node, leaving its captures bound.
struct First<'m, T, C> {
    captures: C,
    matched: Option<&'m Node<T>>,
}

impl<'m, 'p, T, C: Captures<'m, 'p>> Visitor<'m, 'p, T> for First<'m, T, C> {
    fn bind(&mut self, name: &'m str, value: &'p str) {
        self.captures.push(name, value);
    }

    fn unbind(&mut self) {
        self.captures.pop();
    }

    fn accept(&mut self, node: &'m Node<T>) -> ControlFlow<()> {
        self.matched = Some(node);
        ControlFlow::Break(())
    }
}

// Records every accepting node with a copy of the captures leading to it.
struct All<'m, 'p, T> {
    captures: Vec<&'p str>,
    results: Vec<PositionalMatch<'m, 'p, T>>,
}

impl<'m, 'p, T> Visitor<'m, 'p, T> for All<'m, 'p, T> {
    fn bind(&mut self, _: &'m str, value: &'p str) {
        self.captures.push(value);
    }

    fn unbind(&mut self) {
        self.captures.pop();
    }

    fn accept(&mut self, node: &'m Node<T>) -> ControlFlow<()> {
        self.results.push(PositionalMatch {
            pattern: node.pattern(),
            params: self.captures.clone(),
            payloads: node.payloads(),
        });
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len() {
        let mut matcher = Matcher::router();
        assert!(matcher.is_empty());

        matcher.insert_with_payload("/a", 1).unwrap();
        matcher.insert_with_payload("/a", 2).unwrap();
        matcher.insert("/b/:id").unwrap();
        assert_eq!(matcher.len(), 2);

        matcher.delete("/a");
        assert_eq!(matcher.len(), 1);
    }

    #[test]
    fn default_is_router() {
        let mut matcher = Matcher::<(), Delimited>::default();
        matcher.insert("/files/*path").unwrap();
        assert!(matcher.is_match("/files/a/b"));
        assert_eq!(matcher.strategy(), &Delimited::router());
    }

    #[test]
    fn debug_dumps_tree() {
        let mut matcher = Matcher::<()>::router();
        matcher.insert("/:id").unwrap();

        let dump = format!("{matcher:?}");
        assert!(dump.contains("- id: pattern=\"/:id\", flags=[param][end]"));
    }
}
