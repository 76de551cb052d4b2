use crate::Strategy;

/// The role of a segment, and of the trie node it is stored in.
///
/// The declaration order is the order siblings of equal priority are tried in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Kind {
    Literal,
    Param,
    Wildcard,
}

/// A classified pattern segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Segment<'s> {
    /// The text the segment is indexed under: the literal itself, the
    /// parameter name, or the wildcard marker.
    pub key: &'s str,
    pub kind: Kind,
}

impl<'s> Segment<'s> {
    // Parameter detection takes precedence over wildcard detection.
    pub fn classify<S: Strategy + ?Sized>(strategy: &S, segment: &'s str) -> Segment<'s> {
        if let Some(key) = strategy.param(segment) {
            return Segment {
                key,
                kind: Kind::Param,
            };
        }

        if let Some(key) = strategy.wildcard(segment) {
            return Segment {
                key,
                kind: Kind::Wildcard,
            };
        }

        Segment {
            key: segment,
            kind: Kind::Literal,
        }
    }
}
