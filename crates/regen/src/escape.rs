//! Reserved-word escaping for generated Rust identifiers.

use std::borrow::Cow;
use std::collections::HashSet;

/// Marker appended to reserved identifiers
pub const DEFAULT_MARKER: char = '_';

/// Raw atom names that collide with Rust keywords in generated code.
pub const DEFAULT_RESERVED_WORDS: &[&str] = &[
    "box", "loop", "match", "mod", "ref", "self", "type", "use", "where", "in",
];

/// The set of identifiers that must be escaped before they appear in a
/// generated declaration name.
///
/// Only the accessor name is escaped. Mangled symbols always use the raw
/// identifier because that is what the foreign toolchain saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedWords {
    words: HashSet<String>,
    marker: char,
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_WORDS.iter().copied())
    }
}

impl ReservedWords {
    /// Build a set from any list of words, using [`DEFAULT_MARKER`]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReservedWords {
            words: words.into_iter().map(Into::into).collect(),
            marker: DEFAULT_MARKER,
        }
    }

    /// Use a different escape marker (builder pattern)
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.words.contains(ident)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Escape `ident` if it is reserved; otherwise borrow it unchanged.
    pub fn escape<'a>(&self, ident: &'a str) -> Cow<'a, str> {
        if self.contains(ident) {
            let mut escaped = String::with_capacity(ident.len() + 1);
            escaped.push_str(ident);
            escaped.push(self.marker);
            Cow::Owned(escaped)
        } else {
            Cow::Borrowed(ident)
        }
    }
}
