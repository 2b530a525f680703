//! Term tokens and search phrases.
//!
//! Terms travel on the wire as single path segments with underscores standing
//! in for spaces (`occipital_cortex`). The search phrase is handed to the
//! full-text engine verbatim, so no further cleanup happens here: stemming
//! and stopword handling belong to the database.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical natural-language search phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchPhrase(String);

impl SearchPhrase {
    /// Converts a wire-format term token into a search phrase.
    ///
    /// Every underscore becomes a single space. An empty token yields an
    /// empty phrase, which is valid but matches nothing meaningful.
    ///
    /// # Examples
    ///
    /// ```
    /// use dissoc_persistence::types::SearchPhrase;
    ///
    /// let phrase = SearchPhrase::from_token("working_memory");
    /// assert_eq!(phrase.as_str(), "working memory");
    /// ```
    pub fn from_token(token: &str) -> Self {
        SearchPhrase(token.replace('_', " "))
    }

    /// Returns the phrase text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the phrase has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two phrases of a term dissociation: studies matching `include`
/// but not `exclude`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPair {
    /// Phrase a study must match.
    pub include: SearchPhrase,
    /// Phrase a study must not match.
    pub exclude: SearchPhrase,
}

impl TermPair {
    /// Builds a pair from two raw wire tokens.
    pub fn from_tokens(include: &str, exclude: &str) -> Self {
        Self {
            include: SearchPhrase::from_token(include),
            exclude: SearchPhrase::from_token(exclude),
        }
    }
}
