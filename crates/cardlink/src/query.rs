//! Builder for Anki search strings.
//!
//! Only the pieces cardlink composes are here: a deck filter and raw,
//! parenthesised sub-queries supplied by the caller.
//!
//! # Example
//!
//! ```
//! use cardlink::Query;
//!
//! let query = Query::new().deck("My Deck").group("tag:verb OR tag:noun").build();
//! assert_eq!(query, "deck:\"My Deck\" (tag:verb OR tag:noun)");
//! ```

/// A builder for constructing Anki search queries.
#[derive(Debug, Clone, Default)]
#[must_use = "Query does nothing until .build() is called"]
pub struct Query {
    parts: Vec<String>,
}

impl Query {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Restrict to a deck (and its subdecks).
    ///
    /// The name is always quoted so names with spaces or `::` separators
    /// work unchanged.
    pub fn deck(mut self, name: &str) -> Self {
        self.parts.push(format!("deck:\"{}\"", escape_quotes(name)));
        self
    }

    /// Match cards in every deck.
    pub fn all_decks(mut self) -> Self {
        self.parts.push("deck:*".to_string());
        self
    }

    /// Append a caller-supplied query wrapped in parentheses.
    ///
    /// The text is passed through untouched, so Anki search syntax inside it
    /// keeps its meaning.
    pub fn group(mut self, query: &str) -> Self {
        self.parts.push(format!("({})", query));
        self
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('"', "\\\"")
}
