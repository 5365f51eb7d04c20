//! Card lifecycle states derived from Anki queue codes.

use std::fmt;

use serde::Serialize;

/// Where a card sits in its scheduling lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Never studied.
    New,
    /// In the learning steps.
    Learning,
    /// Graduated and scheduled for review.
    Review,
    /// Excluded from study.
    Suspended,
    /// Any other queue code (buried, day-learn, preview, ...).
    Unknown,
}

impl LifecycleState {
    /// Decode an Anki queue code. Total: unrecognised codes are `Unknown`.
    pub fn from_queue(code: i64) -> Self {
        match code {
            -1 => LifecycleState::Suspended,
            0 => LifecycleState::New,
            1 => LifecycleState::Learning,
            2 => LifecycleState::Review,
            _ => LifecycleState::Unknown,
        }
    }

    /// The lowercase label, as it appears in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::New => "new",
            LifecycleState::Learning => "learning",
            LifecycleState::Review => "review",
            LifecycleState::Suspended => "suspended",
            LifecycleState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a queue code into a [`LifecycleState`].
pub fn decode_status(code: i64) -> LifecycleState {
    LifecycleState::from_queue(code)
}
