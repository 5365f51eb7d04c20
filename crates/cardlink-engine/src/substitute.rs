//! Rewriting `{filename}` placeholders into Anki media markup.
//!
//! ```
//! use cardlink_engine::substitute::substitute_placeholders;
//!
//! let stored = vec!["clip.mp3".to_string(), "pic.png".to_string()];
//! assert_eq!(
//!     substitute_placeholders("Listen: {clip.mp3} {pic.png} {other.mp3}", &stored),
//!     "Listen: [sound:clip.mp3] <img src=\"pic.png\"> {other.mp3}",
//! );
//! ```

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

use crate::media::MediaKind;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// The markup Anki uses to embed `filename`, if its type is embeddable.
pub fn embed_tag(filename: &str) -> Option<String> {
    match MediaKind::from_filename(filename) {
        MediaKind::Audio => Some(format!("[sound:{}]", filename)),
        MediaKind::Image => Some(format!("<img src=\"{}\">", filename)),
        MediaKind::Unknown => None,
    }
}

/// Replace every `{name}` whose `name` is in `stored` with its embed tag.
///
/// Placeholders naming files that were not stored, or files of an unknown
/// type, are left verbatim.
pub fn substitute_placeholders(text: &str, stored: &[String]) -> String {
    if stored.is_empty() {
        return text.to_string();
    }

    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            stored
                .iter()
                .any(|s| s == name)
                .then(|| embed_tag(name))
                .flatten()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
