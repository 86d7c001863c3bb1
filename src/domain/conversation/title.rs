//! Conversation titles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest title shown in the conversation list, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Title used when a conversation is created without one.
pub const DEFAULT_TITLE: &str = "New Chat";

const ELLIPSIS: &str = "...";

/// Display title of a conversation, at most [`MAX_TITLE_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationTitle(String);

impl ConversationTitle {
    /// Title for a conversation started implicitly by its first question.
    ///
    /// Questions up to 50 characters are used verbatim. Longer ones keep
    /// their first 47 characters followed by `...`.
    pub fn from_question(question: &str) -> Self {
        Self(shorten(question))
    }

    /// Title chosen by the user when creating an empty conversation.
    ///
    /// Blank or missing titles fall back to [`DEFAULT_TITLE`].
    pub fn from_requested(requested: Option<&str>) -> Self {
        match requested.map(str::trim) {
            Some(title) if !title.is_empty() => Self(shorten(title)),
            _ => Self(DEFAULT_TITLE.to_string()),
        }
    }

    /// Wraps a title loaded from storage.
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Counts chars, not bytes, so multi-byte text is never split mid-character.
fn shorten(text: &str) -> String {
    if text.chars().count() <= MAX_TITLE_CHARS {
        return text.to_string();
    }
    let keep = MAX_TITLE_CHARS - ELLIPSIS.len();
    let mut title: String = text.chars().take(keep).collect();
    title.push_str(ELLIPSIS);
    title
}
