use serde::{Deserialize, Serialize};

use super::emoji::Emoji;

/// A raw reaction record, owned by the message it is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReaction {
    pub emoji: Emoji,
    #[serde(default)]
    pub count: u32,
    /// Whether the current user reacted.
    #[serde(default)]
    pub me: bool,
}
