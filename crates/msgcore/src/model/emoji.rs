use serde::{Deserialize, Serialize};

use super::snowflake::snowflake_id;

snowflake_id!(
    /// A custom emoji ID.
    EmojiId
);

/// An emoji. Unicode emojis have no id and carry the character as `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    #[serde(default)]
    pub id: Option<EmojiId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}
