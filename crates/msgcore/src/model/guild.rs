use serde::{Deserialize, Serialize};

use super::emoji::{Emoji, EmojiId};
use super::snowflake::snowflake_id;
use super::user::UserId;

snowflake_id!(
    /// A guild ID.
    GuildId
);

snowflake_id!(
    /// A role ID.
    RoleId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Guild {
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis.iter().find(|e| e.id == Some(id))
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }
}
