use serde::{Deserialize, Serialize};

use super::guild::GuildId;
use super::snowflake::snowflake_id;
use super::user::UserId;

snowflake_id!(
    /// A channel ID.
    ChannelId
);

/// A channel as resolved through the host's channel directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Only group DMs have an owner.
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
}
