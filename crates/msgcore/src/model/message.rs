use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::ChannelId;
use super::embed::RawEmbed;
use super::guild::RoleId;
use super::reaction::RawReaction;
use super::snowflake::snowflake_id;
use super::user::{RawUser, UserId};
use super::Record;

snowflake_id!(
    /// A message ID.
    MessageId
);

snowflake_id!(
    /// The ID of the webhook that posted a message.
    WebhookId
);

snowflake_id!(
    /// An attachment ID.
    AttachmentId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    pub url: String,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Points at another message, e.g. the one a pin notice is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReference {
    #[serde(default)]
    pub message_id: Option<MessageId>,
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
}

/// Call metadata carried by call messages.
#[serde_with::serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCall {
    #[serde(default)]
    pub participants: Vec<UserId>,
    #[serde_as(as = "serde_with::DefaultOnError")]
    #[serde(default)]
    pub ended_timestamp: Option<DateTime<Utc>>,
}

/// A message record as the host stores it.
///
/// The host does not validate its records, so everything except the id is
/// optional. A discriminant or timestamp of the wrong shape reads as absent
/// instead of failing the whole record.
#[serde_with::serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: MessageId,
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    #[serde_as(as = "serde_with::DefaultOnError")]
    #[serde(rename = "type", default)]
    pub kind: Option<u64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<RawUser>,
    #[serde(default)]
    pub webhook_id: Option<WebhookId>,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde_as(as = "serde_with::DefaultOnError")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde_as(as = "serde_with::DefaultOnError")]
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tts: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub mention_everyone: bool,
    #[serde(default)]
    pub mentions: Vec<UserId>,
    #[serde(default)]
    pub mention_roles: Vec<RoleId>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub embeds: Vec<Record<RawEmbed>>,
    #[serde(default)]
    pub reactions: Vec<Record<RawReaction>>,
    #[serde(default)]
    pub call: Option<RawCall>,
    #[serde(default)]
    pub message_reference: Option<MessageReference>,
}
