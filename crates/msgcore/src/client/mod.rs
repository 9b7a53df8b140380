//! Contracts of the host services the façade layer consumes.
//!
//! The host owns every record; these traits only let callers look things up
//! and ask the host to act. [`store::MemoryStore`] and [`http::Http`] are
//! ready-made implementations.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::channel::{Channel, ChannelId};
use crate::model::guild::{Guild, GuildId, Role, RoleId};
use crate::model::message::{MessageId, RawMessage};
use crate::model::permission::Permission;
use crate::model::user::{User, UserId};
use crate::model::Record;

pub mod gateway;
pub mod http;
pub mod store;

/// An in-flight network operation. Everything runs on the host's event loop,
/// so these are not required to be `Send`.
pub type PendingOp<'a, T> = LocalBoxFuture<'a, Result<T, http::Error>>;

/// Access to the host's message records.
pub trait MessageStore {
    /// Looks up the live record of a message in a channel.
    fn find_message(&self, channel_id: ChannelId, message_id: MessageId)
                    -> Option<Record<RawMessage>>;

    /// Hands `revision` (the server's answer to an edit) to the host and
    /// returns the record the host now treats as canonical for that message.
    /// If the message is gone by then, the returned record is detached and
    /// the host does not store it.
    fn canonical_after_edit(&self, channel_id: ChannelId, message_id: MessageId,
                            revision: RawMessage) -> Record<RawMessage>;
}

/// Lookup of channels, guilds, users and roles.
pub trait Directory {
    fn channel(&self, id: ChannelId) -> Option<Channel>;
    fn guild(&self, id: GuildId) -> Option<Guild>;
    fn user(&self, id: UserId) -> Option<User>;

    fn role(&self, guild_id: GuildId, role_id: RoleId) -> Option<Role> {
        self.guild(guild_id)?.role(role_id).cloned()
    }

    /// The user the client is logged in as.
    fn current_user_id(&self) -> Option<UserId>;
}

/// The host's REST dispatcher.
pub trait Network {
    fn delete(&self, endpoint: &str) -> PendingOp<'static, ()>;
    fn patch(&self, endpoint: &str, body: &ParsedContent) -> PendingOp<'static, RawMessage>;
}

/// The body of a message edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,
}

impl ParsedContent {
    /// Content sent as typed, without any parsing.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tts: false,
        }
    }
}

/// Turns what the user typed into an edit payload (mentions, emoji
/// shortcodes and so on).
pub trait ContentParser {
    fn parse(&self, record: &RawMessage, input: &str) -> ParsedContent;
}

/// A parser that sends input as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainParser;

impl ContentParser for PlainParser {
    fn parse(&self, _record: &RawMessage, input: &str) -> ParsedContent {
        ParsedContent::plain(input)
    }
}

/// UI-side message actions.
pub trait UiActions {
    fn jump_to_message(&self, channel_id: ChannelId, message_id: MessageId, flash: bool);
    fn start_edit_message(&self, channel_id: ChannelId, message_id: MessageId, seed: &str);
    fn end_edit_message(&self);
}

/// UI actions for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUi;

impl UiActions for NoUi {
    fn jump_to_message(&self, channel_id: ChannelId, message_id: MessageId, _flash: bool) {
        log::debug!("no UI to jump to {channel_id}/{message_id}");
    }

    fn start_edit_message(&self, _channel_id: ChannelId, _message_id: MessageId, _seed: &str) {}

    fn end_edit_message(&self) {}
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("missing permission {permission} in channel {channel_id}")]
pub struct PermissionError {
    pub permission: Permission,
    pub channel_id: ChannelId,
}

pub trait PermissionCheck {
    /// Fails unless the current user holds `permission` in `channel`.
    fn assert_permission(&self, channel: &Channel, permission: Permission)
                         -> Result<(), PermissionError>;
}
