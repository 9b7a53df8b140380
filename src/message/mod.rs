//! Message façades.
//!
//! A [`Message`] is a handle to the single façade of a host record. Its
//! variant is picked once, from the record's `type` discriminant, when the
//! façade is first built; [`Message::variant`] hands out the typed view.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use msgcore::client::http::message_endpoint;
use msgcore::client::PendingOp;
use msgcore::model::channel::ChannelId;
use msgcore::model::message::{MessageId, RawMessage, WebhookId};
use msgcore::model::permission::Permission;
use msgcore::model::snowflake::Snowflake;
use msgcore::model::user::{User, UserId};
use msgcore::model::Record;

use crate::resolve::Related;
use crate::session::{Host, Session};
use crate::Error;

/// Declares a typed view over a [`Message`] of one variant.
macro_rules! message_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(pub(crate) crate::message::Message);

        impl ::std::ops::Deref for $name {
            type Target = crate::message::Message;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$name> for crate::message::Message {
            fn from(view: $name) -> Self {
                view.0
            }
        }
    }
}

mod default;
mod system;

pub use default::DefaultMessage;
pub use system::{
    CallMessage, ChannelIconChangeMessage, ChannelNameChangeMessage, MemberJoinMessage,
    PinnedMessage, RecipientAddMessage, RecipientRemoveMessage,
};

/// What kind of message a record is, decoded from its discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    Default,
    RecipientAdd,
    RecipientRemove,
    Call,
    ChannelNameChange,
    ChannelIconChange,
    ChannelPinnedMessage,
    GuildMemberJoin,
    /// Any other discriminant, or none at all.
    Unknown(Option<u64>),
}

impl MessageType {
    pub fn from_discriminant(discriminant: Option<u64>) -> Self {
        match discriminant {
            Some(0) => Self::Default,
            Some(1) => Self::RecipientAdd,
            Some(2) => Self::RecipientRemove,
            Some(3) => Self::Call,
            Some(4) => Self::ChannelNameChange,
            Some(5) => Self::ChannelIconChange,
            Some(6) => Self::ChannelPinnedMessage,
            Some(7) => Self::GuildMemberJoin,
            other => Self::Unknown(other),
        }
    }

    /// The rendered type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::RecipientAdd => "RECIPIENT_ADD",
            Self::RecipientRemove => "RECIPIENT_REMOVE",
            Self::Call => "CALL",
            Self::ChannelNameChange => "CHANNEL_NAME_CHANGE",
            Self::ChannelIconChange => "CHANNEL_ICON_CHANGE",
            Self::ChannelPinnedMessage => "CHANNEL_PINNED_MESSAGE",
            Self::GuildMemberJoin => "GUILD_MEMBER_JOIN",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn is_deletable(self) -> bool {
        matches!(self, Self::Default | Self::ChannelPinnedMessage | Self::GuildMemberJoin)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) struct MessageInner {
    session: Session,
    /// Swapped out when an edit hands back a new record.
    record: RefCell<Record<RawMessage>>,
    kind: MessageType,
}

/// The façade of a message record.
///
/// Equality is identity: two handles are equal iff they point at the same
/// façade.
#[derive(Clone)]
pub struct Message(Rc<MessageInner>);

/// A message façade viewed as its variant.
#[derive(Clone, Debug)]
pub enum MessageVariant {
    Default(DefaultMessage),
    RecipientAdd(RecipientAddMessage),
    RecipientRemove(RecipientRemoveMessage),
    Call(CallMessage),
    ChannelNameChange(ChannelNameChangeMessage),
    ChannelIconChange(ChannelIconChangeMessage),
    ChannelPinnedMessage(PinnedMessage),
    GuildMemberJoin(MemberJoinMessage),
    Generic(Message),
}

impl Message {
    /// Returns the façade of `record`, building one of the type its
    /// discriminant names if the record has none yet. A record that already
    /// has a façade gets it back unchanged.
    pub fn from_raw(session: &Session, record: Record<RawMessage>) -> Self {
        let kind = MessageType::from_discriminant(record.borrow().kind);

        let inner = session.wrap_message(&record, || {
            if let MessageType::Unknown(Some(d)) = kind {
                log::warn!("unknown message type {d}, using a generic façade");
            }
            log::debug!("new {kind} façade for message {}", record.borrow().id);
            MessageInner {
                session: session.clone(),
                record: RefCell::new(record.clone()),
                kind,
            }
        });

        Self(inner)
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// The record this façade currently reads from.
    pub fn record(&self) -> Record<RawMessage> {
        self.0.record.borrow().clone()
    }

    pub(crate) fn with_raw<T>(&self, f: impl FnOnce(&RawMessage) -> T) -> T {
        let record = self.record();
        let raw = record.borrow();
        f(&raw)
    }

    pub(crate) fn host(&self) -> &Host {
        self.0.session.host()
    }

    /// Points the façade at `record` and registers it there. The entry of the
    /// previous record is kept, so stale references to it still resolve here.
    pub(crate) fn rebind(&self, record: Record<RawMessage>) {
        *self.0.record.borrow_mut() = record.clone();
        self.0.session.register_message(&record, &self.0);
        log::debug!("message {} rebound to a new record", self.id());
    }

    pub fn kind(&self) -> MessageType {
        self.0.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.0.kind.name()
    }

    pub fn variant(&self) -> MessageVariant {
        let message = self.clone();
        match self.kind() {
            MessageType::Default => MessageVariant::Default(DefaultMessage(message)),
            MessageType::RecipientAdd => MessageVariant::RecipientAdd(RecipientAddMessage(message)),
            MessageType::RecipientRemove => {
                MessageVariant::RecipientRemove(RecipientRemoveMessage(message))
            },
            MessageType::Call => MessageVariant::Call(CallMessage(message)),
            MessageType::ChannelNameChange => {
                MessageVariant::ChannelNameChange(ChannelNameChangeMessage(message))
            },
            MessageType::ChannelIconChange => {
                MessageVariant::ChannelIconChange(ChannelIconChangeMessage(message))
            },
            MessageType::ChannelPinnedMessage => {
                MessageVariant::ChannelPinnedMessage(PinnedMessage(message))
            },
            MessageType::GuildMemberJoin => MessageVariant::GuildMemberJoin(MemberJoinMessage(message)),
            MessageType::Unknown(_) => MessageVariant::Generic(message),
        }
    }

    pub fn as_default(&self) -> Option<DefaultMessage> {
        match self.variant() {
            MessageVariant::Default(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn id(&self) -> MessageId {
        self.with_raw(|raw| raw.id)
    }

    pub fn nonce(&self) -> Option<String> {
        self.with_raw(|raw| raw.nonce.clone())
    }

    /// When the message was sent. Falls back to the id's creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.with_raw(|raw| raw.timestamp.unwrap_or_else(|| raw.id.timestamp()))
    }

    pub fn webhook_id(&self) -> Option<WebhookId> {
        self.with_raw(|raw| raw.webhook_id)
    }

    /// The id of the user who sent the message. Webhook messages have none.
    pub fn author_id(&self) -> Option<UserId> {
        self.with_raw(|raw| match raw.webhook_id {
            Some(_) => None,
            None => raw.author.as_ref().map(|a| a.id),
        })
    }

    pub fn author(&self) -> Option<User> {
        self.host().directory.user(self.author_id()?)
    }

    /// Whether the current user sent this message.
    pub fn is_own(&self) -> bool {
        match (self.host().directory.current_user_id(), self.author_id()) {
            (Some(me), Some(author)) => me == author,
            _ => false,
        }
    }

    pub fn is_deletable(&self) -> bool {
        self.kind().is_deletable()
    }

    pub(crate) fn ensure_own(&self, operation: &'static str) -> Result<(), Error> {
        match self.is_own() {
            true => Ok(()),
            false => Err(Error::Authorization { operation }),
        }
    }

    /// The endpoint deletes and edits of this message go to.
    pub fn endpoint(&self) -> Result<String, Error> {
        let channel_id = self.channel_id().ok_or(Error::MissingChannel)?;
        Ok(message_endpoint(channel_id, self.id()))
    }

    /// Asks the host to delete the message.
    ///
    /// Anyone may delete their own messages. Other people's messages need the
    /// current user to own the channel or to hold
    /// [`Permission::ManageMessages`] in it. Every check happens before the
    /// request is issued; the returned operation yields the network result
    /// untouched.
    pub fn delete(&self) -> Result<PendingOp<'static, ()>, Error> {
        let endpoint = self.check_delete()?;
        log::debug!("deleting {endpoint}");
        Ok(self.host().network.delete(&endpoint))
    }

    /// Whether [`Message::delete`] would issue a request.
    pub fn can_delete(&self) -> bool {
        self.check_delete().is_ok()
    }

    fn check_delete(&self) -> Result<String, Error> {
        if !self.is_deletable() {
            return Err(Error::UnsupportedOperation {
                kind: self.kind(),
                operation: "delete",
            });
        }

        let endpoint = self.endpoint()?;

        if !self.is_own() {
            let channel = self
                .channel()
                .ok_or(Error::Authorization { operation: "delete" })?;
            let me = self.host().directory.current_user_id();
            let owns_channel = me.is_some() && channel.owner_id == me;

            if !owns_channel {
                self.host()
                    .permissions
                    .assert_permission(&channel, Permission::ManageMessages)?;
            }
        }

        Ok(endpoint)
    }

    /// Scrolls the UI to this message.
    pub fn jump_to(&self, flash: bool) {
        let id = self.id();
        match self.channel_id() {
            Some(channel_id) => self.host().ui.jump_to_message(channel_id, id, flash),
            None => log::warn!("cannot jump to message {id} without a channel"),
        }
    }
}

impl Related for Message {
    fn session(&self) -> &Session {
        &self.0.session
    }

    fn channel_id(&self) -> Option<ChannelId> {
        self.with_raw(|raw| raw.channel_id)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for Message {}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// One line per message: type, author, content and flags.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let author = self
            .author()
            .map(|u| u.tag())
            .or_else(|| self.webhook_id().map(|id| format!("webhook {id}")))
            .unwrap_or_else(|| "unknown".to_string());

        write!(f, "[{}] {} {}", self.timestamp().format("%Y-%m-%d %H:%M"), self.kind(), author)?;

        if let Some(msg) = self.as_default() {
            write!(f, ": {}", msg.content().unwrap_or_default())?;
            if msg.edited() {
                f.write_str(" (edited)")?;
            }
        }

        Ok(())
    }
}
