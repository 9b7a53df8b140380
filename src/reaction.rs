use std::fmt;
use std::rc::Rc;

use msgcore::model::channel::ChannelId;
use msgcore::model::emoji::Emoji;
use msgcore::model::message::MessageId;
use msgcore::model::reaction::RawReaction;
use msgcore::model::Record;

use crate::resolve::{Attached, Related};
use crate::session::Session;

pub(crate) struct ReactionInner {
    session: Session,
    record: Record<RawReaction>,
    message_id: MessageId,
    channel_id: Option<ChannelId>,
}

impl ReactionInner {
    pub(crate) fn new(session: Session, record: Record<RawReaction>, message_id: MessageId,
                      channel_id: Option<ChannelId>) -> Self {
        Self { session, record, message_id, channel_id }
    }
}

/// The façade of a reaction record on a message.
#[derive(Clone)]
pub struct Reaction(Rc<ReactionInner>);

impl Reaction {
    pub(crate) fn from_inner(inner: Rc<ReactionInner>) -> Self {
        Self(inner)
    }

    pub fn record(&self) -> Record<RawReaction> {
        self.0.record.clone()
    }

    pub fn count(&self) -> u32 {
        self.0.record.borrow().count
    }

    /// Whether the current user is among the reactors.
    pub fn me(&self) -> bool {
        self.0.record.borrow().me
    }

    /// The emoji as stored on the reaction.
    pub fn raw_emoji(&self) -> Emoji {
        self.0.record.borrow().emoji.clone()
    }

    /// The reaction's emoji. Unicode emojis come back as stored; custom
    /// ones are looked up among the guild's emojis and are `None` when the
    /// guild or the emoji cannot be found.
    pub fn emoji(&self) -> Option<Emoji> {
        let raw = self.raw_emoji();
        match raw.id {
            None => Some(raw),
            Some(id) => self.guild()?.emoji(id).cloned(),
        }
    }
}

impl Related for Reaction {
    fn session(&self) -> &Session {
        &self.0.session
    }

    fn channel_id(&self) -> Option<ChannelId> {
        self.0.channel_id
    }
}

impl Attached for Reaction {
    fn message_id(&self) -> MessageId {
        self.0.message_id
    }
}

impl PartialEq for Reaction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Reaction {}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("message_id", &self.0.message_id)
            .field("emoji", &self.raw_emoji())
            .field("count", &self.count())
            .finish_non_exhaustive()
    }
}
