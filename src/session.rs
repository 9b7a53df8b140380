use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use msgcore::client::{
    ContentParser, Directory, MessageStore, Network, NoUi, PermissionCheck, PlainParser, UiActions,
};
use msgcore::model::channel::ChannelId;
use msgcore::model::embed::RawEmbed;
use msgcore::model::message::{MessageId, RawMessage};
use msgcore::model::reaction::RawReaction;
use msgcore::model::Record;

use crate::cache::IdentityCache;
use crate::embed::{Embed, EmbedInner};
use crate::message::{Message, MessageInner};
use crate::reaction::{Reaction, ReactionInner};

/// The host services façades read from and act through.
#[derive(Clone)]
pub struct Host {
    pub store: Rc<dyn MessageStore>,
    pub directory: Rc<dyn Directory>,
    pub network: Rc<dyn Network>,
    pub parser: Rc<dyn ContentParser>,
    pub ui: Rc<dyn UiActions>,
    pub permissions: Rc<dyn PermissionCheck>,
}

impl Host {
    /// Uses `store` for records, lookups and permission checks, with plain
    /// content parsing and no UI.
    pub fn from_store<S>(store: Rc<S>, network: Rc<dyn Network>) -> Self
    where
        S: MessageStore + Directory + PermissionCheck + 'static,
    {
        Self {
            store: store.clone(),
            directory: store.clone(),
            network,
            parser: Rc::new(PlainParser),
            ui: Rc::new(NoUi),
            permissions: store,
        }
    }

    pub fn parser(self, parser: Rc<dyn ContentParser>) -> Self {
        Self { parser, ..self }
    }

    pub fn ui(self, ui: Rc<dyn UiActions>) -> Self {
        Self { ui, ..self }
    }

    pub fn permissions(self, permissions: Rc<dyn PermissionCheck>) -> Self {
        Self { permissions, ..self }
    }
}

struct SessionInner {
    host: Host,
    messages: RefCell<IdentityCache<RawMessage, MessageInner>>,
    embeds: RefCell<IdentityCache<RawEmbed, EmbedInner>>,
    reactions: RefCell<IdentityCache<RawReaction, ReactionInner>>,
}

/// Owns the identity caches of one host. Cloning is cheap and yields a
/// handle to the same caches.
#[derive(Clone)]
pub struct Session(Rc<SessionInner>);

impl Session {
    pub fn new(host: Host) -> Self {
        Self(Rc::new(SessionInner {
            host,
            messages: Default::default(),
            embeds: Default::default(),
            reactions: Default::default(),
        }))
    }

    pub fn host(&self) -> &Host {
        &self.0.host
    }

    /// Wraps a message record in the façade of its type.
    /// See [`Message::from_raw`].
    pub fn message(&self, record: Record<RawMessage>) -> Message {
        Message::from_raw(self, record)
    }

    /// Looks a message up in the store and wraps it.
    pub fn find_message(&self, channel_id: ChannelId, message_id: MessageId) -> Option<Message> {
        let record = self.host().store.find_message(channel_id, message_id)?;
        Some(self.message(record))
    }

    pub(crate) fn wrap_message(&self, record: &Record<RawMessage>,
                               make: impl FnOnce() -> MessageInner) -> Rc<MessageInner> {
        self.0.messages.borrow_mut().wrap(record, make)
    }

    /// Registers `facade` under a record it was rebound to.
    pub(crate) fn register_message(&self, record: &Record<RawMessage>, facade: &Rc<MessageInner>) {
        self.0.messages.borrow_mut().insert(record, facade);
    }

    pub(crate) fn embed(&self, record: Record<RawEmbed>, message_id: MessageId,
                        channel_id: Option<ChannelId>) -> Embed {
        let inner = self.0.embeds.borrow_mut().wrap(&record, || {
            EmbedInner::new(self.clone(), record.clone(), message_id, channel_id)
        });
        Embed::from_inner(inner)
    }

    pub(crate) fn reaction(&self, record: Record<RawReaction>, message_id: MessageId,
                           channel_id: Option<ChannelId>) -> Reaction {
        let inner = self.0.reactions.borrow_mut().wrap(&record, || {
            ReactionInner::new(self.clone(), record.clone(), message_id, channel_id)
        });
        Reaction::from_inner(inner)
    }

    /// Entry counts of the message, embed and reaction caches.
    pub fn cache_sizes(&self) -> (usize, usize, usize) {
        (
            self.0.messages.borrow().len(),
            self.0.embeds.borrow().len(),
            self.0.reactions.borrow().len(),
        )
    }

    /// Drops cache entries of records and façades that are gone.
    pub fn sweep(&self) {
        self.0.messages.borrow_mut().sweep();
        self.0.embeds.borrow_mut().sweep();
        self.0.reactions.borrow_mut().sweep();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (messages, embeds, reactions) = self.cache_sizes();
        f.debug_struct("Session")
            .field("messages", &messages)
            .field("embeds", &embeds)
            .field("reactions", &reactions)
            .finish_non_exhaustive()
    }
}
