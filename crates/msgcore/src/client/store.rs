use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{Directory, MessageStore, PermissionCheck, PermissionError};
use crate::model::channel::{Channel, ChannelId};
use crate::model::guild::{Guild, GuildId};
use crate::model::message::{MessageId, RawMessage};
use crate::model::permission::Permission;
use crate::model::user::{User, UserId};
use crate::model::{record, Record};
use crate::Error;

/// Everything a [`MemoryStore`] can be seeded with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub current_user: Option<UserId>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub guilds: Vec<Guild>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
    /// Channels where the current user may manage messages.
    #[serde(default)]
    pub manage_messages: Vec<ChannelId>,
}

/// A host store kept in memory.
///
/// Records are never patched in place: every update swaps in a new
/// allocation, so façades bound to the old record keep seeing the old data
/// until they are rebound.
#[derive(Default)]
pub struct MemoryStore {
    current_user: RefCell<Option<UserId>>,
    users: RefCell<HashMap<UserId, User>>,
    guilds: RefCell<HashMap<GuildId, Guild>>,
    channels: RefCell<HashMap<ChannelId, Channel>>,
    messages: RefCell<HashMap<ChannelId, Vec<Record<RawMessage>>>>,
    manage_messages: RefCell<HashSet<ChannelId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Rc<Self> {
        let store = Self::new();
        store.set_current_user(snapshot.current_user);
        snapshot.users.into_iter().for_each(|u| store.insert_user(u));
        snapshot.guilds.into_iter().for_each(|g| store.insert_guild(g));
        snapshot.channels.into_iter().for_each(|c| store.insert_channel(c));
        for message in snapshot.messages {
            if store.upsert_message(message).is_none() {
                log::warn!("skipping snapshot message without a channel");
            }
        }
        store
            .manage_messages
            .borrow_mut()
            .extend(snapshot.manage_messages);

        Rc::new(store)
    }

    pub fn from_json(json: &str) -> Result<Rc<Self>, Error> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    pub fn set_current_user(&self, user: Option<UserId>) {
        *self.current_user.borrow_mut() = user;
    }

    pub fn insert_user(&self, user: User) {
        self.users.borrow_mut().insert(user.id, user);
    }

    pub fn insert_guild(&self, guild: Guild) {
        self.guilds.borrow_mut().insert(guild.id, guild);
    }

    pub fn insert_channel(&self, channel: Channel) {
        self.channels.borrow_mut().insert(channel.id, channel);
    }

    pub fn grant_manage_messages(&self, channel_id: ChannelId) {
        self.manage_messages.borrow_mut().insert(channel_id);
    }

    /// Stores `message` as a fresh record, replacing any record with the same
    /// id. Returns `None` if the message has no channel.
    pub fn upsert_message(&self, message: RawMessage) -> Option<Record<RawMessage>> {
        let channel_id = message.channel_id?;
        Some(self.replace_in(channel_id, message))
    }

    fn replace_in(&self, channel_id: ChannelId, message: RawMessage) -> Record<RawMessage> {
        let id = message.id;
        let new = record(message);

        let mut messages = self.messages.borrow_mut();
        let list = messages.entry(channel_id).or_default();
        match list.iter_mut().find(|r| r.borrow().id == id) {
            Some(slot) => *slot = new.clone(),
            None => list.push(new.clone()),
        }

        new
    }

    pub fn remove_message(&self, channel_id: ChannelId, message_id: MessageId)
                          -> Option<Record<RawMessage>> {
        let mut messages = self.messages.borrow_mut();
        let list = messages.get_mut(&channel_id)?;
        let idx = list.iter().position(|r| r.borrow().id == message_id)?;
        Some(list.remove(idx))
    }

    /// All records of a channel, oldest first.
    pub fn channel_messages(&self, channel_id: ChannelId) -> Vec<Record<RawMessage>> {
        self.messages
            .borrow()
            .get(&channel_id)
            .cloned()
            .unwrap_or_default()
    }

    /// All records, grouped by channel.
    pub fn all_messages(&self) -> Vec<Record<RawMessage>> {
        let messages = self.messages.borrow();
        let mut channels: Vec<_> = messages.keys().copied().collect();
        channels.sort();
        channels
            .into_iter()
            .flat_map(|c| messages[&c].iter().cloned())
            .collect()
    }
}

impl MessageStore for MemoryStore {
    fn find_message(&self, channel_id: ChannelId, message_id: MessageId)
                    -> Option<Record<RawMessage>> {
        self.messages
            .borrow()
            .get(&channel_id)?
            .iter()
            .find(|r| r.borrow().id == message_id)
            .cloned()
    }

    fn canonical_after_edit(&self, channel_id: ChannelId, message_id: MessageId,
                            mut revision: RawMessage) -> Record<RawMessage> {
        revision.id = message_id;
        revision.channel_id = Some(channel_id);

        let Some(old) = self.find_message(channel_id, message_id) else {
            log::debug!("message {message_id} was deleted while being edited");
            return record(revision);
        };

        // the edit response leaves out reactions; keep the ones we have
        if revision.reactions.is_empty() {
            revision.reactions = old.borrow().reactions.clone();
        }

        self.replace_in(channel_id, revision)
    }
}

impl Directory for MemoryStore {
    fn channel(&self, id: ChannelId) -> Option<Channel> {
        self.channels.borrow().get(&id).cloned()
    }

    fn guild(&self, id: GuildId) -> Option<Guild> {
        self.guilds.borrow().get(&id).cloned()
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.users.borrow().get(&id).cloned()
    }

    fn current_user_id(&self) -> Option<UserId> {
        *self.current_user.borrow()
    }
}

impl PermissionCheck for MemoryStore {
    fn assert_permission(&self, channel: &Channel, permission: Permission)
                         -> Result<(), PermissionError> {
        let granted = match permission {
            Permission::ManageMessages => self.manage_messages.borrow().contains(&channel.id),
        };

        match granted {
            true => Ok(()),
            false => Err(PermissionError { permission, channel_id: channel.id }),
        }
    }
}
