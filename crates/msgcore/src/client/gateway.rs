use serde::{Deserialize, Serialize};

use super::store::MemoryStore;
use super::{Directory, MessageStore};
use crate::model::channel::ChannelId;
use crate::model::emoji::Emoji;
use crate::model::message::{MessageId, RawMessage};
use crate::model::reaction::RawReaction;
use crate::model::record;
use crate::model::user::UserId;

/// Gateway events that change message records.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "event", rename_all = "snake_case")]
#[non_exhaustive]
pub enum GatewayEvent {
    MessageCreate { message: RawMessage },
    /// Carries the full, updated message.
    MessageUpdate { message: RawMessage },
    MessageDelete { channel_id: ChannelId, id: MessageId },
    ReactionAdd {
        channel_id: ChannelId,
        message_id: MessageId,
        user_id: UserId,
        emoji: Emoji,
    },
    ReactionRemove {
        channel_id: ChannelId,
        message_id: MessageId,
        user_id: UserId,
        emoji: Emoji,
    },
}

fn same_emoji(a: &Emoji, b: &Emoji) -> bool {
    match (a.id, b.id) {
        (Some(a), Some(b)) => a == b,
        (None, None) => a.name == b.name,
        _ => false,
    }
}

impl MemoryStore {
    /// Applies a gateway event. Returns whether anything changed.
    pub fn apply(&self, event: GatewayEvent) -> bool {
        match event {
            GatewayEvent::MessageCreate { message } | GatewayEvent::MessageUpdate { message } => {
                self.upsert_message(message).is_some()
            },
            GatewayEvent::MessageDelete { channel_id, id } => {
                self.remove_message(channel_id, id).is_some()
            },
            GatewayEvent::ReactionAdd { channel_id, message_id, user_id, emoji } => {
                let Some(msg) = self.find_message(channel_id, message_id) else {
                    return false
                };
                let me = self.is_current_user(user_id);
                let mut updated = msg.borrow().clone();

                let existing = updated
                    .reactions
                    .iter()
                    .position(|r| same_emoji(&r.borrow().emoji, &emoji));
                let reaction = match existing {
                    Some(idx) => {
                        let old = updated.reactions[idx].borrow();
                        RawReaction {
                            emoji: old.emoji.clone(),
                            count: old.count.saturating_add(1),
                            me: old.me || me,
                        }
                    },
                    None => RawReaction { emoji, count: 1, me },
                };
                match existing {
                    Some(idx) => updated.reactions[idx] = record(reaction),
                    None => updated.reactions.push(record(reaction)),
                }

                self.upsert_message(updated).is_some()
            },
            GatewayEvent::ReactionRemove { channel_id, message_id, user_id, emoji } => {
                let Some(msg) = self.find_message(channel_id, message_id) else {
                    return false
                };
                let me = self.is_current_user(user_id);
                let mut updated = msg.borrow().clone();

                let Some(idx) = updated
                    .reactions
                    .iter()
                    .position(|r| same_emoji(&r.borrow().emoji, &emoji))
                else {
                    return false
                };

                let remaining = {
                    let old = updated.reactions[idx].borrow();
                    RawReaction {
                        emoji: old.emoji.clone(),
                        count: old.count.saturating_sub(1),
                        me: old.me && !me,
                    }
                };
                match remaining.count {
                    0 => { updated.reactions.remove(idx); },
                    _ => updated.reactions[idx] = record(remaining),
                }

                self.upsert_message(updated).is_some()
            },
        }
    }

    fn is_current_user(&self, user_id: UserId) -> bool {
        self.current_user_id() == Some(user_id)
    }
}
