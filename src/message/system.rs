//! Views of the messages the host posts on its own: recipient changes, calls,
//! group renames, pins and joins.

use chrono::{DateTime, Utc};
use msgcore::model::user::{User, UserId};

use super::Message;
use crate::resolve::{self, Related};

message_view!(
    /// Someone was added to a group DM.
    RecipientAddMessage
);

message_view!(
    /// Someone left or was removed from a group DM.
    RecipientRemoveMessage
);

message_view!(CallMessage);

message_view!(
    /// A group DM was renamed.
    ChannelNameChangeMessage
);

message_view!(ChannelIconChangeMessage);

message_view!(
    /// A notice that a message was pinned.
    PinnedMessage
);

message_view!(
    /// A welcome notice. The author is the member who joined.
    MemberJoinMessage
);

fn first_mention(message: &Message) -> Option<UserId> {
    message.with_raw(|raw| raw.mentions.first().copied())
}

impl RecipientAddMessage {
    pub fn added_user(&self) -> Option<User> {
        self.host().directory.user(first_mention(self)?)
    }
}

impl RecipientRemoveMessage {
    pub fn removed_user(&self) -> Option<User> {
        self.host().directory.user(first_mention(self)?)
    }

    /// Whether the user left on their own rather than being removed.
    pub fn user_left(&self) -> bool {
        match (self.author_id(), first_mention(self)) {
            (Some(author), Some(removed)) => author == removed,
            _ => false,
        }
    }
}

impl CallMessage {
    /// Call participants, with `None` for users the directory does not know.
    pub fn participants(&self) -> Vec<Option<User>> {
        let ids = self.with_raw(|raw| {
            raw.call
                .as_ref()
                .map(|call| call.participants.clone())
                .unwrap_or_default()
        });
        resolve::users(self.session(), &ids)
    }

    pub fn ended_timestamp(&self) -> Option<DateTime<Utc>> {
        self.with_raw(|raw| raw.call.as_ref()?.ended_timestamp)
    }

    pub fn is_active(&self) -> bool {
        self.ended_timestamp().is_none()
    }

    /// Whether the current user was not part of the call.
    pub fn missed(&self) -> bool {
        let Some(me) = self.host().directory.current_user_id() else {
            return false
        };

        self.with_raw(|raw| {
            raw.call
                .as_ref()
                .is_some_and(|call| !call.participants.contains(&me))
        })
    }
}

impl ChannelNameChangeMessage {
    pub fn new_name(&self) -> Option<String> {
        self.with_raw(|raw| raw.content.clone())
    }
}

impl PinnedMessage {
    /// The message that was pinned, if the host still has it.
    pub fn pinned_message(&self) -> Option<Message> {
        let (channel_id, message_id) = self.with_raw(|raw| {
            let reference = raw.message_reference.as_ref()?;
            Some((reference.channel_id.or(raw.channel_id)?, reference.message_id?))
        })?;
        self.session().find_message(channel_id, message_id)
    }
}

impl MemberJoinMessage {
    pub fn joined_user(&self) -> Option<User> {
        self.author()
    }
}

#[cfg(test)]
mod tests {
    use msgcore::model::record;
    use msgcore::model::message::RawMessage;

    use crate::message::MessageVariant;
    use crate::testing::Harness;
    use super::*;

    #[test]
    fn test_recipient_add() {
        let h = Harness::new();
        let MessageVariant::RecipientAdd(msg) = h.message(11, 1006).variant() else {
            panic!("not a recipient add message")
        };
        assert_eq!(msg.added_user().map(|u| u.username), Some("them".to_string()));
    }

    #[test]
    fn test_recipient_remove() {
        let h = Harness::new();
        let MessageVariant::RecipientRemove(msg) = h.message(11, 1007).variant() else {
            panic!("not a recipient remove message")
        };
        assert_eq!(msg.removed_user().map(|u| u.id), Some(UserId(200)));
        assert!(msg.user_left());
    }

    #[test]
    fn test_recipient_without_mentions() {
        let h = Harness::new();
        let raw = record(RawMessage { kind: Some(1), ..Default::default() });
        let MessageVariant::RecipientAdd(msg) = h.session.message(raw).variant() else {
            panic!("not a recipient add message")
        };
        assert!(msg.added_user().is_none());
    }

    #[test]
    fn test_call() {
        let h = Harness::new();
        let MessageVariant::Call(msg) = h.message(11, 1008).variant() else {
            panic!("not a call message")
        };

        let participants = msg.participants();
        assert_eq!(participants.len(), 3);
        assert_eq!(participants[0].as_ref().map(|u| u.id), Some(UserId(200)));
        assert!(participants[2].is_none());
        assert!(msg.missed());
        assert!(!msg.is_active());
    }

    #[test]
    fn test_channel_name_change() {
        let h = Harness::new();
        let MessageVariant::ChannelNameChange(msg) = h.message(11, 1009).variant() else {
            panic!("not a name change message")
        };
        assert_eq!(msg.new_name().as_deref(), Some("cat pile"));
    }

    #[test]
    fn test_pinned_message() {
        let h = Harness::new();
        let MessageVariant::ChannelPinnedMessage(msg) = h.message(10, 1005).variant() else {
            panic!("not a pin notice")
        };
        let pinned = msg.pinned_message().expect("pinned message missing");
        assert_eq!(pinned, h.message(10, 1001));
    }

    #[test]
    fn test_member_join() {
        let h = Harness::new();
        let MessageVariant::GuildMemberJoin(msg) = h.message(10, 1010).variant() else {
            panic!("not a join message")
        };
        assert_eq!(msg.joined_user().map(|u| u.username), Some("new".to_string()));
        assert!(msg.is_deletable());
    }
}
