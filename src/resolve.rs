//! Relationships every façade can resolve through the host's directory.
//!
//! An id that does not resolve yields `None` at that step and every step
//! after it; none of these lookups fail.

use msgcore::model::channel::{Channel, ChannelId};
use msgcore::model::guild::{Guild, GuildId, Role, RoleId};
use msgcore::model::message::MessageId;
use msgcore::model::user::{User, UserId};

use crate::message::Message;
use crate::session::Session;

pub trait Related {
    fn session(&self) -> &Session;

    /// The id of the channel this façade lives in, as stored on the record.
    fn channel_id(&self) -> Option<ChannelId>;

    fn channel(&self) -> Option<Channel> {
        self.session().host().directory.channel(self.channel_id()?)
    }

    fn guild_id(&self) -> Option<GuildId> {
        self.channel()?.guild_id
    }

    fn guild(&self) -> Option<Guild> {
        self.session().host().directory.guild(self.guild_id()?)
    }
}

/// Façades that only exist as part of a message.
pub trait Attached: Related {
    fn message_id(&self) -> MessageId;

    /// The owning message, looked up in the owning channel.
    fn message(&self) -> Option<Message> {
        let channel = self.channel()?;
        self.session().find_message(channel.id, self.message_id())
    }
}

/// Resolves each id, keeping a `None` in place of any that do not resolve so
/// the result lines up with `ids`.
pub(crate) fn users(session: &Session, ids: &[UserId]) -> Vec<Option<User>> {
    let directory = &session.host().directory;
    ids.iter().map(|&id| directory.user(id)).collect()
}

/// Like [`users`], for roles of `guild_id`. Without a guild nothing resolves.
pub(crate) fn roles(session: &Session, guild_id: Option<GuildId>, ids: &[RoleId])
                    -> Vec<Option<Role>> {
    let directory = &session.host().directory;
    ids.iter()
        .map(|&id| guild_id.and_then(|guild_id| directory.role(guild_id, id)))
        .collect()
}
