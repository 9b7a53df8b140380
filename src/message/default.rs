use chrono::{DateTime, Utc};
use msgcore::client::ParsedContent;
use msgcore::model::guild::Role;
use msgcore::model::message::Attachment;
use msgcore::model::user::User;

use crate::embed::Embed;
use crate::reaction::Reaction;
use crate::resolve::{self, Related};
use crate::Error;

message_view!(
    /// A regular user message, the only kind that can be edited.
    DefaultMessage
);

impl DefaultMessage {
    pub fn content(&self) -> Option<String> {
        self.with_raw(|raw| raw.content.clone())
    }

    pub fn attachments(&self) -> Vec<Attachment> {
        self.with_raw(|raw| raw.attachments.clone())
    }

    pub fn embeds(&self) -> Vec<Embed> {
        let (records, id, channel_id) =
            self.with_raw(|raw| (raw.embeds.clone(), raw.id, raw.channel_id));
        let session = self.session();

        records
            .into_iter()
            .map(|record| session.embed(record, id, channel_id))
            .collect()
    }

    pub fn reactions(&self) -> Vec<Reaction> {
        let (records, id, channel_id) =
            self.with_raw(|raw| (raw.reactions.clone(), raw.id, raw.channel_id));
        let session = self.session();

        records
            .into_iter()
            .map(|record| session.reaction(record, id, channel_id))
            .collect()
    }

    /// Mentioned users, in mention order. Users the directory does not know
    /// stay in the list as `None`.
    pub fn mentions(&self) -> Vec<Option<User>> {
        let ids = self.with_raw(|raw| raw.mentions.clone());
        resolve::users(self.session(), &ids)
    }

    /// Mentioned roles, in mention order, with `None` for roles that do not
    /// resolve in this message's guild.
    pub fn mention_roles(&self) -> Vec<Option<Role>> {
        let ids = self.with_raw(|raw| raw.mention_roles.clone());
        resolve::roles(self.session(), self.guild_id(), &ids)
    }

    pub fn mention_everyone(&self) -> bool {
        self.with_raw(|raw| raw.mention_everyone)
    }

    pub fn edited_timestamp(&self) -> Option<DateTime<Utc>> {
        self.with_raw(|raw| raw.edited_timestamp)
    }

    pub fn edited(&self) -> bool {
        self.edited_timestamp().is_some()
    }

    pub fn pinned(&self) -> bool {
        self.with_raw(|raw| raw.pinned)
    }

    pub fn tts(&self) -> bool {
        self.with_raw(|raw| raw.tts)
    }

    /// Replaces the message's content. Only the author may edit.
    ///
    /// With `parse` set, `content` goes through the host's content parser
    /// first. Once the host accepts the edit the façade is rebound to the
    /// record the store hands back, so later reads see the new content.
    pub async fn edit(&self, content: &str, parse: bool) -> Result<(), Error> {
        self.ensure_own("edit")?;
        let endpoint = self.endpoint()?;
        let (channel_id, id) = (self.channel_id().ok_or(Error::MissingChannel)?, self.id());

        let body = match parse {
            true => self.with_raw(|raw| self.host().parser.parse(raw, content)),
            false => ParsedContent::plain(content),
        };

        let revision = self.host().network.patch(&endpoint, &body).await?;
        let fresh = self.host().store.canonical_after_edit(channel_id, id, revision);
        self.rebind(fresh);

        Ok(())
    }

    /// Opens the UI editor on this message, seeded with `content` or the
    /// current content.
    pub fn start_edit(&self, content: Option<&str>) -> Result<(), Error> {
        self.ensure_own("edit")?;
        let channel_id = self.channel_id().ok_or(Error::MissingChannel)?;

        let seed = match content {
            Some(content) => content.to_string(),
            None => self.content().unwrap_or_default(),
        };
        self.host().ui.start_edit_message(channel_id, self.id(), &seed);

        Ok(())
    }

    pub fn end_edit(&self) -> Result<(), Error> {
        self.ensure_own("edit")?;
        self.host().ui.end_edit_message();
        Ok(())
    }
}
