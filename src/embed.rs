use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use msgcore::model::channel::ChannelId;
use msgcore::model::embed::{
    EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, EmbedProvider, RawEmbed,
};
use msgcore::model::message::MessageId;
use msgcore::model::Record;

use crate::resolve::{Attached, Related};
use crate::session::Session;

pub(crate) struct EmbedInner {
    session: Session,
    record: Record<RawEmbed>,
    message_id: MessageId,
    channel_id: Option<ChannelId>,
}

impl EmbedInner {
    pub(crate) fn new(session: Session, record: Record<RawEmbed>, message_id: MessageId,
                      channel_id: Option<ChannelId>) -> Self {
        Self { session, record, message_id, channel_id }
    }
}

/// The façade of an embed record. Embeds are only reachable through the
/// message that carries them.
#[derive(Clone)]
pub struct Embed(Rc<EmbedInner>);

impl Embed {
    pub(crate) fn from_inner(inner: Rc<EmbedInner>) -> Self {
        Self(inner)
    }

    pub fn record(&self) -> Record<RawEmbed> {
        self.0.record.clone()
    }

    fn with_raw<T>(&self, f: impl FnOnce(&RawEmbed) -> T) -> T {
        f(&self.0.record.borrow())
    }

    pub fn title(&self) -> Option<String> {
        self.with_raw(|raw| raw.title.clone())
    }

    /// The embed type, e.g. `rich`, `image` or `link`.
    pub fn kind(&self) -> Option<String> {
        self.with_raw(|raw| raw.kind.clone())
    }

    pub fn description(&self) -> Option<String> {
        self.with_raw(|raw| raw.description.clone())
    }

    pub fn url(&self) -> Option<String> {
        self.with_raw(|raw| raw.url.clone())
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.with_raw(|raw| raw.timestamp)
    }

    pub fn color(&self) -> Option<u32> {
        self.with_raw(|raw| raw.color)
    }

    pub fn footer(&self) -> Option<EmbedFooter> {
        self.with_raw(|raw| raw.footer.clone())
    }

    pub fn image(&self) -> Option<EmbedMedia> {
        self.with_raw(|raw| raw.image.clone())
    }

    pub fn thumbnail(&self) -> Option<EmbedMedia> {
        self.with_raw(|raw| raw.thumbnail.clone())
    }

    pub fn video(&self) -> Option<EmbedMedia> {
        self.with_raw(|raw| raw.video.clone())
    }

    pub fn provider(&self) -> Option<EmbedProvider> {
        self.with_raw(|raw| raw.provider.clone())
    }

    pub fn author(&self) -> Option<EmbedAuthor> {
        self.with_raw(|raw| raw.author.clone())
    }

    pub fn fields(&self) -> Vec<EmbedField> {
        self.with_raw(|raw| raw.fields.clone())
    }
}

impl Related for Embed {
    fn session(&self) -> &Session {
        &self.0.session
    }

    fn channel_id(&self) -> Option<ChannelId> {
        self.0.channel_id
    }
}

impl Attached for Embed {
    fn message_id(&self) -> MessageId {
        self.0.message_id
    }
}

impl PartialEq for Embed {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Embed {}

impl fmt::Debug for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Embed")
            .field("message_id", &self.0.message_id)
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}
