//! Recording collaborators and a seeded host for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::Utc;
use futures::future;
use msgcore::client::http::{Error as HttpError, StatusCode};
use msgcore::client::store::MemoryStore;
use msgcore::client::{ContentParser, Network, ParsedContent, PendingOp, UiActions};
use msgcore::model::channel::ChannelId;
use msgcore::model::message::{MessageId, RawMessage};

use crate::message::Message;
use crate::session::{Host, Session};

/// Users 100 (current), 200, 300 and 400; guild 1 with emoji 500 and role
/// 600. Channel 10 is a guild channel, 11 a group DM owned by 100, 12 a group
/// DM owned by 200, 13 a guild channel where 100 may manage messages.
pub const SNAPSHOT: &str = r#"{
    "current_user": "100",
    "users": [
        {"id": "100", "username": "me"},
        {"id": "200", "username": "them"},
        {"id": "300", "username": "other"},
        {"id": "400", "username": "new"}
    ],
    "guilds": [
        {"id": "1", "name": "cats", "owner_id": "200",
         "emojis": [{"id": "500", "name": "blobcat"}],
         "roles": [{"id": "600", "name": "mods"}]}
    ],
    "channels": [
        {"id": "10", "guild_id": "1", "name": "general"},
        {"id": "11", "owner_id": "100", "type": 3},
        {"id": "12", "owner_id": "200", "type": 3},
        {"id": "13", "guild_id": "1", "name": "mods-only"}
    ],
    "manage_messages": ["13"],
    "messages": [
        {"id": "1000", "channel_id": "10", "type": 0, "content": "hi",
         "author": {"id": "100"},
         "mentions": ["200", "999"], "mention_roles": ["600", "601"],
         "embeds": [{"title": "cat facts", "type": "rich",
                     "fields": [{"name": "legs", "value": "4"}]}],
         "reactions": [
            {"emoji": {"name": "🐱"}, "count": 2, "me": true},
            {"emoji": {"id": "500", "name": "blobcat"}, "count": 1},
            {"emoji": {"id": "501", "name": "gone"}, "count": 1}
         ]},
        {"id": "1001", "channel_id": "10", "type": 0, "content": "yo",
         "author": {"id": "200"}},
        {"id": "1002", "channel_id": "11", "type": 0, "content": "a",
         "author": {"id": "200"}},
        {"id": "1003", "channel_id": "13", "type": 0, "content": "b",
         "author": {"id": "200"}},
        {"id": "1004", "channel_id": "12", "type": 0, "content": "c",
         "author": {"id": "300"}},
        {"id": "1005", "channel_id": "10", "type": 6, "author": {"id": "100"},
         "message_reference": {"message_id": "1001", "channel_id": "10"}},
        {"id": "1006", "channel_id": "11", "type": 1, "author": {"id": "100"},
         "mentions": ["200"]},
        {"id": "1007", "channel_id": "11", "type": 2, "author": {"id": "200"},
         "mentions": ["200"]},
        {"id": "1008", "channel_id": "11", "type": 3, "author": {"id": "200"},
         "call": {"participants": ["200", "300", "999"],
                  "ended_timestamp": "2024-05-01T12:00:00Z"}},
        {"id": "1009", "channel_id": "11", "type": 4, "content": "cat pile",
         "author": {"id": "100"}},
        {"id": "1010", "channel_id": "10", "type": 7, "author": {"id": "400"}},
        {"id": "1011", "channel_id": "10", "type": 99, "author": {"id": "100"}},
        {"id": "1012", "channel_id": "10", "type": 0, "content": "hook",
         "webhook_id": "77", "author": {"id": "100"}},
        {"id": "1013", "channel_id": "99", "type": 0, "content": "lost",
         "author": {"id": "999"}, "mention_roles": ["600"]}
    ]
}"#;

#[derive(Debug, Clone, PartialEq)]
pub enum NetCall {
    Delete(String),
    Patch(String, ParsedContent),
}

/// Records requests and answers them immediately. Patches echo the new
/// content back as an edited message.
#[derive(Default)]
pub struct RecordingNetwork {
    calls: RefCell<Vec<NetCall>>,
    fail_with: Cell<Option<StatusCode>>,
}

impl RecordingNetwork {
    pub fn calls(&self) -> Vec<NetCall> {
        self.calls.borrow().clone()
    }

    /// Makes every following request fail with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        self.fail_with.set(Some(status));
    }

    fn outcome<T: 'static>(&self, ok: T) -> PendingOp<'static, T> {
        let res = match self.fail_with.get() {
            Some(status) => Err(HttpError::Rejected(status)),
            None => Ok(ok),
        };
        Box::pin(future::ready(res))
    }
}

impl Network for RecordingNetwork {
    fn delete(&self, endpoint: &str) -> PendingOp<'static, ()> {
        self.calls.borrow_mut().push(NetCall::Delete(endpoint.to_string()));
        self.outcome(())
    }

    fn patch(&self, endpoint: &str, body: &ParsedContent) -> PendingOp<'static, RawMessage> {
        self.calls
            .borrow_mut()
            .push(NetCall::Patch(endpoint.to_string(), body.clone()));

        let id = endpoint
            .rsplit('/')
            .next()
            .and_then(|id| id.parse().ok())
            .unwrap_or(MessageId(0));

        self.outcome(RawMessage {
            id,
            kind: Some(0),
            content: Some(body.content.clone()),
            edited_timestamp: Some(Utc::now()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Jump(ChannelId, MessageId, bool),
    StartEdit(ChannelId, MessageId, String),
    EndEdit,
}

#[derive(Default)]
pub struct RecordingUi {
    calls: RefCell<Vec<UiCall>>,
}

impl RecordingUi {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.borrow().clone()
    }
}

impl UiActions for RecordingUi {
    fn jump_to_message(&self, channel_id: ChannelId, message_id: MessageId, flash: bool) {
        self.calls.borrow_mut().push(UiCall::Jump(channel_id, message_id, flash));
    }

    fn start_edit_message(&self, channel_id: ChannelId, message_id: MessageId, seed: &str) {
        self.calls
            .borrow_mut()
            .push(UiCall::StartEdit(channel_id, message_id, seed.to_string()));
    }

    fn end_edit_message(&self) {
        self.calls.borrow_mut().push(UiCall::EndEdit);
    }
}

/// Marks parsed content so tests can tell it apart.
pub struct MarkingParser;

impl ContentParser for MarkingParser {
    fn parse(&self, _record: &RawMessage, input: &str) -> ParsedContent {
        ParsedContent::plain(format!("<parsed>{input}"))
    }
}

pub struct Harness {
    pub store: Rc<MemoryStore>,
    pub network: Rc<RecordingNetwork>,
    pub ui: Rc<RecordingUi>,
    pub session: Session,
}

impl Harness {
    pub fn new() -> Self {
        let store = MemoryStore::from_json(SNAPSHOT).expect("failed to load snapshot");
        let network = Rc::new(RecordingNetwork::default());
        let ui = Rc::new(RecordingUi::default());

        let host = Host::from_store(store.clone(), network.clone())
            .ui(ui.clone())
            .parser(Rc::new(MarkingParser));

        Self {
            store,
            network,
            ui,
            session: Session::new(host),
        }
    }

    pub fn message(&self, channel_id: u64, message_id: u64) -> Message {
        self.session
            .find_message(ChannelId(channel_id), MessageId(message_id))
            .expect("message not in snapshot")
    }
}
