//! Identity-preserving façades over a chat host's live message records.
//!
//! A [`Session`] wraps each raw record in exactly one façade, picks the
//! message variant from the record's discriminant, and resolves channels,
//! guilds and users through the host's directory on every read.

pub mod cache;
pub mod config;
pub mod embed;
pub mod errors;
pub mod message;
pub mod reaction;
pub mod resolve;
pub mod session;
pub mod utils;

#[cfg(test)]
mod testing;

pub use embed::Embed;
pub use errors::Error;
pub use message::{DefaultMessage, Message, MessageType, MessageVariant};
pub use reaction::Reaction;
pub use resolve::{Attached, Related};
pub use session::{Host, Session};

pub const USER_AGENT: &str = concat!("msgview/v", env!("CARGO_PKG_VERSION"));
