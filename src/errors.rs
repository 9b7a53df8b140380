use msgcore::client::{http, PermissionError};
use thiserror::Error;

use crate::message::MessageType;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("{kind} messages do not support {operation}")]
    UnsupportedOperation {
        kind: MessageType,
        operation: &'static str,
    },
    #[error("not allowed to {operation} this message")]
    Authorization { operation: &'static str },
    #[error("permission check failed")]
    Permission(#[from] PermissionError),
    #[error("message has no channel")]
    MissingChannel,
    #[error("network error")]
    Network(#[from] http::Error),
}
