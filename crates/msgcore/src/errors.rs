use thiserror::Error;


#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("malformed snapshot")]
    Snapshot(#[from] serde_json::Error),
    #[error("could not read snapshot")]
    Io(#[from] std::io::Error),
}
