//! Error taxonomy. Each enum covers one failure family; handlers propagate
//! with `?` and the routers catch at the dispatch boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures around the guild configuration snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read guild config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("guild config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("guild config is missing required key `{0}`")]
    MissingKey(&'static str),
    #[error("guild config key `{0}` must be a non-zero id")]
    InvalidId(&'static str),
    #[error("guild constants accessed before load()")]
    NotInitialized,
}

/// Failures while reading or writing the ledger snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("ledger snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("ledger snapshot is not valid JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure to resolve the full message behind a partial reaction payload.
/// Always handled by dropping the event, never by retrying.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("message fetch timed out")]
    TimedOut,
    #[error("message fetch failed: {0}")]
    Api(#[from] serenity::Error),
}

/// Anything a prefix command handler can fail with. Caught by the command
/// router, which logs it and answers with a generic failure message.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
