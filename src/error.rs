use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a submission attempt. Response-shape problems
/// are not here on purpose: a malformed `result` payload degrades to "no
/// result" and is only logged.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("type an email text or attach a file before analyzing")]
    EmptyInput,

    #[error("unsupported file '{0}': only .txt and .pdf are accepted")]
    UnsupportedFile(String),

    #[error("a request is already in flight")]
    RequestPending,

    #[error("failed to read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not reach the analysis service: {0}")]
    Transport(String),

    #[error("analysis service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
