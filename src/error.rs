use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TasktabError {
    /// I/O error (terminal handling, response body reads)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport failure talking to the remote task source
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// Response body did not decode as the expected record shape
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected task input (empty title or description)
    #[error("Invalid task: {0}")]
    InvalidTask(String),
}

pub type Result<T> = std::result::Result<T, TasktabError>;

impl TasktabError {
    pub fn invalid_task(msg: impl Into<String>) -> Self {
        Self::InvalidTask(msg.into())
    }
}

impl From<ureq::Error> for TasktabError {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}
