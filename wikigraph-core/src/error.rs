use serde::{Deserialize, Serialize};
use thiserror::Error;
use wikigraph_fetch::FetchError;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("no keyword was given")]
    EmptyKeyword,

    #[error("page '{0}' has no revisions or does not exist")]
    PageNotFound(String),

    #[error("upstream API returned status {status}")]
    UpstreamFailure { status: u16 },

    #[error("page '{0}' contains no article links")]
    EmptyResultSet(String),

    #[error("cannot normalize an empty weight map")]
    EmptyInput,

    #[error("upstream request failed: {0}")]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// The three error kinds a caller of the pipelines ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    EmptyKeyword,
    PageNotFound,
    UpstreamFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyKeyword => "empty-keyword",
            ErrorKind::PageNotFound => "page-not-found",
            ErrorKind::UpstreamFailure => "upstream-failure",
        }
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::EmptyKeyword => "Please enter a keyword.",
            ErrorKind::PageNotFound => "The Wikipedia page you are looking for does not exist.",
            ErrorKind::UpstreamFailure => "A system error occurred while contacting Wikipedia.",
        }
    }
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::EmptyKeyword => ErrorKind::EmptyKeyword,
            GraphError::PageNotFound(_)
            | GraphError::EmptyResultSet(_)
            | GraphError::EmptyInput => ErrorKind::PageNotFound,
            GraphError::UpstreamFailure { .. } | GraphError::Fetch(_) => {
                ErrorKind::UpstreamFailure
            }
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::from(self)
    }
}

/// Structured error body handed back in place of a graph or tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: ErrorKind,
    pub message: String,
}

impl From<&GraphError> for ErrorPayload {
    fn from(err: &GraphError) -> Self {
        let kind = err.kind();
        Self {
            error: kind,
            message: kind.user_message().to_string(),
        }
    }
}
