#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    #[error("malformed JSON in response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("response does not match schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    EnvVar(#[from] EnvVarError),

    #[error("invalid base URL `{url}`: {reason}")]
    BaseUrl { url: String, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    MalformedResponse,
    Schema,
    Unknown,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::Schema(_) => ErrorKind::Schema,
            Error::Request(_) => ErrorKind::Unknown,
            Error::EnvVar(_) | Error::BaseUrl { .. } => ErrorKind::Config,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing field `{0}` in successful reply")]
    MissingField(&'static str),
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({var})")]
pub struct EnvVarError {
    var: String,
    #[source]
    source: std::env::VarError,
}

impl EnvVarError {
    pub fn new(var: &str, source: std::env::VarError) -> Self {
        Self {
            var: var.into(),
            source,
        }
    }
}
