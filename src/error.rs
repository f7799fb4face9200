//! Main Crate Error

use crate::requests::Response;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unsupported protocol '{0}'")]
    UnsupportedProtocol(String),

    #[error("Missing metadata field '{0}'")]
    MissingMetadata(&'static str),

    #[error("Invalid OAuth signing key")]
    SigningKey,

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    JsonText(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    TomlDeserialization(#[from] toml::de::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /* Submission Errors */
    #[error("Submission aborted after {} of {total} datasets: {source}", .completed.len())]
    Submission {
        completed: Vec<Response>,
        total: usize,
        source: Box<Error>,
    },
}
