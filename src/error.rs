//! Error types for the fetch / render / write pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Required token variable is unset or empty
    #[error("missing required environment variable {var}")]
    MissingToken { var: String },

    /// Config file or in-code settings that cannot produce a valid render
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request could not be built, sent, or its body read
    #[error("connection failed: {0}")]
    Connection(String),

    /// Non-success HTTP status
    #[error("request failed with status {status}: {body}")]
    Transport { status: http::StatusCode, body: String },

    /// The API answered with an `errors` list
    #[error("API returned errors: {0}")]
    Api(String),

    /// The body parsed but is missing the contribution calendar
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
