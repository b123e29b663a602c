use thiserror::Error;

/// Failure of a single gateway call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("Could not reach the bank API: {0}")]
    Transport(String),
    #[error("Bank API answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Bank API answered with an empty body")]
    EmptyBody,
    #[error("Could not decode the bank API response: {0}")]
    Decode(String),
    #[error("Account id is required to update account")]
    MissingId,
    #[error("{0} not found")]
    NotFound(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
