//! Remote service error types.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RemoteError {
    #[error("Authentication required")]
    #[diagnostic(
        code(flowstate::remote::auth_required),
        help("Run 'flowstate auth login <email>' and then 'flowstate auth token <token>'.")
    )]
    AuthRequired,

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(flowstate::remote::api_error))]
    Api { status: u16, message: String },

    #[error("Failed to reach the FlowState service")]
    #[diagnostic(
        code(flowstate::remote::transport),
        help("Check your network connection, or switch to local mode with 'flowstate config mode local'.")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the FlowState service: {message}")]
    #[diagnostic(code(flowstate::remote::invalid_response))]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            RemoteError::Transport { source: e }
        } else {
            RemoteError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
