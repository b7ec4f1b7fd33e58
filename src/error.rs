//! Error types shared by the chat and login controllers.
//!
//! Nothing in here is fatal: every variant ends up as a banner or an inline
//! error on one of the two screens.

use crate::types::Provider;
use thiserror::Error;

/// A failed round trip to the assistant backend.
#[derive(Debug, Clone, Error)]
pub enum AssistantError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Assistant error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Assistant returned an empty reply")]
    EmptyReply,
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Network(err.to_string())
    }
}

/// A fault raised by the identity bridge itself, as opposed to a
/// `success: false` result it returned.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    #[error("{0}")]
    Transport(String),

    #[error("Unexpected response from auth bridge: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BridgeError::Decode(err.to_string())
        } else {
            BridgeError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Still waiting for the previous reply")]
    AwaitingReply,

    #[error(transparent)]
    Transport(#[from] AssistantError),
}

#[derive(Debug, Clone, Error)]
pub enum AuthFlowError {
    #[error("A {0} sign-in is already in progress")]
    AttemptInProgress(Provider),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

pub type ChatResult<T> = Result<T, ChatError>;
