//! Assistant backend seam for Beacon.
//!
//! The chat controller only knows about the [`AssistantClient`] trait. The
//! concrete HTTP implementation lives in `http` and is picked up from the
//! environment at startup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use beacon::assistant::{AssistantClient, HttpAssistant};
//! use beacon::types::ChatMessage;
//!
//! # async fn example() -> Result<(), beacon::error::AssistantError> {
//! let client = HttpAssistant::new("http://127.0.0.1:8080/chat".to_string(), None, None);
//! let reply = client.send_message(&[ChatMessage::user("Hello!")]).await?;
//! println!("{}", reply.reply);
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{HttpAssistant, parse_reply_body};

use crate::error::AssistantError;
use crate::types::ChatMessage;
use async_trait::async_trait;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantReply {
    pub reply: String,
}

#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Sends the whole conversation; the last entry is the message being
    /// answered.
    async fn send_message(
        &self,
        history: &[ChatMessage],
    ) -> Result<AssistantReply, AssistantError>;
}
