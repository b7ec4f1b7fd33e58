use super::{AssistantClient, AssistantReply};
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::types::{ChatMessage, Role};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Assistant reached over a plain JSON endpoint
pub struct HttpAssistant {
    client: Client,
    endpoint: String,
    model: Option<String>,
    api_key: Option<String>,
}

impl HttpAssistant {
    pub fn new(endpoint: String, model: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            config.api_key.clone(),
        )
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Deserialize)]
struct ReplyChoice {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct OpenAIShape {
    choices: Vec<ReplyChoice>,
}

#[derive(Deserialize)]
struct ContentOnly {
    content: String,
}

/// Pulls the reply text out of a successful response body.
///
/// Accepts an OpenAI-shaped body, a bare `{"content": ...}` body, and falls
/// back to the raw text for anything else.
pub fn parse_reply_body(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<OpenAIShape>(body)
        && let Some(choice) = parsed.choices.into_iter().next()
        && let Some(msg) = choice.message
    {
        return msg.content;
    }

    if let Ok(parsed) = serde_json::from_str::<ContentOnly>(body) {
        return parsed.content;
    }

    body.to_string()
}

#[async_trait]
impl AssistantClient for HttpAssistant {
    async fn send_message(
        &self,
        history: &[ChatMessage],
    ) -> Result<AssistantReply, AssistantError> {
        let messages = history
            .iter()
            .map(|msg| WireMessage {
                role: msg.role,
                content: &msg.content,
            })
            .collect();

        let mut request = self.client.post(&self.endpoint).json(&ChatRequest {
            model: self.model.as_deref(),
            messages,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(endpoint = %self.endpoint, turns = history.len(), "sending conversation");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply = parse_reply_body(&body);
        if reply.trim().is_empty() {
            return Err(AssistantError::EmptyReply);
        }
        Ok(AssistantReply { reply })
    }
}
