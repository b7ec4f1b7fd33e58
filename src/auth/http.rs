use super::{IdentityBridge, SignInOutcome};
use crate::error::BridgeError;
use crate::types::Provider;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Talks to the local auth bridge that drives the provider's OAuth dance and
/// reports the result back as JSON.
pub struct HttpIdentityBridge {
    client: Client,
    base_url: String,
}

impl HttpIdentityBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn sign_in_url(&self, provider: Provider) -> String {
        format!(
            "{}/auth/{}/sign-in",
            self.base_url.trim_end_matches('/'),
            provider.slug()
        )
    }
}

#[async_trait]
impl IdentityBridge for HttpIdentityBridge {
    async fn sign_in(&self, provider: Provider) -> Result<SignInOutcome, BridgeError> {
        let url = self.sign_in_url(provider);
        debug!(%url, "requesting sign-in");
        let response = self.client.post(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The bridge reports provider failures as `success: false` bodies even
        // on error statuses; only an unreadable body is a fault.
        match serde_json::from_str::<SignInOutcome>(&body) {
            Ok(outcome) => Ok(outcome),
            Err(_) if !status.is_success() => Err(BridgeError::Transport(format!(
                "Auth bridge error {status}: {body}"
            ))),
            Err(err) => Err(BridgeError::Decode(err.to_string())),
        }
    }
}
