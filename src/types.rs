use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the conversation. Never mutated after it is appended.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::now(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::now(Role::Assistant, content)
    }

    fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// The two identity services offered on the login screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Slack,
    Microsoft,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Slack, Provider::Microsoft];

    pub fn label(self) -> &'static str {
        match self {
            Provider::Slack => "Slack",
            Provider::Microsoft => "Microsoft",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Provider::Slack => "slack",
            Provider::Microsoft => "microsoft",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Provider::Slack => 0,
            Provider::Microsoft => 1,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}
