use crate::assistant::{AssistantClient, HttpAssistant};
use crate::auth::{HttpIdentityBridge, IdentityBridge};
use crate::chat::ScreenProps;
use crate::config::AppConfig;
use crate::types::{Session, User};
use crate::views::{ChatView, LoginView};
use dioxus::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Collaborators and host values shared with every screen through context.
#[derive(Clone)]
pub struct AppServices {
    pub assistant: Arc<dyn AssistantClient>,
    pub identity: Arc<dyn IdentityBridge>,
    pub screen: ScreenProps,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            assistant: Arc::new(HttpAssistant::from_config(&config.assistant)),
            identity: Arc::new(HttpIdentityBridge::new(config.auth_bridge_url.clone())),
            screen: ScreenProps {
                system_status: config.system_status.clone(),
                initial_message: config.initial_message.clone(),
            },
        }
    }
}

#[component]
pub fn App() -> Element {
    let services = use_context::<AppServices>();
    let mut signed_in = use_signal(|| Option::<User>::None);

    let Some(user) = signed_in() else {
        return rsx! {
            LoginView {
                on_login_success: move |(user, _session): (User, Session)| {
                    info!(user = %user.id, "login complete");
                    signed_in.set(Some(user));
                },
            }
        };
    };

    let display_name = user.name.clone().or(user.email.clone()).unwrap_or(user.id.clone());
    let screen = services.screen.clone();
    rsx! {
        div { class: "header no-divider",
            div { class: "header-content",
                span { class: "header-user", "{display_name}" }
            }
        }
        ChatView {
            system_status: screen.system_status,
            initial_message: screen.initial_message,
        }
    }
}
