use crate::chat::{
    ChatSession, ChatSessionController, InitialMessageDispatcher, PendingReply, QuickAction,
};
use crate::error::ChatResult;
use crate::types::{ChatMessage, Role};
use crate::ui::AppServices;
use crate::views::shared::{format_message_timestamp, markdown_to_html};
use dioxus::events::Key;
use dioxus::prelude::*;
use tracing::debug;

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

#[component]
pub fn ChatView(
    system_status: String,
    initial_message: ReadOnlySignal<Option<String>>,
) -> Element {
    let services = use_context::<AppServices>();
    let controller = use_hook(|| ChatSessionController::new(services.assistant.clone()));
    let mut dispatcher = use_signal({
        let controller = controller.clone();
        move || InitialMessageDispatcher::new(controller)
    });
    let mut session = use_signal(ChatSession::default);
    let mut input = use_signal(String::new);

    // Every send path ends here: show the recorded message, then let the reply
    // land in the background.
    let await_reply = use_callback({
        let controller = controller.clone();
        move |started: ChatResult<PendingReply>| {
            let pending = match started {
                Ok(pending) => pending,
                Err(err) => {
                    debug!(error = %err, "send ignored");
                    return;
                }
            };
            session.set(controller.snapshot());

            let controller = controller.clone();
            spawn(async move {
                // The banner carries the failure; nothing else to do here.
                let _ = controller.complete(pending).await;
                session.set(controller.snapshot());
            });
        }
    });

    let send_message = use_callback({
        let controller = controller.clone();
        move |text: String| {
            let started = controller.begin(&text);
            if started.is_ok() {
                input.set(String::new());
            }
            await_reply.call(started);
        }
    });

    let start_quick_action = use_callback({
        let controller = controller.clone();
        move |action: QuickAction| await_reply.call(controller.quick_action(action))
    });

    use_effect(move || {
        let seed = initial_message();
        let fired = dispatcher.write().sync(seed.as_deref());
        if let Some(started) = fired {
            await_reply.call(started);
        }
    });

    let dismiss_banner = {
        let controller = controller.clone();
        move |_| {
            controller.dismiss_banner();
            session.set(controller.snapshot());
        }
    };

    let snapshot = session();
    let disabled = snapshot.input_disabled();

    rsx! {
        div { class: "main-container",
            div { class: "status-indicator", "{system_status}" }
            if let Some(banner) = snapshot.banner.clone() {
                div { class: "banner banner-error",
                    span { "{banner}" }
                    button {
                        class: "action-btn", r#type: "button",
                        onclick: dismiss_banner,
                        "Dismiss"
                    }
                }
            }
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for (i, msg) in snapshot.messages.iter().enumerate() {
                        MessageRow { key: "{i}", message: msg.clone() }
                    }
                    if snapshot.awaiting_reply {
                        div { class: "message-row assistant",
                            div { class: "avatar assistant", "B" }
                            div { class: "shimmer-line",
                                span { class: "shimmer-text", "Thinking…" }
                            }
                        }
                    }
                }
            }
            div { class: "quick-actions",
                for action in QuickAction::ALL {
                    button {
                        class: "btn btn-ghost", r#type: "button",
                        disabled: disabled,
                        onclick: move |_| start_quick_action.call(action),
                        "{action.label()}"
                    }
                }
            }
            form { class: "composer no-divider",
                div { class: "composer-inner",
                    div {
                        class: "hstack",
                        style: "gap: 0.5rem; width: 100%; align-items: flex-end;",
                        textarea {
                            rows: "1", placeholder: "What can I help you with?",
                            value: "{input}", oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    send_message.call(input());
                                }
                            },
                            disabled: disabled, autofocus: true,
                        }
                        button {
                            class: "btn btn-primary", r#type: "button",
                            disabled: disabled || input().trim().is_empty(),
                            onclick: move |_| send_message.call(input()),
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let class = role_class(message.role);
    let timestamp = format_message_timestamp(message.created_at);
    rsx! {
        div { class: "message-row {class}",
            if message.role == Role::Assistant { div { class: "avatar assistant", "B" } }
            div { class: "message-stack",
                div { class: "bubble {class}",
                    if message.role == Role::Assistant {
                        AssistantBubble { content: message.content.clone() }
                    } else {
                        "{message.content}"
                    }
                }
                if let Some(ts) = timestamp {
                    div { class: "message-meta",
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            drop(raw);
        });
    };

    rsx! {
        div { class: "bubble-controls",
            div { class: "actions",
                button { class: "action-btn", title: "Copy markdown", onclick: on_copy, "Copy" }
            }
        }
        div { class: "md", dangerous_inner_html: "{content_html}" }
    }
}
