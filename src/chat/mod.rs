//! Chat screen state: message history, the awaiting-reply flag, and the
//! send orchestration around an [`AssistantClient`].

mod seed;

pub use seed::{InitialMessageDispatcher, SeedDispatchState};

use crate::assistant::AssistantClient;
use crate::error::{ChatError, ChatResult};
use crate::types::ChatMessage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// What the host hands to the chat screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenProps {
    /// Shown by the status indicator as is.
    pub system_status: String,
    pub initial_message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pub awaiting_reply: bool,
    /// Last transport failure, shown as a dismissable banner.
    pub banner: Option<String>,
}

impl ChatSession {
    pub fn input_disabled(&self) -> bool {
        self.awaiting_reply
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickAction {
    SummarizeDay,
    DraftUpdate,
    NextSteps,
}

impl QuickAction {
    pub const ALL: [QuickAction; 3] = [
        QuickAction::SummarizeDay,
        QuickAction::DraftUpdate,
        QuickAction::NextSteps,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::SummarizeDay => "Summarize my day",
            QuickAction::DraftUpdate => "Draft a status update",
            QuickAction::NextSteps => "What should I do next?",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            QuickAction::SummarizeDay => "Give me a short summary of what happened today.",
            QuickAction::DraftUpdate => "Draft a brief status update I can send to my team.",
            QuickAction::NextSteps => "Based on our conversation, what are my next steps?",
        }
    }
}

/// A send that has been recorded locally but not yet answered.
#[must_use = "a pending reply keeps the session awaiting until completed"]
#[derive(Debug)]
pub struct PendingReply {
    context: Vec<ChatMessage>,
}

/// Cheap, cloneable handle over one chat session.
#[derive(Clone)]
pub struct ChatSessionController {
    session: Arc<Mutex<ChatSession>>,
    client: Arc<dyn AssistantClient>,
}

impl ChatSessionController {
    pub fn new(client: Arc<dyn AssistantClient>) -> Self {
        Self {
            session: Arc::new(Mutex::new(ChatSession::default())),
            client,
        }
    }

    fn state(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ChatSession {
        self.state().clone()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.state().awaiting_reply
    }

    pub fn input_disabled(&self) -> bool {
        self.awaiting_reply()
    }

    pub fn dismiss_banner(&self) {
        self.state().banner = None;
    }

    /// Empties the history. Ignored while a reply is outstanding.
    pub fn clear(&self) -> bool {
        let mut session = self.state();
        if session.awaiting_reply {
            return false;
        }
        session.messages.clear();
        session.banner = None;
        true
    }

    /// Records the user's message and marks the session as awaiting.
    ///
    /// Runs synchronously so the message is visible before any request goes
    /// out. Fails without touching history if the text is blank or another
    /// reply is still outstanding.
    pub fn begin(&self, text: &str) -> ChatResult<PendingReply> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let mut session = self.state();
        if session.awaiting_reply {
            debug!("send rejected, reply still outstanding");
            return Err(ChatError::AwaitingReply);
        }
        session.messages.push(ChatMessage::user(trimmed));
        session.awaiting_reply = true;
        Ok(PendingReply {
            context: session.messages.clone(),
        })
    }

    /// Waits for the assistant and folds the outcome back into the session.
    pub async fn complete(&self, pending: PendingReply) -> ChatResult<()> {
        let outcome = self.client.send_message(&pending.context).await;

        let mut session = self.state();
        session.awaiting_reply = false;
        match outcome {
            Ok(reply) => {
                session.messages.push(ChatMessage::assistant(reply.reply));
                session.banner = None;
                debug!(messages = session.messages.len(), "assistant replied");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                session.banner = Some(err.to_string());
                Err(ChatError::Transport(err))
            }
        }
    }

    pub async fn send_message(&self, text: &str) -> ChatResult<()> {
        let pending = self.begin(text)?;
        self.complete(pending).await
    }

    /// Starts a quick-action prompt. Same rules as [`Self::begin`]; the
    /// caller completes it without awaiting, like any other send.
    pub fn quick_action(&self, action: QuickAction) -> ChatResult<PendingReply> {
        debug!(action = action.label(), "quick action");
        self.begin(action.prompt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::AssistantReply;
    use crate::error::AssistantError;
    use crate::types::Role;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl AssistantClient for Echo {
        async fn send_message(
            &self,
            history: &[ChatMessage],
        ) -> Result<AssistantReply, AssistantError> {
            let last = history.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(AssistantReply {
                reply: format!("echo: {last}"),
            })
        }
    }

    struct Down;

    #[async_trait]
    impl AssistantClient for Down {
        async fn send_message(
            &self,
            _history: &[ChatMessage],
        ) -> Result<AssistantReply, AssistantError> {
            Err(AssistantError::Network("connection refused".into()))
        }
    }

    #[test]
    fn test_begin_appends_user_message_synchronously() {
        let controller = ChatSessionController::new(Arc::new(Echo));
        let _pending = controller.begin("  hello  ").unwrap();

        let session = controller.snapshot();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[0].content, "hello");
        assert!(session.awaiting_reply);
        assert!(session.input_disabled());
    }

    #[test]
    fn test_blank_message_rejected() {
        let controller = ChatSessionController::new(Arc::new(Echo));
        assert!(matches!(controller.begin("   "), Err(ChatError::EmptyMessage)));
        assert!(controller.snapshot().messages.is_empty());
        assert!(!controller.awaiting_reply());
    }

    #[test]
    fn test_second_begin_rejected_while_awaiting() {
        let controller = ChatSessionController::new(Arc::new(Echo));
        let _pending = controller.begin("first").unwrap();
        assert!(matches!(controller.begin("second"), Err(ChatError::AwaitingReply)));
        assert_eq!(controller.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_send_appends_reply() {
        let controller = ChatSessionController::new(Arc::new(Echo));
        controller.send_message("ping").await.unwrap();

        let session = controller.snapshot();
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].role, Role::Assistant);
        assert_eq!(session.messages[1].content, "echo: ping");
        assert!(!session.awaiting_reply);
        assert!(session.banner.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_user_message() {
        let controller = ChatSessionController::new(Arc::new(Down));
        let result = controller.send_message("are you there?").await;
        assert!(matches!(result, Err(ChatError::Transport(_))));

        let session = controller.snapshot();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].content, "are you there?");
        assert!(!session.awaiting_reply);
        assert!(session.banner.as_deref().unwrap().contains("connection refused"));

        controller.dismiss_banner();
        assert!(controller.snapshot().banner.is_none());
    }

    #[tokio::test]
    async fn test_clear_only_when_idle() {
        let controller = ChatSessionController::new(Arc::new(Echo));
        controller.send_message("one").await.unwrap();
        let pending = controller.begin("two").unwrap();
        assert!(!controller.clear());

        controller.complete(pending).await.unwrap();
        assert!(controller.clear());
        assert!(controller.snapshot().messages.is_empty());
    }

    #[tokio::test]
    async fn test_quick_action_sends_prompt() {
        let controller = ChatSessionController::new(Arc::new(Echo));
        let pending = controller.quick_action(QuickAction::NextSteps).unwrap();
        assert_eq!(
            controller.snapshot().messages[0].content,
            QuickAction::NextSteps.prompt()
        );
        assert!(matches!(
            controller.quick_action(QuickAction::SummarizeDay),
            Err(ChatError::AwaitingReply)
        ));

        controller.complete(pending).await.unwrap();
        let session = controller.snapshot();
        assert_eq!(session.messages.len(), 2);
        assert_eq!(
            session.messages[1].content,
            format!("echo: {}", QuickAction::NextSteps.prompt())
        );
    }
}
