//! Login screen state: two competing sign-in providers, one shared error
//! slot, and the success hand-off to the host.

mod http;

pub use http::HttpIdentityBridge;

use crate::error::{AuthFlowError, BridgeError};
use crate::types::{Provider, Session, User};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

pub const GENERIC_SIGN_IN_ERROR: &str = "Sign-in failed. Please try again.";

/// What the identity bridge reports for one attempt.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SignInOutcome {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub error: Option<String>,
}

#[async_trait]
pub trait IdentityBridge: Send + Sync {
    async fn sign_in(&self, provider: Provider) -> Result<SignInOutcome, BridgeError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthError {
    pub message: String,
}

/// Rendering view of the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    loading: [bool; 2],
    pub error: Option<AuthError>,
}

impl AuthSnapshot {
    pub fn is_loading(&self, provider: Provider) -> bool {
        self.loading[provider.index()]
    }

    /// Both sign-in buttons are disabled while either provider is loading.
    pub fn controls_disabled(&self) -> bool {
        self.loading.iter().any(|loading| *loading)
    }
}

/// Result of a finished attempt, as seen by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SignInResult {
    SignedIn,
    Failed(AuthError),
}

#[must_use = "an unfinished sign-in leaves its provider loading"]
#[derive(Debug)]
pub struct PendingSignIn {
    provider: Provider,
}

impl PendingSignIn {
    pub fn provider(&self) -> Provider {
        self.provider
    }
}

type SuccessCallback = dyn Fn(User, Session) + Send + Sync;

#[derive(Clone)]
pub struct AuthFlowController {
    state: Arc<Mutex<AuthSnapshot>>,
    bridge: Arc<dyn IdentityBridge>,
    on_login_success: Arc<SuccessCallback>,
}

impl AuthFlowController {
    pub fn new<F>(bridge: Arc<dyn IdentityBridge>, on_login_success: F) -> Self
    where
        F: Fn(User, Session) + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(AuthSnapshot::default())),
            bridge,
            on_login_success: Arc::new(on_login_success),
        }
    }

    fn state(&self) -> MutexGuard<'_, AuthSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.state().clone()
    }

    pub fn controls_disabled(&self) -> bool {
        self.state().controls_disabled()
    }

    pub fn dismiss_error(&self) {
        self.state().error = None;
    }

    /// Claims the provider slot and clears the previous error.
    ///
    /// Refuses while any attempt is outstanding, for either provider.
    pub fn begin(&self, provider: Provider) -> Result<PendingSignIn, AuthFlowError> {
        let mut state = self.state();
        if let Some(busy) = Provider::ALL.into_iter().find(|p| state.is_loading(*p)) {
            warn!(requested = %provider, in_flight = %busy, "sign-in rejected");
            return Err(AuthFlowError::AttemptInProgress(busy));
        }
        state.error = None;
        state.loading[provider.index()] = true;
        info!(%provider, "sign-in started");
        Ok(PendingSignIn { provider })
    }

    pub async fn complete(&self, pending: PendingSignIn) -> SignInResult {
        let provider = pending.provider;
        let outcome = self.bridge.sign_in(provider).await;

        let signed_in = match outcome {
            Ok(SignInOutcome {
                success: true,
                user: Some(user),
                session: Some(session),
                ..
            }) => Ok((user, session)),
            Ok(outcome) => Err(failure_message(outcome.error.as_deref())),
            Err(fault) => Err(failure_message(Some(&fault.to_string()))),
        };

        match signed_in {
            Ok((user, session)) => {
                info!(%provider, user = %user.id, "sign-in succeeded");
                (self.on_login_success)(user, session);
                self.state().loading[provider.index()] = false;
                SignInResult::SignedIn
            }
            Err(message) => {
                warn!(%provider, %message, "sign-in failed");
                let error = AuthError { message };
                let mut state = self.state();
                state.loading[provider.index()] = false;
                state.error = Some(error.clone());
                SignInResult::Failed(error)
            }
        }
    }

    pub async fn sign_in(&self, provider: Provider) -> Result<SignInResult, AuthFlowError> {
        let pending = self.begin(provider)?;
        Ok(self.complete(pending).await)
    }
}

fn failure_message(text: Option<&str>) -> String {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(GENERIC_SIGN_IN_ERROR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Result<SignInOutcome, BridgeError>);

    #[async_trait]
    impl IdentityBridge for Scripted {
        async fn sign_in(&self, _provider: Provider) -> Result<SignInOutcome, BridgeError> {
            self.0.clone()
        }
    }

    fn controller(result: Result<SignInOutcome, BridgeError>) -> AuthFlowController {
        AuthFlowController::new(Arc::new(Scripted(result)), |_, _| {})
    }

    #[test]
    fn test_failure_message_fallback() {
        assert_eq!(failure_message(None), GENERIC_SIGN_IN_ERROR);
        assert_eq!(failure_message(Some("  ")), GENERIC_SIGN_IN_ERROR);
        assert_eq!(failure_message(Some("token expired")), "token expired");
    }

    #[test]
    fn test_begin_blocks_both_providers() {
        let auth = controller(Ok(SignInOutcome::default()));
        let _pending = auth.begin(Provider::Slack).unwrap();

        let snapshot = auth.snapshot();
        assert!(snapshot.is_loading(Provider::Slack));
        assert!(!snapshot.is_loading(Provider::Microsoft));
        assert!(snapshot.controls_disabled());

        assert!(matches!(
            auth.begin(Provider::Microsoft),
            Err(AuthFlowError::AttemptInProgress(Provider::Slack))
        ));
        assert!(auth.begin(Provider::Slack).is_err());
        assert!(!auth.snapshot().is_loading(Provider::Microsoft));
    }

    #[tokio::test]
    async fn test_explicit_failure_uses_provider_text() {
        let auth = controller(Ok(SignInOutcome {
            success: false,
            error: Some("workspace not allowed".into()),
            ..Default::default()
        }));
        let result = auth.sign_in(Provider::Slack).await.unwrap();
        assert_eq!(
            result,
            SignInResult::Failed(AuthError {
                message: "workspace not allowed".into()
            })
        );
        let snapshot = auth.snapshot();
        assert!(!snapshot.controls_disabled());
        assert_eq!(snapshot.error.unwrap().message, "workspace not allowed");
    }

    #[tokio::test]
    async fn test_bridge_fault_populates_error() {
        let auth = controller(Err(BridgeError::Transport("bridge offline".into())));
        auth.sign_in(Provider::Microsoft).await.unwrap();
        assert_eq!(auth.snapshot().error.unwrap().message, "bridge offline");
        assert!(!auth.snapshot().is_loading(Provider::Microsoft));
    }

    #[tokio::test]
    async fn test_success_without_session_is_a_failure() {
        let auth = controller(Ok(SignInOutcome {
            success: true,
            user: Some(User {
                id: "u1".into(),
                email: None,
                name: None,
            }),
            ..Default::default()
        }));
        auth.sign_in(Provider::Slack).await.unwrap();
        assert_eq!(auth.snapshot().error.unwrap().message, GENERIC_SIGN_IN_ERROR);
    }

    #[tokio::test]
    async fn test_new_attempt_clears_error() {
        let auth = controller(Ok(SignInOutcome::default()));
        auth.sign_in(Provider::Slack).await.unwrap();
        assert!(auth.snapshot().error.is_some());

        let _pending = auth.begin(Provider::Microsoft).unwrap();
        assert!(auth.snapshot().error.is_none());
    }
}
