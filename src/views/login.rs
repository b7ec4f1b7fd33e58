use crate::auth::{AuthFlowController, AuthSnapshot};
use crate::types::{Provider, Session, User};
use crate::ui::AppServices;
use dioxus::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

type Landed = Arc<Mutex<Option<(User, Session)>>>;

#[component]
pub fn LoginView(on_login_success: EventHandler<(User, Session)>) -> Element {
    let services = use_context::<AppServices>();
    let landed: Landed = use_hook(|| Arc::new(Mutex::new(None)));
    let controller = use_hook(|| {
        let slot = landed.clone();
        AuthFlowController::new(services.identity.clone(), move |user, session| {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some((user, session));
        })
    });
    let mut auth = use_signal(AuthSnapshot::default);

    let start_sign_in = use_callback(move |provider: Provider| {
        let pending = match controller.begin(provider) {
            Ok(pending) => pending,
            Err(err) => {
                debug!(error = %err, "sign-in ignored");
                return;
            }
        };
        auth.set(controller.snapshot());

        let controller = controller.clone();
        let landed = landed.clone();
        spawn(async move {
            controller.complete(pending).await;
            auth.set(controller.snapshot());
            let signed_in = landed.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(pair) = signed_in {
                on_login_success.call(pair);
            }
        });
    });

    let snapshot = auth();
    let disabled = snapshot.controls_disabled();

    rsx! {
        div { class: "login-container",
            h2 { class: "login-title", "Sign in to continue" }
            div { class: "login-providers",
                for provider in Provider::ALL {
                    button {
                        class: "btn btn-provider", r#type: "button",
                        disabled: disabled,
                        onclick: move |_| start_sign_in.call(provider),
                        if snapshot.is_loading(provider) {
                            "Signing in…"
                        } else {
                            "Continue with {provider}"
                        }
                    }
                }
            }
            if let Some(error) = snapshot.error.clone() {
                p { class: "login-error", "{error.message}" }
            }
        }
    }
}
