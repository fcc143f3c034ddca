//! Gated navigation: decides whether a navigation request reaches the router
//! now or waits behind a login prompt until authentication succeeds.

use tracing::{debug, info};

use crate::model::{AuthScreen, Payload, PendingAction, Route, Screen, Session, SessionChange};
use crate::observe::{Observable, Subscription};
use crate::router::PageRouter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    Idle,
    /// The login prompt is showing on top of the current screen.
    PromptingLogin { pending: PendingAction },
    /// The user picked login or sign-up from the prompt; the deferred
    /// navigation is still waiting for a session.
    AwaitingAuth { pending: PendingAction },
}

impl GateState {
    pub fn pending(&self) -> Option<&PendingAction> {
        match self {
            GateState::Idle => None,
            GateState::PromptingLogin { pending } | GateState::AwaitingAuth { pending } => {
                Some(pending)
            }
        }
    }

    fn into_pending(self) -> Option<PendingAction> {
        match self {
            GateState::Idle => None,
            GateState::PromptingLogin { pending } | GateState::AwaitingAuth { pending } => {
                Some(pending)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Forwarded,
    Deferred,
}

pub struct Navigator {
    router: PageRouter,
    state: GateState,
    prompt_visible: Observable<bool>,
    auth_error: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            router: PageRouter::new(),
            state: GateState::Idle,
            prompt_visible: Observable::new(false),
            auth_error: None,
        }
    }

    pub fn current(&self) -> &Route {
        self.router.current()
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.state.pending()
    }

    pub fn is_login_prompt_visible(&self) -> bool {
        *self.prompt_visible.get()
    }

    /// Inline message for the auth form after a failed attempt.
    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    pub fn subscribe_route(&self, f: impl FnMut(&Route) + 'static) -> Subscription {
        self.router.subscribe(f)
    }

    pub fn subscribe_prompt(&self, f: impl FnMut(&bool) + 'static) -> Subscription {
        self.prompt_visible.subscribe(f)
    }

    pub fn request(
        &mut self,
        screen: Screen,
        payload: Option<Payload>,
        session: Option<&Session>,
    ) -> NavOutcome {
        self.auth_error = None;

        if !screen.requires_session() {
            if let GateState::PromptingLogin { pending } = &self.state {
                // Leaving through a public screen hides the prompt; the
                // deferred navigation stays parked.
                let pending = pending.clone();
                self.set_state(GateState::AwaitingAuth { pending });
            }
            self.router.navigate(screen, payload);
            return NavOutcome::Forwarded;
        }

        if session.is_some() {
            self.set_state(GateState::Idle);
            self.router.navigate(screen, payload);
            return NavOutcome::Forwarded;
        }

        debug!(screen = %screen, "gated navigation deferred until login");
        self.set_state(GateState::PromptingLogin {
            pending: PendingAction { screen, payload },
        });
        NavOutcome::Deferred
    }

    pub fn dismiss_prompt(&mut self) {
        if matches!(self.state, GateState::PromptingLogin { .. }) {
            debug!("login prompt dismissed");
            self.set_state(GateState::Idle);
        }
    }

    /// Returns false when no deferred navigation is waiting.
    pub fn choose_auth_screen(&mut self, which: AuthScreen) -> bool {
        let Some(pending) = self.state.pending().cloned() else {
            return false;
        };
        self.auth_error = None;
        self.set_state(GateState::AwaitingAuth { pending });
        self.router.navigate(which.screen(), None);
        true
    }

    pub fn authentication_succeeded(&mut self) {
        self.auth_error = None;
        let state = std::mem::replace(&mut self.state, GateState::Idle);
        self.prompt_visible.set(false);
        match state.into_pending() {
            Some(pending) => {
                info!(screen = %pending.screen, "resuming deferred navigation");
                self.router.navigate(pending.screen, pending.payload);
            }
            None => self.router.navigate(Screen::Home, None),
        }
    }

    pub fn authentication_failed(&mut self, reason: impl Into<String>) {
        self.auth_error = Some(reason.into());
    }

    pub fn signed_out(&mut self) {
        self.auth_error = None;
        self.set_state(GateState::Idle);
        self.router.navigate(Screen::Home, None);
    }

    pub fn on_session_change(&mut self, change: &SessionChange) {
        match change {
            SessionChange::SignedIn(_) => self.authentication_succeeded(),
            SessionChange::SignedOut => self.signed_out(),
            SessionChange::TokenRefreshed(_) => {}
        }
    }

    fn set_state(&mut self, state: GateState) {
        let visible = matches!(state, GateState::PromptingLogin { .. });
        self.state = state;
        self.prompt_visible.set(visible);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
