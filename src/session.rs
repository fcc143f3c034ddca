//! Cached view of the hosted auth session.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::AuthService;
use crate::model::{Session, SessionChange};
use crate::observe::{Listeners, Observable, Subscription};

pub struct SessionHolder {
    current: Observable<Option<Session>>,
    changes: Listeners<SessionChange>,
    loading: bool,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self {
            current: Observable::new(None),
            changes: Listeners::new(),
            loading: true,
        }
    }

    pub fn get_session(&self) -> Option<&Session> {
        self.current.get().as_ref()
    }

    /// True until the startup check has resolved, whatever its outcome.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sign-in, sign-out and token refresh notifications.
    pub fn on_session_change(&self, f: impl FnMut(&SessionChange) + 'static) -> Subscription {
        self.changes.subscribe(f)
    }

    /// Watches the cached session value itself.
    pub fn observe(&self, f: impl FnMut(&Option<Session>) + 'static) -> Subscription {
        self.current.subscribe(f)
    }

    pub fn change_listener_count(&self) -> usize {
        self.changes.len()
    }

    pub fn apply(&mut self, change: SessionChange) {
        self.current.set(change.session().cloned());
        self.changes.emit(&change);
    }

    /// Startup check against the hosted service. Runs the call on a worker
    /// thread so a hung request cannot keep the client loading past
    /// `timeout`. Any failure resolves to no session.
    pub fn refresh_from_backend(
        &mut self,
        auth: Arc<dyn AuthService>,
        timeout: Duration,
    ) -> Option<Session> {
        let found = check_session(auth, timeout);
        self.current.set(found.clone());
        self.loading = false;
        found
    }
}

impl Default for SessionHolder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_session(auth: Arc<dyn AuthService>, timeout: Duration) -> Option<Session> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("session-check".to_string())
        .spawn(move || {
            // The receiver is gone if we already timed out.
            let _ = tx.send(auth.current_session());
        });
    if let Err(err) = spawned {
        warn!("session check: spawn worker: {}", err);
        return None;
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(found)) => {
            debug!(signed_in = found.is_some(), "session check resolved");
            found
        }
        Ok(Err(err)) => {
            warn!("session check failed: {:#}", err);
            None
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!("session check timed out after {:?}", timeout);
            None
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            warn!("session check worker exited without a result");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
