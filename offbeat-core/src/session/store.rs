//! Session store
//!
//! Holds the current [`SessionState`] behind a `watch` channel so any number
//! of readers can observe it without locks, while every write goes through
//! the three mutators below.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use offbeat_model::{AuthToken, Credentials, User, UserPatch};
use tokio::sync::watch;

use super::authenticator::{Authenticator, StubAuthenticator};
use super::errors::{SessionError, SessionResult, StorageError};
use super::state::{SessionState, derive_authenticated};
use super::storage::SessionStorage;

/// What happened to a login that resolved successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The new user is now the session.
    Applied,
    /// A logout happened while the login was in flight; the result was
    /// dropped and the session stays signed out.
    Superseded,
}

/// Injectable session state holder.
///
/// Clones share the same state. Construct one per app (or per test) and
/// hand it to whatever needs to read or change the session.
#[derive(Clone)]
pub struct SessionStore {
    sender: Arc<watch::Sender<SessionState>>,
    receiver: watch::Receiver<SessionState>,
    /// Bumped by every logout. A login only lands if it still matches the
    /// value it saw when it started.
    generation: Arc<AtomicU64>,
    storage: SessionStorage,
    authenticator: Arc<dyn Authenticator>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.receiver.borrow())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build a store and rehydrate it from `storage`.
    ///
    /// A missing, corrupted or outdated entry starts the session empty.
    pub fn new(
        storage: SessionStorage,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let user = match storage.load_user() {
            Ok(user) => user,
            Err(StorageError::UnsupportedVersion(version)) => {
                tracing::warn!(
                    "[SessionStore] Discarded session stored with unsupported version {}",
                    version
                );
                None
            }
            Err(err) => {
                tracing::warn!(
                    "[SessionStore] Failed to rehydrate session, starting signed out: {}",
                    err
                );
                None
            }
        };

        let state = SessionState::from_user(user);
        tracing::info!(
            "[SessionStore] Rehydrated from '{}' (authenticated: {})",
            storage.key(),
            state.is_authenticated()
        );

        let (sender, receiver) = watch::channel(state);
        Self {
            sender: Arc::new(sender),
            receiver,
            generation: Arc::new(AtomicU64::new(0)),
            storage,
            authenticator,
        }
    }

    /// In-memory store backed by the placeholder authenticator.
    pub fn in_memory() -> Self {
        Self::new(SessionStorage::memory(), Arc::new(StubAuthenticator::new()))
    }

    /// Get the current session state
    pub fn current(&self) -> SessionState {
        self.receiver.borrow().clone()
    }

    /// Access state without cloning
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        f(&self.receiver.borrow())
    }

    pub fn is_authenticated(&self) -> bool {
        self.receiver.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.receiver.borrow().user().cloned()
    }

    /// Token for outgoing requests.
    pub fn bearer_token(&self) -> Option<AuthToken> {
        self.receiver.borrow().token().cloned()
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.receiver.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Sign in with `credentials`.
    ///
    /// On error the session is left exactly as it was. A successful login
    /// that resolves after an intervening [`logout`](Self::logout) reports
    /// [`LoginOutcome::Superseded`] and changes nothing, so callers should
    /// re-check [`is_authenticated`](Self::is_authenticated) rather than
    /// assume their own login won.
    pub async fn login(
        &self,
        credentials: Credentials,
    ) -> SessionResult<LoginOutcome> {
        let started_at = self.generation();
        tracing::debug!(
            "[SessionStore] Login started for {}",
            credentials.phone_number.display()
        );

        let user = match self.authenticator.authenticate(&credentials).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("[SessionStore] Login failed: {}", err);
                return Err(SessionError::from(err));
            }
        };

        if !derive_authenticated(Some(&user)) {
            tracing::warn!(
                "[SessionStore] Login for {} returned no token",
                user.id
            );
            return Err(SessionError::MissingToken);
        }

        let mut applied = false;
        self.sender.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != started_at {
                return false;
            }
            *state = SessionState::from_user(Some(user));
            self.persist(state);
            applied = true;
            true
        });

        if applied {
            tracing::info!("[SessionStore] Login applied");
            Ok(LoginOutcome::Applied)
        } else {
            tracing::info!(
                "[SessionStore] Login resolved after logout; result discarded"
            );
            Ok(LoginOutcome::Superseded)
        }
    }

    /// Sign out. Idempotent.
    pub fn logout(&self) {
        self.sender.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SessionState::empty();
            self.persist(state);
        });
        tracing::info!("[SessionStore] Logged out");
    }

    /// Shallow-merge `patch` into the current user. Does nothing when
    /// nobody is signed in.
    pub fn update_user(&self, patch: UserPatch) {
        let updated = self.sender.send_if_modified(|state| {
            let Some(mut user) = state.take_user() else {
                return false;
            };
            user.merge(patch);
            *state = SessionState::from_user(Some(user));
            self.persist(state);
            true
        });

        if !updated {
            tracing::debug!("[SessionStore] update_user ignored: no user");
        }
    }

    /// Write the user record. Runs under the channel's write lock so stored
    /// entries follow the same order as state changes.
    fn persist(&self, state: &SessionState) {
        if let Err(err) = self.storage.save_user(state.user()) {
            tracing::warn!(
                "[SessionStore] Failed to persist session to '{}': {}",
                self.storage.key(),
                err
            );
        }
    }
}
