//! Session state snapshot

use offbeat_model::{AuthToken, User};

/// Whether a user record represents a signed-in session.
///
/// This is the only place the authenticated flag comes from; it is never
/// persisted on its own.
pub fn derive_authenticated(user: Option<&User>) -> bool {
    user.is_some_and(|user| user.token.is_some())
}

/// Immutable view of the session.
///
/// Both fields change together: every state is built from a user record
/// and its flag is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    is_authenticated: bool,
}

impl SessionState {
    /// State with no user.
    pub fn empty() -> Self {
        Self::default()
    }

    /// State holding `user`, with the flag derived from it.
    pub fn from_user(user: Option<User>) -> Self {
        let is_authenticated = derive_authenticated(user.as_ref());
        Self {
            user,
            is_authenticated,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Bearer token of the current user, if any.
    pub fn token(&self) -> Option<&AuthToken> {
        self.user.as_ref().and_then(|user| user.token.as_ref())
    }

    pub(crate) fn take_user(&mut self) -> Option<User> {
        self.is_authenticated = false;
        self.user.take()
    }
}
