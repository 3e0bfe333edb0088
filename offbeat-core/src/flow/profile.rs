use offbeat_model::UserPatch;

use super::route::Route;
use crate::session::SessionStore;
use crate::validation::validate_full_name;

/// State of the "what is your name?" screen.
#[derive(Debug, Clone, Default)]
pub struct ProfileCompletion {
    name: String,
    submitting: bool,
}

impl ProfileCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && validate_full_name(&self.name).is_ok()
    }

    /// Save the name on the signed-in user and head home.
    ///
    /// Stays on the screen when the name is invalid or nobody is signed in.
    pub fn submit(&mut self, store: &SessionStore) -> Option<Route> {
        let name = match validate_full_name(&self.name) {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!("[ProfileCompletion] {}", err);
                return None;
            }
        };

        if store.user().is_none() {
            tracing::warn!("[ProfileCompletion] No signed-in user; profile not saved");
            return None;
        }

        self.submitting = true;
        store.update_user(UserPatch::full_name(name));
        self.submitting = false;
        tracing::info!("[ProfileCompletion] Profile updated");
        Some(Route::Home)
    }
}
