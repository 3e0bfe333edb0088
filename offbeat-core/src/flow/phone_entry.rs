use offbeat_model::{Credentials, sanitize_phone_input};

use super::route::Route;
use crate::session::{LoginOutcome, SessionStore};
use crate::validation::validate_phone;

/// State of the phone-number screen.
#[derive(Debug, Clone, Default)]
pub struct PhoneEntry {
    phone: String,
    submitting: bool,
    error: Option<String>,
}

impl PhoneEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed login, for the screen to display.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the field with the digits of `raw`, capped at ten.
    pub fn set_input(&mut self, raw: &str) {
        self.phone = sanitize_phone_input(raw);
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && validate_phone(&self.phone).is_ok()
    }

    /// Log in with the entered number.
    ///
    /// Returns the next route on success. On failure the submit button is
    /// re-enabled and the error kept for display.
    pub async fn submit(&mut self, store: &SessionStore) -> Option<Route> {
        let phone = match validate_phone(&self.phone) {
            Ok(phone) => phone,
            Err(err) => {
                tracing::warn!("[PhoneEntry] {}", err);
                return None;
            }
        };
        if self.submitting {
            return None;
        }

        self.submitting = true;
        self.error = None;
        let result = store.login(Credentials::phone(phone.clone())).await;
        self.submitting = false;

        match result {
            Ok(LoginOutcome::Applied) => {
                tracing::info!("[PhoneEntry] Login successful");
                Some(Route::VerifyOtp { phone })
            }
            Ok(LoginOutcome::Superseded) => None,
            Err(err) => {
                tracing::error!("[PhoneEntry] Login failed: {}", err);
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
