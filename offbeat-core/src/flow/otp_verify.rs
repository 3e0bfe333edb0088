use offbeat_model::PhoneNumber;

use super::route::Route;
use crate::code_input::{CellEvent, CodeInput, EventResponse};
use crate::validation::{validate_otp, validate_phone};

/// State of the code verification screen.
///
/// Owns the code value on behalf of the segmented input, the way a screen
/// binds a controlled widget.
#[derive(Debug, Clone)]
pub struct OtpVerification {
    phone: PhoneNumber,
    code: String,
    input: CodeInput,
}

impl OtpVerification {
    pub fn new(phone: PhoneNumber, length: usize) -> Self {
        Self {
            phone,
            code: String::new(),
            input: CodeInput::mount(length, ""),
        }
    }

    /// Open the screen from a `phone` query parameter. Without a usable
    /// number the caller is sent back to phone entry.
    pub fn open(phone: Option<&str>, length: usize) -> Result<Self, Route> {
        match phone.map(validate_phone) {
            Some(Ok(phone)) => Ok(Self::new(phone, length)),
            Some(Err(err)) => {
                tracing::error!("[OtpVerification] {}", err);
                Err(Route::EnterPhone)
            }
            None => {
                tracing::error!("[OtpVerification] No phone number provided");
                Err(Route::EnterPhone)
            }
        }
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn formatted_phone(&self) -> String {
        self.phone.display()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn input(&self) -> &CodeInput {
        &self.input
    }

    /// Route a cell event through the segmented input.
    pub fn handle(&mut self, index: usize, event: CellEvent<'_>) -> EventResponse {
        let mut changed = None;
        let response =
            self.input
                .handle(index, event, &self.code, |next| changed = Some(next));
        if let Some(next) = changed {
            self.code = next;
        }
        response
    }

    /// Event at whichever cell currently holds focus.
    pub fn handle_focused(&mut self, event: CellEvent<'_>) -> EventResponse {
        self.handle(self.input.focused(), event)
    }

    pub fn can_verify(&self) -> bool {
        validate_otp(&self.code, self.input.length()).is_ok()
    }

    pub fn verify(&self) -> Option<Route> {
        if let Err(err) = validate_otp(&self.code, self.input.length()) {
            tracing::warn!("[OtpVerification] {}", err);
            return None;
        }
        tracing::info!(
            "[OtpVerification] Verified code for {}",
            self.formatted_phone()
        );
        Some(Route::UserInfo)
    }

    /// Clear the code after requesting a new one.
    pub fn resend(&mut self) {
        tracing::info!(
            "[OtpVerification] Resending code to {}",
            self.formatted_phone()
        );
        self.code.clear();
        self.input = CodeInput::mount(self.input.length(), "");
    }
}
