//! Sign-in screens: phone entry, code verification and profile completion.
//!
//! Each screen is plain state plus the operations its buttons trigger. The
//! rendering layer reads the state and forwards input; navigation happens
//! by following the returned [`Route`].

mod otp_verify;
mod phone_entry;
mod profile;
mod route;

pub use otp_verify::OtpVerification;
pub use phone_entry::PhoneEntry;
pub use profile::ProfileCompletion;
pub use route::Route;

/// Screen currently driving the sign-in flow.
#[derive(Debug, Clone)]
pub enum AuthFlow {
    EnteringPhone(PhoneEntry),
    VerifyingOtp(OtpVerification),
    CompletingProfile(ProfileCompletion),
    Done,
}

impl Default for AuthFlow {
    fn default() -> Self {
        AuthFlow::EnteringPhone(PhoneEntry::new())
    }
}

impl AuthFlow {
    /// Flow state for landing on `route`. Routes outside the sign-in flow
    /// finish it.
    pub fn for_route(route: &Route, otp_length: usize) -> Self {
        match route {
            Route::EnterPhone => AuthFlow::EnteringPhone(PhoneEntry::new()),
            Route::VerifyOtp { phone } => AuthFlow::VerifyingOtp(
                OtpVerification::new(phone.clone(), otp_length),
            ),
            Route::UserInfo => {
                AuthFlow::CompletingProfile(ProfileCompletion::new())
            }
            _ => AuthFlow::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, AuthFlow::Done)
    }
}
