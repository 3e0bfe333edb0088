//! Client core for Offbeat.
//!
//! - [`code_input`]: segmented one-time-passcode input
//! - [`session`]: persisted authentication session
//! - [`flow`]: sign-in screens and navigation routes
//! - [`debounce`], [`time_format`]: small helpers for the event screens
#![allow(missing_docs)]

pub mod code_input;
pub mod debounce;
pub mod flow;
pub mod session;
pub mod time_format;
pub mod validation;

pub use code_input::{
    CellEvent, CodeInput, DEFAULT_CODE_LENGTH, EventResponse,
};
pub use flow::{
    AuthFlow, OtpVerification, PhoneEntry, ProfileCompletion, Route,
};
pub use session::{
    Authenticator, LoginOutcome, SessionError, SessionState, SessionStorage,
    SessionStore, StubAuthenticator,
};
pub use validation::ValidationError;

/// Re-export of the model crate.
pub use offbeat_model as model;
