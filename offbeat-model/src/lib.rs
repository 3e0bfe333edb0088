//! Core data model definitions shared across Offbeat crates.
#![allow(missing_docs)]

pub mod credentials;
pub mod error;
pub mod phone;
pub mod user;

pub use credentials::Credentials;
pub use error::{ModelError, Result as ModelResult};
pub use phone::{PHONE_NUMBER_LEN, PhoneNumber, sanitize_phone_input};
pub use user::{AuthToken, User, UserId, UserPatch};
