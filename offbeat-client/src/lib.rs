//! HTTP access for the Offbeat client.
//!
//! [`ApiClient`] reads the bearer token from a shared
//! [`SessionStore`](offbeat_core::SessionStore) and signs the user out when
//! the server answers 401. Failures are normalized into [`ApiError`].
#![allow(missing_docs)]

pub mod api_client;
pub mod error;

pub use api_client::{ApiClient, UnauthorizedHook};
pub use error::{ApiError, FieldErrors, default_message};
