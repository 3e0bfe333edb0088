//! Authentication session: state, persistence and the store that ties them
//! together.

pub mod authenticator;
pub mod errors;
pub mod state;
pub mod storage;
pub mod store;

pub use authenticator::{Authenticator, StubAuthenticator};
pub use errors::{AuthenticatorError, SessionError, SessionResult, StorageError};
pub use state::{SessionState, derive_authenticated};
pub use storage::{
    DEFAULT_STORAGE_KEY, FileStore, KeyValueStore, MemoryStore, SessionStorage,
};
pub use store::{LoginOutcome, SessionStore};
