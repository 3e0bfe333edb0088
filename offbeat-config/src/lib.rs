//! Configuration for the Offbeat client.
//!
//! Values are layered, lowest precedence first: built-in defaults, an
//! optional `offbeat.toml`, a `.env` file, then the process environment.
//! The resolved [`Config`] is plain data; nothing here touches the session
//! or the network.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, ConfigWarning,
    ConfigWarnings, error::ConfigLoadError,
};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    ApiConfig, AuthConfig, Config, ConfigMetadata, LogConfig, StorageConfig,
};
