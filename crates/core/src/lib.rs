// crates/core/src/lib.rs
//! Cluster registry core: the profile data model, encrypted config
//! persistence, and the CRUD surface shared by the relay and the CLI.

pub mod error;
pub mod paths;
pub mod registry;
pub mod secret;
pub mod store;
pub mod types;

pub use error::{ConfigError, RegistryError, SecretError};
pub use registry::ClusterRegistry;
pub use secret::{AesGcmCodec, SecretCodec};
pub use store::ConfigStore;
pub use types::{ClusterProfile, ClusterProfileInput, ConfigFile, Protocol};
