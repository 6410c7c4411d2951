//! Authenticated HTTP relay for registered clusters.
//!
//! Resolves a cluster id through the registry, dispatches the request with
//! the profile's credentials and TLS policy, and normalizes the outcome into
//! a success/failure envelope. Typed helpers for the endpoints the console
//! uses live in [`api`].

pub mod api;
pub mod client;
pub mod error;

pub use api::{ApiError, ClusterInfo, ClusterVersion, IndexRecord, NodeRecord};
pub use client::{RelayClient, ResponseBody, ResponseEnvelope};
pub use error::RelayError;

pub use reqwest::Method;
