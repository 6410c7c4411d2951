use joint_core::RegistryError;
use thiserror::Error;

/// Errors from relaying a request to a cluster.
///
/// A well-formed non-2xx HTTP response is NOT an error — it comes back as a
/// `success: false` envelope. Errors mean the request could not be sent or
/// the cluster could not be resolved.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Unknown cluster id {id}")]
    UnknownCluster { id: String },

    #[error("Transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for RelayError {
    /// A missing id at the relay boundary is an unknown cluster; everything
    /// else passes through.
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound { id } => RelayError::UnknownCluster { id },
            other => RelayError::Registry(other),
        }
    }
}
