// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the secret codec applied to credentials at rest
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("ciphertext too short to carry a nonce")]
    Truncated,

    #[error("encryption failed")]
    Encrypt,

    #[error("decryption failed (wrong key or corrupted ciphertext)")]
    Decrypt,

    #[error("decrypted bytes are not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Errors that can occur loading or persisting the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Malformed config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Cannot decode stored password for cluster {name:?}: {source}")]
    Secret {
        name: String,
        #[source]
        source: SecretError,
    },

    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors from cluster registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A cluster named {name:?} already exists")]
    DuplicateName { name: String },

    #[error("No cluster registered with id {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_io_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ConfigError::io("/home/user/joint.json", io_err);
        assert!(matches!(err, ConfigError::PermissionDenied { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
        let err = ConfigError::io("/home/user/joint.json", io_err);
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Parse {
            path: "/home/user/joint.json".into(),
            message: "expected value at line 1".into(),
        };
        assert!(err.to_string().contains("joint.json"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::DuplicateName { name: "prod".into() };
        assert!(err.to_string().contains("prod"));

        let err = RegistryError::NotFound { id: "abc-123".into() };
        assert!(err.to_string().contains("abc-123"));
    }
}
