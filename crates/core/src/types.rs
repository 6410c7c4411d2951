// crates/core/src/types.rs
//! Cluster profile data model.
//!
//! `ClusterProfileInput` is the unvalidated create/edit request shape; a
//! `ClusterProfile` always carries a full field set including its id.
//! Conversion happens once, at the registry boundary.

use serde::{Deserialize, Serialize};

/// Connection scheme for a registered cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_verify() -> bool {
    true
}

/// One registered cluster connection.
///
/// `password` is held decrypted in memory; the config store swaps it for
/// codec ciphertext on the way to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    /// Assigned on creation, immutable thereafter.
    pub id: String,
    /// User-facing label, unique across profiles (case-sensitive).
    pub name: String,
    pub protocol: Protocol,
    pub host: String,
    /// Expected range 1024–65535; enforced by the caller, not here.
    pub port: u16,
    /// TLS certificate validation; only meaningful for `https`.
    #[serde(default = "default_verify")]
    pub verify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ClusterProfile {
    /// Base URL without a trailing slash: `{protocol}://{host}:{port}`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Create/edit request for a cluster profile — everything but the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterProfileInput {
    pub name: String,
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    /// Defaults to `true` when unset.
    #[serde(default)]
    pub verify: Option<bool>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ClusterProfileInput {
    /// Promote to a full profile under a freshly assigned id.
    pub fn into_profile(self, id: String) -> ClusterProfile {
        ClusterProfile {
            id,
            name: self.name,
            protocol: self.protocol,
            host: self.host,
            port: self.port,
            verify: self.verify.unwrap_or(true),
            username: self.username,
            password: self.password,
        }
    }
}

/// The persisted container. The whole file is read and written wholesale;
/// there is no partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub clusters: Vec<ClusterProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn protocol_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Protocol::Https).unwrap(), "\"https\"");
        assert_eq!(
            serde_json::from_str::<Protocol>("\"http\"").unwrap(),
            Protocol::Http
        );
    }

    #[test]
    fn verify_defaults_to_true_when_absent() {
        let json = r#"{"id":"1","name":"legacy","protocol":"https","host":"es.local","port":9200}"#;
        let profile: ClusterProfile = serde_json::from_str(json).unwrap();
        assert!(profile.verify);
        assert_eq!(profile.username, None);
    }

    #[test]
    fn base_url_is_protocol_host_port() {
        let profile = ClusterProfileInput {
            name: "local".into(),
            protocol: Protocol::Http,
            host: "127.0.0.1".into(),
            port: 9200,
            verify: None,
            username: None,
            password: None,
        }
        .into_profile("id-1".into());

        assert_eq!(profile.base_url(), "http://127.0.0.1:9200");
        assert!(profile.verify);
    }

    #[test]
    fn absent_credentials_are_not_serialized() {
        let profile = ClusterProfileInput {
            name: "local".into(),
            protocol: Protocol::Http,
            host: "127.0.0.1".into(),
            port: 9200,
            verify: Some(false),
            username: None,
            password: None,
        }
        .into_profile("id-1".into());

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("username"));
        assert!(!json.contains("password"));
    }
}
