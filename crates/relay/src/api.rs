//! Typed conveniences over the relay for the endpoints the console actually
//! uses: cluster identity, node overview, index overview and management.

use reqwest::Method;
use serde::Deserialize;
use thiserror::Error;

use crate::client::{RelayClient, ResponseBody, ResponseEnvelope};
use crate::error::RelayError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Cluster returned HTTP {status}")]
    Status { status: u16 },

    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

/// Identity document from `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInfo {
    pub name: String,
    pub cluster_name: String,
    pub cluster_uuid: String,
    pub version: ClusterVersion,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterVersion {
    pub number: String,
}

/// One row of the compact node listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub ip: String,
    pub name: String,
    /// `*` marks the elected master, `-` everything else.
    pub master: String,
    pub role: String,
    pub cpu: String,
    pub ram_percent: String,
    pub heap_percent: String,
}

/// One row of the compact index listing.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    pub name: String,
    pub uuid: String,
    pub health: String,
    pub status: String,
    pub primaries: Option<u32>,
    pub replicas: Option<u32>,
    pub docs_count: Option<u64>,
    pub docs_deleted: Option<u64>,
    pub total_store: String,
    pub primary_store: String,
}

const CAT_NODES_PATH: &str = "/_cat/nodes?h=ip,name,master,role,cpu,ram.percent,heap.percent";

impl RelayClient {
    /// Fetch the cluster identity document (`GET /`).
    pub async fn cluster_info(&self, cluster_id: &str) -> Result<ClusterInfo, ApiError> {
        let envelope = self.request(cluster_id, Method::GET, "/", None).await?;
        let json = expect_json(envelope)?;
        serde_json::from_value(json).map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// Connection test; returns the server version string.
    pub async fn ping(&self, cluster_id: &str) -> Result<String, ApiError> {
        Ok(self.cluster_info(cluster_id).await?.version.number)
    }

    /// List nodes via the compact `_cat` interface.
    pub async fn cat_nodes(&self, cluster_id: &str) -> Result<Vec<NodeRecord>, ApiError> {
        let envelope = self
            .request(cluster_id, Method::GET, CAT_NODES_PATH, None)
            .await?;
        let text = expect_text(envelope)?;
        Ok(text.lines().filter_map(parse_node_row).collect())
    }

    /// List indices via the compact `_cat` interface.
    pub async fn cat_indices(&self, cluster_id: &str) -> Result<Vec<IndexRecord>, ApiError> {
        let envelope = self
            .request(cluster_id, Method::GET, "/_cat/indices", None)
            .await?;
        let text = expect_text(envelope)?;
        Ok(text.lines().filter_map(parse_index_row).collect())
    }

    /// Create an index with the given shard/replica settings.
    pub async fn create_index(
        &self,
        cluster_id: &str,
        name: &str,
        shards: u32,
        replicas: u32,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "settings": {
                "number_of_shards": shards,
                "number_of_replicas": replicas,
            }
        });
        let envelope = self
            .request(cluster_id, Method::PUT, &format!("/{name}"), Some(&body))
            .await?;
        ensure_success(&envelope)
    }

    /// Delete an index by name.
    pub async fn delete_index(&self, cluster_id: &str, name: &str) -> Result<(), ApiError> {
        let envelope = self
            .request(cluster_id, Method::DELETE, &format!("/{name}"), None)
            .await?;
        ensure_success(&envelope)
    }
}

fn ensure_success(envelope: &ResponseEnvelope) -> Result<(), ApiError> {
    if envelope.success {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: envelope.status,
        })
    }
}

fn expect_json(envelope: ResponseEnvelope) -> Result<serde_json::Value, ApiError> {
    if !envelope.success {
        return Err(ApiError::Status {
            status: envelope.status,
        });
    }
    match envelope.body {
        ResponseBody::Json(json) => Ok(json),
        ResponseBody::Text(_) => Err(ApiError::Shape("expected a JSON body".into())),
    }
}

fn expect_text(envelope: ResponseEnvelope) -> Result<String, ApiError> {
    if !envelope.success {
        return Err(ApiError::Status {
            status: envelope.status,
        });
    }
    match envelope.body {
        ResponseBody::Text(text) => Ok(text),
        // Some proxies label _cat output as JSON; the raw text is still what
        // the parsers want.
        ResponseBody::Json(json) => Ok(json.to_string()),
    }
}

/// Column order fixed by the `h=` parameter in [`CAT_NODES_PATH`].
fn parse_node_row(line: &str) -> Option<NodeRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        return None;
    }
    Some(NodeRecord {
        ip: fields[0].to_string(),
        name: fields[1].to_string(),
        master: fields[2].to_string(),
        role: fields[3].to_string(),
        cpu: fields[4].to_string(),
        ram_percent: fields[5].to_string(),
        heap_percent: fields[6].to_string(),
    })
}

/// Default `_cat/indices` column order:
/// health status index uuid pri rep docs.count docs.deleted store.size pri.store.size
fn parse_index_row(line: &str) -> Option<IndexRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 10 {
        return None;
    }
    Some(IndexRecord {
        health: fields[0].to_string(),
        status: fields[1].to_string(),
        name: fields[2].to_string(),
        uuid: fields[3].to_string(),
        primaries: fields[4].parse().ok(),
        replicas: fields[5].parse().ok(),
        docs_count: fields[6].parse().ok(),
        docs_deleted: fields[7].parse().ok(),
        total_store: fields[8].to_string(),
        primary_store: fields[9].to_string(),
    })
}
