pub mod cosmos;
pub mod in_memory;

use self::cosmos::Cosmos;
use self::in_memory::InMemory;
use crate::record::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Result;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum ConnectorType {
    #[serde(rename = "cosmos")]
    Cosmos(Cosmos),
    #[serde(rename = "in_memory")]
    #[serde(alias = "mem")]
    InMemory(InMemory),
}

impl Default for ConnectorType {
    fn default() -> Self {
        ConnectorType::InMemory(InMemory::default())
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorType::Cosmos(connector) => write!(f, "{}", connector),
            ConnectorType::InMemory(connector) => write!(f, "{}", connector),
        }
    }
}

impl ConnectorType {
    pub fn connector_inner(self) -> Box<dyn Connector> {
        match self {
            ConnectorType::Cosmos(connector) => Box::new(connector),
            ConnectorType::InMemory(connector) => Box::new(connector),
        }
    }
    pub fn connector(&self) -> &dyn Connector {
        match self {
            ConnectorType::Cosmos(ref connector) => connector,
            ConnectorType::InMemory(ref connector) => connector,
        }
    }
    pub fn connector_mut(&mut self) -> &mut dyn Connector {
        match self {
            ConnectorType::Cosmos(ref mut connector) => connector,
            ConnectorType::InMemory(ref mut connector) => connector,
        }
    }
}

/// Result status of one create operation, as the service reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// The document was inserted.
    Created,
    /// An upsert replaced a document that already carried the identifier.
    Updated,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStatus::Created => write!(f, "201 Created"),
            WriteStatus::Updated => write!(f, "200 OK"),
        }
    }
}

/// What the connector reports back for one successful write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteReceipt {
    pub status: WriteStatus,
    /// Request charge of the operation, in request units.
    pub charge: f64,
}

/// Struct that implement this trait can provision a remote container and send
/// records into it.
#[async_trait]
pub trait Connector: fmt::Debug + fmt::Display + Send + Sync {
    /// Get the resolved path of the remote resource.
    fn path(&self) -> String;
    /// Ensure the database and the collection exist, creating them if missing.
    /// Idempotent. Called once, before any write.
    async fn provision(&mut self) -> Result<()>;
    /// Submit one record as a create operation and report its receipt.
    async fn send(&mut self, record: &Record) -> Result<WriteReceipt>;
}
