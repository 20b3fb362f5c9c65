//! Keep the sent records in process memory.
//!
//! Behaves like the remote container for everything the write loop observes:
//! provisioning is idempotent, a duplicate identifier is rejected and every
//! write is billed a fixed charge. Used by tests and examples, no network.
//!
//! ### Configuration
//!
//! | key              | alias | Description                          | Default Value | Possible Values |
//! | ---------------- | ----- | ------------------------------------ | ------------- | --------------- |
//! | type             | -     | Required in order to use this connector | `in_memory` | `in_memory` / `mem` |
//! | charge_per_write | -     | Request units billed for each write  | `1.0`         | positive number |
use super::{Connector, WriteReceipt, WriteStatus};
use crate::record::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::{Error, ErrorKind, Result};
use std::sync::{Arc, Mutex};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct InMemory {
    pub charge_per_write: f64,
    // The stored documents, like if they were in remote.
    #[serde(skip)]
    pub documents: Arc<Mutex<Vec<Value>>>,
}

impl Default for InMemory {
    fn default() -> Self {
        InMemory {
            charge_per_write: 1.0,
            documents: Default::default(),
        }
    }
}

impl fmt::Display for InMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl InMemory {
    pub fn new() -> Self {
        InMemory::default()
    }
    /// Snapshot of the documents written so far.
    pub fn stored(&self) -> Vec<Value> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for InMemory {
    /// See [`Connector::path`] for more details.
    fn path(&self) -> String {
        "in_memory".to_string()
    }
    /// See [`Connector::provision`] for more details.
    async fn provision(&mut self) -> Result<()> {
        Ok(())
    }
    /// See [`Connector::send`] for more details.
    ///
    /// # Example
    /// ```rust
    /// use cosmoseed::connector::in_memory::InMemory;
    /// use cosmoseed::connector::{Connector, WriteStatus};
    /// use cosmoseed::record::Record;
    /// use std::io;
    ///
    /// #[tokio::main]
    /// async fn main() -> io::Result<()> {
    ///     let mut connector = InMemory::new();
    ///     connector.provision().await?;
    ///
    ///     let receipt = connector.send(&Record::generate()).await?;
    ///     assert_eq!(WriteStatus::Created, receipt.status);
    ///     assert_eq!(1.0, receipt.charge);
    ///     assert_eq!(1, connector.stored().len());
    ///
    ///     Ok(())
    /// }
    /// ```
    async fn send(&mut self, record: &Record) -> Result<WriteReceipt> {
        let document = serde_json::to_value(record)?;
        let mut documents = self.documents.lock().unwrap();

        if documents
            .iter()
            .any(|stored| stored.get("id") == document.get("id"))
        {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                format!("A document with the id '{}' already exists.", record.id),
            ));
        }

        documents.push(document);

        Ok(WriteReceipt {
            status: WriteStatus::Created,
            charge: self.charge_per_write,
        })
    }
}
