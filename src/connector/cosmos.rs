//! Write generated records into an Azure Cosmos DB container.
//!
//! The database and the collection are provisioned on demand, the collection
//! partitioned on the `/id` field. Every write reports the request charge
//! billed by the service.
//!
//! ### Configuration
//!
//! | key        | alias  | Description                                         | Default Value | Possible Values   |
//! | ---------- | ------ | --------------------------------------------------- | ------------- | ----------------- |
//! | type       | -      | Required in order to use this connector             | `cosmos`      | `cosmos`          |
//! | account    | -      | Name of the Cosmos DB account                       | ``            | String            |
//! | key        | -      | Primary key of the account                          | ``            | Base64 string     |
//! | database   | db     | Database that holds the collection                  | `db`          | String            |
//! | collection | col    | Collection that receives the documents              | `keys`        | String            |
//! | is_upsert  | upsert | Replace a document that already carries the same id | `false`       | `true` / `false`  |
//!
//! ### Examples
//!
//! ```json
//! {
//!     "type": "cosmos",
//!     "account": "my-account",
//!     "key": "bXktcHJpbWFyeS1rZXk=",
//!     "db": "db",
//!     "col": "keys"
//! }
//! ```
use super::{Connector, WriteReceipt, WriteStatus};
use crate::record::Record;
use async_trait::async_trait;
use azure_core::StatusCode;
use azure_data_cosmos::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Error, ErrorKind, Result};
use tracing::instrument;

/// All collections are partitioned on the record identifier.
const PARTITION_KEY_PATH: &str = "/id";

pub const DEFAULT_DATABASE: &str = "db";
pub const DEFAULT_COLLECTION: &str = "keys";

#[derive(Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Cosmos {
    pub account: String,
    #[serde(skip_serializing)]
    pub key: String,
    #[serde(alias = "db")]
    pub database: String,
    #[serde(alias = "col")]
    pub collection: String,
    #[serde(alias = "upsert")]
    pub is_upsert: bool,
}

impl Default for Cosmos {
    fn default() -> Self {
        Cosmos {
            account: Default::default(),
            key: Default::default(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            is_upsert: false,
        }
    }
}

impl fmt::Display for Cosmos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

// Not display the account key.
impl fmt::Debug for Cosmos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cosmos")
            .field("account", &self.account)
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("is_upsert", &self.is_upsert)
            .finish()
    }
}

impl Cosmos {
    fn client(&self) -> Result<CosmosClient> {
        let authorization_token = AuthorizationToken::primary_key(&self.key)
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

        Ok(CosmosClient::new(self.account.clone(), authorization_token))
    }
}

/// The service answers 409 Conflict when the resource already exists.
fn is_conflict(e: &azure_core::error::Error) -> bool {
    e.as_http_error()
        .map(|http_error| http_error.status() == StatusCode::Conflict)
        .unwrap_or(false)
}

#[async_trait]
impl Connector for Cosmos {
    /// See [`Connector::path`] for more details.
    fn path(&self) -> String {
        format!("{}/{}/{}", self.account, self.database, self.collection)
    }
    /// See [`Connector::provision`] for more details.
    ///
    /// # Example
    /// ```rust,no_run
    /// use cosmoseed::connector::cosmos::Cosmos;
    /// use cosmoseed::connector::Connector;
    /// use std::io;
    ///
    /// #[tokio::main]
    /// async fn main() -> io::Result<()> {
    ///     let mut connector = Cosmos::default();
    ///     connector.account = std::env::var("COSMOS_ACCOUNT").unwrap();
    ///     connector.key = std::env::var("COSMOS_KEY").unwrap();
    ///
    ///     connector.provision().await?;
    ///     // A second call finds the resources in place and changes nothing.
    ///     connector.provision().await?;
    ///
    ///     Ok(())
    /// }
    /// ```
    #[instrument(name = "cosmos::provision")]
    async fn provision(&mut self) -> Result<()> {
        let client = self.client()?;

        match client.create_database(&self.database).await {
            Ok(_) => info!(database = self.database.as_str(), "The database has been created"),
            Err(e) if is_conflict(&e) => {
                trace!(database = self.database.as_str(), "The database already exists")
            }
            Err(e) => return Err(Error::new(ErrorKind::Interrupted, e)),
        };

        let database = client.database_client(self.database.clone());
        match database
            .create_collection(self.collection.clone(), PARTITION_KEY_PATH)
            .await
        {
            Ok(_) => info!(
                collection = self.collection.as_str(),
                "The collection has been created"
            ),
            Err(e) if is_conflict(&e) => {
                trace!(collection = self.collection.as_str(), "The collection already exists")
            }
            Err(e) => return Err(Error::new(ErrorKind::Interrupted, e)),
        };

        Ok(())
    }
    /// See [`Connector::send`] for more details.
    ///
    /// # Example
    /// ```rust,no_run
    /// use cosmoseed::connector::cosmos::Cosmos;
    /// use cosmoseed::connector::Connector;
    /// use cosmoseed::record::Record;
    /// use std::io;
    ///
    /// #[tokio::main]
    /// async fn main() -> io::Result<()> {
    ///     let mut connector = Cosmos::default();
    ///     connector.account = std::env::var("COSMOS_ACCOUNT").unwrap();
    ///     connector.key = std::env::var("COSMOS_KEY").unwrap();
    ///     connector.provision().await?;
    ///
    ///     let receipt = connector.send(&Record::generate()).await?;
    ///     assert!(0.0 < receipt.charge, "The service should bill the write.");
    ///
    ///     Ok(())
    /// }
    /// ```
    #[instrument(name = "cosmos::send", skip(record), fields(id = record.id.as_str()))]
    async fn send(&mut self, record: &Record) -> Result<WriteReceipt> {
        let client = self.client()?;
        let collection = client
            .database_client(self.database.clone())
            .collection_client(self.collection.clone());

        let response = collection
            .create_document(record.clone())
            .is_upsert(self.is_upsert)
            .await
            .map_err(|e| Error::new(ErrorKind::Interrupted, e))?;

        let status = match response.is_update {
            true => WriteStatus::Updated,
            false => WriteStatus::Created,
        };

        trace!(
            charge = response.charge,
            activity_id = format!("{}", response.activity_id).as_str(),
            "The document has been written"
        );

        Ok(WriteReceipt {
            status,
            charge: response.charge,
        })
    }
}
