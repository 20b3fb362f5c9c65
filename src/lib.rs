#[macro_use]
extern crate tracing;

pub mod connector;
pub mod record;
pub mod telemetry;

use crate::connector::ConnectorType;
use crate::record::Record;
use crate::telemetry::{Summary, WriteReport};
use std::io;
use std::time::Instant;
use tracing::instrument;

/// Provision the connector resources, then generate and write `count` records
/// one-by-one. Each write is timed and printed on stdout with its status and
/// request charge; the totals line is printed once the whole loop succeeded.
///
/// Strictly sequential: a write completes or fails before the next record is
/// generated. The first failure aborts the run and the totals accumulated so
/// far are lost.
///
/// # Example
/// ```rust
/// use cosmoseed::connector::in_memory::InMemory;
/// use cosmoseed::connector::ConnectorType;
/// use std::io;
///
/// #[tokio::main]
/// async fn main() -> io::Result<()> {
///     let mut connector_type = ConnectorType::InMemory(InMemory::new());
///     let summary = cosmoseed::exec(3, &mut connector_type).await?;
///
///     assert_eq!(3, summary.writes);
///     assert_eq!(3.0, summary.total_charge);
///
///     Ok(())
/// }
/// ```
#[instrument(name = "exec", skip(connector_type))]
pub async fn exec(count: usize, connector_type: &mut ConnectorType) -> io::Result<Summary> {
    let connector = connector_type.connector_mut();

    trace!(
        path = connector.path().as_str(),
        count,
        "Provision the resources before to write"
    );
    connector.provision().await?;

    let mut summary = Summary::default();

    for position in 1..=count {
        let record = Record::generate();

        let start = Instant::now();
        let receipt = connector.send(&record).await?;
        let report = WriteReport {
            position,
            receipt,
            latency: start.elapsed(),
        };

        println!("{}", report);
        summary.push(&report);
    }

    println!("{}", summary);
    debug!(
        writes = summary.writes,
        total_charge = summary.total_charge,
        "Exec ended"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::in_memory::InMemory;
    use std::collections::HashSet;

    #[tokio::test]
    async fn exec_writes_the_requested_count() {
        let in_memory = InMemory::new();
        let mut connector_type = ConnectorType::InMemory(in_memory.clone());

        let summary = exec(3, &mut connector_type).await.unwrap();

        assert_eq!(3, summary.writes);
        assert_eq!(3.0, summary.total_charge);
        let documents = in_memory.stored();
        assert_eq!(3, documents.len());
        let ids: HashSet<&str> = documents
            .iter()
            .map(|document| document.get("id").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(3, ids.len(), "Each document should have its own id.");
    }
    #[tokio::test]
    async fn exec_with_a_zero_count_only_prints_the_totals() {
        let in_memory = InMemory::new();
        let mut connector_type = ConnectorType::InMemory(in_memory.clone());

        let summary = exec(0, &mut connector_type).await.unwrap();

        assert_eq!(Summary::default(), summary);
        assert!(in_memory.stored().is_empty());
    }
    #[tokio::test]
    async fn exec_accumulates_the_configured_charges() {
        let in_memory = InMemory {
            charge_per_write: 2.5,
            ..Default::default()
        };
        let mut connector_type = ConnectorType::InMemory(in_memory);

        let summary = exec(4, &mut connector_type).await.unwrap();

        assert_eq!(4, summary.writes);
        assert_eq!(10.0, summary.total_charge);
    }
}
