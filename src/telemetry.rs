//! Per-write telemetry lines and the running totals.
use crate::connector::{WriteReceipt, WriteStatus};
use std::fmt;
use std::time::Duration;

/// Telemetry of one write: its position in the run, the receipt returned by
/// the connector and the measured wall-clock latency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteReport {
    pub position: usize,
    pub receipt: WriteReceipt,
    pub latency: Duration,
}

impl fmt::Display for WriteReport {
    /// Render the per-write console line.
    ///
    /// # Example
    /// ```
    /// use cosmoseed::connector::{WriteReceipt, WriteStatus};
    /// use cosmoseed::telemetry::WriteReport;
    /// use std::time::Duration;
    ///
    /// let report = WriteReport {
    ///     position: 1,
    ///     receipt: WriteReceipt { status: WriteStatus::Created, charge: 6.29 },
    ///     latency: Duration::from_millis(12),
    /// };
    /// assert_eq!(
    ///     "Status code for document 1: 201 Created, RU: 6.29, Latency: 12ms",
    ///     format!("{}", report)
    /// );
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status code for document {}: {}, RU: {}, Latency: {:?}",
            self.position, self.receipt.status, self.receipt.charge, self.latency
        )
    }
}

/// Running totals over a whole run. The only state shared between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub writes: usize,
    pub total_charge: f64,
    pub total_latency: Duration,
}

impl Summary {
    /// Fold one write into the totals.
    pub fn push(&mut self, report: &WriteReport) {
        self.writes += 1;
        self.total_charge += report.receipt.charge;
        self.total_latency += report.latency;
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total RU: {}, Total Latency: {:?}",
            self.total_charge, self.total_latency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(position: usize, charge: f64, latency_ms: u64) -> WriteReport {
        WriteReport {
            position,
            receipt: WriteReceipt {
                status: WriteStatus::Created,
                charge,
            },
            latency: Duration::from_millis(latency_ms),
        }
    }

    #[test]
    fn push_accumulates_charges_and_latencies() {
        let mut summary = Summary::default();
        summary.push(&report(1, 6.29, 10));
        summary.push(&report(2, 6.29, 20));
        summary.push(&report(3, 7.5, 30));

        assert_eq!(3, summary.writes);
        assert_eq!(6.29 + 6.29 + 7.5, summary.total_charge);
        assert_eq!(Duration::from_millis(60), summary.total_latency);
    }
    #[test]
    fn the_summary_line_has_the_expected_shape() {
        let mut summary = Summary::default();
        summary.push(&report(1, 1.0, 5));
        summary.push(&report(2, 2.0, 5));

        assert_eq!("Total RU: 3, Total Latency: 10ms", format!("{}", summary));
    }
    #[test]
    fn an_updated_write_reports_the_other_status() {
        let mut line = report(4, 1.24, 3);
        line.receipt.status = WriteStatus::Updated;

        assert_eq!(
            "Status code for document 4: 200 OK, RU: 1.24, Latency: 3ms",
            format!("{}", line)
        );
    }
}
