//! Report sinks: where encoded reports go.

use async_trait::async_trait;

use crate::error::Result;

/// Destination for the reports of one HID profile.
///
/// Implemented by the `/dev/hidgN` writer and by [`NullSink`] for sandbox
/// runs. Sinks are shared between relays, so every method takes `&self`.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Write one complete report. Errors are returned as-is, never retried.
    async fn send_report(&self, report: &[u8]) -> Result<()>;

    /// Most recent host-to-device (output) report, without blocking.
    fn last_received_report(&self) -> Result<Option<Vec<u8>>>;
}

/// Sink that accepts and discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

#[async_trait]
impl ReportSink for NullSink {
    async fn send_report(&self, _report: &[u8]) -> Result<()> {
        Ok(())
    }

    fn last_received_report(&self) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}
