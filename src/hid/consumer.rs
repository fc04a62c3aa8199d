//! Consumer Control HID support - media keys, volume, launchers, power.
//!
//! Consumer Control is a separate HID usage page (0x0C), exposed as its own
//! gadget function next to the keyboard and mouse. The report carries
//! exactly one active usage; pressing another one overwrites it.

use std::sync::Arc;

use super::sink::ReportSink;
use crate::error::Result;

/// Consumer control report size (2 bytes for usage ID).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Consumer Control HID report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    /// Active consumer control usage (little-endian u16), 0 when idle.
    pub usage: u16,
}

impl ConsumerReport {
    /// Serialize to USB HID report bytes.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        buf[..CONSUMER_REPORT_SIZE].copy_from_slice(&self.usage.to_le_bytes());
        CONSUMER_REPORT_SIZE
    }

    pub fn to_bytes(&self) -> [u8; CONSUMER_REPORT_SIZE] {
        self.usage.to_le_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.usage == 0
    }
}

/// Single-slot consumer control encoder.
pub struct ConsumerControl {
    sink: Arc<dyn ReportSink>,
    report: ConsumerReport,
}

impl ConsumerControl {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            sink,
            report: ConsumerReport::default(),
        }
    }

    pub fn report(&self) -> ConsumerReport {
        self.report
    }

    pub async fn press(&mut self, usage: u16) -> Result<()> {
        self.report.usage = usage;
        self.emit().await
    }

    pub async fn release(&mut self) -> Result<()> {
        self.report.usage = 0;
        self.emit().await
    }

    async fn emit(&self) -> Result<()> {
        self.sink.send_report(&self.report.to_bytes()).await
    }
}

/// USB HID Report Descriptor for Consumer Control.
///
/// A single 16-bit array field covering usages 0..=0x3FF.
pub const CONSUMER_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];
