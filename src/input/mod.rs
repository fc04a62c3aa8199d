//! Input side - kernel event devices relayed to the gadget.
//!
//! ```text
//! RelayController ──discovers──▶ DeviceProvider
//!        │
//!        └─spawns one DeviceRelay per path
//!                 │ EventStream::next_event
//!                 ▼
//!            translate ──▶ Keyboard / Mouse / ConsumerControl ──▶ ReportSink
//! ```

pub mod controller;
pub mod ecodes;
pub mod evdev_source;
pub mod identifier;
pub mod relay;
pub mod translate;

use async_trait::async_trait;

use crate::error::Result;

pub use controller::RelayController;
pub use evdev_source::EvdevProvider;
pub use identifier::{DeviceIdentifier, IdentifierKind};
pub use relay::{DeviceRelay, RelayOutcome, RelayState};

/// One kernel input event record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub const fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }
}

/// A discovered input device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Event node, e.g. `/dev/input/event3`. Unique per relay.
    pub path: String,
    /// Name reported by the driver.
    pub name: String,
    /// Unique id, the Bluetooth address for BT devices.
    pub uniq: Option<String>,
}

/// Ordered event stream of one opened device.
#[async_trait]
pub trait EventStream: Send {
    /// Wait for the next event. The device handle closes when the stream
    /// is dropped.
    async fn next_event(&mut self) -> Result<RawEvent>;
}

/// Source of input devices.
#[async_trait]
pub trait DeviceProvider: Send + Sync {
    /// Every readable input device currently present.
    fn list(&self) -> Result<Vec<DeviceInfo>>;

    /// Open `device` for reading, optionally with an exclusive grab.
    async fn open(&self, device: &DeviceInfo, grab: bool) -> Result<Box<dyn EventStream>>;
}
