//! bt2usb - relay Linux input devices to a USB HID gadget.
//!
//! Keyboards, mice and media remotes paired with the board (usually over
//! Bluetooth) show up as `/dev/input/event*` nodes. Their events are
//! translated into USB HID reports and written to a configfs composite
//! gadget, so the host on the other end of the USB cable sees plain wired
//! devices.
//!
//! Module map:
//!
//! - [`input`]: discovery, per-device relays, code translation
//! - [`hid`]: report layouts, descriptors and encoders
//! - [`usb`]: configfs gadget lifecycle and `/dev/hidgN` sinks
//! - [`config`], [`error`], [`logging`]: ambient plumbing

pub mod config;
pub mod error;
pub mod hid;
pub mod input;
pub mod logging;
pub mod usb;

pub use config::RelayConfig;
pub use error::{Error, Result};
