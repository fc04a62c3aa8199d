//! USB gadget side - presents a composite HID device to the host.
//!
//! The Linux gadget framework is driven through configfs. We create a
//! **composite device** with one HID function per profile:
//!
//! - `hid.usb0`: Keyboard (boot protocol)
//! - `hid.usb1`: Mouse    (boot protocol)
//! - `hid.usb2`: Consumer control
//!
//! Each function surfaces as a `/dev/hidgN` character device that reports
//! are written to.

pub mod gadget;
pub mod hid_device;

pub use gadget::{GadgetGuard, GadgetManager, GadgetSinks};
pub use hid_device::HidGadgetSink;
