//! USB HID mouse report (boot protocol compatible) and its encoder.
//!
//! Layout (4 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, -127..127)
//! ```

use std::sync::Arc;

use super::sink::ReportSink;
use crate::error::Result;

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 4;

/// Largest displacement a single report can carry on any axis.
pub const MAX_STEP: i32 = 127;

// Button bits
pub const BUTTON_LEFT: u8 = 0x01;
pub const BUTTON_RIGHT: u8 = 0x02;
pub const BUTTON_MIDDLE: u8 = 0x04;

/// Standard USB HID boot-protocol mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (4, or 0 if `buf` is too short).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }

    pub fn to_bytes(&self) -> [u8; MOUSE_REPORT_SIZE] {
        let mut buf = [0u8; MOUSE_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }
}

/// Clamp `value` into one report's displacement range.
fn step(value: i32) -> i8 {
    value.clamp(-MAX_STEP, MAX_STEP) as i8
}

/// Button and motion encoder for one input device.
pub struct Mouse {
    sink: Arc<dyn ReportSink>,
    buttons: u8,
}

impl Mouse {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink, buttons: 0 }
    }

    /// Currently held buttons.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    /// Hold `mask` and emit a button-only report.
    pub async fn press(&mut self, mask: u8) -> Result<()> {
        self.buttons |= mask;
        self.send(MouseReport {
            buttons: self.buttons,
            ..MouseReport::default()
        })
        .await
    }

    /// Let go of `mask` and emit a button-only report.
    pub async fn release(&mut self, mask: u8) -> Result<()> {
        self.buttons &= !mask;
        self.send(MouseReport {
            buttons: self.buttons,
            ..MouseReport::default()
        })
        .await
    }

    pub async fn release_all(&mut self) -> Result<()> {
        self.release(u8::MAX).await
    }

    /// Move by the given deltas, splitting them over as many reports as
    /// needed to stay within ±127 per axis. A zero move emits nothing.
    pub async fn move_by(&mut self, dx: i32, dy: i32, wheel: i32) -> Result<()> {
        let (mut dx, mut dy, mut wheel) = (dx, dy, wheel);
        while dx != 0 || dy != 0 || wheel != 0 {
            let report = MouseReport {
                buttons: self.buttons,
                x: step(dx),
                y: step(dy),
                wheel: step(wheel),
            };
            self.send(report).await?;
            dx -= i32::from(report.x);
            dy -= i32::from(report.y);
            wheel -= i32::from(report.wheel);
        }
        Ok(())
    }

    async fn send(&self, report: MouseReport) -> Result<()> {
        self.sink.send_report(&report.to_bytes()).await
    }
}

// USB HID report descriptor for a boot-protocol mouse

/// USB HID Report Descriptor for a standard 3-button mouse with scroll wheel.
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (3 bits + 5 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x03, //     Usage Maximum (Button 3)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x03, //     Report Count (3)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x05, //     Report Size (5)
    0x81, 0x01, //     Input (Constant) - padding
    //
    //   - X, Y displacement -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Scroll wheel -
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];
