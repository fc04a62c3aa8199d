//! USB HID keyboard report (boot protocol compatible) and its encoder.
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes, oldest first
//! ```

use std::sync::Arc;

use heapless::Vec as SlotVec;

use super::sink::ReportSink;
use crate::error::Result;

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Host-to-device LED report size in bytes.
pub const KEYBOARD_LED_REPORT_SIZE: usize = 1;

/// Number of simultaneously reported non-modifier keys.
pub const KEY_SLOTS: usize = 6;

/// First and last modifier usage (Left Control .. Right GUI).
const MODIFIER_FIRST: u8 = 0xE0;
const MODIFIER_LAST: u8 = 0xE7;

// LED bits of the output report
pub const LED_NUM_LOCK: u8 = 0x01;
pub const LED_CAPS_LOCK: u8 = 0x02;
pub const LED_SCROLL_LOCK: u8 = 0x04;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00, HID 1.11 appendix B).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (8, or 0 if `buf` is too short).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// Returns `true` if no keys are pressed.
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Bit of `usage` in the modifier byte, if it is a modifier usage.
pub fn modifier_bit(usage: u8) -> Option<u8> {
    if (MODIFIER_FIRST..=MODIFIER_LAST).contains(&usage) {
        Some(1 << (usage - MODIFIER_FIRST))
    } else {
        None
    }
}

/// Pressed-key state machine for one input device.
///
/// Every mutation emits the full 8-byte report. Past six keys the oldest
/// pressed key is evicted so the most recent presses win.
pub struct Keyboard {
    sink: Arc<dyn ReportSink>,
    modifier: u8,
    keys: SlotVec<u8, KEY_SLOTS>,
}

impl Keyboard {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            sink,
            modifier: 0,
            keys: SlotVec::new(),
        }
    }

    /// Current report state.
    pub fn report(&self) -> KeyboardReport {
        let mut keycodes = [0u8; KEY_SLOTS];
        keycodes[..self.keys.len()].copy_from_slice(&self.keys);
        KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            keycodes,
        }
    }

    pub async fn press(&mut self, usage: u8) -> Result<()> {
        self.record_press(usage);
        self.emit().await
    }

    pub async fn release(&mut self, usage: u8) -> Result<()> {
        self.record_release(usage);
        self.emit().await
    }

    pub async fn release_all(&mut self) -> Result<()> {
        self.modifier = 0;
        self.keys.clear();
        self.emit().await
    }

    /// LED bitfield last written by the host (`LED_*`), if any.
    pub fn led_status(&self) -> Result<Option<u8>> {
        Ok(self
            .sink
            .last_received_report()?
            .and_then(|report| report.first().copied()))
    }

    fn record_press(&mut self, usage: u8) {
        if let Some(bit) = modifier_bit(usage) {
            self.modifier |= bit;
            return;
        }
        if usage == 0 || self.keys.contains(&usage) {
            return;
        }
        if self.keys.is_full() {
            self.keys.remove(0);
        }
        let pushed = self.keys.push(usage);
        debug_assert!(pushed.is_ok());
    }

    fn record_release(&mut self, usage: u8) {
        if let Some(bit) = modifier_bit(usage) {
            self.modifier &= !bit;
            return;
        }
        self.keys.retain(|&k| k != usage);
    }

    async fn emit(&self) -> Result<()> {
        self.sink.send_report(&self.report().to_bytes()).await
    }
}

// USB HID report descriptor for a boot-protocol keyboard

/// USB HID Report Descriptor for a standard keyboard.
///
/// This descriptor tells the USB host that we are a keyboard with:
///   - 8 modifier key bits (input)
///   - 1 reserved byte
///   - 5 LED indicators (output)
///   - 6 key code bytes (input)
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - LED output (5 bits + 3 padding) -
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_bits_cover_e0_to_e7() {
        assert_eq!(modifier_bit(0xE0), Some(0x01));
        assert_eq!(modifier_bit(0xE1), Some(0x02));
        assert_eq!(modifier_bit(0xE7), Some(0x80));
        assert_eq!(modifier_bit(0x04), None);
        assert_eq!(modifier_bit(0xE8), None);
    }

    #[test]
    fn serialize_rejects_short_buffer() {
        let report = KeyboardReport::default();
        let mut small_buf = [0u8; 4];
        assert_eq!(report.serialize(&mut small_buf), 0);
    }
}
