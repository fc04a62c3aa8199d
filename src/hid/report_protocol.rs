//! HID Report Descriptor parser.
//!
//! Walks a report descriptor and summarises what the host will see: the
//! application collection it declares, the report ID it uses and the size
//! of its input and output reports. The gadget manager runs every built-in
//! descriptor through [`check_descriptor`] before exposing it, so a table
//! edit that breaks the report framing fails at startup instead of on the
//! host.
//!
//! ## HID Report Descriptor Structure
//!
//! A Report Descriptor is a sequence of items that describe the
//! format of HID reports. Key items:
//! - Usage Page: Category of usages (keyboard, mouse, consumer, etc.)
//! - Usage: Specific function within a page
//! - Report ID: Identifies which report follows (if multiple)
//! - Report Size: Bits per field
//! - Report Count: Number of fields
//! - Input/Output/Feature: Direction of the report
//!
//! ## Limitations
//!
//! This implementation handles common cases but not all of HID 1.11:
//! - Only the first application collection determines the kind
//! - Push/Pop state is not supported
//! - Delimiter tags are ignored

use tracing::debug;

use super::Profile;
use crate::error::{Error, Result};

/// Usage page codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsagePage {
    /// Generic Desktop (mouse, keyboard, joystick).
    GenericDesktop,
    /// Keyboard/Keypad.
    Keyboard,
    /// LEDs.
    Led,
    /// Button.
    Button,
    /// Consumer Control.
    Consumer,
    /// Unknown/unsupported.
    Unknown(u16),
}

impl From<u16> for UsagePage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => UsagePage::GenericDesktop,
            0x07 => UsagePage::Keyboard,
            0x08 => UsagePage::Led,
            0x09 => UsagePage::Button,
            0x0C => UsagePage::Consumer,
            other => UsagePage::Unknown(other),
        }
    }
}

// Generic Desktop usages naming an application collection
const DESKTOP_MOUSE: u16 = 0x02;
const DESKTOP_KEYBOARD: u16 = 0x06;
// Consumer page usage naming an application collection
const CONSUMER_CONTROL: u16 = 0x01;

// Collection type of an application collection
const COLLECTION_APPLICATION: u32 = 0x01;

/// What a report descriptor declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HidDescriptor {
    /// Profile named by the first application collection.
    pub kind: Option<Profile>,
    /// First report ID declared, if any.
    pub report_id: Option<u8>,
    /// Total bits of all Input items.
    pub input_bits: u32,
    /// Total bits of all Output items.
    pub output_bits: u32,
}

impl HidDescriptor {
    /// Input report length in bytes, without the report ID prefix.
    pub fn input_report_len(&self) -> usize {
        self.input_bits.div_ceil(8) as usize
    }

    /// Output report length in bytes, without the report ID prefix.
    pub fn output_report_len(&self) -> usize {
        self.output_bits.div_ceil(8) as usize
    }

    /// Parse a HID Report Descriptor.
    ///
    /// Returns `None` when the descriptor names no keyboard, mouse or
    /// consumer control collection.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut desc = HidDescriptor::default();

        // Parser state.
        let mut usage_page = UsagePage::Unknown(0);
        let mut usage: u16 = 0;
        let mut report_size: u32 = 0;
        let mut report_count: u32 = 0;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];
            let tag = (prefix >> 4) & 0x0F;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            if i + 1 + size > data.len() {
                debug!(offset = i, "HID descriptor: truncated item");
                break;
            }

            let value: u32 = match size {
                0 => 0,
                1 => data[i + 1] as u32,
                2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
                _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
            };

            match item_type {
                // Main items
                0 => {
                    match tag {
                        // Input
                        0x08 => desc.input_bits += report_size * report_count,
                        // Output
                        0x09 => desc.output_bits += report_size * report_count,
                        // Collection
                        0x0A => {
                            if value == COLLECTION_APPLICATION && desc.kind.is_none() {
                                desc.kind = application_kind(usage_page, usage);
                            }
                        }
                        _ => {}
                    }
                    // Local items only live until the next main item.
                    usage = 0;
                }
                // Global items
                1 => match tag {
                    // Usage Page
                    0x00 => usage_page = UsagePage::from(value as u16),
                    // Report Size
                    0x07 => report_size = value,
                    // Report ID
                    0x08 => {
                        if desc.report_id.is_none() {
                            desc.report_id = Some(value as u8);
                        }
                    }
                    // Report Count
                    0x09 => report_count = value,
                    _ => {}
                },
                // Local items
                2 => {
                    if tag == 0x00 {
                        usage = value as u16;
                    }
                }
                _ => {}
            }

            i += 1 + size;
        }

        if desc.kind.is_some() {
            Some(desc)
        } else {
            debug!("HID descriptor: no recognized application collection");
            None
        }
    }
}

fn application_kind(page: UsagePage, usage: u16) -> Option<Profile> {
    match (page, usage) {
        (UsagePage::GenericDesktop, DESKTOP_KEYBOARD) => Some(Profile::Keyboard),
        (UsagePage::GenericDesktop, DESKTOP_MOUSE) => Some(Profile::Mouse),
        (UsagePage::Consumer, CONSUMER_CONTROL) => Some(Profile::ConsumerControl),
        _ => None,
    }
}

/// Parse the built-in descriptor of `profile` and check it against the
/// report layout the encoders produce.
pub fn check_descriptor(profile: Profile) -> Result<HidDescriptor> {
    let mismatch = |detail| Error::DescriptorMismatch { profile, detail };

    let desc = HidDescriptor::parse(profile.report_descriptor())
        .ok_or_else(|| mismatch("no application collection"))?;
    if desc.kind != Some(profile) {
        return Err(mismatch("application collection names another profile"));
    }
    if desc.report_id != profile.report_id() {
        return Err(mismatch("report id differs"));
    }
    if desc.input_report_len() != profile.report_length() {
        return Err(mismatch("input report length differs"));
    }
    if desc.output_report_len() != profile.out_report_length() {
        return Err(mismatch("output report length differs"));
    }
    Ok(desc)
}
