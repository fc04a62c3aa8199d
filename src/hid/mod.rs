//! HID report types, encoders and the sink abstraction they write to.
//!
//! Each [`Profile`] owns a fixed report layout and descriptor:
//!
//! | Profile          | Report bytes | Encoder                        |
//! |------------------|--------------|--------------------------------|
//! | Keyboard         | 8            | [`keyboard::Keyboard`]         |
//! | Mouse            | 4            | [`mouse::Mouse`]               |
//! | ConsumerControl  | 2            | [`consumer::ConsumerControl`]  |

pub mod consumer;
pub mod keyboard;
pub mod mouse;
pub mod report_protocol;
pub mod sink;

#[cfg(test)]
mod tests;

use core::fmt;

pub use consumer::{ConsumerControl, ConsumerReport};
pub use keyboard::{Keyboard, KeyboardReport};
pub use mouse::{Mouse, MouseReport};
pub use sink::{NullSink, ReportSink};

/// One of the three HID profiles the gadget exposes, and the report channel
/// an input code is dispatched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Profile {
    Keyboard,
    Mouse,
    ConsumerControl,
}

impl Profile {
    /// All profiles, in gadget function order.
    pub const ALL: [Profile; 3] = [Profile::Keyboard, Profile::Mouse, Profile::ConsumerControl];

    /// USB HID report descriptor advertised to the host.
    pub fn report_descriptor(self) -> &'static [u8] {
        match self {
            Profile::Keyboard => keyboard::KEYBOARD_REPORT_DESCRIPTOR,
            Profile::Mouse => mouse::MOUSE_REPORT_DESCRIPTOR,
            Profile::ConsumerControl => consumer::CONSUMER_REPORT_DESCRIPTOR,
        }
    }

    /// Length of the device-to-host (input) report payload.
    pub fn report_length(self) -> usize {
        match self {
            Profile::Keyboard => keyboard::KEYBOARD_REPORT_SIZE,
            Profile::Mouse => mouse::MOUSE_REPORT_SIZE,
            Profile::ConsumerControl => consumer::CONSUMER_REPORT_SIZE,
        }
    }

    /// Length of the host-to-device (output) report, 0 if none.
    pub fn out_report_length(self) -> usize {
        match self {
            Profile::Keyboard => keyboard::KEYBOARD_LED_REPORT_SIZE,
            Profile::Mouse | Profile::ConsumerControl => 0,
        }
    }

    /// Report ID declared by the descriptor, if any.
    ///
    /// Every profile is its own HID function, so none of the built-in
    /// descriptors need one.
    pub fn report_id(self) -> Option<u8> {
        None
    }

    /// `bInterfaceProtocol` (1 = boot keyboard, 2 = boot mouse).
    pub fn protocol(self) -> u8 {
        match self {
            Profile::Keyboard => 1,
            Profile::Mouse => 2,
            Profile::ConsumerControl => 0,
        }
    }

    /// `bInterfaceSubClass` (1 = boot interface).
    pub fn subclass(self) -> u8 {
        match self {
            Profile::Keyboard | Profile::Mouse => 1,
            Profile::ConsumerControl => 0,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Profile::Keyboard => "keyboard",
            Profile::Mouse => "mouse",
            Profile::ConsumerControl => "consumer control",
        })
    }
}
