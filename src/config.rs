//! Application-wide constants and runtime configuration.
//!
//! Filesystem locations, USB identity and timing parameters live here so
//! they can be tuned in one place.

use std::time::Duration;

// Filesystem

/// configfs directory of the gadget this process owns.
pub const GADGET_ROOT: &str = "/sys/kernel/config/usb_gadget/bt2usb";

/// Class directory listing the USB device controllers (UDCs).
pub const UDC_CLASS_DIR: &str = "/sys/class/udc";

/// Directory holding the `hidgN` character devices.
pub const DEV_DIR: &str = "/dev";

/// Directory holding the kernel input event nodes.
pub const INPUT_DIR: &str = "/dev/input";

/// Default log file used by `--log_to_file`.
pub const DEFAULT_LOG_PATH: &str = "/var/log/bluetooth_2_usb/bluetooth_2_usb.log";

// USB

/// USB VID/PID - Linux Foundation "Multifunction Composite Gadget".
pub const USB_VID: u16 = 0x1D6B;
pub const USB_PID: u16 = 0x0104;

/// Device release (bcdDevice) and USB version (bcdUSB).
pub const USB_BCD_DEVICE: u16 = 0x0100;
pub const USB_BCD_USB: u16 = 0x0200;

/// Max packet size of endpoint 0.
pub const USB_MAX_PACKET_SIZE_0: u8 = 8;

/// USB device strings (language 0x409, en-US).
pub const USB_STRINGS_LANG: &str = "0x409";
pub const USB_MANUFACTURER: &str = "bt2usb";
pub const USB_PRODUCT: &str = "BT-to-USB HID Relay";
pub const USB_SERIAL_NUMBER: &str = "213374badcafe";

/// Configuration `c.1` attributes.
pub const USB_CONFIG_NAME: &str = "c.1";
pub const USB_CONFIG_STRING: &str = "Config 1: HID relay";
pub const USB_MAX_POWER_MA: u16 = 250;
pub const USB_CONFIG_ATTRIBUTES: u8 = 0x80;

// Relay timing

/// Interval between two input-device enumerations.
pub const DISCOVERY_INTERVAL: Duration = Duration::from_millis(500);

/// Interval between two checks for a vanished device.
pub const RECONNECT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Minimum gap between two "still waiting" log lines during an outage.
pub const RECONNECT_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound for the release reports sent when a relay loses its device
/// or stops.
pub const RELEASE_TIMEOUT: Duration = Duration::from_millis(500);

/// Pause before a failed relay releases its path for rediscovery.
pub const FAILED_RELAY_BACKOFF: Duration = Duration::from_secs(5);

/// Devices never picked up by auto-discovery (substring of the device name).
pub const AUTO_DISCOVER_EXCLUDED_NAMES: &[&str] = &["vc4-hdmi"];

/// Runtime configuration handed to the relay controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelayConfig {
    /// Raw device identifiers (path, hardware address or name substring).
    pub device_ids: Vec<String>,
    /// Relay every readable input device.
    pub auto_discover: bool,
    /// Take an exclusive grab on relayed devices.
    pub grab_devices: bool,
    /// Read and translate input, but discard every report.
    pub sandbox: bool,
}
