//! Configured selectors for input devices.

use core::fmt;

use super::DeviceInfo;

/// Prefix of event device nodes.
const EVENT_NODE_PREFIX: &str = "/dev/input/event";

/// How an identifier selects devices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Exact event node path, e.g. `/dev/input/event3`.
    Path,
    /// Bluetooth address reported as the device's unique id.
    HardwareAddress,
    /// Case-insensitive substring of the device name.
    Name,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdentifierKind::Path => "path",
            IdentifierKind::HardwareAddress => "MAC",
            IdentifierKind::Name => "name",
        })
    }
}

/// One `--device_ids` entry, classified once at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceIdentifier {
    raw: String,
    kind: IdentifierKind,
    normalized: String,
}

impl DeviceIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let kind = classify(&raw);
        let normalized = match kind {
            IdentifierKind::Path => raw.clone(),
            IdentifierKind::HardwareAddress => normalize_address(&raw),
            IdentifierKind::Name => raw.to_lowercase(),
        };
        Self {
            raw,
            kind,
            normalized,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn matches(&self, device: &DeviceInfo) -> bool {
        match self.kind {
            IdentifierKind::Path => device.path == self.normalized,
            IdentifierKind::HardwareAddress => device
                .uniq
                .as_deref()
                .is_some_and(|uniq| normalize_address(uniq) == self.normalized),
            IdentifierKind::Name => device.name.to_lowercase().contains(&self.normalized),
        }
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.raw)
    }
}

/// Classify a raw identifier. Anything that is neither an event node path
/// nor a hardware address is a name.
pub fn classify(value: &str) -> IdentifierKind {
    if value.starts_with(EVENT_NODE_PREFIX) {
        IdentifierKind::Path
    } else if is_hardware_address(value) {
        IdentifierKind::HardwareAddress
    } else {
        IdentifierKind::Name
    }
}

/// Six hex octets separated by `:` or `-`.
fn is_hardware_address(value: &str) -> bool {
    let octets: Vec<&str> = value.split([':', '-']).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|octet| octet.len() == 2 && octet.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn normalize_address(value: &str) -> String {
    value.to_lowercase().replace('-', ":")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(path: &str, name: &str, uniq: Option<&str>) -> DeviceInfo {
        DeviceInfo {
            path: path.to_string(),
            name: name.to_string(),
            uniq: uniq.map(str::to_string),
        }
    }

    #[test]
    fn classification() {
        assert_eq!(classify("aa:bb:cc:dd:ee:ff"), IdentifierKind::HardwareAddress);
        assert_eq!(classify("AA-BB-CC-DD-EE-FF"), IdentifierKind::HardwareAddress);
        assert_eq!(classify("/dev/input/event3"), IdentifierKind::Path);
        assert_eq!(classify("Logitech"), IdentifierKind::Name);
        assert_eq!(classify("aa:bb:cc:dd:ee"), IdentifierKind::Name);
        assert_eq!(classify("aa:bb:cc:dd:ee:fg"), IdentifierKind::Name);
        assert_eq!(classify(""), IdentifierKind::Name);
    }

    #[test]
    fn address_match_ignores_case_and_separator() {
        let id = DeviceIdentifier::new("AA-BB-CC-DD-EE-FF");
        assert_eq!(id.normalized(), "aa:bb:cc:dd:ee:ff");
        assert!(id.matches(&device("/dev/input/event1", "kbd", Some("aa:bb:cc:dd:ee:ff"))));
        assert!(id.matches(&device("/dev/input/event1", "kbd", Some("AA:BB:CC:DD:EE:FF"))));
        assert!(!id.matches(&device("/dev/input/event1", "kbd", None)));
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let id = DeviceIdentifier::new("logitech");
        assert!(id.matches(&device("/dev/input/event2", "Logitech K380 Keyboard", None)));
        assert!(!id.matches(&device("/dev/input/event2", "Apple Magic Mouse", None)));
    }

    #[test]
    fn path_match_is_exact_and_case_sensitive() {
        let id = DeviceIdentifier::new("/dev/input/event3");
        assert!(id.matches(&device("/dev/input/event3", "x", None)));
        assert!(!id.matches(&device("/dev/input/event30", "x", None)));
        assert!(!DeviceIdentifier::new("/dev/input/EVENT3").matches(&device(
            "/dev/input/event3",
            "x",
            None
        )));
    }
}
