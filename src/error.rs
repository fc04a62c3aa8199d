//! Unified error type for bt2usb.
//!
//! Gadget errors are fatal at startup; device errors end (or suspend) a
//! single relay. Unmapped input codes are not errors at all and never
//! show up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::hid::Profile;

/// Top-level error type used across the library.
#[derive(Debug, Error)]
pub enum Error {
    // Gadget
    /// The configfs `usb_gadget` directory is missing.
    #[error("USB gadget configfs not available at {0} (is the libcomposite module loaded?)")]
    GadgetUnavailable(PathBuf),

    /// No USB device controller to bind the gadget to.
    #[error("no USB device controller found in {0} (is the dwc2 overlay enabled?)")]
    NoDeviceController(PathBuf),

    /// configfs refused a write because we are not privileged enough.
    #[error("permission denied at {path} (bt2usb must run as root)")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other configfs failure.
    #[error("configfs I/O error at {path}: {source}")]
    Configfs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A built-in report descriptor disagrees with its profile definition.
    #[error("{profile} report descriptor mismatch: {detail}")]
    DescriptorMismatch {
        profile: Profile,
        detail: &'static str,
    },

    // USB
    /// Writing a report to a `/dev/hidgN` node failed.
    #[error("HID report write to {path} failed: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Polling a `/dev/hidgN` node for a host report failed.
    #[error("HID host report read from {path} failed: {source}")]
    ReportRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Input
    /// Reading from, opening or enumerating an input device failed.
    #[error("input device {path}: {source}")]
    Device {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Library result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a configfs I/O error, promoting permission problems to their own variant.
    pub fn configfs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Error::PermissionDenied { path, source }
        } else {
            Error::Configfs { path, source }
        }
    }

    /// Wrap an input-device I/O error.
    pub fn device(path: impl Into<String>, source: io::Error) -> Self {
        Error::Device {
            path: path.into(),
            source,
        }
    }

    /// `true` when the error means the input device node went away
    /// (wireless peripheral asleep, out of range or unpaired).
    pub fn is_disconnect(&self) -> bool {
        match self {
            Error::Device { source, .. } => is_disconnect_io(source),
            _ => false,
        }
    }
}

/// Classify a raw I/O error as "device vanished".
pub fn is_disconnect_io(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }
    matches!(
        err.raw_os_error(),
        Some(libc::ENODEV) | Some(libc::ENOENT) | Some(libc::ENXIO)
    )
}
