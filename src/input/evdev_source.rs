//! Kernel event devices through the `evdev` crate.

use std::path::Path;

use async_trait::async_trait;
use evdev::Device;
use tracing::debug;

use super::{DeviceInfo, DeviceProvider, EventStream, RawEvent};
use crate::config;
use crate::error::{Error, Result};

/// Enumerates `/dev/input/event*` and opens devices as async streams.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvdevProvider;

impl EvdevProvider {
    pub fn new() -> Self {
        Self
    }
}

fn describe(path: &Path, device: &Device) -> DeviceInfo {
    DeviceInfo {
        path: path.to_string_lossy().into_owned(),
        name: device.name().unwrap_or_default().to_string(),
        uniq: device
            .unique_name()
            .filter(|uniq| !uniq.is_empty())
            .map(str::to_string),
    }
}

#[async_trait]
impl DeviceProvider for EvdevProvider {
    fn list(&self) -> Result<Vec<DeviceInfo>> {
        let input_dir = Path::new(config::INPUT_DIR);
        if !input_dir.is_dir() {
            return Err(Error::device(
                config::INPUT_DIR,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        // Unreadable nodes are skipped by `enumerate`.
        let mut devices: Vec<DeviceInfo> = evdev::enumerate()
            .map(|(path, device)| describe(&path, &device))
            .collect();
        devices.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(devices)
    }

    async fn open(&self, info: &DeviceInfo, grab: bool) -> Result<Box<dyn EventStream>> {
        let mut device = Device::open(&info.path).map_err(|e| Error::device(&info.path, e))?;
        if grab {
            device.grab().map_err(|e| Error::device(&info.path, e))?;
            debug!(path = %info.path, "grabbed device");
        }
        let stream = device
            .into_event_stream()
            .map_err(|e| Error::device(&info.path, e))?;
        Ok(Box::new(EvdevStream {
            path: info.path.clone(),
            stream,
        }))
    }
}

struct EvdevStream {
    path: String,
    stream: evdev::EventStream,
}

#[async_trait]
impl EventStream for EvdevStream {
    async fn next_event(&mut self) -> Result<RawEvent> {
        let event = self
            .stream
            .next_event()
            .await
            .map_err(|e| Error::device(&self.path, e))?;
        Ok(RawEvent::new(event.event_type().0, event.code(), event.value()))
    }
}
