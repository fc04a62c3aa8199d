//! Discovery loop supervising one relay task per input device.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::identifier::DeviceIdentifier;
use super::relay::{shutdown_requested, DeviceRelay, RelayOutcome, RelayState};
use super::{DeviceInfo, DeviceProvider};
use crate::config::{self, RelayConfig};
use crate::usb::GadgetSinks;

struct RelayHandle {
    task: JoinHandle<RelayOutcome>,
    state: watch::Receiver<RelayState>,
}

/// Matches discovered devices against the configuration and keeps exactly
/// one relay running per matching device path.
pub struct RelayController {
    config: RelayConfig,
    identifiers: Vec<DeviceIdentifier>,
    provider: Arc<dyn DeviceProvider>,
    sinks: GadgetSinks,
    relays: HashMap<String, RelayHandle>,
    shutdown: watch::Sender<bool>,
}

impl RelayController {
    pub fn new(config: RelayConfig, provider: Arc<dyn DeviceProvider>, sinks: GadgetSinks) -> Self {
        let identifiers = config
            .device_ids
            .iter()
            .map(DeviceIdentifier::new)
            .collect();
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            identifiers,
            provider,
            sinks,
            relays: HashMap::new(),
            shutdown,
        }
    }

    pub fn identifiers(&self) -> &[DeviceIdentifier] {
        &self.identifiers
    }

    /// Paths with a live relay task, sorted.
    pub fn relayed_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .relays
            .iter()
            .filter(|(_, relay)| !relay.task.is_finished())
            .map(|(path, _)| path.clone())
            .collect();
        paths.sort();
        paths
    }

    /// Current state of the relay for `path`.
    pub fn relay_state(&self, path: &str) -> Option<RelayState> {
        self.relays.get(path).map(|relay| *relay.state.borrow())
    }

    /// Whether `device` should be relayed at all.
    pub fn wants(&self, device: &DeviceInfo) -> bool {
        if self.config.auto_discover {
            return !config::AUTO_DISCOVER_EXCLUDED_NAMES
                .iter()
                .any(|excluded| device.name.contains(excluded));
        }
        self.identifiers.iter().any(|id| id.matches(device))
    }

    /// Discover devices until `shutdown` resolves, then stop every relay.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) {
        info!(
            identifiers = ?self.config.device_ids,
            auto_discover = self.config.auto_discover,
            grab = self.config.grab_devices,
            sandbox = self.config.sandbox,
            "relay controller started"
        );
        tokio::pin!(shutdown);
        let mut ticker = interval(config::DISCOVERY_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.discover_once();
                }
            }
        }
        self.shutdown().await;
    }

    /// One discovery pass. Returns how many relays were started.
    pub fn discover_once(&mut self) -> usize {
        self.relays.retain(|_, relay| !relay.task.is_finished());

        let devices = match self.provider.list() {
            Ok(devices) => devices,
            Err(e) => {
                warn!("device enumeration failed: {e}");
                return 0;
            }
        };

        let mut started = 0;
        for device in devices {
            if self.relays.contains_key(&device.path) || !self.wants(&device) {
                continue;
            }
            self.start(device);
            started += 1;
        }
        started
    }

    fn start(&mut self, device: DeviceInfo) {
        info!(path = %device.path, name = %device.name, uniq = ?device.uniq, "starting relay");
        let path = device.path.clone();
        let mut shutdown = self.shutdown.subscribe();
        let relay = DeviceRelay::new(
            device,
            self.provider.clone(),
            &self.sinks,
            self.config.grab_devices,
            self.shutdown.subscribe(),
        );
        let state = relay.subscribe();
        let task_path = path.clone();

        let task = tokio::spawn(async move {
            let outcome = relay.run().await;
            match &outcome {
                RelayOutcome::Cancelled => debug!(path = %task_path, "relay cancelled"),
                RelayOutcome::Disconnected => {
                    info!(path = %task_path, "relay ended, device left")
                }
                RelayOutcome::Failed(e) => {
                    error!(path = %task_path, "relay failed: {e}");
                    // Keep the path reserved for a moment before rediscovery
                    // gets to retry it.
                    tokio::select! {
                        _ = shutdown_requested(&mut shutdown) => {}
                        _ = sleep(config::FAILED_RELAY_BACKOFF) => {}
                    }
                }
            }
            outcome
        });

        self.relays.insert(path, RelayHandle { task, state });
    }

    /// Cancel every relay and wait for them to unwind.
    pub async fn shutdown(&mut self) {
        self.shutdown.send_replace(true);
        let tasks: Vec<_> = self.relays.drain().map(|(_, relay)| relay.task).collect();
        info!(relays = tasks.len(), "stopping relays");
        for result in join_all(tasks).await {
            if let Err(e) = result {
                error!("relay task panicked: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;
    use crate::input::EventStream;

    struct StaticProvider(Mutex<Vec<DeviceInfo>>);

    struct Idle;

    #[async_trait]
    impl EventStream for Idle {
        async fn next_event(&mut self) -> Result<crate::input::RawEvent> {
            std::future::pending().await
        }
    }

    #[async_trait]
    impl DeviceProvider for StaticProvider {
        fn list(&self) -> Result<Vec<DeviceInfo>> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn open(&self, _device: &DeviceInfo, _grab: bool) -> Result<Box<dyn EventStream>> {
            Ok(Box::new(Idle))
        }
    }

    fn device(path: &str, name: &str) -> DeviceInfo {
        DeviceInfo {
            path: path.into(),
            name: name.into(),
            uniq: None,
        }
    }

    fn controller(config: RelayConfig, devices: Vec<DeviceInfo>) -> RelayController {
        RelayController::new(
            config,
            Arc::new(StaticProvider(Mutex::new(devices))),
            GadgetSinks::sandbox(),
        )
    }

    #[test]
    fn auto_discover_skips_excluded_names() {
        let c = controller(
            RelayConfig {
                auto_discover: true,
                ..RelayConfig::default()
            },
            Vec::new(),
        );
        assert!(c.wants(&device("/dev/input/event0", "Logitech K380")));
        assert!(!c.wants(&device("/dev/input/event1", "vc4-hdmi-0")));
    }

    #[test]
    fn identifiers_select_devices() {
        let c = controller(
            RelayConfig {
                device_ids: vec!["k380".into(), "/dev/input/event7".into()],
                ..RelayConfig::default()
            },
            Vec::new(),
        );
        assert!(c.wants(&device("/dev/input/event0", "Logitech K380")));
        assert!(c.wants(&device("/dev/input/event7", "Anything")));
        assert!(!c.wants(&device("/dev/input/event1", "Magic Mouse")));
    }

    #[tokio::test]
    async fn only_matching_devices_get_relays() {
        let mut c = controller(
            RelayConfig {
                device_ids: vec!["keyboard".into()],
                ..RelayConfig::default()
            },
            vec![
                device("/dev/input/event0", "BT Keyboard"),
                device("/dev/input/event1", "Power Button"),
            ],
        );
        assert_eq!(c.discover_once(), 1);
        assert_eq!(c.relayed_paths(), vec!["/dev/input/event0".to_string()]);
        c.shutdown().await;
        assert!(c.relayed_paths().is_empty());
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_future() {
        let mut c = controller(
            RelayConfig {
                auto_discover: true,
                ..RelayConfig::default()
            },
            vec![device("/dev/input/event0", "BT Keyboard")],
        );
        c.run(async {
            tokio::task::yield_now().await;
        })
        .await;
        assert!(c.relayed_paths().is_empty());
    }
}
