//! One input device relayed to the gadget.
//!
//! ```text
//! Connecting ──▶ Active ──device vanished──▶ Reconnecting ──same device back──▶ Active
//!                  │                              │
//!                  ├──shutdown──▶ Cancelled ◀─────┤
//!                  └──other error──▶ Failed       └──other device on the path──▶ Disconnected
//! ```

use core::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, error, info, warn};

use super::ecodes::{EV_KEY, EV_REL, KEY_PRESSED, KEY_RELEASED};
use super::translate::{classify_channel, mouse_delta, translate};
use super::{DeviceInfo, DeviceProvider, EventStream, RawEvent};
use crate::config;
use crate::error::{Error, Result};
use crate::hid::keyboard::{LED_CAPS_LOCK, LED_NUM_LOCK, LED_SCROLL_LOCK};
use crate::hid::{ConsumerControl, Keyboard, Mouse, Profile};
use crate::usb::GadgetSinks;

/// Lifecycle of a relay task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayState {
    Connecting,
    Active,
    Reconnecting,
    Cancelled,
    Disconnected,
    Failed,
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a relay task ended.
#[derive(Debug)]
pub enum RelayOutcome {
    /// Shutdown was requested.
    Cancelled,
    /// The device is gone for good (its path now belongs to another device).
    Disconnected,
    /// Anything else; rediscovery may start a fresh relay.
    Failed(Error),
}

impl RelayOutcome {
    pub fn state(&self) -> RelayState {
        match self {
            RelayOutcome::Cancelled => RelayState::Cancelled,
            RelayOutcome::Disconnected => RelayState::Disconnected,
            RelayOutcome::Failed(_) => RelayState::Failed,
        }
    }
}

/// Why draining a stream stopped.
enum Interrupted {
    Shutdown,
    Error(Error),
}

/// Resolves once shutdown is requested or the controller is gone.
pub(crate) async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Drains one device into its own set of encoders.
pub struct DeviceRelay {
    device: DeviceInfo,
    provider: Arc<dyn DeviceProvider>,
    grab: bool,
    keyboard: Keyboard,
    mouse: Mouse,
    consumer: ConsumerControl,
    leds: Option<u8>,
    shutdown: watch::Receiver<bool>,
    state: watch::Sender<RelayState>,
}

impl DeviceRelay {
    pub fn new(
        device: DeviceInfo,
        provider: Arc<dyn DeviceProvider>,
        sinks: &GadgetSinks,
        grab: bool,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let (state, _) = watch::channel(RelayState::Connecting);
        Self {
            device,
            provider,
            grab,
            keyboard: Keyboard::new(sinks.sink(Profile::Keyboard)),
            mouse: Mouse::new(sinks.sink(Profile::Mouse)),
            consumer: ConsumerControl::new(sinks.sink(Profile::ConsumerControl)),
            leds: None,
            shutdown,
            state,
        }
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    /// Follow the relay's state changes.
    pub fn subscribe(&self) -> watch::Receiver<RelayState> {
        self.state.subscribe()
    }

    /// Relay events until shutdown, a permanent disconnect or a failure.
    pub async fn run(mut self) -> RelayOutcome {
        let outcome = self.relay().await;
        self.release_held().await;
        self.state.send_replace(outcome.state());
        outcome
    }

    async fn relay(&mut self) -> RelayOutcome {
        let mut stream = match self.open().await {
            Ok(stream) => stream,
            Err(e) => return RelayOutcome::Failed(e),
        };
        info!(path = %self.device.path, name = %self.device.name, "relay active");

        loop {
            self.state.send_replace(RelayState::Active);
            match self.drain(stream.as_mut()).await {
                Interrupted::Shutdown => return RelayOutcome::Cancelled,
                Interrupted::Error(e) if e.is_disconnect() => {
                    drop(stream);
                    warn!(path = %self.device.path, "device disconnected: {e}");
                    self.release_held().await;
                    self.state.send_replace(RelayState::Reconnecting);
                    stream = match self.reconnect().await {
                        Ok(Some(stream)) => stream,
                        Ok(None) => return RelayOutcome::Disconnected,
                        Err(Interrupted::Shutdown) => return RelayOutcome::Cancelled,
                        Err(Interrupted::Error(e)) => return RelayOutcome::Failed(e),
                    };
                    info!(path = %self.device.path, "device reconnected");
                }
                Interrupted::Error(e) => return RelayOutcome::Failed(e),
            }
        }
    }

    async fn open(&self) -> Result<Box<dyn EventStream>> {
        self.provider.open(&self.device, self.grab).await
    }

    async fn drain(&mut self, stream: &mut dyn EventStream) -> Interrupted {
        let mut shutdown = self.shutdown.clone();
        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => return Interrupted::Shutdown,
                event = stream.next_event() => event,
            };
            let event = match event {
                Ok(event) => event,
                Err(e) => return Interrupted::Error(e),
            };
            // A report write can block while the host is suspended.
            let dispatched = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => return Interrupted::Shutdown,
                result = self.dispatch(event) => result,
            };
            if let Err(e) = dispatched {
                error!(path = %self.device.path, ?event, "failed to relay event: {e}");
                return Interrupted::Error(e);
            }
        }
    }

    /// Route one event to its encoder. Events without a mapping are dropped.
    pub async fn dispatch(&mut self, event: RawEvent) -> Result<()> {
        match event.event_type {
            EV_KEY => self.dispatch_key(event).await,
            EV_REL => match mouse_delta(&event) {
                Some((dx, dy, wheel)) => self.mouse.move_by(dx, dy, wheel).await,
                None => {
                    debug!(code = event.code, "ignoring relative axis");
                    Ok(())
                }
            },
            // EV_SYN, EV_MSC and friends carry nothing the reports need.
            _ => Ok(()),
        }
    }

    async fn dispatch_key(&mut self, event: RawEvent) -> Result<()> {
        let pressed = match event.value {
            KEY_PRESSED => true,
            KEY_RELEASED => false,
            // Autorepeat: the host repeats on its own.
            _ => return Ok(()),
        };
        let Some(usage) = translate(event.code) else {
            debug!(path = %self.device.path, code = event.code, "unmapped key code");
            return Ok(());
        };

        match classify_channel(event.code) {
            Profile::Keyboard => {
                let usage = usage as u8;
                if pressed {
                    self.keyboard.press(usage).await?;
                } else {
                    self.keyboard.release(usage).await?;
                }
                self.watch_leds();
                Ok(())
            }
            Profile::Mouse => {
                let mask = usage as u8;
                if pressed {
                    self.mouse.press(mask).await
                } else {
                    self.mouse.release(mask).await
                }
            }
            Profile::ConsumerControl => {
                if pressed {
                    self.consumer.press(usage).await
                } else {
                    self.consumer.release().await
                }
            }
        }
    }

    /// Send release reports for whatever this device still holds.
    async fn release_held(&mut self) {
        let release = async {
            if !self.keyboard.report().is_empty() {
                self.keyboard.release_all().await?;
            }
            if self.mouse.buttons() != 0 {
                self.mouse.release_all().await?;
            }
            if !self.consumer.report().is_empty() {
                self.consumer.release().await?;
            }
            Ok::<_, Error>(())
        };
        match timeout(config::RELEASE_TIMEOUT, release).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(path = %self.device.path, "failed to release held input: {e}"),
            Err(_) => warn!(path = %self.device.path, "timed out releasing held input"),
        }
    }

    fn watch_leds(&mut self) {
        match self.keyboard.led_status() {
            Ok(Some(leds)) if self.leds != Some(leds) => {
                debug!(
                    path = %self.device.path,
                    num_lock = (leds & LED_NUM_LOCK) != 0,
                    caps_lock = (leds & LED_CAPS_LOCK) != 0,
                    scroll_lock = (leds & LED_SCROLL_LOCK) != 0,
                    "host LED state"
                );
                self.leds = Some(leds);
            }
            Ok(_) => {}
            Err(e) => debug!("reading host LED state failed: {e}"),
        }
    }

    /// Poll until the device's path is back.
    ///
    /// `Ok(None)` when the path reappears with a different device behind it.
    async fn reconnect(&mut self) -> std::result::Result<Option<Box<dyn EventStream>>, Interrupted> {
        let started = Instant::now();
        let mut last_log = started;

        loop {
            tokio::select! {
                biased;
                _ = shutdown_requested(&mut self.shutdown) => return Err(Interrupted::Shutdown),
                _ = sleep(config::RECONNECT_POLL_INTERVAL) => {}
            }

            if last_log.elapsed() >= config::RECONNECT_LOG_INTERVAL {
                info!(
                    path = %self.device.path,
                    "still waiting for device ({}s)",
                    started.elapsed().as_secs()
                );
                last_log = Instant::now();
            }

            let devices = match self.provider.list() {
                Ok(devices) => devices,
                Err(e) => {
                    debug!("device enumeration failed: {e}");
                    continue;
                }
            };
            let Some(found) = devices.into_iter().find(|d| d.path == self.device.path) else {
                continue;
            };
            if found.name != self.device.name {
                info!(
                    path = %self.device.path,
                    old = %self.device.name,
                    new = %found.name,
                    "path taken over by another device"
                );
                return Ok(None);
            }
            match self.open().await {
                Ok(stream) => return Ok(Some(stream)),
                Err(e) if e.is_disconnect() => continue,
                Err(e) => return Err(Interrupted::Error(e)),
            }
        }
    }
}
