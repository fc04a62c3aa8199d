//! Integration tests: input events through relays, encoders and sinks.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use bt2usb::config::{RelayConfig, RECONNECT_POLL_INTERVAL};
use bt2usb::hid::{Profile, ReportSink};
use bt2usb::input::ecodes::{EV_KEY, EV_REL, EV_SYN, KEY_A, KEY_B, KEY_LEFTSHIFT, REL_X};
use bt2usb::input::identifier::classify;
use bt2usb::input::{
    DeviceInfo, DeviceProvider, EventStream, IdentifierKind, RawEvent, RelayController, RelayState,
};
use bt2usb::usb::{GadgetManager, GadgetSinks};
use bt2usb::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Recorder(Mutex<Vec<Vec<u8>>>);

impl Recorder {
    fn reports(&self) -> Vec<Vec<u8>> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for Recorder {
    async fn send_report(&self, report: &[u8]) -> Result<()> {
        self.0.lock().unwrap().push(report.to_vec());
        Ok(())
    }

    fn last_received_report(&self) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}

type EventTx = mpsc::UnboundedSender<io::Result<RawEvent>>;

struct FakeStream {
    path: String,
    rx: mpsc::UnboundedReceiver<io::Result<RawEvent>>,
}

#[async_trait]
impl EventStream for FakeStream {
    async fn next_event(&mut self) -> Result<RawEvent> {
        match self.rx.recv().await {
            Some(event) => event.map_err(|e| Error::device(&self.path, e)),
            None => std::future::pending().await,
        }
    }
}

/// Devices that can be plugged in and pulled out while relays run.
#[derive(Default)]
struct FakeInput {
    present: Mutex<Vec<DeviceInfo>>,
    pending: Mutex<HashMap<String, Vec<FakeStream>>>,
    opens: Mutex<usize>,
}

impl FakeInput {
    fn plug(&self, device: &DeviceInfo) -> EventTx {
        let (tx, rx) = mpsc::unbounded_channel();
        self.pending
            .lock()
            .unwrap()
            .entry(device.path.clone())
            .or_default()
            .push(FakeStream {
                path: device.path.clone(),
                rx,
            });
        let mut present = self.present.lock().unwrap();
        present.retain(|d| d.path != device.path);
        present.push(device.clone());
        tx
    }

    fn unplug(&self, path: &str, tx: &EventTx) {
        self.present.lock().unwrap().retain(|d| d.path != path);
        tx.send(Err(io::Error::from_raw_os_error(libc::ENODEV)))
            .unwrap();
    }

    fn opens(&self) -> usize {
        *self.opens.lock().unwrap()
    }
}

#[async_trait]
impl DeviceProvider for FakeInput {
    fn list(&self) -> Result<Vec<DeviceInfo>> {
        Ok(self.present.lock().unwrap().clone())
    }

    async fn open(&self, device: &DeviceInfo, _grab: bool) -> Result<Box<dyn EventStream>> {
        let stream = self
            .pending
            .lock()
            .unwrap()
            .get_mut(&device.path)
            .and_then(|streams| streams.pop());
        match stream {
            Some(stream) => {
                *self.opens.lock().unwrap() += 1;
                Ok(Box::new(stream))
            }
            None => Err(Error::device(&device.path, io::ErrorKind::NotFound.into())),
        }
    }
}

struct Rig {
    input: Arc<FakeInput>,
    keyboard: Arc<Recorder>,
    mouse: Arc<Recorder>,
    controller: RelayController,
}

fn rig(config: RelayConfig) -> Rig {
    let input = Arc::new(FakeInput::default());
    let keyboard = Arc::new(Recorder::default());
    let mouse = Arc::new(Recorder::default());
    let sinks = GadgetSinks::sandbox()
        .with(Profile::Keyboard, keyboard.clone())
        .with(Profile::Mouse, mouse.clone());
    let controller = RelayController::new(config, input.clone(), sinks);
    Rig {
        input,
        keyboard,
        mouse,
        controller,
    }
}

fn k380() -> DeviceInfo {
    DeviceInfo {
        path: "/dev/input/event4".into(),
        name: "Logitech K380".into(),
        uniq: Some("aa:bb:cc:dd:ee:ff".into()),
    }
}

fn by_address() -> RelayConfig {
    RelayConfig {
        device_ids: vec!["AA:BB:CC:DD:EE:FF".into()],
        ..RelayConfig::default()
    }
}

fn key(code: u16, value: i32) -> io::Result<RawEvent> {
    Ok(RawEvent::new(EV_KEY, code, value))
}

/// Poll `cond` on the (paused) clock until it holds.
async fn eventually(mut cond: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition never became true");
}

// ═══════════════════════════════════════════════════════════════════════════
// End to end
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test(start_paused = true)]
async fn key_a_reaches_keyboard_sink() {
    let mut rig = rig(by_address());
    let tx = rig.input.plug(&k380());
    assert_eq!(rig.controller.discover_once(), 1);

    tx.send(key(KEY_A, 1)).unwrap();
    tx.send(Ok(RawEvent::new(EV_SYN, 0, 0))).unwrap();

    let keyboard = rig.keyboard.clone();
    eventually(|| !keyboard.reports().is_empty()).await;
    assert_eq!(keyboard.reports(), vec![vec![0x00, 0x00, 0x04, 0, 0, 0, 0, 0]]);
    assert!(rig.mouse.reports().is_empty());

    rig.controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shift_chord_and_motion_keep_event_order() {
    let mut rig = rig(by_address());
    let tx = rig.input.plug(&k380());
    rig.controller.discover_once();

    for event in [
        key(KEY_LEFTSHIFT, 1),
        key(KEY_A, 1),
        key(KEY_A, 0),
        key(KEY_LEFTSHIFT, 0),
        Ok(RawEvent::new(EV_REL, REL_X, 200)),
    ] {
        tx.send(event).unwrap();
    }

    let keyboard = rig.keyboard.clone();
    let mouse = rig.mouse.clone();
    eventually(|| keyboard.reports().len() == 4 && mouse.reports().len() == 2).await;
    assert_eq!(
        keyboard.reports(),
        vec![
            vec![0x02, 0, 0, 0, 0, 0, 0, 0],
            vec![0x02, 0, 0x04, 0, 0, 0, 0, 0],
            vec![0x02, 0, 0, 0, 0, 0, 0, 0],
            vec![0x00, 0, 0, 0, 0, 0, 0, 0],
        ]
    );
    assert_eq!(mouse.reports(), vec![vec![0, 127, 0, 0], vec![0, 73, 0, 0]]);

    rig.controller.shutdown().await;
}

// ═══════════════════════════════════════════════════════════════════════════
// Supervision
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test(start_paused = true)]
async fn repeated_discovery_starts_one_relay_per_path() {
    let mut rig = rig(by_address());
    let _tx = rig.input.plug(&k380());

    assert_eq!(rig.controller.discover_once(), 1);
    assert_eq!(rig.controller.discover_once(), 0);
    assert_eq!(rig.controller.relayed_paths(), vec![k380().path]);

    let input = rig.input.clone();
    eventually(|| input.opens() == 1).await;
    assert_eq!(rig.controller.discover_once(), 0);
    assert_eq!(input.opens(), 1);

    rig.controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn relay_survives_disconnect_and_reconnect() {
    let mut rig = rig(by_address());
    let device = k380();
    let tx = rig.input.plug(&device);
    rig.controller.discover_once();

    tx.send(key(KEY_A, 1)).unwrap();
    tx.send(key(KEY_A, 0)).unwrap();
    let keyboard = rig.keyboard.clone();
    eventually(|| keyboard.reports().len() == 2).await;

    rig.input.unplug(&device.path, &tx);
    eventually(|| rig.controller.relay_state(&device.path) == Some(RelayState::Reconnecting)).await;

    // Gone for a few polls; discovery must not start a second relay meanwhile.
    tokio::time::sleep(RECONNECT_POLL_INTERVAL * 3).await;
    assert_eq!(rig.controller.discover_once(), 0);
    assert_eq!(rig.controller.relay_state(&device.path), Some(RelayState::Reconnecting));

    let tx = rig.input.plug(&device);
    eventually(|| rig.controller.relay_state(&device.path) == Some(RelayState::Active)).await;

    tx.send(key(KEY_B, 1)).unwrap();
    tx.send(key(KEY_B, 0)).unwrap();
    eventually(|| keyboard.reports().len() == 4).await;

    assert_eq!(
        keyboard.reports(),
        vec![
            vec![0, 0, 0x04, 0, 0, 0, 0, 0],
            vec![0; 8],
            vec![0, 0, 0x05, 0, 0, 0, 0, 0],
            vec![0; 8],
        ]
    );
    assert_eq!(rig.input.opens(), 2);
    assert_eq!(rig.controller.relayed_paths(), vec![device.path.clone()]);

    rig.controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn unmatched_devices_are_ignored() {
    let mut rig = rig(RelayConfig {
        device_ids: vec!["/dev/input/event9".into()],
        ..RelayConfig::default()
    });
    let _tx = rig.input.plug(&k380());
    assert_eq!(rig.controller.discover_once(), 0);
    assert!(rig.controller.relayed_paths().is_empty());
}

#[test]
fn identifier_classification() {
    assert_eq!(classify("aa:bb:cc:dd:ee:ff"), IdentifierKind::HardwareAddress);
    assert_eq!(classify("/dev/input/event3"), IdentifierKind::Path);
    assert_eq!(classify("Logitech"), IdentifierKind::Name);
}

// ═══════════════════════════════════════════════════════════════════════════
// Gadget
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn relay_writes_into_gadget_device_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let gadgets = dir.path().join("usb_gadget");
    let udc = dir.path().join("udc");
    let dev = dir.path().join("dev");
    fs::create_dir_all(&gadgets).unwrap();
    fs::create_dir_all(udc.join("20980000.usb")).unwrap();
    fs::create_dir_all(&dev).unwrap();
    for node in ["hidg0", "hidg1", "hidg2"] {
        fs::write(dev.join(node), b"").unwrap();
    }

    let mut gadget = GadgetManager::with_paths(gadgets.join("bt2usb"), &udc, &dev);
    let sinks = gadget.enable(&Profile::ALL).unwrap();

    let input = Arc::new(FakeInput::default());
    let tx = input.plug(&k380());
    let mut controller = RelayController::new(by_address(), input.clone(), sinks);
    controller.discover_once();

    tx.send(key(KEY_A, 1)).unwrap();
    let node = dev.join("hidg0");
    eventually(|| fs::read(&node).map(|b| !b.is_empty()).unwrap_or(false)).await;
    assert_eq!(fs::read(&node).unwrap(), vec![0, 0, 0x04, 0, 0, 0, 0, 0]);

    controller.shutdown().await;
    gadget.disable().unwrap();
    assert!(!gadgets.join("bt2usb").exists());
}
