//! Unit tests for the report encoders.
//!
//! Every encoder writes into a recording sink so the exact sequence of
//! emitted reports can be checked.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::keyboard::{Keyboard, LED_CAPS_LOCK, LED_NUM_LOCK};
use super::mouse::{Mouse, BUTTON_LEFT, BUTTON_RIGHT};
use super::{ConsumerControl, KeyboardReport, MouseReport, ReportSink};
use crate::error::{Error, Result};

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<Vec<u8>>>,
    host_report: Mutex<Option<Vec<u8>>>,
    fail: bool,
}

impl RecordingSink {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    fn last(&self) -> Vec<u8> {
        self.sent().last().cloned().unwrap()
    }
}

#[async_trait]
impl ReportSink for RecordingSink {
    async fn send_report(&self, report: &[u8]) -> Result<()> {
        if self.fail {
            return Err(Error::ReportWrite {
                path: "/dev/hidg0".into(),
                source: std::io::Error::from_raw_os_error(libc::ESHUTDOWN),
            });
        }
        self.sent.lock().unwrap().push(report.to_vec());
        Ok(())
    }

    fn last_received_report(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.host_report.lock().unwrap().clone())
    }
}

fn keyboard() -> (Arc<RecordingSink>, Keyboard) {
    let sink = Arc::new(RecordingSink::default());
    (sink.clone(), Keyboard::new(sink))
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Encoder Tests
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn keyboard_press_emits_full_report() {
    let (sink, mut kb) = keyboard();
    kb.press(0x04).await.unwrap();
    assert_eq!(sink.sent(), vec![vec![0, 0, 0x04, 0, 0, 0, 0, 0]]);
}

#[tokio::test]
async fn keyboard_rollover_keeps_six_most_recent() {
    let (sink, mut kb) = keyboard();
    for usage in 0x04..=0x0A {
        kb.press(usage).await.unwrap();
    }
    assert_eq!(sink.sent().len(), 7);
    assert_eq!(sink.last(), vec![0, 0, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]);
}

#[tokio::test]
async fn keyboard_release_compacts_slots() {
    let (sink, mut kb) = keyboard();
    for usage in [0x04, 0x05, 0x06] {
        kb.press(usage).await.unwrap();
    }
    kb.release(0x05).await.unwrap();
    assert_eq!(sink.last(), vec![0, 0, 0x04, 0x06, 0, 0, 0, 0]);

    kb.press(0x07).await.unwrap();
    assert_eq!(sink.last(), vec![0, 0, 0x04, 0x06, 0x07, 0, 0, 0]);
}

#[tokio::test]
async fn keyboard_release_of_unpressed_key_is_noop() {
    let (sink, mut kb) = keyboard();
    kb.press(0x04).await.unwrap();
    kb.press(0x05).await.unwrap();
    let before = kb.report();
    kb.release(0x1D).await.unwrap();
    assert_eq!(kb.report(), before);
    assert_eq!(sink.last(), vec![0, 0, 0x04, 0x05, 0, 0, 0, 0]);
}

#[tokio::test]
async fn keyboard_double_press_is_idempotent() {
    let (_sink, mut kb) = keyboard();
    kb.press(0x04).await.unwrap();
    let once = kb.report();
    kb.press(0x04).await.unwrap();
    assert_eq!(kb.report(), once);
    assert_eq!(kb.report().keycodes, [0x04, 0, 0, 0, 0, 0]);

    kb.release(0x04).await.unwrap();
    kb.release(0x04).await.unwrap();
    assert!(kb.report().is_empty());
}

#[tokio::test]
async fn keyboard_modifiers_do_not_touch_key_slots() {
    let (sink, mut kb) = keyboard();
    kb.press(0x04).await.unwrap();
    kb.press(0xE1).await.unwrap(); // Left Shift
    assert_eq!(sink.last(), vec![0x02, 0, 0x04, 0, 0, 0, 0, 0]);

    kb.press(0xE4).await.unwrap(); // Right Ctrl
    assert_eq!(sink.last(), vec![0x12, 0, 0x04, 0, 0, 0, 0, 0]);

    kb.release(0x04).await.unwrap();
    assert_eq!(sink.last(), vec![0x12, 0, 0, 0, 0, 0, 0, 0]);

    kb.release(0xE1).await.unwrap();
    assert_eq!(sink.last(), vec![0x10, 0, 0, 0, 0, 0, 0, 0]);
}

#[tokio::test]
async fn keyboard_modifiers_never_enter_rollover() {
    let (_sink, mut kb) = keyboard();
    for usage in 0x04..=0x09 {
        kb.press(usage).await.unwrap();
    }
    kb.press(0xE0).await.unwrap();
    let report = kb.report();
    assert_eq!(report.modifier, 0x01);
    assert_eq!(report.keycodes, [0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
}

#[tokio::test]
async fn keyboard_release_all_clears_everything() {
    let (sink, mut kb) = keyboard();
    kb.press(0xE2).await.unwrap();
    kb.press(0x2C).await.unwrap();
    kb.release_all().await.unwrap();
    assert_eq!(sink.last(), vec![0; 8]);
}

#[tokio::test]
async fn keyboard_led_status_reads_host_report() {
    let (sink, kb) = keyboard();
    assert_eq!(kb.led_status().unwrap(), None);

    *sink.host_report.lock().unwrap() = Some(vec![LED_NUM_LOCK | LED_CAPS_LOCK]);
    assert_eq!(kb.led_status().unwrap(), Some(0x03));
}

#[tokio::test]
async fn keyboard_sink_errors_propagate() {
    let mut kb = Keyboard::new(Arc::new(RecordingSink::failing()));
    let err = kb.press(0x04).await.unwrap_err();
    assert!(matches!(err, Error::ReportWrite { .. }));
}

#[test]
fn keyboard_report_serializes_layout() {
    let report = KeyboardReport {
        modifier: 0x05,
        reserved: 0x00,
        keycodes: [0x04, 0x05, 0x06, 0x00, 0x00, 0x00],
    };
    assert_eq!(report.to_bytes(), [0x05, 0x00, 0x04, 0x05, 0x06, 0x00, 0x00, 0x00]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Encoder Tests
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn mouse_buttons_emit_button_only_reports() {
    let sink = Arc::new(RecordingSink::default());
    let mut mouse = Mouse::new(sink.clone());
    mouse.press(BUTTON_LEFT).await.unwrap();
    mouse.press(BUTTON_RIGHT).await.unwrap();
    mouse.release(BUTTON_LEFT).await.unwrap();
    assert_eq!(
        sink.sent(),
        vec![vec![0x01, 0, 0, 0], vec![0x03, 0, 0, 0], vec![0x02, 0, 0, 0]]
    );
}

#[tokio::test]
async fn mouse_large_move_is_split_and_clamped() {
    let sink = Arc::new(RecordingSink::default());
    let mut mouse = Mouse::new(sink.clone());
    mouse.move_by(300, -300, 0).await.unwrap();

    let sent = sink.sent();
    assert!(sent.len() >= 3);
    let (mut x, mut y, mut wheel) = (0i32, 0i32, 0i32);
    for report in &sent {
        let (dx, dy, dw) = (report[1] as i8, report[2] as i8, report[3] as i8);
        for d in [dx, dy, dw] {
            assert!((-127..=127).contains(&d));
        }
        x += i32::from(dx);
        y += i32::from(dy);
        wheel += i32::from(dw);
    }
    assert_eq!((x, y, wheel), (300, -300, 0));
}

#[tokio::test]
async fn mouse_move_keeps_held_buttons() {
    let sink = Arc::new(RecordingSink::default());
    let mut mouse = Mouse::new(sink.clone());
    mouse.press(BUTTON_LEFT).await.unwrap();
    mouse.move_by(0, 5, 0).await.unwrap();
    assert_eq!(sink.last(), vec![0x01, 0, 5, 0]);
}

#[tokio::test]
async fn mouse_zero_move_emits_nothing() {
    let sink = Arc::new(RecordingSink::default());
    let mut mouse = Mouse::new(sink.clone());
    mouse.move_by(0, 0, 0).await.unwrap();
    assert!(sink.sent().is_empty());
}

#[test]
fn mouse_report_negative_values() {
    let report = MouseReport {
        buttons: 0,
        x: -1,
        y: -127,
        wheel: 1,
    };
    assert_eq!(report.to_bytes(), [0x00, 0xFF, 0x81, 0x01]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Consumer Control Encoder Tests
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn consumer_press_overwrites_and_release_clears() {
    let sink = Arc::new(RecordingSink::default());
    let mut cc = ConsumerControl::new(sink.clone());
    cc.press(0x00E9).await.unwrap(); // Volume Up
    cc.press(0x00CD).await.unwrap(); // Play/Pause
    cc.release().await.unwrap();
    assert_eq!(
        sink.sent(),
        vec![vec![0xE9, 0x00], vec![0xCD, 0x00], vec![0x00, 0x00]]
    );
}
