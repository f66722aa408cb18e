#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embassy_futures::block_on;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use keybridge::hid::{HidError, KeyboardReport, ReportWriter};
use keybridge::types::keycode::HidKeyCode;
use keybridge::{AckNotifier, Dispatcher, InterpreterConfig, KeyActionSink, Step, interpret};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub(crate) const KC_LCTRL: u8 = 1 << 0;
pub(crate) const KC_LSHIFT: u8 = 1 << 1;
pub(crate) const KC_LALT: u8 = 1 << 2;
pub(crate) const KC_LGUI: u8 = 1 << 3;
pub(crate) const KC_RGUI: u8 = 1 << 7;

/// Everything a test double saw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trace {
    Press(HidKeyCode),
    Release(HidKeyCode),
    PressRaw(u8),
    ReleaseAll,
    Type(char),
    Wait(u32),
    Notify(Vec<u8>),
}

pub type TraceLog = Rc<RefCell<Vec<Trace>>>;

pub fn new_log() -> TraceLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Key action sink that only records
pub struct Recorder(pub TraceLog);

impl KeyActionSink for Recorder {
    async fn press(&mut self, key: HidKeyCode) {
        self.0.borrow_mut().push(Trace::Press(key));
    }

    async fn release(&mut self, key: HidKeyCode) {
        self.0.borrow_mut().push(Trace::Release(key));
    }

    async fn press_raw(&mut self, usage: u8) {
        self.0.borrow_mut().push(Trace::PressRaw(usage));
    }

    async fn release_all(&mut self) {
        self.0.borrow_mut().push(Trace::ReleaseAll);
    }

    async fn type_char(&mut self, c: char) {
        self.0.borrow_mut().push(Trace::Type(c));
    }
}

/// Delay that records the requested time and returns immediately
pub struct RecordingDelay(pub TraceLog);

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Trace::Wait(ns / 1_000_000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(Trace::Wait(us / 1_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Trace::Wait(ms));
    }
}

pub struct RecordingNotifier(pub TraceLog);

impl AckNotifier for RecordingNotifier {
    async fn notify(&mut self, payload: &[u8]) {
        self.0.borrow_mut().push(Trace::Notify(payload.to_vec()));
    }
}

/// Report writer that keeps every report, or fails every write
#[derive(Default)]
pub struct ReportLog {
    pub reports: Vec<KeyboardReport>,
    pub fail_with: Option<HidError>,
}

impl ReportWriter for ReportLog {
    async fn write_report(&mut self, report: &KeyboardReport) -> Result<usize, HidError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.reports.push(*report);
        Ok(8)
    }
}

pub fn test_config() -> InterpreterConfig {
    InterpreterConfig {
        segment_delay: Duration::from_millis(50),
    }
}

pub fn recording_dispatcher(log: &TraceLog) -> Dispatcher<Recorder, RecordingDelay> {
    Dispatcher::new(Recorder(log.clone()), RecordingDelay(log.clone()))
}

/// Interpret and dispatch `input`, return what the sink and the delay saw
pub fn run(input: &str) -> Vec<Trace> {
    run_bytes(input.as_bytes())
}

pub fn run_bytes(input: &[u8]) -> Vec<Trace> {
    let log = new_log();
    let mut dispatcher = recording_dispatcher(&log);
    let interpretation = interpret(input, &test_config());
    block_on(dispatcher.dispatch(&interpretation));
    log.take()
}

/// Steps of `input` without dispatching them
pub fn steps(input: &str) -> Vec<Step> {
    interpret(input.as_bytes(), &test_config()).steps().collect()
}

/// One `Type` per character of `text`
pub fn typed(text: &str) -> Vec<Trace> {
    text.chars().map(Trace::Type).collect()
}

pub fn report(modifier: u8, keys: &[HidKeyCode]) -> KeyboardReport {
    let mut keycodes = [0; 6];
    for (slot, key) in keycodes.iter_mut().zip(keys) {
        *slot = *key as u8;
    }
    KeyboardReport {
        modifier,
        reserved: 0,
        leds: 0,
        keycodes,
    }
}
