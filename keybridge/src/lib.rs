#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
pub use keybridge_types as types;

pub mod bridge;
pub mod channel;
pub mod config;
pub mod directive;
pub mod dispatch;
pub mod hid;
pub mod interpreter;
pub mod usb;

pub use bridge::{AckNotifier, Bridge, Runnable};
pub use config::InterpreterConfig;
pub use dispatch::{Dispatcher, KeyActionSink};
pub use hid::{HidKeyboard, KeyboardReport, ReportWriter, Reporter};
pub use interpreter::{InputKind, Interpretation, Step, interpret};

// Include generated constants
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub type RawMutex = CriticalSectionRawMutex;
