//! Boot keyboard state and report writing.

use core::future::Future;

use embassy_sync::channel::{Receiver, Sender};
use keybridge_types::keycode::HidKeyCode;
use keybridge_types::modifier::HidModifiers;
use serde::Serialize;
use usbd_hid::descriptor::generator_prelude::*;

use crate::RawMutex;
use crate::bridge::Runnable;
use crate::dispatch::KeyActionSink;

/// Number of non-modifier keys a boot keyboard report can carry
pub const KEY_SLOTS: usize = 6;
/// Size of a serialized keyboard input report
const KEYBOARD_REPORT_SIZE: usize = 8;
/// Usages from here on are not sent by a boot keyboard
const FIRST_UNSUPPORTED_USAGE: u8 = 0xA5;

/// KeyboardReport describes a report and its companion descriptor that can be
/// used to send keyboard button presses to a host and receive the status of the
/// keyboard LEDs.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = KEYBOARD) = {
        (usage_page = KEYBOARD, usage_min = 0xE0, usage_max = 0xE7) = {
            #[packed_bits = 8] #[item_settings(data,variable,absolute)] modifier=input;
        };
        (logical_min = 0,) = {
            #[item_settings(constant,variable,absolute)] reserved=input;
        };
        (usage_page = LEDS, usage_min = 0x01, usage_max = 0x05) = {
            #[packed_bits = 5] #[item_settings(data,variable,absolute)] leds=output;
        };
        (usage_page = KEYBOARD, usage_min = 0x00, usage_max = 0xDD) = {
            #[item_settings(data,array,absolute)] keycodes=input;
        };
    }
)]
#[allow(dead_code)]
#[derive(Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8, // HidModifiers
    pub reserved: u8,
    pub leds: u8,
    pub keycodes: [u8; 6],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    UsbDisabled,
    BufferOverflow,
}

/// Destination of keyboard reports: a channel, or the USB endpoint itself.
pub trait ReportWriter {
    /// Write report to the host, return the number of bytes written if success.
    fn write_report(&mut self, report: &KeyboardReport) -> impl Future<Output = Result<usize, HidError>>;
}

impl<const N: usize> ReportWriter for Sender<'_, RawMutex, KeyboardReport, N> {
    async fn write_report(&mut self, report: &KeyboardReport) -> Result<usize, HidError> {
        self.send(*report).await;
        Ok(KEYBOARD_REPORT_SIZE)
    }
}

/// A USB boot keyboard: holds the pressed keys and reports every change.
pub struct HidKeyboard<W: ReportWriter> {
    modifiers: HidModifiers,
    keycodes: [u8; KEY_SLOTS],
    writer: W,
}

impl<W: ReportWriter> HidKeyboard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            modifiers: HidModifiers::new(),
            keycodes: [0; KEY_SLOTS],
            writer,
        }
    }

    pub fn modifiers(&self) -> HidModifiers {
        self.modifiers
    }

    /// Raw usages in the key slots, `0` for a free slot
    pub fn keycodes(&self) -> &[u8; KEY_SLOTS] {
        &self.keycodes
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// The report for the current state
    pub fn report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifiers.into_bits(),
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        }
    }

    async fn send_report(&mut self) {
        let report = self.report();
        if let Err(e) = self.writer.write_report(&report).await {
            error!("Failed to send keyboard report: {:?}", e);
        }
    }

    /// Add a raw usage to the state. Returns false if there's no room for it.
    fn hold(&mut self, code: u8) -> bool {
        if let Some(modifier) = HidModifiers::from_usage(code) {
            self.modifiers |= modifier;
            return true;
        }
        if code == 0 || code >= FIRST_UNSUPPORTED_USAGE || self.keycodes.contains(&code) {
            return true;
        }
        match self.keycodes.iter_mut().find(|slot| **slot == 0) {
            Some(slot) => {
                *slot = code;
                true
            }
            None => {
                warn!("All {} key slots are busy, usage {:#x} dropped", KEY_SLOTS, code);
                false
            }
        }
    }

    /// Remove a raw usage from the state
    fn let_go(&mut self, code: u8) {
        if let Some(modifier) = HidModifiers::from_usage(code) {
            self.modifiers &= !modifier;
            return;
        }
        if code == 0 || code >= FIRST_UNSUPPORTED_USAGE {
            return;
        }
        for slot in self.keycodes.iter_mut().filter(|slot| **slot == code) {
            *slot = 0;
        }
    }
}

impl<W: ReportWriter> KeyActionSink for HidKeyboard<W> {
    async fn press(&mut self, key: HidKeyCode) {
        let modifier = key.to_hid_modifiers();
        if modifier.is_empty() {
            return self.press_raw(key as u8).await;
        }
        self.modifiers |= modifier;
        self.send_report().await
    }

    async fn release(&mut self, key: HidKeyCode) {
        let modifier = key.to_hid_modifiers();
        if modifier.is_empty() {
            self.let_go(key as u8);
        } else {
            self.modifiers &= !modifier;
        }
        self.send_report().await
    }

    async fn press_raw(&mut self, usage: u8) {
        if self.hold(usage) {
            self.send_report().await
        }
    }

    async fn release_all(&mut self) {
        self.modifiers = HidModifiers::new();
        self.keycodes = [0; KEY_SLOTS];
        self.send_report().await
    }

    async fn type_char(&mut self, c: char) {
        let Some((key, shifted)) = HidKeyCode::from_char(c) else {
            warn!("No key for {:?}, dropped", c);
            return;
        };
        let shift = HidKeyCode::LShift.to_hid_modifiers();

        if shifted {
            self.modifiers |= shift;
        }
        if !self.hold(key as u8) {
            if shifted {
                self.modifiers &= !shift;
            }
            return;
        }
        self.send_report().await;

        if shifted {
            self.modifiers &= !shift;
        }
        self.let_go(key as u8);
        self.send_report().await
    }
}

/// Forwards reports from a channel to the host.
pub struct Reporter<'a, W: ReportWriter, const N: usize> {
    receiver: Receiver<'a, RawMutex, KeyboardReport, N>,
    writer: W,
}

impl<'a, W: ReportWriter, const N: usize> Reporter<'a, W, N> {
    pub fn new(receiver: Receiver<'a, RawMutex, KeyboardReport, N>, writer: W) -> Self {
        Self { receiver, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: ReportWriter, const N: usize> Runnable for Reporter<'_, W, N> {
    async fn run(&mut self) {
        loop {
            let report = self.receiver.receive().await;
            if let Err(e) = self.writer.write_report(&report).await {
                error!("Failed to send keyboard report: {:?}", e);
            }
        }
    }
}
