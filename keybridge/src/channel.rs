//! Exposed channels which can be used to share data across tasks

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};

use crate::hid::KeyboardReport;
use crate::{INPUT_CHANNEL_SIZE, INPUT_LINE_SIZE, REPORT_CHANNEL_SIZE, RawMutex};

/// One write event received from the transport
pub type InputLine = heapless::Vec<u8, INPUT_LINE_SIZE>;

/// Channel for input lines from the transport to the bridge
pub static INPUT_CHANNEL: Channel<RawMutex, InputLine, INPUT_CHANNEL_SIZE> = Channel::new();
/// Channel for keyboard reports from the HID keyboard to the USB writer
pub static REPORT_CHANNEL: Channel<RawMutex, KeyboardReport, REPORT_CHANNEL_SIZE> = Channel::new();

/// Copy a transport write into an [`InputLine`], truncating it to the line capacity.
pub fn input_line(raw: &[u8]) -> InputLine {
    let len = raw.len().min(INPUT_LINE_SIZE);
    if len < raw.len() {
        warn!("Input of {} bytes truncated to {}", raw.len(), INPUT_LINE_SIZE);
    }
    match InputLine::from_slice(&raw[..len]) {
        Ok(line) => line,
        Err(_) => {
            error!("Input of {} bytes does not fit a line", len);
            InputLine::new()
        }
    }
}
