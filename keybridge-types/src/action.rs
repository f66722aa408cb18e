use serde::{Deserialize, Serialize};

use crate::keycode::HidKeyCode;

/// A single keyboard operation, executed in order by a key action sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Add the key to the set of held keys
    Press(HidKeyCode),
    /// Remove the key from the set of held keys
    Release(HidKeyCode),
    /// Press by raw HID usage. Modifier usages `0xE0..=0xE7` become modifier bits.
    PressRaw(u8),
    /// Release every held key and modifier
    ReleaseAll,
    /// Press and release whatever is needed to produce the character
    Type(char),
}

/// What happens to the keys a directive pressed once its body has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReleasePolicy {
    /// Each pressed key is released individually, in reverse order.
    Tap,
    /// A single release-all closes the directive.
    AutoRelease,
    /// Keys stay held until something releases them, e.g. `!RELEASE`.
    Sticky,
}
