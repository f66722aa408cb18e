//! Build-time configuration of keybridge.
//!
//! The firmware reads an optional `keybridge.toml` at compile time and turns the
//! `[bridge]` section into constants. Every field has a default, so an empty
//! file, or no file at all, is a valid configuration.

use std::path::Path;

use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

mod error;

pub use error::{ConfigError, ConfigResult};

/// Upper bound of a single input line, which is also the BLE write buffer size
pub const MAX_INPUT_LINE_SIZE: usize = 512;
/// Upper bound of every channel capacity
pub const MAX_CHANNEL_SIZE: usize = 64;
/// Upper bound of the delay between macro segments, in ms
pub const MAX_SEGMENT_DELAY: u64 = 10_000;

/// Top level of `keybridge.toml`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeTomlConfig {
    #[serde(default)]
    pub bridge: BridgeConstantsConfig,
}

/// Bridge constants, the `[bridge]` section
#[serde_inline_default]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConstantsConfig {
    /// Delay between two segments of a `||` macro chain, in ms
    #[serde_inline_default(50)]
    pub segment_delay: u64,
    /// Capacity of one received line, longer writes are truncated
    #[serde_inline_default(512)]
    pub input_line_size: usize,
    /// Number of lines that can wait for the interpreter
    #[serde_inline_default(4)]
    pub input_channel_size: usize,
    /// Number of keyboard reports that can wait for the USB writer
    #[serde_inline_default(16)]
    pub report_channel_size: usize,
}

/// This separate Default impl is needed when `[bridge]` section is not set in keybridge.toml
impl Default for BridgeConstantsConfig {
    fn default() -> Self {
        Self {
            segment_delay: 50,
            input_line_size: 512,
            input_channel_size: 4,
            report_channel_size: 16,
        }
    }
}

impl BridgeConstantsConfig {
    /// Check that every value fits the firmware's static buffers.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.input_line_size == 0 || self.input_line_size > MAX_INPUT_LINE_SIZE {
            return Err(validation(
                "bridge.input_line_size",
                format!("must be between 1 and {MAX_INPUT_LINE_SIZE}, got {}", self.input_line_size),
            ));
        }
        for (field, value) in [
            ("bridge.input_channel_size", self.input_channel_size),
            ("bridge.report_channel_size", self.report_channel_size),
        ] {
            if value == 0 || value > MAX_CHANNEL_SIZE {
                return Err(validation(
                    field,
                    format!("must be between 1 and {MAX_CHANNEL_SIZE}, got {value}"),
                ));
            }
        }
        if self.segment_delay > MAX_SEGMENT_DELAY {
            return Err(validation(
                "bridge.segment_delay",
                format!("must be at most {MAX_SEGMENT_DELAY}ms, got {}", self.segment_delay),
            ));
        }
        Ok(())
    }
}

impl BridgeTomlConfig {
    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Self::parse(s, "<string>")
    }

    /// Read, parse and validate `keybridge.toml` at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(s: &str, path: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::TomlParse {
            path: path.to_string(),
            message: e.message().to_string(),
        })?;
        config.bridge.validate()?;
        Ok(config)
    }
}

fn validation(field: &str, message: String) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message,
    }
}
