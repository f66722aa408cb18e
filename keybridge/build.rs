use std::path::Path;
use std::{env, fs};

use keybridge_config::{BridgeConstantsConfig, BridgeTomlConfig};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=KEYBRIDGE_TOML_PATH");

    // Read keybridge.toml if it's present
    let user_toml = if let Ok(toml_path) = env::var("KEYBRIDGE_TOML_PATH") {
        println!("cargo:rerun-if-changed={toml_path}");
        BridgeTomlConfig::from_path(&toml_path).unwrap_or_else(|e| panic!("❌ {e}"))
    } else {
        BridgeTomlConfig::default()
    };

    let constants = get_constants_str(&user_toml.bridge);

    // Write to constants.rs file
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is not set");
    let dest_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&dest_path, constants).expect("Failed to write constants.rs file");
}

fn get_constants_str(constants: &BridgeConstantsConfig) -> String {
    [
        format!("pub(crate) const SEGMENT_DELAY_MS: u64 = {};", constants.segment_delay),
        format!("pub const INPUT_LINE_SIZE: usize = {};", constants.input_line_size),
        format!("pub(crate) const INPUT_CHANNEL_SIZE: usize = {};", constants.input_channel_size),
        format!("pub(crate) const REPORT_CHANNEL_SIZE: usize = {};", constants.report_channel_size),
    ]
    .join("\n")
}
