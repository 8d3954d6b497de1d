//! Application command handlers for wavebar.
//!
//! This module organizes command handling into separate submodules, each
//! responsible for a specific application command.
//!
//! # Commands
//! - `record`: Audio recording with live waveform metering
//! - `analyze`: Whole-file analysis into normalized display bars
//! - `play`: Playback progress visualization over analyzed bars
//! - `config`: Open configuration file in user's preferred editor
//! - `list_devices`: List available audio input devices
//! - `logs`: Display recent log entries

pub mod analyze;
pub mod config;
pub mod list_devices;
pub mod logs;
pub mod play;
pub mod record;

pub use analyze::handle_analyze;
pub use config::handle_config;
pub use list_devices::handle_list_devices;
pub use logs::handle_logs;
pub use play::handle_play;
pub use record::handle_record;
