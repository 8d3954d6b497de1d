//! Configuration file management for wavebar.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Audio capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Audio device to use. Options:
    /// - "default" for system default device
    /// - numeric index (0, 1, 2, etc.) from `wavebar list-devices`
    /// - device name from `wavebar list-devices`
    #[serde(default = "default_device")]
    pub device: String,
    /// Recording sample rate in Hz (actual rate may differ based on device)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

/// Waveform pipeline and progress tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformConfig {
    /// Number of display bars live recordings are rescaled to
    #[serde(default = "default_target_bars")]
    pub target_bars: usize,
    /// Interval between metering levels and progress ticks, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_target_bars() -> usize {
    crate::waveform::DEFAULT_TARGET_BARS
}

fn default_tick_interval_ms() -> u64 {
    50
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
        }
    }
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            target_bars: default_target_bars(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WavebarConfig {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub waveform: WaveformConfig,
}

impl WavebarConfig {
    /// Loads configuration from the user's config directory, falling back
    /// to defaults when no config file exists yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If an existing config file cannot be read
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(&config_path)?;
        let config: WavebarConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }

    /// Tick interval as a [`std::time::Duration`].
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.waveform.tick_interval_ms)
    }
}

/// Retrieves the path to the config file.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let config_dir = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not find home directory",
        )
    })?;
    let config_path = config_dir
        .join(".config")
        .join("wavebar")
        .join("wavebar.toml");

    std::fs::create_dir_all(config_path.parent().unwrap())?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WavebarConfig::default();
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.waveform.target_bars, 100);
        assert_eq!(config.tick_interval().as_millis(), 50);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: WavebarConfig = toml::from_str(
            r#"
            [waveform]
            target_bars = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.waveform.target_bars, 60);
        assert_eq!(config.waveform.tick_interval_ms, 50);
        assert_eq!(config.audio.device, "default");
    }

    #[test]
    fn test_roundtrip() {
        let config = WavebarConfig::default();
        let toml_text = toml::to_string_pretty(&config).unwrap();
        let parsed: WavebarConfig = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed.waveform.target_bars, config.waveform.target_bars);
        assert_eq!(parsed.audio.sample_rate, config.audio.sample_rate);
    }
}
