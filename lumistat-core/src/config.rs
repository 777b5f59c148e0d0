//! Device configuration types
//!
//! The few tunables the panel exposes. Stored in flash as
//! postcard-serialized binary data by the firmware; missing stored config
//! is not an error and degrades to the built-in defaults.

use heapless::String;

use crate::power::{DEFAULT_BACKLIGHT_LEVEL, DEFAULT_IDLE_TIMEOUT_MS};
use crate::schedule::DEFAULT_TICK_INTERVAL_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum device label length
pub const MAX_LABEL_LEN: usize = 32;

/// Current config format version
pub const CONFIG_VERSION: u8 = 1;

/// Default device label shown on the panel
pub const DEFAULT_LABEL: &str = "Lumistat";

/// Persistent panel configuration
///
/// Loaded once at startup; rewritten only by host-triggered config
/// saves, never mutated by the panel at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Config format version (for migration checks)
    pub version: u8,
    /// Device label shown on the panel
    pub label: String<MAX_LABEL_LEN>,
    /// Backlight level applied after a render (0-255)
    pub backlight_level: u16,
    /// Backlight idle timeout in milliseconds
    pub idle_timeout_ms: u32,
    /// Panel tick cadence in milliseconds
    pub tick_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str(DEFAULT_LABEL);
        Self {
            version: CONFIG_VERSION,
            label,
            backlight_level: DEFAULT_BACKLIGHT_LEVEL,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Partially-populated configuration as stored on flash
///
/// Each tunable is optional so a stored config with an absent field
/// never produces ambiguous runtime state: [`RawDeviceConfig::merge`]
/// fills every gap with the built-in default before the config is used.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawDeviceConfig {
    /// Config format version of the stored record
    pub version: u8,
    pub label: Option<String<MAX_LABEL_LEN>>,
    pub backlight_level: Option<u16>,
    pub idle_timeout_ms: Option<u32>,
    pub tick_interval_ms: Option<u32>,
}

impl Default for RawDeviceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            label: None,
            backlight_level: None,
            idle_timeout_ms: None,
            tick_interval_ms: None,
        }
    }
}

impl RawDeviceConfig {
    /// Combine with defaults into a fully populated config
    pub fn merge(self) -> DeviceConfig {
        let defaults = DeviceConfig::default();
        DeviceConfig {
            version: CONFIG_VERSION,
            label: self.label.unwrap_or(defaults.label),
            backlight_level: self.backlight_level.unwrap_or(defaults.backlight_level),
            idle_timeout_ms: self.idle_timeout_ms.unwrap_or(defaults.idle_timeout_ms),
            tick_interval_ms: self.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
        }
    }
}

impl DeviceConfig {
    /// Convert to the storage form with every field present
    pub fn to_raw(&self) -> RawDeviceConfig {
        RawDeviceConfig {
            version: self.version,
            label: Some(self.label.clone()),
            backlight_level: Some(self.backlight_level),
            idle_timeout_ms: Some(self.idle_timeout_ms),
            tick_interval_ms: Some(self.tick_interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DeviceConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.label.as_str(), "Lumistat");
        assert_eq!(config.backlight_level, 50);
        assert_eq!(config.idle_timeout_ms, 10_000);
        assert_eq!(config.tick_interval_ms, 2_000);
    }

    #[test]
    fn empty_raw_config_merges_to_defaults() {
        let merged = RawDeviceConfig::default().merge();
        assert_eq!(merged, DeviceConfig::default());
    }

    #[test]
    fn raw_round_trip_preserves_all_fields() {
        let config = DeviceConfig::default();
        assert_eq!(config.to_raw().merge(), config);
    }

    #[test]
    fn present_fields_survive_merge() {
        let mut label = String::new();
        let _ = label.push_str("Garage strip");
        let raw = RawDeviceConfig {
            label: Some(label),
            backlight_level: Some(200),
            idle_timeout_ms: None,
            ..Default::default()
        };
        let merged = raw.merge();
        assert_eq!(merged.label.as_str(), "Garage strip");
        assert_eq!(merged.backlight_level, 200);
        // Missing field falls back
        assert_eq!(merged.idle_timeout_ms, 10_000);
    }
}
