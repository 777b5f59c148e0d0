//! Configuration persistence
//!
//! Loads the panel configuration from flash and writes it back on
//! host-triggered config saves. Missing or unreadable stored config is
//! not an error; callers fall back to `DeviceConfig::default()`.

use defmt::*;

use lumistat_core::config::{DeviceConfig, RawDeviceConfig, CONFIG_VERSION};

use super::flash::{ConfigFlash, FlashError, StorageKey};

/// Maximum serialized config size
const MAX_CONFIG_SIZE: usize = 128;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Serialization failed
    Serialize,
    /// Config version mismatch
    VersionMismatch,
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

/// Configuration persistence manager
pub struct ConfigStore<'d> {
    flash: ConfigFlash<'d>,
}

impl<'d> ConfigStore<'d> {
    /// Create a new config store over the flash partition
    pub fn new(flash: ConfigFlash<'d>) -> Self {
        Self { flash }
    }

    /// Load the panel configuration from flash
    ///
    /// Fields absent from the stored record default individually; a
    /// record from a different config version is rejected wholesale.
    pub async fn load(&mut self) -> Result<DeviceConfig, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self.flash.read(StorageKey::DeviceConfig, &mut buffer).await?;

        debug!("Read {} bytes of config from flash", len);

        let raw: RawDeviceConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        if raw.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                raw.version, CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }

        let config = raw.merge();
        info!(
            "Config loaded: label={}, backlight={}, timeout={}ms",
            config.label.as_str(),
            config.backlight_level,
            config.idle_timeout_ms
        );
        Ok(config)
    }

    /// Persist the panel configuration
    pub async fn save(&mut self, config: &DeviceConfig) -> Result<(), ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let data = postcard::to_slice(&config.to_raw(), &mut buffer)
            .map_err(|_| ConfigError::Serialize)?;

        self.flash.write(StorageKey::DeviceConfig, data).await?;
        info!("Config saved ({} bytes)", data.len());
        Ok(())
    }
}

/// Load the stored configuration, falling back to built-in defaults
///
/// When no valid config exists the defaults are written back so the
/// partition is initialized for later host-side edits.
pub async fn load_or_default(store: &mut ConfigStore<'_>) -> DeviceConfig {
    match store.load().await {
        Ok(config) => config,
        Err(ConfigError::Flash(FlashError::NotFound)) => {
            info!("No stored config, using defaults");
            let config = DeviceConfig::default();
            if store.save(&config).await.is_err() {
                warn!("Failed to store default config");
            }
            config
        }
        Err(e) => {
            warn!("Failed to load config: {:?}, using defaults", e);
            DeviceConfig::default()
        }
    }
}
