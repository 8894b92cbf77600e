//! Configuration for flash regions and image loading.
//!
//! Provides centralized configuration with sensible defaults. Partial JSON
//! documents are accepted; missing fields fall back to the defaults.

use crate::error::{FlashError, Result};
use crate::object::types::COPY_BIT;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Address at which the ESP8266 maps its flash (irom0) segment.
pub const DEFAULT_FLASH_BASE: u32 = 0x4020_0000;

/// Master configuration for flash images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    /// Runtime address of the first byte of the image.
    pub base_address: u32,
    /// Resource limits applied when opening images.
    pub limits: ImageLimits,
    /// Validate records before handing out checked views.
    pub validate_on_access: bool,
    /// Chunk size used by the device read path of file-backed images.
    pub device_read_chunk: usize,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_FLASH_BASE,
            limits: ImageLimits::default(),
            validate_on_access: true,
            device_read_chunk: 4096,
        }
    }
}

impl FlashConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every address the image may occupy can be encoded in an
    /// indirection record.
    pub fn validate(&self) -> Result<()> {
        if self.base_address == 0 {
            return Err(FlashError::InvalidConfig(
                "base_address must not be the null address".to_string(),
            ));
        }
        if self.base_address % 4 != 0 {
            return Err(FlashError::InvalidConfig(format!(
                "base_address {:#010x} is not 4-byte aligned",
                self.base_address
            )));
        }
        let end = self.base_address as u64 + self.limits.max_image_size;
        if end > COPY_BIT as u64 {
            return Err(FlashError::InvalidConfig(format!(
                "image of {} bytes at {:#010x} would reach the indirection bit",
                self.limits.max_image_size, self.base_address
            )));
        }
        if self.device_read_chunk == 0 {
            return Err(FlashError::InvalidConfig(
                "device_read_chunk must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resource limits for image files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    /// The absolute maximum image size that can be opened.
    pub max_image_size: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_image_size: 16 * 1024 * 1024, // 16MB
        }
    }
}
