//! Configuration system for the XOR/match peripheral and its host system.
//!
//! This module defines the configuration structures used to parameterize the
//! simulated system. It provides:
//! 1. **Defaults:** Baseline memory map and interrupt wiring for the peripheral.
//! 2. **Structures:** `general` (diagnostics) and `xor_test` (device placement) sections.
//! 3. **Loading:** JSON parsing via [`Config::from_json`].
//!
//! Every field is optional in JSON; omitted fields take their default.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulated system.
mod defaults {
    /// Base address of the XOR test device MMIO region.
    pub const XOR_TEST_BASE: u64 = 0x1002_0000;

    /// Interrupt line the XOR test device drives.
    pub const XOR_TEST_IRQ: u32 = 12;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use xorsim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "xor_test": { "base_addr": 4096 } }"#).unwrap();
/// assert_eq!(config.xor_test.base_addr, 0x1000);
/// assert_eq!(config.xor_test.irq_id, 12);
/// assert!(!config.general.trace_mmio);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// XOR test device placement and interrupt wiring
    #[serde(default)]
    pub xor_test: XorTestConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit a debug event for every successful register access.
    #[serde(default)]
    pub trace_mmio: bool,
}

/// Placement of the XOR test device on the system bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct XorTestConfig {
    /// Physical base address of the register block.
    #[serde(default = "XorTestConfig::default_base_addr")]
    pub base_addr: u64,

    /// Interrupt line driven by the match output.
    #[serde(default = "XorTestConfig::default_irq_id")]
    pub irq_id: u32,
}

impl XorTestConfig {
    const fn default_base_addr() -> u64 {
        defaults::XOR_TEST_BASE
    }

    const fn default_irq_id() -> u32 {
        defaults::XOR_TEST_IRQ
    }
}

impl Default for XorTestConfig {
    fn default() -> Self {
        Self {
            base_addr: defaults::XOR_TEST_BASE,
            irq_id: defaults::XOR_TEST_IRQ,
        }
    }
}
