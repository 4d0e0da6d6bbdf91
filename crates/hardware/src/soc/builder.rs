//! System construction and top-level `System` type.
//!
//! This module builds the simulated system from configuration. It performs:
//! 1. **Bus setup:** Creates the interconnect.
//! 2. **Device registration:** Instantiates the XOR test device at its configured base address.
//! 3. **Reset:** Leaves every device in its power-on state.

use tracing::info;

use crate::common::ConfigError;
use crate::config::Config;
use crate::soc::devices::{Device, XorTest};
use crate::soc::interconnect::Bus;

/// Top-level system instance containing the bus.
#[derive(Debug)]
pub struct System {
    /// System interconnect; routes accesses to MMIO devices.
    pub bus: Bus,
}

impl System {
    /// Builds a new system from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a device cannot be constructed or its
    /// region overlaps another device.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut bus = Bus::new();

        let xor_test = XorTest::new(&config.xor_test, config.general.trace_mmio)?;
        let (base, size) = xor_test.address_range();
        bus.add_device(Box::new(xor_test))?;
        info!(base, size, irq = config.xor_test.irq_id, "xor-test attached");

        Ok(Self { bus })
    }

    /// Resets every device in the system.
    pub fn reset(&mut self) {
        self.bus.reset();
    }

    /// Returns the mask of interrupt lines currently held high.
    pub fn pending_irqs(&self) -> u64 {
        self.bus.irq_mask()
    }
}
