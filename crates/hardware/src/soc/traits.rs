//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Word read/write at device-relative offsets, reporting invalid accesses.
//! 3. **Lifecycle:** `reset` to return the device to its power-on state.
//! 4. **Interrupts:** The current level of the device's interrupt output and its line number.
//!
//! Accesses are synchronous and take `&mut self`; the host serializes them.

use crate::common::AccessError;

/// Trait for memory-mapped I/O devices attached to the system bus.
pub trait Device {
    /// Returns a short name for this device (e.g., `"xor-test"`).
    fn name(&self) -> &'static str;
    /// Returns (base_address, size_in_bytes) for this device's MMIO region.
    fn address_range(&self) -> (u64, u64);
    /// Reads `size` bytes at the given device-relative offset.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidAccess`] for unsupported widths or offsets.
    fn read(&mut self, offset: u64, size: usize) -> Result<u32, AccessError>;
    /// Writes `size` bytes of `value` at the given device-relative offset.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidAccess`] for unsupported widths or offsets;
    /// device state is left untouched.
    fn write(&mut self, offset: u64, value: u32, size: usize) -> Result<(), AccessError>;
    /// Returns the device to its reset state.
    fn reset(&mut self);

    /// Returns the level of the device's interrupt output.
    fn irq_level(&self) -> bool {
        false
    }
    /// Returns the IRQ ID for this device if it can raise interrupts.
    fn get_irq_id(&self) -> Option<u32> {
        None
    }
}
