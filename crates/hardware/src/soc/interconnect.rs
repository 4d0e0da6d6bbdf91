//! System interconnect (bus) for MMIO access.
//!
//! This module implements the bus that routes physical address accesses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range, checked for overlap, and sorted for lookup.
//! 2. **Access routing:** Read/write by physical address with a last-device hint.
//! 3. **Reset:** Fans a system reset out to every device.
//! 4. **IRQ aggregation:** Collects device interrupt levels into a pending mask.

use std::fmt;

use tracing::trace;

use super::devices::Device;
use crate::common::BusError;
use crate::common::constants::MAX_IRQ_LINES;

/// System bus connecting the host to MMIO devices; routes accesses by physical address.
#[derive(Default)]
pub struct Bus {
    /// Registered MMIO devices, sorted by base address.
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for dev in &self.devices {
            let (base, size) = dev.address_range();
            let _ = list.entry(&format_args!(
                "{} @ {:#x}..{:#x}",
                dev.name(),
                base,
                base.saturating_add(size)
            ));
        }
        list.finish()
    }
}

/// Returns `true` if `paddr` falls inside the `(base, size)` region.
const fn contains((base, size): (u64, u64), paddr: u64) -> bool {
    paddr >= base && paddr - base < size
}

/// Returns `true` if two `(base, size)` regions share at least one byte.
const fn overlaps(a: (u64, u64), b: (u64, u64)) -> bool {
    a.1 != 0 && b.1 != 0 && a.0 < b.0.saturating_add(b.1) && b.0 < a.0.saturating_add(a.1)
}

impl Bus {
    /// Creates an empty bus; add devices with `add_device`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device on the bus; devices are sorted by base address for lookup.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Overlap`] if the device's region intersects one
    /// already registered.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<(), BusError> {
        let range = dev.address_range();
        if let Some(other) = self
            .devices
            .iter()
            .find(|d| overlaps(d.address_range(), range))
        {
            return Err(BusError::Overlap {
                name: dev.name(),
                base: range.0,
                other: other.name(),
            });
        }
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
        Ok(())
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns whether the given physical address is backed by any device.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        self.devices
            .iter()
            .any(|d| contains(d.address_range(), paddr))
    }

    /// Reads `size` bytes at the given physical address.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Unmapped`] if no device claims the address, or
    /// [`BusError::Access`] if the device rejects the access.
    pub fn read(&mut self, paddr: u64, size: usize) -> Result<u32, BusError> {
        let (idx, offset) = self.find_device(paddr)?;
        let dev = &mut self.devices[idx];
        trace!(device = dev.name(), paddr, offset, size, "bus read");
        dev.read(offset, size).map_err(|source| BusError::Access {
            device: dev.name(),
            source,
        })
    }

    /// Writes `size` bytes of `value` at the given physical address.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Unmapped`] if no device claims the address, or
    /// [`BusError::Access`] if the device rejects the access.
    pub fn write(&mut self, paddr: u64, value: u32, size: usize) -> Result<(), BusError> {
        let (idx, offset) = self.find_device(paddr)?;
        let dev = &mut self.devices[idx];
        trace!(device = dev.name(), paddr, offset, value, size, "bus write");
        dev.write(offset, value, size)
            .map_err(|source| BusError::Access {
                device: dev.name(),
                source,
            })
    }

    /// Resets every device on the bus.
    pub fn reset(&mut self) {
        for dev in &mut self.devices {
            dev.reset();
        }
    }

    /// Returns a mask with bit `id` set for every device whose interrupt is high.
    ///
    /// Devices without an IRQ id, or with an id outside the mask, are ignored.
    pub fn irq_mask(&self) -> u64 {
        self.devices
            .iter()
            .filter(|d| d.irq_level())
            .filter_map(|d| d.get_irq_id())
            .filter(|&id| id < MAX_IRQ_LINES)
            .fold(0, |mask, id| mask | (1u64 << id))
    }

    /// Finds the device index and device-relative offset for a physical address.
    fn find_device(&mut self, paddr: u64) -> Result<(usize, u64), BusError> {
        if let Some(dev) = self.devices.get(self.last_device_idx) {
            let range = dev.address_range();
            if contains(range, paddr) {
                return Ok((self.last_device_idx, paddr - range.0));
            }
        }
        let (idx, base) = self
            .devices
            .iter()
            .enumerate()
            .map(|(i, d)| (i, d.address_range()))
            .find(|&(_, range)| contains(range, paddr))
            .map(|(i, (base, _))| (i, base))
            .ok_or(BusError::Unmapped { addr: paddr })?;
        self.last_device_idx = idx;
        Ok((idx, paddr - base))
    }
}
