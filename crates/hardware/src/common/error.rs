//! Error definitions for register access, register layout, bus routing, and configuration.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Access errors:** The single bus-visible failure of a register block (`InvalidAccess`).
//! 2. **Layout errors:** Rejection of malformed register descriptor tables at construction.
//! 3. **Bus errors:** Routing failures in the host interconnect.
//! 4. **Configuration errors:** JSON parsing and system construction failures.

use thiserror::Error;

/// Failure of a single register access.
///
/// An invalid access never mutates device state and is never fatal to the
/// device; the caller decides how to surface it (e.g. as a bus fault).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Access of an unsupported width, or to an offset that is not a
    /// configured, word-aligned register address.
    #[error("invalid {size}-byte access at offset {offset:#x}")]
    InvalidAccess {
        /// Device-relative byte offset of the access.
        offset: u64,
        /// Access width in bytes.
        size: usize,
    },
}

/// Malformed register descriptor table.
///
/// Offsets must be unique multiples of 4 and the table must cover exactly
/// `count * 4` bytes starting at offset zero.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A descriptor offset is not a multiple of the register width.
    #[error("register {name} at {addr:#x} is not word-aligned")]
    Misaligned {
        /// Register name.
        name: &'static str,
        /// Offending byte offset.
        addr: u64,
    },
    /// Two descriptors share one offset.
    #[error("register {name} at {addr:#x} overlaps register {other}")]
    Duplicate {
        /// Register name.
        name: &'static str,
        /// Shared byte offset.
        addr: u64,
        /// Name of the register already occupying the offset.
        other: &'static str,
    },
    /// A descriptor lies outside the block's `count * 4` byte span.
    #[error("register {name} at {addr:#x} lies outside the {span:#x}-byte block")]
    OutOfSpan {
        /// Register name.
        name: &'static str,
        /// Offending byte offset.
        addr: u64,
        /// Size of the block in bytes.
        span: u64,
    },
}

/// Failure to route an access through the system bus.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    /// No device claims the physical address.
    #[error("no device mapped at {addr:#x}")]
    Unmapped {
        /// Physical address of the access.
        addr: u64,
    },
    /// A device region overlaps one already registered on the bus.
    #[error("device {name} at {base:#x} overlaps {other}")]
    Overlap {
        /// Name of the rejected device.
        name: &'static str,
        /// Base address of the rejected device.
        base: u64,
        /// Name of the device already occupying the region.
        other: &'static str,
    },
    /// The addressed device rejected the access.
    #[error("{device}: {source}")]
    Access {
        /// Name of the device that rejected the access.
        device: &'static str,
        /// Underlying register access error.
        #[source]
        source: AccessError,
    },
}

/// Failure to load a configuration or to build a system from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`Config`](crate::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A device's register table is malformed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A device could not be attached to the bus.
    #[error(transparent)]
    Bus(#[from] BusError),
}
