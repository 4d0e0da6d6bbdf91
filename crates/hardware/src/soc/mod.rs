//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components that make up the simulated system:
//! the register engine, the peripherals built on it, interrupt outputs, the
//! system bus, and the builder for assembling the system.

/// System builder for assembling SoC components.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// Level-triggered interrupt outputs.
pub mod irq;

/// Register block engine (descriptors, hooks, storage).
pub mod register;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::System;
