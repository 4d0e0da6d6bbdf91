//! Register-level model of a memory-mapped XOR/match peripheral.
//!
//! This crate implements a small MMIO peripheral for system simulators with the following:
//! 1. **Register engine:** A generic block of 32-bit registers with reset values and pre/post-write hooks.
//! 2. **Device:** The XOR test peripheral (DATA, MATCHER) and its level-triggered match interrupt.
//! 3. **SoC:** Device trait, bus interconnect, and a system builder for hosting the device.
//! 4. **Configuration:** JSON-loadable memory map and diagnostics settings.

/// Common types and constants (register width, errors).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// System-on-chip (register engine, devices, IRQ lines, bus, builder).
pub mod soc;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The XOR test peripheral.
pub use crate::soc::devices::XorTest;
/// Top-level system (bus and devices); construct with `System::new`.
pub use crate::soc::System;
