//! Common types and constants shared by the register engine, devices, and bus.
//!
//! This module provides:
//! 1. **Constants:** Register width and access-size rules.
//! 2. **Error Handling:** Access, layout, bus, and configuration errors.

/// Register and bus constants.
pub mod constants;

/// Error types for register access, layout validation, routing, and configuration.
pub mod error;

pub use constants::REG_BYTES;
pub use error::{AccessError, BusError, ConfigError, LayoutError};
