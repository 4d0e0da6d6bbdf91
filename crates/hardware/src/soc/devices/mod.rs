//! Memory-Mapped IO Devices.
//!
//! This module contains the peripherals that can be attached to the system bus.


pub use xor_test::XorTest;

pub use crate::soc::traits::Device;
