//! Register and bus constants.

/// Width of every register in bytes; also the only valid access size.
pub const REG_BYTES: usize = 4;

/// Stride between consecutive register offsets.
pub const REG_STRIDE: u64 = REG_BYTES as u64;

/// Number of IRQ lines the bus can aggregate into its pending mask.
pub const MAX_IRQ_LINES: u32 = 64;
