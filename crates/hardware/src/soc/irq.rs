//! Level-triggered interrupt output.
//!
//! An [`IrqLine`] models one interrupt wire driven by a device. The level is
//! held until explicitly lowered; raising an already-high line (or lowering
//! a low one) is a no-op. The host polls the level and routes it onward.

use tracing::trace;

/// Level of a single interrupt output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IrqLine {
    level: bool,
}

impl IrqLine {
    /// Creates a line in the low state.
    pub const fn new() -> Self {
        Self { level: false }
    }

    /// Drives the line high.
    pub fn raise(&mut self) {
        if !self.level {
            trace!("irq raised");
        }
        self.level = true;
    }

    /// Drives the line low.
    pub fn lower(&mut self) {
        if self.level {
            trace!("irq lowered");
        }
        self.level = false;
    }

    /// Returns `true` while the line is high.
    pub const fn is_raised(&self) -> bool {
        self.level
    }
}
