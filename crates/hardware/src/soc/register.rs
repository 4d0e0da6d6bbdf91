//! Register block engine for 32-bit memory-mapped registers.
//!
//! A [`RegisterBlock`] owns the storage for a statically described set of
//! registers and turns raw bus transactions into register semantics:
//! 1. **Decoding:** Only 4-byte accesses to a configured, word-aligned offset are valid.
//! 2. **Pre-write hooks:** May replace the incoming value with a transformed one before it is stored.
//! 3. **Post-write hooks:** React to the value that was stored; cannot alter it.
//! 4. **Reset:** Restores every register to its descriptor's reset value.
//!
//! Hooks are plain function pointers that receive an explicit owner context
//! `C` (the device state that is not register storage, e.g. an interrupt
//! line) and a read-only view of the storage, indexed by register number
//! (`offset / 4`). Reads never invoke hooks.

use std::fmt;

use tracing::{debug, warn};

use crate::common::constants::REG_STRIDE;
use crate::common::{AccessError, LayoutError, REG_BYTES};

/// Pre-write hook: `(owner, regs, old, val) -> stored`.
///
/// `old` is the value currently stored in the register being written and
/// `val` the raw value from the bus. The returned value is what gets stored.
pub type PreWriteFn<C> = fn(owner: &mut C, regs: &[u32], old: u32, val: u32) -> u32;

/// Post-write hook: `(owner, regs, stored)`.
///
/// Runs after the store; `regs` already reflects the new value.
pub type PostWriteFn<C> = fn(owner: &mut C, regs: &[u32], stored: u32);

/// Static description of one register.
pub struct RegisterAccessInfo<C> {
    /// Register name used in diagnostics.
    pub name: &'static str,
    /// Byte offset within the block.
    pub addr: u64,
    /// Value loaded on reset.
    pub reset: u32,
    /// Optional transform applied before the store.
    pub pre_write: Option<PreWriteFn<C>>,
    /// Optional side effect run after the store.
    pub post_write: Option<PostWriteFn<C>>,
}

impl<C> Clone for RegisterAccessInfo<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for RegisterAccessInfo<C> {}

impl<C> fmt::Debug for RegisterAccessInfo<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterAccessInfo")
            .field("name", &self.name)
            .field("addr", &format_args!("{:#x}", self.addr))
            .field("reset", &format_args!("{:#010x}", self.reset))
            .field("pre_write", &self.pre_write.is_some())
            .field("post_write", &self.post_write.is_some())
            .finish()
    }
}

/// Storage and dispatch for a block of 32-bit registers.
#[derive(Debug)]
pub struct RegisterBlock<C> {
    /// Device name prefixed to diagnostics.
    prefix: &'static str,
    /// Descriptors ordered by offset; `info[i].addr == i * 4`.
    info: Vec<RegisterAccessInfo<C>>,
    /// Register storage, parallel to `info`.
    regs: Vec<u32>,
    /// Log every successful access at DEBUG level.
    trace: bool,
}

impl<C> RegisterBlock<C> {
    /// Builds a register block from a descriptor table and resets it.
    ///
    /// The table may list registers in any order, but their offsets must be
    /// unique multiples of 4 that exactly tile `table.len() * 4` bytes.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Device name used in diagnostics.
    /// * `table` - Register descriptors.
    /// * `trace` - Emit a DEBUG event for every successful access.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] describing the first offending descriptor.
    pub fn new(
        prefix: &'static str,
        table: &[RegisterAccessInfo<C>],
        trace: bool,
    ) -> Result<Self, LayoutError> {
        let span = (table.len() * REG_BYTES) as u64;
        let mut slots: Vec<Option<RegisterAccessInfo<C>>> = vec![None; table.len()];

        for desc in table {
            if desc.addr % REG_STRIDE != 0 {
                return Err(LayoutError::Misaligned {
                    name: desc.name,
                    addr: desc.addr,
                });
            }
            if desc.addr >= span {
                return Err(LayoutError::OutOfSpan {
                    name: desc.name,
                    addr: desc.addr,
                    span,
                });
            }
            let slot = &mut slots[(desc.addr / REG_STRIDE) as usize];
            if let Some(other) = slot {
                return Err(LayoutError::Duplicate {
                    name: desc.name,
                    addr: desc.addr,
                    other: other.name,
                });
            }
            *slot = Some(*desc);
        }

        // Unique in-span offsets fill every slot.
        let info: Vec<_> = slots.into_iter().flatten().collect();
        let mut block = Self {
            prefix,
            regs: vec![0; info.len()],
            info,
            trace,
        };
        block.reset();
        Ok(block)
    }

    /// Loads every register with its reset value.
    ///
    /// Hooks are not invoked; side effects of a reset belong to the owner.
    pub fn reset(&mut self) {
        for (reg, info) in self.regs.iter_mut().zip(&self.info) {
            *reg = info.reset;
        }
    }

    /// Reads a register.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidAccess`] if `size` is not 4 or `offset`
    /// is not a register address.
    pub fn read(&self, offset: u64, size: usize) -> Result<u32, AccessError> {
        let index = self.decode(offset, size)?;
        let value = self.regs[index];
        if self.trace {
            debug!(
                device = self.prefix,
                reg = self.info[index].name,
                offset,
                value,
                "register read"
            );
        }
        Ok(value)
    }

    /// Writes a register, running its hooks against `owner`.
    ///
    /// The stored value is the pre-write hook's result when one is
    /// configured and `value` otherwise. The post-write hook then sees the
    /// stored value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidAccess`] if `size` is not 4 or `offset`
    /// is not a register address. Nothing is stored and no hook runs.
    pub fn write(
        &mut self,
        owner: &mut C,
        offset: u64,
        value: u32,
        size: usize,
    ) -> Result<(), AccessError> {
        let index = self.decode(offset, size)?;
        let info = self.info[index];

        let stored = match info.pre_write {
            Some(pre_write) => pre_write(owner, &self.regs, self.regs[index], value),
            None => value,
        };
        self.regs[index] = stored;

        if self.trace {
            debug!(
                device = self.prefix,
                reg = info.name,
                offset,
                value,
                stored,
                "register write"
            );
        }

        if let Some(post_write) = info.post_write {
            post_write(owner, &self.regs, stored);
        }
        Ok(())
    }

    /// Returns the raw register storage, indexed by `offset / 4`.
    pub fn regs(&self) -> &[u32] {
        &self.regs
    }

    /// Returns the descriptor of register `index`, if any.
    pub fn info(&self, index: usize) -> Option<&RegisterAccessInfo<C>> {
        self.info.get(index)
    }

    /// Number of registers in the block.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns `true` if the block has no registers.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Size of the block's address span in bytes.
    pub fn span(&self) -> u64 {
        (self.regs.len() * REG_BYTES) as u64
    }

    /// Device name used in diagnostics.
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Maps a bus access to a register index.
    fn decode(&self, offset: u64, size: usize) -> Result<usize, AccessError> {
        if size != REG_BYTES || offset % REG_STRIDE != 0 || offset >= self.span() {
            warn!(
                device = self.prefix,
                offset, size, "guest error: invalid register access"
            );
            return Err(AccessError::InvalidAccess { offset, size });
        }
        Ok((offset / REG_STRIDE) as usize)
    }
}
