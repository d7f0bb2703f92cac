//! Register Map HAL
//!
//! A [`Regmap`] is a 32-bit register space shared by several peripherals,
//! such as the Allwinner CCU exposed as a syscon. A [`RegmapField`] claims
//! one bit range inside one register of that space and writes it without
//! disturbing the other bits.

use crate::driver::error::{ProbeError, ProbeResult, RegmapError, RegmapResult};

/// Build a contiguous bit mask covering bits `lsb..=msb`
pub const fn genmask(msb: u8, lsb: u8) -> u32 {
    (u32::MAX >> (31 - msb as u32)) & (u32::MAX << lsb as u32)
}

// =============================================================================
// Regmap Trait
// =============================================================================

/// 32-bit register map access
pub trait Regmap {
    /// Read the register at byte offset `reg`
    fn read(&mut self, reg: u32) -> RegmapResult<u32>;

    /// Write the register at byte offset `reg`
    fn write(&mut self, reg: u32, value: u32) -> RegmapResult<()>;

    /// Highest valid register offset
    fn max_register(&self) -> u32;

    /// Read-modify-write the bits selected by `mask`
    ///
    /// The bus write is skipped when the register already holds the result.
    /// Returns whether a write was issued.
    fn update_bits(&mut self, reg: u32, mask: u32, value: u32) -> RegmapResult<bool> {
        let orig = self.read(reg)?;
        let new = (orig & !mask) | (value & mask);
        if new == orig {
            return Ok(false);
        }
        self.write(reg, new)?;
        Ok(true)
    }
}

// =============================================================================
// Register Fields
// =============================================================================

/// Location of a bit field inside a register map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegField {
    /// Register byte offset
    pub reg: u32,
    /// Least significant bit
    pub lsb: u8,
    /// Most significant bit (inclusive)
    pub msb: u8,
}

impl RegField {
    /// Describe bits `lsb..=msb` of register `reg`
    pub const fn new(reg: u32, lsb: u8, msb: u8) -> Self {
        Self { reg, lsb, msb }
    }

    /// True when `lsb <= msb <= 31`
    pub const fn is_valid(&self) -> bool {
        self.lsb <= self.msb && self.msb < 32
    }

    /// Register mask covered by the field
    pub const fn mask(&self) -> u32 {
        genmask(self.msb, self.lsb)
    }
}

/// A bit field bound to a register map
///
/// Owns the register map handle; other peripherals sharing the same
/// register space hold their own handles to disjoint fields.
#[derive(Debug)]
pub struct RegmapField<M: Regmap> {
    regmap: M,
    field: RegField,
}

impl<M: Regmap> RegmapField<M> {
    /// Bind `field` to `regmap`
    ///
    /// Fails if the field is malformed or lies beyond the end of the map.
    pub fn new(regmap: M, field: RegField) -> ProbeResult<Self> {
        if !field.is_valid() || field.reg % 4 != 0 || field.reg > regmap.max_register() {
            return Err(ProbeError::InvalidField);
        }
        Ok(Self { regmap, field })
    }

    /// Field location
    pub fn field(&self) -> RegField {
        self.field
    }

    /// Write `value` (right-aligned) into the field
    ///
    /// Returns whether the register actually changed.
    pub fn write(&mut self, value: u32) -> RegmapResult<bool> {
        let mask = self.field.mask();
        self.regmap
            .update_bits(self.field.reg, mask, value << self.field.lsb)
    }

    /// Read the field value (right-aligned)
    pub fn read(&mut self) -> RegmapResult<u32> {
        let raw = self.regmap.read(self.field.reg)?;
        Ok((raw & self.field.mask()) >> self.field.lsb)
    }

    /// Access the underlying register map
    pub fn regmap(&self) -> &M {
        &self.regmap
    }
}

// =============================================================================
// Memory-Mapped Register Map
// =============================================================================

/// Register map over a memory-mapped register block
///
/// # Example
///
/// ```ignore
/// // A20 CCU at 0x01C2_0000, 1 KiB of registers
/// let ccu = unsafe { MmioRegmap::new(0x01C2_0000, 0x3FC) };
/// ```
#[derive(Debug)]
pub struct MmioRegmap {
    base: usize,
    max_register: u32,
}

impl MmioRegmap {
    /// Create a register map over `base..=base + max_register`
    ///
    /// # Safety
    ///
    /// `base` must be the address of a device register block that is mapped,
    /// 4-byte aligned and at least `max_register + 4` bytes long for the
    /// lifetime of the returned value.
    pub const unsafe fn new(base: usize, max_register: u32) -> Self {
        Self { base, max_register }
    }

    fn check(&self, reg: u32) -> RegmapResult<usize> {
        if reg % 4 != 0 || reg > self.max_register {
            return Err(RegmapError::InvalidRegister);
        }
        Ok(self.base + reg as usize)
    }
}

impl Regmap for MmioRegmap {
    fn read(&mut self, reg: u32) -> RegmapResult<u32> {
        let addr = self.check(reg)?;
        // SAFETY: in-bounds and aligned per check(); mapping guaranteed by new()'s contract
        Ok(unsafe { core::ptr::read_volatile(addr as *const u32) })
    }

    fn write(&mut self, reg: u32, value: u32) -> RegmapResult<()> {
        let addr = self.check(reg)?;
        // SAFETY: in-bounds and aligned per check(); mapping guaranteed by new()'s contract
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) };
        Ok(())
    }

    fn max_register(&self) -> u32 {
        self.max_register
    }
}
