//! Cubietruck board configuration (A20 + RTL8211E).
//!
//! The PHY sits on an RGMII link and its 3.3 V rail is switched by a GPIO,
//! so the glue runs on the register-field path with a [`GpioRegulator`]
//! supply.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::driver::config::{PhyInterface, PlatformData};
use crate::hal::regmap::MmioRegmap;
use crate::hal::regulator::GpioRegulator;

/// Cubietruck board configuration constants and helpers.
pub struct Cubietruck;

impl Cubietruck {
    // =========================================================================
    // PHY Configuration
    // =========================================================================

    /// MDIO address of the RTL8211E.
    pub const PHY_ADDR: u8 = 1;

    /// PHY interface mode.
    pub const PHY_INTERFACE: PhyInterface = PhyInterface::Rgmii;

    /// Time for the PHY 3.3 V rail to settle after switching on (microseconds).
    pub const PHY_SUPPLY_STARTUP_US: u32 = 100_000;

    // =========================================================================
    // Clock Control Unit
    // =========================================================================

    /// CCU base address on the A20.
    pub const CCU_BASE: usize = 0x01C2_0000;

    /// Last register offset of the CCU block.
    pub const CCU_MAX_REGISTER: u32 = 0x3FC;

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Platform data for the board.
    pub const fn platform_data() -> PlatformData {
        PlatformData::sun7i()
            .with_interface(Self::PHY_INTERFACE)
            .with_phy_addr(Self::PHY_ADDR)
    }

    /// PHY supply switched by the active-high enable pin `en`.
    pub fn phy_supply<P: OutputPin, D: DelayNs>(en: P, delay: D) -> GpioRegulator<P, D> {
        GpioRegulator::new(en, delay, Self::PHY_SUPPLY_STARTUP_US)
    }

    /// Register map over the CCU.
    ///
    /// # Safety
    ///
    /// The CCU must be identity mapped at [`Self::CCU_BASE`], and the caller
    /// must not program the GMAC clock register through any other handle.
    pub unsafe fn ccu_regmap() -> MmioRegmap {
        // SAFETY: forwarded to the caller
        unsafe { MmioRegmap::new(Self::CCU_BASE, Self::CCU_MAX_REGISTER) }
    }
}
