//! sun7i GMAC clock and power glue
//!
//! [`Sun7iGmac`] owns the resources the A20 GMAC needs besides the MAC core
//! itself: the transmit clock, the optional PHY supply, and on newer device
//! trees the GMAC clock field in the CCU. The MAC core drives it through
//! [`PlatformCallbacks`].
//!
//! # Clock control paths
//!
//! Which path governs a device is decided once, at discovery, and recorded
//! in [`ClockControl`]:
//!
//! - [`ClockControl::RegisterField`]: the device tree carries a `syscon`
//!   phandle to the CCU. The TX clock source is selected by writing the CCU
//!   GMAC clock register; the TX clock (`"stmmaceth"`) is only gated.
//! - [`ClockControl::Legacy`]: no syscon. The TX clock lines are selected by
//!   programming the rate of `"allwinner_gmac_tx"` (the clock driver
//!   reparents on its own) and gating it.
//!
//! # Example
//!
//! ```ignore
//! let mut gmac = Sun7iGmac::from_device(&node)?;
//! gmac.init()?;
//! gmac.fix_mac_speed(Speed::Mbps1000);
//! gmac.exit();
//! ```

use crate::driver::config::{PhyInterface, Speed};
use crate::driver::error::{ProbeError, Result};
use crate::hal::clock::TxClock;
use crate::hal::of::{self, DeviceNode};
use crate::hal::regmap::{Regmap, RegmapField};
use crate::hal::regulator::{PhySupply, Regulator};
use crate::internal::constants::{
    CCU_GMAC_CLK_FIELD, GMII_RGMII_RATE_HZ, LEGACY_TX_CLK_NAME, MII_RATE_HZ, PHY_SUPPLY_NAME,
    STMMACETH_CLK_NAME, SUN7I_A20_MII_CLK, SUN7I_A20_RGMII_CLK, SYSCON_PROPERTY,
};

// =============================================================================
// Callback Table
// =============================================================================

/// Platform hooks the DWMAC core invokes on its glue layer
///
/// The core serializes all calls for one device.
pub trait PlatformCallbacks {
    /// Power up and clock the MAC's PHY side
    fn init(&mut self) -> Result<()>;

    /// Undo [`init`](Self::init); never fails
    fn exit(&mut self);

    /// Reclock the transmit path after a link speed change; never fails
    fn fix_mac_speed(&mut self, speed: Speed);
}

// =============================================================================
// Clock Control
// =============================================================================

/// Governing clock control path of one device
#[derive(Debug)]
pub enum ClockControl<M: Regmap> {
    /// TX clock source selected through the CCU GMAC clock field
    RegisterField(RegmapField<M>),
    /// TX clock source selected through the clock rate
    Legacy {
        /// Whether the glue currently holds the TX clock gate open
        enabled: bool,
    },
}

impl<M: Regmap> ClockControl<M> {
    /// True for the legacy rate-based path
    pub const fn is_legacy(&self) -> bool {
        matches!(self, ClockControl::Legacy { .. })
    }

    /// Legacy gate flag, `None` on the register-field path
    pub const fn legacy_enabled(&self) -> Option<bool> {
        match self {
            ClockControl::Legacy { enabled } => Some(*enabled),
            ClockControl::RegisterField(_) => None,
        }
    }
}

// =============================================================================
// Glue
// =============================================================================

/// Clock and power glue of one A20 GMAC instance
#[derive(Debug)]
pub struct Sun7iGmac<K: TxClock, R: Regulator, M: Regmap> {
    interface: PhyInterface,
    tx_clk: K,
    regulator: Option<PhySupply<R>>,
    control: ClockControl<M>,
}

impl<K: TxClock, R: Regulator, M: Regmap> Sun7iGmac<K, R, M> {
    /// Assemble a glue from already acquired resources
    pub fn new(
        interface: PhyInterface,
        tx_clk: K,
        regulator: Option<R>,
        control: ClockControl<M>,
    ) -> Self {
        Self {
            interface,
            tx_clk,
            regulator: regulator.map(PhySupply::new),
            control,
        }
    }

    /// Discover and acquire the glue resources of `node`
    ///
    /// On failure every resource acquired so far is dropped, and with it
    /// released. A [`ProbeError::Deferred`] result means a provider is not
    /// ready yet and the attach should be retried.
    pub fn from_device<N>(node: &N) -> Result<Self>
    where
        N: DeviceNode<Clock = K, Regulator = R, Regmap = M>,
    {
        let interface = match of::phy_mode(node) {
            Ok(mode) => mode,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("can't get phy-mode: {}", e);
                return Err(e.into());
            }
        };

        let (tx_clk, control) = match node.parse_phandle(SYSCON_PROPERTY, 0) {
            Some(syscon) => {
                let regmap = match of::syscon_regmap(node, &syscon, SYSCON_PROPERTY) {
                    Ok(regmap) => regmap,
                    Err(e) => {
                        #[cfg(feature = "defmt")]
                        defmt::error!("unable to map syscon: {}", e);
                        return Err(e.into());
                    }
                };
                let field = match RegmapField::new(regmap, CCU_GMAC_CLK_FIELD) {
                    Ok(field) => field,
                    Err(e) => {
                        #[cfg(feature = "defmt")]
                        defmt::error!("unable to map syscon register: {}", e);
                        return Err(e.into());
                    }
                };
                let tx_clk = Self::tx_clock(node, STMMACETH_CLK_NAME)?;
                (tx_clk, ClockControl::RegisterField(field))
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::info!("falling back to legacy devicetree support");
                let tx_clk = Self::tx_clock(node, LEGACY_TX_CLK_NAME)?;
                (tx_clk, ClockControl::Legacy { enabled: false })
            }
        };

        let regulator = match node.regulator_get_optional(PHY_SUPPLY_NAME) {
            Ok(Some(regulator)) => Some(regulator),
            Ok(None) => {
                #[cfg(feature = "defmt")]
                defmt::info!("no regulator found");
                None
            }
            Err(ProbeError::Deferred) => return Err(ProbeError::Deferred.into()),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::info!("no regulator found: {}", _e);
                None
            }
        };

        Ok(Self::new(interface, tx_clk, regulator, control))
    }

    fn tx_clock<N: DeviceNode<Clock = K>>(node: &N, id: &str) -> Result<K> {
        node.clk_get(id).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::error!("could not get TX clock {=str}: {}", id, e);
            e.into()
        })
    }

    /// PHY interface mode
    pub fn interface(&self) -> PhyInterface {
        self.interface
    }

    /// Governing clock control path
    pub fn control(&self) -> &ClockControl<M> {
        &self.control
    }

    /// Transmit clock handle
    pub fn tx_clk(&self) -> &K {
        &self.tx_clk
    }

    /// PHY supply, if the device has one
    pub fn supply(&self) -> Option<&PhySupply<R>> {
        self.regulator.as_ref()
    }

    fn clock_init(&mut self) -> Result<()> {
        let rgmii = self.interface.is_rgmii();
        match &mut self.control {
            ClockControl::RegisterField(field) => {
                let value = if rgmii {
                    SUN7I_A20_RGMII_CLK
                } else {
                    SUN7I_A20_MII_CLK
                };
                field.write(value)?;
                #[cfg(feature = "defmt")]
                defmt::debug!("GMAC CCU clock field set to {=u32:#x}", value);
                self.tx_clk.prepare_enable()?;
            }
            ClockControl::Legacy { enabled } => {
                let rate = if rgmii { GMII_RGMII_RATE_HZ } else { MII_RATE_HZ };
                self.tx_clk.set_rate(rate)?;
                #[cfg(feature = "defmt")]
                defmt::debug!("TX clock rate set to {=u32} Hz", rate);
                if rgmii {
                    self.tx_clk.prepare_enable()?;
                    *enabled = true;
                } else {
                    self.tx_clk.prepare()?;
                }
            }
        }
        Ok(())
    }
}

impl<K: TxClock, R: Regulator, M: Regmap> PlatformCallbacks for Sun7iGmac<K, R, M> {
    fn init(&mut self) -> Result<()> {
        if let Some(supply) = self.regulator.as_mut() {
            supply.enable()?;
        }

        if let Err(e) = self.clock_init() {
            if let Some(supply) = self.regulator.as_mut()
                && let Err(_e) = supply.disable()
            {
                #[cfg(feature = "defmt")]
                defmt::warn!("failed to disable PHY supply: {}", _e);
            }
            return Err(e);
        }
        Ok(())
    }

    fn exit(&mut self) {
        match &mut self.control {
            ClockControl::RegisterField(field) => {
                if let Err(_e) = field.write(0) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("failed to clear GMAC CCU clock field: {}", _e);
                }
                self.tx_clk.disable();
            }
            ClockControl::Legacy { enabled } => {
                if *enabled {
                    self.tx_clk.disable();
                    *enabled = false;
                }
            }
        }
        self.tx_clk.unprepare();

        if let Some(supply) = self.regulator.as_mut()
            && let Err(_e) = supply.disable()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("failed to disable PHY supply: {}", _e);
        }
    }

    fn fix_mac_speed(&mut self, speed: Speed) {
        let interface = self.interface;
        match &mut self.control {
            ClockControl::RegisterField(field) => {
                self.tx_clk.disable_unprepare();
                let value = if speed.is_gigabit() {
                    SUN7I_A20_RGMII_CLK
                } else {
                    SUN7I_A20_MII_CLK
                };
                if let Err(_e) = field.write(value) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("failed to write GMAC CCU clock field: {}", _e);
                }
                if let Err(_e) = self.tx_clk.prepare_enable() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("failed to re-enable TX clock: {}", _e);
                }
            }
            ClockControl::Legacy { enabled } => {
                // only GMII needs the clock lines reconfigured
                if interface != PhyInterface::Gmii {
                    return;
                }

                if *enabled {
                    self.tx_clk.disable();
                    *enabled = false;
                }
                self.tx_clk.unprepare();

                let rate = if speed.is_gigabit() {
                    GMII_RGMII_RATE_HZ
                } else {
                    MII_RATE_HZ
                };
                if let Err(_e) = self.tx_clk.set_rate(rate) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("failed to set TX clock rate {=u32}: {}", rate, _e);
                }

                let gated = if speed.is_gigabit() {
                    self.tx_clk.prepare_enable().map(|()| *enabled = true)
                } else {
                    self.tx_clk.prepare()
                };
                if let Err(_e) = gated {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("failed to reclock TX clock: {}", _e);
                }
            }
        }
    }
}
