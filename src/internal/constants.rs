//! Centralized Constants
//!
//! Single source of truth for the magic numbers used by the sun7i glue layer.
//!
//! # Organization
//!
//! - **Clock frequencies**: legacy TX clock rates
//! - **CCU register field**: location and values of the GMAC clock field
//! - **Resource names**: device-tree clock and supply names
//! - **MAC core defaults**: FIFO sizes handed to the DWMAC core

use crate::hal::regmap::RegField;

// =============================================================================
// Clock Frequencies
// =============================================================================

/// TX clock rate for GMII at 1000 Mbps and for RGMII (125 MHz)
pub const GMII_RGMII_RATE_HZ: u32 = 125_000_000;

/// TX clock rate for MII and GMII below 1000 Mbps (25 MHz)
pub const MII_RATE_HZ: u32 = 25_000_000;

// =============================================================================
// CCU Register Field
// =============================================================================

/// GMAC clock register, offset `0x164` in the CCU address range (whole register)
pub const CCU_GMAC_CLK_FIELD: RegField = RegField::new(0x164, 0, 31);

/// CCU field value selecting the internal RGMII transmit clock
pub const SUN7I_A20_RGMII_CLK: u32 = (3 << 1) | (1 << 12);

/// CCU field value selecting the MII/GMII transmit clock
pub const SUN7I_A20_MII_CLK: u32 = 1 << 12;

// =============================================================================
// Resource Names
// =============================================================================

/// TX clock name when the CCU is reachable through a syscon
pub const STMMACETH_CLK_NAME: &str = "stmmaceth";

/// TX clock name on legacy device trees
pub const LEGACY_TX_CLK_NAME: &str = "allwinner_gmac_tx";

/// Supply name of the optional PHY regulator (`phy-supply`)
pub const PHY_SUPPLY_NAME: &str = "phy";

/// Phandle property pointing at the syscon
pub const SYSCON_PROPERTY: &str = "syscon";

/// Primary PHY mode property
pub const PHY_MODE_PROPERTY: &str = "phy-mode";

/// Deprecated PHY mode property, consulted when `phy-mode` is absent
pub const PHY_CONNECTION_TYPE_PROPERTY: &str = "phy-connection-type";

// =============================================================================
// MAC Core Defaults
// =============================================================================

/// TX FIFO size of the A20 GMAC in bytes
pub const TX_FIFO_SIZE: u32 = 4096;

/// RX FIFO size of the A20 GMAC in bytes
pub const RX_FIFO_SIZE: u32 = 16384;
