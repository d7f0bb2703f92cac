//! Configuration types for the sun7i GMAC glue layer

use crate::internal::constants::{RX_FIFO_SIZE, TX_FIFO_SIZE};

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
    /// 1000 Mbps
    Mbps1000,
}

impl Speed {
    /// Convert a speed in Mbps as reported by the MAC core
    #[must_use]
    pub const fn from_mbps(mbps: u32) -> Option<Self> {
        match mbps {
            10 => Some(Speed::Mbps10),
            100 => Some(Speed::Mbps100),
            1000 => Some(Speed::Mbps1000),
            _ => None,
        }
    }

    /// Speed in Mbps
    #[must_use]
    pub const fn mbps(self) -> u32 {
        match self {
            Speed::Mbps10 => 10,
            Speed::Mbps100 => 100,
            Speed::Mbps1000 => 1000,
        }
    }

    /// True for 1000 Mbps
    #[must_use]
    pub const fn is_gigabit(self) -> bool {
        matches!(self, Speed::Mbps1000)
    }
}

/// PHY interface mode, as named by the device-tree `phy-mode` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyInterface {
    /// Not specified
    #[default]
    NA,
    /// Internal PHY
    Internal,
    /// Media Independent Interface
    Mii,
    /// Gigabit Media Independent Interface
    Gmii,
    /// Serial GMII
    Sgmii,
    /// Ten Bit Interface
    Tbi,
    /// Reverse MII
    RevMii,
    /// Reduced MII
    Rmii,
    /// Reverse RMII
    RevRmii,
    /// Reduced GMII, no internal delays
    Rgmii,
    /// RGMII with internal RX and TX delays
    RgmiiId,
    /// RGMII with internal RX delay
    RgmiiRxid,
    /// RGMII with internal TX delay
    RgmiiTxid,
    /// Reduced TBI
    Rtbi,
    /// Serial MII
    Smii,
    /// 10 Gigabit MII
    Xgmii,
    /// Quad SGMII
    Qsgmii,
    /// Turbo RGMII
    Trgmii,
    /// 1000BASE-X
    Base1000X,
    /// 2500BASE-X
    Base2500X,
}

impl PhyInterface {
    const ALL: [PhyInterface; 20] = [
        PhyInterface::NA,
        PhyInterface::Internal,
        PhyInterface::Mii,
        PhyInterface::Gmii,
        PhyInterface::Sgmii,
        PhyInterface::Tbi,
        PhyInterface::RevMii,
        PhyInterface::Rmii,
        PhyInterface::RevRmii,
        PhyInterface::Rgmii,
        PhyInterface::RgmiiId,
        PhyInterface::RgmiiRxid,
        PhyInterface::RgmiiTxid,
        PhyInterface::Rtbi,
        PhyInterface::Smii,
        PhyInterface::Xgmii,
        PhyInterface::Qsgmii,
        PhyInterface::Trgmii,
        PhyInterface::Base1000X,
        PhyInterface::Base2500X,
    ];

    /// Device-tree name of the mode
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PhyInterface::NA => "",
            PhyInterface::Internal => "internal",
            PhyInterface::Mii => "mii",
            PhyInterface::Gmii => "gmii",
            PhyInterface::Sgmii => "sgmii",
            PhyInterface::Tbi => "tbi",
            PhyInterface::RevMii => "rev-mii",
            PhyInterface::Rmii => "rmii",
            PhyInterface::RevRmii => "rev-rmii",
            PhyInterface::Rgmii => "rgmii",
            PhyInterface::RgmiiId => "rgmii-id",
            PhyInterface::RgmiiRxid => "rgmii-rxid",
            PhyInterface::RgmiiTxid => "rgmii-txid",
            PhyInterface::Rtbi => "rtbi",
            PhyInterface::Smii => "smii",
            PhyInterface::Xgmii => "xgmii",
            PhyInterface::Qsgmii => "qsgmii",
            PhyInterface::Trgmii => "trgmii",
            PhyInterface::Base1000X => "1000base-x",
            PhyInterface::Base2500X => "2500base-x",
        }
    }

    /// Parse a `phy-mode` string (case-insensitive)
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_dt_str(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
    }

    /// True for RGMII and all of its internal-delay variants
    #[must_use]
    pub const fn is_rgmii(self) -> bool {
        matches!(
            self,
            PhyInterface::Rgmii
                | PhyInterface::RgmiiId
                | PhyInterface::RgmiiRxid
                | PhyInterface::RgmiiTxid
        )
    }
}

/// Platform data handed to the DWMAC core at probe
///
/// Hardware features of the A20 GMAC; the glue itself travels alongside as
/// the platform callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlatformData {
    /// TX checksum offload engine present
    pub tx_coe: bool,
    /// Core is a GMAC (gigabit capable)
    pub has_gmac: bool,
    /// TX FIFO size in bytes
    pub tx_fifo_size: u32,
    /// RX FIFO size in bytes
    pub rx_fifo_size: u32,
    /// PHY interface mode discovered from the device tree
    pub interface: PhyInterface,
    /// Fixed MDIO address of the PHY; `None` lets the core scan the bus
    pub phy_addr: Option<u8>,
}

impl PlatformData {
    /// A20 GMAC defaults
    #[must_use]
    pub const fn sun7i() -> Self {
        Self {
            tx_coe: true,
            has_gmac: true,
            tx_fifo_size: TX_FIFO_SIZE,
            rx_fifo_size: RX_FIFO_SIZE,
            interface: PhyInterface::NA,
            phy_addr: None,
        }
    }

    /// Set the PHY interface mode
    #[must_use]
    pub const fn with_interface(mut self, interface: PhyInterface) -> Self {
        self.interface = interface;
        self
    }

    /// Pin the PHY to MDIO address `addr`
    #[must_use]
    pub const fn with_phy_addr(mut self, addr: u8) -> Self {
        self.phy_addr = Some(addr);
        self
    }

    /// Set the FIFO sizes
    #[must_use]
    pub const fn with_fifo_sizes(mut self, tx: u32, rx: u32) -> Self {
        self.tx_fifo_size = tx;
        self.rx_fifo_size = rx;
        self
    }

    /// Enable or disable TX checksum offload
    #[must_use]
    pub const fn with_tx_coe(mut self, enabled: bool) -> Self {
        self.tx_coe = enabled;
        self
    }
}

impl Default for PlatformData {
    fn default() -> Self {
        Self::sun7i()
    }
}
