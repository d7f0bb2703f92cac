//! Device-Tree Lookup HAL
//!
//! The glue layer discovers its resources through [`DeviceNode`], the view
//! of one device-tree node together with the platform's clock, regulator and
//! syscon providers. A Linux binding forwards these to `of_*`, `devm_clk_get`
//! and friends; a bare-metal board implements them from static tables.

use crate::driver::config::PhyInterface;
use crate::driver::error::{ProbeError, ProbeResult};
use crate::hal::clock::TxClock;
use crate::hal::regmap::Regmap;
use crate::hal::regulator::Regulator;
use crate::internal::constants::{PHY_CONNECTION_TYPE_PROPERTY, PHY_MODE_PROPERTY};

/// Device-tree node of the GMAC with access to its resource providers
pub trait DeviceNode {
    /// Transmit clock handle type
    type Clock: TxClock;
    /// PHY regulator handle type
    type Regulator: Regulator;
    /// Syscon register map handle type
    type Regmap: Regmap;
    /// Handle to a node referenced by phandle
    type Node;

    /// Read a string property
    ///
    /// `Ok(None)` if the property is absent, [`ProbeError::InvalidProperty`]
    /// if it exists but is not a string.
    fn property_str(&self, name: &str) -> ProbeResult<Option<&str>>;

    /// Resolve entry `index` of phandle property `name`
    fn parse_phandle(&self, name: &str, index: usize) -> Option<Self::Node>;

    /// Register map published by the device instantiated from `node`
    ///
    /// [`ProbeError::Deferred`] if that device has not been probed yet,
    /// [`ProbeError::NoRegmap`] if it publishes no register map.
    fn device_regmap(&self, node: &Self::Node) -> ProbeResult<Self::Regmap>;

    /// Register map of the syscon referenced by phandle property `name`,
    /// looked up through the global syscon table
    fn syscon_regmap_by_phandle(&self, name: &str) -> ProbeResult<Self::Regmap>;

    /// Acquire the clock named `id`
    fn clk_get(&self, id: &str) -> ProbeResult<Self::Clock>;

    /// Acquire the optional supply named `id`
    ///
    /// `Ok(None)` if the node declares no such supply.
    fn regulator_get_optional(&self, id: &str) -> ProbeResult<Option<Self::Regulator>>;
}

/// Read the PHY interface mode of `node`
///
/// `phy-mode` is preferred over the deprecated `phy-connection-type`, which
/// is also consulted when `phy-mode` is malformed. A node without either
/// property, or with a mode name this crate does not know, yields
/// [`PhyInterface::NA`]. A malformed `phy-mode` with no usable fallback is an
/// error.
pub fn phy_mode<N: DeviceNode>(node: &N) -> ProbeResult<PhyInterface> {
    let name = match node.property_str(PHY_MODE_PROPERTY) {
        Ok(Some(name)) => Some(name),
        Ok(None) => node.property_str(PHY_CONNECTION_TYPE_PROPERTY)?,
        Err(e) => match node.property_str(PHY_CONNECTION_TYPE_PROPERTY) {
            Ok(Some(name)) => Some(name),
            Ok(None) | Err(_) => return Err(e),
        },
    };
    let Some(name) = name else {
        return Ok(PhyInterface::NA);
    };

    match PhyInterface::from_dt_str(name) {
        Some(mode) => Ok(mode),
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("unknown phy-mode {=str}", name);
            Ok(PhyInterface::NA)
        }
    }
}

/// Resolve the register map behind the syscon phandle `name`
///
/// Walks to the provider device first and falls back to the syscon table.
/// When both fail, a deferral from either attempt wins so the caller retries
/// instead of failing for good.
pub fn syscon_regmap<N: DeviceNode>(
    node: &N,
    syscon: &N::Node,
    name: &str,
) -> ProbeResult<N::Regmap> {
    let walk_err = match node.device_regmap(syscon) {
        Ok(regmap) => return Ok(regmap),
        Err(e) => e,
    };

    match node.syscon_regmap_by_phandle(name) {
        Ok(regmap) => Ok(regmap),
        Err(_) if walk_err == ProbeError::Deferred => Err(ProbeError::Deferred),
        Err(e) => Err(e),
    }
}
