//! Device lifecycle
//!
//! Attaches a [`Sun7iGmac`] to the DWMAC core and carries it through
//! remove, system suspend/resume and link changes. The core itself is
//! abstracted by [`MacCore`].

use crate::driver::config::{PlatformData, Speed};
use crate::driver::error::Result;
use crate::driver::glue::{PlatformCallbacks, Sun7iGmac};
use crate::hal::clock::TxClock;
use crate::hal::of::DeviceNode;
use crate::hal::regmap::Regmap;
use crate::hal::regulator::Regulator;

/// Driver name registered with the platform bus
pub const DRIVER_NAME: &str = "sun7i-dwmac";

/// Device-tree compatible strings handled by this driver
pub const OF_MATCH_TABLE: &[&str] = &["allwinner,sun7i-a20-gmac"];

/// True if `compatible` names a device this driver binds to
#[must_use]
pub fn matches(compatible: &str) -> bool {
    OF_MATCH_TABLE.contains(&compatible)
}

// =============================================================================
// MAC Core
// =============================================================================

/// The shared DWMAC core driver
///
/// The glue hands itself to the core as `&mut dyn PlatformCallbacks`; the
/// core calls back into it on its own schedule.
pub trait MacCore {
    /// Map registers and look up interrupts of the device
    fn get_platform_resources(&mut self) -> Result<()>;

    /// Parse the generic DWMAC device-tree properties
    fn probe_config_dt(&mut self) -> Result<()>;

    /// Release what [`probe_config_dt`](Self::probe_config_dt) allocated
    fn remove_config_dt(&mut self);

    /// Register the network device
    fn driver_probe(&mut self, plat: &PlatformData, glue: &mut dyn PlatformCallbacks)
    -> Result<()>;

    /// Unregister the network device
    fn driver_remove(&mut self, glue: &mut dyn PlatformCallbacks);

    /// Quiesce the MAC before system suspend
    fn suspend(&mut self, glue: &mut dyn PlatformCallbacks);

    /// Restart the MAC after system resume
    fn resume(&mut self, glue: &mut dyn PlatformCallbacks) -> Result<()>;

    /// Link came up at `speed`
    fn link_up(&mut self, speed: Speed);
}

// =============================================================================
// Bound Device
// =============================================================================

/// A GMAC attached to the DWMAC core
#[derive(Debug)]
pub struct BoundDevice<K: TxClock, R: Regulator, M: Regmap, C: MacCore> {
    gmac: Sun7iGmac<K, R, M>,
    core: C,
    plat: PlatformData,
    suspended: bool,
    // link change reported while suspended, replayed on resume
    pending_link: Option<Speed>,
}

/// Attach the A20 GMAC described by `node` to `core`
///
/// On failure everything done so far is undone and the error returned;
/// [`Error::is_deferred`](crate::Error::is_deferred) tells whether the
/// attach should be retried later.
pub fn probe<N, C>(
    node: &N,
    mut core: C,
) -> Result<BoundDevice<N::Clock, N::Regulator, N::Regmap, C>>
where
    N: DeviceNode,
    C: MacCore,
{
    core.get_platform_resources()?;
    core.probe_config_dt()?;

    match attach(node, &mut core) {
        Ok((gmac, plat)) => {
            #[cfg(feature = "defmt")]
            defmt::info!("{=str}: GMAC attached, {=str}", DRIVER_NAME, plat.interface.as_str());
            Ok(BoundDevice {
                gmac,
                core,
                plat,
                suspended: false,
                pending_link: None,
            })
        }
        Err(e) => {
            core.remove_config_dt();
            Err(e)
        }
    }
}

fn attach<N, C>(
    node: &N,
    core: &mut C,
) -> Result<(Sun7iGmac<N::Clock, N::Regulator, N::Regmap>, PlatformData)>
where
    N: DeviceNode,
    C: MacCore,
{
    let mut gmac = Sun7iGmac::from_device(node)?;
    let plat = PlatformData::sun7i().with_interface(gmac.interface());

    gmac.init()?;
    if let Err(e) = core.driver_probe(&plat, &mut gmac) {
        gmac.exit();
        return Err(e);
    }
    Ok((gmac, plat))
}

impl<K, R, M, C> BoundDevice<K, R, M, C>
where
    K: TxClock,
    R: Regulator,
    M: Regmap,
    C: MacCore,
{
    /// Detach from the core and release all resources, handing the core back
    pub fn remove(mut self) -> C {
        self.core.driver_remove(&mut self.gmac);
        self.gmac.exit();
        self.core.remove_config_dt();
        self.core
    }

    /// Enter system suspend
    pub fn suspend(&mut self) {
        if self.suspended {
            return;
        }
        self.core.suspend(&mut self.gmac);
        self.gmac.exit();
        self.suspended = true;
    }

    /// Leave system suspend
    ///
    /// If powering the glue back up or restarting the core fails, the glue
    /// is powered down again and the device stays suspended. A link change
    /// reported while suspended is applied once the core is running.
    pub fn resume(&mut self) -> Result<()> {
        if !self.suspended {
            return Ok(());
        }
        self.gmac.init()?;
        if let Err(e) = self.core.resume(&mut self.gmac) {
            self.gmac.exit();
            return Err(e);
        }
        self.suspended = false;

        if let Some(speed) = self.pending_link.take() {
            self.link_up(speed);
        }
        Ok(())
    }

    /// Report a link change to the glue and the core
    ///
    /// While suspended the clocks are off, so the change is only recorded
    /// and replayed by [`resume`](Self::resume). The latest report wins.
    pub fn link_up(&mut self, speed: Speed) {
        if self.suspended {
            #[cfg(feature = "defmt")]
            defmt::debug!("link change to {=u32} Mbps deferred until resume", speed.mbps());
            self.pending_link = Some(speed);
            return;
        }
        self.gmac.fix_mac_speed(speed);
        self.core.link_up(speed);
    }

    /// True between [`suspend`](Self::suspend) and a successful
    /// [`resume`](Self::resume)
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Platform data handed to the core
    pub fn platform_data(&self) -> &PlatformData {
        &self.plat
    }

    /// Clock and power glue
    pub fn gmac(&self) -> &Sun7iGmac<K, R, M> {
        &self.gmac
    }

    /// MAC core
    pub fn core(&self) -> &C {
        &self.core
    }
}
