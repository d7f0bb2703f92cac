//! ISR-safe holder for a bound GMAC.

use super::primitives::CriticalSectionCell;
use crate::driver::config::Speed;
use crate::driver::probe::{BoundDevice, MacCore};
use crate::hal::clock::TxClock;
use crate::hal::regmap::Regmap;
use crate::hal::regulator::Regulator;

/// ISR-safe slot for a [`BoundDevice`].
///
/// Empty until a probed device is installed. All access goes through
/// `critical_section::with()`, disabling interrupts for the duration of the
/// closure.
///
/// # Example
///
/// ```ignore
/// static GMAC: SharedGmac<Clk, Reg, MmioRegmap, Core> = SharedGmac::new();
///
/// GMAC.install(sun7i_gmac::probe(&node, core)?);
///
/// // PHY state machine, possibly from an interrupt
/// GMAC.link_up(Speed::Mbps1000);
/// ```
pub struct SharedGmac<K, R, M, C>
where
    K: TxClock,
    R: Regulator,
    M: Regmap,
    C: MacCore,
{
    inner: CriticalSectionCell<Option<BoundDevice<K, R, M, C>>>,
}

impl<K, R, M, C> SharedGmac<K, R, M, C>
where
    K: TxClock,
    R: Regulator,
    M: Regmap,
    C: MacCore,
{
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Store a bound device, returning the one it replaces.
    pub fn install(&self, dev: BoundDevice<K, R, M, C>) -> Option<BoundDevice<K, R, M, C>> {
        self.inner.with(|slot| slot.replace(dev))
    }

    /// Take the bound device out, e.g. to [`remove`](BoundDevice::remove) it.
    pub fn take(&self) -> Option<BoundDevice<K, R, M, C>> {
        self.inner.with(Option::take)
    }

    /// True while a device is installed.
    pub fn is_bound(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the bound device.
    ///
    /// Returns `None` if no device is installed.
    #[inline]
    pub fn with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut BoundDevice<K, R, M, C>) -> T,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if already borrowed or empty.
    #[inline]
    pub fn try_with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut BoundDevice<K, R, M, C>) -> T,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }

    /// Forward a link change to the bound device; ignored when empty.
    ///
    /// A suspended device defers the change to its next resume.
    pub fn link_up(&self, speed: Speed) {
        self.with(|dev| dev.link_up(speed));
    }
}

impl<K, R, M, C> Default for SharedGmac<K, R, M, C>
where
    K: TxClock,
    R: Regulator,
    M: Regmap,
    C: MacCore,
{
    fn default() -> Self {
        Self::new()
    }
}
