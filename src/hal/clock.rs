//! Clock Control HAL
//!
//! This module defines the interface the glue layer uses to drive the GMAC
//! transmit clock. It follows the common-clock consumer model: a clock is
//! first *prepared* (may sleep, e.g. PLL lock), then *enabled* (gate opened).
//!
//! Implementations must treat the transitions as idempotent: enabling an
//! enabled clock, disabling a disabled clock, or unpreparing an unprepared
//! clock changes nothing. Teardown paths rely on this.

use crate::driver::error::{ClockError, ClockResult};

/// Clock gating state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockState {
    /// Clock not prepared
    #[default]
    Unprepared,
    /// Clock prepared, gate closed
    Prepared,
    /// Clock prepared and gate open
    Enabled,
}

impl ClockState {
    /// True once the clock has been prepared (gate open or not)
    pub const fn is_prepared(self) -> bool {
        !matches!(self, ClockState::Unprepared)
    }

    /// True while the gate is open
    pub const fn is_enabled(self) -> bool {
        matches!(self, ClockState::Enabled)
    }
}

/// Transmit clock consumer handle
///
/// The handle is exclusively owned by one glue instance and released when
/// dropped.
pub trait TxClock {
    /// Prepare the clock
    fn prepare(&mut self) -> ClockResult<()>;

    /// Undo [`prepare`](Self::prepare)
    fn unprepare(&mut self);

    /// Open the clock gate
    ///
    /// Fails with [`ClockError::NotPrepared`] if the clock is not prepared.
    fn enable(&mut self) -> ClockResult<()>;

    /// Close the clock gate
    fn disable(&mut self);

    /// Program the clock rate in Hz
    ///
    /// The clock tree may reparent the clock to reach the requested rate.
    fn set_rate(&mut self, rate_hz: u32) -> ClockResult<()>;

    /// Current clock rate in Hz
    fn rate(&self) -> u32;

    /// Prepare then enable, unpreparing again if the enable fails
    fn prepare_enable(&mut self) -> ClockResult<()> {
        self.prepare()?;
        if let Err(e) = self.enable() {
            self.unprepare();
            return Err(e);
        }
        Ok(())
    }

    /// Disable then unprepare
    fn disable_unprepare(&mut self) {
        self.disable();
        self.unprepare();
    }
}

// =============================================================================
// Clock Gate
// =============================================================================

/// Software clock gate
///
/// Tracks [`ClockState`] and the programmed rate for clocks whose gate and
/// divider are handled elsewhere (firmware, a fixed oscillator, or a CCU the
/// application programs itself). Rates outside `min_hz..=max_hz` are
/// rejected.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockGate {
    state: ClockState,
    rate_hz: u32,
    min_hz: u32,
    max_hz: u32,
}

impl ClockGate {
    /// Create a gate accepting any rate in `min_hz..=max_hz`
    pub const fn new(min_hz: u32, max_hz: u32) -> Self {
        Self {
            state: ClockState::Unprepared,
            rate_hz: 0,
            min_hz,
            max_hz,
        }
    }

    /// Current gating state
    pub const fn state(&self) -> ClockState {
        self.state
    }
}

impl TxClock for ClockGate {
    fn prepare(&mut self) -> ClockResult<()> {
        if self.state == ClockState::Unprepared {
            self.state = ClockState::Prepared;
        }
        Ok(())
    }

    fn unprepare(&mut self) {
        // an open gate stays open until disabled
        if self.state == ClockState::Prepared {
            self.state = ClockState::Unprepared;
        }
    }

    fn enable(&mut self) -> ClockResult<()> {
        match self.state {
            ClockState::Unprepared => Err(ClockError::NotPrepared),
            _ => {
                self.state = ClockState::Enabled;
                Ok(())
            }
        }
    }

    fn disable(&mut self) {
        if self.state == ClockState::Enabled {
            self.state = ClockState::Prepared;
        }
    }

    fn set_rate(&mut self, rate_hz: u32) -> ClockResult<()> {
        if rate_hz < self.min_hz || rate_hz > self.max_hz {
            return Err(ClockError::RateUnsupported);
        }
        self.rate_hz = rate_hz;
        Ok(())
    }

    fn rate(&self) -> u32 {
        self.rate_hz
    }
}
