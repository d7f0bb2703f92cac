//! PHY Supply HAL
//!
//! Abstractions for the optional regulator powering the Ethernet PHY.
//!
//! - [`Regulator`]: the supply provider interface
//! - [`PhySupply`]: consumer handle that remembers whether it holds an
//!   enable, so a disable is only forwarded once per enable
//! - [`GpioRegulator`]: a fixed supply switched by a GPIO, with a startup
//!   delay, as found on most A20 boards

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::driver::error::{RegulatorError, RegulatorResult};

/// Voltage regulator provider
pub trait Regulator {
    /// Switch the supply on
    fn enable(&mut self) -> RegulatorResult<()>;

    /// Switch the supply off
    fn disable(&mut self) -> RegulatorResult<()>;
}

// =============================================================================
// Consumer Handle
// =============================================================================

/// Consumer side of the PHY regulator
#[derive(Debug)]
pub struct PhySupply<R: Regulator> {
    regulator: R,
    enabled: bool,
}

impl<R: Regulator> PhySupply<R> {
    /// Wrap a regulator; the consumer starts without an enable reference
    pub const fn new(regulator: R) -> Self {
        Self {
            regulator,
            enabled: false,
        }
    }

    /// Enable the supply unless this consumer already did
    pub fn enable(&mut self) -> RegulatorResult<()> {
        if !self.enabled {
            self.regulator.enable()?;
            self.enabled = true;
        }
        Ok(())
    }

    /// Drop this consumer's enable, if it holds one
    ///
    /// The reference is considered released even if the provider fails.
    pub fn disable(&mut self) -> RegulatorResult<()> {
        if !self.enabled {
            return Ok(());
        }
        self.enabled = false;
        self.regulator.disable()
    }

    /// True while this consumer holds an enable
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Access the underlying regulator
    pub fn regulator(&self) -> &R {
        &self.regulator
    }
}

// =============================================================================
// GPIO-Switched Fixed Regulator
// =============================================================================

/// Fixed-voltage supply switched by a GPIO
///
/// After switching on, waits `startup_delay_us` for the rail to settle
/// before returning.
///
/// # Example
///
/// ```ignore
/// let en = Output::new(peripherals.PH23, Level::Low);
/// let supply = GpioRegulator::new(en, delay, 100_000);
/// ```
#[derive(Debug)]
pub struct GpioRegulator<P: OutputPin, D: DelayNs> {
    pin: P,
    delay: D,
    startup_delay_us: u32,
    active_low: bool,
}

impl<P: OutputPin, D: DelayNs> GpioRegulator<P, D> {
    /// Create an active-high supply
    pub fn new(pin: P, delay: D, startup_delay_us: u32) -> Self {
        Self {
            pin,
            delay,
            startup_delay_us,
            active_low: false,
        }
    }

    /// Create an active-low supply
    pub fn new_active_low(pin: P, delay: D, startup_delay_us: u32) -> Self {
        Self {
            pin,
            delay,
            startup_delay_us,
            active_low: true,
        }
    }

    /// Startup delay in microseconds
    pub fn startup_delay_us(&self) -> u32 {
        self.startup_delay_us
    }

    /// Release the pin and delay provider
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn drive(&mut self, on: bool) -> RegulatorResult<()> {
        let result = if on != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| RegulatorError::GpioError)
    }
}

impl<P: OutputPin, D: DelayNs> Regulator for GpioRegulator<P, D> {
    fn enable(&mut self) -> RegulatorResult<()> {
        self.drive(true)?;
        if self.startup_delay_us > 0 {
            self.delay.delay_us(self.startup_delay_us);
        }
        Ok(())
    }

    fn disable(&mut self) -> RegulatorResult<()> {
        self.drive(false)
    }
}
