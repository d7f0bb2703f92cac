//! Hardware Abstraction Layer
//!
//! Traits for the resources the glue drives, plus small implementations
//! usable on bare metal.
//!
//! # Modules
//!
//! - [`clock`]: TX clock prepare/enable/rate control
//! - [`regmap`]: Shared register maps and bit fields (the CCU syscon)
//! - [`regulator`]: PHY supply, including a GPIO-switched fixed regulator
//! - [`of`]: Device-tree lookups used at attach
//!
//! # Delay Integration
//!
//! [`GpioRegulator`] uses `embedded_hal::delay::DelayNs` directly. Pass any
//! delay implementation from your HAL.

pub mod clock;
pub mod of;
pub mod regmap;
pub mod regulator;

// Re-export commonly used types
pub use clock::{ClockGate, ClockState, TxClock};
pub use of::DeviceNode;
pub use regmap::{MmioRegmap, RegField, Regmap, RegmapField};
pub use regulator::{GpioRegulator, PhySupply, Regulator};
