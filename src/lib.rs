//! Allwinner A20 GMAC Glue
//!
//! A `no_std`, `no_alloc` glue layer binding the Allwinner sun7i (A20) GMAC,
//! a Synopsys DesignWare MAC (DWMAC) instance, to the clocks and power it
//! needs.
//!
//! The MAC itself (DMA rings, interrupts, PHY negotiation) is driven by a
//! generic DWMAC core. This crate supplies what is specific to the A20:
//!
//! - selecting the GMAC transmit clock source, either through the CCU GMAC
//!   clock register or, on older device trees, through the TX clock rate
//! - gating the transmit clock
//! - switching the optional PHY supply
//! - reclocking the transmit path when the link speed changes
//!
//! # Architecture
//!
//! 1. **Glue** ([`driver::glue`]): [`Sun7iGmac`], the clock and power adapter,
//!    exposed to the core as [`PlatformCallbacks`]
//! 2. **Lifecycle** ([`driver::probe`]): attach, remove, suspend/resume and
//!    link-change plumbing around a [`MacCore`]
//! 3. **HAL Layer** ([`hal`]): clock, regulator, register map and
//!    device-tree traits, plus bare-metal implementations
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for error types
//! - `critical-section`: Enable ISR-safe `SharedGmac` wrapper
//!
//! # Example
//!
//! ```ignore
//! use sun7i_gmac::{probe, Speed};
//!
//! let mut dev = match probe(&node, core) {
//!     Ok(dev) => dev,
//!     Err(e) if e.is_deferred() => return Retry,
//!     Err(e) => return Fail(e.to_errno()),
//! };
//!
//! // PHY reported link
//! dev.link_up(Speed::Mbps1000);
//!
//! dev.suspend();
//! dev.resume()?;
//!
//! let core = dev.remove();
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod boards;
pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{PhyInterface, PlatformData, Speed};
pub use driver::error::{
    ClockError, ClockResult, Error, ProbeError, ProbeResult, RegmapError, RegmapResult,
    RegulatorError, RegulatorResult, Result,
};
pub use driver::glue::{ClockControl, PlatformCallbacks, Sun7iGmac};
pub use driver::probe::{BoundDevice, DRIVER_NAME, MacCore, OF_MATCH_TABLE, matches, probe};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedGmac;

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // CCU GMAC clock register
        CCU_GMAC_CLK_FIELD,
        // TX clock rates
        GMII_RGMII_RATE_HZ,
        // Resource names
        LEGACY_TX_CLK_NAME,
        MII_RATE_HZ,
        PHY_SUPPLY_NAME,
        // FIFO sizes
        RX_FIFO_SIZE,
        STMMACETH_CLK_NAME,
        SUN7I_A20_MII_CLK,
        SUN7I_A20_RGMII_CLK,
        TX_FIFO_SIZE,
    };
}
