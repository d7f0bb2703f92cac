//! Core driver components for the A20 GMAC glue.
//!
//! - [`config`] - Link speed, PHY interface and platform data types
//! - [`error`] - Error types and result aliases
//! - [`glue`] - The clock and power adapter handed to the DWMAC core
//! - [`probe`] - Attach, remove, suspend/resume and link-change plumbing
//!
//! # Example
//!
//! ```ignore
//! use sun7i_gmac::driver::{probe, Error};
//!
//! match probe(&node, core) {
//!     Ok(dev) => { /* keep dev around until remove */ }
//!     Err(e) if e.is_deferred() => { /* try again after other drivers */ }
//!     Err(e) => return Err(e),
//! }
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod glue;
pub mod probe;

// Re-exports for convenience
pub use config::{PhyInterface, PlatformData, Speed};
pub use error::{
    ClockError, ClockResult, Error, ProbeError, ProbeResult, RegmapError, RegmapResult,
    RegulatorError, RegulatorResult, Result,
};
pub use glue::{ClockControl, PlatformCallbacks, Sun7iGmac};
pub use probe::{BoundDevice, DRIVER_NAME, MacCore, OF_MATCH_TABLE, matches, probe};
