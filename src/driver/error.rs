//! Error types for the sun7i GMAC glue layer
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ProbeError`]: Device-tree discovery and resource acquisition failures
//! - [`ClockError`]: TX clock gating and rate failures
//! - [`RegulatorError`]: PHY supply failures
//! - [`RegmapError`]: CCU register access failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. [`ProbeError::Deferred`] is kept apart from every
//! other failure because the caller retries the attach later instead of
//! marking the device failed.

// Linux errno values used by `Error::to_errno`
const EIO: i32 = 5;
const EBUSY: i32 = 16;
const ENODEV: i32 = 19;
const EINVAL: i32 = 22;
const ERANGE: i32 = 34;
const ESHUTDOWN: i32 = 108;
const EPROBE_DEFER: i32 = 517;

// =============================================================================
// Probe Errors
// =============================================================================

/// Discovery and resource acquisition errors
///
/// These errors occur while attaching the driver to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeError {
    /// A provider (syscon device, regulator) is not available yet; retry later
    Deferred,
    /// The requested resource does not exist
    NotFound,
    /// A device-tree property exists but is malformed
    InvalidProperty,
    /// The syscon provider exposes no register map
    NoRegmap,
    /// The register field description does not fit the register map
    InvalidField,
}

impl core::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProbeError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProbeError::Deferred => "provider not ready, probe deferred",
            ProbeError::NotFound => "resource not found",
            ProbeError::InvalidProperty => "malformed device-tree property",
            ProbeError::NoRegmap => "syscon provides no regmap",
            ProbeError::InvalidField => "invalid register field",
        }
    }
}

// =============================================================================
// Clock Errors
// =============================================================================

/// TX clock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Enable requested on a clock that was never prepared
    NotPrepared,
    /// The clock tree cannot produce the requested rate
    RateUnsupported,
    /// The clock provider reported a failure
    Hardware,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClockError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClockError::NotPrepared => "clock not prepared",
            ClockError::RateUnsupported => "clock rate unsupported",
            ClockError::Hardware => "clock provider failure",
        }
    }
}

// =============================================================================
// Regulator Errors
// =============================================================================

/// PHY supply errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegulatorError {
    /// The supply could not be switched on
    EnableFailed,
    /// The supply could not be switched off
    DisableFailed,
    /// GPIO driving the supply reported an error
    GpioError,
}

impl core::fmt::Display for RegulatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RegulatorError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegulatorError::EnableFailed => "regulator enable failed",
            RegulatorError::DisableFailed => "regulator disable failed",
            RegulatorError::GpioError => "regulator GPIO error",
        }
    }
}

// =============================================================================
// Regmap Errors
// =============================================================================

/// Register map access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegmapError {
    /// Offset outside the register map or not 32-bit aligned
    InvalidRegister,
    /// Bus access failed
    Bus,
}

impl core::fmt::Display for RegmapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RegmapError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegmapError::InvalidRegister => "invalid register offset",
            RegmapError::Bus => "register bus error",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match sun7i_gmac::probe(&node, core) {
///     Err(e) if e.is_deferred() => { /* queue for another probe pass */ }
///     Err(Error::Clock(ClockError::RateUnsupported)) => { /* ... */ }
///     Err(e) => { /* mark device failed */ }
///     Ok(dev) => { /* ... */ }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Probe error
    Probe(ProbeError),
    /// Clock error
    Clock(ClockError),
    /// Regulator error
    Regulator(RegulatorError),
    /// Regmap error
    Regmap(RegmapError),
}

impl Error {
    /// True if the attach should be retried once more providers are available
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Error::Probe(ProbeError::Deferred))
    }

    /// Negative Linux errno equivalent, for C callers
    #[must_use]
    pub const fn to_errno(&self) -> i32 {
        let errno = match self {
            Error::Probe(ProbeError::Deferred) => EPROBE_DEFER,
            Error::Probe(ProbeError::NotFound) => ENODEV,
            Error::Probe(
                ProbeError::InvalidProperty | ProbeError::NoRegmap | ProbeError::InvalidField,
            )
            | Error::Regmap(RegmapError::InvalidRegister) => EINVAL,
            Error::Clock(ClockError::NotPrepared) => ESHUTDOWN,
            Error::Clock(ClockError::RateUnsupported) => ERANGE,
            Error::Regulator(RegulatorError::GpioError) => EBUSY,
            Error::Clock(ClockError::Hardware)
            | Error::Regulator(RegulatorError::EnableFailed | RegulatorError::DisableFailed)
            | Error::Regmap(RegmapError::Bus) => EIO,
        };
        -errno
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Probe(e) => write!(f, "probe: {}", e.as_str()),
            Error::Clock(e) => write!(f, "clock: {}", e.as_str()),
            Error::Regulator(e) => write!(f, "regulator: {}", e.as_str()),
            Error::Regmap(e) => write!(f, "regmap: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ProbeError> for Error {
    fn from(e: ProbeError) -> Self {
        Error::Probe(e)
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Error::Clock(e)
    }
}

impl From<RegulatorError> for Error {
    fn from(e: RegulatorError) -> Self {
        Error::Regulator(e)
    }
}

impl From<RegmapError> for Error {
    fn from(e: RegmapError) -> Self {
        Error::Regmap(e)
    }
}

/// Result type alias for glue operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for probe-time lookups
pub type ProbeResult<T> = core::result::Result<T, ProbeError>;

/// Result type alias for clock operations
pub type ClockResult<T> = core::result::Result<T, ClockError>;

/// Result type alias for regulator operations
pub type RegulatorResult<T> = core::result::Result<T, RegulatorError>;

/// Result type alias for regmap operations
pub type RegmapResult<T> = core::result::Result<T, RegmapError>;

// =============================================================================
// Unit Tests
// =============================================================================
