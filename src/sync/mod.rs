//! Synchronization Support
//!
//! The glue itself does no locking: the DWMAC core serializes every call.
//! This module is for applications that keep the bound device in a `static`
//! and reach it from both thread and interrupt context.
//!
//! - [`CriticalSectionCell`] - ISR-safe interior mutability
//! - [`SharedGmac`] - critical-section protected slot for a bound device
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedGmac;
