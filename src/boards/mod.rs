//! Board-specific presets.
//!
//! Board helpers collect the GMAC wiring of a specific A20 board so
//! bare-metal bring-up does not have to repeat it.
//!
//! # Supported Boards
//!
//! - Cubietruck (Cubieboard 3): RTL8211E over RGMII, GPIO-switched PHY supply

pub mod cubietruck;
