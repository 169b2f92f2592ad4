//! Peripheral Drivers
//!
//! High-level drivers for the hardware hanging off the controller.
//! These provide domain-specific abstractions over `embedded-hal` pins.

pub mod bcd;
