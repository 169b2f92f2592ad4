//! Kenwood CAT to BCD Band-Data Bridge
//!
//! This library provides the core of a small STM32G474-based controller
//! that listens to a Kenwood transceiver's CAT port and drives the four
//! BCD band-data lines used by band-pass filter and amplifier switching
//! hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Session (link state machine, main-loop driver)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     RADIO / PROTOCOL                         │
//! │  Frame reader + CAT decoder  │  Band tracker (VFO A/B, TX)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │     BCD output driver  │  UART wrapper  │  Status LED        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Functional core, imperative shell**: the session takes the current
//!   time as an argument and talks to hardware only through
//!   `embedded-hal` / `embedded-io` traits, so the whole core runs on the host
//! - **Type-driven design**: bands, frequencies and VFO selection are distinct types
//! - **No unsafe in application code**
//! - **Explicit error handling**: all fallible operations return `Result`,
//!   none of them are fatal

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

#[macro_use]
mod logging;

/// Hardware Abstraction Layer
///
/// Board-specific wrappers over STM32G474 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// BCD band-data output.
pub mod drivers;

/// Radio Control Logic
///
/// Band tracking and the CAT link state machine.
pub mod radio;

/// Communication Protocols
///
/// Kenwood CAT framing and decoding.
pub mod protocol;

/// Millisecond stopwatches driven by an external clock
pub mod timer;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::drivers::bcd::{BandIndicator, BcdOutput};
    pub use crate::radio::session::{LinkError, LinkState, SerialPort, Session};

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Delay, Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, unwrap, warn};
}
