//! Radio Control Logic
//!
//! State machines and business logic for following the radio.
//! Implements the functional core of the bridge.

pub mod session;
pub mod tracker;
