//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the band-data bridge.
//! Link timing, buffer sizes, the band plan and pin mappings are
//! centralized here. None of them are mutable at runtime.

use crate::types::{Band, BandEdges};

/// CAT port baud rate (Kenwood factory default)
pub const RADIO_BAUD_RATE: u32 = 9_600;

/// Silence after which the poll sequence is re-sent
pub const COMMAND_TIMEOUT_MS: u64 = 10_000;

/// Silence after a poll after which the link is dropped and reset
pub const AWAITING_DATA_TIMEOUT_MS: u64 = 2_000;

/// Interval between reconnect attempts while the radio is absent
pub const RECONNECT_POLL_INTERVAL_MS: u64 = 1_000;

/// Pause between the commands of the poll sequence
pub const INTER_COMMAND_DELAY_MS: u32 = 50;

/// Main loop period
pub const MAIN_LOOP_PERIOD_MS: u64 = 1;

/// Largest CAT frame accepted by the frame reader (terminator excluded)
pub const FRAME_BUFFER_SIZE: usize = 32;

/// Bytes pulled from the serial port per read call
pub const READ_CHUNK_SIZE: usize = 16;

/// UART receive ring buffer size
pub const UART_RX_BUFFER_SIZE: usize = 128;

/// UART transmit ring buffer size
pub const UART_TX_BUFFER_SIZE: usize = 32;

/// Band plan used for band lookup (inclusive edges, Hz)
pub const BAND_PLAN: [BandEdges; 6] = [
    BandEdges::new(Band::M160, 1_810_000, 2_000_000),
    BandEdges::new(Band::M80, 3_500_000, 3_800_000),
    BandEdges::new(Band::M40, 7_000_000, 7_200_000),
    BandEdges::new(Band::M20, 14_000_000, 14_350_000),
    BandEdges::new(Band::M15, 21_000_000, 21_450_000),
    BandEdges::new(Band::M10, 28_000_000, 29_700_000),
];

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// USART1 TX to the radio's CAT RXD
    pub const CAT_TX: &str = "PA9";

    /// USART1 RX from the radio's CAT TXD
    pub const CAT_RX: &str = "PA10";

    /// BCD band data bit A (LSB)
    pub const BCD_A: &str = "PC0";

    /// BCD band data bit B
    pub const BCD_B: &str = "PC1";

    /// BCD band data bit C
    pub const BCD_C: &str = "PC2";

    /// BCD band data bit D (MSB)
    pub const BCD_D: &str = "PC3";
}
