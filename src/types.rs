//! Shared types used across the bridge
//!
//! This module defines the domain types shared by the protocol decoder,
//! the band tracker and the BCD driver.

use core::fmt;

use crate::config::BAND_PLAN;

/// Frequency in Hertz as reported by the radio
///
/// Unlike a tuning frequency this is not range-checked: the radio may
/// report anything, and out-of-plan values simply map to no band.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Frequency(u64);

impl Frequency {
    /// Zero Hz, the value of a VFO that has not reported yet
    pub const ZERO: Self = Self(0);

    /// Create a frequency from Hz
    #[must_use]
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Amateur radio HF/6m band
///
/// `Option<Band>` is used wherever the band may be unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// 160 meters
    M160,
    /// 80 meters
    M80,
    /// 40 meters
    M40,
    /// 30 meters
    M30,
    /// 20 meters
    M20,
    /// 17 meters
    M17,
    /// 15 meters
    M15,
    /// 12 meters
    M12,
    /// 10 meters
    M10,
    /// 6 meters
    M6,
}

impl Band {
    /// Look up the band plan entry containing `freq`
    ///
    /// Returns `None` when the frequency is outside every configured
    /// sub-band, including 0 Hz.
    #[must_use]
    pub fn from_frequency(freq: Frequency) -> Option<Self> {
        BAND_PLAN
            .iter()
            .find(|edges| edges.contains(freq))
            .map(|edges| edges.band)
    }

    /// Yaesu-style BCD band number driven on the D C B A lines
    #[must_use]
    pub const fn bcd_code(self) -> u8 {
        match self {
            Self::M160 => 0b0001,
            Self::M80 => 0b0010,
            Self::M40 => 0b0011,
            Self::M30 => 0b0100,
            Self::M20 => 0b0101,
            Self::M17 => 0b0110,
            Self::M15 => 0b0111,
            Self::M12 => 0b1000,
            Self::M10 => 0b1001,
            Self::M6 => 0b1010,
        }
    }

    /// Band name as printed on front panels
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::M160 => "160m",
            Self::M80 => "80m",
            Self::M40 => "40m",
            Self::M30 => "30m",
            Self::M20 => "20m",
            Self::M17 => "17m",
            Self::M15 => "15m",
            Self::M12 => "12m",
            Self::M10 => "10m",
            Self::M6 => "6m",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// One entry of the band plan: a band and its inclusive edges in Hz
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandEdges {
    /// Band this range belongs to
    pub band: Band,
    /// Lowest frequency in the band (inclusive)
    pub low_hz: u64,
    /// Highest frequency in the band (inclusive)
    pub high_hz: u64,
}

impl BandEdges {
    /// Create a band plan entry
    #[must_use]
    pub const fn new(band: Band, low_hz: u64, high_hz: u64) -> Self {
        Self {
            band,
            low_hz,
            high_hz,
        }
    }

    /// Check whether `freq` lies within the edges
    #[must_use]
    pub const fn contains(&self, freq: Frequency) -> bool {
        freq.as_hz() >= self.low_hz && freq.as_hz() <= self.high_hz
    }
}

/// VFO A/B selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VfoSelect {
    /// VFO A
    #[default]
    A,
    /// VFO B
    B,
}

impl VfoSelect {
    /// Toggle VFO selection
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for VfoSelect {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "VFO-A"),
            Self::B => defmt::write!(f, "VFO-B"),
        }
    }
}
