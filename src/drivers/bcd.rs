//! BCD Band-Data Output Driver
//!
//! Drives the four band-data lines (D C B A) read by band-pass filter and
//! amplifier switching hardware, using the Yaesu 10-band BCD table. All
//! lines low means "no band known", the safe state while the radio is
//! absent.

use embedded_hal::digital::{OutputPin, PinState};

use crate::types::Band;

/// 4-bit band-data pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BcdCode(u8);

impl BcdCode {
    /// All lines low
    pub const NONE: Self = Self(0);

    /// Pattern for a band, all-zero when the band is unknown
    #[must_use]
    pub const fn for_band(band: Option<Band>) -> Self {
        match band {
            Some(band) => Self(band.bcd_code()),
            None => Self::NONE,
        }
    }

    /// Raw 4-bit value, D in bit 3 down to A in bit 0
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// State of line A
    #[must_use]
    pub const fn a(self) -> bool {
        self.0 & 0b0001 != 0
    }

    /// State of line B
    #[must_use]
    pub const fn b(self) -> bool {
        self.0 & 0b0010 != 0
    }

    /// State of line C
    #[must_use]
    pub const fn c(self) -> bool {
        self.0 & 0b0100 != 0
    }

    /// State of line D
    #[must_use]
    pub const fn d(self) -> bool {
        self.0 & 0b1000 != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BcdCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BCD({=u8:b})", self.0);
    }
}

/// Something that can display the current band
///
/// Callers are expected to only call [`show`](Self::show) when the band
/// actually changed; implementations write unconditionally.
pub trait BandIndicator {
    /// Output error type
    type Error: embedded_hal::digital::Error;

    /// Display `band`, or the "unknown" state for `None`
    ///
    /// # Errors
    ///
    /// Returns the first pin error encountered.
    fn show(&mut self, band: Option<Band>) -> Result<(), Self::Error>;
}

/// BCD output on four GPIO pins
pub struct BcdOutput<P> {
    a: P,
    b: P,
    c: P,
    d: P,
    code: BcdCode,
}

impl<P: OutputPin> BcdOutput<P> {
    /// Create BCD output (initially drives all lines low)
    ///
    /// # Errors
    ///
    /// Returns the pin error if any line cannot be driven.
    pub fn new(a: P, b: P, c: P, d: P) -> Result<Self, P::Error> {
        let mut output = Self {
            a,
            b,
            c,
            d,
            code: BcdCode::NONE,
        };
        output.write(BcdCode::NONE)?;
        Ok(output)
    }

    /// Drive all four lines to `code`
    ///
    /// # Errors
    ///
    /// Returns the first pin error; the stored code is only updated once all
    /// four lines were written.
    pub fn write(&mut self, code: BcdCode) -> Result<(), P::Error> {
        self.a.set_state(PinState::from(code.a()))?;
        self.b.set_state(PinState::from(code.b()))?;
        self.c.set_state(PinState::from(code.c()))?;
        self.d.set_state(PinState::from(code.d()))?;
        self.code = code;
        Ok(())
    }

    /// Get the code currently on the lines
    #[must_use]
    pub const fn code(&self) -> BcdCode {
        self.code
    }
}

impl<P: OutputPin> BandIndicator for BcdOutput<P> {
    type Error = P::Error;

    fn show(&mut self, band: Option<Band>) -> Result<(), Self::Error> {
        self.write(BcdCode::for_band(band))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_accessors_follow_bit_order() {
        let code = BcdCode::for_band(Some(Band::M10));
        assert_eq!(code.bits(), 0b1001);
        assert!(code.d() && !code.c() && !code.b() && code.a());
    }

    #[test]
    fn unknown_band_is_all_low() {
        assert_eq!(BcdCode::for_band(None), BcdCode::NONE);
    }
}
