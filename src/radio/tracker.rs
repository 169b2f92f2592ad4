//! Band Tracking
//!
//! Follows the radio's two VFOs and its transmit VFO selection, and keeps
//! the band indicator showing the band of the transmit frequency.

use crate::drivers::bcd::BandIndicator;
use crate::protocol::CatEvent;
use crate::types::{Band, Frequency, VfoSelect};

/// Result of applying one event to the tracker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// Event carried nothing new
    Ignored,
    /// State changed but the transmit band did not
    Recorded,
    /// Transmit band changed and the indicator was rewritten
    BandChanged(Option<Band>),
    /// Radio powered off; tracker and indicator were reset
    PowerOff,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Update {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ignored => defmt::write!(f, "Ignored"),
            Self::Recorded => defmt::write!(f, "Recorded"),
            Self::BandChanged(band) => defmt::write!(f, "BandChanged({})", band),
            Self::PowerOff => defmt::write!(f, "PowerOff"),
        }
    }
}

/// VFO and band state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BandTracker {
    /// Last frequency reported for VFO A
    vfo_a: Frequency,
    /// Last frequency reported for VFO B
    vfo_b: Frequency,
    /// VFO used for transmit
    tx_vfo: VfoSelect,
    /// Band currently shown on the indicator
    band: Option<Band>,
}

impl BandTracker {
    /// Create a tracker in the reset state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vfo_a: Frequency::ZERO,
            vfo_b: Frequency::ZERO,
            tx_vfo: VfoSelect::A,
            band: None,
        }
    }

    /// Get the frequency stored for a VFO
    #[must_use]
    pub const fn vfo(&self, vfo: VfoSelect) -> Frequency {
        match vfo {
            VfoSelect::A => self.vfo_a,
            VfoSelect::B => self.vfo_b,
        }
    }

    /// Get the transmit VFO
    #[must_use]
    pub const fn tx_vfo(&self) -> VfoSelect {
        self.tx_vfo
    }

    /// Get the transmit frequency
    #[must_use]
    pub const fn tx_frequency(&self) -> Frequency {
        self.vfo(self.tx_vfo)
    }

    /// Get the band shown on the indicator
    #[must_use]
    pub const fn band(&self) -> Option<Band> {
        self.band
    }

    /// Apply a decoded event, updating the indicator if the band changed
    ///
    /// # Errors
    ///
    /// Returns the indicator error if the output could not be written. The
    /// tracker state is updated before the write; the band is only recorded
    /// once the write succeeded. Until then even a repeated report retries
    /// the write.
    pub fn apply<I: BandIndicator>(
        &mut self,
        event: CatEvent,
        indicator: &mut I,
    ) -> Result<Update, I::Error> {
        match event {
            CatEvent::PowerOff => {
                self.reset(indicator)?;
                Ok(Update::PowerOff)
            }
            CatEvent::TxVfo(vfo) => {
                if vfo == self.tx_vfo {
                    return self.retry_pending(indicator);
                }
                self.tx_vfo = vfo;
                self.refresh(indicator)
            }
            CatEvent::Frequency(vfo, freq) => {
                let slot = match vfo {
                    VfoSelect::A => &mut self.vfo_a,
                    VfoSelect::B => &mut self.vfo_b,
                };
                if *slot == freq {
                    return if vfo == self.tx_vfo {
                        self.retry_pending(indicator)
                    } else {
                        Ok(Update::Ignored)
                    };
                }
                *slot = freq;
                if vfo == self.tx_vfo {
                    self.refresh(indicator)
                } else {
                    Ok(Update::Recorded)
                }
            }
        }
    }

    /// Return to defaults and force the indicator to "unknown"
    ///
    /// # Errors
    ///
    /// Returns the indicator error if the output could not be cleared.
    /// On failure the previously shown band is kept so a later report
    /// notices the lines are stale.
    pub fn reset<I: BandIndicator>(&mut self, indicator: &mut I) -> Result<(), I::Error> {
        let shown = self.band;
        *self = Self::new();
        if let Err(err) = indicator.show(None) {
            self.band = shown;
            return Err(err);
        }
        Ok(())
    }

    /// Check if the indicator shows the band of the transmit frequency
    #[must_use]
    pub fn in_sync(&self) -> bool {
        Band::from_frequency(self.tx_frequency()) == self.band
    }

    /// Nothing changed; rewrite only if an earlier write failed
    fn retry_pending<I: BandIndicator>(&mut self, indicator: &mut I) -> Result<Update, I::Error> {
        if self.in_sync() {
            Ok(Update::Ignored)
        } else {
            self.refresh(indicator)
        }
    }

    /// Re-derive the band from the transmit frequency; write only on change
    fn refresh<I: BandIndicator>(&mut self, indicator: &mut I) -> Result<Update, I::Error> {
        let band = Band::from_frequency(self.tx_frequency());
        if band == self.band {
            return Ok(Update::Recorded);
        }
        indicator.show(band)?;
        self.band = band;
        info!("TX band {} ({})", band, self.tx_frequency());
        Ok(Update::BandChanged(band))
    }
}
