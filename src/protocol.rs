//! Communication Protocols
//!
//! Kenwood CAT framing and decoding for band tracking.
//!
//! Kenwood CAT is semicolon-terminated ASCII: a two-character designator
//! followed by parameters, e.g. `FA00014250000;`. With auto-information
//! enabled (`AI2;`) the radio pushes these unsolicited whenever the VFOs
//! change. Only the four designators needed to follow the transmit
//! frequency are decoded; everything else is dropped.

use heapless::Vec;

use crate::config::FRAME_BUFFER_SIZE;
use crate::types::{Frequency, VfoSelect};

/// CAT command/response terminator byte
pub const TERMINATOR: u8 = b';';

/// Maximum frame length (terminator excluded)
pub const MAX_FRAME_LEN: usize = FRAME_BUFFER_SIZE;

/// Number of frequency digits in an `FA`/`FB` frame
pub const FREQUENCY_DIGITS: usize = 11;

/// One frame, terminator stripped
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

/// Incremental frame reader
///
/// Accumulates bytes until a terminator arrives. A frame that outgrows the
/// buffer is dropped as a whole and the reader resynchronizes on the next
/// terminator, so a garbled burst never yields a truncated frame.
#[derive(Debug, Default)]
pub struct FrameReader {
    /// Frame buffer
    buffer: Frame,
    /// Set while skipping the rest of an oversized frame
    discarding: bool,
}

impl FrameReader {
    /// Create a new frame reader
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Feed a byte to the reader
    /// Returns a frame if one is complete
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match byte {
            TERMINATOR => {
                if self.discarding {
                    self.discarding = false;
                    self.buffer.clear();
                    None
                } else {
                    Some(core::mem::take(&mut self.buffer))
                }
            }
            // Ignore line endings
            b'\r' | b'\n' => None,
            _ => {
                if !self.discarding && self.buffer.push(byte).is_err() {
                    debug!("frame overflow, discarding until next terminator");
                    self.buffer.clear();
                    self.discarding = true;
                }
                None
            }
        }
    }

    /// Number of bytes of the pending partial frame
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial frame
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}

/// CAT event decoded from one inbound frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatEvent {
    /// The radio is switching off (`00`)
    PowerOff,
    /// Transmit VFO selection (`TB`)
    TxVfo(VfoSelect),
    /// VFO frequency report (`FA` / `FB`)
    Frequency(VfoSelect, Frequency),
}

#[cfg(feature = "embedded")]
impl defmt::Format for CatEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::PowerOff => defmt::write!(f, "PowerOff"),
            Self::TxVfo(vfo) => defmt::write!(f, "TxVfo({})", vfo),
            Self::Frequency(vfo, freq) => defmt::write!(f, "Frequency({}, {})", vfo, freq),
        }
    }
}

/// Classify one frame
///
/// Returns `None` for frames shorter than a designator and for
/// designators this bridge does not track. Numeric payloads are parsed
/// leniently: anything that is not a number reads as 0.
#[must_use]
pub fn parse_frame(frame: &[u8]) -> Option<CatEvent> {
    let designator = frame.get(..2)?;
    match designator {
        b"00" => Some(CatEvent::PowerOff),
        b"TB" => Some(CatEvent::TxVfo(parse_vfo(frame))),
        b"FA" => Some(CatEvent::Frequency(VfoSelect::A, parse_frequency(frame))),
        b"FB" => Some(CatEvent::Frequency(VfoSelect::B, parse_frequency(frame))),
        _ => None,
    }
}

/// `TBn`: n == 0 selects VFO A, any other value VFO B
fn parse_vfo(frame: &[u8]) -> VfoSelect {
    let end = frame.len().min(3);
    match parse_number(frame.get(2..end).unwrap_or_default()) {
        0 => VfoSelect::A,
        _ => VfoSelect::B,
    }
}

/// `FAnnnnnnnnnnn` / `FBnnnnnnnnnnn`: up to 11 digits in Hz
fn parse_frequency(frame: &[u8]) -> Frequency {
    let end = frame.len().min(2 + FREQUENCY_DIGITS);
    Frequency::from_hz(parse_number(frame.get(2..end).unwrap_or_default()))
}

/// Decimal digits only; signs, spaces and empty payloads read as 0
fn parse_number(digits: &[u8]) -> u64 {
    if !digits.iter().all(u8::is_ascii_digit) {
        return 0;
    }
    core::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Outbound CAT request sent when (re)establishing the link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatRequest {
    /// `AI2;` enable auto-information
    EnableAutoInfo,
    /// `TB;` read transmit VFO
    ReadTxVfo,
    /// `FA;` read VFO A frequency
    ReadFrequencyA,
    /// `FB;` read VFO B frequency
    ReadFrequencyB,
}

impl CatRequest {
    /// Wire encoding, terminator included
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::EnableAutoInfo => b"AI2;",
            Self::ReadTxVfo => b"TB;",
            Self::ReadFrequencyA => b"FA;",
            Self::ReadFrequencyB => b"FB;",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CatRequest {
    fn format(&self, f: defmt::Formatter) {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(s) => defmt::write!(f, "{=str}", s),
            Err(_) => defmt::write!(f, "?"),
        }
    }
}

/// Requests sent, in order, on every connect and refresh
pub const POLL_SEQUENCE: [CatRequest; 4] = [
    CatRequest::EnableAutoInfo,
    CatRequest::ReadTxVfo,
    CatRequest::ReadFrequencyA,
    CatRequest::ReadFrequencyB,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_is_lenient() {
        assert_eq!(parse_number(b"00014250000"), 14_250_000);
        assert_eq!(parse_number(b""), 0);
        assert_eq!(parse_number(b"12a4"), 0);
        assert_eq!(parse_number(b"+5"), 0);
        assert_eq!(parse_number(b" 5"), 0);
    }

    #[test]
    fn short_frequency_payload_uses_what_is_present() {
        assert_eq!(
            parse_frame(b"FA7100"),
            Some(CatEvent::Frequency(VfoSelect::A, Frequency::from_hz(7_100)))
        );
    }
}
