//! Host-side doubles for the pins, serial port and delay used by the session.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType as PinErrorType, OutputPin};
use embedded_io::{ErrorType as IoErrorType, Read, ReadReady, Write};

use kenwood_bcd_bridge::drivers::bcd::{BandIndicator, BcdOutput};
use kenwood_bcd_bridge::radio::session::{SerialPort, Session};
use kenwood_bcd_bridge::types::Band;

// ============================================================================
// Faults
// ============================================================================

/// Error returned by a mock pin or indicator told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Error returned by the mock serial port when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFault;

impl embedded_io::Error for SerialFault {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

// ============================================================================
// Output pins
// ============================================================================

/// Line levels shared by the four mock pins, plus a write counter
#[derive(Debug, Default)]
pub struct PinBank {
    /// A, B, C, D
    pub levels: [bool; 4],
    pub writes: usize,
    /// Every pin write fails (levels untouched) while set
    pub fail: bool,
}

impl PinBank {
    /// Lines as a "DCBA" string
    pub fn pattern(&self) -> String {
        self.levels
            .iter()
            .rev()
            .map(|&high| if high { '1' } else { '0' })
            .collect()
    }
}

pub struct MockPin {
    line: usize,
    bank: Rc<RefCell<PinBank>>,
}

impl MockPin {
    fn drive(&mut self, high: bool) -> Result<(), PinFault> {
        let mut bank = self.bank.borrow_mut();
        if bank.fail {
            return Err(PinFault);
        }
        bank.levels[self.line] = high;
        bank.writes += 1;
        Ok(())
    }
}

impl PinErrorType for MockPin {
    type Error = PinFault;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

/// BCD output on mock pins; the bank's write counter starts at zero
pub fn bcd_output() -> (BcdOutput<MockPin>, Rc<RefCell<PinBank>>) {
    let bank = Rc::new(RefCell::new(PinBank::default()));
    let pin = |line| MockPin {
        line,
        bank: Rc::clone(&bank),
    };
    let output = BcdOutput::new(pin(0), pin(1), pin(2), pin(3)).unwrap();
    bank.borrow_mut().writes = 0;
    (output, bank)
}

// ============================================================================
// Recording indicator
// ============================================================================

/// Records every band successfully shown
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub shown: Vec<Option<Band>>,
    /// Failed show attempts
    pub failures: usize,
    /// Every show fails while set
    pub fail: bool,
}

impl BandIndicator for RecordingIndicator {
    type Error = PinFault;

    fn show(&mut self, band: Option<Band>) -> Result<(), Self::Error> {
        if self.fail {
            self.failures += 1;
            return Err(PinFault);
        }
        self.shown.push(band);
        Ok(())
    }
}

// ============================================================================
// Serial port
// ============================================================================

#[derive(Debug, Default)]
pub struct MockSerial {
    pub open: bool,
    /// Successful opens
    pub opens: usize,
    pub closes: usize,
    rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    /// `open` fails while set
    pub fail_open: bool,
    /// `write` fails while set
    pub fail_write: bool,
    /// `read` fails while set
    pub fail_read: bool,
}

impl MockSerial {
    /// Radio sends bytes; lost if the port is closed
    pub fn receive(&mut self, bytes: &[u8]) {
        if self.open {
            self.rx.extend(bytes.iter().copied());
        }
    }

    /// Take everything written so far as text
    pub fn take_tx(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.tx)).unwrap()
    }
}

impl IoErrorType for MockSerial {
    type Error = SerialFault;
}

impl Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_read {
            return Err(SerialFault);
        }
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

impl Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_write {
            return Err(SerialFault);
        }
        if self.open {
            self.tx.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerialPort for MockSerial {
    fn open(&mut self) -> Result<(), Self::Error> {
        if self.fail_open {
            return Err(SerialFault);
        }
        self.rx.clear();
        self.open = true;
        self.opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.closes += 1;
    }
}

// ============================================================================
// Delay
// ============================================================================

/// Counts requested delay without sleeping
///
/// Clones share their counters, so a test can keep one handle while the
/// session owns another.
#[derive(Debug, Default, Clone)]
pub struct CountingDelay {
    total_ns: Rc<Cell<u64>>,
    calls: Rc<Cell<usize>>,
}

impl CountingDelay {
    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record(&mut self, ns: u64) {
        self.total_ns.set(self.total_ns.get() + ns);
        self.calls.set(self.calls.get() + 1);
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms) * 1_000_000);
    }
}

// ============================================================================
// Session
// ============================================================================

pub type TestSession = Session<MockSerial, BcdOutput<MockPin>, CountingDelay>;

pub fn session() -> (TestSession, Rc<RefCell<PinBank>>) {
    let (session, bank, _delay) = session_with_delay();
    (session, bank)
}

/// Session plus a handle on its delay counters
pub fn session_with_delay() -> (TestSession, Rc<RefCell<PinBank>>, CountingDelay) {
    let (output, bank) = bcd_output();
    let delay = CountingDelay::default();
    let session = Session::new(MockSerial::default(), output, delay.clone());
    (session, bank, delay)
}

/// Poll sequence as sent on the wire
pub const POLL: &str = "AI2;TB;FA;FB;";
