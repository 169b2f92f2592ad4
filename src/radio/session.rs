//! CAT Link Session
//!
//! Owns the serial link to the radio and decides when to (re)poll it.
//!
//! Kenwood CAT has no handshake and no disconnect notification, so the
//! link is judged purely by time since the last decoded frame:
//!
//! ```text
//!            start()
//! Disconnected ──────► AwaitingData ──first frame──► Connected
//!                        ▲    │                          │
//!             every 1 s  │    │ 2 s without a frame      │ 10 s without a frame
//!                        │    ▼                          │ (re-poll, no reset)
//!                  ReconnectPolling ◄──── PowerOff ──────┤
//!                                                        ▼
//!                                                   AwaitingData
//! ```
//!
//! Dropping the link (2 s timeout or `00;`) closes the port and resets
//! the tracker, which clears the band outputs.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::config::{
    AWAITING_DATA_TIMEOUT_MS, COMMAND_TIMEOUT_MS, INTER_COMMAND_DELAY_MS, READ_CHUNK_SIZE,
    RECONNECT_POLL_INTERVAL_MS,
};
use crate::drivers::bcd::BandIndicator;
use crate::protocol::{parse_frame, CatEvent, FrameReader, POLL_SEQUENCE};
use crate::radio::tracker::BandTracker;
use crate::timer::{Millis, Stopwatch};

/// Byte channel to the radio that can be opened and closed
pub trait SerialPort: Read + Write + ReadReady {
    /// Open the channel, discarding anything received while closed
    ///
    /// # Errors
    ///
    /// Returns the port error if the channel cannot be opened.
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Close the channel
    fn close(&mut self);
}

/// Link state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LinkState {
    /// Never connected
    #[default]
    Disconnected,
    /// Polled, waiting for the first frame
    AwaitingData,
    /// Frames are arriving
    Connected,
    /// Port closed, retrying periodically
    ReconnectPolling,
}

impl LinkState {
    /// Check if the serial port is open in this state
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::AwaitingData | Self::Connected)
    }

    /// Status LED pattern as (on, off) milliseconds
    #[must_use]
    pub const fn blink_pattern(self) -> (u64, u64) {
        match self {
            Self::Disconnected => (0, 1000),
            Self::AwaitingData => (500, 500),
            Self::Connected => (1000, 0),
            Self::ReconnectPolling => (100, 100),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Disconnected => defmt::write!(f, "Disconnected"),
            Self::AwaitingData => defmt::write!(f, "AwaitingData"),
            Self::Connected => defmt::write!(f, "Connected"),
            Self::ReconnectPolling => defmt::write!(f, "ReconnectPolling"),
        }
    }
}

/// Session errors
///
/// None of these are fatal. The session has already moved to its next
/// state when one is returned, and the timers take care of recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// Serial port read, write or open failed
    Serial(embedded_io::ErrorKind),
    /// A band output pin could not be written
    Output(embedded_hal::digital::ErrorKind),
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Serial(kind) => defmt::write!(f, "Serial({})", kind),
            Self::Output(kind) => defmt::write!(f, "Output({})", kind),
        }
    }
}

fn serial_error<E: embedded_io::Error>(err: E) -> LinkError {
    LinkError::Serial(err.kind())
}

fn output_error<E: embedded_hal::digital::Error>(err: E) -> LinkError {
    LinkError::Output(err.kind())
}

/// CAT link session
///
/// Single owner of the port, the band indicator and all tracking state.
/// Call [`start`](Self::start) once, then [`poll`](Self::poll) from the main
/// loop as often as convenient; `poll` never waits for input.
pub struct Session<S, I, D> {
    port: S,
    indicator: I,
    delay: D,
    reader: FrameReader,
    tracker: BandTracker,
    state: LinkState,
    /// Time since last decoded frame
    last_frame: Stopwatch,
    /// Time since last poll sequence
    last_poll: Stopwatch,
    /// Time since entering reconnect polling or the last attempt
    last_reconnect: Stopwatch,
}

impl<S, I, D> Session<S, I, D>
where
    S: SerialPort,
    I: BandIndicator,
    D: DelayNs,
{
    /// Create a session (port untouched until [`start`](Self::start))
    pub fn new(port: S, indicator: I, delay: D) -> Self {
        Self {
            port,
            indicator,
            delay,
            reader: FrameReader::new(),
            tracker: BandTracker::new(),
            state: LinkState::Disconnected,
            last_frame: Stopwatch::new(),
            last_poll: Stopwatch::new(),
            last_reconnect: Stopwatch::new(),
        }
    }

    /// Open the port and poll the radio, whether or not one is present
    ///
    /// # Errors
    ///
    /// Returns a [`LinkError`]; the session is left awaiting data and will
    /// fall back to reconnect polling on its own.
    pub fn start(&mut self, now: Millis) -> Result<(), LinkError> {
        info!("session start");
        self.connect(now)
    }

    /// Run one main-loop iteration: timers first, then buffered input
    ///
    /// # Errors
    ///
    /// Returns the first [`LinkError`] hit during this iteration.
    pub fn poll(&mut self, now: Millis) -> Result<(), LinkError> {
        self.check_timers(now)?;
        self.drain(now)
    }

    /// Get the link state
    #[must_use]
    pub const fn state(&self) -> LinkState {
        self.state
    }

    /// Get the tracking state
    #[must_use]
    pub const fn tracker(&self) -> &BandTracker {
        &self.tracker
    }

    /// Get the serial port
    #[must_use]
    pub const fn port(&self) -> &S {
        &self.port
    }

    /// Get the serial port mutably
    pub fn port_mut(&mut self) -> &mut S {
        &mut self.port
    }

    fn check_timers(&mut self, now: Millis) -> Result<(), LinkError> {
        match self.state {
            LinkState::ReconnectPolling => {
                if self.last_reconnect.has_elapsed(now, RECONNECT_POLL_INTERVAL_MS) {
                    self.last_reconnect.restart(now);
                    debug!("reconnect attempt");
                    return self.connect(now);
                }
            }
            LinkState::AwaitingData => {
                if self.last_poll.has_elapsed(now, AWAITING_DATA_TIMEOUT_MS) {
                    warn!("no answer from radio, dropping link");
                    return self.drop_link(now);
                }
            }
            LinkState::Connected | LinkState::Disconnected => {}
        }

        if self.last_frame.has_elapsed(now, COMMAND_TIMEOUT_MS)
            && self.last_poll.has_elapsed(now, COMMAND_TIMEOUT_MS)
        {
            warn!("radio silent, refreshing");
            return self.refresh(now);
        }
        Ok(())
    }

    /// Read everything buffered and dispatch complete frames
    fn drain(&mut self, now: Millis) -> Result<(), LinkError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        while self.state.is_open() && self.port.read_ready().map_err(serial_error)? {
            let n = self.port.read(&mut chunk).map_err(serial_error)?;
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                let Some(frame) = self.reader.feed(byte) else {
                    continue;
                };
                match parse_frame(&frame) {
                    Some(event) => self.dispatch(event, now)?,
                    None => trace!("ignored frame ({} bytes)", frame.len()),
                }
                // PowerOff closes the port; the rest of the chunk is stale
                if !self.state.is_open() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, event: CatEvent, now: Millis) -> Result<(), LinkError> {
        self.frame_received(now);
        if event == CatEvent::PowerOff {
            info!("radio powered off");
            self.enter_reconnect_polling(now);
        }
        self.tracker
            .apply(event, &mut self.indicator)
            .map_err(output_error)?;
        Ok(())
    }

    /// Any decoded frame proves the link is alive
    fn frame_received(&mut self, now: Millis) {
        self.last_frame.restart(now);
        self.set_state(LinkState::Connected);
    }

    /// Open the port and send the poll sequence
    fn connect(&mut self, now: Millis) -> Result<(), LinkError> {
        self.reader.clear();
        self.set_state(LinkState::AwaitingData);
        self.last_poll.restart(now);
        self.port.open().map_err(serial_error)?;
        self.send_poll_sequence()
    }

    /// Re-poll a silent radio without resetting tracking state
    fn refresh(&mut self, now: Millis) -> Result<(), LinkError> {
        if !self.state.is_open() {
            return self.connect(now);
        }
        self.set_state(LinkState::AwaitingData);
        self.last_poll.restart(now);
        self.send_poll_sequence()
    }

    /// Close the port, reset tracking and outputs, start reconnect polling
    fn drop_link(&mut self, now: Millis) -> Result<(), LinkError> {
        self.enter_reconnect_polling(now);
        self.tracker
            .reset(&mut self.indicator)
            .map_err(output_error)
    }

    fn enter_reconnect_polling(&mut self, now: Millis) {
        self.port.close();
        self.reader.clear();
        self.last_reconnect.restart(now);
        self.set_state(LinkState::ReconnectPolling);
    }

    fn send_poll_sequence(&mut self) -> Result<(), LinkError> {
        for (i, request) in POLL_SEQUENCE.iter().enumerate() {
            if i > 0 {
                self.delay.delay_ms(INTER_COMMAND_DELAY_MS);
            }
            self.port
                .write_all(request.as_bytes())
                .map_err(serial_error)?;
        }
        self.port.flush().map_err(serial_error)?;
        debug!("poll sequence sent");
        Ok(())
    }

    fn set_state(&mut self, state: LinkState) {
        if state != self.state {
            info!("link {} -> {}", self.state, state);
            self.state = state;
        }
    }
}
