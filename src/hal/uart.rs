//! CAT UART
//!
//! Wraps the interrupt-driven buffered USART so the session can open and
//! close the link. The peripheral itself stays configured; a closed port
//! just discards what arrives and drops what is written.

use embassy_stm32::usart::{self, BufferedUart};
use embedded_io::{ErrorType, Read, ReadReady, Write};

use crate::radio::session::SerialPort;

/// CAT port to the radio
pub struct RadioUart<'d> {
    uart: BufferedUart<'d>,
    open: bool,
}

impl<'d> RadioUart<'d> {
    /// Wrap a configured buffered UART (initially closed)
    #[must_use]
    pub fn new(uart: BufferedUart<'d>) -> Self {
        Self { uart, open: false }
    }

    /// Throw away everything currently in the receive buffer
    fn discard_input(&mut self) -> Result<(), usart::Error> {
        let mut scratch = [0u8; 16];
        while self.uart.read_ready()? {
            if self.uart.read(&mut scratch)? == 0 {
                break;
            }
        }
        Ok(())
    }
}

impl ErrorType for RadioUart<'_> {
    type Error = usart::Error;
}

impl Read for RadioUart<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.open {
            self.discard_input()?;
            return Ok(0);
        }
        self.uart.read(buf)
    }
}

impl ReadReady for RadioUart<'_> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if !self.open {
            self.discard_input()?;
            return Ok(false);
        }
        self.uart.read_ready()
    }
}

impl Write for RadioUart<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if !self.open {
            return Ok(buf.len());
        }
        self.uart.write(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if !self.open {
            return Ok(());
        }
        self.uart.flush()
    }
}

impl SerialPort for RadioUart<'_> {
    fn open(&mut self) -> Result<(), Self::Error> {
        self.discard_input()?;
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }
}
