//! Kenwood CAT to BCD Bridge Main Application
//!
//! Entry point for the STM32G474-based band-data bridge firmware.
//! Initializes hardware, then runs the CAT session loop.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kenwood_bcd_bridge::hal::gpio::StatusLed;
use kenwood_bcd_bridge::hal::uart::RadioUart;
use kenwood_bcd_bridge::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
});

static UART_TX_BUF: StaticCell<[u8; UART_TX_BUFFER_SIZE]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; UART_RX_BUFFER_SIZE]> = StaticCell::new();

/// Latest link state, consumed by the status LED task
static LINK_STATE: Signal<CriticalSectionRawMutex, LinkState> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kenwood BCD bridge v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    let led = StatusLed::new(Output::new(p.PA5, Level::Low, Speed::Low));

    // BCD band data on PC0..PC3, all low until a band is known
    let bcd = unwrap!(BcdOutput::new(
        Output::new(p.PC0, Level::Low, Speed::Low),
        Output::new(p.PC1, Level::Low, Speed::Low),
        Output::new(p.PC2, Level::Low, Speed::Low),
        Output::new(p.PC3, Level::Low, Speed::Low),
    ));

    // USART1 to the radio: PA9 = TX, PA10 = RX
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = RADIO_BAUD_RATE;
    let uart = unwrap!(BufferedUart::new(
        p.USART1,
        Irqs,
        p.PA10, // RX
        p.PA9,  // TX
        UART_TX_BUF.init([0; UART_TX_BUFFER_SIZE]),
        UART_RX_BUF.init([0; UART_RX_BUFFER_SIZE]),
        uart_config,
    ));

    info!("CAT UART initialized at {} baud", RADIO_BAUD_RATE);

    unwrap!(spawner.spawn(status_led_task(led)));

    let mut session = Session::new(RadioUart::new(uart), bcd, Delay);
    if let Err(err) = session.start(now_ms()) {
        warn!("start: {}", err);
    }

    info!("Entering session loop");

    let mut published = LinkState::Disconnected;
    loop {
        if let Err(err) = session.poll(now_ms()) {
            warn!("link error: {}", err);
        }
        if session.state() != published {
            published = session.state();
            LINK_STATE.signal(published);
        }
        Timer::after_millis(MAIN_LOOP_PERIOD_MS).await;
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Status LED task - blink pattern follows the link state
#[embassy_executor::task]
async fn status_led_task(mut led: StatusLed<'static>) {
    let mut state = LinkState::Disconnected;
    loop {
        if let Some(next) = LINK_STATE.try_take() {
            state = next;
        }
        let (on_ms, off_ms) = state.blink_pattern();
        if on_ms > 0 {
            led.on();
            Timer::after_millis(on_ms).await;
        }
        if off_ms > 0 {
            led.off();
            Timer::after_millis(off_ms).await;
        }
    }
}
