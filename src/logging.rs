//! Logging macros
//!
//! Forward to `defmt` in firmware builds. On the host there is no global
//! logger to link against, so every macro expands to nothing.

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        defmt::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        defmt::debug!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        defmt::info!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        defmt::warn!($($arg)*);
    }};
}

#[allow(unused_macros)]
macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        defmt::error!($($arg)*);
    }};
}
