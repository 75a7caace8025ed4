//! # SPL Serial Console
//!
//! Early diagnostic output for the secondary program loader. Everything the
//! SPL prints goes to the board's debug UART: there is no framebuffer and no
//! other channel, and the console has to work before anything else does.
//!
//! ## Components
//!
//! ### Console Logger ([`ConsoleLogger`])
//! A `log::Log` implementation that routes records to the UART:
//! * **Level Filtering**: configurable [`LevelFilter`](log::LevelFilter) threshold
//! * **Static Installation**: lives in a `static`, no allocation needed
//! * **Format**: `[LEVEL] target: message`
//!
//! ### Trace Macro ([`console_trace!`])
//! Direct formatted output that bypasses the log framework, used for the
//! banner and for fatal diagnostics.
//!
//! ### UART Driver ([`uart::Ns16550`])
//! Transmit-only NS16550 access with a typed Line Status Register.
//!
//! ## Feature System
//!
//! With the `enabled` feature (default) the trace macro writes to the UART at
//! [`UART_BASE`](spl_info::config::UART_BASE) when built for the bare-metal
//! target. Without the feature, or on a hosted target (unit tests), every
//! write is a no-op and no MMIO is ever touched.
//!
//! ## Usage
//! ```rust
//! use log::{LevelFilter, info};
//! use spl_console::ConsoleLogger;
//!
//! static LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Debug);
//!
//! LOGGER.init().expect("logger initialization");
//! info!("console up");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;
pub mod uart;

pub use logger::ConsoleLogger;

#[cfg(all(feature = "enabled", target_os = "none"))]
#[doc(hidden)]
pub mod console_fmt {
    use crate::uart::Ns16550;
    use core::fmt::{self, Write};
    use spl_info::config::UART_BASE;

    pub struct ConsoleSink(Ns16550);

    impl ConsoleSink {
        #[inline]
        #[must_use]
        pub const fn new() -> Self {
            // SAFETY: UART_BASE is the board's console UART.
            Self(unsafe { Ns16550::new(UART_BASE as usize) })
        }
    }

    impl Write for ConsoleSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0.puts(s);
            Ok(())
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn console_write(args: fmt::Arguments) {
        // Best effort; there is nowhere to report a console failure to.
        let _ = fmt::write(&mut ConsoleSink::new(), args);
    }
}

#[cfg(not(all(feature = "enabled", target_os = "none")))]
#[doc(hidden)]
pub mod console_fmt {
    use core::fmt;

    #[doc(hidden)]
    #[inline(always)]
    #[allow(clippy::inline_always, clippy::needless_pass_by_value)]
    pub fn console_write(_: fmt::Arguments) {}
}

/// Formatted write to the serial console, bypassing `log`.
#[macro_export]
macro_rules! console_trace {
    ($($arg:tt)*) => {{
        $crate::console_fmt::console_write(core::format_args!($($arg)*));
    }};
}
