use core::sync::atomic::{AtomicBool, Ordering};
use log::{LevelFilter, Log, Metadata, Record};
use spl_console::ConsoleLogger;

/// Console logger that stays silent until the UART is programmed.
///
/// Writing to an unclocked UART would spin forever on the transmit-empty bit,
/// so records logged before [`SplLogger::console_ready`] are dropped.
pub struct SplLogger {
    console: ConsoleLogger,
    ready: AtomicBool,
}

static LOGGER: SplLogger = SplLogger::new(if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
});

impl SplLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self {
            console: ConsoleLogger::new(max_level),
            ready: AtomicBool::new(false),
        }
    }

    /// Install the global logger. Later calls are no-ops.
    pub fn install() -> &'static Self {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LOGGER.console.max_level());
        }
        &LOGGER
    }

    /// Start forwarding records to the UART.
    pub fn console_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }
}

impl Log for SplLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.ready.load(Ordering::Acquire) && self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.console.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
    }
}
