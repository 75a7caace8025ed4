//! # OMAP Secondary Program Loader
//!
//! The boot ROM copies this binary into on-chip SRAM and jumps to it. It has
//! to bring up just enough of the board to find the full bootloader on the
//! MMC/SD card the ROM booted from, copy it to DRAM and start it.
//!
//! ## Boot Sequence
//!
//! ```text
//! Boot ROM
//!    ↓
//! start-up assembly (lowlevel init, DRAM)
//!    ├─ preloader_console_init   clocks, UART, banner
//!    └─ board_init_f             relocate onto ourselves, clear BSS
//!          ↓
//!       board_init_r             timer, I2C, then the boot pipeline
//!          ↓
//!    U-Boot (or whatever image was found)
//! ```
//!
//! All decisions (which device, which mode, where the image goes, whether
//! it may run) are made by `spl-boot`; this crate only supplies the board
//! drivers behind its traits and the C entry points the start-up code calls.
//!
//! ## Failure
//!
//! There is no recovery. Every error, and every panic, ends in
//! [`halt::hang`] asking for a board reset.

#![no_std]
#![no_main]
#![allow(unsafe_code)]

mod board;
mod logger;
mod tracing;

use crate::board::{OmapBootRom, OmapMmc, REV_STRING_LEN, UBootFat};
use crate::logger::SplLogger;
use crate::tracing::trace_boot_context;
use core::ffi::c_ulong;
use log::{debug, error};
use spl_boot::device::PhysicalMemory;
use spl_boot::dispatch::{self, DirectJump};
use spl_boot::pipeline::{self, Board};
use spl_boot::{BootContext, halt};
use spl_console::console_trace;
use spl_info::SplConfig;
use spl_info::config::{I2C_SLAVE, I2C_SPEED, SPL_STACK, SPL_TEXT_BASE};

const BUILD_PROFILE: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "release"
};

/// First Rust code after the start-up assembly.
#[unsafe(no_mangle)]
pub extern "C" fn board_init_f(_dummy: c_ulong) -> ! {
    SplLogger::install();
    debug!(">>board_init_f()");

    // Relocation target equals our own address: only BSS gets cleared.
    board::relocate(SPL_STACK, SPL_TEXT_BASE)
}

/// Bring up the serial console and print the banner.
#[unsafe(no_mangle)]
pub extern "C" fn preloader_console_init() {
    let logger = SplLogger::install();
    if board::console_init().is_err() {
        // Nowhere to print to; boot on silently.
        return;
    }
    logger.console_ready();

    let mut rev = [0u8; REV_STRING_LEN];
    console_trace!(
        "\nSPL {} ({BUILD_PROFILE})\n",
        env!("CARGO_PKG_VERSION")
    );
    console_trace!("Texas Instruments {}\n", board::soc_revision(&mut rev));
}

/// Load the next stage and jump to it.
#[unsafe(no_mangle)]
pub extern "C" fn board_init_r(_gd: *mut board::GlobalData, _dummy: c_ulong) -> ! {
    debug!(">>spl:board_init_r()");

    board::peripherals_init(I2C_SPEED, I2C_SLAVE);

    let config = SplConfig::DEFAULT;
    let mut board = Board {
        rom: OmapBootRom,
        mmc: OmapMmc::new(),
        fs: UBootFat::new(),
        // SAFETY: the only instance. The SPL runs from SRAM, the images are
        // loaded into DRAM.
        memory: unsafe { PhysicalMemory::new() },
    };

    let mut ctx = BootContext::new();
    let result = pipeline::run(&mut ctx, &mut board, &config);
    trace_boot_context(&ctx);

    match result {
        Ok(entry) => dispatch::jump(&mut ctx, entry, &DirectJump),
        Err(err) => halt::fail(&err),
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    error!("spl: {info}");
    halt::hang()
}
