//! # Board Glue
//!
//! The SoC drivers (clocks, UART, timer, I2C, MMC host, FAT) are linked in
//! from the board's C support library. This module declares what the SPL calls
//! and wraps the storage side into the `spl-boot` traits.

mod block;
mod fat;
mod mmc;
mod rom;

pub use fat::UBootFat;
pub use mmc::{MmcCard, OmapMmc};
pub use rom::OmapBootRom;

use core::ffi::{CStr, c_char, c_int, c_uint};

/// The C side's global data block. Only ever handled by pointer.
#[repr(C)]
pub struct GlobalData {
    _opaque: [u8; 0],
}

/// Size of the buffer `omap_rev_string` fills, terminator included.
pub const REV_STRING_LEN: usize = 50;

unsafe extern "C" {
    /// Global data placed in `.data` by the start-up code; BSS is not yet
    /// cleared when it is first used.
    static mut gdata: GlobalData;

    fn relocate_code(addr_sp: c_uint, new_gd: *mut GlobalData, addr_moni: c_uint) -> !;
    fn setup_clocks_for_console();
    fn serial_init() -> c_int;
    fn timer_init() -> c_int;
    fn i2c_init(speed: c_int, slaveaddr: c_int);
    fn omap_rev_string(buf: *mut c_char);
}

/// Relocate onto ourselves: stack and text stay where they are, only BSS is
/// cleared. Continues in `board_init_r`.
pub fn relocate(stack: u32, text_base: u32) -> ! {
    // SAFETY: runs once from `board_init_f`, before anything else touches
    // `gdata`.
    unsafe { relocate_code(stack, &raw mut gdata, text_base) }
}

/// Clock the console UART and program its divisor.
///
/// # Errors
/// The driver's status if the UART cannot be set up.
pub fn console_init() -> Result<(), c_int> {
    // SAFETY: plain driver calls without arguments.
    let status = unsafe {
        setup_clocks_for_console();
        serial_init()
    };
    if status == 0 { Ok(()) } else { Err(status) }
}

/// Bring up the general purpose timer and the PMIC bus.
pub fn peripherals_init(i2c_speed: u32, i2c_slave: u32) {
    let speed = c_int::try_from(i2c_speed).unwrap_or(c_int::MAX);
    let slave = c_int::try_from(i2c_slave).unwrap_or_default();

    // SAFETY: plain driver calls; the timer has no preconditions and the I2C
    // controller only needs its clocks, which the ROM left running.
    unsafe {
        timer_init();
        i2c_init(speed, slave);
    }
}

/// Write the SoC revision into `buf` and return it as text.
pub fn soc_revision(buf: &mut [u8; REV_STRING_LEN]) -> &str {
    buf.fill(0);
    // SAFETY: the driver writes a NUL-terminated string shorter than
    // `REV_STRING_LEN`.
    unsafe { omap_rev_string(buf.as_mut_ptr().cast()) };

    CStr::from_bytes_until_nul(&buf[..])
        .ok()
        .and_then(|rev| rev.to_str().ok())
        .unwrap_or("unknown")
}
