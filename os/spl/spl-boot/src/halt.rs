//! # Terminal Failure

use crate::error::BootError;
use log::error;

/// Report `err` and stop.
pub fn fail(err: &BootError) -> ! {
    error!("spl: {err}");
    hang()
}

/// Ask for a reset and idle forever.
pub fn hang() -> ! {
    error!("### ERROR ### Please RESET the board ###");
    loop {
        idle();
    }
}

#[inline(always)]
#[allow(clippy::inline_always)]
fn idle() {
    #[cfg(target_arch = "arm")]
    // SAFETY: `wfi` only suspends the core until the next event.
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack, preserves_flags));
    }

    #[cfg(not(target_arch = "arm"))]
    core::hint::spin_loop();
}
