//! # Control Transfer

use crate::context::BootContext;
use crate::error::BootError;
use core::sync::atomic::{Ordering, compiler_fence};
use log::{debug, info, warn};
use spl_image::{ImageOs, ResolvedImage};
use spl_info::boot::ImageEntryFn;
use spl_info::{OsTagPolicy, PhysicalAddress};

/// Entry address of an image that has been fully loaded.
///
/// Only [`prepare`] creates one, so holding an `EntryPoint` means the image
/// behind it is in memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EntryPoint(PhysicalAddress);

impl EntryPoint {
    #[must_use]
    pub const fn address(self) -> PhysicalAddress {
        self.0
    }
}

/// The one place an address becomes code.
pub trait EntryInvoker {
    /// Transfer control to `entry`. Never returns.
    ///
    /// # Safety
    /// `entry` must be the first instruction of a complete image built for
    /// this CPU. Nothing the caller owns is valid after the call.
    unsafe fn invoke(&self, entry: EntryPoint) -> !;
}

/// Jump through a no-argument function pointer.
pub struct DirectJump;

impl EntryInvoker for DirectJump {
    unsafe fn invoke(&self, entry: EntryPoint) -> ! {
        // Image writes must be done before the first fetch from it.
        compiler_fence(Ordering::SeqCst);

        let ptr = entry.address().as_mut_ptr::<()>();
        // SAFETY: the caller guarantees `entry` is the start of a loaded image,
        // which matches the `ImageEntryFn` ABI.
        let image_entry = unsafe { core::mem::transmute::<*mut (), ImageEntryFn>(ptr) };
        unsafe { image_entry() }
    }
}

/// Apply the OS-tag policy and produce the entry point.
///
/// # Errors
/// [`BootError::UnsupportedImageOs`] for a non-U-Boot image under
/// [`OsTagPolicy::HaltOnMismatch`].
pub fn prepare(image: &ResolvedImage, policy: OsTagPolicy) -> Result<EntryPoint, BootError> {
    match (image.os, policy) {
        (ImageOs::UBoot, _) => debug!("Jumping to U-Boot"),
        (os, OsTagPolicy::JumpAnyway) => {
            warn!("Unsupported OS image ({os}), jumping nevertheless ...");
        }
        (os, OsTagPolicy::HaltOnMismatch) => {
            warn!("Unsupported OS image ({os})");
            return Err(BootError::UnsupportedImageOs(os));
        }
    }

    Ok(EntryPoint(image.entry_address))
}

/// Hand the CPU to the loaded image.
pub fn jump<I: EntryInvoker + ?Sized>(ctx: &mut BootContext, entry: EntryPoint, invoker: &I) -> ! {
    ctx.dispatched();
    info!("Starting image at {} ...", entry.address());

    // SAFETY: an `EntryPoint` only comes out of `prepare`, after the loader
    // has materialized the whole image at its load address.
    unsafe { invoker.invoke(entry) }
}
