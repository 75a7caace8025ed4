//! # Raw Sector Loading
//!
//! The image sits at a fixed sector of the boot device with no filesystem
//! around it. The first sector is read to find the header; then the whole
//! image, header included, is read again straight into its load address.
//! Reading the header twice saves a copy: by construction it occupies the
//! first bytes of the load window.

use crate::context::BootContext;
use crate::device::{BlockDevice, BlockError, MemoryError, TargetMemory};
use crate::error::{BootError, ReadStep};
use crate::loaded::LoadedImage;
use log::{debug, warn};
use spl_image::interpret;
use spl_info::SplConfig;

/// Largest sector size the header scratch buffer can hold.
pub const MAX_SECTOR_SIZE: usize = 4096;

/// Sectors needed to hold `total_size` bytes, rounded up.
///
/// # Panics
/// If `sector_size` is zero. [`load`] rejects such a configuration first.
#[must_use]
pub const fn sectors_for(total_size: u64, sector_size: usize) -> u64 {
    total_size.div_ceil(sector_size as u64)
}

/// Load the image from `config.raw_sector`.
///
/// # Errors
/// [`BootError::StorageRead`] if the configured sector size is zero or not
/// the device's, or if either read fails or transfers nothing;
/// [`BootError::LoadWindow`] if the image does not fit into memory.
pub fn load<D, M>(
    ctx: &mut BootContext,
    device: &mut D,
    memory: &mut M,
    config: &SplConfig,
) -> Result<LoadedImage, BootError>
where
    D: BlockDevice + ?Sized,
    M: TargetMemory + ?Sized,
{
    let block_size = device.block_size();
    let unusable_sector = BootError::StorageRead {
        step: ReadStep::Header,
        source: BlockError::UnalignedBuffer {
            len: config.sector_size,
            block_size,
        },
    };
    if config.sector_size == 0 || config.sector_size != block_size {
        return Err(unusable_sector);
    }

    let mut scratch = [0u8; MAX_SECTOR_SIZE];
    let Some(sector) = scratch.get_mut(..config.sector_size) else {
        return Err(unusable_sector);
    };

    read_sectors(device, config.raw_sector, sector, ReadStep::Header)?;

    let resolution = interpret(sector, config);
    let image = resolution.image().clone();
    ctx.header_resolved(resolution);

    let sector_count = sectors_for(image.total_size, config.sector_size);
    let window_len = usize::try_from(sector_count)
        .ok()
        .and_then(|count| count.checked_mul(config.sector_size));
    let Some(window_len) = window_len else {
        return Err(MemoryError::OutOfRange {
            base: image.load_address,
            len: usize::MAX,
        }
        .into());
    };

    debug!(
        "reading {sector_count} sectors from {:#x} to {}",
        config.raw_sector, image.load_address
    );
    let window = memory.window(image.load_address, window_len)?;
    let read = read_sectors(device, config.raw_sector, window, ReadStep::Payload)?;
    if (read as u64) < sector_count {
        warn!("short read: {read} of {sector_count} sectors");
    }

    ctx.image_materialized();
    Ok(LoadedImage {
        image,
        bytes_loaded: window_len,
    })
}

/// A read that transfers nothing counts as failed.
fn read_sectors<D: BlockDevice + ?Sized>(
    device: &mut D,
    lba: u64,
    dst: &mut [u8],
    step: ReadStep,
) -> Result<usize, BootError> {
    match device.read_blocks(lba, dst) {
        Ok(0) => Err(BootError::StorageRead {
            step,
            source: BlockError::NothingRead,
        }),
        Ok(count) => Ok(count),
        Err(source) => Err(BootError::StorageRead { step, source }),
    }
}
