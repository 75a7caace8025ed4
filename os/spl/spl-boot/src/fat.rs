//! # Filesystem Loading

use crate::context::BootContext;
use crate::device::{BlockDevice, FileSystem, FsError, ReadExtent, TargetMemory};
use crate::error::BootError;
use crate::loaded::LoadedImage;
use log::{debug, warn};
use spl_image::{IMAGE_HEADER_SIZE, interpret};
use spl_info::SplConfig;

/// Load `config.payload_name` from the FAT partition `config.fat_partition`.
///
/// A missing or unreadable header is not fatal here: whatever prefix could
/// be read is handed to the header interpreter, which falls back to the
/// header-less defaults. Only the full read decides whether the image exists.
///
/// # Errors
/// [`BootError::FilesystemMount`] if the partition cannot be mounted,
/// [`BootError::FilesystemRead`] if the full read fails or yields nothing,
/// [`BootError::LoadWindow`] if the load window is not addressable.
pub fn load<D, F, M>(
    ctx: &mut BootContext,
    device: &mut D,
    fs: &mut F,
    memory: &mut M,
    config: &SplConfig,
) -> Result<LoadedImage, BootError>
where
    D: BlockDevice,
    F: FileSystem + ?Sized,
    M: TargetMemory + ?Sized,
{
    let name = config.payload_name;
    let partition = config.fat_partition;

    fs.mount(device, partition)
        .map_err(|source| BootError::FilesystemMount { partition, source })?;

    let mut header = [0u8; IMAGE_HEADER_SIZE];
    let got = match fs.read_file(name, &mut header, ReadExtent::Prefix) {
        Ok(0) => {
            warn!("{name:?} is empty, no image header");
            0
        }
        Ok(got) => got.min(IMAGE_HEADER_SIZE),
        Err(e) => {
            warn!("cannot read image header from {name:?}: {e}");
            0
        }
    };

    let resolution = interpret(&header[..got], config);
    let image = resolution.image().clone();
    ctx.header_resolved(resolution);

    debug!("reading {name:?} to {}", image.load_address);
    let window = memory.window(image.load_address, config.fat_load_window)?;
    let bytes_loaded = match fs.read_file(name, window, ReadExtent::Whole) {
        Ok(0) => Err(FsError::Empty),
        Ok(len) => Ok(len),
        Err(e) => Err(e),
    }
    .map_err(|source| BootError::FilesystemRead { name, source })?;

    ctx.image_materialized();
    Ok(LoadedImage {
        image,
        bytes_loaded,
    })
}
