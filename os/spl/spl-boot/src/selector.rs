//! # Boot Device and Mode Selection

use crate::context::BootContext;
use crate::device::{BlockDevice, BootRom, FileSystem, MmcController, MmcHost, TargetMemory};
use crate::error::BootError;
use crate::loaded::LoadedImage;
use crate::{fat, raw};
use core::fmt;
use log::debug;
use spl_info::SplConfig;
use spl_info::boot::{BOOT_DEVICE_MMC1, BOOT_DEVICE_MMC2, MMCSD_MODE_FAT, MMCSD_MODE_RAW};

/// Device the boot ROM loaded the SPL from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootDevice {
    /// MMC1, the removable SD slot.
    PrimaryMmc,
    /// MMC2, the soldered eMMC.
    SecondaryMmc,
    /// Anything the SPL cannot load from.
    Unsupported(u32),
}

impl BootDevice {
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            BOOT_DEVICE_MMC1 => Self::PrimaryMmc,
            BOOT_DEVICE_MMC2 => Self::SecondaryMmc,
            other => Self::Unsupported(other),
        }
    }
}

impl fmt::Display for BootDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryMmc => f.write_str("MMC1"),
            Self::SecondaryMmc => f.write_str("MMC2"),
            Self::Unsupported(code) => write!(f, "unsupported ({code})"),
        }
    }
}

/// How the image is stored on the boot device.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootMode {
    /// At a fixed sector, no filesystem.
    Raw,
    /// As a file on a FAT partition.
    Filesystem,
    Unsupported(u32),
}

impl BootMode {
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            MMCSD_MODE_RAW => Self::Raw,
            MMCSD_MODE_FAT => Self::Filesystem,
            other => Self::Unsupported(other),
        }
    }
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("RAW"),
            Self::Filesystem => f.write_str("FAT"),
            Self::Unsupported(code) => write!(f, "unsupported ({code})"),
        }
    }
}

#[must_use]
pub fn select<R: BootRom + ?Sized>(rom: &R) -> BootDevice {
    BootDevice::from_code(rom.query_boot_device())
}

#[must_use]
pub fn select_mode<R: BootRom + ?Sized>(rom: &R) -> BootMode {
    BootMode::from_code(rom.query_boot_mode())
}

/// Map a boot device to the host controller it sits behind.
///
/// # Errors
/// [`BootError::UnsupportedBootDevice`] for anything but the two MMC slots.
pub const fn controller_for(device: BootDevice) -> Result<MmcController, BootError> {
    match device {
        BootDevice::PrimaryMmc => Ok(MmcController::MMC1),
        BootDevice::SecondaryMmc => Ok(MmcController::MMC2),
        BootDevice::Unsupported(code) => Err(BootError::UnsupportedBootDevice(code)),
    }
}

/// Accept `mode` if a loader exists for it.
///
/// # Errors
/// [`BootError::UnsupportedBootMode`] otherwise.
pub const fn check_mode(mode: BootMode) -> Result<BootMode, BootError> {
    match mode {
        BootMode::Raw | BootMode::Filesystem => Ok(mode),
        BootMode::Unsupported(code) => Err(BootError::UnsupportedBootMode(code)),
    }
}

/// Bring up the controller for `device` and return its card.
///
/// # Errors
/// [`BootError::UnsupportedBootDevice`] before touching any hardware, or the
/// [`BootError::StorageInit`] reported by the host.
pub fn init_storage<H: MmcHost + ?Sized>(
    mmc: &mut H,
    device: BootDevice,
) -> Result<&mut H::Device, BootError> {
    let controller = controller_for(device)?;

    debug!("initializing {controller} for boot device {device}");
    mmc.init_controller(controller)?;
    Ok(mmc.detect_card()?)
}

/// Run the loader matching `mode`.
///
/// # Errors
/// [`BootError::UnsupportedBootMode`] or whatever the loader reports.
pub fn load_image<D, F, M>(
    ctx: &mut BootContext,
    mode: BootMode,
    card: &mut D,
    fs: &mut F,
    memory: &mut M,
    config: &SplConfig,
) -> Result<LoadedImage, BootError>
where
    D: BlockDevice,
    F: FileSystem + ?Sized,
    M: TargetMemory + ?Sized,
{
    match mode {
        BootMode::Raw => {
            debug!("boot mode - RAW");
            raw::load(ctx, card, memory, config)
        }
        BootMode::Filesystem => {
            debug!("boot mode - FAT");
            fat::load(ctx, card, fs, memory, config)
        }
        BootMode::Unsupported(code) => Err(BootError::UnsupportedBootMode(code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_designated_device_codes_are_supported() {
        for code in 0..=64 {
            let dev = BootDevice::from_code(code);
            match code {
                5 => assert_eq!(dev, BootDevice::PrimaryMmc),
                6 => assert_eq!(dev, BootDevice::SecondaryMmc),
                _ => assert_eq!(dev, BootDevice::Unsupported(code)),
            }
        }
        assert_eq!(
            BootDevice::from_code(u32::MAX),
            BootDevice::Unsupported(u32::MAX)
        );
    }

    #[test]
    fn only_mmc_devices_have_a_controller() {
        assert_eq!(controller_for(BootDevice::PrimaryMmc), Ok(MmcController::MMC1));
        assert_eq!(controller_for(BootDevice::SecondaryMmc), Ok(MmcController::MMC2));
        assert_eq!(
            controller_for(BootDevice::Unsupported(3)),
            Err(BootError::UnsupportedBootDevice(3))
        );
    }

    #[test]
    fn only_raw_and_fat_modes_are_accepted() {
        assert_eq!(check_mode(BootMode::Raw), Ok(BootMode::Raw));
        assert_eq!(check_mode(BootMode::Filesystem), Ok(BootMode::Filesystem));
        assert_eq!(
            check_mode(BootMode::Unsupported(0)),
            Err(BootError::UnsupportedBootMode(0))
        );
    }

    #[test]
    fn mode_codes() {
        assert_eq!(BootMode::from_code(1), BootMode::Raw);
        assert_eq!(BootMode::from_code(2), BootMode::Filesystem);
        assert_eq!(BootMode::from_code(0), BootMode::Unsupported(0));
        assert_eq!(BootMode::from_code(3), BootMode::Unsupported(3));
    }
}
