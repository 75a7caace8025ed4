//! # Boot ROM Interface

/// Entry point of the next boot stage.
///
/// # ABI
/// The image is entered with no arguments and never returns. There is no
/// saved return context; whatever the SPL kept in memory is meaningless to
/// the code that runs afterwards.
pub type ImageEntryFn = unsafe extern "C" fn() -> !;

/// No boot device recorded by the ROM.
pub const BOOT_DEVICE_NONE: u32 = 0;
/// Execute-in-place NOR flash.
pub const BOOT_DEVICE_XIP: u32 = 1;
/// Execute-in-place NOR flash with wait monitoring.
pub const BOOT_DEVICE_XIPWAIT: u32 = 2;
/// NAND flash.
pub const BOOT_DEVICE_NAND: u32 = 3;
/// OneNAND flash.
pub const BOOT_DEVICE_ONENAND: u32 = 4;
/// First MMC/SD controller (removable SD slot).
pub const BOOT_DEVICE_MMC1: u32 = 5;
/// Second MMC/SD controller (soldered eMMC).
pub const BOOT_DEVICE_MMC2: u32 = 6;

/// The ROM did not record an MMC boot mode.
pub const MMCSD_MODE_UNDEFINED: u32 = 0;
/// Image stored at a fixed sector offset, no filesystem.
pub const MMCSD_MODE_RAW: u32 = 1;
/// Image stored as a file on a FAT partition.
pub const MMCSD_MODE_FAT: u32 = 2;
