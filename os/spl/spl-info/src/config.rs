//! # Board Configuration

use crate::PhysicalAddress;
use core::ffi::CStr;

/// Where the next boot stage is linked to run.
///
/// A header-less image is loaded and entered here; a legacy image header,
/// when present, names its own address instead.
pub const SYS_TEXT_BASE: u32 = 0x80E8_0000;

/// Where the SPL itself is linked (on-chip SRAM).
pub const SPL_TEXT_BASE: u32 = 0x4030_4350;

/// Initial stack pointer of the SPL.
pub const SPL_STACK: u32 = 0x4030_D800;

/// Sector holding the next-stage image in raw mode.
pub const RAW_MODE_U_BOOT_SECTOR: u64 = 0x300;

/// Partition index searched for the payload in filesystem mode.
pub const FAT_BOOT_PARTITION: u8 = 1;

/// Payload file name in filesystem mode.
pub const FAT_LOAD_PAYLOAD_NAME: &CStr = c"u-boot.bin";

/// MMC/SD sector size in bytes.
pub const MMCSD_SECTOR_SIZE: usize = 512;

/// Largest file accepted in filesystem mode, measured from the load address.
pub const FAT_LOAD_WINDOW: usize = 1024 * 1024;

/// Size assumed for a header-less image. An upper bound, not a measurement.
pub const DEFAULT_IMAGE_SIZE: u32 = 200 * 1024;

/// Console baud rate.
pub const CONSOLE_BAUDRATE: u32 = 115_200;

/// Base address of the console UART (NS16550 compatible).
pub const UART_BASE: u32 = 0x4802_0000;

/// I2C bus speed for early PMIC access.
pub const I2C_SPEED: u32 = 100_000;

/// Own I2C slave address.
pub const I2C_SLAVE: u32 = 1;

const _: () = {
    assert!(MMCSD_SECTOR_SIZE.is_power_of_two());
    assert!(FAT_LOAD_WINDOW.is_multiple_of(MMCSD_SECTOR_SIZE));
    assert!(DEFAULT_IMAGE_SIZE as usize <= FAT_LOAD_WINDOW);
    assert!(SYS_TEXT_BASE.is_multiple_of(4096));
    assert!(SPL_STACK > SPL_TEXT_BASE);
    assert!(SPL_STACK.is_multiple_of(8));
};

/// What to do when the image names an OS other than U-Boot.
///
/// Images tagged for another OS have historically been entered anyway, on the
/// assumption that anything placed on the boot medium knows how to start
/// from a bare jump. Boards that want to refuse them select
/// [`HaltOnMismatch`](Self::HaltOnMismatch).
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum OsTagPolicy {
    /// Warn and jump.
    #[default]
    JumpAnyway,
    /// Refuse to jump and halt.
    HaltOnMismatch,
}

/// Resolved board configuration for one boot attempt.
///
/// Built once from the constants in this module (see [`SplConfig::DEFAULT`])
/// and passed by reference through the pipeline.
#[derive(Debug, Clone)]
pub struct SplConfig {
    /// Text base of the next stage; load and entry address of header-less images.
    pub text_base: PhysicalAddress,
    /// First sector of the image in raw mode.
    pub raw_sector: u64,
    /// Sector size of the boot medium.
    pub sector_size: usize,
    /// Partition index in filesystem mode.
    pub fat_partition: u8,
    /// Payload file name in filesystem mode.
    pub payload_name: &'static CStr,
    /// Largest file accepted in filesystem mode.
    pub fat_load_window: usize,
    /// Size assumed for header-less images.
    pub default_image_size: u32,
    /// Reaction to images not tagged as U-Boot.
    pub os_policy: OsTagPolicy,
}

impl SplConfig {
    /// The configuration the board is built with.
    pub const DEFAULT: Self = Self {
        text_base: PhysicalAddress::new(SYS_TEXT_BASE),
        raw_sector: RAW_MODE_U_BOOT_SECTOR,
        sector_size: MMCSD_SECTOR_SIZE,
        fat_partition: FAT_BOOT_PARTITION,
        payload_name: FAT_LOAD_PAYLOAD_NAME,
        fat_load_window: FAT_LOAD_WINDOW,
        default_image_size: DEFAULT_IMAGE_SIZE,
        os_policy: OsTagPolicy::JumpAnyway,
    };

    #[must_use]
    pub const fn with_os_policy(mut self, policy: OsTagPolicy) -> Self {
        self.os_policy = policy;
        self
    }
}

impl Default for SplConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
