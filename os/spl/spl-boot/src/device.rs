//! # Board Collaborators
//!
//! The SPL does not drive hardware itself. Storage, filesystem, boot ROM and
//! target memory are reached through the narrow traits in this module; the
//! board binary binds them to its drivers, tests bind them to in-memory mocks.

use core::ffi::CStr;
use core::fmt;
use spl_info::PhysicalAddress;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BlockError {
    #[error("device error {0}")]
    Device(i32),
    #[error("buffer of {len} bytes is not a whole number of {block_size}-byte blocks")]
    UnalignedBuffer { len: usize, block_size: usize },
    #[error("no blocks transferred")]
    NothingRead,
}

/// Sector-addressed storage.
pub trait BlockDevice {
    /// Sector size in bytes.
    fn block_size(&self) -> usize;

    /// Read `dst.len() / block_size()` sectors starting at `lba` into `dst`.
    ///
    /// Returns the number of sectors transferred.
    ///
    /// # Errors
    /// [`BlockError::UnalignedBuffer`] if `dst` is not a whole number of
    /// sectors, [`BlockError::Device`] for driver failures.
    fn read_blocks(&mut self, lba: u64, dst: &mut [u8]) -> Result<usize, BlockError>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FsError {
    #[error("no FAT filesystem on partition")]
    NoFilesystem,
    #[error("file not found")]
    NotFound,
    #[error("file of {size} bytes does not fit into {window} bytes")]
    TooLarge { size: usize, window: usize },
    #[error("file is empty")]
    Empty,
    #[error("driver error {0}")]
    Driver(i32),
}

/// How much of a file [`FileSystem::read_file`] transfers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReadExtent {
    /// At most the buffer length; longer files are cut short.
    Prefix,
    /// The whole file; a file longer than the buffer is an error.
    Whole,
}

/// A filesystem driver able to read one file by name.
pub trait FileSystem {
    /// Attach to `partition` of `device`.
    ///
    /// # Errors
    /// Any [`FsError`] the driver reports.
    fn mount(&mut self, device: &mut dyn BlockDevice, partition: u8) -> Result<(), FsError>;

    /// Read the file `name` from its start into `dst`.
    ///
    /// Returns the number of bytes transferred.
    ///
    /// # Errors
    /// [`FsError::NotFound`], [`FsError::TooLarge`] (for
    /// [`ReadExtent::Whole`]) or driver failures.
    fn read_file(
        &mut self,
        name: &CStr,
        dst: &mut [u8],
        extent: ReadExtent,
    ) -> Result<usize, FsError>;
}

/// Boot parameters left behind by the boot ROM.
pub trait BootRom {
    /// Raw boot device code.
    fn query_boot_device(&self) -> u32;

    /// Raw MMC boot mode code.
    fn query_boot_mode(&self) -> u32;
}

/// Index of an MMC/SD host controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MmcController(u8);

impl MmcController {
    pub const MMC1: Self = Self(0);
    pub const MMC2: Self = Self(1);

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for MmcController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mmc{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum StorageInitError {
    #[error("{controller} init failed: err - {code}")]
    Controller { controller: MmcController, code: i32 },
    #[error("mmc device not found")]
    NoDevice,
    #[error("mmc init failed: err - {0}")]
    Card(i32),
}

/// MMC/SD host controller stack.
pub trait MmcHost {
    type Device: BlockDevice;

    /// Bring up the host controller behind the selected boot device.
    ///
    /// # Errors
    /// [`StorageInitError::Controller`] if the controller cannot be registered.
    fn init_controller(&mut self, controller: MmcController) -> Result<(), StorageInitError>;

    /// Locate and initialise the card on the registered controller.
    ///
    /// # Errors
    /// [`StorageInitError::NoDevice`] or [`StorageInitError::Card`].
    fn detect_card(&mut self) -> Result<&mut Self::Device, StorageInitError>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MemoryError {
    #[error("window {base} + {len:#x} is outside addressable memory")]
    OutOfRange { base: PhysicalAddress, len: usize },
}

/// Memory the image is copied into.
pub trait TargetMemory {
    /// Borrow `len` bytes starting at `base` for writing.
    ///
    /// # Errors
    /// [`MemoryError::OutOfRange`] if the window is not backed by memory.
    fn window(&mut self, base: PhysicalAddress, len: usize) -> Result<&mut [u8], MemoryError>;
}

/// The board's physical address space, accessed directly.
///
/// The MMU is off while the SPL runs, so a physical address is a pointer.
pub struct PhysicalMemory {
    _private: (),
}

impl PhysicalMemory {
    /// # Safety
    /// Only one instance may exist, and nothing else may hold references into
    /// the windows it hands out. The caller also vouches that the load region
    /// does not overlap the running SPL or its stack.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl TargetMemory for PhysicalMemory {
    fn window(&mut self, base: PhysicalAddress, len: usize) -> Result<&mut [u8], MemoryError> {
        let out_of_range = MemoryError::OutOfRange { base, len };
        let end = u32::try_from(len)
            .ok()
            .and_then(|len| base.checked_add(len));
        if base == PhysicalAddress::zero() || end.is_none() {
            return Err(out_of_range);
        }

        // SAFETY: the range is non-null and does not wrap the 32-bit bus; `new`
        // makes the caller responsible for exclusivity and placement.
        Ok(unsafe { core::slice::from_raw_parts_mut(base.as_mut_ptr::<u8>(), len) })
    }
}
