//! In-memory stand-ins for the board services.

#![allow(dead_code)]

use spl_boot::device::{
    BlockDevice, BlockError, BootRom, FileSystem, FsError, MemoryError, MmcController, MmcHost,
    ReadExtent, StorageInitError, TargetMemory,
};
use spl_boot::dispatch::{EntryInvoker, EntryPoint};
use spl_boot::pipeline::Board;
use spl_image::{IMAGE_HEADER_SIZE, ImageHeader, ImageName, ImageOs};
use spl_info::{PhysicalAddress, SplConfig};
use std::ffi::{CStr, CString};

pub const SECTOR: usize = 512;
pub const RAM_BASE: u32 = 0x8000_0000;
pub const RAM_SIZE: usize = 16 * 1024 * 1024;

pub struct MockRom {
    pub device: u32,
    pub mode: u32,
}

impl BootRom for MockRom {
    fn query_boot_device(&self) -> u32 {
        self.device
    }

    fn query_boot_mode(&self) -> u32 {
        self.mode
    }
}

/// Sector-addressed disk backed by a sparse image at a fixed LBA.
#[derive(Default)]
pub struct MockDisk {
    pub base_lba: u64,
    pub data: Vec<u8>,
    /// `(lba, sectors)` of every read issued.
    pub reads: Vec<(u64, usize)>,
    /// Zero-based index of the read that fails with a device error.
    pub fail_read: Option<usize>,
    /// Zero-based index of the read that transfers nothing.
    pub empty_read: Option<usize>,
}

impl MockDisk {
    pub fn with_image(base_lba: u64, data: Vec<u8>) -> Self {
        Self {
            base_lba,
            data,
            ..Self::default()
        }
    }
}

impl BlockDevice for MockDisk {
    fn block_size(&self) -> usize {
        SECTOR
    }

    fn read_blocks(&mut self, lba: u64, dst: &mut [u8]) -> Result<usize, BlockError> {
        if dst.len() % SECTOR != 0 {
            return Err(BlockError::UnalignedBuffer {
                len: dst.len(),
                block_size: SECTOR,
            });
        }

        let index = self.reads.len();
        let count = dst.len() / SECTOR;
        self.reads.push((lba, count));

        if self.fail_read == Some(index) {
            return Err(BlockError::Device(-5));
        }
        if self.empty_read == Some(index) {
            return Ok(0);
        }

        dst.fill(0);
        let offset = usize::try_from(lba.saturating_sub(self.base_lba)).unwrap() * SECTOR;
        if lba >= self.base_lba && offset < self.data.len() {
            let n = dst.len().min(self.data.len() - offset);
            dst[..n].copy_from_slice(&self.data[offset..offset + n]);
        }
        Ok(count)
    }
}

#[derive(Default)]
pub struct MockMmc {
    pub card: MockDisk,
    pub initialized: Vec<MmcController>,
    pub init_error: Option<StorageInitError>,
    pub detect_error: Option<StorageInitError>,
}

impl MmcHost for MockMmc {
    type Device = MockDisk;

    fn init_controller(&mut self, controller: MmcController) -> Result<(), StorageInitError> {
        self.initialized.push(controller);
        self.init_error.map_or(Ok(()), Err)
    }

    fn detect_card(&mut self) -> Result<&mut MockDisk, StorageInitError> {
        match self.detect_error {
            Some(err) => Err(err),
            None => Ok(&mut self.card),
        }
    }
}

/// Single-file FAT volume.
#[derive(Default)]
pub struct MockFat {
    pub files: Vec<(CString, Vec<u8>)>,
    pub mount_error: Option<FsError>,
    /// Fail the header-sized prefix read with this error.
    pub prefix_error: Option<FsError>,
    pub mounted: Option<u8>,
    pub reads: Vec<ReadExtent>,
}

impl MockFat {
    pub fn with_file(name: &CStr, contents: Vec<u8>) -> Self {
        Self {
            files: vec![(name.to_owned(), contents)],
            ..Self::default()
        }
    }
}

impl FileSystem for MockFat {
    fn mount(&mut self, device: &mut dyn BlockDevice, partition: u8) -> Result<(), FsError> {
        assert_eq!(device.block_size(), SECTOR);
        if let Some(err) = self.mount_error {
            return Err(err);
        }
        self.mounted = Some(partition);
        Ok(())
    }

    fn read_file(
        &mut self,
        name: &CStr,
        dst: &mut [u8],
        extent: ReadExtent,
    ) -> Result<usize, FsError> {
        assert!(self.mounted.is_some(), "read before mount");
        self.reads.push(extent);

        if extent == ReadExtent::Prefix
            && let Some(err) = self.prefix_error
        {
            return Err(err);
        }

        let (_, contents) = self
            .files
            .iter()
            .find(|(n, _)| n.as_c_str() == name)
            .ok_or(FsError::NotFound)?;

        let len = match extent {
            ReadExtent::Prefix => contents.len().min(dst.len()),
            ReadExtent::Whole if contents.len() > dst.len() => {
                return Err(FsError::TooLarge {
                    size: contents.len(),
                    window: dst.len(),
                });
            }
            ReadExtent::Whole => contents.len(),
        };
        dst[..len].copy_from_slice(&contents[..len]);
        Ok(len)
    }
}

/// RAM starting at [`RAM_BASE`].
pub struct VecMemory {
    pub base: PhysicalAddress,
    pub bytes: Vec<u8>,
    /// `(base, len)` of every window handed out.
    pub windows: Vec<(PhysicalAddress, usize)>,
}

impl Default for VecMemory {
    fn default() -> Self {
        Self {
            base: PhysicalAddress::new(RAM_BASE),
            bytes: vec![0; RAM_SIZE],
            windows: Vec::new(),
        }
    }
}

impl VecMemory {
    pub fn at(&self, address: u32, len: usize) -> &[u8] {
        let offset = (address - self.base.as_u32()) as usize;
        &self.bytes[offset..offset + len]
    }
}

impl TargetMemory for VecMemory {
    fn window(&mut self, base: PhysicalAddress, len: usize) -> Result<&mut [u8], MemoryError> {
        self.windows.push((base, len));
        let out_of_range = MemoryError::OutOfRange { base, len };
        let offset = base
            .as_u32()
            .checked_sub(self.base.as_u32())
            .ok_or(out_of_range)? as usize;
        let end = offset.checked_add(len).ok_or(out_of_range)?;
        self.bytes.get_mut(offset..end).ok_or(out_of_range)
    }
}

/// Panics with the entry address instead of jumping.
pub struct Trap;

impl EntryInvoker for Trap {
    unsafe fn invoke(&self, entry: EntryPoint) -> ! {
        panic!("entered image at {}", entry.address());
    }
}

pub type MockBoard = Board<MockRom, MockMmc, MockFat, VecMemory>;

pub fn board(device: u32, mode: u32) -> MockBoard {
    Board {
        rom: MockRom { device, mode },
        mmc: MockMmc::default(),
        fs: MockFat::default(),
        memory: VecMemory::default(),
    }
}

/// Header followed by `payload_size` bytes of a recognizable pattern.
pub fn image(payload_size: u32, entry: u32, os: ImageOs) -> Vec<u8> {
    let header = ImageHeader::new(
        payload_size,
        PhysicalAddress::new(entry),
        os,
        ImageName::new("U-Boot 2011.06"),
    );
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend((0..payload_size).map(|i| (i % 251) as u8));
    assert_eq!(bytes.len(), IMAGE_HEADER_SIZE + payload_size as usize);
    bytes
}

pub fn config() -> SplConfig {
    SplConfig::DEFAULT
}
