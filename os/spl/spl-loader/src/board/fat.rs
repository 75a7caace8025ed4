use super::block::{BlockDevDesc, MMC_DEVICE, mmc_get_dev};
use core::ffi::{CStr, c_char, c_int, c_long, c_ulong, c_void};
use log::debug;
use spl_boot::device::{BlockDevice, FileSystem, FsError, ReadExtent};

unsafe extern "C" {
    fn fat_register_device(dev_desc: *mut BlockDevDesc, part_no: c_int) -> c_int;
    fn file_fat_read(filename: *const c_char, buffer: *mut c_void, maxsize: c_ulong) -> c_long;
}

/// U-Boot's FAT driver on the boot card.
#[derive(Default)]
pub struct UBootFat {
    mounted: bool,
}

impl UBootFat {
    #[must_use]
    pub const fn new() -> Self {
        Self { mounted: false }
    }
}

impl FileSystem for UBootFat {
    fn mount(&mut self, device: &mut dyn BlockDevice, partition: u8) -> Result<(), FsError> {
        debug!(
            "registering FAT on partition {partition} ({}-byte sectors)",
            device.block_size()
        );

        // The C driver reaches the card through its own descriptor, which
        // belongs to the same device `detect_card` initialised.
        // SAFETY: the MMC core is initialised; a null descriptor is rejected
        // below.
        let desc = unsafe { mmc_get_dev(MMC_DEVICE) };
        if desc.is_null() {
            return Err(FsError::NoFilesystem);
        }

        // SAFETY: `desc` is a live block device descriptor.
        match unsafe { fat_register_device(desc, c_int::from(partition)) } {
            0 => {
                self.mounted = true;
                Ok(())
            }
            -1 => Err(FsError::NoFilesystem),
            code => Err(FsError::Driver(code)),
        }
    }

    fn read_file(
        &mut self,
        name: &CStr,
        dst: &mut [u8],
        extent: ReadExtent,
    ) -> Result<usize, FsError> {
        if !self.mounted {
            return Err(FsError::NoFilesystem);
        }

        let max = c_ulong::try_from(dst.len()).unwrap_or(c_ulong::MAX);
        // SAFETY: the driver writes at most `max` bytes into `dst`.
        let read = unsafe { file_fat_read(name.as_ptr(), dst.as_mut_ptr().cast(), max) };
        let read = match usize::try_from(read) {
            Ok(read) => read,
            Err(_) => return Err(FsError::NotFound),
        };

        // The driver stops at `max` silently, so a file that fills the window
        // cannot be told apart from one that overflows it.
        if extent == ReadExtent::Whole && read == dst.len() {
            return Err(FsError::TooLarge {
                size: read,
                window: dst.len(),
            });
        }

        Ok(read)
    }
}
