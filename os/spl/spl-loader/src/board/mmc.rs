use super::block::{BlockDevDesc, MMC_DEVICE, mmc_get_dev};
use core::ffi::{c_int, c_ulong, c_void};
use core::ptr::NonNull;
use log::debug;
use spl_boot::device::{BlockDevice, BlockError, MmcController, MmcHost, StorageInitError};
use spl_info::config::MMCSD_SECTOR_SIZE;

/// Opaque `struct mmc` of the C driver.
#[repr(C)]
pub struct Mmc {
    _opaque: [u8; 0],
}

const ENODEV: i32 = 19;
const EINVAL: i32 = 22;

unsafe extern "C" {
    fn omap_mmc_init(dev_index: c_int) -> c_int;
    fn mmc_initialize(bis: *mut c_void) -> c_int;
    fn find_mmc_device(dev_num: c_int) -> *mut Mmc;
    fn mmc_init(mmc: *mut Mmc) -> c_int;
}

/// Called back by `mmc_initialize`. The controller is already registered by
/// [`OmapMmc::init_controller`], so there is nothing left to do.
#[unsafe(no_mangle)]
extern "C" fn board_mmc_init(_bis: *mut c_void) -> c_int {
    0
}

/// An initialised card on the registered controller, read through its block
/// device descriptor.
pub struct MmcCard {
    desc: NonNull<BlockDevDesc>,
}

impl MmcCard {
    const fn desc(&self) -> &BlockDevDesc {
        // SAFETY: the MMC core keeps the descriptor alive and at a fixed
        // address for the program's lifetime.
        unsafe { self.desc.as_ref() }
    }
}

impl BlockDevice for MmcCard {
    fn block_size(&self) -> usize {
        match usize::try_from(self.desc().blksz) {
            Ok(0) | Err(_) => MMCSD_SECTOR_SIZE,
            Ok(size) => size,
        }
    }

    fn read_blocks(&mut self, lba: u64, dst: &mut [u8]) -> Result<usize, BlockError> {
        let block_size = self.block_size();
        if dst.len() % block_size != 0 {
            return Err(BlockError::UnalignedBuffer {
                len: dst.len(),
                block_size,
            });
        }

        let desc = self.desc();
        let block_read = desc.block_read.ok_or(BlockError::Device(-ENODEV))?;
        let start = c_ulong::try_from(lba).map_err(|_| BlockError::Device(-EINVAL))?;
        let count =
            c_ulong::try_from(dst.len() / block_size).map_err(|_| BlockError::Device(-EINVAL))?;

        // SAFETY: `dst` holds exactly `count` blocks and the card was
        // initialised by `detect_card`.
        let read = unsafe { block_read(desc.dev, start, count, dst.as_mut_ptr().cast()) };
        Ok(usize::try_from(read).unwrap_or_default())
    }
}

/// The OMAP HSMMC host controllers.
#[derive(Default)]
pub struct OmapMmc {
    card: Option<MmcCard>,
}

impl OmapMmc {
    #[must_use]
    pub const fn new() -> Self {
        Self { card: None }
    }
}

impl MmcHost for OmapMmc {
    type Device = MmcCard;

    fn init_controller(&mut self, controller: MmcController) -> Result<(), StorageInitError> {
        // SAFETY: registers the controller with the MMC core; no memory is
        // handed over.
        let code = unsafe { omap_mmc_init(c_int::from(controller.index())) };
        if code == 0 {
            Ok(())
        } else {
            Err(StorageInitError::Controller { controller, code })
        }
    }

    fn detect_card(&mut self) -> Result<&mut MmcCard, StorageInitError> {
        // SAFETY: `bis` is only passed through to `board_mmc_init`, which
        // ignores it.
        unsafe { mmc_initialize(core::ptr::null_mut()) };

        // SAFETY: the MMC core owns the returned device for the program's
        // lifetime.
        let mmc = NonNull::new(unsafe { find_mmc_device(MMC_DEVICE) })
            .ok_or(StorageInitError::NoDevice)?;

        // SAFETY: `mmc` is a registered device.
        let code = unsafe { mmc_init(mmc.as_ptr()) };
        if code != 0 {
            return Err(StorageInitError::Card(code));
        }

        // SAFETY: the MMC core is initialised; a null descriptor is rejected.
        let desc = NonNull::new(unsafe { mmc_get_dev(MMC_DEVICE) })
            .ok_or(StorageInitError::NoDevice)?;

        debug!("mmc device {MMC_DEVICE} ready");
        Ok(self.card.insert(MmcCard { desc }))
    }
}
