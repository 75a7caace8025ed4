use core::ffi::{c_char, c_int, c_uchar, c_ulong, c_void};

/// `block_read` of a block device: returns the number of blocks read.
pub type BlockReadFn =
    unsafe extern "C" fn(dev: c_int, start: c_ulong, blkcnt: c_ulong, buffer: *mut c_void) -> c_ulong;

/// Leading fields of the C block layer's `block_dev_desc_t`, up to and
/// including `block_read`. Only ever handled by pointer; the C side owns the
/// rest of the structure.
#[repr(C)]
#[allow(dead_code)]
pub struct BlockDevDesc {
    pub if_type: c_int,
    pub dev: c_int,
    pub part_type: c_uchar,
    pub target: c_uchar,
    pub lun: c_uchar,
    pub kind: c_uchar,
    pub removable: c_uchar,
    pub lba: c_ulong,
    pub blksz: c_ulong,
    pub vendor: [c_char; 41],
    pub product: [c_char; 21],
    pub revision: [c_char; 9],
    pub block_read: Option<BlockReadFn>,
}

#[cfg(target_pointer_width = "32")]
const _: () = {
    assert!(core::mem::offset_of!(BlockDevDesc, lba) == 16);
    assert!(core::mem::offset_of!(BlockDevDesc, vendor) == 24);
    assert!(core::mem::offset_of!(BlockDevDesc, block_read) == 96);
};

/// Only one controller is ever registered, so the card is always device 0.
pub const MMC_DEVICE: c_int = 0;

unsafe extern "C" {
    /// Descriptor of MMC device `dev`, or null if it is not registered.
    pub fn mmc_get_dev(dev: c_int) -> *mut BlockDevDesc;
}
