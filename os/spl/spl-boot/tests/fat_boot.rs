mod common;

use common::{MockFat, Trap, board, config, image};
use spl_boot::device::{FsError, ReadExtent};
use spl_boot::pipeline::{self, run};
use spl_boot::{BootContext, BootError, BootStage};
use spl_image::{HeaderResolution, ImageOs};
use spl_info::PhysicalAddress;
use spl_info::boot::{BOOT_DEVICE_MMC1, MMCSD_MODE_FAT};

const PAYLOAD: &std::ffi::CStr = c"u-boot.bin";

#[test]
fn missing_file_halts() {
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);

    let mut ctx = BootContext::new();
    let err = run(&mut ctx, &mut board, &config()).unwrap_err();

    assert_eq!(
        err,
        BootError::FilesystemRead {
            name: PAYLOAD,
            source: FsError::NotFound,
        }
    );
    assert_eq!(ctx.stage(), BootStage::Halted);
    assert_eq!(board.fs.mounted, Some(1));
    assert_eq!(board.fs.reads, [ReadExtent::Prefix, ReadExtent::Whole]);
    // The card itself is never read sector-wise in FAT mode.
    assert!(board.mmc.card.reads.is_empty());
}

#[test]
fn file_with_header_is_loaded_below_its_entry_point() {
    let bytes = image(1000, 0x8000_0040, ImageOs::UBoot);
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);
    board.fs = MockFat::with_file(PAYLOAD, bytes.clone());

    let mut ctx = BootContext::new();
    let entry = run(&mut ctx, &mut board, &config()).unwrap();

    assert_eq!(entry.address(), PhysicalAddress::new(0x8000_0040));
    assert_eq!(ctx.stage(), BootStage::ImageMaterialized);
    assert!(matches!(ctx.image(), Some(HeaderResolution::Parsed(_))));
    assert_eq!(
        board.memory.windows,
        [(PhysicalAddress::new(0x8000_0000), 1024 * 1024)]
    );
    assert_eq!(board.memory.at(0x8000_0000, bytes.len()), &bytes[..]);
}

#[test]
#[should_panic(expected = "entered image at 0x80E80000")]
fn headerless_file_is_dispatched_at_the_text_base() {
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);
    board.fs = MockFat::with_file(PAYLOAD, vec![0xEA; 4096]);

    pipeline::boot(&mut board, &config(), &Trap);
}

#[test]
fn unreadable_header_falls_back_to_defaults() {
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);
    board.fs = MockFat {
        prefix_error: Some(FsError::Driver(-1)),
        ..MockFat::with_file(PAYLOAD, image(1000, 0x8000_0040, ImageOs::UBoot))
    };

    let mut ctx = BootContext::new();
    let entry = run(&mut ctx, &mut board, &config()).unwrap();

    assert_eq!(entry.address(), PhysicalAddress::new(0x80E8_0000));
    assert!(matches!(ctx.image(), Some(HeaderResolution::Defaulted(_))));
}

#[test]
fn mount_failure_halts() {
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);
    board.fs = MockFat {
        mount_error: Some(FsError::NoFilesystem),
        ..MockFat::with_file(PAYLOAD, vec![0; 64])
    };

    let mut ctx = BootContext::new();
    let err = run(&mut ctx, &mut board, &config()).unwrap_err();

    assert_eq!(
        err,
        BootError::FilesystemMount {
            partition: 1,
            source: FsError::NoFilesystem,
        }
    );
    assert_eq!(ctx.stage(), BootStage::Halted);
    assert!(board.fs.reads.is_empty());
}

#[test]
fn empty_file_halts() {
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);
    board.fs = MockFat::with_file(PAYLOAD, Vec::new());

    let mut ctx = BootContext::new();
    let err = run(&mut ctx, &mut board, &config()).unwrap_err();

    assert_eq!(
        err,
        BootError::FilesystemRead {
            name: PAYLOAD,
            source: FsError::Empty,
        }
    );
    assert_eq!(ctx.stage(), BootStage::Halted);
}

#[test]
fn file_larger_than_the_load_window_halts() {
    let mut board = board(BOOT_DEVICE_MMC1, MMCSD_MODE_FAT);
    board.fs = MockFat::with_file(PAYLOAD, vec![0xEA; 2 * 1024 * 1024]);

    let mut ctx = BootContext::new();
    let err = run(&mut ctx, &mut board, &config()).unwrap_err();

    assert_eq!(
        err,
        BootError::FilesystemRead {
            name: PAYLOAD,
            source: FsError::TooLarge {
                size: 2 * 1024 * 1024,
                window: 1024 * 1024,
            },
        }
    );
}
