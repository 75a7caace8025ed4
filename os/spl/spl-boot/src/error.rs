use crate::device::{BlockError, FsError, MemoryError, StorageInitError};
use core::ffi::CStr;
use core::fmt;
use spl_image::ImageOs;

/// Which of the two raw-mode reads failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReadStep {
    Header,
    Payload,
}

impl fmt::Display for ReadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Payload => "payload",
        })
    }
}

/// A condition the boot attempt cannot recover from.
///
/// Every variant ends in [`halt::fail`](crate::halt::fail). A missing image
/// header is not an error and never shows up here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BootError {
    #[error("Un-supported Boot Device - {0}")]
    UnsupportedBootDevice(u32),
    #[error("wrong MMC boot mode - {0}")]
    UnsupportedBootMode(u32),
    #[error(transparent)]
    StorageInit(#[from] StorageInitError),
    #[error("mmc blk read err ({step}): {source}")]
    StorageRead {
        step: ReadStep,
        #[source]
        source: BlockError,
    },
    #[error("fat register err on partition {partition}: {source}")]
    FilesystemMount {
        partition: u8,
        #[source]
        source: FsError,
    },
    #[error("error reading image {name:?}: {source}")]
    FilesystemRead {
        name: &'static CStr,
        #[source]
        source: FsError,
    },
    #[error("no room for the image: {0}")]
    LoadWindow(#[from] MemoryError),
    #[error("refusing to start {0} image")]
    UnsupportedImageOs(ImageOs),
}
