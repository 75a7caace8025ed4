//! # Legacy Image Header Handling
//!
//! The next boot stage is normally wrapped in a 64-byte "legacy" image header
//! that records its size, the address it wants to run at, the OS it belongs to
//! and a short name. Raw binaries without that header are just as common on
//! development boards, so the SPL never rejects an image for lacking one.
//!
//! [`interpret`] turns the first bytes read from the boot medium into a
//! [`HeaderResolution`]:
//!
//! * [`HeaderResolution::Parsed`] when the magic matches. The image is loaded
//!   together with its header, so the load address lies one header size below
//!   the entry address and the total size includes the header.
//! * [`HeaderResolution::Defaulted`] otherwise. The bytes are assumed to be a
//!   header-less U-Boot binary of at most [`DEFAULT_IMAGE_SIZE`] bytes that is
//!   loaded and entered at the configured text base.
//!
//! ```rust
//! # use spl_image::{interpret, ImageHeader, ImageName, ImageOs, IMAGE_HEADER_SIZE};
//! # use spl_info::{PhysicalAddress, SplConfig};
//! let header = ImageHeader::new(
//!     1000,
//!     PhysicalAddress::new(0x8000_0040),
//!     ImageOs::UBoot,
//!     ImageName::new("U-Boot 2011.06"),
//! );
//! let resolved = interpret(&header.to_bytes(), &SplConfig::DEFAULT);
//! assert!(!resolved.is_defaulted());
//! assert_eq!(resolved.image().load_address, PhysicalAddress::new(0x8000_0000));
//! assert_eq!(resolved.image().total_size, 1000 + IMAGE_HEADER_SIZE as u64);
//! ```
//!
//! [`DEFAULT_IMAGE_SIZE`]: spl_info::config::DEFAULT_IMAGE_SIZE

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

mod codes;
mod header;
mod name;
mod resolve;

pub use codes::{ImageArch, ImageCompression, ImageOs, ImageType};
pub use header::{HeaderError, IH_MAGIC, IMAGE_HEADER_SIZE, ImageHeader};
pub use name::{IH_NMLEN, ImageName};
pub use resolve::{HeaderResolution, ResolvedImage, interpret};
