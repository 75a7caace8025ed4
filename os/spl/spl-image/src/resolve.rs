//! # Header Resolution

use crate::codes::ImageOs;
use crate::header::{IMAGE_HEADER_SIZE, ImageHeader};
use crate::name::ImageName;
use log::{debug, info, warn};
use spl_info::{PhysicalAddress, SplConfig};

#[allow(clippy::cast_possible_truncation)]
const HEADER_SIZE: u32 = IMAGE_HEADER_SIZE as u32;

/// What the loader needs to know about the image it is about to copy.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResolvedImage {
    /// Bytes to copy, header included.
    ///
    /// Wider than the 32-bit size field so a header plus the largest declared
    /// payload is still exact. Whether that fits anywhere is up to the loader.
    pub total_size: u64,
    /// Address control is transferred to.
    pub entry_address: PhysicalAddress,
    /// Address the first copied byte lands at.
    pub load_address: PhysicalAddress,
    pub os: ImageOs,
    pub name: ImageName,
}

impl ResolvedImage {
    /// Derive the load window from a valid header.
    ///
    /// The header travels with the payload, so it sits directly in front of
    /// the entry address.
    #[must_use]
    pub fn from_header(header: &ImageHeader) -> Self {
        let entry_address = header.load_address();
        Self {
            total_size: u64::from(header.payload_size()) + u64::from(HEADER_SIZE),
            entry_address,
            load_address: entry_address.wrapping_sub(HEADER_SIZE),
            os: header.os(),
            name: *header.name(),
        }
    }

    /// The image assumed when no header is found: a raw U-Boot binary at the
    /// text base.
    #[must_use]
    pub fn fallback(config: &SplConfig) -> Self {
        Self {
            total_size: u64::from(config.default_image_size),
            entry_address: config.text_base,
            load_address: config.text_base,
            os: ImageOs::UBoot,
            name: ImageName::new("U-Boot"),
        }
    }
}

/// Outcome of [`interpret`]. Both variants are bootable.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum HeaderResolution {
    /// A valid legacy header was found.
    Parsed(ResolvedImage),
    /// No usable header; the documented defaults were substituted.
    Defaulted(ResolvedImage),
}

impl HeaderResolution {
    #[must_use]
    pub const fn image(&self) -> &ResolvedImage {
        match self {
            Self::Parsed(image) | Self::Defaulted(image) => image,
        }
    }

    #[must_use]
    pub fn into_image(self) -> ResolvedImage {
        match self {
            Self::Parsed(image) | Self::Defaulted(image) => image,
        }
    }

    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Resolve the image metadata from the first bytes read off the boot medium.
///
/// Never fails: anything without the header magic (including a buffer too
/// short to hold it) is taken to be a header-less binary and resolved to
/// [`ResolvedImage::fallback`]. A matching magic is always trusted; a size
/// that fits no memory is rejected later, when the load window is taken.
#[must_use]
pub fn interpret(raw: &[u8], config: &SplConfig) -> HeaderResolution {
    let header = match ImageHeader::parse(raw) {
        Ok(header) => header,
        Err(e) => {
            warn!("{e}");
            info!("Assuming header-less u-boot.bin ...");
            return HeaderResolution::Defaulted(ResolvedImage::fallback(config));
        }
    };

    let image = ResolvedImage::from_header(&header);
    debug!(
        "payload image: {} load addr: {} size: {}",
        image.name, image.load_address, image.total_size
    );
    HeaderResolution::Parsed(image)
}
