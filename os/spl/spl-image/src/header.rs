//! # Legacy Image Header Parsing

use crate::codes::{ImageArch, ImageCompression, ImageOs, ImageType};
use crate::name::{IH_NMLEN, ImageName};
use spl_info::PhysicalAddress;

/// Magic number at offset 0 of every legacy image header.
pub const IH_MAGIC: u32 = 0x2705_1956;

/// Size of the on-disk header in bytes.
pub const IMAGE_HEADER_SIZE: usize = 64;

const OFF_MAGIC: usize = 0;
const OFF_HCRC: usize = 4;
const OFF_TIME: usize = 8;
const OFF_SIZE: usize = 12;
const OFF_LOAD: usize = 16;
const OFF_EP: usize = 20;
const OFF_DCRC: usize = 24;
const OFF_OS: usize = 28;
const OFF_ARCH: usize = 29;
const OFF_TYPE: usize = 30;
const OFF_COMP: usize = 31;
const OFF_NAME: usize = 32;

const _: () = assert!(OFF_NAME + IH_NMLEN == IMAGE_HEADER_SIZE);

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum HeaderError {
    #[error("header truncated: got {len} of {IMAGE_HEADER_SIZE} bytes")]
    Truncated { len: usize },
    #[error("image signature not found: ih_magic = {found:#010x}")]
    BadMagic { found: u32 },
}

/// Decoded legacy image header.
///
/// All multi-byte fields are stored big-endian on disk. The CRC fields are
/// carried but never checked.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageHeader {
    header_crc: u32,
    timestamp: u32,
    payload_size: u32,
    load_address: PhysicalAddress,
    entry_point: PhysicalAddress,
    data_crc: u32,
    os: ImageOs,
    arch: ImageArch,
    image_type: ImageType,
    compression: ImageCompression,
    name: ImageName,
}

impl ImageHeader {
    /// Header for an uncompressed ARM firmware image run at `load_address`.
    #[must_use]
    pub const fn new(
        payload_size: u32,
        load_address: PhysicalAddress,
        os: ImageOs,
        name: ImageName,
    ) -> Self {
        Self {
            header_crc: 0,
            timestamp: 0,
            payload_size,
            load_address,
            entry_point: load_address,
            data_crc: 0,
            os,
            arch: ImageArch::Arm,
            image_type: ImageType::Firmware,
            compression: ImageCompression::None,
            name,
        }
    }

    /// Decode the header at the start of `bytes`.
    ///
    /// Trailing bytes beyond [`IMAGE_HEADER_SIZE`] are ignored, so a whole
    /// sector can be passed in.
    ///
    /// # Errors
    /// [`HeaderError::Truncated`] if fewer than 64 bytes are given,
    /// [`HeaderError::BadMagic`] if the signature does not match.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        let Some(raw) = bytes.first_chunk::<IMAGE_HEADER_SIZE>() else {
            return Err(HeaderError::Truncated { len: bytes.len() });
        };

        let magic = be32(raw, OFF_MAGIC);
        if magic != IH_MAGIC {
            return Err(HeaderError::BadMagic { found: magic });
        }

        let mut name = [0u8; IH_NMLEN];
        name.copy_from_slice(&raw[OFF_NAME..]);

        Ok(Self {
            header_crc: be32(raw, OFF_HCRC),
            timestamp: be32(raw, OFF_TIME),
            payload_size: be32(raw, OFF_SIZE),
            load_address: PhysicalAddress::new(be32(raw, OFF_LOAD)),
            entry_point: PhysicalAddress::new(be32(raw, OFF_EP)),
            data_crc: be32(raw, OFF_DCRC),
            os: ImageOs::from_code(raw[OFF_OS]),
            arch: ImageArch::from_code(raw[OFF_ARCH]),
            image_type: ImageType::from_code(raw[OFF_TYPE]),
            compression: ImageCompression::from_code(raw[OFF_COMP]),
            name: ImageName::from_raw(name),
        })
    }

    /// Encode the header in its on-disk form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; IMAGE_HEADER_SIZE] {
        let mut raw = [0u8; IMAGE_HEADER_SIZE];
        put_be32(&mut raw, OFF_MAGIC, IH_MAGIC);
        put_be32(&mut raw, OFF_HCRC, self.header_crc);
        put_be32(&mut raw, OFF_TIME, self.timestamp);
        put_be32(&mut raw, OFF_SIZE, self.payload_size);
        put_be32(&mut raw, OFF_LOAD, self.load_address.as_u32());
        put_be32(&mut raw, OFF_EP, self.entry_point.as_u32());
        put_be32(&mut raw, OFF_DCRC, self.data_crc);
        raw[OFF_OS] = self.os.code();
        raw[OFF_ARCH] = self.arch.code();
        raw[OFF_TYPE] = self.image_type.code();
        raw[OFF_COMP] = self.compression.code();
        raw[OFF_NAME..].copy_from_slice(self.name.as_bytes());
        raw
    }

    #[must_use]
    pub const fn with_entry_point(mut self, entry_point: PhysicalAddress) -> Self {
        self.entry_point = entry_point;
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Payload size in bytes, header excluded (`ih_size`).
    #[must_use]
    pub const fn payload_size(&self) -> u32 {
        self.payload_size
    }

    /// Address the image wants to be placed at (`ih_load`).
    ///
    /// The SPL enters the image here: the header is loaded in front of this
    /// address so that the payload itself starts exactly at it.
    #[must_use]
    pub const fn load_address(&self) -> PhysicalAddress {
        self.load_address
    }

    /// Entry point recorded by the image tool (`ih_ep`). Informational.
    #[must_use]
    pub const fn entry_point(&self) -> PhysicalAddress {
        self.entry_point
    }

    #[must_use]
    pub const fn header_crc(&self) -> u32 {
        self.header_crc
    }

    #[must_use]
    pub const fn data_crc(&self) -> u32 {
        self.data_crc
    }

    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        self.timestamp
    }

    #[must_use]
    pub const fn os(&self) -> ImageOs {
        self.os
    }

    #[must_use]
    pub const fn arch(&self) -> ImageArch {
        self.arch
    }

    #[must_use]
    pub const fn image_type(&self) -> ImageType {
        self.image_type
    }

    #[must_use]
    pub const fn compression(&self) -> ImageCompression {
        self.compression
    }

    #[must_use]
    pub const fn name(&self) -> &ImageName {
        &self.name
    }
}

#[inline]
const fn be32(raw: &[u8; IMAGE_HEADER_SIZE], off: usize) -> u32 {
    u32::from_be_bytes([raw[off], raw[off + 1], raw[off + 2], raw[off + 3]])
}

#[inline]
fn put_be32(raw: &mut [u8; IMAGE_HEADER_SIZE], off: usize, value: u32) {
    raw[off..off + 4].copy_from_slice(&value.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [u8; IMAGE_HEADER_SIZE] {
        let mut raw = [0u8; IMAGE_HEADER_SIZE];
        raw[0..4].copy_from_slice(&[0x27, 0x05, 0x19, 0x56]);
        raw[12..16].copy_from_slice(&[0x00, 0x03, 0x2A, 0x10]);
        raw[16..20].copy_from_slice(&[0x80, 0xE8, 0x00, 0x00]);
        raw[20..24].copy_from_slice(&[0x80, 0xE8, 0x00, 0x00]);
        raw[28] = 17;
        raw[29] = 2;
        raw[30] = 5;
        raw[32..38].copy_from_slice(b"U-Boot");
        raw
    }

    #[test]
    fn parse_reads_big_endian_fields() {
        let hdr = ImageHeader::parse(&sample()).unwrap();
        assert_eq!(hdr.payload_size(), 0x0003_2A10);
        assert_eq!(hdr.load_address(), PhysicalAddress::new(0x80E8_0000));
        assert_eq!(hdr.entry_point(), PhysicalAddress::new(0x80E8_0000));
        assert_eq!(hdr.os(), ImageOs::UBoot);
        assert_eq!(hdr.arch(), ImageArch::Arm);
        assert_eq!(hdr.image_type(), ImageType::Firmware);
        assert_eq!(hdr.compression(), ImageCompression::None);
        assert_eq!(hdr.name().as_str(), "U-Boot");
    }

    #[test]
    fn parse_ignores_trailing_bytes() {
        let mut sector = [0xAAu8; 512];
        sector[..IMAGE_HEADER_SIZE].copy_from_slice(&sample());
        assert!(ImageHeader::parse(&sector).is_ok());
    }

    #[test]
    fn little_endian_magic_is_rejected() {
        let mut raw = sample();
        raw[0..4].copy_from_slice(&IH_MAGIC.to_le_bytes());
        assert_eq!(
            ImageHeader::parse(&raw),
            Err(HeaderError::BadMagic { found: 0x5619_0527 })
        );
    }

    #[test]
    fn short_buffer_is_truncated() {
        let raw = sample();
        assert_eq!(
            ImageHeader::parse(&raw[..63]),
            Err(HeaderError::Truncated { len: 63 })
        );
        assert_eq!(
            ImageHeader::parse(&[]),
            Err(HeaderError::Truncated { len: 0 })
        );
    }

    #[test]
    fn encode_matches_decoded_layout() {
        let raw = sample();
        let hdr = ImageHeader::parse(&raw).unwrap();
        assert_eq!(hdr.to_bytes(), raw);
    }

    #[test]
    fn builder_setters() {
        let hdr = ImageHeader::new(
            16,
            PhysicalAddress::new(0x8000_0000),
            ImageOs::Linux,
            ImageName::new("k"),
        )
        .with_entry_point(PhysicalAddress::new(0x8000_8000))
        .with_timestamp(1_300_000_000);
        let back = ImageHeader::parse(&hdr.to_bytes()).unwrap();
        assert_eq!(back.entry_point(), PhysicalAddress::new(0x8000_8000));
        assert_eq!(back.load_address(), PhysicalAddress::new(0x8000_0000));
        assert_eq!(back.timestamp(), 1_300_000_000);
    }
}
