//! # Physical Addresses

use core::fmt;
use core::ops::{Add, AddAssign};

/// Physical memory address on the 32-bit system bus.
///
/// A thin wrapper around `u32` that carries intent: load and entry addresses
/// are addresses, image sizes are not. The SPL runs with the MMU off, so every
/// address it touches is physical.
///
/// ### Examples
/// ```rust
/// # use spl_info::PhysicalAddress;
/// let entry = PhysicalAddress::new(0x8000_0040);
/// assert_eq!(entry.wrapping_sub(64), PhysicalAddress::new(0x8000_0000));
/// assert!(entry.is_aligned(4));
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PhysicalAddress(u32);

impl PhysicalAddress {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }

    #[inline]
    #[must_use]
    pub const fn new(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Reinterprets the address as a raw pointer.
    ///
    /// Producing the pointer is safe; dereferencing it is not.
    #[inline]
    #[must_use]
    pub const fn as_mut_ptr<T>(self) -> *mut T {
        self.as_usize() as *mut T
    }

    /// Address `rhs` bytes below this one, wrapping around the 32-bit bus.
    #[inline]
    #[must_use]
    pub const fn wrapping_sub(self, rhs: u32) -> Self {
        Self(self.0.wrapping_sub(rhs))
    }

    #[inline]
    #[must_use]
    pub const fn checked_add(self, rhs: u32) -> Option<Self> {
        match self.0.checked_add(rhs) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `align` must be a power of two.
    #[inline]
    #[must_use]
    pub const fn is_aligned(self, align: u32) -> bool {
        self.0 & (align - 1) == 0
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PA(0x{:08X})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl fmt::LowerHex for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<u32> for PhysicalAddress {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl From<PhysicalAddress> for u32 {
    #[inline]
    fn from(v: PhysicalAddress) -> Self {
        v.0
    }
}

impl Add<u32> for PhysicalAddress {
    type Output = Self;
    #[inline]
    fn add(self, rhs: u32) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<u32> for PhysicalAddress {
    #[inline]
    fn add_assign(&mut self, rhs: u32) {
        self.0 += rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_sub_stays_on_the_bus() {
        assert_eq!(
            PhysicalAddress::new(0x8000_0040).wrapping_sub(0x40),
            PhysicalAddress::new(0x8000_0000)
        );
        assert_eq!(
            PhysicalAddress::new(0x10).wrapping_sub(0x40),
            PhysicalAddress::new(0xFFFF_FFD0)
        );
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(
            PhysicalAddress::new(0x8000_0000).checked_add(0x200),
            Some(PhysicalAddress::new(0x8000_0200))
        );
        assert_eq!(PhysicalAddress::new(0xFFFF_FF00).checked_add(0x100), None);
    }

    #[test]
    fn alignment() {
        assert!(PhysicalAddress::new(0x80E8_0000).is_aligned(4096));
        assert!(!PhysicalAddress::new(0x80E8_0002).is_aligned(4));
    }

    #[test]
    fn formatting() {
        let pa = PhysicalAddress::new(0x80E8_0000);
        assert_eq!(format!("{pa}"), "0x80E80000");
        assert_eq!(format!("{pa:?}"), "PA(0x80E80000)");
        assert_eq!(format!("{pa:x}"), "80e80000");
    }
}
