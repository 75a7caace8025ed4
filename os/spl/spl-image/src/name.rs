use core::fmt;

/// Length of the header's name field.
pub const IH_NMLEN: usize = 32;

/// NUL-padded image name (`ih_name`).
///
/// Informational only; invalid UTF-8 is cut at the first bad byte.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageName([u8; IH_NMLEN]);

impl ImageName {
    /// Builds a name, truncating to [`IH_NMLEN`] bytes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut raw = [0u8; IH_NMLEN];
        let len = name.len().min(IH_NMLEN);
        raw[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self(raw)
    }

    #[must_use]
    pub const fn from_raw(raw: [u8; IH_NMLEN]) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IH_NMLEN] {
        &self.0
    }

    /// The name up to the first NUL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(IH_NMLEN);
        let bytes = &self.0[..end];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
