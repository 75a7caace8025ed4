//! # Header Code Bytes

/// Declares a closed set of one-byte header codes with an `Unknown` escape.
macro_rules! header_code {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A code not known to this loader, kept verbatim.
            Unknown(u8),
        }

        impl $name {
            #[must_use]
            pub const fn from_code(code: u8) -> Self {
                match code {
                    $( $code => Self::$variant, )+
                    other => Self::Unknown(other),
                }
            }

            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Unknown(code) => code,
                }
            }
        }

        impl From<u8> for $name {
            #[inline]
            fn from(code: u8) -> Self {
                Self::from_code(code)
            }
        }
    };
}

header_code! {
    /// Operating system the image belongs to (`ih_os`).
    pub enum ImageOs {
        Invalid = 0,
        OpenBsd = 1,
        NetBsd = 2,
        FreeBsd = 3,
        Bsd4_4 = 4,
        Linux = 5,
        Svr4 = 6,
        Esix = 7,
        Solaris = 8,
        Irix = 9,
        Sco = 10,
        Dell = 11,
        Ncr = 12,
        LynxOs = 13,
        VxWorks = 14,
        Psos = 15,
        Qnx = 16,
        /// Firmware: the only tag the SPL knows how to start.
        UBoot = 17,
        Rtems = 18,
        Artos = 19,
        Unity = 20,
        Integrity = 21,
    }
}

header_code! {
    /// CPU architecture of the image (`ih_arch`).
    pub enum ImageArch {
        Invalid = 0,
        Alpha = 1,
        Arm = 2,
        I386 = 3,
        Ia64 = 4,
        Mips = 5,
        Mips64 = 6,
        Ppc = 7,
        S390 = 8,
        Sh = 9,
        Sparc = 10,
        Sparc64 = 11,
        M68k = 12,
    }
}

header_code! {
    /// Kind of payload (`ih_type`).
    pub enum ImageType {
        Invalid = 0,
        Standalone = 1,
        Kernel = 2,
        Ramdisk = 3,
        Multi = 4,
        Firmware = 5,
        Script = 6,
        Filesystem = 7,
        FlatDt = 8,
    }
}

header_code! {
    /// Compression applied to the payload (`ih_comp`).
    pub enum ImageCompression {
        None = 0,
        Gzip = 1,
        Bzip2 = 2,
        Lzma = 3,
        Lzo = 4,
    }
}

impl ImageOs {
    /// Human-readable OS name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid OS",
            Self::OpenBsd => "OpenBSD",
            Self::NetBsd => "NetBSD",
            Self::FreeBsd => "FreeBSD",
            Self::Bsd4_4 => "4.4BSD",
            Self::Linux => "Linux",
            Self::Svr4 => "SVR4",
            Self::Esix => "Esix",
            Self::Solaris => "Solaris",
            Self::Irix => "Irix",
            Self::Sco => "SCO",
            Self::Dell => "Dell",
            Self::Ncr => "NCR",
            Self::LynxOs => "LynxOS",
            Self::VxWorks => "VxWorks",
            Self::Psos => "pSOS",
            Self::Qnx => "QNX",
            Self::UBoot => "U-Boot",
            Self::Rtems => "RTEMS",
            Self::Artos => "ARTOS",
            Self::Unity => "Unity OS",
            Self::Integrity => "INTEGRITY",
            Self::Unknown(_) => "Unknown OS",
        }
    }
}

impl core::fmt::Display for ImageOs {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "{} ({code})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
