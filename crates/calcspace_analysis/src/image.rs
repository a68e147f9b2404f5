//! Container format detection by magic number.

use std::fmt;

const MH_MAGIC: u32 = 0xfeed_face;
const MH_CIGAM: u32 = 0xcefa_edfe;
const MH_MAGIC_64: u32 = 0xfeed_facf;
const MH_CIGAM_64: u32 = 0xcffa_edfe;
const FAT_MAGIC: u32 = 0xcafe_babe;
const FAT_CIGAM: u32 = 0xbeba_feca;
const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];
const MZ_MAGIC: [u8; 2] = *b"MZ";

/// The kind of executable image a buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// 32-bit Mach-O.
    MachO32,
    /// 64-bit Mach-O.
    MachO64,
    /// Universal (fat) Mach-O.
    Universal,
    /// ELF object.
    Elf,
    /// PE/COFF image.
    Pe,
    /// Anything else.
    Unknown,
}

impl ImageKind {
    /// Identifies the image kind from the leading bytes of `bytes`.
    #[must_use]
    pub fn probe(bytes: &[u8]) -> Self {
        if bytes.starts_with(&ELF_MAGIC) {
            return Self::Elf;
        }
        if bytes.starts_with(&MZ_MAGIC) {
            return Self::Pe;
        }
        let Some(head) = bytes.get(..4) else {
            return Self::Unknown;
        };
        let magic = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
        match magic {
            MH_MAGIC | MH_CIGAM => Self::MachO32,
            MH_MAGIC_64 | MH_CIGAM_64 => Self::MachO64,
            FAT_MAGIC | FAT_CIGAM => Self::Universal,
            _ => Self::Unknown,
        }
    }

    /// Returns true for any Mach-O flavor.
    #[must_use]
    pub const fn is_macho(self) -> bool {
        matches!(self, Self::MachO32 | Self::MachO64 | Self::Universal)
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MachO32 => "mach-o 32-bit",
            Self::MachO64 => "mach-o 64-bit",
            Self::Universal => "mach-o universal",
            Self::Elf => "elf",
            Self::Pe => "pe",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
