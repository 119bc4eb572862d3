//! TIFF header and format variant
//!
//! The header fixes the byte order and the format variant for the whole
//! file. Classic TIFF addresses everything with 32-bit offsets; BigTIFF
//! widens offsets, counts and inline value slots to 64 bits.

use log::debug;
use std::fmt;
use std::io::{Read, Write};

use crate::io::byte_order::ByteOrder;
use crate::io::byte_source::ByteSource;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{directory, header};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::validation;

/// Format variant of a TIFF container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TiffVariant {
    /// Classic TIFF (version 42), 32-bit offsets
    #[default]
    Classic,
    /// BigTIFF (version 43), 64-bit offsets
    BigTiff,
}

impl TiffVariant {
    /// Version discriminator written after the byte order marker
    pub fn version(&self) -> u16 {
        match self {
            TiffVariant::Classic => header::TIFF_VERSION,
            TiffVariant::BigTiff => header::BIG_TIFF_VERSION,
        }
    }

    /// Size of the file header
    pub fn header_size(&self) -> u64 {
        match self {
            TiffVariant::Classic => header::TIFF_HEADER_SIZE,
            TiffVariant::BigTiff => header::BIG_TIFF_HEADER_SIZE,
        }
    }

    /// Width of offsets, entry counts and the next-directory pointer
    pub fn offset_size(&self) -> u64 {
        match self {
            TiffVariant::Classic => 4,
            TiffVariant::BigTiff => 8,
        }
    }

    /// Width of the entry count at the start of a directory
    pub fn entry_count_size(&self) -> u64 {
        match self {
            TiffVariant::Classic => 2,
            TiffVariant::BigTiff => 8,
        }
    }

    /// Width of a single directory entry
    pub fn entry_length(&self) -> u64 {
        match self {
            TiffVariant::Classic => directory::TIFF_ENTRY_LENGTH,
            TiffVariant::BigTiff => directory::BIG_TIFF_ENTRY_LENGTH,
        }
    }

    /// Largest value that fits inline in a directory entry
    pub fn slot_length(&self) -> usize {
        match self {
            TiffVariant::Classic => directory::TIFF_SLOT_LENGTH,
            TiffVariant::BigTiff => directory::BIG_TIFF_SLOT_LENGTH,
        }
    }

    /// Largest offset this variant can address
    pub fn max_offset(&self) -> u64 {
        match self {
            TiffVariant::Classic => u32::MAX as u64,
            TiffVariant::BigTiff => u64::MAX,
        }
    }

    /// Total on-disk length of a directory holding `entries` entries
    pub fn directory_length(&self, entries: u64) -> u64 {
        self.entry_count_size() + entries * self.entry_length() + self.offset_size()
    }

    /// Returns true for BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        matches!(self, TiffVariant::BigTiff)
    }
}

impl fmt::Display for TiffVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffVariant::Classic => write!(f, "TIFF"),
            TiffVariant::BigTiff => write!(f, "BigTIFF"),
        }
    }
}

/// Parsed file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order of every multi-byte value in the file
    pub byte_order: ByteOrder,
    /// Classic or BigTIFF
    pub variant: TiffVariant,
    /// Offset of the root directory
    pub first_directory_offset: u64,
}

impl TiffHeader {
    /// Creates a header
    pub fn new(byte_order: ByteOrder, variant: TiffVariant, first_directory_offset: u64) -> Self {
        TiffHeader { byte_order, variant, first_directory_offset }
    }

    /// Reads and validates the header at the start of a byte source
    pub fn read(source: &dyn ByteSource) -> TiffResult<Self> {
        let mut cursor = source.cursor(0)?;
        Self::read_from(cursor.as_mut())
    }

    /// Reads and validates a header from a cursor positioned at offset 0
    pub fn read_from(reader: &mut dyn SeekableReader) -> TiffResult<Self> {
        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker)?;
        let byte_order = ByteOrder::detect(marker)?;
        let handler = byte_order.create_handler();

        let version = handler.read_u16(reader)?;
        debug!("TIFF byte order: {}, version: {}", byte_order.name(), version);

        match version {
            header::TIFF_VERSION => {
                let offset = handler.read_u32(reader)? as u64;
                Ok(TiffHeader::new(byte_order, TiffVariant::Classic, offset))
            }
            header::BIG_TIFF_VERSION => {
                validation::validate_bigtiff_header(reader, handler.as_ref())?;
                let offset = handler.read_u64(reader)?;
                Ok(TiffHeader::new(byte_order, TiffVariant::BigTiff, offset))
            }
            other => Err(TiffError::UnsupportedVersion(other)),
        }
    }

    /// Serializes the header
    pub fn write(&self, writer: &mut dyn Write) -> TiffResult<()> {
        let handler = self.byte_order.create_handler();
        writer.write_all(&self.byte_order.marker())?;
        handler.write_u16(writer, self.variant.version())?;

        match self.variant {
            TiffVariant::Classic => {
                let offset = validation::checked_offset(self.first_directory_offset, self.variant)?;
                handler.write_u32(writer, offset as u32)?;
            }
            TiffVariant::BigTiff => {
                handler.write_u16(writer, header::BIGTIFF_OFFSET_SIZE)?;
                handler.write_u16(writer, 0)?;
                handler.write_u64(writer, self.first_directory_offset)?;
            }
        }
        Ok(())
    }
}
