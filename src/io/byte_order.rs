//! Byte order handling for TIFF files
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading and writing
//! TIFF data. The order is fixed once by the header and then applies to
//! every value decoded from, or encoded into, the file.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Result, Write};

use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the two marker bytes of a header
    ///
    /// Both bytes must be identical and either `I` (Intel, little-endian)
    /// or `M` (Motorola, big-endian).
    pub fn detect(marker: [u8; 2]) -> TiffResult<Self> {
        match marker {
            header::LITTLE_ENDIAN_MARKER => Ok(ByteOrder::LittleEndian),
            header::BIG_ENDIAN_MARKER => Ok(ByteOrder::BigEndian),
            _ => Err(TiffError::InvalidByteOrder(u16::from_be_bytes(marker))),
        }
    }

    /// Returns the two marker bytes written at the start of a header
    pub fn marker(&self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => header::LITTLE_ENDIAN_MARKER,
            ByteOrder::BigEndian => header::BIG_ENDIAN_MARKER,
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler: Send + Sync {
    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read an i16 value
    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Read an i32 value
    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32>;

    /// Read a u64 value
    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64>;

    /// Read an i64 value
    fn read_i64(&self, reader: &mut dyn SeekableReader) -> Result<i64>;

    /// Read an f32 value
    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32>;

    /// Read an f64 value
    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64>;

    /// Read a rational value (two u32 values as numerator/denominator)
    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = self.read_u32(reader)?;
        let denominator = self.read_u32(reader)?;
        Ok((numerator, denominator))
    }

    /// Read a signed rational value (two i32 values as numerator/denominator)
    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)> {
        let numerator = self.read_i32(reader)?;
        let denominator = self.read_i32(reader)?;
        Ok((numerator, denominator))
    }

    /// Write a u16 value
    fn write_u16(&self, writer: &mut dyn Write, value: u16) -> Result<()>;

    /// Write an i16 value
    fn write_i16(&self, writer: &mut dyn Write, value: i16) -> Result<()>;

    /// Write a u32 value
    fn write_u32(&self, writer: &mut dyn Write, value: u32) -> Result<()>;

    /// Write an i32 value
    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()>;

    /// Write a u64 value
    fn write_u64(&self, writer: &mut dyn Write, value: u64) -> Result<()>;

    /// Write an i64 value
    fn write_i64(&self, writer: &mut dyn Write, value: i64) -> Result<()>;

    /// Write an f32 value
    fn write_f32(&self, writer: &mut dyn Write, value: f32) -> Result<()>;

    /// Write an f64 value
    fn write_f64(&self, writer: &mut dyn Write, value: f64) -> Result<()>;
}

macro_rules! byte_order_handler {
    ($(#[$meta:meta])* $name:ident, $order:ty) => {
        $(#[$meta])*
        pub struct $name;

        impl ByteOrderHandler for $name {
            fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
                reader.read_u16::<$order>()
            }

            fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16> {
                reader.read_i16::<$order>()
            }

            fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
                reader.read_u32::<$order>()
            }

            fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
                reader.read_i32::<$order>()
            }

            fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
                reader.read_u64::<$order>()
            }

            fn read_i64(&self, reader: &mut dyn SeekableReader) -> Result<i64> {
                reader.read_i64::<$order>()
            }

            fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32> {
                reader.read_f32::<$order>()
            }

            fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
                reader.read_f64::<$order>()
            }

            fn write_u16(&self, writer: &mut dyn Write, value: u16) -> Result<()> {
                writer.write_u16::<$order>(value)
            }

            fn write_i16(&self, writer: &mut dyn Write, value: i16) -> Result<()> {
                writer.write_i16::<$order>(value)
            }

            fn write_u32(&self, writer: &mut dyn Write, value: u32) -> Result<()> {
                writer.write_u32::<$order>(value)
            }

            fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()> {
                writer.write_i32::<$order>(value)
            }

            fn write_u64(&self, writer: &mut dyn Write, value: u64) -> Result<()> {
                writer.write_u64::<$order>(value)
            }

            fn write_i64(&self, writer: &mut dyn Write, value: i64) -> Result<()> {
                writer.write_i64::<$order>(value)
            }

            fn write_f32(&self, writer: &mut dyn Write, value: f32) -> Result<()> {
                writer.write_f32::<$order>(value)
            }

            fn write_f64(&self, writer: &mut dyn Write, value: f64) -> Result<()> {
                writer.write_f64::<$order>(value)
            }
        }
    };
}

byte_order_handler!(
    /// Little-endian byte order handler
    LittleEndianHandler,
    LittleEndian
);

byte_order_handler!(
    /// Big-endian byte order handler
    BigEndianHandler,
    BigEndian
);
