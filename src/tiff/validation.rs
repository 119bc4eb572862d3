//! TIFF validation utilities
//!
//! This module provides validation functions shared by the reader and the
//! writers: header sub-field checks on the way in, and offset range checks
//! on the way out.

use log::{debug, error};

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::header::TiffVariant;

/// Validates the BigTIFF header
///
/// In BigTIFF, after the version number (43) comes the offset size, which
/// must be 8, and a reserved value, which must be 0.
///
/// # Arguments
/// * `reader` - The seekable reader, positioned after the version number
/// * `byte_order_handler` - Handler for the file's byte order
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler,
) -> TiffResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let reserved = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}", offset_size);
    debug!("BigTIFF reserved: {}", reserved);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || reserved != 0 {
        error!("Invalid BigTIFF header: offset_size={}, reserved={}", offset_size, reserved);
        return Err(TiffError::InvalidBigTiffHeader { offset_size, reserved });
    }

    Ok(())
}

/// Checks that an offset is addressable by the given variant
///
/// # Returns
/// The offset unchanged, or an offset range error
pub fn checked_offset(offset: u64, variant: TiffVariant) -> TiffResult<u64> {
    if offset > variant.max_offset() {
        return Err(TiffError::OffsetRange { variant, offset: offset as u128 });
    }
    Ok(offset)
}

/// Advances an output offset by `length` bytes
///
/// Overflow past the variant's addressable range is reported rather than
/// wrapped or truncated.
pub fn advance_offset(offset: u64, length: u64, variant: TiffVariant) -> TiffResult<u64> {
    let next = offset as u128 + length as u128;
    if next > variant.max_offset() as u128 {
        return Err(TiffError::OffsetRange { variant, offset: next });
    }
    Ok(next as u64)
}
