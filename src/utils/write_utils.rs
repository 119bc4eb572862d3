//! TIFF writing utilities
//!
//! Helpers for the word alignment TIFF expects of every item it locates
//! by offset: directories, out-of-line values and image data all start on
//! an even byte.

use crate::tiff::errors::TiffResult;
use std::io::Write;

/// Number of padding bytes needed after `data_len` bytes to reach an even boundary
pub fn calculate_padding(data_len: u64) -> u64 {
    data_len & 1
}

/// Rounds an offset up to the next even boundary
pub fn align_to_word(offset: u64) -> u64 {
    offset + calculate_padding(offset)
}

/// Write padding bytes to align to an even boundary
///
/// After writing a block of `data_len` bytes, this adds the zero byte
/// needed so the next write starts on a word boundary.
pub fn write_padding(writer: &mut dyn Write, data_len: u64) -> TiffResult<()> {
    if calculate_padding(data_len) > 0 {
        writer.write_all(&[0u8])?;
    }
    Ok(())
}
