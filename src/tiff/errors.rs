//! Custom error types for TIFF processing
//!
//! Errors fall into four categories. Format errors describe a malformed or
//! unsupported container and are always fatal. Bounds errors are fatal only
//! when reading strictly; a lenient read drops the offending field instead.
//! Unsupported field types are always tolerated by the reader. Offset range
//! errors come from the writers and are always fatal.

use std::io;
use thiserror::Error;

use crate::tiff::header::TiffVariant;

/// TIFF-specific error types
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TiffError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid byte order marker
    #[error("Invalid byte order marker: {0:#06x}")]
    InvalidByteOrder(u16),

    /// Unsupported TIFF version
    #[error("Unsupported TIFF version: {0}")]
    UnsupportedVersion(u16),

    /// BigTIFF sub-header does not declare 8-byte offsets and a zero reserved field
    #[error("Invalid BigTIFF header: offset size {offset_size}, reserved {reserved}")]
    InvalidBigTiffHeader { offset_size: u16, reserved: u16 },

    /// Required field is absent
    #[error("Required field \"{0}\" is missing")]
    MissingField(String),

    /// Field exists but carries a type the tag does not accept
    #[error("Required field \"{name}\" has incorrect type {found}")]
    FieldTypeMismatch { name: String, found: String },

    /// Field exists but carries the wrong number of values
    #[error("Field \"{name}\" has wrong count {found} (expected {expected})")]
    FieldCountMismatch { name: String, expected: String, found: u64 },

    /// Any other malformed or inconsistent structure
    #[error("Format error: {0}")]
    Format(String),

    /// Declared offset/length lies outside the byte source
    #[error("Attempted read of {length} bytes at offset {offset} past end of source ({source_length} bytes)")]
    IoBounds { offset: u64, length: u64, source_length: u64 },

    /// Unsupported field type
    #[error("Unsupported field type: {0}")]
    UnsupportedFieldType(u16),

    /// Computed output offset does not fit the active variant
    #[error("Offset {offset} exceeds the addressable range of {variant}")]
    OffsetRange { variant: TiffVariant, offset: u128 },
}

impl TiffError {
    /// Returns true for errors describing a malformed or unsupported container
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            TiffError::InvalidByteOrder(_)
                | TiffError::UnsupportedVersion(_)
                | TiffError::InvalidBigTiffHeader { .. }
                | TiffError::MissingField(_)
                | TiffError::FieldTypeMismatch { .. }
                | TiffError::FieldCountMismatch { .. }
                | TiffError::Format(_)
        )
    }

    /// Returns true for errors caused by an offset/length outside the source
    pub fn is_bounds_error(&self) -> bool {
        match self {
            TiffError::IoBounds { .. } => true,
            TiffError::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::Format(msg)
    }
}
