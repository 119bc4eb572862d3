//! TIFF file format module
//!
//! This module provides structures and functions for reading TIFF and
//! BigTIFF files into directories of typed fields, and for writing them
//! back out through the [`write`] module.

pub mod constants;
pub mod errors;
pub mod header;
pub mod field_type;
pub mod tag_info;
pub mod tags;
pub mod field;
pub mod directory;
pub mod contents;
pub mod reader;
pub mod write;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use contents::TiffContents;
pub use directory::{Directory, DirectoryType, ImageDataElement, JpegImageData, TiffImageData};
pub use errors::{TiffError, TiffResult};
pub use field::Field;
pub use field_type::{FieldType, FieldValue, Rational, SRational};
pub use header::{TiffHeader, TiffVariant};
pub use reader::{Listener, TiffReader, TiffReaderBuilder};
pub use tag_info::{TagGroup, TagInfo};
pub use write::{LosslessWriter, LossyWriter, OutputDirectory, OutputField, OutputImageData, OutputSet};
