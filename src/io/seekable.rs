//! Seekable reader trait
//!
//! Directory parsing walks a cursor through consecutive entries; this trait
//! names the combination of capabilities such a cursor needs.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
