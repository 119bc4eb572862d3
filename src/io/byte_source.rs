//! Random-access byte sources
//!
//! A TIFF file is not read front to back: directories, out-of-line values
//! and image data are scattered through the file and reached by offset.
//! [`ByteSource`] is the contract the reader works against. It exposes the
//! total length, block reads by absolute offset, and a sequential cursor
//! positioned at an offset. Two implementations are provided, one over an
//! in-memory buffer and one over a file on disk.

use log::trace;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};

/// Random-access source of TIFF bytes
pub trait ByteSource: Send + Sync {
    /// Total length of the source in bytes
    fn len(&self) -> u64;

    /// Reads `length` bytes starting at `offset`
    ///
    /// Fails with [`TiffError::IoBounds`] when the block extends past the
    /// end of the source.
    fn block(&self, offset: u64, length: u64) -> TiffResult<Vec<u8>>;

    /// Opens a sequential cursor positioned at `offset`
    ///
    /// Each call returns an independent cursor, dropped by the caller once
    /// it is done with it.
    fn cursor(&self, offset: u64) -> TiffResult<Box<dyn SeekableReader + '_>>;

    /// Short human-readable description used in log messages
    fn description(&self) -> String;

    /// Returns true if the source holds no bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks that `offset..offset+length` lies inside a source of `source_length` bytes
pub(crate) fn check_bounds(offset: u64, length: u64, source_length: u64) -> TiffResult<()> {
    match offset.checked_add(length) {
        Some(end) if end <= source_length => Ok(()),
        _ => Err(TiffError::IoBounds { offset, length, source_length }),
    }
}

/// Byte source backed by an in-memory buffer
#[derive(Debug, Clone)]
pub struct ByteSourceArray {
    bytes: Vec<u8>,
}

impl ByteSourceArray {
    /// Wraps a buffer
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        ByteSourceArray { bytes: bytes.into() }
    }

    /// Returns the underlying bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the source and returns its buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteSource for ByteSourceArray {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn block(&self, offset: u64, length: u64) -> TiffResult<Vec<u8>> {
        check_bounds(offset, length, self.len())?;
        let start = offset as usize;
        let end = start + length as usize;
        Ok(self.bytes[start..end].to_vec())
    }

    fn cursor(&self, offset: u64) -> TiffResult<Box<dyn SeekableReader + '_>> {
        let mut cursor = Cursor::new(self.bytes.as_slice());
        cursor.seek(SeekFrom::Start(offset))?;
        Ok(Box::new(cursor))
    }

    fn description(&self) -> String {
        format!("in-memory buffer ({} bytes)", self.bytes.len())
    }
}

/// Byte source backed by a file on disk
///
/// The file is opened anew for every block read and cursor, so no handle
/// outlives the call that needed it.
#[derive(Debug, Clone)]
pub struct ByteSourceFile {
    path: PathBuf,
    length: u64,
}

impl ByteSourceFile {
    /// Opens a file source, recording its current length
    pub fn new(path: impl AsRef<Path>) -> TiffResult<Self> {
        let path = path.as_ref().to_path_buf();
        let length = std::fs::metadata(&path)?.len();
        Ok(ByteSourceFile { path, length })
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for ByteSourceFile {
    fn len(&self) -> u64 {
        self.length
    }

    fn block(&self, offset: u64, length: u64) -> TiffResult<Vec<u8>> {
        check_bounds(offset, length, self.length)?;
        trace!("Reading {} bytes at offset {} from {}", length, offset, self.path.display());

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0u8; length as usize];
        file.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    fn cursor(&self, offset: u64) -> TiffResult<Box<dyn SeekableReader + '_>> {
        let file = File::open(&self.path)?;
        let mut reader = BufReader::with_capacity(64 * 1024, file);
        reader.seek(SeekFrom::Start(offset))?;
        Ok(Box::new(reader))
    }

    fn description(&self) -> String {
        self.path.display().to_string()
    }
}
