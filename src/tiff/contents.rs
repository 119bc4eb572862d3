//! Core TIFF data structures

use std::fmt;

use crate::tiff::directory::{Directory, DirectoryType};
use crate::tiff::field::Field;
use crate::tiff::header::TiffHeader;
use crate::tiff::tag_info::TagInfo;

/// Everything collected from one read of a TIFF file
#[derive(Debug, Clone)]
pub struct TiffContents {
    /// File header
    pub header: TiffHeader,
    /// Directories in the order they were completed
    pub directories: Vec<Directory>,
    /// Every field in the order it was read, across all directories
    pub fields: Vec<Field>,
}

impl TiffContents {
    /// Creates empty contents for a header
    pub fn new(header: TiffHeader) -> Self {
        TiffContents {
            header,
            directories: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Returns the root directory if available
    pub fn root(&self) -> Option<&Directory> {
        self.directory(DirectoryType::ROOT)
    }

    /// Returns the first directory of the given type
    pub fn directory(&self, directory_type: DirectoryType) -> Option<&Directory> {
        self.directories.iter().find(|d| d.directory_type == directory_type)
    }

    /// Returns the number of directories read
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Image directories in chain order (root first)
    pub fn image_directories(&self) -> Vec<&Directory> {
        self.directories.iter()
            .filter(|d| matches!(d.directory_type, DirectoryType::Image(_)))
            .collect()
    }

    /// Finds the first field with this tag in any directory
    pub fn find_field(&self, tag: &TagInfo) -> Option<&Field> {
        self.directories.iter().find_map(|d| d.find_field(tag))
    }

    /// Whether the file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.header.variant.is_big_tiff()
    }
}

impl fmt::Display for TiffContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File:")?;
        writeln!(f, "  Format: {}", self.header.variant)?;
        writeln!(f, "  Byte order: {}", self.header.byte_order.name())?;
        writeln!(f, "  Number of directories: {}", self.directories.len())?;

        for directory in &self.directories {
            write!(f, "{}", directory)?;
        }

        Ok(())
    }
}
