//! Image File Directory (IFD) structures and methods
//!
//! This module implements the read-side directory: an ordered collection of
//! fields plus the directory's position in the file, its link to the next
//! directory and, for image directories, a descriptor of where the strip,
//! tile or JPEG data lives. Typed accessors decode field values keyed by tag
//! descriptor.

use log::trace;
use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::io::byte_source::ByteSource;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::field_type::FromFieldValue;
use crate::tiff::header::TiffVariant;
use crate::tiff::tag_info::{TagGroup, TagInfo};
use crate::tiff::tags;

/// Logical role of a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryType {
    /// Image directory in the main chain; 0 is the root
    Image(u32),
    Exif,
    Gps,
    Interop,
    MakerNotes,
    Unknown,
}

impl DirectoryType {
    /// The first directory of the file
    pub const ROOT: DirectoryType = DirectoryType::Image(0);

    /// Numeric code: image directories count up from 0, the rest are negative
    pub fn code(&self) -> i64 {
        match self {
            DirectoryType::Image(n) => *n as i64,
            DirectoryType::Unknown => -1,
            DirectoryType::Exif => -2,
            DirectoryType::Gps => -3,
            DirectoryType::Interop => -4,
            DirectoryType::MakerNotes => -5,
        }
    }

    pub fn is_root(&self) -> bool {
        *self == DirectoryType::ROOT
    }

    /// Type given to the directory that follows this one in a chain
    pub fn next_sibling(&self) -> DirectoryType {
        match self {
            DirectoryType::Image(n) => DirectoryType::Image(n.saturating_add(1)),
            _ => DirectoryType::Unknown,
        }
    }

    /// Tag numbering space used by fields in this directory
    pub fn tag_group(&self) -> TagGroup {
        match self {
            DirectoryType::Exif => TagGroup::Exif,
            DirectoryType::Gps => TagGroup::Gps,
            DirectoryType::Interop => TagGroup::Interop,
            _ => TagGroup::Tiff,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> String {
        match self {
            DirectoryType::Image(0) => "Root".to_string(),
            DirectoryType::Image(n) => format!("Image {}", n),
            DirectoryType::Exif => "EXIF".to_string(),
            DirectoryType::Gps => "GPS".to_string(),
            DirectoryType::Interop => "Interoperability".to_string(),
            DirectoryType::MakerNotes => "Maker Notes".to_string(),
            DirectoryType::Unknown => "Unknown".to_string(),
        }
    }
}

impl fmt::Display for DirectoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A block of image data in the source: offset plus length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDataElement {
    pub offset: u64,
    pub length: u64,
}

impl ImageDataElement {
    pub fn new(offset: u64, length: u64) -> Self {
        ImageDataElement { offset, length }
    }

    /// Reads the block's bytes from the source
    pub fn read(&self, source: &dyn ByteSource) -> TiffResult<Vec<u8>> {
        source.block(self.offset, self.length)
    }
}

/// Strip or tile layout of a directory's image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TiffImageData {
    Strips {
        elements: Vec<ImageDataElement>,
        /// Explicit tag, else image height, else `u32::MAX`
        rows_per_strip: u64,
    },
    Tiles {
        elements: Vec<ImageDataElement>,
        tile_width: u64,
        tile_length: u64,
    },
}

impl TiffImageData {
    pub fn elements(&self) -> &[ImageDataElement] {
        match self {
            TiffImageData::Strips { elements, .. } => elements,
            TiffImageData::Tiles { elements, .. } => elements,
        }
    }

    pub fn is_tiled(&self) -> bool {
        matches!(self, TiffImageData::Tiles { .. })
    }

    /// Reads every block from the source
    pub fn read_all(&self, source: &dyn ByteSource) -> TiffResult<Vec<Vec<u8>>> {
        self.elements().iter().map(|e| e.read(source)).collect()
    }
}

/// JPEG interchange-format stream referenced by tags 513/514
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegImageData {
    pub element: ImageDataElement,
}

/// A directory parsed from a TIFF file
#[derive(Debug, Clone)]
pub struct Directory {
    /// Role of this directory
    pub directory_type: DirectoryType,
    /// Fields in entry order
    pub fields: Vec<Field>,
    /// Offset of the directory in the file
    pub offset: u64,
    /// Offset of the next directory in the chain, 0 if last
    pub next_directory_offset: u64,
    /// Number of entries on disk, including any that were dropped
    pub entry_count: u64,
    /// Variant of the file the directory was read from
    pub variant: TiffVariant,
    /// Byte order of the file the directory was read from
    pub byte_order: ByteOrder,
    pub(crate) image_data: Option<TiffImageData>,
    pub(crate) jpeg_data: Option<JpegImageData>,
}

impl Directory {
    /// On-disk length of the directory structure itself
    pub fn length(&self) -> u64 {
        self.variant.directory_length(self.entry_count)
    }

    /// Finds a field by descriptor
    pub fn find_field(&self, tag: &TagInfo) -> Option<&Field> {
        self.find_field_by_tag(tag.tag)
    }

    /// Finds a field by tag number
    pub fn find_field_by_tag(&self, tag: u16) -> Option<&Field> {
        let field = self.fields.iter().find(|f| f.tag == tag);
        trace!("Lookup of tag {} in {} directory: {}", tag, self.directory_type,
               if field.is_some() { "found" } else { "absent" });
        field
    }

    pub fn has_field(&self, tag: &TagInfo) -> bool {
        self.find_field(tag).is_some()
    }

    /// Values of a field as `T`
    ///
    /// When `must_exist` is false a missing or mistyped field yields
    /// `Ok(None)`; when true both are errors.
    pub fn values<T: FromFieldValue>(&self, tag: &TagInfo, must_exist: bool) -> TiffResult<Option<Vec<T>>> {
        let field = match self.find_field(tag) {
            Some(field) => field,
            None if must_exist => return Err(TiffError::MissingField(tag.name.to_string())),
            None => return Ok(None),
        };

        let mismatch = || TiffError::FieldTypeMismatch {
            name: tag.name.to_string(),
            found: field.field_type.name().to_string(),
        };

        if !tag.accepts(field.field_type) {
            return if must_exist { Err(mismatch()) } else { Ok(None) };
        }

        match T::from_field_value(field.value()?) {
            Some(values) => Ok(Some(values)),
            None if must_exist => Err(mismatch()),
            None => Ok(None),
        }
    }

    /// Required single value of a field as `T`
    pub fn value<T: FromFieldValue>(&self, tag: &TagInfo) -> TiffResult<T> {
        let mut values = self.values::<T>(tag, true)?
            .ok_or_else(|| TiffError::MissingField(tag.name.to_string()))?;
        if values.len() != 1 {
            return Err(TiffError::FieldCountMismatch {
                name: tag.name.to_string(),
                expected: "1".to_string(),
                found: values.len() as u64,
            });
        }
        Ok(values.remove(0))
    }

    /// Optional single value of a field as `T`
    pub fn find_value<T: FromFieldValue>(&self, tag: &TagInfo) -> TiffResult<Option<T>> {
        if self.find_field(tag).is_none() {
            return Ok(None);
        }
        self.value(tag).map(Some)
    }

    /// Required single ASCII string
    pub fn ascii(&self, tag: &TagInfo) -> TiffResult<String> {
        self.value::<String>(tag)
    }

    pub fn image_data(&self) -> Option<&TiffImageData> {
        self.image_data.as_ref()
    }

    pub fn jpeg_data(&self) -> Option<&JpegImageData> {
        self.jpeg_data.as_ref()
    }

    pub fn has_image_data(&self) -> bool {
        self.image_data.is_some()
    }

    pub fn has_jpeg_data(&self) -> bool {
        self.jpeg_data.is_some()
    }

    /// Returns true if the directory references strips or tiles
    pub(crate) fn has_strip_or_tile_tags(&self) -> bool {
        self.has_field(&tags::TILE_OFFSETS) || self.has_field(&tags::STRIP_OFFSETS)
    }

    /// Returns true if the image data is tiled rather than stripped
    pub(crate) fn image_data_in_tiles(&self) -> bool {
        self.has_field(&tags::TILE_OFFSETS)
    }

    pub(crate) fn has_jpeg_tags(&self) -> bool {
        self.has_field(&tags::JPEG_INTERCHANGE_FORMAT)
            && self.has_field(&tags::JPEG_INTERCHANGE_FORMAT_LENGTH)
    }

    /// Builds strip or tile elements from the offset and byte-count fields
    pub(crate) fn image_data_elements(&self) -> TiffResult<Vec<ImageDataElement>> {
        let (offsets_tag, counts_tag) = if self.image_data_in_tiles() {
            (&tags::TILE_OFFSETS, &tags::TILE_BYTE_COUNTS)
        } else {
            (&tags::STRIP_OFFSETS, &tags::STRIP_BYTE_COUNTS)
        };

        let offsets = self.integer_values(offsets_tag)?;
        let byte_counts = self.integer_values(counts_tag)?;

        if offsets.len() != byte_counts.len() {
            return Err(TiffError::Format(format!(
                "{} offsets but {} byte counts",
                offsets.len(),
                byte_counts.len()
            )));
        }

        Ok(offsets.into_iter()
            .zip(byte_counts)
            .map(|(offset, length)| ImageDataElement::new(offset, length))
            .collect())
    }

    /// Required field holding unsigned integers of any width
    fn integer_values(&self, tag: &TagInfo) -> TiffResult<Vec<u64>> {
        self.find_field(tag)
            .ok_or_else(|| TiffError::MissingField(tag.name.to_string()))?
            .int_values()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} directory (offset: {}, next: {})",
                 self.directory_type, self.offset, self.next_directory_offset)?;
        writeln!(f, "  Number of entries: {}", self.fields.len())?;

        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }

        match (&self.image_data, &self.jpeg_data) {
            (Some(TiffImageData::Strips { elements, rows_per_strip }), _) => {
                writeln!(f, "  Strips: {} (rows per strip: {})", elements.len(), rows_per_strip)?;
            }
            (Some(TiffImageData::Tiles { elements, tile_width, tile_length }), _) => {
                writeln!(f, "  Tiles: {} ({}x{})", elements.len(), tile_width, tile_length)?;
            }
            (None, Some(jpeg)) => {
                writeln!(f, "  JPEG: {} bytes at {}", jpeg.element.length, jpeg.element.offset)?;
            }
            (None, None) => {}
        }
        Ok(())
    }
}
