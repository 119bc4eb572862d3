//! Write-side directories

use log::trace;
use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::tiff::directory::DirectoryType;
use crate::tiff::errors::TiffResult;
use crate::tiff::field_type::FieldValue;
use crate::tiff::header::TiffVariant;
use crate::tiff::tag_info::TagInfo;
use crate::tiff::tags;
use crate::tiff::write::output_field::OutputField;

/// Strip or tile blocks attached to an output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputImageData {
    Strips(Vec<Vec<u8>>),
    Tiles(Vec<Vec<u8>>),
}

impl OutputImageData {
    pub fn blocks(&self) -> &[Vec<u8>] {
        match self {
            OutputImageData::Strips(blocks) | OutputImageData::Tiles(blocks) => blocks,
        }
    }

    pub fn is_tiled(&self) -> bool {
        matches!(self, OutputImageData::Tiles(_))
    }

    /// Tags holding the block offsets and byte counts
    pub(crate) fn offset_tags(&self) -> (&'static TagInfo, &'static TagInfo) {
        match self {
            OutputImageData::Strips(_) => (&tags::STRIP_OFFSETS, &tags::STRIP_BYTE_COUNTS),
            OutputImageData::Tiles(_) => (&tags::TILE_OFFSETS, &tags::TILE_BYTE_COUNTS),
        }
    }
}

/// A directory to be written
///
/// Fields keep insertion order until the directory is prepared for
/// writing, when they are sorted by tag. Offset fields for image data,
/// JPEG streams and sub-directories are generated during preparation and
/// need not be added by hand.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    pub directory_type: DirectoryType,
    byte_order: ByteOrder,
    fields: Vec<OutputField>,
    image_data: Option<OutputImageData>,
    jpeg_data: Option<Vec<u8>>,
}

impl OutputDirectory {
    pub fn new(directory_type: DirectoryType, byte_order: ByteOrder) -> Self {
        OutputDirectory {
            directory_type,
            byte_order,
            fields: Vec::new(),
            image_data: None,
            jpeg_data: None,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Adds a value for a catalogued tag
    ///
    /// The value must be one of the types the tag accepts and, for tags
    /// with a fixed number of values, carry exactly that many.
    pub fn add(&mut self, tag: &TagInfo, value: impl Into<FieldValue>) -> TiffResult<()> {
        let value = value.into();
        tag.check_value(&value)?;
        trace!("Adding {} = {} to {} directory", tag.name, value, self.directory_type);
        let field = OutputField::from_value(tag.tag, &value, self.byte_order)?;
        self.fields.push(field);
        Ok(())
    }

    /// Adds a field as is, without consulting the tag catalog
    pub fn add_raw(&mut self, field: OutputField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[OutputField] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [OutputField] {
        &mut self.fields
    }

    /// First field with this tag
    pub fn find_field(&self, tag: u16) -> Option<&OutputField> {
        self.fields.iter().find(|f| f.tag() == tag)
    }

    pub fn find_field_mut(&mut self, tag: u16) -> Option<&mut OutputField> {
        self.fields.iter_mut().find(|f| f.tag() == tag)
    }

    /// Removes every field with this tag; returns true if any was present
    pub fn remove_field(&mut self, tag: u16) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.tag() != tag);
        self.fields.len() != before
    }

    /// Attaches strips; replaces any strips or tiles set before
    pub fn set_strips(&mut self, strips: Vec<Vec<u8>>) {
        self.image_data = Some(OutputImageData::Strips(strips));
    }

    /// Attaches tiles; replaces any strips or tiles set before
    pub fn set_tiles(&mut self, tiles: Vec<Vec<u8>>) {
        self.image_data = Some(OutputImageData::Tiles(tiles));
    }

    /// Attaches a JPEG interchange-format stream
    pub fn set_jpeg(&mut self, jpeg: Vec<u8>) {
        self.jpeg_data = Some(jpeg);
    }

    pub fn clear_image_data(&mut self) {
        self.image_data = None;
        self.jpeg_data = None;
    }

    pub fn image_data(&self) -> Option<&OutputImageData> {
        self.image_data.as_ref()
    }

    pub fn jpeg_data(&self) -> Option<&[u8]> {
        self.jpeg_data.as_deref()
    }

    /// Whether any field uses a type only BigTIFF can hold
    pub fn requires_big_tiff(&self) -> bool {
        self.fields.iter().any(|f| f.field_type().is_big_tiff_only())
    }

    /// On-disk length of the directory structure
    pub fn length(&self, variant: TiffVariant) -> u64 {
        variant.directory_length(self.fields.len() as u64)
    }

    /// Sorts fields by tag, keeping insertion order among equal tags
    pub(crate) fn sort_fields(&mut self) {
        self.fields.sort_by_key(|f| f.tag());
    }

    pub(crate) fn convert_byte_order(&mut self, byte_order: ByteOrder) -> TiffResult<()> {
        for field in &mut self.fields {
            field.convert_byte_order(self.byte_order, byte_order)?;
        }
        self.byte_order = byte_order;
        Ok(())
    }
}

impl fmt::Display for OutputDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} directory: {} fields", self.directory_type, self.fields.len())?;
        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }
        if let Some(image_data) = &self.image_data {
            let kind = if image_data.is_tiled() { "tiles" } else { "strips" };
            writeln!(f, "  {} {}", image_data.blocks().len(), kind)?;
        }
        if let Some(jpeg) = &self.jpeg_data {
            writeln!(f, "  JPEG: {} bytes", jpeg.len())?;
        }
        Ok(())
    }
}
