//! Shared preparation of an output set for writing
//!
//! Both writers run the same steps before placing anything:
//! 1. Drop offset and pointer fields left over from a parsed file or an
//!    earlier write
//! 2. Validate the directory hierarchy
//! 3. Regenerate placeholder offset fields for image data, JPEG streams and
//!    sub-directories, and sort every directory's fields by tag
//! 4. Enumerate every output item and record which fields must be
//!    backpatched once the items have offsets
//!
//! What differs between the writers is only how offsets are assigned.

use log::{debug, warn};
use std::collections::HashMap;
use std::io::Write;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::tags as t;
use crate::tiff::directory::DirectoryType;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field_type::{FieldType, FieldValue};
use crate::tiff::header::TiffVariant;
use crate::tiff::tag_info::TagInfo;
use crate::tiff::tags;
use crate::tiff::validation;
use crate::tiff::write::output_directory::OutputDirectory;
use crate::tiff::write::output_field::OutputField;
use crate::tiff::write::output_item::{ItemKind, OutputItem};
use crate::tiff::write::output_set::OutputSet;
use crate::tiff::write::summary::OffsetSummary;

/// Tags whose values are regenerated on every write
pub(crate) const REGENERATED_TAGS: [u16; 9] = [
    t::STRIP_OFFSETS,
    t::STRIP_BYTE_COUNTS,
    t::TILE_OFFSETS,
    t::TILE_BYTE_COUNTS,
    t::JPEG_INTERCHANGE_FORMAT,
    t::JPEG_INTERCHANGE_FORMAT_LENGTH,
    t::EXIF_OFFSET,
    t::GPS_INFO,
    t::INTEROP_OFFSET,
];

/// An output set ready for placement
#[derive(Debug)]
pub(crate) struct PreparedOutput {
    pub variant: TiffVariant,
    pub byte_order: ByteOrder,
    /// Structure items first, then every strip and tile
    pub items: Vec<OutputItem>,
    pub summary: OffsetSummary,
    /// Item index of each directory
    directory_items: Vec<usize>,
    /// Directory that follows each directory in the image chain
    next_directory: Vec<Option<usize>>,
    /// Item index of each out-of-line field value, keyed by (directory, field)
    value_items: HashMap<(usize, usize), usize>,
    root: usize,
}

/// Validates and normalizes the set, then enumerates its items
pub(crate) fn prepare(set: &mut OutputSet) -> TiffResult<PreparedOutput> {
    if set.directories().is_empty() {
        return Err(TiffError::Format("No directories.".to_string()));
    }

    for directory in set.directories_mut().iter_mut() {
        for tag in REGENERATED_TAGS {
            directory.remove_field(tag);
        }
    }

    let variant = set.variant();
    let byte_order = set.byte_order();
    validate_directories(set.directories())?;

    let directories = set.directories_mut();
    for directory in directories.iter_mut() {
        add_image_data_placeholders(directory, variant, byte_order)?;
    }
    add_pointer_placeholders(directories, variant);

    for directory in directories.iter_mut() {
        directory.sort_fields();
        warn_duplicate_tags(directory);
    }

    let prepared = build_items(directories.as_slice(), variant, byte_order)?;
    debug!("Prepared {} directories, {} items as {}", directories.len(), prepared.items.len(), variant);
    Ok(prepared)
}

fn validate_directories(directories: &[OutputDirectory]) -> TiffResult<()> {
    let mut image_indices = Vec::new();
    for (index, directory) in directories.iter().enumerate() {
        let directory_type = directory.directory_type;
        if directories[..index].iter().any(|d| d.directory_type == directory_type) {
            return Err(TiffError::Format(format!("More than one {} directory", directory_type)));
        }
        match directory_type {
            DirectoryType::Image(n) => image_indices.push(n),
            DirectoryType::MakerNotes | DirectoryType::Unknown => {
                return Err(TiffError::Format(format!("Cannot write a {} directory", directory_type)));
            }
            _ => {}
        }
    }

    image_indices.sort_unstable();
    for (expected, found) in image_indices.iter().enumerate() {
        if *found != expected as u32 {
            return Err(TiffError::Format(format!("Missing directory: {}", expected)));
        }
    }
    if image_indices.is_empty() {
        return Err(TiffError::Format("Missing root directory.".to_string()));
    }

    let has = |kind: DirectoryType| directories.iter().any(|d| d.directory_type == kind);
    if (has(DirectoryType::Gps) || has(DirectoryType::Interop)) && !has(DirectoryType::Exif) {
        return Err(TiffError::Format(
            "GPS and Interoperability directories require an EXIF directory".to_string(),
        ));
    }
    Ok(())
}

/// Integer type used for offsets and byte counts in this variant
fn offset_type(variant: TiffVariant) -> FieldType {
    match variant {
        TiffVariant::Classic => FieldType::Long,
        TiffVariant::BigTiff => FieldType::Long8,
    }
}

fn length_value(lengths: Vec<u64>, variant: TiffVariant) -> TiffResult<FieldValue> {
    match variant {
        TiffVariant::BigTiff => Ok(FieldValue::Long8(lengths)),
        TiffVariant::Classic => {
            let narrow = lengths.into_iter()
                .map(|length| validation::checked_offset(length, variant).map(|l| l as u32))
                .collect::<TiffResult<Vec<u32>>>()?;
            Ok(FieldValue::Long(narrow))
        }
    }
}

fn add_image_data_placeholders(
    directory: &mut OutputDirectory,
    variant: TiffVariant,
    byte_order: ByteOrder,
) -> TiffResult<()> {
    let mut generated = Vec::new();

    if let Some(image_data) = directory.image_data() {
        let (offsets_tag, counts_tag) = image_data.offset_tags();
        let blocks = image_data.blocks();
        let lengths = blocks.iter().map(|b| b.len() as u64).collect();

        generated.push(OutputField::placeholder(offsets_tag.tag, offset_type(variant), blocks.len() as u64));
        generated.push(OutputField::from_value(counts_tag.tag, &length_value(lengths, variant)?, byte_order)?);
    }

    if let Some(jpeg) = directory.jpeg_data() {
        let length = length_value(vec![jpeg.len() as u64], variant)?;
        generated.push(OutputField::placeholder(t::JPEG_INTERCHANGE_FORMAT, offset_type(variant), 1));
        generated.push(OutputField::from_value(t::JPEG_INTERCHANGE_FORMAT_LENGTH, &length, byte_order)?);
    }

    for field in generated {
        directory.add_raw(field);
    }
    Ok(())
}

/// Pointer fields linking the root to EXIF and GPS, and EXIF to Interoperability
static POINTERS: [(DirectoryType, &TagInfo, DirectoryType); 3] = [
    (DirectoryType::ROOT, &tags::EXIF_OFFSET, DirectoryType::Exif),
    (DirectoryType::ROOT, &tags::GPS_INFO, DirectoryType::Gps),
    (DirectoryType::Exif, &tags::INTEROP_OFFSET, DirectoryType::Interop),
];

fn add_pointer_placeholders(directories: &mut [OutputDirectory], variant: TiffVariant) {
    for &(parent, tag, child) in POINTERS.iter() {
        if !directories.iter().any(|d| d.directory_type == child) {
            continue;
        }
        if let Some(parent) = directories.iter_mut().find(|d| d.directory_type == parent) {
            parent.add_raw(OutputField::placeholder(tag.tag, offset_type(variant), 1));
        }
    }
}

fn warn_duplicate_tags(directory: &OutputDirectory) {
    for pair in directory.fields().windows(2) {
        if pair[0].tag() == pair[1].tag() {
            warn!("{} directory holds tag {} more than once", directory.directory_type, pair[0].tag());
        }
    }
}

fn position_of(directories: &[OutputDirectory], directory_type: DirectoryType) -> Option<usize> {
    directories.iter().position(|d| d.directory_type == directory_type)
}

fn build_items(
    directories: &[OutputDirectory],
    variant: TiffVariant,
    byte_order: ByteOrder,
) -> TiffResult<PreparedOutput> {
    let mut items = Vec::new();
    let mut blocks = Vec::new();
    let mut directory_items = vec![0; directories.len()];
    let mut value_items = HashMap::new();
    let mut jpeg_items = HashMap::new();

    // Structure items follow directory code order
    let mut order: Vec<usize> = (0..directories.len()).collect();
    order.sort_by_key(|&d| directories[d].directory_type.code());

    for d in order {
        let directory = &directories[d];
        directory_items[d] = items.len();
        items.push(OutputItem::new(ItemKind::Directory { directory: d }, directory.length(variant)));

        for (f, field) in directory.fields().iter().enumerate() {
            if !field.is_inline(variant) {
                value_items.insert((d, f), items.len());
                items.push(OutputItem::new(ItemKind::Value { directory: d, field: f }, field.value_length()));
            }
        }

        if let Some(image_data) = directory.image_data() {
            for (b, block) in image_data.blocks().iter().enumerate() {
                blocks.push(OutputItem::new(ItemKind::ImageBlock { directory: d, block: b }, block.len() as u64));
            }
        }

        if let Some(jpeg) = directory.jpeg_data() {
            jpeg_items.insert(d, items.len());
            items.push(OutputItem::new(ItemKind::Jpeg { directory: d }, jpeg.len() as u64));
        }
    }

    let first_block = items.len();
    items.extend(blocks);

    let mut summary = OffsetSummary::new();
    let field_index = |d: usize, tag: u16| directories[d].fields().iter().position(|f| f.tag() == tag);

    for &(parent, tag, child) in POINTERS.iter() {
        let (Some(p), Some(c)) = (position_of(directories, parent), position_of(directories, child)) else {
            continue;
        };
        if let Some(f) = field_index(p, tag.tag) {
            summary.add_pointer(directory_items[c], p, f);
        }
    }

    for (d, directory) in directories.iter().enumerate() {
        if let Some(image_data) = directory.image_data() {
            let (offsets_tag, _) = image_data.offset_tags();
            let block_items = (first_block..items.len())
                .filter(|&i| matches!(items[i].kind, ItemKind::ImageBlock { directory: owner, .. } if owner == d))
                .collect();
            if let Some(f) = field_index(d, offsets_tag.tag) {
                summary.add_image_data(block_items, d, f);
            }
        }
        if let (Some(&item), Some(f)) = (jpeg_items.get(&d), field_index(d, t::JPEG_INTERCHANGE_FORMAT)) {
            summary.add_pointer(item, d, f);
        }
    }

    let next_directory = directories.iter()
        .map(|d| match d.directory_type {
            DirectoryType::Image(_) => position_of(directories, d.directory_type.next_sibling()),
            _ => None,
        })
        .collect();

    let root = position_of(directories, DirectoryType::ROOT)
        .ok_or_else(|| TiffError::Format("Missing root directory.".to_string()))?;

    Ok(PreparedOutput {
        variant,
        byte_order,
        items,
        summary,
        directory_items,
        next_directory,
        value_items,
        root,
    })
}

impl PreparedOutput {
    /// Offset of the root directory, once placed
    pub fn root_offset(&self) -> TiffResult<u64> {
        self.directory_offset(self.root)
    }

    fn directory_offset(&self, directory: usize) -> TiffResult<u64> {
        self.items[self.directory_items[directory]].offset
            .ok_or_else(|| TiffError::Format("Directory was never placed".to_string()))
    }

    /// Item holding the out-of-line value of a field, if it has one
    pub fn value_item(&self, directory: usize, field: usize) -> Option<usize> {
        self.value_items.get(&(directory, field)).copied()
    }

    /// Backpatches every offset field; lengths are unchanged
    pub fn finalize(&self, directories: &mut [OutputDirectory]) -> TiffResult<()> {
        self.summary.update_offsets(&self.items, directories, self.byte_order)
    }

    /// Serializes one item, without padding
    pub fn write_item(
        &self,
        index: usize,
        directories: &[OutputDirectory],
        writer: &mut dyn Write,
    ) -> TiffResult<()> {
        match self.items[index].kind {
            ItemKind::Directory { directory } => self.write_directory(directory, directories, writer)?,
            ItemKind::Value { directory, field } => {
                writer.write_all(directories[directory].fields()[field].bytes())?;
            }
            ItemKind::ImageBlock { directory, block } => {
                let image_data = directories[directory].image_data()
                    .ok_or_else(|| TiffError::Format("Image data was removed after preparation".to_string()))?;
                writer.write_all(&image_data.blocks()[block])?;
            }
            ItemKind::Jpeg { directory } => {
                let jpeg = directories[directory].jpeg_data()
                    .ok_or_else(|| TiffError::Format("JPEG data was removed after preparation".to_string()))?;
                writer.write_all(jpeg)?;
            }
        }
        Ok(())
    }

    fn write_directory(
        &self,
        index: usize,
        directories: &[OutputDirectory],
        writer: &mut dyn Write,
    ) -> TiffResult<()> {
        let handler = self.byte_order.create_handler();
        let directory = &directories[index];
        let fields = directory.fields();

        match self.variant {
            TiffVariant::Classic => {
                let count = u16::try_from(fields.len()).map_err(|_| {
                    TiffError::Format(format!("{} directory has too many fields: {}",
                                              directory.directory_type, fields.len()))
                })?;
                handler.write_u16(writer, count)?;
            }
            TiffVariant::BigTiff => handler.write_u64(writer, fields.len() as u64)?,
        }

        for (f, field) in fields.iter().enumerate() {
            let value_offset = self.value_item(index, f).and_then(|item| self.items[item].offset);
            field.write_entry(writer, handler.as_ref(), self.variant, value_offset)?;
        }

        let next = match self.next_directory[index] {
            Some(next) => self.directory_offset(next)?,
            None => 0,
        };
        match self.variant {
            TiffVariant::Classic => {
                let next = validation::checked_offset(next, self.variant)?;
                handler.write_u32(writer, next as u32)?;
            }
            TiffVariant::BigTiff => handler.write_u64(writer, next)?,
        }
        Ok(())
    }
}
