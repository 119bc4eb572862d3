//! In-place patching of an existing file
//!
//! The lossless writer keeps every byte of the original file it does not
//! understand. It reads the original to find the ranges occupied by
//! directories, out-of-line values and image data, treats those ranges as
//! free space, and places the rewritten items into them. Bytes outside
//! those ranges (maker note internals, data referenced by unknown means)
//! stay where they were.

use log::{debug, info};
use std::collections::HashMap;
use std::io::Write;

use crate::io::byte_source::{ByteSource, ByteSourceArray};
use crate::tiff::contents::TiffContents;
use crate::tiff::directory::DirectoryType;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::header::{TiffHeader, TiffVariant};
use crate::tiff::reader::TiffReader;
use crate::tiff::write::lossy::LossyWriter;
use crate::tiff::write::output_item::ItemKind;
use crate::tiff::write::output_set::OutputSet;
use crate::tiff::write::placement::{self, GapFilling, Placement, Region};
use crate::tiff::write::prepare;

/// Frozen field values of the set, keyed by directory and tag
type FrozenValues = HashMap<(DirectoryType, u16), Vec<u8>>;

/// Writes an output set over the layout of the file it came from
#[derive(Debug, Clone)]
pub struct LosslessWriter {
    original: ByteSourceArray,
}

/// What a read of the original file found
struct Analysis {
    /// Reusable ranges, coalesced and sorted by offset
    regions: Vec<Region>,
    /// Original offsets of frozen values whose bytes did not change
    preserved: HashMap<(DirectoryType, u16), u64>,
}

impl LosslessWriter {
    /// Writer patching the given original file contents
    pub fn new(original: impl Into<Vec<u8>>) -> Self {
        LosslessWriter { original: ByteSourceArray::new(original) }
    }

    /// Writes the set
    ///
    /// The output keeps the original's byte order; the set is converted to
    /// it first.
    pub fn write(&self, set: &mut OutputSet, mut writer: impl Write) -> TiffResult<()> {
        let contents = TiffReader::new().read_contents(&self.original)?;
        let byte_order = contents.header.byte_order;
        set.set_byte_order(byte_order)?;

        if set.variant() != contents.header.variant {
            debug!("Converting {} to {}, rewriting sequentially", contents.header.variant, set.variant());
            return LossyWriter::new(byte_order).write(set, writer);
        }

        let frozen = Self::frozen_values(set);
        let analysis = Self::analyze(&contents, &frozen);
        if analysis.regions.is_empty() {
            return Err(TiffError::Format("Couldn't analyze old tiff data.".to_string()));
        }

        let mut prepared = prepare::prepare(set)?;
        let variant = prepared.variant;
        let original_length = self.original.len();
        let header_size = variant.header_size();
        let regions = placement::clip_regions(analysis.regions, header_size, original_length);

        if let [only] = regions.as_slice() {
            if only.offset == header_size && only.end() == original_length {
                debug!("Original file has no gaps, rewriting sequentially");
                return LossyWriter::new(byte_order).write(set, writer);
            }
        }

        for index in 0..prepared.items.len() {
            let ItemKind::Value { directory, field } = prepared.items[index].kind else {
                continue;
            };
            let output_directory = &set.directories()[directory];
            let output_field = &output_directory.fields()[field];
            if !output_field.is_frozen() {
                continue;
            }
            if let Some(&offset) = analysis.preserved.get(&(output_directory.directory_type, output_field.tag())) {
                debug!("Keeping frozen tag {} at {}", output_field.tag(), offset);
                let item = &mut prepared.items[index];
                item.offset = Some(offset);
                item.preserved = true;
            }
        }

        let length = GapFilling::new(regions.clone(), original_length).place(&mut prepared.items, variant)?;
        prepared.finalize(set.directories_mut())?;

        let buffer_length = usize::try_from(length)
            .map_err(|_| TiffError::Format(format!("Output of {} bytes does not fit in memory", length)))?;
        let mut output = vec![0u8; buffer_length];
        let original = self.original.as_slice();
        let copied = original.len().min(buffer_length);
        output[..copied].copy_from_slice(&original[..copied]);

        for region in &regions {
            let start = to_index(region.offset.min(length), variant)?;
            let end = to_index(region.end().min(length), variant)?;
            output[start..end].fill(0);
        }

        let mut header = Vec::with_capacity(header_size as usize);
        TiffHeader::new(byte_order, variant, prepared.root_offset()?).write(&mut header)?;
        Self::copy_into(&mut output, 0, &header, variant)?;

        let mut written = 0usize;
        for (index, item) in prepared.items.iter().enumerate() {
            if item.preserved {
                continue;
            }
            let offset = item.offset
                .ok_or_else(|| TiffError::Format(format!("{} was never placed", item.description())))?;
            let mut bytes = Vec::with_capacity(item.length as usize);
            prepared.write_item(index, set.directories(), &mut bytes)?;
            Self::copy_into(&mut output, offset, &bytes, variant)?;
            written += 1;
        }

        writer.write_all(&output)?;
        info!("Patched {} items into {} byte {} (original {} bytes)",
              written, length, variant, original_length);
        Ok(())
    }

    /// Writes the set into a new buffer
    pub fn write_to_vec(&self, set: &mut OutputSet) -> TiffResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write(set, &mut out)?;
        Ok(out)
    }

    fn frozen_values(set: &OutputSet) -> FrozenValues {
        set.directories()
            .iter()
            .flat_map(|directory| {
                directory.fields()
                    .iter()
                    .filter(|field| field.is_frozen())
                    .map(move |field| ((directory.directory_type, field.tag()), field.bytes().to_vec()))
            })
            .collect()
    }

    /// Collects every range of the original that the rewrite replaces
    fn analyze(contents: &TiffContents, frozen: &FrozenValues) -> Analysis {
        let mut elements = Vec::new();
        let mut preserved = HashMap::new();

        for directory in &contents.directories {
            if matches!(directory.directory_type, DirectoryType::MakerNotes | DirectoryType::Unknown) {
                continue;
            }
            elements.push(Region::new(directory.offset, directory.length()));

            for field in &directory.fields {
                let Some((offset, length)) = field.oversize_value_range() else {
                    continue;
                };
                let key = (directory.directory_type, field.tag);
                match frozen.get(&key) {
                    Some(bytes) if *bytes == field.bytes => {
                        preserved.insert(key, offset);
                    }
                    _ => elements.push(Region::new(offset, length)),
                }
            }

            if let Some(jpeg) = directory.jpeg_data() {
                elements.push(Region::new(jpeg.element.offset, jpeg.element.length));
            }
            if let Some(image_data) = directory.image_data() {
                elements.extend(image_data.elements().iter().map(|e| Region::new(e.offset, e.length)));
            }
        }

        let regions = placement::coalesce_regions(elements);
        debug!("Original file: {} reusable regions, {} preserved values", regions.len(), preserved.len());
        Analysis { regions, preserved }
    }

    fn copy_into(output: &mut [u8], offset: u64, bytes: &[u8], variant: TiffVariant) -> TiffResult<()> {
        let start = to_index(offset, variant)?;
        let target = start.checked_add(bytes.len())
            .and_then(|end| output.get_mut(start..end))
            .ok_or_else(|| TiffError::Format(format!(
                "Item of {} bytes at {} lies past the end of the output", bytes.len(), offset
            )))?;
        target.copy_from_slice(bytes);
        Ok(())
    }
}

/// Converts an output offset to a buffer index
pub(crate) fn to_index(offset: u64, variant: TiffVariant) -> TiffResult<usize> {
    usize::try_from(offset).map_err(|_| TiffError::OffsetRange { variant, offset: offset as u128 })
}
