//! Offset backpatching
//!
//! Fields that point at other output items hold placeholder bytes until
//! placement is done. The summary records each (field, item) dependency
//! when the items are built and resolves all of them in one pass
//! afterwards, re-encoding the field at the width of its type.

use log::trace;

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field_type::{FieldType, FieldValue};
use crate::tiff::header::TiffVariant;
use crate::tiff::write::output_directory::OutputDirectory;
use crate::tiff::write::output_item::OutputItem;

/// A field whose value depends on where items were placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OffsetReference {
    /// Single offset of a directory or JPEG stream
    Pointer { item: usize, directory: usize, field: usize },
    /// Strip or tile offsets, one per block, updated as a single array
    ImageDataOffsets { items: Vec<usize>, directory: usize, field: usize },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct OffsetSummary {
    references: Vec<OffsetReference>,
}

impl OffsetSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pointer(&mut self, item: usize, directory: usize, field: usize) {
        self.references.push(OffsetReference::Pointer { item, directory, field });
    }

    pub fn add_image_data(&mut self, items: Vec<usize>, directory: usize, field: usize) {
        self.references.push(OffsetReference::ImageDataOffsets { items, directory, field });
    }

    /// Writes the resolved offsets into the referring fields
    pub fn update_offsets(
        &self,
        items: &[OutputItem],
        directories: &mut [OutputDirectory],
        byte_order: ByteOrder,
    ) -> TiffResult<()> {
        for reference in &self.references {
            let (offsets, directory, field) = match reference {
                OffsetReference::Pointer { item, directory, field } => {
                    (vec![placed_offset(items, *item)?], *directory, *field)
                }
                OffsetReference::ImageDataOffsets { items: blocks, directory, field } => {
                    let offsets = blocks.iter()
                        .map(|item| placed_offset(items, *item))
                        .collect::<TiffResult<Vec<u64>>>()?;
                    (offsets, *directory, *field)
                }
            };

            let target = &mut directories[directory].fields_mut()[field];
            trace!("Backpatching tag {} with {} offsets", target.tag(), offsets.len());
            let value = offset_value(target.field_type(), offsets)?;
            target.set_data(value.encode(byte_order)?)?;
        }
        Ok(())
    }
}

fn placed_offset(items: &[OutputItem], index: usize) -> TiffResult<u64> {
    let item = &items[index];
    item.offset.ok_or_else(|| {
        TiffError::Format(format!("Referenced {} was never placed", item.description()))
    })
}

/// Encodes offsets at the width of the placeholder's type
fn offset_value(field_type: FieldType, offsets: Vec<u64>) -> TiffResult<FieldValue> {
    match field_type {
        FieldType::Long => {
            let narrow = offsets.into_iter()
                .map(|offset| {
                    u32::try_from(offset).map_err(|_| TiffError::OffsetRange {
                        variant: TiffVariant::Classic,
                        offset: offset as u128,
                    })
                })
                .collect::<TiffResult<Vec<u32>>>()?;
            Ok(FieldValue::Long(narrow))
        }
        FieldType::Long8 => Ok(FieldValue::Long8(offsets)),
        other => Err(TiffError::Format(format!("Offsets cannot be stored as {}", other))),
    }
}
