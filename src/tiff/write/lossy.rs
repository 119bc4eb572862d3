//! Full sequential rewrite
//!
//! The lossy writer discards the layout of any file the set came from and
//! writes every item again, one after the other, behind the header:
//! structure first (directories, out-of-line values, JPEG streams), then
//! all strips and tiles.

use log::info;
use std::io::{BufWriter, Write};

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::TiffResult;
use crate::tiff::header::TiffHeader;
use crate::tiff::write::output_set::OutputSet;
use crate::tiff::write::placement::{Placement, Sequential};
use crate::tiff::write::prepare;
use crate::utils::write_utils;

/// Writes an output set as a fresh file
#[derive(Debug, Clone)]
pub struct LossyWriter {
    byte_order: ByteOrder,
    write_image_data: bool,
}

impl LossyWriter {
    /// Writer producing a file in the given byte order
    pub fn new(byte_order: ByteOrder) -> Self {
        LossyWriter { byte_order, write_image_data: true }
    }

    /// When false, only the structure is emitted
    ///
    /// Offsets still account for the image data, so the output ends where
    /// the first strip or tile would begin.
    pub fn write_image_data(mut self, write_image_data: bool) -> Self {
        self.write_image_data = write_image_data;
        self
    }

    /// Writes the set
    ///
    /// The set is converted to the writer's byte order and normalized for
    /// writing; afterwards its offset fields hold the values written.
    pub fn write(&self, set: &mut OutputSet, writer: impl Write) -> TiffResult<()> {
        set.set_byte_order(self.byte_order)?;
        let mut prepared = prepare::prepare(set)?;
        let length = Sequential.place(&mut prepared.items, prepared.variant)?;
        prepared.finalize(set.directories_mut())?;

        let header = TiffHeader::new(self.byte_order, prepared.variant, prepared.root_offset()?);
        let mut writer = BufWriter::new(writer);
        header.write(&mut writer)?;

        let mut skipped = 0usize;
        for (index, item) in prepared.items.iter().enumerate() {
            if item.is_image_data() && !self.write_image_data {
                skipped += 1;
                continue;
            }
            prepared.write_item(index, set.directories(), &mut writer)?;
            write_utils::write_padding(&mut writer, item.length)?;
        }
        writer.flush()?;

        info!("Wrote {} with {} items ({} bytes, {} image blocks skipped)",
              prepared.variant, prepared.items.len(), length, skipped);
        Ok(())
    }

    /// Writes the set into a new buffer
    pub fn write_to_vec(&self, set: &mut OutputSet) -> TiffResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write(set, &mut out)?;
        Ok(out)
    }
}
