//! Write-side fields
//!
//! An [`OutputField`] holds a tag, its declared type and count, and the
//! encoded value bytes in the byte order of the set it belongs to. Whether
//! the value is written inline in the directory entry or as a separate item
//! is decided only when the directory is emitted, because that depends on
//! the format variant.

use std::fmt;
use std::io::Write;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::field_type::{FieldType, FieldValue};
use crate::tiff::header::TiffVariant;
use crate::tiff::validation;

/// A field to be written
#[derive(Debug, Clone, PartialEq)]
pub struct OutputField {
    tag: u16,
    field_type: FieldType,
    count: u64,
    bytes: Vec<u8>,
    frozen: bool,
}

impl OutputField {
    /// Creates a field from already encoded bytes
    ///
    /// Fails unless `bytes` is exactly `count` elements of `field_type`.
    pub fn new(tag: u16, field_type: FieldType, count: u64, bytes: Vec<u8>) -> TiffResult<Self> {
        let expected = count.checked_mul(field_type.size());
        if expected != Some(bytes.len() as u64) {
            return Err(TiffError::Format(format!(
                "Tag {} declares {} {} values but holds {} bytes",
                tag, count, field_type.name(), bytes.len()
            )));
        }
        Ok(OutputField { tag, field_type, count, bytes, frozen: false })
    }

    /// Encodes a value
    pub fn from_value(tag: u16, value: &FieldValue, byte_order: ByteOrder) -> TiffResult<Self> {
        let bytes = value.encode(byte_order)?;
        Self::new(tag, value.field_type(), value.count(), bytes)
    }

    /// Copies a parsed field, re-encoding its value if the byte order differs
    pub fn from_field(field: &Field, byte_order: ByteOrder) -> TiffResult<Self> {
        if field.byte_order == byte_order {
            return Self::new(field.tag, field.field_type, field.count, field.bytes.clone());
        }
        Self::from_value(field.tag, &field.value()?, byte_order)
    }

    /// Zero-filled field whose value is filled in after placement
    pub(crate) fn placeholder(tag: u16, field_type: FieldType, count: u64) -> Self {
        let length = (count * field_type.size()) as usize;
        OutputField { tag, field_type, count, bytes: vec![0; length], frozen: false }
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Encoded value bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn value_length(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Decodes the value bytes
    pub fn value(&self, byte_order: ByteOrder) -> TiffResult<FieldValue> {
        self.field_type.decode(&self.bytes, byte_order)
    }

    /// Replaces the value bytes without changing their length
    pub fn set_data(&mut self, bytes: Vec<u8>) -> TiffResult<()> {
        if bytes.len() != self.bytes.len() {
            return Err(TiffError::Format(format!(
                "Cannot change size of value ({} -> {} bytes) of tag {}",
                self.bytes.len(), bytes.len(), self.tag
            )));
        }
        self.bytes = bytes;
        Ok(())
    }

    /// Re-encodes the value bytes from one byte order into another
    pub(crate) fn convert_byte_order(&mut self, from: ByteOrder, to: ByteOrder) -> TiffResult<()> {
        if from == to || self.field_type.size() == 1 {
            return Ok(());
        }
        let bytes = self.value(from)?.encode(to)?;
        self.set_data(bytes)
    }

    /// Pins the value to its current file offset across a lossless rewrite
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Whether the value fits the inline slot of a directory entry
    pub fn is_inline(&self, variant: TiffVariant) -> bool {
        self.bytes.len() <= variant.slot_length()
    }

    /// Writes the directory entry
    ///
    /// `value_offset` is where the out-of-line value was placed; it is
    /// ignored for inline values.
    pub(crate) fn write_entry(
        &self,
        writer: &mut dyn Write,
        handler: &dyn ByteOrderHandler,
        variant: TiffVariant,
        value_offset: Option<u64>,
    ) -> TiffResult<()> {
        handler.write_u16(writer, self.tag)?;
        handler.write_u16(writer, self.field_type.code())?;

        match variant {
            TiffVariant::Classic => {
                let count = u32::try_from(self.count).map_err(|_| {
                    TiffError::Format(format!("Count {} of tag {} does not fit a {} entry",
                                              self.count, self.tag, variant))
                })?;
                handler.write_u32(writer, count)?;
            }
            TiffVariant::BigTiff => handler.write_u64(writer, self.count)?,
        }

        if self.is_inline(variant) {
            let mut slot = vec![0u8; variant.slot_length()];
            slot[..self.bytes.len()].copy_from_slice(&self.bytes);
            writer.write_all(&slot)?;
            return Ok(());
        }

        let offset = value_offset.ok_or_else(|| {
            TiffError::Format(format!("Value of tag {} was never placed", self.tag))
        })?;
        match variant {
            TiffVariant::Classic => {
                let offset = validation::checked_offset(offset, variant)?;
                handler.write_u32(writer, offset as u32)?;
            }
            TiffVariant::BigTiff => handler.write_u64(writer, offset)?,
        }
        Ok(())
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, count {}, {} bytes]{}",
               self.tag, self.field_type.name(), self.count, self.bytes.len(),
               if self.frozen { " frozen" } else { "" })
    }
}
