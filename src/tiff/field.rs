//! Directory fields
//!
//! A [`Field`] is one decoded directory entry: tag, type, count and the raw
//! value bytes in the file's byte order. Values that did not fit the
//! entry's inline slot were fetched from their absolute offset when the
//! directory was parsed, so a field never needs the source again.

use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::tiff::directory::DirectoryType;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field_type::{FieldType, FieldValue};
use crate::tiff::tag_info::TagInfo;

/// A field parsed from a directory entry
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// TIFF tag identifier
    pub tag: u16,
    /// Directory the field was read from
    pub directory_type: DirectoryType,
    /// Declared field type
    pub field_type: FieldType,
    /// Number of values
    pub count: u64,
    /// Absolute offset of the value bytes, or of the inline slot
    pub offset: u64,
    /// Whether the value was stored inline in the entry
    pub inline: bool,
    /// Byte order the value bytes are encoded in
    pub byte_order: ByteOrder,
    /// Raw value bytes, `count * field_type.size()` long
    pub bytes: Vec<u8>,
    /// Position of the entry within its directory
    pub sort_hint: usize,
}

impl Field {
    /// Decodes the value bytes
    pub fn value(&self) -> TiffResult<FieldValue> {
        self.field_type.decode(&self.bytes, self.byte_order)
    }

    /// Catalog descriptor for this tag, if known
    pub fn tag_info(&self) -> Option<&'static TagInfo> {
        TagInfo::lookup(self.directory_type.tag_group(), self.tag)
    }

    /// Name of the tag, or `Unknown (n)`
    pub fn tag_name(&self) -> String {
        TagInfo::name_of(self.directory_type.tag_group(), self.tag)
    }

    /// Length of the value in bytes
    pub fn value_length(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Offset and length of an out-of-line value, if the value was not inline
    pub fn oversize_value_range(&self) -> Option<(u64, u64)> {
        if self.inline {
            None
        } else {
            Some((self.offset, self.value_length()))
        }
    }

    /// Every value widened to u64; fails for non-integer types
    pub fn int_values(&self) -> TiffResult<Vec<u64>> {
        self.value()?.as_u64s().ok_or_else(|| TiffError::FieldTypeMismatch {
            name: self.tag_name(),
            found: self.field_type.name().to_string(),
        })
    }

    /// Single integer value; fails unless the field holds exactly one integer
    pub fn int_value(&self) -> TiffResult<u64> {
        let values = self.int_values()?;
        match values.as_slice() {
            [value] => Ok(*value),
            _ => Err(TiffError::FieldCountMismatch {
                name: self.tag_name(),
                expected: "1".to_string(),
                found: values.len() as u64,
            }),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self.value() {
            Ok(value) => value.to_string(),
            Err(e) => format!("<{}>", e),
        };
        write!(f, "{} ({}): {} [{}, count {}]",
               self.tag, self.tag_name(), value, self.field_type.name(), self.count)
    }
}
