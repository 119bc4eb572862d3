//! Tag descriptors
//!
//! A [`TagInfo`] records what a tag is allowed to hold: its name, the field
//! types it accepts, how many values it carries and whether its value is a
//! pointer to something else in the file. Descriptors are static and never
//! mutated; see [`crate::tiff::tags`] for the catalog.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field_type::{FieldType, FieldValue};
use crate::tiff::tags;

/// Directory family a tag number belongs to
///
/// TIFF and EXIF tags share one numbering space; GPS and Interoperability
/// directories reuse small numbers for unrelated tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    Tiff,
    Exif,
    Gps,
    Interop,
}

/// Number of values a tag carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many values (bytes including the NUL, for ASCII)
    Fixed(u64),
    /// Any number of values
    Variable,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variable => write!(f, "any"),
        }
    }
}

/// Static description of a tag
#[derive(Debug, PartialEq, Eq)]
pub struct TagInfo {
    pub name: &'static str,
    pub tag: u16,
    pub data_types: &'static [FieldType],
    pub arity: Arity,
    pub group: TagGroup,
}

impl TagInfo {
    pub const fn new(
        name: &'static str,
        tag: u16,
        data_types: &'static [FieldType],
        arity: Arity,
        group: TagGroup,
    ) -> Self {
        TagInfo { name, tag, data_types, arity, group }
    }

    /// Returns true if a field of this type is acceptable for the tag
    pub fn accepts(&self, field_type: FieldType) -> bool {
        self.data_types.contains(&field_type)
    }

    /// Validates a value against the type and arity contract
    pub fn check_value(&self, value: &FieldValue) -> TiffResult<()> {
        let field_type = value.field_type();
        if !self.accepts(field_type) {
            return Err(TiffError::FieldTypeMismatch {
                name: self.name.to_string(),
                found: field_type.name().to_string(),
            });
        }

        if let Arity::Fixed(expected) = self.arity {
            let found = value.count();
            if found != expected {
                return Err(TiffError::FieldCountMismatch {
                    name: self.name.to_string(),
                    expected: expected.to_string(),
                    found,
                });
            }
        }
        Ok(())
    }

    /// Looks up a descriptor by group and tag number
    pub fn lookup(group: TagGroup, tag: u16) -> Option<&'static TagInfo> {
        let found = CATALOG.get(&(group, tag)).copied();
        match (found, group) {
            (Some(info), _) => Some(info),
            (None, TagGroup::Tiff) => CATALOG.get(&(TagGroup::Exif, tag)).copied(),
            (None, TagGroup::Exif) => CATALOG.get(&(TagGroup::Tiff, tag)).copied(),
            (None, _) => None,
        }
    }

    /// Name of a tag, or `Unknown (n)` when it is not in the catalog
    pub fn name_of(group: TagGroup, tag: u16) -> String {
        match Self::lookup(group, tag) {
            Some(info) => info.name.to_string(),
            None => format!("Unknown ({})", tag),
        }
    }
}

impl fmt::Display for TagInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.name, self.tag)
    }
}

lazy_static! {
    static ref CATALOG: HashMap<(TagGroup, u16), &'static TagInfo> = {
        let mut map = HashMap::new();
        for info in tags::ALL {
            map.insert((info.group, info.tag), *info);
        }
        map
    };
}
