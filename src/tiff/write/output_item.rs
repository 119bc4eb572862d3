//! Placed byte ranges of an output file

/// What an output item holds
///
/// Indices refer to the directories of the prepared set and to the fields
/// or blocks within them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ItemKind {
    /// A directory structure: entry count, entries and next-directory offset
    Directory { directory: usize },
    /// Value of a field too large for its entry's inline slot
    Value { directory: usize, field: usize },
    /// One strip or tile
    ImageBlock { directory: usize, block: usize },
    /// JPEG interchange-format stream
    Jpeg { directory: usize },
}

/// Anything that occupies a byte range in the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputItem {
    pub kind: ItemKind,
    pub length: u64,
    /// Absolute offset, once placed
    pub offset: Option<u64>,
    /// Bytes already sit at `offset` in the original file and are not rewritten
    pub preserved: bool,
}

impl OutputItem {
    pub fn new(kind: ItemKind, length: u64) -> Self {
        OutputItem { kind, length, offset: None, preserved: false }
    }

    pub fn is_image_data(&self) -> bool {
        matches!(self.kind, ItemKind::ImageBlock { .. })
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            ItemKind::Directory { .. } => "directory",
            ItemKind::Value { .. } => "field value",
            ItemKind::ImageBlock { .. } => "image data",
            ItemKind::Jpeg { .. } => "JPEG image data",
        }
    }
}
