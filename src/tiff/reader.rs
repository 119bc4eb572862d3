//! TIFF file reader implementation
//!
//! This module implements the TIFF/BigTIFF directory reader. A read starts
//! at the header, follows the chain of image directories and, on request,
//! the EXIF, GPS and Interoperability sub-directories each directory points
//! to. Everything found is reported to a [`Listener`], which decides how much
//! of the file is worth reading.
//!
//! One read owns one set of visited directory offsets. A pointer back to an
//! offset already read ends that branch of the traversal quietly, so cyclic
//! files terminate with whatever was collected before the cycle.

use log::{debug, info, trace, warn};
use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::io::byte_order::ByteOrderHandler;
use crate::io::byte_source::{check_bounds, ByteSource, ByteSourceFile};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::jpeg;
use crate::tiff::contents::TiffContents;
use crate::tiff::directory::{Directory, DirectoryType, ImageDataElement, JpegImageData, TiffImageData};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::field_type::FieldType;
use crate::tiff::header::{TiffHeader, TiffVariant};
use crate::tiff::tag_info::TagInfo;
use crate::tiff::tags;

/// Rows per strip assumed when neither RowsPerStrip nor ImageLength is present
pub const UNBOUNDED_ROWS_PER_STRIP: u64 = u32::MAX as u64;

/// Receives everything a read discovers
///
/// Returning `false` from `set_header`, `add_field` or `add_directory`
/// stops the read of the current directory and everything that follows it.
pub trait Listener {
    /// Called once with the parsed header
    fn set_header(&mut self, header: &TiffHeader) -> bool;

    /// Called when a directory, and every field in it, has been accepted
    fn add_directory(&mut self, directory: Directory) -> bool;

    /// Called for each field of a directory before the directory itself
    fn add_field(&mut self, field: &Field) -> bool;

    /// Whether strip, tile and JPEG descriptors should be resolved
    fn read_image_data(&self) -> bool;

    /// Whether EXIF, GPS and Interoperability pointers should be followed
    fn read_offset_directories(&self) -> bool;
}

/// Listener that keeps everything
#[derive(Debug, Default)]
pub struct Collector {
    read_image_data: bool,
    read_offset_directories: bool,
    header: Option<TiffHeader>,
    directories: Vec<Directory>,
    fields: Vec<Field>,
}

impl Collector {
    /// Creates a collector that follows offset directories
    pub fn new(read_image_data: bool) -> Self {
        Collector {
            read_image_data,
            read_offset_directories: true,
            ..Default::default()
        }
    }

    /// Disables or enables following of EXIF, GPS and Interoperability pointers
    pub fn with_offset_directories(mut self, read_offset_directories: bool) -> Self {
        self.read_offset_directories = read_offset_directories;
        self
    }

    /// Converts what was collected into contents
    pub fn into_contents(self) -> TiffResult<TiffContents> {
        let header = self.header
            .ok_or_else(|| TiffError::Format("No TIFF header was read".to_string()))?;
        Ok(TiffContents {
            header,
            directories: self.directories,
            fields: self.fields,
        })
    }
}

impl Listener for Collector {
    fn set_header(&mut self, header: &TiffHeader) -> bool {
        self.header = Some(*header);
        true
    }

    fn add_directory(&mut self, directory: Directory) -> bool {
        self.directories.push(directory);
        true
    }

    fn add_field(&mut self, field: &Field) -> bool {
        self.fields.push(field.clone());
        true
    }

    fn read_image_data(&self) -> bool {
        self.read_image_data
    }

    fn read_offset_directories(&self) -> bool {
        self.read_offset_directories
    }
}

/// Listener that stops after the root directory
#[derive(Debug)]
pub struct FirstDirectoryCollector {
    inner: Collector,
}

impl FirstDirectoryCollector {
    pub fn new(read_image_data: bool) -> Self {
        FirstDirectoryCollector {
            inner: Collector::new(read_image_data).with_offset_directories(false),
        }
    }

    pub fn into_contents(self) -> TiffResult<TiffContents> {
        self.inner.into_contents()
    }
}

impl Listener for FirstDirectoryCollector {
    fn set_header(&mut self, header: &TiffHeader) -> bool {
        self.inner.set_header(header)
    }

    fn add_directory(&mut self, directory: Directory) -> bool {
        self.inner.add_directory(directory);
        false
    }

    fn add_field(&mut self, field: &Field) -> bool {
        self.inner.add_field(field)
    }

    fn read_image_data(&self) -> bool {
        self.inner.read_image_data()
    }

    fn read_offset_directories(&self) -> bool {
        self.inner.read_offset_directories()
    }
}

/// Builder for TiffReader
///
/// Provides a clean way to construct a TiffReader with various configurations.
#[derive(Debug, Clone)]
pub struct TiffReaderBuilder {
    strict: bool,
    read_image_data: bool,
    read_offset_directories: bool,
}

impl Default for TiffReaderBuilder {
    fn default() -> Self {
        TiffReaderBuilder {
            strict: false,
            read_image_data: true,
            read_offset_directories: true,
        }
    }
}

impl TiffReaderBuilder {
    /// Create a new TiffReaderBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on out-of-bounds values and missing JPEG end markers instead of dropping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve strip, tile and JPEG descriptors in the collecting entry points
    pub fn read_image_data(mut self, read_image_data: bool) -> Self {
        self.read_image_data = read_image_data;
        self
    }

    /// Follow EXIF, GPS and Interoperability pointers in the collecting entry points
    pub fn read_offset_directories(mut self, read_offset_directories: bool) -> Self {
        self.read_offset_directories = read_offset_directories;
        self
    }

    /// Build the TiffReader
    pub fn build(self) -> TiffReader {
        TiffReader {
            strict: self.strict,
            read_image_data: self.read_image_data,
            read_offset_directories: self.read_offset_directories,
        }
    }
}

/// What reading one directory offset produced
enum Subtree {
    /// Directories read, parent first; their fields were already reported
    Read(Vec<Directory>),
    /// Nothing readable at the offset
    Empty,
    /// The offset was read earlier in the session
    Revisited,
    /// The listener refused a field
    Stopped,
}

/// Pointer tags that lead to sub-directories, with the type of their target
fn sub_directory_pointers() -> [(&'static TagInfo, DirectoryType); 3] {
    [
        (&tags::EXIF_OFFSET, DirectoryType::Exif),
        (&tags::GPS_INFO, DirectoryType::Gps),
        (&tags::INTEROP_OFFSET, DirectoryType::Interop),
    ]
}

/// State shared by every directory read of one session
struct ReadContext<'a> {
    source: &'a dyn ByteSource,
    header: TiffHeader,
    handler: Box<dyn ByteOrderHandler>,
    read_image_data: bool,
    read_offset_directories: bool,
}

/// Reader for TIFF and BigTIFF files
#[derive(Debug, Clone)]
pub struct TiffReader {
    strict: bool,
    read_image_data: bool,
    read_offset_directories: bool,
}

impl Default for TiffReader {
    fn default() -> Self {
        TiffReaderBuilder::default().build()
    }
}

impl TiffReader {
    /// Creates a lenient reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder
    pub fn builder() -> TiffReaderBuilder {
        TiffReaderBuilder::new()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Loads a TIFF file from the given path
    ///
    /// # Arguments
    /// * `path` - Path to the TIFF file to load
    ///
    /// # Returns
    /// Everything collected from the file
    pub fn load(&self, path: impl AsRef<Path>) -> TiffResult<TiffContents> {
        info!("Loading TIFF file: {}", path.as_ref().display());
        let source = ByteSourceFile::new(path)?;
        self.read_contents(&source)
    }

    /// Reads every directory and field into contents
    pub fn read_contents(&self, source: &dyn ByteSource) -> TiffResult<TiffContents> {
        let mut collector = Collector::new(self.read_image_data)
            .with_offset_directories(self.read_offset_directories);
        self.read(source, &mut collector)?;
        collector.into_contents()
    }

    /// Like [`read_contents`](Self::read_contents), but fails when no directory was found
    pub fn read_directories(&self, source: &dyn ByteSource) -> TiffResult<TiffContents> {
        let contents = self.read_contents(source)?;
        if contents.directories.is_empty() {
            return Err(TiffError::Format("Image did not contain any directories".to_string()));
        }
        Ok(contents)
    }

    /// Reads the root directory only
    pub fn read_first_directory(&self, source: &dyn ByteSource) -> TiffResult<TiffContents> {
        let mut collector = FirstDirectoryCollector::new(self.read_image_data);
        self.read(source, &mut collector)?;
        collector.into_contents()
    }

    /// Reads a source, reporting to the listener
    ///
    /// This method handles the core process of reading a TIFF file:
    /// 1. Detect byte order and format variant from the header
    /// 2. Walk the chain of image directories
    /// 3. Follow sub-directory pointers of each directory if asked to
    pub fn read(&self, source: &dyn ByteSource, listener: &mut dyn Listener) -> TiffResult<()> {
        debug!("Reading TIFF from {}", source.description());

        let header = TiffHeader::read(source)?;
        debug!("{} header, first directory at {}", header.variant, header.first_directory_offset);
        if !listener.set_header(&header) {
            return Ok(());
        }

        let context = ReadContext {
            source,
            header,
            handler: header.byte_order.create_handler(),
            read_image_data: listener.read_image_data(),
            read_offset_directories: listener.read_offset_directories(),
        };

        let mut visited = HashSet::new();
        let mut offset = header.first_directory_offset;
        let mut directory_type = DirectoryType::ROOT;
        let mut directory_count = 0usize;

        'chain: while offset != 0 {
            let directories = match self.read_subtree(&context, listener, offset, directory_type, false, &mut visited)? {
                Subtree::Read(directories) => directories,
                Subtree::Revisited => {
                    debug!("Directory offset {} already visited, stopping chain", offset);
                    break;
                }
                Subtree::Empty | Subtree::Stopped => break,
            };

            let next_offset = directories.first().map(|d| d.next_directory_offset).unwrap_or(0);
            for directory in directories {
                directory_count += 1;
                if !listener.add_directory(directory) {
                    break 'chain;
                }
            }

            offset = next_offset;
            directory_type = directory_type.next_sibling();
        }

        info!("Read {} directories from {}", directory_count, source.description());
        Ok(())
    }

    /// Reads a directory plus the sub-directories it points to
    ///
    /// Fields are handed to the listener as soon as they are known to be
    /// kept; a sub-directory pointer is reported once its target has been
    /// read. The directories themselves are returned parent first, for the
    /// caller to pass on in that order.
    fn read_subtree(
        &self,
        context: &ReadContext<'_>,
        listener: &mut dyn Listener,
        offset: u64,
        directory_type: DirectoryType,
        ignore_next_directory: bool,
        visited: &mut HashSet<u64>,
    ) -> TiffResult<Subtree> {
        if !visited.insert(offset) {
            return Ok(Subtree::Revisited);
        }

        let mut directory = match self.read_directory(context, offset, directory_type, ignore_next_directory)? {
            Some(directory) => directory,
            None => return Ok(Subtree::Empty),
        };

        let mut children = Vec::new();
        let mut removed = Vec::new();
        for index in 0..directory.fields.len() {
            let field = &directory.fields[index];
            let pointer = sub_directory_pointers()
                .into_iter()
                .find(|(tag, _)| tag.tag == field.tag)
                .filter(|_| context.read_offset_directories);

            if let Some((tag, child_type)) = pointer {
                let result = field
                    .int_value()
                    .and_then(|child_offset| self.read_subtree(context, listener, child_offset, child_type, true, visited));

                match result {
                    Ok(Subtree::Read(subtree)) => children.extend(subtree),
                    Ok(Subtree::Empty) => {}
                    Ok(Subtree::Stopped) => return Ok(Subtree::Stopped),
                    Ok(Subtree::Revisited) => {
                        debug!("{} directory pointer revisits an earlier offset, removing it", child_type);
                        removed.push(index);
                        continue;
                    }
                    Err(e) if !self.strict => {
                        warn!("Failed to read {} directory, removing {}: {}", child_type, tag.name, e);
                        removed.push(index);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            if !listener.add_field(&directory.fields[index]) {
                return Ok(Subtree::Stopped);
            }
        }

        for index in removed.into_iter().rev() {
            directory.fields.remove(index);
        }

        let mut subtree = Vec::with_capacity(children.len() + 1);
        subtree.push(directory);
        subtree.extend(children);
        Ok(Subtree::Read(subtree))
    }

    /// Reads a single directory
    ///
    /// An IFD (Image File Directory) consists of a count followed by a
    /// series of entries, each describing one field, followed by the offset
    /// of the next directory.
    ///
    /// # Arguments
    /// * `context` - Session state
    /// * `offset` - Offset in the file where the IFD starts
    /// * `directory_type` - Role of the directory being read
    /// * `ignore_next_directory` - Skip the trailing next-directory offset
    fn read_directory(
        &self,
        context: &ReadContext<'_>,
        offset: u64,
        directory_type: DirectoryType,
        ignore_next_directory: bool,
    ) -> TiffResult<Option<Directory>> {
        let source_length = context.source.len();
        if offset >= source_length {
            warn!("Directory offset {} is beyond the end of the source ({} bytes)", offset, source_length);
            return Ok(None);
        }

        let variant = context.header.variant;
        let handler = context.handler.as_ref();
        let mut cursor = context.source.cursor(offset)?;
        let reader = cursor.as_mut();

        let entry_count = match Self::read_entry_count(reader, handler, variant) {
            Ok(count) => count,
            Err(e) if !self.strict => {
                warn!("Could not read entry count of directory at {}: {}", offset, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        debug!("{} directory at {}: {} entries", directory_type, offset, entry_count);

        let entries_start = offset + variant.entry_count_size();
        let slot_length = variant.slot_length();
        let mut fields = Vec::new();

        let mut truncated = false;

        for index in 0..entry_count {
            let (tag, type_code, count, mut slot) = match Self::read_entry(reader, handler, variant) {
                Ok(entry) => entry,
                Err(e) if !self.strict => {
                    warn!("Directory at {} is truncated after {} of {} entries: {}", offset, index, entry_count, e);
                    truncated = true;
                    break;
                }
                Err(e) => return Err(e),
            };

            if tag == 0 {
                trace!("Skipping entry {} with tag 0", index);
                continue;
            }

            let field_type = match FieldType::from_code(type_code) {
                Ok(field_type) => field_type,
                Err(e) => {
                    warn!("Dropping tag {} in {} directory: {}", tag, directory_type, e);
                    continue;
                }
            };

            let slot_position = entries_start
                + index * variant.entry_length()
                + (variant.entry_length() - slot_length as u64);
            let value_length = count.checked_mul(field_type.size());

            let (value_offset, bytes, inline) = match value_length {
                Some(length) if length <= slot_length as u64 => {
                    slot.truncate(length as usize);
                    (slot_position, slot, true)
                }
                _ => {
                    let value_offset = Self::decode_slot_offset(&slot, handler, variant)?;
                    let length = value_length.unwrap_or(u64::MAX);
                    if let Err(e) = check_bounds(value_offset, length, source_length) {
                        if self.strict {
                            return Err(e);
                        }
                        warn!("Dropping tag {} in {} directory: {}", tag, directory_type, e);
                        continue;
                    }
                    (value_offset, context.source.block(value_offset, length)?, false)
                }
            };

            let field = Field {
                tag,
                directory_type,
                field_type,
                count,
                offset: value_offset,
                inline,
                byte_order: context.header.byte_order,
                bytes,
                sort_hint: index as usize,
            };
            trace!("Read field {}", field);
            fields.push(field);
        }

        let next_directory_offset = if ignore_next_directory || truncated {
            0
        } else {
            match Self::read_offset(reader, handler, variant) {
                Ok(next) => next,
                Err(e) if !self.strict => {
                    warn!("Could not read next directory offset after directory at {}: {}", offset, e);
                    0
                }
                Err(e) => return Err(e),
            }
        };
        drop(cursor);

        let mut directory = Directory {
            directory_type,
            fields,
            offset,
            next_directory_offset,
            entry_count,
            variant,
            byte_order: context.header.byte_order,
            image_data: None,
            jpeg_data: None,
        };

        if context.read_image_data {
            if directory.has_strip_or_tile_tags() {
                directory.image_data = Some(self.resolve_image_data(&directory)?);
            }
            if directory.has_jpeg_tags() {
                directory.jpeg_data = Some(self.resolve_jpeg_data(context.source, &directory)?);
            }
        }

        Ok(Some(directory))
    }

    /// Reads one raw entry: tag, type code, count and the value slot
    fn read_entry(
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
        variant: TiffVariant,
    ) -> TiffResult<(u16, u16, u64, Vec<u8>)> {
        let tag = handler.read_u16(reader)?;
        let type_code = handler.read_u16(reader)?;
        let count = match variant {
            TiffVariant::Classic => handler.read_u32(reader)? as u64,
            TiffVariant::BigTiff => handler.read_u64(reader)?,
        };
        let mut slot = vec![0u8; variant.slot_length()];
        reader.read_exact(&mut slot)?;
        Ok((tag, type_code, count, slot))
    }

    /// Reads the entry count (16-bit classic / 64-bit BigTIFF)
    fn read_entry_count(
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
        variant: TiffVariant,
    ) -> TiffResult<u64> {
        let count = match variant {
            TiffVariant::Classic => handler.read_u16(reader)? as u64,
            TiffVariant::BigTiff => handler.read_u64(reader)?,
        };
        Ok(count)
    }

    /// Reads a variant-width offset
    fn read_offset(
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
        variant: TiffVariant,
    ) -> TiffResult<u64> {
        let offset = match variant {
            TiffVariant::Classic => handler.read_u32(reader)? as u64,
            TiffVariant::BigTiff => handler.read_u64(reader)?,
        };
        Ok(offset)
    }

    /// Interprets a full inline slot as an absolute offset
    fn decode_slot_offset(slot: &[u8], handler: &dyn ByteOrderHandler, variant: TiffVariant) -> TiffResult<u64> {
        let mut cursor = Cursor::new(slot);
        Self::read_offset(&mut cursor, handler, variant)
    }

    /// Builds the strip or tile descriptor of a directory
    fn resolve_image_data(&self, directory: &Directory) -> TiffResult<TiffImageData> {
        let elements = directory.image_data_elements()?;

        if directory.image_data_in_tiles() {
            let tile_width = directory.value::<u64>(&tags::TILE_WIDTH)?;
            let tile_length = directory.value::<u64>(&tags::TILE_LENGTH)?;
            return Ok(TiffImageData::Tiles { elements, tile_width, tile_length });
        }

        let rows_per_strip = match self.optional_integer(directory, &tags::ROWS_PER_STRIP)? {
            Some(rows) => rows,
            None => self.optional_integer(directory, &tags::IMAGE_LENGTH)?.unwrap_or(UNBOUNDED_ROWS_PER_STRIP),
        };
        Ok(TiffImageData::Strips { elements, rows_per_strip })
    }

    /// Optional integer field; unusable values count as absent unless strict
    fn optional_integer(&self, directory: &Directory, tag: &TagInfo) -> TiffResult<Option<u64>> {
        match directory.find_value::<u64>(tag) {
            Ok(value) => Ok(value),
            Err(e) if !self.strict => {
                warn!("Ignoring {} in {} directory: {}", tag.name, directory.directory_type, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Builds the JPEG descriptor, clamping its length to the source
    fn resolve_jpeg_data(&self, source: &dyn ByteSource, directory: &Directory) -> TiffResult<JpegImageData> {
        let offset = directory.value::<u64>(&tags::JPEG_INTERCHANGE_FORMAT)?;
        let declared_length = directory.value::<u64>(&tags::JPEG_INTERCHANGE_FORMAT_LENGTH)?;

        let source_length = source.len();
        if offset > source_length {
            return Err(TiffError::IoBounds { offset, length: declared_length, source_length });
        }
        let length = declared_length.min(source_length - offset);
        if length != declared_length {
            debug!("JPEG length {} clamped to {} at end of source", declared_length, length);
        }

        if self.strict {
            let has_eoi = length >= 2 && source.block(offset + length - 2, 2)? == jpeg::EOI;
            if !has_eoi {
                return Err(TiffError::Format(
                    "JPEG EOI marker could not be found at expected location".to_string(),
                ));
            }
        }

        Ok(JpegImageData { element: ImageDataElement::new(offset, length) })
    }
}
