//! Write-side directory tree
//!
//! An [`OutputSet`] is the editable counterpart of [`TiffContents`]: a byte
//! order, a format variant and a list of directories. It can be built from
//! scratch or from a parsed file, edited, and handed to a writer.

use log::{debug, warn};
use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::io::byte_source::ByteSource;
use crate::tiff::constants::exif_tags;
use crate::tiff::contents::TiffContents;
use crate::tiff::directory::{Directory, DirectoryType};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field_type::Rational;
use crate::tiff::header::TiffVariant;
use crate::tiff::tags;
use crate::tiff::write::output_directory::OutputDirectory;
use crate::tiff::write::output_field::OutputField;
use crate::tiff::write::prepare::REGENERATED_TAGS;

/// GPS tag version written by [`OutputSet::set_gps_in_degrees`]
const GPS_VERSION: [u8; 4] = [2, 2, 0, 0];

/// Directories to be written, with their byte order and variant
#[derive(Debug, Clone)]
pub struct OutputSet {
    byte_order: ByteOrder,
    variant: TiffVariant,
    directories: Vec<OutputDirectory>,
}

impl OutputSet {
    /// Empty classic TIFF set
    pub fn new(byte_order: ByteOrder) -> Self {
        Self::with_variant(byte_order, TiffVariant::Classic)
    }

    pub fn with_variant(byte_order: ByteOrder, variant: TiffVariant) -> Self {
        OutputSet { byte_order, variant, directories: Vec::new() }
    }

    /// Rebuilds an editable set from a parsed file
    ///
    /// Strip, tile and JPEG data are read from `source` and attached to
    /// their directories; the offset and pointer fields that refer to them
    /// are dropped and regenerated on write. Maker notes are frozen, since
    /// they often hold offsets relative to their own position.
    pub fn from_contents(contents: &TiffContents, source: &dyn ByteSource) -> TiffResult<Self> {
        let header = contents.header;
        let mut set = OutputSet::with_variant(header.byte_order, header.variant);

        for directory in &contents.directories {
            match directory.directory_type {
                DirectoryType::MakerNotes | DirectoryType::Unknown => {
                    warn!("Skipping {} directory at {}", directory.directory_type, directory.offset);
                    continue;
                }
                _ => {}
            }
            let output = Self::convert_directory(directory, source, set.byte_order)?;
            set.add_directory(output)?;
        }

        debug!("Output set built from {} directories", set.directories.len());
        Ok(set)
    }

    fn convert_directory(
        directory: &Directory,
        source: &dyn ByteSource,
        byte_order: ByteOrder,
    ) -> TiffResult<OutputDirectory> {
        let mut output = OutputDirectory::new(directory.directory_type, byte_order);

        for field in &directory.fields {
            if REGENERATED_TAGS.contains(&field.tag) {
                continue;
            }
            let mut output_field = OutputField::from_field(field, byte_order)?;
            if directory.directory_type == DirectoryType::Exif && field.tag == exif_tags::MAKER_NOTE {
                output_field.freeze();
            }
            output.add_raw(output_field);
        }

        let references_image_data = directory.has_field(&tags::STRIP_OFFSETS)
            || directory.has_field(&tags::TILE_OFFSETS);
        match directory.image_data() {
            Some(image_data) => {
                let blocks = image_data.read_all(source)?;
                if image_data.is_tiled() {
                    output.set_tiles(blocks);
                } else {
                    output.set_strips(blocks);
                }
            }
            None if references_image_data => {
                return Err(TiffError::Format(format!(
                    "{} directory references image data that was not read",
                    directory.directory_type
                )));
            }
            None => {}
        }

        match directory.jpeg_data() {
            Some(jpeg) => output.set_jpeg(jpeg.element.read(source)?),
            None if directory.has_field(&tags::JPEG_INTERCHANGE_FORMAT) => {
                return Err(TiffError::Format(format!(
                    "{} directory references a JPEG stream that was not read",
                    directory.directory_type
                )));
            }
            None => {}
        }

        Ok(output)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Variant the set will be written as
    ///
    /// BigTIFF when requested, or when any field uses a type only BigTIFF
    /// can hold.
    pub fn variant(&self) -> TiffVariant {
        if self.variant.is_big_tiff() || self.directories.iter().any(|d| d.requires_big_tiff()) {
            TiffVariant::BigTiff
        } else {
            TiffVariant::Classic
        }
    }

    pub fn set_variant(&mut self, variant: TiffVariant) {
        self.variant = variant;
    }

    /// Re-encodes every field into another byte order
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) -> TiffResult<()> {
        if byte_order == self.byte_order {
            return Ok(());
        }
        debug!("Converting output set from {} to {}", self.byte_order.name(), byte_order.name());
        for directory in &mut self.directories {
            directory.convert_byte_order(byte_order)?;
        }
        self.byte_order = byte_order;
        Ok(())
    }

    pub fn directories(&self) -> &[OutputDirectory] {
        &self.directories
    }

    pub(crate) fn directories_mut(&mut self) -> &mut Vec<OutputDirectory> {
        &mut self.directories
    }

    /// Adds a directory; fails if one of the same type is already present
    pub fn add_directory(&mut self, mut directory: OutputDirectory) -> TiffResult<&mut OutputDirectory> {
        if self.find_directory(directory.directory_type).is_some() {
            return Err(TiffError::Format(format!(
                "Output set already contains a {} directory",
                directory.directory_type
            )));
        }
        directory.convert_byte_order(self.byte_order)?;
        self.directories.push(directory);
        let index = self.directories.len() - 1;
        Ok(&mut self.directories[index])
    }

    /// Adds an empty image directory numbered `index` in the chain
    pub fn add_image_directory(&mut self, index: u32) -> TiffResult<&mut OutputDirectory> {
        let directory = OutputDirectory::new(DirectoryType::Image(index), self.byte_order);
        self.add_directory(directory)
    }

    pub fn find_directory(&self, directory_type: DirectoryType) -> Option<&OutputDirectory> {
        self.directories.iter().find(|d| d.directory_type == directory_type)
    }

    pub fn find_directory_mut(&mut self, directory_type: DirectoryType) -> Option<&mut OutputDirectory> {
        self.directories.iter_mut().find(|d| d.directory_type == directory_type)
    }

    pub fn root_directory(&self) -> Option<&OutputDirectory> {
        self.find_directory(DirectoryType::ROOT)
    }

    fn get_or_create(&mut self, directory_type: DirectoryType) -> &mut OutputDirectory {
        let index = match self.directories.iter().position(|d| d.directory_type == directory_type) {
            Some(index) => index,
            None => {
                self.directories.push(OutputDirectory::new(directory_type, self.byte_order));
                self.directories.len() - 1
            }
        };
        &mut self.directories[index]
    }

    pub fn get_or_create_root_directory(&mut self) -> &mut OutputDirectory {
        self.get_or_create(DirectoryType::ROOT)
    }

    /// EXIF directory, creating the root directory too if needed
    pub fn get_or_create_exif_directory(&mut self) -> &mut OutputDirectory {
        self.get_or_create_root_directory();
        self.get_or_create(DirectoryType::Exif)
    }

    /// GPS directory, creating the EXIF and root directories too if needed
    pub fn get_or_create_gps_directory(&mut self) -> &mut OutputDirectory {
        self.get_or_create_exif_directory();
        self.get_or_create(DirectoryType::Gps)
    }

    /// Interoperability directory, creating the EXIF and root directories too if needed
    pub fn get_or_create_interop_directory(&mut self) -> &mut OutputDirectory {
        self.get_or_create_exif_directory();
        self.get_or_create(DirectoryType::Interop)
    }

    /// First field with this tag in any directory
    pub fn find_field(&self, tag: u16) -> Option<&OutputField> {
        self.directories.iter().find_map(|d| d.find_field(tag))
    }

    pub fn find_field_mut(&mut self, tag: u16) -> Option<&mut OutputField> {
        self.directories.iter_mut().find_map(|d| d.find_field_mut(tag))
    }

    /// Removes the tag from every directory; returns true if any was present
    pub fn remove_field(&mut self, tag: u16) -> bool {
        let mut removed = false;
        for directory in &mut self.directories {
            removed |= directory.remove_field(tag);
        }
        removed
    }

    /// Writes a GPS position as degrees, minutes and seconds
    ///
    /// Negative longitudes are west, negative latitudes south.
    pub fn set_gps_in_degrees(&mut self, longitude: f64, latitude: f64) -> TiffResult<()> {
        let gps = self.get_or_create_gps_directory();

        gps.remove_field(tags::GPS_VERSION_ID.tag);
        gps.add(&tags::GPS_VERSION_ID, &GPS_VERSION[..])?;

        let longitude_ref = if longitude < 0.0 { "W" } else { "E" };
        let latitude_ref = if latitude < 0.0 { "S" } else { "N" };

        gps.remove_field(tags::GPS_LONGITUDE_REF.tag);
        gps.add(&tags::GPS_LONGITUDE_REF, longitude_ref)?;
        gps.remove_field(tags::GPS_LATITUDE_REF.tag);
        gps.add(&tags::GPS_LATITUDE_REF, latitude_ref)?;

        gps.remove_field(tags::GPS_LONGITUDE.tag);
        gps.add(&tags::GPS_LONGITUDE, degrees_minutes_seconds(longitude.abs()))?;
        gps.remove_field(tags::GPS_LATITUDE.tag);
        gps.add(&tags::GPS_LATITUDE, degrees_minutes_seconds(latitude.abs()))?;
        Ok(())
    }
}

/// Splits an angle into whole degrees, whole minutes and fractional seconds
fn degrees_minutes_seconds(angle: f64) -> Vec<Rational> {
    let degrees = angle.trunc();
    let minutes_total = angle.fract() * 60.0;
    let minutes = minutes_total.trunc();
    let seconds = minutes_total.fract() * 60.0;
    vec![
        Rational::from_f64(degrees),
        Rational::from_f64(minutes),
        Rational::from_f64(seconds),
    ]
}

impl fmt::Display for OutputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Output set ({}, {}):", self.variant(), self.byte_order.name())?;
        for directory in &self.directories {
            write!(f, "{}", directory)?;
        }
        Ok(())
    }
}
