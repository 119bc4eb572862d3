//! Tests for the directory reader

extern crate std;

use crate::tiff::constants::{exif_tags, tags as t};
use crate::tiff::directory::{Directory, DirectoryType, ImageDataElement, TiffImageData};
use crate::tiff::errors::TiffError;
use crate::tiff::field::Field;
use crate::tiff::header::{TiffHeader, TiffVariant};
use crate::tiff::reader::{Listener, TiffReader, UNBOUNDED_ROWS_PER_STRIP};
use crate::tiff::tags;

use super::test_utils::{
    big_tiff_single_directory, classic_header, create_test_bigtiff_buffer, create_test_tiff_buffer,
    directory_length, entry, push_directory, single_directory, source,
};

fn strict_reader() -> TiffReader {
    TiffReader::builder().strict(true).build()
}

#[test]
fn test_read_classic_tiff() {
    let contents = TiffReader::new().read_contents(&source(create_test_tiff_buffer())).unwrap();

    std::assert_eq!(contents.header.variant, TiffVariant::Classic);
    std::assert_eq!(contents.directory_count(), 1);
    std::assert_eq!(contents.fields.len(), 2);

    let root = contents.root().unwrap();
    std::assert_eq!(root.offset, 8);
    std::assert_eq!(root.length(), 30);
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 800);
    std::assert_eq!(root.value::<u64>(&tags::IMAGE_LENGTH).unwrap(), 600);
}

#[test]
fn test_read_bigtiff() {
    let contents = TiffReader::new().read_contents(&source(create_test_bigtiff_buffer())).unwrap();

    std::assert!(contents.is_big_tiff());
    let root = contents.root().unwrap();
    std::assert_eq!(root.offset, 16);
    std::assert_eq!(root.length(), 8 + 2 * 20 + 8);
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 1024);
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_LENGTH).unwrap(), 768);
}

#[test]
fn test_tag_zero_is_skipped() {
    let bytes = single_directory(&[
        entry(0, 3, 1, 5),
        entry(t::IMAGE_WIDTH, 4, 1, 10),
    ]);
    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();

    let root = contents.root().unwrap();
    std::assert_eq!(root.entry_count, 2);
    std::assert_eq!(root.fields.len(), 1);
    // The entry after the skipped one is read from the right position
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 10);
}

#[test]
fn test_unknown_field_type_is_dropped() {
    let bytes = single_directory(&[
        entry(t::IMAGE_WIDTH, 99, 1, 0),
        entry(t::IMAGE_LENGTH, 4, 1, 7),
    ]);

    for reader in [TiffReader::new(), strict_reader()] {
        let contents = reader.read_contents(&source(bytes.clone())).unwrap();
        let root = contents.root().unwrap();
        std::assert_eq!(root.fields.len(), 1);
        std::assert!(!root.has_field(&tags::IMAGE_WIDTH));
        std::assert_eq!(root.value::<u32>(&tags::IMAGE_LENGTH).unwrap(), 7);
    }
}

#[test]
fn test_out_of_bounds_value() {
    let bytes = single_directory(&[
        entry(t::IMAGE_WIDTH, 4, 1, 10),
        entry(t::IMAGE_DESCRIPTION, 2, 100, 1000),
    ]);

    let contents = TiffReader::new().read_contents(&source(bytes.clone())).unwrap();
    let root = contents.root().unwrap();
    std::assert_eq!(root.fields.len(), 1);
    std::assert!(!root.has_field(&tags::IMAGE_DESCRIPTION));

    let error = strict_reader().read_contents(&source(bytes)).unwrap_err();
    std::assert!(error.is_bounds_error());
}

#[test]
fn test_out_of_line_value() {
    let mut bytes = single_directory(&[entry(t::IMAGE_DESCRIPTION, 2, 6, 26)]);
    bytes.extend_from_slice(b"hello\0");

    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();
    let field = contents.root().unwrap().find_field(&tags::IMAGE_DESCRIPTION).unwrap();
    std::assert!(!field.inline);
    std::assert_eq!(field.oversize_value_range(), Some((26, 6)));
    std::assert_eq!(contents.root().unwrap().ascii(&tags::IMAGE_DESCRIPTION).unwrap(), "hello");
}

#[test]
fn test_directory_chain() {
    let second = 8 + directory_length(1);
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[entry(t::IMAGE_WIDTH, 4, 1, 1)], second);
    push_directory(&mut bytes, &[entry(t::IMAGE_WIDTH, 4, 1, 2)], 0);

    let contents = TiffReader::new().read_contents(&source(bytes.clone())).unwrap();
    std::assert_eq!(contents.directory_count(), 2);
    std::assert_eq!(contents.directories[1].directory_type, DirectoryType::Image(1));
    std::assert_eq!(contents.directories[1].value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 2);

    let first_only = TiffReader::new().read_first_directory(&source(bytes)).unwrap();
    std::assert_eq!(first_only.directory_count(), 1);
}

#[test]
fn test_cycle_terminates() {
    let second = 8 + directory_length(1);
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[entry(t::IMAGE_WIDTH, 4, 1, 1)], second);
    push_directory(&mut bytes, &[entry(t::IMAGE_WIDTH, 4, 1, 2)], 8);

    let contents = strict_reader().read_contents(&source(bytes)).unwrap();
    std::assert_eq!(contents.directory_count(), 2);

    // A directory pointing at itself
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[entry(t::IMAGE_WIDTH, 4, 1, 1)], 8);
    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();
    std::assert_eq!(contents.directory_count(), 1);
}

#[test]
fn test_exif_sub_directory() {
    let exif_offset = 8 + directory_length(2);
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[
        entry(t::IMAGE_WIDTH, 4, 1, 1),
        entry(t::EXIF_OFFSET, 4, 1, exif_offset),
    ], 0);
    push_directory(&mut bytes, &[
        entry(exif_tags::EXIF_VERSION, 7, 4, u32::from_le_bytes(*b"0230")),
    ], 0);

    let contents = TiffReader::new().read_contents(&source(bytes.clone())).unwrap();
    std::assert_eq!(contents.directory_count(), 2);
    let exif = contents.directory(DirectoryType::Exif).unwrap();
    std::assert_eq!(exif.offset, exif_offset as u64);
    std::assert_eq!(exif.fields[0].bytes, b"0230".to_vec());

    let without = TiffReader::builder().read_offset_directories(false).build()
        .read_contents(&source(bytes))
        .unwrap();
    std::assert_eq!(without.directory_count(), 1);
}

#[test]
fn test_sub_directory_pointing_back_is_removed() {
    let bytes = single_directory(&[
        entry(t::IMAGE_WIDTH, 4, 1, 1),
        entry(t::EXIF_OFFSET, 4, 1, 8),
    ]);

    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();
    std::assert_eq!(contents.directory_count(), 1);
    std::assert!(!contents.root().unwrap().has_field(&tags::EXIF_OFFSET));
}

#[test]
fn test_invalid_headers() {
    let mut bytes = vec![b'X', b'X'];
    bytes.extend_from_slice(&create_test_tiff_buffer()[2..]);
    let error = TiffReader::new().read_contents(&source(bytes)).unwrap_err();
    std::assert!(matches!(error, TiffError::InvalidByteOrder(_)));
    std::assert!(error.is_format_error());

    let mut bytes = create_test_tiff_buffer();
    bytes[2] = 44;
    let error = TiffReader::new().read_contents(&source(bytes)).unwrap_err();
    std::assert!(matches!(error, TiffError::UnsupportedVersion(44)));

    let mut bytes = create_test_bigtiff_buffer();
    bytes[4] = 4; // offset size
    let error = TiffReader::new().read_contents(&source(bytes)).unwrap_err();
    std::assert!(matches!(error, TiffError::InvalidBigTiffHeader { offset_size: 4, reserved: 0 }));
}

#[test]
fn test_file_without_directories() {
    let bytes = classic_header(0);
    let contents = TiffReader::new().read_contents(&source(bytes.clone())).unwrap();
    std::assert_eq!(contents.directory_count(), 0);

    let error = TiffReader::new().read_directories(&source(bytes)).unwrap_err();
    std::assert!(error.is_format_error());
}

#[test]
fn test_strip_layout() {
    let data_offset = 8 + directory_length(2);
    let mut bytes = single_directory(&[
        entry(t::STRIP_OFFSETS, 4, 1, data_offset),
        entry(t::STRIP_BYTE_COUNTS, 4, 1, 4),
    ]);
    bytes.extend_from_slice(&[1, 2, 3, 4]);
    let source = source(bytes);

    let contents = TiffReader::new().read_contents(&source).unwrap();
    let root = contents.root().unwrap();
    match root.image_data() {
        Some(TiffImageData::Strips { elements, rows_per_strip }) => {
            std::assert_eq!(elements, &vec![ImageDataElement::new(data_offset as u64, 4)]);
            std::assert_eq!(*rows_per_strip, UNBOUNDED_ROWS_PER_STRIP);
        }
        other => std::panic!("expected strips, found {:?}", other),
    }
    std::assert_eq!(root.image_data().unwrap().read_all(&source).unwrap(), vec![vec![1, 2, 3, 4]]);
}

#[test]
fn test_rows_per_strip_falls_back_to_image_length() {
    let bytes = single_directory(&[
        entry(t::IMAGE_LENGTH, 3, 1, 5),
        entry(t::STRIP_OFFSETS, 4, 1, 0),
        entry(t::STRIP_BYTE_COUNTS, 4, 1, 0),
    ]);
    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();
    match contents.root().unwrap().image_data() {
        Some(TiffImageData::Strips { rows_per_strip, .. }) => std::assert_eq!(*rows_per_strip, 5),
        other => std::panic!("expected strips, found {:?}", other),
    }
}

#[test]
fn test_mismatched_strip_arrays() {
    let bytes = single_directory(&[
        entry(t::STRIP_OFFSETS, 3, 2, 0x0020_0010),
        entry(t::STRIP_BYTE_COUNTS, 4, 1, 4),
    ]);
    let error = TiffReader::new().read_contents(&source(bytes)).unwrap_err();
    std::assert!(error.is_format_error());
}

#[test]
fn test_tiles_require_tile_size() {
    let bytes = single_directory(&[
        entry(t::TILE_OFFSETS, 4, 1, 0),
        entry(t::TILE_BYTE_COUNTS, 4, 1, 0),
    ]);
    let error = TiffReader::new().read_contents(&source(bytes)).unwrap_err();
    std::assert!(matches!(error, TiffError::MissingField(_)));
}

fn jpeg_file(stream: &[u8], declared_length: u32) -> Vec<u8> {
    let data_offset = 8 + directory_length(2);
    let mut bytes = single_directory(&[
        entry(t::JPEG_INTERCHANGE_FORMAT, 4, 1, data_offset),
        entry(t::JPEG_INTERCHANGE_FORMAT_LENGTH, 4, 1, declared_length),
    ]);
    bytes.extend_from_slice(stream);
    bytes
}

#[test]
fn test_jpeg_stream() {
    let bytes = jpeg_file(&[0xFF, 0xD8, 0xFF, 0xD9], 4);
    let contents = strict_reader().read_contents(&source(bytes)).unwrap();
    let jpeg = contents.root().unwrap().jpeg_data().unwrap();
    std::assert_eq!(jpeg.element, ImageDataElement::new(38, 4));
}

#[test]
fn test_jpeg_length_is_clamped() {
    let bytes = jpeg_file(&[0xFF, 0xD8, 0xFF, 0xD9], 100);
    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();
    std::assert_eq!(contents.root().unwrap().jpeg_data().unwrap().element.length, 4);
}

#[test]
fn test_jpeg_without_end_marker() {
    let bytes = jpeg_file(&[0xFF, 0xD8, 0x00, 0x00], 4);
    std::assert!(TiffReader::new().read_contents(&source(bytes.clone())).is_ok());

    let error = strict_reader().read_contents(&source(bytes)).unwrap_err();
    std::assert!(error.is_format_error());
}

#[test]
fn test_bigtiff_long8_dimensions() {
    // Header, 8-byte count, four 20-byte entries, next offset
    let data_offset = 16 + 8 + 4 * 20 + 8;
    let mut bytes = big_tiff_single_directory(&[
        (t::IMAGE_WIDTH, 16, 1, 4),
        (t::IMAGE_LENGTH, 16, 1, 3),
        (t::STRIP_OFFSETS, 16, 1, data_offset),
        (t::STRIP_BYTE_COUNTS, 16, 1, 4),
    ]);
    bytes.extend_from_slice(&[9, 8, 7, 6]);
    let source = source(bytes);

    let contents = strict_reader().read_contents(&source).unwrap();
    let root = contents.root().unwrap();
    std::assert_eq!(root.value::<u64>(&tags::IMAGE_LENGTH).unwrap(), 3);
    match root.image_data() {
        Some(TiffImageData::Strips { rows_per_strip, .. }) => std::assert_eq!(*rows_per_strip, 3),
        other => std::panic!("expected strips, found {:?}", other),
    }
    std::assert_eq!(root.image_data().unwrap().read_all(&source).unwrap(), vec![vec![9, 8, 7, 6]]);

    let bytes = big_tiff_single_directory(&[
        (t::TILE_WIDTH, 16, 1, 16),
        (t::TILE_LENGTH, 16, 1, 32),
        (t::TILE_OFFSETS, 16, 1, 0),
        (t::TILE_BYTE_COUNTS, 16, 1, 0),
    ]);
    let contents = strict_reader().read_contents(&super::test_utils::source(bytes)).unwrap();
    match contents.root().unwrap().image_data() {
        Some(TiffImageData::Tiles { tile_width, tile_length, .. }) => {
            std::assert_eq!((*tile_width, *tile_length), (16, 32));
        }
        other => std::panic!("expected tiles, found {:?}", other),
    }
}

#[test]
fn test_unusable_rows_per_strip() {
    // RowsPerStrip stored as SLONG
    let bytes = single_directory(&[
        entry(t::IMAGE_LENGTH, 3, 1, 5),
        entry(t::STRIP_OFFSETS, 4, 1, 0),
        entry(t::ROWS_PER_STRIP, 9, 1, 2),
        entry(t::STRIP_BYTE_COUNTS, 4, 1, 0),
    ]);

    let contents = TiffReader::new().read_contents(&source(bytes.clone())).unwrap();
    match contents.root().unwrap().image_data() {
        Some(TiffImageData::Strips { rows_per_strip, .. }) => std::assert_eq!(*rows_per_strip, 5),
        other => std::panic!("expected strips, found {:?}", other),
    }

    let error = strict_reader().read_contents(&source(bytes)).unwrap_err();
    std::assert!(matches!(error, TiffError::FieldTypeMismatch { .. }));
}

/// Root directory at 8 with one field, then a second directory whose strip arrays disagree
fn damaged_second_directory() -> Vec<u8> {
    let second = 8 + directory_length(1);
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[entry(t::IMAGE_WIDTH, 4, 1, 7)], second);
    push_directory(&mut bytes, &[
        entry(t::STRIP_OFFSETS, 3, 2, 0x0020_0010),
        entry(t::STRIP_BYTE_COUNTS, 4, 1, 4),
    ], 0);
    bytes
}

#[test]
fn test_first_directory_read_ignores_later_damage() {
    let bytes = damaged_second_directory();
    std::assert!(TiffReader::new().read_contents(&source(bytes.clone())).is_err());

    let contents = TiffReader::new().read_first_directory(&source(bytes)).unwrap();
    std::assert_eq!(contents.directory_count(), 1);
    std::assert_eq!(contents.root().unwrap().value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 7);
}

/// Counts fields and refuses the first one
#[derive(Default)]
struct RefuseFirstField {
    fields: usize,
    directories: usize,
}

impl Listener for RefuseFirstField {
    fn set_header(&mut self, _header: &TiffHeader) -> bool {
        true
    }

    fn add_directory(&mut self, _directory: Directory) -> bool {
        self.directories += 1;
        true
    }

    fn add_field(&mut self, _field: &Field) -> bool {
        self.fields += 1;
        false
    }

    fn read_image_data(&self) -> bool {
        true
    }

    fn read_offset_directories(&self) -> bool {
        true
    }
}

#[test]
fn test_refused_field_stops_before_sub_directories() {
    let exif_offset = 8 + directory_length(2);
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[
        entry(t::IMAGE_WIDTH, 4, 1, 1),
        entry(t::EXIF_OFFSET, 4, 1, exif_offset),
    ], 0);
    push_directory(&mut bytes, &[
        entry(t::STRIP_OFFSETS, 3, 2, 0x0020_0010),
        entry(t::STRIP_BYTE_COUNTS, 4, 1, 4),
    ], 0);
    std::assert!(strict_reader().read_contents(&source(bytes.clone())).is_err());

    let mut listener = RefuseFirstField::default();
    strict_reader().read(&source(bytes), &mut listener).unwrap();
    std::assert_eq!(listener.fields, 1);
    std::assert_eq!(listener.directories, 0);
}

#[test]
fn test_truncated_entry_table() {
    let mut bytes = classic_header(8);
    push_directory(&mut bytes, &[
        entry(t::IMAGE_WIDTH, 4, 1, 10),
        entry(t::IMAGE_LENGTH, 4, 1, 20),
        entry(t::COMPRESSION, 3, 1, 1),
    ], 0);
    // Keep the count and the first two entries
    bytes.truncate(8 + 2 + 2 * 12);

    let contents = TiffReader::new().read_contents(&source(bytes.clone())).unwrap();
    let root = contents.root().unwrap();
    std::assert_eq!(root.entry_count, 3);
    std::assert_eq!(root.fields.len(), 2);
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_LENGTH).unwrap(), 20);
    std::assert_eq!(root.next_directory_offset, 0);

    std::assert!(strict_reader().read_contents(&source(bytes)).is_err());
}
