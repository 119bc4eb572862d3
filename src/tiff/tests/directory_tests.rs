//! Tests for directory accessors and tag descriptors

extern crate std;

use crate::tiff::constants::tags as t;
use crate::tiff::directory::{Directory, DirectoryType};
use crate::tiff::errors::TiffError;
use crate::tiff::field_type::FieldValue;
use crate::tiff::reader::TiffReader;
use crate::tiff::tag_info::{TagGroup, TagInfo};
use crate::tiff::tags;

use super::test_utils::{entry, single_directory, source};

fn read_root(bytes: Vec<u8>) -> Directory {
    let contents = TiffReader::new().read_contents(&source(bytes)).unwrap();
    contents.directories.into_iter().next().unwrap()
}

fn sample_directory() -> Directory {
    read_root(single_directory(&[
        entry(t::IMAGE_WIDTH, 3, 1, 640),
        entry(t::BITS_PER_SAMPLE, 3, 2, 0x0008_0008),
        entry(t::COMPRESSION, 4, 1, 1),
    ]))
}

#[test]
fn test_widening_value_access() {
    let directory = sample_directory();
    std::assert_eq!(directory.value::<u16>(&tags::IMAGE_WIDTH).unwrap(), 640);
    std::assert_eq!(directory.value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 640);
    std::assert_eq!(directory.value::<u64>(&tags::IMAGE_WIDTH).unwrap(), 640);
    std::assert_eq!(directory.find_field_by_tag(t::IMAGE_WIDTH).unwrap().int_value().unwrap(), 640);
}

#[test]
fn test_missing_field() {
    let directory = sample_directory();

    let error = directory.value::<String>(&tags::SOFTWARE).unwrap_err();
    std::assert!(matches!(error, TiffError::MissingField(_)));
    std::assert_eq!(error.to_string(), "Required field \"Software\" is missing");

    std::assert!(directory.find_value::<String>(&tags::SOFTWARE).unwrap().is_none());
    std::assert!(directory.values::<String>(&tags::SOFTWARE, false).unwrap().is_none());
    std::assert!(directory.values::<String>(&tags::SOFTWARE, true).is_err());
}

#[test]
fn test_type_mismatch() {
    let directory = sample_directory();

    // Compression only accepts SHORT
    let error = directory.value::<u16>(&tags::COMPRESSION).unwrap_err();
    std::assert_eq!(error.to_string(), "Required field \"Compression\" has incorrect type LONG");
    std::assert!(directory.values::<u16>(&tags::COMPRESSION, false).unwrap().is_none());

    // Accepted type, wrong Rust type
    let error = directory.value::<String>(&tags::IMAGE_WIDTH).unwrap_err();
    std::assert!(matches!(error, TiffError::FieldTypeMismatch { .. }));
}

#[test]
fn test_count_mismatch() {
    let directory = sample_directory();

    let error = directory.value::<u16>(&tags::BITS_PER_SAMPLE).unwrap_err();
    std::assert_eq!(error.to_string(), "Field \"BitsPerSample\" has wrong count 2 (expected 1)");
    std::assert_eq!(directory.values::<u16>(&tags::BITS_PER_SAMPLE, true).unwrap(), Some(vec![8, 8]));

    let error = directory.find_field(&tags::BITS_PER_SAMPLE).unwrap().int_value().unwrap_err();
    std::assert!(matches!(error, TiffError::FieldCountMismatch { found: 2, .. }));
}

#[test]
fn test_directory_length() {
    let directory = sample_directory();
    std::assert_eq!(directory.entry_count, 3);
    std::assert_eq!(directory.length(), 2 + 3 * 12 + 4);
    std::assert!(!directory.has_image_data());
    std::assert!(!directory.has_jpeg_data());
}

#[test]
fn test_directory_types() {
    std::assert!(DirectoryType::ROOT.is_root());
    std::assert_eq!(DirectoryType::ROOT.next_sibling(), DirectoryType::Image(1));
    std::assert_eq!(DirectoryType::Exif.next_sibling(), DirectoryType::Unknown);
    std::assert_eq!(DirectoryType::Interop.code(), -4);
    std::assert_eq!(DirectoryType::Gps.code(), -3);
    std::assert_eq!(DirectoryType::Exif.code(), -2);
    std::assert_eq!(DirectoryType::Image(3).code(), 3);
    std::assert_eq!(DirectoryType::Gps.tag_group(), TagGroup::Gps);
    std::assert_eq!(DirectoryType::Image(2).tag_group(), TagGroup::Tiff);
    std::assert_eq!(DirectoryType::ROOT.to_string(), "Root");
}

#[test]
fn test_tag_lookup() {
    std::assert_eq!(TagInfo::name_of(TagGroup::Gps, 0), "GPSVersionID");
    std::assert_eq!(TagInfo::name_of(TagGroup::Tiff, 256), "ImageWidth");
    // EXIF tags are found from TIFF directories and the other way around
    std::assert_eq!(TagInfo::name_of(TagGroup::Tiff, 36864), "ExifVersion");
    std::assert_eq!(TagInfo::name_of(TagGroup::Exif, 256), "ImageWidth");
    // GPS numbers do not fall back
    std::assert_eq!(TagInfo::name_of(TagGroup::Gps, 256), "Unknown (256)");
    std::assert_eq!(TagInfo::lookup(TagGroup::Interop, 1), Some(&tags::INTEROPERABILITY_INDEX));
}

#[test]
fn test_value_contract() {
    std::assert!(tags::PAGE_NUMBER.check_value(&FieldValue::Short(vec![1, 3])).is_ok());

    let error = tags::PAGE_NUMBER.check_value(&FieldValue::Short(vec![1])).unwrap_err();
    std::assert!(matches!(error, TiffError::FieldCountMismatch { found: 1, .. }));

    let error = tags::IMAGE_WIDTH.check_value(&FieldValue::from("wide")).unwrap_err();
    std::assert!(matches!(error, TiffError::FieldTypeMismatch { .. }));

    // ASCII arity counts the terminating NUL
    std::assert!(tags::GPS_LATITUDE_REF.check_value(&FieldValue::from("N")).is_ok());
    std::assert!(tags::GPS_LATITUDE_REF.check_value(&FieldValue::from("NE")).is_err());
}
