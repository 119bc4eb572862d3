//! Integration tests for reading and rewriting TIFF files

extern crate std;

use std::fs;
use std::path::PathBuf;

use tiffkit::tiff::tags;
use tiffkit::{ByteOrder, ByteSourceArray, LosslessWriter, LossyWriter, OutputSet, TiffReader, TiffVariant};

fn sample_tiff() -> Vec<u8> {
    let mut buffer = Vec::new();

    // TIFF header (little-endian)
    buffer.extend_from_slice(&[0x49, 0x49]); // "II" for little-endian
    buffer.extend_from_slice(&[42, 0]);      // TIFF magic number
    buffer.extend_from_slice(&[8, 0, 0, 0]); // Offset to first IFD

    // IFD with four entries
    buffer.extend_from_slice(&[4, 0]);       // Number of entries

    // Entry 1: ImageWidth (tag 256)
    buffer.extend_from_slice(&[0, 1]);       // Tag (256)
    buffer.extend_from_slice(&[4, 0]);       // Type (LONG)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[200, 0, 0, 0]); // Value (width = 200)

    // Entry 2: ImageLength (tag 257)
    buffer.extend_from_slice(&[1, 1]);       // Tag (257)
    buffer.extend_from_slice(&[4, 0]);       // Type (LONG)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[100, 0, 0, 0]); // Value (height = 100)

    // Entry 3: StripOffsets (tag 273), data right after the IFD
    buffer.extend_from_slice(&[0x11, 1]);    // Tag (273)
    buffer.extend_from_slice(&[4, 0]);       // Type (LONG)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[62, 0, 0, 0]); // Offset

    // Entry 4: StripByteCounts (tag 279)
    buffer.extend_from_slice(&[0x17, 1]);    // Tag (279)
    buffer.extend_from_slice(&[4, 0]);       // Type (LONG)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[4, 0, 0, 0]); // Length

    // Next IFD offset (0 = no more IFDs)
    buffer.extend_from_slice(&[0, 0, 0, 0]);

    // Strip data
    buffer.extend_from_slice(&[1, 2, 3, 4]);
    buffer
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tiffkit-{}-{}", std::process::id(), name))
}

#[test]
fn test_complete_tiff_workflow() {
    let contents = TiffReader::new().read_contents(&ByteSourceArray::new(sample_tiff())).unwrap();
    std::assert!(!contents.is_big_tiff());
    std::assert_eq!(contents.directories.len(), 1);

    let root = contents.root().unwrap();
    std::assert_eq!(root.fields.len(), 4);
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 200);
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_LENGTH).unwrap(), 100);
}

#[test]
fn test_load_from_file() {
    let path = temp_path("load.tif");
    fs::write(&path, sample_tiff()).unwrap();

    let result = TiffReader::new().load(&path);
    fs::remove_file(&path).unwrap();

    let contents = result.unwrap();
    std::assert_eq!(contents.root().unwrap().value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 200);
}

#[test]
fn test_edit_and_rewrite() {
    let source = ByteSourceArray::new(sample_tiff());
    let contents = TiffReader::new().read_directories(&source).unwrap();
    let mut set = OutputSet::from_contents(&contents, &source).unwrap();
    set.get_or_create_root_directory().add(&tags::SOFTWARE, "tiffkit").unwrap();

    let bytes = LossyWriter::new(ByteOrder::BigEndian).write_to_vec(&mut set).unwrap();
    let source = ByteSourceArray::new(bytes);
    let contents = TiffReader::builder().strict(true).build().read_contents(&source).unwrap();

    let root = contents.root().unwrap();
    std::assert_eq!(root.ascii(&tags::SOFTWARE).unwrap(), "tiffkit");
    std::assert_eq!(root.value::<u32>(&tags::IMAGE_WIDTH).unwrap(), 200);
    std::assert_eq!(root.image_data().unwrap().read_all(&source).unwrap(), vec![vec![1, 2, 3, 4]]);
}

#[test]
fn test_unchanged_lossless_rewrite() {
    // Anything written by this crate is laid out without gaps
    let source = ByteSourceArray::new(sample_tiff());
    let contents = TiffReader::new().read_contents(&source).unwrap();
    let mut set = OutputSet::from_contents(&contents, &source).unwrap();
    let original = LossyWriter::new(ByteOrder::LittleEndian).write_to_vec(&mut set).unwrap();

    let source = ByteSourceArray::new(original.clone());
    let contents = TiffReader::new().read_contents(&source).unwrap();
    let mut set = OutputSet::from_contents(&contents, &source).unwrap();
    let rewritten = LosslessWriter::new(original.clone()).write_to_vec(&mut set).unwrap();

    std::assert_eq!(rewritten, original);
}

#[test]
fn test_convert_to_bigtiff() {
    let source = ByteSourceArray::new(sample_tiff());
    let contents = TiffReader::new().read_contents(&source).unwrap();
    let mut set = OutputSet::from_contents(&contents, &source).unwrap();
    set.set_variant(TiffVariant::BigTiff);

    let bytes = LossyWriter::new(set.byte_order()).write_to_vec(&mut set).unwrap();
    let source = ByteSourceArray::new(bytes);
    let contents = TiffReader::new().read_contents(&source).unwrap();
    std::assert!(contents.is_big_tiff());
    std::assert_eq!(contents.root().unwrap().image_data().unwrap().read_all(&source).unwrap(),
                    vec![vec![1, 2, 3, 4]]);
}
