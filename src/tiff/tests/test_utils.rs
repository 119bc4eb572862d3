use byteorder::{LittleEndian, WriteBytesExt};

use crate::io::byte_source::ByteSourceArray;

/// One classic directory entry; `value` fills the 4-byte slot little-endian
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    pub value: u32,
}

pub fn entry(tag: u16, field_type: u16, count: u32, value: u32) -> Entry {
    Entry { tag, field_type, count, value }
}

/// On-disk length of a classic directory with `entries` entries
pub fn directory_length(entries: usize) -> u32 {
    2 + 12 * entries as u32 + 4
}

/// Classic little-endian header pointing at `first_offset`
pub fn classic_header(first_offset: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II for little-endian
    buffer.write_u16::<LittleEndian>(42).unwrap();     // TIFF magic number
    buffer.write_u32::<LittleEndian>(first_offset).unwrap();
    buffer
}

/// Appends a classic directory to the buffer
pub fn push_directory(buffer: &mut Vec<u8>, entries: &[Entry], next: u32) {
    buffer.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    for e in entries {
        buffer.write_u16::<LittleEndian>(e.tag).unwrap();
        buffer.write_u16::<LittleEndian>(e.field_type).unwrap();
        buffer.write_u32::<LittleEndian>(e.count).unwrap();
        buffer.write_u32::<LittleEndian>(e.value).unwrap();
    }
    buffer.write_u32::<LittleEndian>(next).unwrap();
}

/// Classic file with a single directory at offset 8
pub fn single_directory(entries: &[Entry]) -> Vec<u8> {
    let mut buffer = classic_header(8);
    push_directory(&mut buffer, entries, 0);
    buffer
}

pub fn source(bytes: Vec<u8>) -> ByteSourceArray {
    ByteSourceArray::new(bytes)
}

/// Creates a test buffer with TIFF header and sample data
pub fn create_test_tiff_buffer() -> Vec<u8> {
    single_directory(&[
        entry(256, 4, 1, 800), // ImageWidth, LONG
        entry(257, 4, 1, 600), // ImageLength, LONG
    ])
}

/// Creates a test buffer with BigTIFF header and sample data
pub fn create_test_bigtiff_buffer() -> Vec<u8> {
    let mut buffer = Vec::new();

    // BigTIFF header (little-endian)
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II for little-endian
    buffer.write_u16::<LittleEndian>(43).unwrap();     // BigTIFF version
    buffer.write_u16::<LittleEndian>(8).unwrap();      // Offset size
    buffer.write_u16::<LittleEndian>(0).unwrap();      // Reserved
    buffer.write_u64::<LittleEndian>(16).unwrap();     // IFD offset

    // Sample IFD (at offset 16)
    buffer.write_u64::<LittleEndian>(2).unwrap();      // Entry count (2 entries)

    // Entry 1: ImageWidth (tag 256)
    buffer.write_u16::<LittleEndian>(256).unwrap();    // Tag
    buffer.write_u16::<LittleEndian>(4).unwrap();      // Type (LONG)
    buffer.write_u64::<LittleEndian>(1).unwrap();      // Count
    buffer.write_u64::<LittleEndian>(1024).unwrap();   // Value (width)

    // Entry 2: ImageLength/Height (tag 257)
    buffer.write_u16::<LittleEndian>(257).unwrap();    // Tag
    buffer.write_u16::<LittleEndian>(4).unwrap();      // Type (LONG)
    buffer.write_u64::<LittleEndian>(1).unwrap();      // Count
    buffer.write_u64::<LittleEndian>(768).unwrap();    // Value (height)

    // Next IFD offset (0 = no more IFDs)
    buffer.write_u64::<LittleEndian>(0).unwrap();

    buffer
}

/// Little-endian BigTIFF with one directory at 16; entries are (tag, type, count, slot value)
pub fn big_tiff_single_directory(entries: &[(u16, u16, u64, u64)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u64::<LittleEndian>(16).unwrap();

    buffer.write_u64::<LittleEndian>(entries.len() as u64).unwrap();
    for &(tag, field_type, count, value) in entries {
        buffer.write_u16::<LittleEndian>(tag).unwrap();
        buffer.write_u16::<LittleEndian>(field_type).unwrap();
        buffer.write_u64::<LittleEndian>(count).unwrap();
        buffer.write_u64::<LittleEndian>(value).unwrap();
    }
    buffer.write_u64::<LittleEndian>(0).unwrap();
    buffer
}
