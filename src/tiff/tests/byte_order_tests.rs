//! Tests for the byte order module

extern crate std;

use std::io::Cursor;
use byteorder::{LittleEndian, BigEndian, WriteBytesExt};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler, LittleEndianHandler, BigEndianHandler};
use crate::tiff::errors::TiffError;

#[test]
fn test_byte_order_detection_little_endian() {
    let result = ByteOrder::detect(*b"II");
    std::assert!(result.is_ok());
    std::assert_eq!(result.unwrap(), ByteOrder::LittleEndian);
}

#[test]
fn test_byte_order_detection_big_endian() {
    let result = ByteOrder::detect(*b"MM");
    std::assert!(result.is_ok());
    std::assert_eq!(result.unwrap(), ByteOrder::BigEndian);
}

#[test]
fn test_byte_order_detection_invalid() {
    let result = ByteOrder::detect([0x12, 0x34]);
    std::assert!(matches!(result, Err(TiffError::InvalidByteOrder(0x1234))));

    // Mixed markers are not a byte order either
    std::assert!(ByteOrder::detect(*b"IM").is_err());
}

#[test]
fn test_marker_round_trip() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        std::assert_eq!(ByteOrder::detect(order.marker()).unwrap(), order);
    }
}

#[test]
fn test_little_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_u32::<LittleEndian>(0x12345678).unwrap();
    buffer.write_u64::<LittleEndian>(0x1234567890ABCDEF).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = LittleEndianHandler;

    std::assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
    std::assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    std::assert_eq!(handler.read_u64(&mut cursor).unwrap(), 0x1234567890ABCDEF);
}

#[test]
fn test_big_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();
    buffer.write_u32::<BigEndian>(0x12345678).unwrap();
    buffer.write_u64::<BigEndian>(0x1234567890ABCDEF).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = BigEndianHandler;

    std::assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
    std::assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    std::assert_eq!(handler.read_u64(&mut cursor).unwrap(), 0x1234567890ABCDEF);
}

#[test]
fn test_handler_writes() {
    let mut little = Vec::new();
    LittleEndianHandler.write_u32(&mut little, 0x01020304).unwrap();
    std::assert_eq!(little, vec![4, 3, 2, 1]);

    let mut big = Vec::new();
    BigEndianHandler.write_u32(&mut big, 0x01020304).unwrap();
    BigEndianHandler.write_u16(&mut big, 0x0506).unwrap();
    std::assert_eq!(big, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_short_read_fails() {
    let mut cursor = Cursor::new(vec![0x01u8]);
    std::assert!(LittleEndianHandler.read_u16(&mut cursor).is_err());
}
