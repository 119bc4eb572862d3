//! Tests for field types and the value codec

extern crate std;

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::TiffError;
use crate::tiff::field_type::{FieldType, FieldValue, Rational, SRational};

#[test]
fn test_type_codes() {
    std::assert_eq!(FieldType::from_code(3).unwrap(), FieldType::Short);
    std::assert_eq!(FieldType::from_code(16).unwrap(), FieldType::Long8);
    std::assert_eq!(FieldType::Rational.code(), 5);
    std::assert!(matches!(FieldType::from_code(99), Err(TiffError::UnsupportedFieldType(99))));
    std::assert!(matches!(FieldType::from_code(0), Err(TiffError::UnsupportedFieldType(0))));
}

#[test]
fn test_type_sizes() {
    std::assert_eq!(FieldType::Ascii.size(), 1);
    std::assert_eq!(FieldType::SShort.size(), 2);
    std::assert_eq!(FieldType::Float.size(), 4);
    std::assert_eq!(FieldType::SRational.size(), 8);
    std::assert_eq!(FieldType::Ifd8.size(), 8);
}

#[test]
fn test_big_tiff_only_types() {
    std::assert!(FieldType::Long8.is_big_tiff_only());
    std::assert!(FieldType::SLong8.is_big_tiff_only());
    std::assert!(FieldType::Ifd8.is_big_tiff_only());
    std::assert!(!FieldType::Long.is_big_tiff_only());
    std::assert!(!FieldType::Double.is_big_tiff_only());
}

#[test]
fn test_decode_by_byte_order() {
    let bytes = [0x00, 0x01, 0x00, 0x02];
    std::assert_eq!(FieldType::Short.decode(&bytes, ByteOrder::BigEndian).unwrap(),
                    FieldValue::Short(vec![1, 2]));
    std::assert_eq!(FieldType::Short.decode(&bytes, ByteOrder::LittleEndian).unwrap(),
                    FieldValue::Short(vec![256, 512]));
}

#[test]
fn test_decode_rejects_partial_elements() {
    let result = FieldType::Long.decode(&[1, 2, 3], ByteOrder::LittleEndian);
    std::assert!(result.unwrap_err().is_format_error());
}

#[test]
fn test_ascii_strings() {
    let value = FieldType::Ascii.decode(b"one\0two\0", ByteOrder::LittleEndian).unwrap();
    std::assert_eq!(value, FieldValue::Ascii(vec!["one".to_string(), "two".to_string()]));
    std::assert_eq!(value.count(), 8);

    // Missing terminator
    let value = FieldType::Ascii.decode(b"abc", ByteOrder::LittleEndian).unwrap();
    std::assert_eq!(value, FieldValue::Ascii(vec!["abc".to_string()]));
}

#[test]
fn test_ascii_high_bytes_are_kept() {
    let raw = [65, 0xE9, 66, 0];
    let value = FieldType::Ascii.decode(&raw, ByteOrder::LittleEndian).unwrap();
    std::assert_eq!(value, FieldValue::Ascii(vec!["A\u{e9}B".to_string()]));
    std::assert_eq!(value.count(), 4);
    std::assert_eq!(value.encode(ByteOrder::LittleEndian).unwrap(), raw.to_vec());

    // Wider chars are written as UTF-8
    let value = FieldValue::from("\u{4e2d}");
    std::assert_eq!(value.count(), 4);
    std::assert_eq!(value.encode(ByteOrder::LittleEndian).unwrap(), vec![0xE4, 0xB8, 0xAD, 0]);
}

#[test]
fn test_encode_signed_and_rational() {
    let value = FieldValue::SRational(vec![SRational::new(-1, 2)]);
    let bytes = value.encode(ByteOrder::BigEndian).unwrap();
    std::assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 2]);
    std::assert_eq!(FieldType::SRational.decode(&bytes, ByteOrder::BigEndian).unwrap(), value);

    let value = FieldValue::Double(vec![0.1, -2.5]);
    let bytes = value.encode(ByteOrder::LittleEndian).unwrap();
    std::assert_eq!(bytes.len(), 16);
    std::assert_eq!(FieldType::Double.decode(&bytes, ByteOrder::LittleEndian).unwrap(), value);
}

#[test]
fn test_from_conversions() {
    std::assert_eq!(FieldValue::from(7u16), FieldValue::Short(vec![7]));
    std::assert_eq!(FieldValue::from(vec![1u32, 2]), FieldValue::Long(vec![1, 2]));
    std::assert_eq!(FieldValue::from("A"), FieldValue::Ascii(vec!["A".to_string()]));
    std::assert_eq!(FieldValue::from("A").count(), 2);
    std::assert_eq!(FieldValue::from(5u64).field_type(), FieldType::Long8);
}

#[test]
fn test_widening_integer_view() {
    std::assert_eq!(FieldValue::Short(vec![1, 2]).as_u64s(), Some(vec![1, 2]));
    std::assert_eq!(FieldValue::Long8(vec![1 << 40]).as_u64s(), Some(vec![1 << 40]));
    std::assert_eq!(FieldValue::SShort(vec![-1]).as_u64s(), None);
}

#[test]
fn test_rational_from_f64() {
    std::assert_eq!(Rational::from_f64(0.5), Rational::new(1, 2));
    std::assert_eq!(Rational::from_f64(2.0 / 3.0), Rational::new(2, 3));
    std::assert_eq!(Rational::from_f64(37.25), Rational::new(149, 4));
    std::assert_eq!(Rational::from_f64(122.0), Rational::new(122, 1));
    std::assert_eq!(Rational::from_f64(0.0), Rational::new(0, 1));
    std::assert_eq!(Rational::from_f64(-3.0), Rational::new(0, 1));
    std::assert_eq!(Rational::from_f64(f64::NAN), Rational::new(0, 1));
    std::assert_eq!(Rational::from_f64(1e12), Rational::new(u32::MAX, 1));
}

#[test]
fn test_rational_approximation_is_close() {
    let value = std::f64::consts::PI;
    let rational = Rational::from_f64(value);
    std::assert!((rational.to_f64() - value).abs() < 1e-9);
}
