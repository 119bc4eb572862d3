//! Human-readable formatting for directory dumps
//!
//! Translates well-known numeric tag values into names and shortens long
//! value lists so a dump of a large file stays readable.

use crate::tiff::constants::{compression, photometric};
use crate::tiff::directory::{Directory, TiffImageData};
use crate::tiff::field::Field;
use crate::tiff::tags;

/// Values shown before a list is elided
pub const MAX_LISTED_VALUES: usize = 16;

/// Converts a TIFF compression code to its human-readable description
pub fn compression_name(code: u64) -> &'static str {
    match u16::try_from(code) {
        Ok(compression::NONE) => "Uncompressed",
        Ok(compression::CCITT_RLE) => "CCITT RLE",
        Ok(compression::CCITT_FAX3) => "CCITT Group 3 fax",
        Ok(compression::CCITT_FAX4) => "CCITT Group 4 fax",
        Ok(compression::LZW) => "LZW",
        Ok(compression::JPEG_OLD) => "JPEG (old-style)",
        Ok(compression::JPEG) => "JPEG",
        Ok(compression::DEFLATE) => "Adobe Deflate (zlib)",
        Ok(compression::ZSTD) => "ZSTD",
        Ok(compression::PACKBITS) => "PackBits",
        _ => "Unknown",
    }
}

/// Converts a photometric interpretation code to its name
pub fn photometric_name(code: u64) -> &'static str {
    match u16::try_from(code) {
        Ok(photometric::WHITE_IS_ZERO) => "WhiteIsZero",
        Ok(photometric::BLACK_IS_ZERO) => "BlackIsZero",
        Ok(photometric::RGB) => "RGB",
        Ok(photometric::PALETTE) => "Palette Color",
        Ok(photometric::TRANSPARENCY_MASK) => "Transparency Mask",
        Ok(photometric::CMYK) => "CMYK",
        Ok(photometric::YCBCR) => "YCbCr",
        Ok(photometric::CIELAB) => "CIE L*a*b*",
        _ => "Unknown",
    }
}

/// Joins at most `max` items, noting how many were left out
pub fn elide_list<T: ToString>(values: &[T], max: usize) -> String {
    let shown: Vec<String> = values.iter().take(max).map(|v| v.to_string()).collect();
    if values.len() > max {
        format!("{}, ... ({} more)", shown.join(", "), values.len() - max)
    } else {
        shown.join(", ")
    }
}

/// One line describing a field, with its value shortened
pub fn format_field(field: &Field) -> String {
    let value = match field.value() {
        Ok(value) => match value.as_u64s() {
            Some(numbers) if numbers.len() > MAX_LISTED_VALUES => elide_list(&numbers, MAX_LISTED_VALUES),
            _ => value.to_string(),
        },
        Err(e) => format!("<{}>", e),
    };
    let location = if field.inline { "inline".to_string() } else { format!("at {}", field.offset) };
    format!("{} ({}): {} [{}, count {}, {}]",
            field.tag, field.tag_name(), value, field.field_type.name(), field.count, location)
}

/// Summary lines for an image directory: size, compression, layout
pub fn image_summary(directory: &Directory) -> Vec<String> {
    let mut lines = Vec::new();

    let width = directory.find_value::<u64>(&tags::IMAGE_WIDTH).ok().flatten();
    let height = directory.find_value::<u64>(&tags::IMAGE_LENGTH).ok().flatten();
    if let (Some(width), Some(height)) = (width, height) {
        lines.push(format!("Dimensions: {}x{}", width, height));
    }
    if let Ok(Some(code)) = directory.find_value::<u64>(&tags::COMPRESSION) {
        lines.push(format!("Compression: {} ({})", code, compression_name(code)));
    }
    if let Ok(Some(code)) = directory.find_value::<u64>(&tags::PHOTOMETRIC_INTERPRETATION) {
        lines.push(format!("Photometric: {} ({})", code, photometric_name(code)));
    }

    match directory.image_data() {
        Some(TiffImageData::Strips { elements, rows_per_strip }) => {
            let total: u64 = elements.iter().map(|e| e.length).sum();
            lines.push(format!("Strips: {} totalling {} bytes, {} rows per strip",
                               elements.len(), total, rows_per_strip));
        }
        Some(TiffImageData::Tiles { elements, tile_width, tile_length }) => {
            let total: u64 = elements.iter().map(|e| e.length).sum();
            lines.push(format!("Tiles: {} of {}x{} totalling {} bytes",
                               elements.len(), tile_width, tile_length, total));
        }
        None => {}
    }
    if let Some(jpeg) = directory.jpeg_data() {
        lines.push(format!("JPEG: {} bytes at {}", jpeg.element.length, jpeg.element.offset));
    }
    lines
}
