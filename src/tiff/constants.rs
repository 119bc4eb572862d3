//! TIFF format constants
//!
//! This module defines constants used throughout the TIFF processing code,
//! making the code more readable and maintainable by replacing magic numbers
//! with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;

    /// Size of a classic header: order, version, 4-byte directory offset
    pub const TIFF_HEADER_SIZE: u64 = 8;

    /// Size of a BigTIFF header: order, version, offset size, reserved, 8-byte offset
    pub const BIG_TIFF_HEADER_SIZE: u64 = 16;
}

/// Directory layout constants
pub mod directory {
    /// Classic entry: tag, type, 4-byte count, 4-byte slot
    pub const TIFF_ENTRY_LENGTH: u64 = 12;
    /// BigTIFF entry: tag, type, 8-byte count, 8-byte slot
    pub const BIG_TIFF_ENTRY_LENGTH: u64 = 20;
    /// Classic inline value slot
    pub const TIFF_SLOT_LENGTH: usize = 4;
    /// BigTIFF inline value slot
    pub const BIG_TIFF_SLOT_LENGTH: usize = 8;
}

/// Field type codes from TIFF 6.0 and BigTIFF
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit IFD offset
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// Standard TIFF tags
pub mod tags {
    // Basic image structure tags
    pub const NEW_SUBFILE_TYPE: u16 = 254;         // Subfile data descriptor
    pub const SUBFILE_TYPE: u16 = 255;             // Old-style subfile data descriptor
    pub const IMAGE_WIDTH: u16 = 256;              // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;             // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;          // Bits per component
    pub const COMPRESSION: u16 = 259;              // Compression scheme
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262; // Color space of image data
    pub const IMAGE_DESCRIPTION: u16 = 270;        // Free-form description
    pub const MAKE: u16 = 271;                     // Scanner or camera manufacturer
    pub const MODEL: u16 = 272;                    // Scanner or camera model
    pub const STRIP_OFFSETS: u16 = 273;            // Offsets to the data strips
    pub const ORIENTATION: u16 = 274;              // Image orientation
    pub const SAMPLES_PER_PIXEL: u16 = 277;        // Number of components per pixel
    pub const ROWS_PER_STRIP: u16 = 278;           // Rows per strip of data
    pub const STRIP_BYTE_COUNTS: u16 = 279;        // Bytes counts for strips
    pub const X_RESOLUTION: u16 = 282;             // Horizontal resolution
    pub const Y_RESOLUTION: u16 = 283;             // Vertical resolution
    pub const PLANAR_CONFIGURATION: u16 = 284;     // How components are stored
    pub const PAGE_NAME: u16 = 285;                // Name of the page
    pub const T4_OPTIONS: u16 = 292;               // CCITT Group 3 options
    pub const RESOLUTION_UNIT: u16 = 296;          // Unit of measurement for resolution
    pub const PAGE_NUMBER: u16 = 297;              // Page number and page count
    pub const SOFTWARE: u16 = 305;                 // Software used to create the image
    pub const DATE_TIME: u16 = 306;                // Date and time of image creation
    pub const ARTIST: u16 = 315;                   // Person who created the image
    pub const HOST_COMPUTER: u16 = 316;            // Computer where the image was created
    pub const PREDICTOR: u16 = 317;                // Prediction scheme used on image data
    pub const COLOR_MAP: u16 = 320;                // Colormap for palette color images
    pub const TILE_WIDTH: u16 = 322;               // Width of a tile
    pub const TILE_LENGTH: u16 = 323;              // Length of a tile
    pub const TILE_OFFSETS: u16 = 324;             // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325;         // Byte counts for tiles
    pub const SUB_IFDS: u16 = 330;                 // Offsets to child IFDs
    pub const EXTRA_SAMPLES: u16 = 338;            // Description of extra components
    pub const SAMPLE_FORMAT: u16 = 339;            // Interpretation of sample data
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 513;  // Offset to JPEG SOI
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 514; // Bytes of JPEG data
    pub const COPYRIGHT: u16 = 33432;              // Copyright notice

    // GeoTIFF tags
    pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;   // Pixel size in map units
    pub const MODEL_TIEPOINT_TAG: u16 = 33922;      // Links raster to world coordinates
    pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;   // GeoTIFF keys structure
    pub const GEO_DOUBLE_PARAMS_TAG: u16 = 34736;   // GeoTIFF double parameters
    pub const GEO_ASCII_PARAMS_TAG: u16 = 34737;    // GeoTIFF ASCII parameters

    // Sub-directory pointers
    pub const EXIF_OFFSET: u16 = 34665;             // Offset to EXIF IFD
    pub const GPS_INFO: u16 = 34853;                // Offset to GPS IFD
    pub const INTEROP_OFFSET: u16 = 40965;          // Offset to Interoperability IFD (in EXIF)

    // GDAL specific tags
    pub const GDAL_METADATA: u16 = 42112;          // XML metadata
    pub const GDAL_NODATA: u16 = 42113;            // NoData marker value
}

/// EXIF directory tags
pub mod exif_tags {
    pub const EXPOSURE_TIME: u16 = 33434;          // Exposure time in seconds
    pub const F_NUMBER: u16 = 33437;               // F number
    pub const ISO_SPEED_RATINGS: u16 = 34855;      // ISO speed
    pub const EXIF_VERSION: u16 = 36864;           // EXIF version, four ASCII digits
    pub const DATE_TIME_ORIGINAL: u16 = 36867;     // Date and time of original capture
    pub const MAKER_NOTE: u16 = 37500;             // Manufacturer notes, opaque
    pub const USER_COMMENT: u16 = 37510;           // User comments
    pub const PIXEL_X_DIMENSION: u16 = 40962;      // Valid image width
    pub const PIXEL_Y_DIMENSION: u16 = 40963;      // Valid image height
}

/// GPS directory tags
pub mod gps_tags {
    pub const GPS_VERSION_ID: u16 = 0;             // GPS tag version
    pub const GPS_LATITUDE_REF: u16 = 1;           // North or south latitude
    pub const GPS_LATITUDE: u16 = 2;               // Latitude as degrees, minutes, seconds
    pub const GPS_LONGITUDE_REF: u16 = 3;          // East or west longitude
    pub const GPS_LONGITUDE: u16 = 4;              // Longitude as degrees, minutes, seconds
    pub const GPS_ALTITUDE_REF: u16 = 5;           // Altitude reference
    pub const GPS_ALTITUDE: u16 = 6;               // Altitude in meters
    pub const GPS_MAP_DATUM: u16 = 18;             // Geodetic survey data used
}

/// Interoperability directory tags
pub mod interop_tags {
    pub const INTEROPERABILITY_INDEX: u16 = 1;     // Interoperability rule
    pub const INTEROPERABILITY_VERSION: u16 = 2;   // Interoperability version
}

/// Compression types
pub mod compression {
    pub const NONE: u16 = 1;              // No compression
    pub const CCITT_RLE: u16 = 2;         // CCITT modified Huffman RLE
    pub const CCITT_FAX3: u16 = 3;        // CCITT Group 3 fax
    pub const CCITT_FAX4: u16 = 4;        // CCITT Group 4 fax
    pub const LZW: u16 = 5;               // LZW compression
    pub const JPEG_OLD: u16 = 6;          // Old JPEG (deprecated)
    pub const JPEG: u16 = 7;              // JPEG compression
    pub const DEFLATE: u16 = 8;           // Adobe Deflate (zlib)
    pub const ZSTD: u16 = 14;             // Zstandard compression
    pub const PACKBITS: u16 = 32773;      // PackBits compression
}

/// Photometric interpretation values
pub mod photometric {
    pub const WHITE_IS_ZERO: u16 = 0;     // Minimum value is white
    pub const BLACK_IS_ZERO: u16 = 1;     // Minimum value is black
    pub const RGB: u16 = 2;               // RGB color model
    pub const PALETTE: u16 = 3;           // Palette color (color map indexed)
    pub const TRANSPARENCY_MASK: u16 = 4; // Transparency mask
    pub const CMYK: u16 = 5;              // CMYK color model
    pub const YCBCR: u16 = 6;             // YCbCr color model
    pub const CIELAB: u16 = 8;            // CIE L*a*b color model
}

/// JPEG stream markers
pub mod jpeg {
    /// End-of-image marker expected at the end of an interchange-format stream
    pub const EOI: [u8; 2] = [0xFF, 0xD9];
}
