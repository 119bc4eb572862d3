//! Tag catalog
//!
//! Static descriptors for the tags this crate reads and writes by name.
//! Tags absent from the catalog are still read and rewritten as raw fields.

use crate::tiff::constants::{exif_tags, gps_tags, interop_tags, tags as t};
use crate::tiff::field_type::FieldType;
use crate::tiff::tag_info::TagGroup::{Exif, Gps, Interop, Tiff};
use crate::tiff::tag_info::{Arity, TagInfo};

const BYTE: &[FieldType] = &[FieldType::Byte];
const ASCII: &[FieldType] = &[FieldType::Ascii];
const SHORT: &[FieldType] = &[FieldType::Short];
const LONG: &[FieldType] = &[FieldType::Long];
const SHORT_OR_LONG: &[FieldType] = &[FieldType::Short, FieldType::Long];
const SHORT_LONG_OR_LONG8: &[FieldType] = &[FieldType::Short, FieldType::Long, FieldType::Long8];
const LONG_OR_LONG8: &[FieldType] = &[FieldType::Long, FieldType::Long8];
const DIRECTORY_POINTER: &[FieldType] = &[FieldType::Long, FieldType::Ifd, FieldType::Long8, FieldType::Ifd8];
const RATIONAL: &[FieldType] = &[FieldType::Rational];
const DOUBLE: &[FieldType] = &[FieldType::Double];
const UNDEFINED: &[FieldType] = &[FieldType::Undefined];

const ONE: Arity = Arity::Fixed(1);
const ANY: Arity = Arity::Variable;

pub static NEW_SUBFILE_TYPE: TagInfo = TagInfo::new("NewSubfileType", t::NEW_SUBFILE_TYPE, LONG, ONE, Tiff);
pub static SUBFILE_TYPE: TagInfo = TagInfo::new("SubfileType", t::SUBFILE_TYPE, SHORT, ONE, Tiff);
pub static IMAGE_WIDTH: TagInfo = TagInfo::new("ImageWidth", t::IMAGE_WIDTH, SHORT_LONG_OR_LONG8, ONE, Tiff);
pub static IMAGE_LENGTH: TagInfo = TagInfo::new("ImageLength", t::IMAGE_LENGTH, SHORT_LONG_OR_LONG8, ONE, Tiff);
pub static BITS_PER_SAMPLE: TagInfo = TagInfo::new("BitsPerSample", t::BITS_PER_SAMPLE, SHORT, ANY, Tiff);
pub static COMPRESSION: TagInfo = TagInfo::new("Compression", t::COMPRESSION, SHORT, ONE, Tiff);
pub static PHOTOMETRIC_INTERPRETATION: TagInfo =
    TagInfo::new("PhotometricInterpretation", t::PHOTOMETRIC_INTERPRETATION, SHORT, ONE, Tiff);
pub static IMAGE_DESCRIPTION: TagInfo = TagInfo::new("ImageDescription", t::IMAGE_DESCRIPTION, ASCII, ANY, Tiff);
pub static MAKE: TagInfo = TagInfo::new("Make", t::MAKE, ASCII, ANY, Tiff);
pub static MODEL: TagInfo = TagInfo::new("Model", t::MODEL, ASCII, ANY, Tiff);
pub static STRIP_OFFSETS: TagInfo =
    TagInfo::new("StripOffsets", t::STRIP_OFFSETS, SHORT_LONG_OR_LONG8, ANY, Tiff);
pub static ORIENTATION: TagInfo = TagInfo::new("Orientation", t::ORIENTATION, SHORT, ONE, Tiff);
pub static SAMPLES_PER_PIXEL: TagInfo = TagInfo::new("SamplesPerPixel", t::SAMPLES_PER_PIXEL, SHORT, ONE, Tiff);
pub static ROWS_PER_STRIP: TagInfo = TagInfo::new("RowsPerStrip", t::ROWS_PER_STRIP, SHORT_LONG_OR_LONG8, ONE, Tiff);
pub static STRIP_BYTE_COUNTS: TagInfo =
    TagInfo::new("StripByteCounts", t::STRIP_BYTE_COUNTS, SHORT_LONG_OR_LONG8, ANY, Tiff);
pub static X_RESOLUTION: TagInfo = TagInfo::new("XResolution", t::X_RESOLUTION, RATIONAL, ONE, Tiff);
pub static Y_RESOLUTION: TagInfo = TagInfo::new("YResolution", t::Y_RESOLUTION, RATIONAL, ONE, Tiff);
pub static PLANAR_CONFIGURATION: TagInfo =
    TagInfo::new("PlanarConfiguration", t::PLANAR_CONFIGURATION, SHORT, ONE, Tiff);
pub static PAGE_NAME: TagInfo = TagInfo::new("PageName", t::PAGE_NAME, ASCII, ANY, Tiff);
pub static T4_OPTIONS: TagInfo = TagInfo::new("T4Options", t::T4_OPTIONS, LONG, ONE, Tiff);
pub static RESOLUTION_UNIT: TagInfo = TagInfo::new("ResolutionUnit", t::RESOLUTION_UNIT, SHORT, ONE, Tiff);
pub static PAGE_NUMBER: TagInfo = TagInfo::new("PageNumber", t::PAGE_NUMBER, SHORT, Arity::Fixed(2), Tiff);
pub static SOFTWARE: TagInfo = TagInfo::new("Software", t::SOFTWARE, ASCII, ANY, Tiff);
pub static DATE_TIME: TagInfo = TagInfo::new("DateTime", t::DATE_TIME, ASCII, Arity::Fixed(20), Tiff);
pub static ARTIST: TagInfo = TagInfo::new("Artist", t::ARTIST, ASCII, ANY, Tiff);
pub static HOST_COMPUTER: TagInfo = TagInfo::new("HostComputer", t::HOST_COMPUTER, ASCII, ANY, Tiff);
pub static PREDICTOR: TagInfo = TagInfo::new("Predictor", t::PREDICTOR, SHORT, ONE, Tiff);
pub static COLOR_MAP: TagInfo = TagInfo::new("ColorMap", t::COLOR_MAP, SHORT, ANY, Tiff);
pub static TILE_WIDTH: TagInfo = TagInfo::new("TileWidth", t::TILE_WIDTH, SHORT_LONG_OR_LONG8, ONE, Tiff);
pub static TILE_LENGTH: TagInfo = TagInfo::new("TileLength", t::TILE_LENGTH, SHORT_LONG_OR_LONG8, ONE, Tiff);
pub static TILE_OFFSETS: TagInfo = TagInfo::new("TileOffsets", t::TILE_OFFSETS, LONG_OR_LONG8, ANY, Tiff);
pub static TILE_BYTE_COUNTS: TagInfo =
    TagInfo::new("TileByteCounts", t::TILE_BYTE_COUNTS, SHORT_LONG_OR_LONG8, ANY, Tiff);
pub static SUB_IFDS: TagInfo = TagInfo::new("SubIFDs", t::SUB_IFDS, DIRECTORY_POINTER, ANY, Tiff);
pub static EXTRA_SAMPLES: TagInfo = TagInfo::new("ExtraSamples", t::EXTRA_SAMPLES, SHORT, ANY, Tiff);
pub static SAMPLE_FORMAT: TagInfo = TagInfo::new("SampleFormat", t::SAMPLE_FORMAT, SHORT, ANY, Tiff);
pub static JPEG_INTERCHANGE_FORMAT: TagInfo =
    TagInfo::new("JPEGInterchangeFormat", t::JPEG_INTERCHANGE_FORMAT, LONG_OR_LONG8, ONE, Tiff);
pub static JPEG_INTERCHANGE_FORMAT_LENGTH: TagInfo =
    TagInfo::new("JPEGInterchangeFormatLength", t::JPEG_INTERCHANGE_FORMAT_LENGTH, LONG_OR_LONG8, ONE, Tiff);
pub static COPYRIGHT: TagInfo = TagInfo::new("Copyright", t::COPYRIGHT, ASCII, ANY, Tiff);
pub static MODEL_PIXEL_SCALE: TagInfo =
    TagInfo::new("ModelPixelScaleTag", t::MODEL_PIXEL_SCALE_TAG, DOUBLE, Arity::Fixed(3), Tiff);
pub static MODEL_TIEPOINT: TagInfo = TagInfo::new("ModelTiepointTag", t::MODEL_TIEPOINT_TAG, DOUBLE, ANY, Tiff);
pub static GEO_KEY_DIRECTORY: TagInfo =
    TagInfo::new("GeoKeyDirectoryTag", t::GEO_KEY_DIRECTORY_TAG, SHORT, ANY, Tiff);
pub static GEO_DOUBLE_PARAMS: TagInfo =
    TagInfo::new("GeoDoubleParamsTag", t::GEO_DOUBLE_PARAMS_TAG, DOUBLE, ANY, Tiff);
pub static GEO_ASCII_PARAMS: TagInfo = TagInfo::new("GeoAsciiParamsTag", t::GEO_ASCII_PARAMS_TAG, ASCII, ANY, Tiff);
pub static EXIF_OFFSET: TagInfo = TagInfo::new("ExifOffset", t::EXIF_OFFSET, DIRECTORY_POINTER, ONE, Tiff);
pub static GPS_INFO: TagInfo = TagInfo::new("GPSInfo", t::GPS_INFO, DIRECTORY_POINTER, ONE, Tiff);
pub static GDAL_METADATA: TagInfo = TagInfo::new("GDAL_METADATA", t::GDAL_METADATA, ASCII, ANY, Tiff);
pub static GDAL_NODATA: TagInfo = TagInfo::new("GDAL_NODATA", t::GDAL_NODATA, ASCII, ANY, Tiff);

pub static EXPOSURE_TIME: TagInfo = TagInfo::new("ExposureTime", exif_tags::EXPOSURE_TIME, RATIONAL, ONE, Exif);
pub static F_NUMBER: TagInfo = TagInfo::new("FNumber", exif_tags::F_NUMBER, RATIONAL, ONE, Exif);
pub static ISO_SPEED_RATINGS: TagInfo =
    TagInfo::new("ISOSpeedRatings", exif_tags::ISO_SPEED_RATINGS, SHORT, ANY, Exif);
pub static EXIF_VERSION: TagInfo =
    TagInfo::new("ExifVersion", exif_tags::EXIF_VERSION, UNDEFINED, Arity::Fixed(4), Exif);
pub static DATE_TIME_ORIGINAL: TagInfo =
    TagInfo::new("DateTimeOriginal", exif_tags::DATE_TIME_ORIGINAL, ASCII, Arity::Fixed(20), Exif);
pub static MAKER_NOTE: TagInfo = TagInfo::new("MakerNote", exif_tags::MAKER_NOTE, UNDEFINED, ANY, Exif);
pub static USER_COMMENT: TagInfo = TagInfo::new("UserComment", exif_tags::USER_COMMENT, UNDEFINED, ANY, Exif);
pub static PIXEL_X_DIMENSION: TagInfo =
    TagInfo::new("PixelXDimension", exif_tags::PIXEL_X_DIMENSION, SHORT_OR_LONG, ONE, Exif);
pub static PIXEL_Y_DIMENSION: TagInfo =
    TagInfo::new("PixelYDimension", exif_tags::PIXEL_Y_DIMENSION, SHORT_OR_LONG, ONE, Exif);
pub static INTEROP_OFFSET: TagInfo =
    TagInfo::new("InteroperabilityOffset", t::INTEROP_OFFSET, DIRECTORY_POINTER, ONE, Exif);

pub static GPS_VERSION_ID: TagInfo = TagInfo::new("GPSVersionID", gps_tags::GPS_VERSION_ID, BYTE, Arity::Fixed(4), Gps);
pub static GPS_LATITUDE_REF: TagInfo =
    TagInfo::new("GPSLatitudeRef", gps_tags::GPS_LATITUDE_REF, ASCII, Arity::Fixed(2), Gps);
pub static GPS_LATITUDE: TagInfo = TagInfo::new("GPSLatitude", gps_tags::GPS_LATITUDE, RATIONAL, Arity::Fixed(3), Gps);
pub static GPS_LONGITUDE_REF: TagInfo =
    TagInfo::new("GPSLongitudeRef", gps_tags::GPS_LONGITUDE_REF, ASCII, Arity::Fixed(2), Gps);
pub static GPS_LONGITUDE: TagInfo =
    TagInfo::new("GPSLongitude", gps_tags::GPS_LONGITUDE, RATIONAL, Arity::Fixed(3), Gps);
pub static GPS_ALTITUDE_REF: TagInfo = TagInfo::new("GPSAltitudeRef", gps_tags::GPS_ALTITUDE_REF, BYTE, ONE, Gps);
pub static GPS_ALTITUDE: TagInfo = TagInfo::new("GPSAltitude", gps_tags::GPS_ALTITUDE, RATIONAL, ONE, Gps);
pub static GPS_MAP_DATUM: TagInfo = TagInfo::new("GPSMapDatum", gps_tags::GPS_MAP_DATUM, ASCII, ANY, Gps);

pub static INTEROPERABILITY_INDEX: TagInfo =
    TagInfo::new("InteroperabilityIndex", interop_tags::INTEROPERABILITY_INDEX, ASCII, ANY, Interop);
pub static INTEROPERABILITY_VERSION: TagInfo =
    TagInfo::new("InteroperabilityVersion", interop_tags::INTEROPERABILITY_VERSION, UNDEFINED, Arity::Fixed(4), Interop);

/// Every catalogued descriptor
pub static ALL: &[&TagInfo] = &[
    &NEW_SUBFILE_TYPE,
    &SUBFILE_TYPE,
    &IMAGE_WIDTH,
    &IMAGE_LENGTH,
    &BITS_PER_SAMPLE,
    &COMPRESSION,
    &PHOTOMETRIC_INTERPRETATION,
    &IMAGE_DESCRIPTION,
    &MAKE,
    &MODEL,
    &STRIP_OFFSETS,
    &ORIENTATION,
    &SAMPLES_PER_PIXEL,
    &ROWS_PER_STRIP,
    &STRIP_BYTE_COUNTS,
    &X_RESOLUTION,
    &Y_RESOLUTION,
    &PLANAR_CONFIGURATION,
    &PAGE_NAME,
    &T4_OPTIONS,
    &RESOLUTION_UNIT,
    &PAGE_NUMBER,
    &SOFTWARE,
    &DATE_TIME,
    &ARTIST,
    &HOST_COMPUTER,
    &PREDICTOR,
    &COLOR_MAP,
    &TILE_WIDTH,
    &TILE_LENGTH,
    &TILE_OFFSETS,
    &TILE_BYTE_COUNTS,
    &SUB_IFDS,
    &EXTRA_SAMPLES,
    &SAMPLE_FORMAT,
    &JPEG_INTERCHANGE_FORMAT,
    &JPEG_INTERCHANGE_FORMAT_LENGTH,
    &COPYRIGHT,
    &MODEL_PIXEL_SCALE,
    &MODEL_TIEPOINT,
    &GEO_KEY_DIRECTORY,
    &GEO_DOUBLE_PARAMS,
    &GEO_ASCII_PARAMS,
    &EXIF_OFFSET,
    &GPS_INFO,
    &GDAL_METADATA,
    &GDAL_NODATA,
    &EXPOSURE_TIME,
    &F_NUMBER,
    &ISO_SPEED_RATINGS,
    &EXIF_VERSION,
    &DATE_TIME_ORIGINAL,
    &MAKER_NOTE,
    &USER_COMMENT,
    &PIXEL_X_DIMENSION,
    &PIXEL_Y_DIMENSION,
    &INTEROP_OFFSET,
    &GPS_VERSION_ID,
    &GPS_LATITUDE_REF,
    &GPS_LATITUDE,
    &GPS_LONGITUDE_REF,
    &GPS_LONGITUDE,
    &GPS_ALTITUDE_REF,
    &GPS_ALTITUDE,
    &GPS_MAP_DATUM,
    &INTEROPERABILITY_INDEX,
    &INTEROPERABILITY_VERSION,
];
