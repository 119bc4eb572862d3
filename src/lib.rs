pub mod io;
pub mod tiff;
pub mod utils;
pub mod commands;

pub use io::{ByteOrder, ByteSource, ByteSourceArray, ByteSourceFile};
pub use tiff::{
    Directory, DirectoryType, Field, FieldType, FieldValue, LosslessWriter, LossyWriter, OutputDirectory,
    OutputField, OutputSet, TiffContents, TiffError, TiffReader, TiffResult, TiffVariant,
};
