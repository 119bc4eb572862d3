//! TIFF writing
//!
//! An [`OutputSet`] is an editable model of a file: directories of typed
//! fields plus the image data they describe. Two writers turn a set into
//! bytes. [`LossyWriter`] lays everything out afresh. [`LosslessWriter`]
//! patches the file the set was read from, reusing the space its old
//! structures occupied and leaving every other byte untouched.

mod output_field;
mod output_directory;
mod output_set;
pub(crate) mod output_item;
pub(crate) mod summary;
pub(crate) mod prepare;
pub(crate) mod placement;
mod lossy;
pub(crate) mod lossless;

pub use output_field::OutputField;
pub use output_directory::{OutputDirectory, OutputImageData};
pub use output_set::OutputSet;
pub use lossy::LossyWriter;
pub use lossless::LosslessWriter;
