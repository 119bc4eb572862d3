//! TIFF rewrite command
//!
//! This module implements the command that reads a file into an output set
//! and writes it back, either sequentially or by patching the original.

use clap::ArgMatches;
use log::{debug, info};
use std::fs::{self, File};

use crate::commands::command_traits::Command;
use crate::io::byte_order::ByteOrder;
use crate::io::byte_source::ByteSourceArray;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::header::TiffVariant;
use crate::tiff::reader::TiffReader;
use crate::tiff::write::{LosslessWriter, LossyWriter, OutputSet};

/// Command for rewriting a TIFF file
pub struct RewriteCommand {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    /// Patch the original layout instead of laying out afresh
    lossless: bool,
    /// Force BigTIFF output
    big_tiff: bool,
    /// Write big-endian output; ignored by lossless rewrites
    big_endian: bool,
    /// Fail on out-of-bounds values instead of dropping them
    strict: bool,
}

impl RewriteCommand {
    /// Create a new rewrite command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new RewriteCommand instance or an error
    pub fn new(args: &ArgMatches) -> TiffResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| TiffError::Format("Missing input file".to_string()))?
            .clone();

        let output_file = args.get_one::<String>("rewrite")
            .ok_or_else(|| TiffError::Format("Missing output file path for rewrite".to_string()))?
            .clone();

        if input_file == output_file {
            return Err(TiffError::Format("Output file must differ from the input file".to_string()));
        }

        Ok(RewriteCommand {
            input_file,
            output_file,
            lossless: args.get_flag("lossless"),
            big_tiff: args.get_flag("bigtiff"),
            big_endian: args.get_flag("big-endian"),
            strict: args.get_flag("strict"),
        })
    }
}

impl Command for RewriteCommand {
    fn execute(&self) -> TiffResult<()> {
        info!("Rewriting {} to {} ({})",
              self.input_file, self.output_file, if self.lossless { "lossless" } else { "lossy" });

        let original = fs::read(&self.input_file)?;
        let source = ByteSourceArray::new(original);
        let contents = TiffReader::builder()
            .strict(self.strict)
            .build()
            .read_directories(&source)?;

        let mut set = OutputSet::from_contents(&contents, &source)?;
        if self.big_tiff {
            set.set_variant(TiffVariant::BigTiff);
        }
        debug!("Output set:\n{}", set);

        let output = File::create(&self.output_file)?;
        if self.lossless {
            LosslessWriter::new(source.into_inner()).write(&mut set, output)?;
        } else {
            let byte_order = if self.big_endian { ByteOrder::BigEndian } else { set.byte_order() };
            LossyWriter::new(byte_order).write(&mut set, output)?;
        }

        info!("Rewrite successful");
        Ok(())
    }
}
