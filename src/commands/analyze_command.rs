//! TIFF structure analysis command
//!
//! This module implements the command for reading a file and printing its
//! directory tree: every directory, every field and where the image data
//! lives.

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::io::byte_source::{ByteSource, ByteSourceFile};
use crate::tiff::contents::TiffContents;
use crate::tiff::directory::{Directory, DirectoryType};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::reader::TiffReader;
use crate::utils::format_utils;

/// Command for analyzing TIFF file structure
pub struct AnalyzeCommand {
    /// Path to the input file
    input_file: String,
    /// Fail on out-of-bounds values instead of dropping them
    strict: bool,
    /// Stop after the root directory
    first_only: bool,
}

impl AnalyzeCommand {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches) -> TiffResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| TiffError::Format("Missing input file".to_string()))?
            .clone();

        Ok(AnalyzeCommand {
            input_file,
            strict: args.get_flag("strict"),
            first_only: args.get_flag("first-only"),
        })
    }

    fn display_summary(&self, contents: &TiffContents, source: &dyn ByteSource) {
        println!("TIFF Analysis Results: {}", self.input_file);
        println!("  Format: {}", contents.header.variant);
        println!("  Byte order: {}", contents.header.byte_order.name());
        println!("  File size: {} bytes", source.len());
        println!("  First directory at: {}", contents.header.first_directory_offset);
        println!("  Number of directories: {}", contents.directory_count());
    }

    fn display_directory(&self, directory: &Directory) {
        println!();
        println!("{} directory (offset: {}, length: {}, next: {})",
                 directory.directory_type, directory.offset, directory.length(), directory.next_directory_offset);
        if directory.entry_count != directory.fields.len() as u64 {
            println!("  Entries: {} ({} dropped)",
                     directory.entry_count, directory.entry_count - directory.fields.len() as u64);
        } else {
            println!("  Entries: {}", directory.entry_count);
        }

        if matches!(directory.directory_type, DirectoryType::Image(_)) {
            for line in format_utils::image_summary(directory) {
                println!("  {}", line);
            }
        }

        for field in &directory.fields {
            println!("    {}", format_utils::format_field(field));
        }
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> TiffResult<()> {
        info!("Analyzing file: {}", self.input_file);

        let reader = TiffReader::builder()
            .strict(self.strict)
            .build();
        let source = ByteSourceFile::new(&self.input_file)?;
        let contents = if self.first_only {
            reader.read_first_directory(&source)?
        } else {
            reader.read_contents(&source)?
        };

        self.display_summary(&contents, &source);
        for directory in &contents.directories {
            self.display_directory(directory);
        }

        debug!("Analysis completed successfully");
        Ok(())
    }
}
