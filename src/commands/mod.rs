//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod rewrite_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use rewrite_command::RewriteCommand;

use clap::ArgMatches;
use crate::tiff::errors::TiffResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
#[derive(Debug, Default)]
pub struct TiffkitCommandFactory;

impl TiffkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TiffkitCommandFactory
    }
}

impl CommandFactory for TiffkitCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> TiffResult<Box<dyn Command>> {
        if args.contains_id("rewrite") {
            Ok(Box::new(RewriteCommand::new(args)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args)?))
        }
    }
}
