use clap::{Arg, ArgAction, Command as ClapCommand};
use env_logger::{Builder, Env};
use log::error;
use std::process;

use tiffkit::commands::{CommandFactory, TiffkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("tiffkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyze and rewrite TIFF/BigTIFF file structure")
        .arg(
            Arg::new("input")
                .help("Input TIFF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on values that lie outside the file instead of dropping them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("first-only")
                .long("first-only")
                .help("Only read the first directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rewrite")
                .short('r')
                .long("rewrite")
                .help("Rewrite the input to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("lossless")
                .long("lossless")
                .help("Patch the original layout, keeping unknown bytes in place")
                .action(ArgAction::SetTrue)
                .requires("rewrite"),
        )
        .arg(
            Arg::new("bigtiff")
                .long("bigtiff")
                .help("Write BigTIFF output")
                .action(ArgAction::SetTrue)
                .requires("rewrite"),
        )
        .arg(
            Arg::new("big-endian")
                .long("big-endian")
                .help("Write big-endian output (lossy rewrites only)")
                .action(ArgAction::SetTrue)
                .requires("rewrite")
                .conflicts_with("lossless"),
        )
        .get_matches();

    let default_filter = if matches.get_flag("verbose") { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();

    let factory = TiffkitCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
