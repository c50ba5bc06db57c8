use anyhow::Result;
use clap::Parser;
use log::debug;
use std::path::PathBuf;

/// Apply a base16 palette to the foot terminal
#[derive(Parser, Debug)]
#[command(name = "foottheme")]
#[command(about = "Renders foot.ini from a base16 palette and signals running foot terminals to reload it")]
#[command(version)]
pub struct Args {
    /// Palette file (JSON or TOML with base00..base0F keys)
    #[arg(value_name = "PALETTE")]
    pub palette: Option<PathBuf>,

    /// Print the rendered foot.ini to stdout instead of writing it
    #[arg(long)]
    pub print: bool,

    /// Show the colour table with swatches instead of writing it
    #[arg(long, conflicts_with = "print")]
    pub preview: bool,

    /// Write the config but do not signal running terminals
    #[arg(long)]
    pub no_reload: bool,

    /// Directory holding foot.ini (defaults to ~/.config/foot)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Name of the config file inside the config directory
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Process name to signal
    #[arg(long, value_name = "NAME")]
    pub process_name: Option<String>,

    /// Reload signal: usr1, usr2 or hup
    #[arg(long, value_name = "SIGNAL")]
    pub signal: Option<String>,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub export_config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    match args.log_format.to_lowercase().as_str() {
        "text" | "json" => {}
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Valid options: text, json",
                args.log_format
            ))
        }
    }

    if let Some(ref level) = args.log_file_level {
        match level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log file level '{}'. Valid levels: error, warn, info, debug, trace",
                    level
                ))
            }
        }
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
    }

    if args.palette.is_none() && args.export_config.is_none() {
        return Err(anyhow::anyhow!(
            "No palette given. Usage: foottheme [OPTIONS] <PALETTE>"
        ));
    }

    if let Some(ref file_name) = args.file_name {
        if !crate::theme::is_plain_file_name(file_name) {
            return Err(anyhow::anyhow!(
                "Invalid --file-name '{}': must be a plain file name",
                file_name
            ));
        }
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}
