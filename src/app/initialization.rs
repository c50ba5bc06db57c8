//! Application initialization and configuration

use anyhow::{Context, Result};
use log::{debug, info, LevelFilter};
use std::path::Path;
use std::str::FromStr;

use crate::theme::{ApplierSettings, ReloadSignal};
use crate::{cli, config, logging};

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        debug!("Loading configuration from explicit file: {}", config_file.display());
        config::ConfigManager::load_from_file(config_file.clone())?
    } else {
        config::ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config
            .get_log_level(config::BASE_SECTION, "console-level")?
            .unwrap_or(LevelFilter::Info)
    };

    let format = if args.log_format != "text" {
        logging::LogFormat::from_str(&args.log_format).map_err(|e| anyhow::anyhow!(e))?
    } else {
        match config.get_value(config::BASE_SECTION, "log-format") {
            Some(format_str) => logging::LogFormat::from_str(format_str).map_err(|e| anyhow::anyhow!(e))?,
            None => logging::LogFormat::Text,
        }
    };

    let log_file_path = args
        .log_file
        .clone()
        .or_else(|| config.get_path(config::BASE_SECTION, "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config.get_log_level(config::BASE_SECTION, "file-log-level")?,
    };

    // console-level "off" with a log file logs to the file only
    let (destination, file_level) = match (log_file_path, file_log_level) {
        (Some(path), level) if console_level == LevelFilter::Off => (
            logging::LogDestination::File(path),
            Some(level.unwrap_or(LevelFilter::Info)),
        ),
        (Some(path), level) => (
            logging::LogDestination::Both(path),
            Some(level.unwrap_or(console_level)),
        ),
        (None, None) => (logging::LogDestination::Console, None),
        (None, Some(_)) => {
            return Err(anyhow::anyhow!("Log file level specified without log file"));
        }
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Effective applier settings: CLI flags over config file over defaults
pub fn resolve_applier_settings(
    args: &cli::Args,
    config: &config::ConfigManager,
) -> Result<ApplierSettings> {
    let mut settings = config.get_applier_settings_or(args.config_dir.clone())?;

    if let Some(dir) = &args.config_dir {
        settings.config_dir = dir.clone();
    }

    if let Some(file_name) = &args.file_name {
        settings.file_name = file_name.clone();
    }

    if let Some(process_name) = &args.process_name {
        settings.process_name = process_name.clone();
    }

    if let Some(signal) = &args.signal {
        settings.signal = ReloadSignal::from_str(signal).map_err(|e| anyhow::anyhow!(e))?;
    }

    if args.no_reload {
        settings.reload = false;
    }

    debug!("Effective applier settings: {:?}", settings);
    Ok(settings)
}

/// Handle configuration export command
pub fn handle_export_config(
    settings: &ApplierSettings,
    log_config: &logging::LogConfig,
    export_path: &Path,
) -> Result<()> {
    info!("Exporting configuration to: {}", export_path.display());

    let content = config::export_complete_config(settings, log_config)?;
    std::fs::write(export_path, content)
        .with_context(|| format!("Failed to write configuration to {}", export_path.display()))?;

    println!("Configuration exported to: {}", export_path.display());
    Ok(())
}
