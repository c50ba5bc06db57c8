use anyhow::Result;
use log::error;
use std::process;

use foottheme::display::ColourManager;
use foottheme::{app, cli, logging};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {:?}", panic_info);
        eprintln!("Panic: {}", panic_info);
        process::exit(101);
    }));

    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();

    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config.clone())?;

    let settings = app::resolve_applier_settings(&args, &config_manager)?;

    if let Some(export_path) = &args.export_config {
        return app::handle_export_config(&settings, &log_config, export_path);
    }

    let colours = ColourManager::from_args(args.no_color);

    // Single-threaded: one write and one pkill per run
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(app::run_theme(&args, settings, &colours))
}
