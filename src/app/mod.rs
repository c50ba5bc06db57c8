//! Application orchestration module

pub mod execution;
pub mod initialization;

pub use execution::{format_preview, format_summary, run_theme};
pub use initialization::{
    configure_logging,
    handle_export_config,
    load_configuration,
    resolve_applier_settings,
};
