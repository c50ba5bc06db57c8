//! foot theme application
//!
//! Turns a base16 [`Palette`] into a foot.ini and asks running foot terminals
//! to reload it.

pub mod applier;
pub mod error;
pub mod palette;
pub mod render;
pub mod signal;
pub mod writer;

pub use applier::{
    is_plain_file_name, ApplierSettings, ApplyReport, ThemeApplier, DEFAULT_FILE_NAME, DEFAULT_PROCESS_NAME,
};
pub use error::{ThemeError, ThemeResult};
pub use palette::{BaseSlot, Palette};
pub use render::{render_foot_ini, render_validated, FOOT_COLOUR_TABLE};
pub use signal::{PkillSignaler, ReloadOutcome, ReloadSignal, ReloadSignaler};
pub use writer::write_config;
