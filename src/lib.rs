pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
pub mod theme;

pub use theme::{
    ApplierSettings, ApplyReport, BaseSlot, Palette, ReloadOutcome, ReloadSignal, ThemeApplier,
    ThemeError, ThemeResult,
};
