//! Theme application
//!
//! Rendering, writing and signalling run strictly in that order: the reload
//! signal is only sent once the new foot.ini is in place.
//!
//! ```no_run
//! # tokio_test::block_on(async {
//! use foottheme::theme::{ApplierSettings, BaseSlot, Palette, ThemeApplier};
//!
//! let settings = ApplierSettings::new("/tmp/foot");
//! let applier = ThemeApplier::new(settings);
//! let palette = Palette::new()
//!     .with(BaseSlot::Base00, "#000000")
//!     .with(BaseSlot::Base05, "#ffffff");
//! let _ = applier.apply(&palette).await;
//! # });
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::task::JoinHandle;

use super::error::ThemeResult;
use super::palette::Palette;
use super::render::render_validated;
use super::signal::{PkillSignaler, ReloadOutcome, ReloadSignal, ReloadSignaler};
use super::writer::write_config;

/// Default foot config file name
pub const DEFAULT_FILE_NAME: &str = "foot.ini";

/// Default process name to signal
pub const DEFAULT_PROCESS_NAME: &str = "foot";

/// Where to write and whom to signal
#[derive(Debug, Clone, PartialEq)]
pub struct ApplierSettings {
    pub config_dir: PathBuf,
    pub file_name: String,
    pub process_name: String,
    pub signal: ReloadSignal,
    pub reload: bool,
}

impl ApplierSettings {
    /// Settings targeting `config_dir` with foot defaults for everything else
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            signal: ReloadSignal::default(),
            reload: true,
        }
    }

    /// The user's foot config directory, `$XDG_CONFIG_HOME/foot` or `~/.config/foot`
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("foot"))
    }

    /// Full path of the config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(&self.file_name)
    }
}

/// A config file name must name a file directly inside the config directory
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

/// What an application did
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub config_path: PathBuf,
    pub reload: ReloadOutcome,
}

/// Applies palettes to foot
#[derive(Clone)]
pub struct ThemeApplier {
    settings: ApplierSettings,
    signaler: Arc<dyn ReloadSignaler>,
}

impl ThemeApplier {
    /// Applier that reloads terminals through `pkill`
    pub fn new(settings: ApplierSettings) -> Self {
        Self::with_signaler(settings, Arc::new(PkillSignaler::new()))
    }

    pub fn with_signaler(settings: ApplierSettings, signaler: Arc<dyn ReloadSignaler>) -> Self {
        Self { settings, signaler }
    }

    pub fn settings(&self) -> &ApplierSettings {
        &self.settings
    }

    /// Render foot.ini text without touching the filesystem
    pub fn render(&self, palette: &Palette) -> ThemeResult<String> {
        render_validated(palette)
    }

    /// Write foot.ini for `palette`, then ask running terminals to reload it
    pub async fn apply(&self, palette: &Palette) -> ThemeResult<ApplyReport> {
        info!("Applying palette to {}", self.settings.process_name);

        let ini = render_validated(palette)?;
        let config_path =
            write_config(&self.settings.config_dir, &self.settings.file_name, &ini).await?;

        let reload = if self.settings.reload {
            self.signaler
                .signal(&self.settings.process_name, self.settings.signal)
                .await?
        } else {
            debug!("Reload disabled, not signalling {}", self.settings.process_name);
            ReloadOutcome::Skipped
        };

        info!("Applied palette: {} ({:?})", config_path.display(), reload);
        Ok(ApplyReport { config_path, reload })
    }

    /// Apply on the runtime without waiting; failures are logged
    ///
    /// The returned handle may be dropped.
    pub fn spawn(&self, palette: Palette) -> JoinHandle<ThemeResult<ApplyReport>> {
        let applier = self.clone();
        tokio::spawn(async move {
            let result = applier.apply(&palette).await;
            if let Err(e) = &result {
                error!("Theme application failed: {}", e);
            }
            result
        })
    }
}
