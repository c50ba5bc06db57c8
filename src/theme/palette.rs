//! Base16 palette model
//!
//! A palette is the sixteen `base00`..`base0F` slots used by the shell's theme
//! files. Values are opaque colour strings and are passed through verbatim.

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::{ThemeError, ThemeResult};

/// One of the sixteen base16 slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseSlot {
    Base00,
    Base01,
    Base02,
    Base03,
    Base04,
    Base05,
    Base06,
    Base07,
    Base08,
    Base09,
    Base0A,
    Base0B,
    Base0C,
    Base0D,
    Base0E,
    Base0F,
}

impl BaseSlot {
    /// All slots in index order
    pub const ALL: [BaseSlot; 16] = [
        BaseSlot::Base00,
        BaseSlot::Base01,
        BaseSlot::Base02,
        BaseSlot::Base03,
        BaseSlot::Base04,
        BaseSlot::Base05,
        BaseSlot::Base06,
        BaseSlot::Base07,
        BaseSlot::Base08,
        BaseSlot::Base09,
        BaseSlot::Base0A,
        BaseSlot::Base0B,
        BaseSlot::Base0C,
        BaseSlot::Base0D,
        BaseSlot::Base0E,
        BaseSlot::Base0F,
    ];

    /// Key used for this slot in theme files
    pub fn name(self) -> &'static str {
        match self {
            BaseSlot::Base00 => "base00",
            BaseSlot::Base01 => "base01",
            BaseSlot::Base02 => "base02",
            BaseSlot::Base03 => "base03",
            BaseSlot::Base04 => "base04",
            BaseSlot::Base05 => "base05",
            BaseSlot::Base06 => "base06",
            BaseSlot::Base07 => "base07",
            BaseSlot::Base08 => "base08",
            BaseSlot::Base09 => "base09",
            BaseSlot::Base0A => "base0A",
            BaseSlot::Base0B => "base0B",
            BaseSlot::Base0C => "base0C",
            BaseSlot::Base0D => "base0D",
            BaseSlot::Base0E => "base0E",
            BaseSlot::Base0F => "base0F",
        }
    }
}

impl fmt::Display for BaseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A base16 colour palette
///
/// Slots missing from the source deserialize as empty strings; use
/// [`Palette::validate`] before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Palette {
    pub base00: String,
    pub base01: String,
    pub base02: String,
    pub base03: String,
    pub base04: String,
    pub base05: String,
    pub base06: String,
    pub base07: String,
    pub base08: String,
    pub base09: String,
    #[serde(rename = "base0A", alias = "base0a")]
    pub base0a: String,
    #[serde(rename = "base0B", alias = "base0b")]
    pub base0b: String,
    #[serde(rename = "base0C", alias = "base0c")]
    pub base0c: String,
    #[serde(rename = "base0D", alias = "base0d")]
    pub base0d: String,
    #[serde(rename = "base0E", alias = "base0e")]
    pub base0e: String,
    #[serde(rename = "base0F", alias = "base0f")]
    pub base0f: String,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style slot assignment
    pub fn with(mut self, slot: BaseSlot, value: impl Into<String>) -> Self {
        self.set(slot, value);
        self
    }

    /// Value of a slot, empty if unset
    pub fn get(&self, slot: BaseSlot) -> &str {
        match slot {
            BaseSlot::Base00 => &self.base00,
            BaseSlot::Base01 => &self.base01,
            BaseSlot::Base02 => &self.base02,
            BaseSlot::Base03 => &self.base03,
            BaseSlot::Base04 => &self.base04,
            BaseSlot::Base05 => &self.base05,
            BaseSlot::Base06 => &self.base06,
            BaseSlot::Base07 => &self.base07,
            BaseSlot::Base08 => &self.base08,
            BaseSlot::Base09 => &self.base09,
            BaseSlot::Base0A => &self.base0a,
            BaseSlot::Base0B => &self.base0b,
            BaseSlot::Base0C => &self.base0c,
            BaseSlot::Base0D => &self.base0d,
            BaseSlot::Base0E => &self.base0e,
            BaseSlot::Base0F => &self.base0f,
        }
    }

    /// Assign a slot
    pub fn set(&mut self, slot: BaseSlot, value: impl Into<String>) {
        let target = match slot {
            BaseSlot::Base00 => &mut self.base00,
            BaseSlot::Base01 => &mut self.base01,
            BaseSlot::Base02 => &mut self.base02,
            BaseSlot::Base03 => &mut self.base03,
            BaseSlot::Base04 => &mut self.base04,
            BaseSlot::Base05 => &mut self.base05,
            BaseSlot::Base06 => &mut self.base06,
            BaseSlot::Base07 => &mut self.base07,
            BaseSlot::Base08 => &mut self.base08,
            BaseSlot::Base09 => &mut self.base09,
            BaseSlot::Base0A => &mut self.base0a,
            BaseSlot::Base0B => &mut self.base0b,
            BaseSlot::Base0C => &mut self.base0c,
            BaseSlot::Base0D => &mut self.base0d,
            BaseSlot::Base0E => &mut self.base0e,
            BaseSlot::Base0F => &mut self.base0f,
        };
        *target = value.into();
    }

    /// Foreground designation
    pub fn foreground(&self) -> &str {
        self.get(BaseSlot::Base05)
    }

    /// Background designation
    pub fn background(&self) -> &str {
        self.get(BaseSlot::Base00)
    }

    /// Check that every slot in `required` is present and fits on one line
    pub fn validate(&self, required: &[BaseSlot]) -> ThemeResult<()> {
        for &slot in required {
            let value = self.get(slot);
            if value.is_empty() {
                return Err(ThemeError::MissingSlot { slot: slot.name() });
            }
            if value.contains(['\n', '\r']) {
                return Err(ThemeError::InvalidValue {
                    slot: slot.name(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse a palette from a JSON object
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(content).map(Self::trimmed)
    }

    /// Parse a palette from a TOML table
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(content).map(Self::trimmed)
    }

    /// Load a palette file
    ///
    /// `.json` and `.toml` files are decoded by extension; anything else is
    /// tried as JSON and then as TOML.
    pub fn load(path: &Path) -> ThemeResult<Self> {
        debug!("Loading palette from: {}", path.display());

        let content = fs::read_to_string(path)
            .map_err(|e| ThemeError::palette_parse(path, e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let palette = match extension.as_deref() {
            Some("json") => {
                Self::from_json_str(&content).map_err(|e| ThemeError::palette_parse(path, e.to_string()))?
            }
            Some("toml") => {
                Self::from_toml_str(&content).map_err(|e| ThemeError::palette_parse(path, e.to_string()))?
            }
            _ => match Self::from_json_str(&content) {
                Ok(palette) => palette,
                Err(json_err) => Self::from_toml_str(&content).map_err(|toml_err| {
                    ThemeError::palette_parse(
                        path,
                        format!("not JSON ({}) or TOML ({})", json_err, toml_err),
                    )
                })?,
            },
        };

        debug!("Loaded palette: {:?}", palette);
        Ok(palette)
    }

    fn trimmed(mut self) -> Self {
        for slot in BaseSlot::ALL {
            let value = self.get(slot).trim().to_string();
            self.set(slot, value);
        }
        self
    }
}
