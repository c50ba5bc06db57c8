//! foot.ini rendering
//!
//! foot reads a flat `key=value` file. The colour table below is kept exactly as
//! the shell's themes expect it: `color7` takes `base05` while `color15` takes the
//! separate bright-white slot `base07`.

use super::error::ThemeResult;
use super::palette::{BaseSlot, Palette};

/// Ordered mapping from foot keys to palette slots
pub const FOOT_COLOUR_TABLE: [(&str, BaseSlot); 18] = [
    ("foreground", BaseSlot::Base05),
    ("background", BaseSlot::Base00),
    ("color0", BaseSlot::Base00),
    ("color1", BaseSlot::Base08),
    ("color2", BaseSlot::Base0B),
    ("color3", BaseSlot::Base0A),
    ("color4", BaseSlot::Base0D),
    ("color5", BaseSlot::Base0E),
    ("color6", BaseSlot::Base0C),
    ("color7", BaseSlot::Base05),
    ("color8", BaseSlot::Base03),
    ("color9", BaseSlot::Base08),
    ("color10", BaseSlot::Base0B),
    ("color11", BaseSlot::Base0A),
    ("color12", BaseSlot::Base0D),
    ("color13", BaseSlot::Base0E),
    ("color14", BaseSlot::Base0C),
    ("color15", BaseSlot::Base07),
];

/// Slots read by [`FOOT_COLOUR_TABLE`], deduplicated, in first-use order
pub fn required_slots() -> Vec<BaseSlot> {
    let mut slots = Vec::new();
    for (_, slot) in FOOT_COLOUR_TABLE {
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }
    slots
}

/// Render foot.ini text for a palette, without validation
pub fn render_foot_ini(palette: &Palette) -> String {
    let mut ini = String::new();
    for (key, slot) in FOOT_COLOUR_TABLE {
        ini.push_str(key);
        ini.push('=');
        ini.push_str(palette.get(slot));
        ini.push('\n');
    }
    ini
}

/// Validate the slots the table reads, then render
pub fn render_validated(palette: &Palette) -> ThemeResult<String> {
    palette.validate(&required_slots())?;
    Ok(render_foot_ini(palette))
}
