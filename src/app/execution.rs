//! Application execution: load the palette and apply, print or preview it

use anyhow::{Context, Result};
use log::debug;

use crate::cli;
use crate::display::ColourManager;
use crate::theme::{
    render_validated, ApplierSettings, ApplyReport, Palette, ReloadOutcome, ThemeApplier,
    FOOT_COLOUR_TABLE,
};

/// Run the requested theme operation
pub async fn run_theme(args: &cli::Args, settings: ApplierSettings, colours: &ColourManager) -> Result<()> {
    let palette_path = args
        .palette
        .as_ref()
        .context("No palette given")?;
    let palette = Palette::load(palette_path)?;

    if args.print {
        debug!("Printing rendered config only");
        print!("{}", render_validated(&palette)?);
        return Ok(());
    }

    if args.preview {
        render_validated(&palette)?;
        print!("{}", format_preview(&palette, colours));
        return Ok(());
    }

    let applier = ThemeApplier::new(settings);
    let report = applier.apply(&palette).await?;
    println!("{}", format_summary(&report, applier.settings(), colours));

    Ok(())
}

/// One line describing what was written and whether terminals reloaded
pub fn format_summary(report: &ApplyReport, settings: &ApplierSettings, colours: &ColourManager) -> String {
    let path = report.config_path.display().to_string();
    let reload = match report.reload {
        ReloadOutcome::Delivered => colours
            .success(&format!("reloaded {} ({})", settings.process_name, settings.signal))
            .to_string(),
        ReloadOutcome::NoProcess => colours
            .warning(&format!("no running {} to reload", settings.process_name))
            .to_string(),
        ReloadOutcome::Skipped => colours.warning("reload skipped").to_string(),
    };
    format!("Wrote {}; {}", colours.highlight(&path), reload)
}

/// The colour table with a swatch per entry
pub fn format_preview(palette: &Palette, colours: &ColourManager) -> String {
    let mut out = String::new();
    for (key, slot) in FOOT_COLOUR_TABLE {
        let value = palette.get(slot);
        out.push_str(&format!(
            "{} {:<10} {:<7} {}\n",
            colours.swatch(value),
            key,
            slot.name(),
            value
        ));
    }
    out
}
