// End-to-end tests for theme application through the public API and the binary
use async_trait::async_trait;
use foottheme::theme::{ReloadSignaler, PkillSignaler};
use foottheme::{ApplierSettings, Palette, ReloadOutcome, ReloadSignal, ThemeApplier, ThemeError, ThemeResult};
use std::fs;
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

const SAMPLE_PALETTE: &str = r##"{
    "scheme": "Primary",
    "base00": "#000",
    "base05": "#fff",
    "base08": "#f00",
    "base0A": "#ff0",
    "base0B": "#0f0",
    "base0C": "#0ff",
    "base0D": "#00f",
    "base0E": "#f0f",
    "base03": "#888",
    "base07": "#eee"
}"##;

const EXPECTED_INI: &str = "foreground=#fff
background=#000
color0=#000
color1=#f00
color2=#0f0
color3=#ff0
color4=#00f
color5=#f0f
color6=#0ff
color7=#fff
color8=#888
color9=#f00
color10=#0f0
color11=#ff0
color12=#00f
color13=#f0f
color14=#0ff
color15=#eee
";

#[derive(Default)]
struct CountingSignaler {
    signals: Mutex<Vec<(String, ReloadSignal)>>,
}

#[async_trait]
impl ReloadSignaler for CountingSignaler {
    async fn signal(&self, process_name: &str, signal: ReloadSignal) -> ThemeResult<ReloadOutcome> {
        self.signals.lock().unwrap().push((process_name.to_string(), signal));
        Ok(ReloadOutcome::Delivered)
    }
}

#[tokio::test]
async fn test_apply_sample_palette_into_missing_directory() {
    let temp = tempdir().expect("Failed to create temp directory");
    let config_dir = temp.path().join(".config").join("foot");
    let palette = Palette::from_json_str(SAMPLE_PALETTE).unwrap();

    let signaler = Arc::new(CountingSignaler::default());
    let applier = ThemeApplier::with_signaler(ApplierSettings::new(&config_dir), signaler.clone());

    let report = applier.apply(&palette).await.unwrap();

    assert_eq!(report.config_path, config_dir.join("foot.ini"));
    assert_eq!(report.reload, ReloadOutcome::Delivered);
    assert_eq!(fs::read_to_string(&report.config_path).unwrap(), EXPECTED_INI);
    assert_eq!(
        *signaler.signals.lock().unwrap(),
        vec![("foot".to_string(), ReloadSignal::Usr1)]
    );
}

#[tokio::test]
async fn test_reapplying_replaces_previous_palette() {
    let temp = tempdir().expect("Failed to create temp directory");
    let applier = ThemeApplier::with_signaler(
        ApplierSettings::new(temp.path()),
        Arc::new(CountingSignaler::default()),
    );

    let first = Palette::from_json_str(SAMPLE_PALETTE).unwrap();
    let second = Palette::from_json_str(&SAMPLE_PALETTE.replace("#888", "#444")).unwrap();

    applier.apply(&first).await.unwrap();
    let report = applier.apply(&second).await.unwrap();

    let content = fs::read_to_string(report.config_path).unwrap();
    assert_eq!(content, EXPECTED_INI.replace("#888", "#444"));
    assert_eq!(content.lines().count(), 18);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_spawns_leave_one_whole_rendering() {
    let temp = tempdir().expect("Failed to create temp directory");
    let applier = ThemeApplier::with_signaler(
        ApplierSettings::new(temp.path()),
        Arc::new(CountingSignaler::default()),
    );

    let renderings: Vec<(Palette, String)> = (1..=8)
        .map(|n| {
            let grey = format!("#{}", "8".repeat(n));
            let palette = Palette::from_json_str(&SAMPLE_PALETTE.replace("#888", &grey)).unwrap();
            (palette, EXPECTED_INI.replace("#888", &grey))
        })
        .collect();

    for _ in 0..10 {
        let handles: Vec<_> = renderings
            .iter()
            .map(|(palette, _)| applier.spawn(palette.clone()))
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let content = fs::read_to_string(temp.path().join("foot.ini")).unwrap();
        assert!(renderings.iter().any(|(_, expected)| *expected == content), "mixed: {}", content);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}

#[tokio::test]
async fn test_incomplete_palette_is_rejected_at_the_boundary() {
    let temp = tempdir().expect("Failed to create temp directory");
    let applier = ThemeApplier::with_signaler(
        ApplierSettings::new(temp.path().join("foot")),
        Arc::new(CountingSignaler::default()),
    );

    let palette = Palette::from_json_str(r##"{"base00": "#000", "base05": "#fff"}"##).unwrap();
    let err = applier.apply(&palette).await.unwrap_err();

    assert!(matches!(err, ThemeError::MissingSlot { .. }));
    assert!(!temp.path().join("foot").exists());
}

#[tokio::test]
async fn test_pkill_signaler_with_absent_process() {
    let pkill_present = Command::new("pkill").arg("--version").output().is_ok();
    if !pkill_present {
        return;
    }

    let temp = tempdir().expect("Failed to create temp directory");
    let mut settings = ApplierSettings::new(temp.path());
    settings.process_name = "ftnoproc41c2".to_string();
    let applier = ThemeApplier::with_signaler(settings, Arc::new(PkillSignaler::new()));

    let report = applier
        .apply(&Palette::from_json_str(SAMPLE_PALETTE).unwrap())
        .await
        .unwrap();
    assert_eq!(report.reload, ReloadOutcome::NoProcess);
}

#[test]
fn test_binary_print_and_no_reload() {
    let temp = tempdir().expect("Failed to create temp directory");
    let palette_path = temp.path().join("primary.json");
    let config_path = temp.path().join("foottheme.toml");
    let foot_dir = temp.path().join("foot");
    fs::write(&palette_path, SAMPLE_PALETTE).unwrap();
    fs::write(&config_path, "").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_foottheme"))
        .arg("--config-file")
        .arg(&config_path)
        .arg("--config-dir")
        .arg(&foot_dir)
        .arg("--print")
        .arg(&palette_path)
        .output()
        .expect("Failed to execute foottheme");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED_INI);
    assert!(!foot_dir.exists());

    let output = Command::new(env!("CARGO_BIN_EXE_foottheme"))
        .arg("--config-file")
        .arg(&config_path)
        .arg("--quiet")
        .arg("--no-color")
        .arg("--no-reload")
        .arg("--config-dir")
        .arg(&foot_dir)
        .arg(&palette_path)
        .output()
        .expect("Failed to execute foottheme");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("reload skipped"));
    assert_eq!(fs::read_to_string(foot_dir.join("foot.ini")).unwrap(), EXPECTED_INI);
}

#[test]
fn test_binary_reload_does_not_signal_itself() {
    let pkill_present = Command::new("pkill").arg("--version").output().is_ok();
    if !pkill_present {
        return;
    }

    let temp = tempdir().expect("Failed to create temp directory");
    let palette_path = temp.path().join("primary.json");
    let config_path = temp.path().join("foottheme.toml");
    let foot_dir = temp.path().join("foot");
    fs::write(&palette_path, SAMPLE_PALETTE).unwrap();
    fs::write(&config_path, "").unwrap();

    // Default process name "foot" is a prefix of the binary's own name
    let output = Command::new(env!("CARGO_BIN_EXE_foottheme"))
        .arg("--config-file")
        .arg(&config_path)
        .arg("--quiet")
        .arg("--no-color")
        .arg("--config-dir")
        .arg(&foot_dir)
        .arg(&palette_path)
        .output()
        .expect("Failed to execute foottheme");

    assert!(
        output.status.success(),
        "status: {:?} stderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Wrote "), "stdout: {}", stdout);
    assert_eq!(fs::read_to_string(foot_dir.join("foot.ini")).unwrap(), EXPECTED_INI);
}

#[test]
fn test_binary_rejects_missing_palette_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_foottheme"))
        .arg("--no-reload")
        .output()
        .expect("Failed to execute foottheme");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No palette given"));
}
