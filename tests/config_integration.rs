// SPDX-License-Identifier: MPL-2.0
use lens_intake::app::config::{self, Config};
use lens_intake::application::intake::{GateOutcome, IntakeContext};
use lens_intake::application::port::FacingMode;
use lens_intake::domain::intake::{ImageCandidate, SourceKind};
use lens_intake::i18n::fluent::I18n;
use lens_intake::test_utils::{FakeEncoder, RecordingTransport};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn settings_file_drives_the_upload_form() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        r#"
[upload]
endpoint = "https://uploads.example.test/images"
file_field = "picture"
timeout_secs = 15

[upload.fields]
album = "summer"
owner = "kim"

[camera]
facing_mode = "user"
frame_interval_ms = 50
"#,
    )
    .expect("Failed to write config file");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(config.upload_endpoint(), "https://uploads.example.test/images");
    assert_eq!(config.upload_timeout(), Duration::from_secs(15));

    let settings = config.intake_settings();
    assert_eq!(settings.constraints.facing_mode, FacingMode::User);
    assert_eq!(settings.constraints.frame_interval, Duration::from_millis(50));

    let mut ctx = IntakeContext::new(settings, Arc::new(FakeEncoder));
    ctx.pick_file(ImageCandidate::new(SourceKind::FilePicker, "a.gif", vec![7u8; 32]));
    let mut transport = RecordingTransport::default();
    assert_eq!(ctx.submit(&mut transport), GateOutcome::Submitted);

    let form = &transport.forms()[0];
    assert_eq!(form.file_field, "picture");
    assert_eq!(
        form.extra_fields,
        vec![
            ("album".to_string(), "summer".to_string()),
            ("owner".to_string(), "kim".to_string()),
        ]
    );
}

#[test]
fn broken_settings_fall_back_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[upload\nendpoint = ")
        .expect("Failed to write config file");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(config, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}

#[test]
fn configured_language_translates_rejections() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    std::fs::write(&path, "[general]\nlanguage = \"fr\"\n").expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let i18n = I18n::new(None, None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(
        i18n.tr("error-no-file-selected"),
        "Aucun fichier sélectionné. Veuillez choisir un fichier."
    );

    // The command line wins over the file.
    let english = I18n::new(Some("en-US".to_string()), None, &loaded);
    assert_eq!(
        english.tr("error-no-file-selected"),
        "No file selected. Please upload a file."
    );
}
