use super::*;

#[test]
fn empty_file_gives_defaults() {
    let settings = Settings::parse("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.probe.user_agent, "lesson-tree");
    assert_eq!(settings.repair.length_tolerance, 6);
    assert!(!settings.pipeline.convert_lessons);
}

#[test]
fn file_values_are_read() {
    let settings = Settings::parse(
        r#"
[probe]
user_agent = "custom"
timeout_secs = 20

[repair]
length_tolerance = 3

[pipeline]
convert_lessons = true
snapshot_dir = "/tmp/snaps"
"#,
    )
    .unwrap();

    let probe = settings.probe_options();
    assert_eq!(probe.user_agent, "custom");
    assert_eq!(probe.timeout, Some(Duration::from_secs(20)));

    let pipeline = settings.pipeline_options();
    assert!(pipeline.convert_lessons);
    assert_eq!(pipeline.snapshot_dir, Some(PathBuf::from("/tmp/snaps")));
    assert_eq!(pipeline.repair.length_tolerance, 3);
}

#[test]
fn env_overrides_file() {
    let mut settings = Settings::parse("[probe]\nuser_agent = \"file\"\n").unwrap();
    settings
        .apply_overrides(|key| match key {
            ENV_USER_AGENT => Some("env".to_string()),
            ENV_TIMEOUT_SECS => Some(" 5 ".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(settings.probe.user_agent, "env");
    assert_eq!(settings.probe.timeout_secs, Some(5));
    assert_eq!(settings.pipeline.snapshot_dir, None);
}

#[test]
fn bad_timeout_is_an_error() {
    let mut settings = Settings::default();
    let err = settings
        .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Settings(_)));
}

#[test]
fn malformed_file_is_an_error() {
    assert!(matches!(
        Settings::parse("[repair]\nlength_tolerance = \"six\"\n"),
        Err(PipelineError::Settings(_))
    ));
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::from_path(&dir.path().join("settings.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn effective_settings_render_as_toml() {
    let text = Settings::default().to_toml().unwrap();
    assert!(text.contains("[probe]"));
    assert!(text.contains("length_tolerance = 6"));
}

#[test]
fn settings_path_ends_in_app_dir() {
    let path = settings_path();
    assert!(path.ends_with("lesson-tree/settings.toml"));
}
