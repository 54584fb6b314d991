use super::*;
use lesson_tree_core::{Lesson, Media, Section};

#[test]
fn site_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("site.json");
    let site = Site::new()
        .with_top_level("s")
        .with_section("s", Section::new("S").with_lessons(["l"]))
        .with_lesson("l", Lesson::new("L").with_audio(Media::new("l.mp3")));

    save_json(&path, &site).unwrap();
    assert_eq!(load_site(&path).unwrap(), site);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn ingestion_output_with_nulls_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.json");
    std::fs::write(
        &path,
        r#"{
  "Sections": {
    "s": {"ID": "s", "Title": "S", "Sections": null, "Lessons": ["l"], "AudioCount": 0}
  },
  "Lessons": {
    "l": {"ID": "l", "Title": "L", "Audio": [{"Source": "l.mp3"}], "Pdf": null}
  },
  "TopLevel": ["s"]
}"#,
    )
    .unwrap();

    let site = load_site(&path).unwrap();
    assert!(site.sections["s"].sections.is_empty());
    assert_eq!(site.lessons["l"].audio[0].source, "l.mp3");
    assert!(site.lessons["l"].pdf.is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_site(&path), Err(PipelineError::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_site(&dir.path().join("absent.json")),
        Err(PipelineError::Io(_))
    ));
}

#[test]
fn snapshot_dir_names_files_by_stage() {
    let dir = tempfile::tempdir().unwrap();
    let snapshots = SnapshotDir::new(dir.path());
    snapshots.write(Stage::Resolved, &ResolvedSite::default()).unwrap();

    let path = dir.path().join("resolved.json");
    assert_eq!(snapshots.path(Stage::Resolved), path);
    assert_eq!(load_resolved(&path).unwrap(), ResolvedSite::default());
}
