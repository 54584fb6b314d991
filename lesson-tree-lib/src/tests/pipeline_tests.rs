use super::*;
use lesson_tree_core::{Lesson, Media, Section};
use lesson_tree_repair::{MemoryProbe, OfflineProbe, ProbeError, ProbeStatus};

const BAD: &str = "https://example.org/old/parasha";
const GOOD: &str = "https://example.org/new/parasha";

fn broken_site() -> Site {
    Site::new()
        .with_top_level("top")
        .with_section(
            "top",
            Section::new("Top").with_sections([BAD, "wrapper"]),
        )
        .with_section(GOOD, Section::new("Parasha").with_lessons(["p1", "p2"]))
        .with_lesson("p1", Lesson::new("P1").with_audio(Media::new("p1.mp3")))
        .with_lesson("p2", Lesson::new("P2").with_audio(Media::new("p2.mp3")))
        .with_section("wrapper", Section::new("Wrapper").with_lessons(["w"]))
        .with_lesson(
            "w",
            Lesson::new("W")
                .with_audio(Media::new("w1.mp3"))
                .with_audio(Media::new("w2.mp3")),
        )
}

#[test]
fn repairs_counts_and_resolves() {
    let probe = MemoryProbe::new()
        .with_page(BAD, "same page")
        .with_page(GOOD, "same page");
    let out = run(broken_site(), &probe, &PipelineOptions::default()).unwrap();

    assert_eq!(out.report.applied_count(), 1);
    assert!(out.detached.is_empty());
    assert!(out.conversions.is_empty());
    assert_eq!(out.site.sections["top"].sections, vec![GOOD, "wrapper"]);
    assert_eq!(out.site.sections["top"].audio_count, 4);
    assert_eq!(out.resolved.top_level, vec!["top"]);
    assert_eq!(out.resolved.content_audio("top"), 4);
}

#[test]
fn unresolved_reference_is_detached_and_run_completes() {
    let out = run(broken_site(), &OfflineProbe, &PipelineOptions::default()).unwrap();

    assert_eq!(out.report.applied_count(), 0);
    assert_eq!(out.detached.len(), 1);
    assert_eq!(out.detached[0].child, BAD);
    assert_eq!(out.site.sections["top"].sections, vec!["wrapper"]);
    assert_eq!(out.site.sections["top"].audio_count, 2);
}

#[test]
fn conversion_runs_before_repair() {
    let options = PipelineOptions {
        convert_lessons: true,
        ..Default::default()
    };
    let out = run(broken_site(), &OfflineProbe, &options).unwrap();

    let converted: Vec<_> = out.conversions.iter().map(|c| c.section_id.as_str()).collect();
    assert_eq!(converted, vec![GOOD, "wrapper"]);
    assert!(out.site.lessons.contains_key("wrapper"));
    assert_eq!(out.site.sections["top"].lessons, vec!["wrapper"]);
    assert_eq!(out.site.sections["top"].audio_count, 2);
}

#[test]
fn snapshots_are_written_per_stage() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions {
        snapshot_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    run(broken_site(), &OfflineProbe, &options).unwrap();

    for name in [
        "raw.json",
        "repaired.json",
        "counted.json",
        "resolved.json",
        "corrections.json",
    ] {
        assert!(dir.path().join(name).exists(), "{name} not written");
    }
    let raw = crate::snapshot::load_site(&dir.path().join("raw.json")).unwrap();
    assert_eq!(raw, broken_site());
}

#[test]
fn raw_snapshot_precedes_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions {
        convert_lessons: true,
        snapshot_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let out = run(broken_site(), &OfflineProbe, &options).unwrap();
    assert!(!out.conversions.is_empty());

    let raw = crate::snapshot::load_site(&dir.path().join("raw.json")).unwrap();
    assert_eq!(raw, broken_site());
    let converted = crate::snapshot::load_site(&dir.path().join("converted.json")).unwrap();
    assert!(converted.lessons.contains_key("wrapper"));
    assert!(!converted.sections.contains_key("wrapper"));
}

#[test]
fn converted_snapshot_only_written_when_converting() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions {
        snapshot_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    run(broken_site(), &OfflineProbe, &options).unwrap();
    assert!(!dir.path().join("converted.json").exists());
}

/// Every request fails, as with the network down.
struct DownNetwork;

impl Probe for DownNetwork {
    fn status(&self, id: &str) -> Result<ProbeStatus, ProbeError> {
        Err(ProbeError::unavailable(id))
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, ProbeError> {
        Err(ProbeError::unavailable(id))
    }
}

#[test]
fn network_failures_do_not_fail_the_run() {
    let out = run(broken_site(), &DownNetwork, &PipelineOptions::default()).unwrap();
    assert_eq!(out.report.applied_count(), 0);
    assert_eq!(out.detached.len(), 1);
    assert_eq!(out.resolved.top_level, vec!["top"]);
}
