use super::*;
use crate::model::{Media, Section};

fn single_audio(title: &str, source: &str) -> Lesson {
    Lesson::new(title).with_audio(Media::new(source))
}

#[test]
fn single_lesson_takes_over_section_id() {
    let mut site = Site::new()
        .with_section("s", Section::new("Section").with_lessons(["l"]))
        .with_lesson(
            "l",
            Lesson::new("Lesson")
                .with_audio(Media::new("1.mp3"))
                .with_audio(Media::new("2.mp3")),
        );

    let conversion = site.convert_to_lesson("s").unwrap();
    assert_eq!(conversion.section_id, "s");
    assert_eq!(conversion.consumed, vec!["l"]);
    assert!(!site.sections.contains_key("s"));
    assert!(!site.lessons.contains_key("l"));
    assert_eq!(site.lessons["s"].title, "Lesson");
    assert_eq!(site.lessons["s"].audio.len(), 2);
}

#[test]
fn several_single_audio_lessons_merge() {
    let mut site = Site::new()
        .with_section(
            "s",
            Section::new("Section")
                .with_description("About")
                .with_lessons(["a", "b"]),
        )
        .with_lesson("a", single_audio("First", "a.mp3"))
        .with_lesson(
            "b",
            Lesson::new("Second")
                .with_audio(Media::new("b.mp3").with_title("Own title"))
                .with_pdf(Media::new("b.pdf")),
        );

    let conversion = site.convert_to_lesson("s").unwrap();
    assert_eq!(conversion.consumed, vec!["a", "b"]);

    let merged = &site.lessons["s"];
    assert_eq!(merged.title, "Section");
    assert_eq!(merged.description, "About");
    let titles: Vec<_> = merged.audio.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Own title"]);
    assert_eq!(merged.pdf.len(), 1);
    assert!(site.sections.is_empty());
    assert_eq!(site.lessons.len(), 1);
}

#[test]
fn section_without_lessons_has_no_content() {
    let mut site = Site::new().with_section("s", Section::new("Empty"));
    assert_eq!(
        site.convert_to_lesson("s"),
        Err(ModelError::NoContent("s".into()))
    );
    assert!(site.sections.contains_key("s"));
}

#[test]
fn multi_audio_lesson_among_several_is_complex() {
    let mut site = Site::new()
        .with_section("s", Section::new("S").with_lessons(["a", "b"]))
        .with_lesson("a", single_audio("A", "a.mp3"))
        .with_lesson(
            "b",
            Lesson::new("B")
                .with_audio(Media::new("b1.mp3"))
                .with_audio(Media::new("b2.mp3")),
        );
    let before = site.clone();

    assert_eq!(
        site.convert_to_lesson("s"),
        Err(ModelError::ComplexLesson("s".into()))
    );
    assert_eq!(site, before);
}

#[test]
fn section_with_sub_sections_is_complex() {
    let mut site = Site::new()
        .with_section("s", Section::new("S").with_sections(["t"]).with_lessons(["a"]))
        .with_section("t", Section::new("T"))
        .with_lesson("a", single_audio("A", "a.mp3"));
    assert!(matches!(
        site.convert_to_lesson("s"),
        Err(ModelError::ComplexLesson(_))
    ));
}

#[test]
fn missing_lesson_leaves_site_unchanged() {
    let mut site = Site::new()
        .with_section("s", Section::new("S").with_lessons(["a", "ghost"]))
        .with_lesson("a", single_audio("A", "a.mp3"));
    let before = site.clone();

    assert_eq!(
        site.convert_to_lesson("s"),
        Err(ModelError::missing_lesson("s", "ghost"))
    );
    assert_eq!(site, before);
}

#[test]
fn converting_twice_fails_with_no_content() {
    let mut site = Site::new()
        .with_section("s", Section::new("S").with_lessons(["a"]))
        .with_lesson("a", single_audio("A", "a.mp3"));

    site.convert_to_lesson("s").unwrap();
    assert_eq!(
        site.convert_to_lesson("s"),
        Err(ModelError::NoContent("s".into()))
    );
}

#[test]
fn apply_conversions_moves_and_renames_references() {
    let mut site = Site::new()
        .with_section("top", Section::new("Top").with_sections(["s", "other"]))
        .with_section("other", Section::new("Other").with_lessons(["a", "b"]))
        .with_section("s", Section::new("S").with_lessons(["a", "b"]))
        .with_lesson("a", single_audio("A", "a.mp3"))
        .with_lesson("b", single_audio("B", "b.mp3"))
        .with_top_level("top");

    let conversion = site.convert_to_lesson("s").unwrap();
    site.apply_conversions(&[conversion]);

    let top = &site.sections["top"];
    assert_eq!(top.sections, vec!["other"]);
    assert_eq!(top.lessons, vec!["s"]);

    // Both consumed lessons collapse into the one merged lesson.
    assert_eq!(site.sections["other"].lessons, vec!["s"]);
}

#[test]
fn convert_disguised_lessons_skips_top_level_and_complex() {
    let mut site = Site::new()
        .with_section("top", Section::new("Top").with_sections(["leaf", "deep"]).with_lessons(["x"]))
        .with_section("leaf", Section::new("Leaf").with_lessons(["a"]))
        .with_section("deep", Section::new("Deep").with_sections(["leaf"]))
        .with_lesson("a", single_audio("A", "a.mp3"))
        .with_lesson("x", single_audio("X", "x.mp3"))
        .with_top_level("top");

    let conversions = site.convert_disguised_lessons();
    assert_eq!(conversions.len(), 1);
    assert_eq!(conversions[0].section_id, "leaf");

    assert!(site.sections.contains_key("top"));
    assert!(site.sections.contains_key("deep"));
    assert_eq!(site.sections["top"].sections, vec!["deep"]);
    assert_eq!(site.sections["top"].lessons, vec!["x", "leaf"]);
    assert!(site.sections["deep"].sections.is_empty());
    assert_eq!(site.sections["deep"].lessons, vec!["leaf"]);
}

#[test]
fn converted_lesson_carries_the_section_scraped_id() {
    let mut section = Section::new("Section").with_lessons(["l"]);
    section.id = "https://example.org/s".to_string();
    let mut lesson = single_audio("Lesson", "1.mp3");
    lesson.id = "https://example.org/l".to_string();
    let mut site = Site::new().with_section("s", section).with_lesson("l", lesson);

    site.convert_to_lesson("s").unwrap();
    assert_eq!(site.lessons["s"].id, "https://example.org/s");
}
