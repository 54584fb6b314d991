//! The compacted, consumer-facing form of a site.

use std::collections::BTreeMap;

use lesson_tree_core::{Lesson, Media};
use serde::{Deserialize, Serialize};

/// Output of compaction. Every section here is structural; single-media
/// content is inlined and small groups are folded into synthetic lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedSite {
    pub sections: BTreeMap<String, ResolvedSection>,
    /// Lessons referenced from content, including synthetic ones keyed by
    /// the identifier of the section they replaced.
    pub lessons: BTreeMap<String, Lesson>,
    pub top_level: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedSection {
    #[serde(rename = "ID")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub audio_count: usize,
    /// Ordered children: lessons first, then sub-sections, as listed.
    pub content: Vec<ContentReference>,
    /// Inlined media keyed by source URL. Every `Media` reference in
    /// `content` has an entry here.
    pub audio: BTreeMap<String, Media>,
}

/// One child of a resolved section, serialized as
/// `{"Type": "...", "Reference": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type", content = "Reference", rename_all = "lowercase")]
pub enum ContentReference {
    /// Key into [`ResolvedSite::sections`].
    Section(String),
    /// Key into [`ResolvedSite::lessons`].
    Lesson(String),
    /// Key into the owning section's `audio` map.
    Media(String),
}

impl ContentReference {
    pub fn reference(&self) -> &str {
        match self {
            Self::Section(id) | Self::Lesson(id) | Self::Media(id) => id,
        }
    }
}

impl ResolvedSite {
    /// Audio reachable through a section's direct content. For a consistent
    /// site this equals the section's `audio_count`.
    pub fn content_audio(&self, id: &str) -> usize {
        let Some(section) = self.sections.get(id) else {
            return 0;
        };
        section
            .content
            .iter()
            .map(|child| match child {
                ContentReference::Section(sub) => {
                    self.sections.get(sub).map_or(0, |s| s.audio_count)
                }
                ContentReference::Lesson(lesson) => {
                    self.lessons.get(lesson).map_or(0, |l| l.audio.len())
                }
                ContentReference::Media(_) => 1,
            })
            .sum()
    }

    /// References that point at nothing. Empty for any compactor output.
    pub fn broken_references(&self) -> Vec<(&str, &ContentReference)> {
        let mut broken = Vec::new();
        for (id, section) in &self.sections {
            for child in &section.content {
                let ok = match child {
                    ContentReference::Section(sub) => self.sections.contains_key(sub),
                    ContentReference::Lesson(lesson) => self.lessons.contains_key(lesson),
                    ContentReference::Media(source) => section.audio.contains_key(source),
                };
                if !ok {
                    broken.push((id.as_str(), child));
                }
            }
        }
        broken
    }
}

#[cfg(test)]
#[path = "tests/resolved_tests.rs"]
mod tests;
