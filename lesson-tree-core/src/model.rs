use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Root container: every section and lesson, plus the top-level order.
///
/// Sections and lessons share one identifier namespace (identifiers are the
/// page URLs they were scraped from). Mappings are ordered so that
/// serialized snapshots are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: BTreeMap<String, Section>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub lessons: BTreeMap<String, Lesson>,

    /// Identifiers of the top-level sections, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_level: Vec<String>,
}

/// A grouping node holding sub-sections and/or lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Section {
    /// Informational copy of the identifier as scraped. Never used for lookup.
    #[serde(
        rename = "ID",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Sub-section identifiers, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<String>,

    /// Lesson identifiers, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub lessons: Vec<String>,

    /// Total audio items reachable from this section, including all
    /// descendant sections. Zero until the counter has run.
    #[serde(default)]
    pub audio_count: usize,

    #[serde(skip)]
    pub visit: Visit,
}

/// One lesson. It may contain multiple classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lesson {
    #[serde(
        rename = "ID",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub audio: Vec<Media>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf: Vec<Media>,
}

/// A single playable or downloadable item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Media {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// URL of the media file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

/// Traversal marker used while walking the (possibly cyclic) section graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visit {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

/// Which list of a section an edge lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Section,
    Lesson,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Section => write!(f, "section"),
            Self::Lesson => write!(f, "lesson"),
        }
    }
}

/// The live entity an identifier denotes.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Section(&'a Section),
    Lesson(&'a Lesson),
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an identifier in either mapping. Sections win if (wrongly)
    /// present in both.
    pub fn node(&self, id: &str) -> Option<Node<'_>> {
        if let Some(section) = self.sections.get(id) {
            return Some(Node::Section(section));
        }
        self.lessons.get(id).map(Node::Lesson)
    }

    /// True if `id` names a section or a lesson.
    pub fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id) || self.lessons.contains_key(id)
    }

    pub fn is_top_level(&self, id: &str) -> bool {
        self.top_level.iter().any(|top| top == id)
    }

    /// Iterate every (parent, slot, child) edge in parent order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, Slot, &str)> {
        self.sections.iter().flat_map(|(parent, section)| {
            let subs = section
                .sections
                .iter()
                .map(move |child| (parent.as_str(), Slot::Section, child.as_str()));
            let lessons = section
                .lessons
                .iter()
                .map(move |child| (parent.as_str(), Slot::Lesson, child.as_str()));
            subs.chain(lessons)
        })
    }

    /// Reset every section's traversal marker.
    pub fn clear_visits(&mut self) {
        for section in self.sections.values_mut() {
            section.visit = Visit::Unvisited;
        }
    }

    // Builder helpers, mostly for tests and fixtures.

    pub fn with_section(mut self, id: impl Into<String>, section: Section) -> Self {
        self.sections.insert(id.into(), section);
        self
    }

    pub fn with_lesson(mut self, id: impl Into<String>, lesson: Lesson) -> Self {
        self.lessons.insert(id.into(), lesson);
        self
    }

    pub fn with_top_level(mut self, id: impl Into<String>) -> Self {
        self.top_level.push(id.into());
        self
    }
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sections<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_lessons<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lessons.extend(ids.into_iter().map(Into::into));
        self
    }

    /// A section with no sub-sections and no lessons.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.lessons.is_empty()
    }

    /// The list holding edges of the given slot kind.
    pub fn slot_mut(&mut self, slot: Slot) -> &mut Vec<String> {
        match slot {
            Slot::Section => &mut self.sections,
            Slot::Lesson => &mut self.lessons,
        }
    }
}

impl Lesson {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_audio(mut self, media: Media) -> Self {
        self.audio.push(media);
        self
    }

    pub fn with_pdf(mut self, media: Media) -> Self {
        self.pdf.push(media);
        self
    }

    /// A lesson with neither audio nor PDF.
    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.pdf.is_empty()
    }
}

impl Media {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Copy of this media with a blank title or description filled in from
    /// the owning lesson.
    pub fn with_fallback(&self, lesson: &Lesson) -> Media {
        let mut media = self.clone();
        if media.title.is_empty() {
            media.title = lesson.title.clone();
        }
        if media.description.is_empty() {
            media.description = lesson.description.clone();
        }
        media
    }
}

/// Drop repeated identifiers, keeping the first occurrence of each.
pub fn dedup_ids(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

/// Deserialize a missing or `null` field as its default value.
///
/// The ingestion side writes nil lists as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
