//! Compaction of a counted site into a [`ResolvedSite`].
//!
//! Each section resolves to the simplest shape that keeps its content:
//!
//! 1. one lesson with one audio and nothing else becomes that media;
//! 2. a lone sub-section (no lessons) is replaced by its own resolution;
//! 3. sub-sections of at most one audio each fold into a synthetic lesson;
//! 4. lessons of at most one audio each fold into a synthetic lesson;
//! 5. anything else stays a structural section.
//!
//! Top-level sections are always structural.

use std::collections::HashSet;

use lesson_tree_core::{Lesson, Media, Node, Section, Site};

use crate::error::missing_lesson;
use crate::resolved::{ContentReference, ResolvedSection, ResolvedSite};

/// What a section or lesson collapses to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A structural section, already stored in the output.
    Section(String),
    /// A lesson, real or synthetic, to be stored under `id`.
    Lesson { id: String, lesson: Lesson },
    /// A single media item to inline into the parent.
    Media(Media),
    /// Nothing worth showing.
    Empty,
}

/// Builds a [`ResolvedSite`] from a site whose audio counts are computed.
pub struct Compactor<'a> {
    site: &'a Site,
    resolved: ResolvedSite,
    in_progress: HashSet<String>,
}

impl<'a> Compactor<'a> {
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            resolved: ResolvedSite::default(),
            in_progress: HashSet::new(),
        }
    }

    /// Resolve every top-level section and return the output.
    pub fn resolve(mut self) -> ResolvedSite {
        let site = self.site;
        for id in &site.top_level {
            let Some(section) = site.sections.get(id) else {
                log::warn!("Top-level entry {id} is not a section, leaving it out");
                continue;
            };
            if !self.resolved.sections.contains_key(id) {
                self.in_progress.insert(id.clone());
                self.store_structural(id, section, None);
                self.in_progress.remove(id);
            }
            if !self.resolved.top_level.contains(id) {
                self.resolved.top_level.push(id.clone());
            }
        }

        log::info!(
            "Resolved {} sections and {} lessons",
            self.resolved.sections.len(),
            self.resolved.lessons.len()
        );
        self.resolved
    }

    /// Resolve one section. Structural results are memoized in the output;
    /// a section reached again while it is being resolved is [`Resolution::Empty`].
    pub fn resolve_section(&mut self, id: &str) -> Resolution {
        if self.resolved.sections.contains_key(id) {
            return Resolution::Section(id.to_string());
        }
        if self.in_progress.contains(id) {
            log::debug!("Cycle through section {id}, cutting it");
            return Resolution::Empty;
        }
        let site = self.site;
        let Some(section) = site.sections.get(id) else {
            return Resolution::Empty;
        };

        self.in_progress.insert(id.to_string());
        let resolution = self.resolve_shape(id, section);
        self.in_progress.remove(id);
        resolution
    }

    /// Resolve one lesson: single audio inlines as media, empty disappears,
    /// everything else stays a lesson.
    pub fn resolve_lesson(&self, id: &str) -> Resolution {
        let Some(lesson) = self.site.lessons.get(id) else {
            return Resolution::Empty;
        };
        match (lesson.audio.as_slice(), lesson.pdf.is_empty()) {
            ([single], true) => Resolution::Media(single.with_fallback(lesson)),
            ([], true) => Resolution::Empty,
            _ => Resolution::Lesson {
                id: id.to_string(),
                lesson: lesson.clone(),
            },
        }
    }

    fn resolve_shape(&mut self, id: &str, section: &'a Section) -> Resolution {
        let site = self.site;

        if section.audio_count == 1 && section.lessons.len() == 1 && section.sections.is_empty() {
            if let Some(Node::Lesson(lesson)) = site.node(&section.lessons[0]) {
                if let ([single], true) = (lesson.audio.as_slice(), lesson.pdf.is_empty()) {
                    return Resolution::Media(single.with_fallback(lesson));
                }
            }
        }

        if section.is_empty() {
            return Resolution::Empty;
        }

        if section.lessons.is_empty() {
            if let [only] = section.sections.as_slice() {
                return self.resolve_child(only);
            }
            if section.sections.iter().all(|c| self.audio_of(c) <= 1) {
                let children: Vec<Resolution> =
                    section.sections.iter().map(|c| self.resolve_child(c)).collect();
                return self.fold(id, section, children);
            }
        } else if section.sections.is_empty()
            && section.lessons.iter().all(|l| self.audio_of(l) <= 1)
        {
            let children: Vec<Resolution> = section
                .lessons
                .iter()
                .map(|l| self.resolve_lesson_slot(id, l))
                .collect();
            return self.fold(id, section, children);
        }

        self.store_structural(id, section, None);
        Resolution::Section(id.to_string())
    }

    /// Merge small children into one synthetic lesson keyed by `id`. A child
    /// that resolved to a structural section cannot be merged, so the whole
    /// section stays structural instead.
    fn fold(&mut self, id: &str, section: &Section, children: Vec<Resolution>) -> Resolution {
        if children.iter().any(|c| matches!(c, Resolution::Section(_))) {
            self.store_structural(id, section, Some(children));
            return Resolution::Section(id.to_string());
        }

        let mut merged = Lesson {
            id: section.id.clone(),
            title: section.title.clone(),
            description: section.description.clone(),
            ..Default::default()
        };
        for child in children {
            match child {
                Resolution::Media(media) => merged.audio.push(media),
                Resolution::Lesson { lesson, .. } => {
                    merged.audio.extend(lesson.audio.iter().map(|m| m.with_fallback(&lesson)));
                    merged.pdf.extend(lesson.pdf.iter().map(|m| m.with_fallback(&lesson)));
                }
                Resolution::Section(_) | Resolution::Empty => {}
            }
        }

        if merged.is_empty() {
            Resolution::Empty
        } else {
            Resolution::Lesson {
                id: id.to_string(),
                lesson: merged,
            }
        }
    }

    /// Emit a structural section: lessons first, then sub-sections.
    /// `sub_sections` carries sub-section resolutions already computed.
    fn store_structural(
        &mut self,
        id: &str,
        section: &Section,
        sub_sections: Option<Vec<Resolution>>,
    ) {
        let mut node = ResolvedSection {
            id: id.to_string(),
            title: section.title.clone(),
            description: section.description.clone(),
            audio_count: section.audio_count,
            ..Default::default()
        };

        for lesson_id in &section.lessons {
            let resolution = self.resolve_lesson_slot(id, lesson_id);
            self.attach(&mut node, resolution);
        }
        let subs = match sub_sections {
            Some(subs) => subs,
            None => section.sections.iter().map(|c| self.resolve_child(c)).collect(),
        };
        for resolution in subs {
            self.attach(&mut node, resolution);
        }

        self.resolved.sections.insert(id.to_string(), node);
    }

    fn attach(&mut self, node: &mut ResolvedSection, resolution: Resolution) {
        match resolution {
            Resolution::Section(child) => node.content.push(ContentReference::Section(child)),
            Resolution::Lesson { id, lesson } => {
                node.content.push(ContentReference::Lesson(id.clone()));
                self.resolved.lessons.insert(id, lesson);
            }
            Resolution::Media(media) => {
                if !node.audio.contains_key(&media.source) {
                    node.content.push(ContentReference::Media(media.source.clone()));
                    node.audio.insert(media.source.clone(), media);
                }
            }
            Resolution::Empty => {}
        }
    }

    /// Resolve an entry of a section's sub-section list.
    fn resolve_child(&mut self, id: &str) -> Resolution {
        let site = self.site;
        match site.node(id) {
            Some(Node::Section(_)) => self.resolve_section(id),
            Some(Node::Lesson(_)) => self.resolve_lesson(id),
            None => {
                log::warn!("Skipping unknown section {id}");
                Resolution::Empty
            }
        }
    }

    /// Resolve an entry of a section's lesson list.
    fn resolve_lesson_slot(&mut self, parent: &str, id: &str) -> Resolution {
        let site = self.site;
        match site.node(id) {
            Some(Node::Lesson(_)) => self.resolve_lesson(id),
            Some(Node::Section(_)) => self.resolve_section(id),
            None => missing_lesson(parent, id),
        }
    }

    fn audio_of(&self, id: &str) -> usize {
        match self.site.node(id) {
            Some(Node::Section(section)) => section.audio_count,
            Some(Node::Lesson(lesson)) => lesson.audio.len(),
            None => 0,
        }
    }
}

/// Convenience wrapper around [`Compactor::resolve`].
pub fn resolve_site(site: &Site) -> ResolvedSite {
    Compactor::new(site).resolve()
}

#[cfg(test)]
#[path = "tests/compactor_tests.rs"]
mod tests;
