//! Folding sections that are really lessons into a single lesson.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Lesson, Site, dedup_ids};

/// Record of a section converted into a lesson under the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// The identifier that now names a lesson instead of a section.
    pub section_id: String,
    /// Lesson identifiers whose entries were removed by the conversion.
    /// References to them elsewhere are stale until reconciled.
    pub consumed: Vec<String>,
}

impl Site {
    /// Convert a section with no sub-sections into a lesson keyed by the
    /// section's identifier.
    ///
    /// A single lesson is re-keyed as-is. Several lessons are merged when
    /// each holds at most one audio item; their media keep their own titles
    /// (or inherit their lesson's). On error the site is left unchanged.
    pub fn convert_to_lesson(&mut self, id: &str) -> Result<Conversion, ModelError> {
        let section = self
            .sections
            .get(id)
            .ok_or_else(|| ModelError::no_content(id))?;

        if !section.sections.is_empty() {
            return Err(ModelError::complex_lesson(id));
        }
        if section.lessons.is_empty() {
            return Err(ModelError::no_content(id));
        }

        let mut lesson_ids = section.lessons.clone();
        dedup_ids(&mut lesson_ids);

        let mut children = Vec::with_capacity(lesson_ids.len());
        for lesson_id in &lesson_ids {
            let lesson = self
                .lessons
                .get(lesson_id)
                .ok_or_else(|| ModelError::missing_lesson(id, lesson_id.as_str()))?;
            children.push(lesson);
        }

        let merged = if let [only] = children.as_slice() {
            let mut lesson = (*only).clone();
            if lesson.title.is_empty() {
                lesson.title = section.title.clone();
            }
            if lesson.description.is_empty() {
                lesson.description = section.description.clone();
            }
            lesson.id = section.id.clone();
            lesson
        } else {
            if children.iter().any(|lesson| lesson.audio.len() > 1) {
                return Err(ModelError::complex_lesson(id));
            }
            Lesson {
                id: section.id.clone(),
                title: section.title.clone(),
                description: section.description.clone(),
                audio: children
                    .iter()
                    .flat_map(|lesson| lesson.audio.iter().map(|m| m.with_fallback(lesson)))
                    .collect(),
                pdf: children
                    .iter()
                    .flat_map(|lesson| lesson.pdf.iter().map(|m| m.with_fallback(lesson)))
                    .collect(),
            }
        };

        self.sections.remove(id);
        for lesson_id in &lesson_ids {
            self.lessons.remove(lesson_id);
        }
        self.lessons.insert(id.to_string(), merged);

        log::debug!("Converted section {id} into a lesson ({} consumed)", lesson_ids.len());

        Ok(Conversion {
            section_id: id.to_string(),
            consumed: lesson_ids.into_iter().filter(|l| l != id).collect(),
        })
    }

    /// Point references left stale by conversions at the new lessons.
    ///
    /// Sub-section references to a converted section move to the parent's
    /// lesson list; lesson references to a consumed lesson are renamed to
    /// the lesson that absorbed it.
    pub fn apply_conversions(&mut self, conversions: &[Conversion]) {
        let converted: HashSet<&str> = conversions
            .iter()
            .map(|c| c.section_id.as_str())
            .collect();
        let renamed: HashMap<&str, &str> = conversions
            .iter()
            .flat_map(|c| {
                c.consumed
                    .iter()
                    .map(move |old| (old.as_str(), c.section_id.as_str()))
            })
            .collect();

        for section in self.sections.values_mut() {
            let mut moved = Vec::new();
            section.sections.retain(|child| {
                if converted.contains(child.as_str()) {
                    moved.push(child.clone());
                    false
                } else {
                    true
                }
            });
            section.lessons.extend(moved);

            for lesson in section.lessons.iter_mut() {
                if let Some(&new_id) = renamed.get(lesson.as_str()) {
                    *lesson = new_id.to_string();
                }
            }
            dedup_ids(&mut section.lessons);
        }
    }

    /// Convert every non-top-level section that looks like a lesson, then
    /// reconcile references. Sections that fail to convert are left alone.
    pub fn convert_disguised_lessons(&mut self) -> Vec<Conversion> {
        let candidates: Vec<String> = self
            .sections
            .iter()
            .filter(|(id, s)| {
                s.sections.is_empty() && !s.lessons.is_empty() && !self.is_top_level(id)
            })
            .map(|(id, _)| id.clone())
            .collect();

        let mut conversions = Vec::new();
        for id in candidates {
            match self.convert_to_lesson(&id) {
                Ok(conversion) => conversions.push(conversion),
                Err(e) => log::debug!("Keeping section {id}: {e}"),
            }
        }

        self.apply_conversions(&conversions);
        log::info!("Converted {} sections into lessons", conversions.len());
        conversions
    }
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
