//! Audio counting over the section graph.

use std::collections::HashMap;

use lesson_tree_core::{Node, Site, Visit};

use crate::error::missing_lesson;

const NO_CUT: usize = usize::MAX;

/// Computes `audio_count` for every section reachable from the top level.
///
/// The graph may contain cycles. A section reached again while it is still
/// being counted contributes zero, so every cycle is cut. A section counted
/// completely is marked done and reused by every other parent. Nonzero
/// counts already written are trusted, which makes a second run a no-op.
pub struct LessonCounter<'a> {
    site: &'a mut Site,
    /// Stack depth of each section currently being counted.
    depths: HashMap<String, usize>,
}

impl<'a> LessonCounter<'a> {
    pub fn new(site: &'a mut Site) -> Self {
        Self {
            site,
            depths: HashMap::new(),
        }
    }

    /// Count every top-level section and everything below it.
    ///
    /// # Panics
    ///
    /// If a section lists a lesson that exists in neither mapping. Repair
    /// and detaching must have run first.
    pub fn count_lessons(&mut self) {
        self.site.clear_visits();
        let top_level = self.site.top_level.clone();
        for id in &top_level {
            if self.site.sections.contains_key(id) {
                self.count_section(id);
            } else {
                log::warn!("Top-level entry {id} is not a section, not counting it");
            }
        }
        log::debug!("Counted {} top-level sections", top_level.len());
    }

    /// Audio reachable from one section, memoized on the section itself.
    pub fn count_section(&mut self, id: &str) -> usize {
        self.visit(id).0
    }

    /// Count a section, returning the count and the shallowest stack depth
    /// at which the walk below it was cut by a cycle ([`NO_CUT`] if none).
    fn visit(&mut self, id: &str) -> (usize, usize) {
        let Some(section) = self.site.sections.get_mut(id) else {
            return (0, NO_CUT);
        };
        match section.visit {
            Visit::InProgress => {
                let depth = self.depths.get(id).copied().unwrap_or(0);
                return (0, depth);
            }
            Visit::Done => return (section.audio_count, NO_CUT),
            // Zero is indistinguishable from "not yet counted", so only
            // nonzero counts from an earlier run short-circuit.
            Visit::Unvisited if section.audio_count > 0 => return (section.audio_count, NO_CUT),
            Visit::Unvisited => {}
        }
        section.visit = Visit::InProgress;
        let subs = section.sections.clone();
        let lessons = section.lessons.clone();

        let depth = self.depths.len();
        self.depths.insert(id.to_string(), depth);

        let mut total = 0;
        let mut low = NO_CUT;
        for child in &subs {
            let (count, cut) = self.count_child(id, child, false);
            total += count;
            low = low.min(cut);
        }
        for child in &lessons {
            let (count, cut) = self.count_child(id, child, true);
            total += count;
            low = low.min(cut);
        }
        self.depths.remove(id);

        // A cut at a section above this one leaves the count partial; it is
        // recounted the next time it is reached.
        let complete = low >= depth;
        if let Some(section) = self.site.sections.get_mut(id) {
            section.audio_count = total;
            section.visit = if complete { Visit::Done } else { Visit::Unvisited };
        }
        (total, if complete { NO_CUT } else { low })
    }

    fn count_child(&mut self, parent: &str, child: &str, lesson_slot: bool) -> (usize, usize) {
        let direct = match self.site.node(child) {
            Some(Node::Lesson(lesson)) => Some(lesson.audio.len()),
            Some(Node::Section(_)) => None,
            None if lesson_slot => missing_lesson(parent, child),
            None => {
                log::warn!("Section {parent} references unknown section {child}");
                Some(0)
            }
        };
        match direct {
            Some(count) => (count, NO_CUT),
            None => self.visit(child),
        }
    }
}

/// Convenience wrapper around [`LessonCounter::count_lessons`].
pub fn count_lessons(site: &mut Site) {
    LessonCounter::new(site).count_lessons();
}

#[cfg(test)]
#[path = "tests/counter_tests.rs"]
mod tests;
