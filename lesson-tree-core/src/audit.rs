//! Offline structural checks over a site.

use serde::{Deserialize, Serialize};

use crate::model::{Site, Slot};

/// A reference whose target exists in neither mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingEdge {
    /// Referencing section, or `None` for the top-level list.
    pub parent: Option<String>,
    pub slot: Slot,
    pub child: String,
}

/// Problems found by [`Site::audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub dangling: Vec<DanglingEdge>,
    /// Sections with no sub-sections and no lessons.
    pub empty_sections: Vec<String>,
    /// Lessons with no audio and no PDF.
    pub empty_lessons: Vec<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.empty_sections.is_empty() && self.empty_lessons.is_empty()
    }
}

impl Site {
    /// Report dangling references and empty nodes without touching anything.
    pub fn audit(&self) -> AuditReport {
        AuditReport {
            dangling: self.dangling_edges(),
            empty_sections: self
                .sections
                .iter()
                .filter(|(_, s)| s.is_empty())
                .map(|(id, _)| id.clone())
                .collect(),
            empty_lessons: self
                .lessons
                .iter()
                .filter(|(_, l)| l.is_empty())
                .map(|(id, _)| id.clone())
                .collect(),
        }
    }

    /// Remove every reference to an identifier that exists in neither
    /// mapping, returning what was removed.
    pub fn detach_dangling(&mut self) -> Vec<DanglingEdge> {
        let dangling = self.dangling_edges();
        if dangling.is_empty() {
            return dangling;
        }

        let sections = &self.sections;
        let lessons = &self.lessons;
        let live = |id: &String| sections.contains_key(id) || lessons.contains_key(id);

        let keep_top: Vec<String> = self.top_level.iter().filter(|id| live(*id)).cloned().collect();
        let mut kept = Vec::with_capacity(self.sections.len());
        for (id, section) in &self.sections {
            let subs: Vec<String> = section.sections.iter().filter(|c| live(*c)).cloned().collect();
            let les: Vec<String> = section.lessons.iter().filter(|c| live(*c)).cloned().collect();
            kept.push((id.clone(), subs, les));
        }

        self.top_level = keep_top;
        for (id, subs, les) in kept {
            if let Some(section) = self.sections.get_mut(&id) {
                section.sections = subs;
                section.lessons = les;
            }
        }

        for edge in &dangling {
            log::warn!(
                "Detached dangling {} reference {} from {}",
                edge.slot,
                edge.child,
                edge.parent.as_deref().unwrap_or("top level"),
            );
        }
        dangling
    }

    fn dangling_edges(&self) -> Vec<DanglingEdge> {
        let top = self
            .top_level
            .iter()
            .filter(|id| !self.contains(id))
            .map(|id| DanglingEdge {
                parent: None,
                slot: Slot::Section,
                child: id.clone(),
            });
        let nested = self
            .edges()
            .filter(|(_, _, child)| !self.contains(child))
            .map(|(parent, slot, child)| DanglingEdge {
                parent: Some(parent.to_string()),
                slot,
                child: child.to_string(),
            });
        top.chain(nested).collect()
    }
}

#[cfg(test)]
#[path = "tests/audit_tests.rs"]
mod tests;
