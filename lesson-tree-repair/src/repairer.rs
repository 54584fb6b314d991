use std::collections::BTreeMap;

use lesson_tree_core::{Node, Site, Slot, dedup_ids};

use crate::correction::{Correction, Corrections, ReferenceProblem, RepairReport};
use crate::matcher::{DEFAULT_LENGTH_TOLERANCE, match_strength};
use crate::probe::{Probe, ProbeStatus};

/// Options controlling repair behavior.
#[derive(Debug, Clone)]
pub struct RepairOptions {
    /// See [`match_strength`].
    pub length_tolerance: usize,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
        }
    }
}

/// Progress information for callbacks.
#[derive(Debug, Clone)]
pub enum RepairProgress {
    /// Probing a bad identifier and its best guess.
    Probing {
        problem: ReferenceProblem,
        id: String,
        index: usize,
        total: usize,
    },
    /// A correction was applied to the site.
    Applied { id: String, replacement: String },
    /// Done; counts over both correction sets.
    Done { applied: usize, unresolved: usize },
}

/// Finds and fixes broken references in a site.
pub struct Repairer<'a> {
    probe: &'a dyn Probe,
    options: RepairOptions,
}

impl<'a> Repairer<'a> {
    pub fn new(probe: &'a dyn Probe) -> Self {
        Self {
            probe,
            options: RepairOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RepairOptions) -> Self {
        self.options = options;
        self
    }

    /// Corrections for references whose target exists in neither mapping.
    pub fn missing_corrections(&self, site: &Site) -> Corrections {
        self.collect(site, ReferenceProblem::MissingReference, &|_: RepairProgress| {})
    }

    /// Corrections for references to sections with no sub-sections and no
    /// lessons, or to lessons with no media.
    pub fn empty_corrections(&self, site: &Site) -> Corrections {
        self.collect(site, ReferenceProblem::EmptyReference, &|_: RepairProgress| {})
    }

    /// Probe a bad identifier and look for live identifiers it may have
    /// meant. The returned correction has no parents.
    pub fn possible_matches(&self, site: &Site, id: &str, slot: Slot) -> Correction {
        let mut correction = Correction::new(slot);

        match self.probe.status(id) {
            Ok(ProbeStatus::NotFound) => correction.is_404 = true,
            Ok(ProbeStatus::Reachable) => {}
            Err(e) => log::debug!("Existence probe failed for {id}: {e}"),
        }

        correction.guesses = self.guesses(site, id, slot);

        if let Some(best) = correction.best_guess().map(str::to_string) {
            match (self.probe.fetch(id), self.probe.fetch(&best)) {
                (Ok(original), Ok(guess)) => {
                    correction.is_confirmed = !original.is_empty() && original == guess;
                }
                (Err(e), _) | (_, Err(e)) => {
                    log::debug!("Content probe failed comparing {id} with {best}: {e}");
                }
            }
        }

        correction
    }

    /// Compute both correction sets and apply those with enough evidence.
    pub fn fix_site(&self, site: &mut Site) -> RepairReport {
        self.fix_site_with_progress(site, |_| {})
    }

    /// Like [`fix_site`](Self::fix_site), reporting progress as it goes.
    pub fn fix_site_with_progress(
        &self,
        site: &mut Site,
        progress: impl Fn(RepairProgress),
    ) -> RepairReport {
        let mut missing = self.collect(site, ReferenceProblem::MissingReference, &progress);
        let mut empty = self.collect(site, ReferenceProblem::EmptyReference, &progress);

        for (bad_id, correction) in missing.iter_mut().chain(empty.iter_mut()) {
            if apply_fix(site, bad_id, correction) {
                progress(RepairProgress::Applied {
                    id: bad_id.clone(),
                    replacement: correction.guesses[0].clone(),
                });
            }
        }

        let report = RepairReport { missing, empty };
        let applied = report.applied_count();
        let unresolved = report.unresolved().len();
        log::info!("Applied {applied} corrections, {unresolved} left for review");
        progress(RepairProgress::Done {
            applied,
            unresolved,
        });
        report
    }

    fn collect(
        &self,
        site: &Site,
        problem: ReferenceProblem,
        progress: &dyn Fn(RepairProgress),
    ) -> Corrections {
        // Bad identifier -> (slot first seen in, referencing parents)
        let mut targets: BTreeMap<String, (Slot, Vec<String>)> = BTreeMap::new();

        for (parent, slot, child) in site.edges() {
            let broken = match problem {
                ReferenceProblem::MissingReference => !site.contains(child),
                ReferenceProblem::EmptyReference => match site.node(child) {
                    Some(Node::Section(section)) => section.is_empty(),
                    Some(Node::Lesson(lesson)) => lesson.is_empty(),
                    None => false,
                },
            };
            if !broken {
                continue;
            }

            let (_, parents) = targets
                .entry(child.to_string())
                .or_insert_with(|| (slot, Vec::new()));
            if !parents.iter().any(|p| p == parent) {
                parents.push(parent.to_string());
            }
        }

        let total = targets.len();
        targets
            .into_iter()
            .enumerate()
            .map(|(index, (id, (slot, parents)))| {
                progress(RepairProgress::Probing {
                    problem,
                    id: id.clone(),
                    index,
                    total,
                });
                let mut correction = self.possible_matches(site, &id, slot);
                correction.parents = parents;
                (id, correction)
            })
            .collect()
    }

    /// Live identifiers resembling `id`: same-kind identifiers before the
    /// other kind, exact segment matches before containment matches.
    fn guesses(&self, site: &Site, id: &str, slot: Slot) -> Vec<String> {
        let tolerance = self.options.length_tolerance;
        let ranked = |ids: Vec<&String>| {
            let mut found: Vec<_> = ids
                .into_iter()
                .filter_map(|candidate| {
                    match_strength(id, candidate, tolerance).map(|s| (s, candidate.clone()))
                })
                .collect();
            found.sort_by_key(|(strength, _)| *strength);
            found.into_iter().map(|(_, candidate)| candidate)
        };

        let sections = ranked(site.sections.keys().collect());
        let lessons = ranked(site.lessons.keys().collect());
        match slot {
            Slot::Section => sections.chain(lessons).collect(),
            Slot::Lesson => lessons.chain(sections).collect(),
        }
    }
}

/// Apply one correction: drop the bad node and point every reference at
/// the best guess, keeping each edge in its original slot.
fn apply_fix(site: &mut Site, bad_id: &str, correction: &mut Correction) -> bool {
    if !correction.is_applicable() {
        return false;
    }
    let guess = correction.guesses[0].clone();

    // An earlier correction may have removed the guess (two broken
    // identifiers guessing each other). Leave it for review.
    if !site.contains(&guess) {
        log::warn!("Not fixing {bad_id}: best guess {guess} no longer exists");
        return false;
    }

    site.sections.remove(bad_id);
    site.lessons.remove(bad_id);

    for section in site.sections.values_mut() {
        for slot in [Slot::Section, Slot::Lesson] {
            replace_id(section.slot_mut(slot), bad_id, &guess);
        }
    }
    replace_id(&mut site.top_level, bad_id, &guess);

    log::debug!("Replaced {bad_id} with {guess}");
    correction.applied = true;
    true
}

fn replace_id(ids: &mut Vec<String>, bad_id: &str, guess: &str) {
    let mut touched = false;
    for id in ids.iter_mut() {
        if id.as_str() == bad_id {
            *id = guess.to_string();
            touched = true;
        }
    }
    if touched {
        dedup_ids(ids);
    }
}

#[cfg(test)]
#[path = "tests/repairer_tests.rs"]
mod tests;
