//! Starred and selected sections of a semester plan.
//!
//! Starring puts a section on the shortlist; selecting marks a starred
//! section for the class table and calendar export. A `Plan` is a value:
//! every operation returns the updated plan and leaves the original alone.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lesson::{Lesson, total_credits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub starred: BTreeSet<String>,
    #[serde(default)]
    pub selected: BTreeSet<String>,
}

impl Plan {
    pub fn is_starred(&self, section_id: &str) -> bool {
        self.starred.contains(section_id)
    }

    pub fn is_selected(&self, section_id: &str) -> bool {
        self.selected.contains(section_id)
    }

    #[must_use]
    pub fn star(&self, section_id: &str) -> Plan {
        let mut next = self.clone();
        next.starred.insert(section_id.to_string());
        next
    }

    /// Remove a section from the shortlist. It is deselected as well.
    #[must_use]
    pub fn unstar(&self, section_id: &str) -> Plan {
        self.unstar_all([section_id])
    }

    #[must_use]
    pub fn unstar_all<'a, I>(&self, section_ids: I) -> Plan
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = self.clone();
        for id in section_ids {
            next.starred.remove(id);
            next.selected.remove(id);
        }
        next
    }

    /// Select a section. Selecting an unstarred section stars it too.
    #[must_use]
    pub fn select(&self, section_id: &str) -> Plan {
        let mut next = self.star(section_id);
        next.selected.insert(section_id.to_string());
        next
    }

    #[must_use]
    pub fn deselect(&self, section_id: &str) -> Plan {
        let mut next = self.clone();
        next.selected.remove(section_id);
        next
    }

    #[must_use]
    pub fn select_all_starred(&self) -> Plan {
        Plan {
            starred: self.starred.clone(),
            selected: self.starred.clone(),
        }
    }

    #[must_use]
    pub fn clear_selection(&self) -> Plan {
        Plan {
            starred: self.starred.clone(),
            selected: BTreeSet::new(),
        }
    }

    /// Starred lesson rows, sorted by course code.
    pub fn starred_lessons<'a>(&self, lessons: &'a [Lesson]) -> Vec<&'a Lesson> {
        rows_of(lessons, &self.starred)
    }

    /// Selected lesson rows, sorted by course code.
    pub fn selected_lessons<'a>(&self, lessons: &'a [Lesson]) -> Vec<&'a Lesson> {
        rows_of(lessons, &self.selected)
    }

    /// (selected, starred) credit totals, each section counted once.
    pub fn credits(&self, lessons: &[Lesson]) -> (f64, f64) {
        (
            total_credits(self.selected_lessons(lessons)),
            total_credits(self.starred_lessons(lessons)),
        )
    }
}

fn rows_of<'a>(lessons: &'a [Lesson], ids: &BTreeSet<String>) -> Vec<&'a Lesson> {
    let mut rows: Vec<&Lesson> = lessons
        .iter()
        .filter(|l| ids.contains(&l.section_id))
        .collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));
    rows
}
