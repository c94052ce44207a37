//! Weekly class table: which lessons sit in which (day, period) cell.

use std::collections::BTreeMap;

use crate::lesson::Lesson;
use crate::location::format_location;
use crate::period::PeriodTable;

/// What a cell shows for one lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSlot {
    pub section_id: String,
    pub title: String,
    pub location: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    week: Option<u32>,
    periods: usize,
    cells: BTreeMap<(u32, u32), Vec<ClassSlot>>,
}

impl ClassTable {
    /// Lay out `lessons`. With `week`, only lessons active that week.
    /// Periods outside `table` are dropped.
    pub fn build<'a, I>(lessons: I, week: Option<u32>, table: &PeriodTable) -> Self
    where
        I: IntoIterator<Item = &'a Lesson>,
    {
        let mut cells: BTreeMap<(u32, u32), Vec<ClassSlot>> = BTreeMap::new();

        for lesson in lessons {
            if !lesson.is_scheduled() {
                continue;
            }
            if let Some(week) = week {
                if !lesson.weeks.contains(week) {
                    continue;
                }
            }

            let slot = ClassSlot {
                section_id: lesson.section_id.clone(),
                title: lesson.title(),
                location: format_location(&lesson.schedule_text, &lesson.location, lesson.day),
            };

            for period in lesson.periods.positions() {
                if table.start_of(period).is_none() {
                    continue;
                }
                let cell = cells.entry((lesson.day, period)).or_default();
                if !cell.iter().any(|s| s.section_id == slot.section_id) {
                    cell.push(slot.clone());
                }
            }
        }

        ClassTable {
            week,
            periods: table.len(),
            cells,
        }
    }

    pub fn week(&self) -> Option<u32> {
        self.week
    }

    /// Number of period rows.
    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn get(&self, day: u32, period: u32) -> &[ClassSlot] {
        self.cells
            .get(&(day, period))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Monday to Friday, plus the weekend when anything is scheduled then.
    pub fn days(&self) -> Vec<u32> {
        let weekend = self.cells.keys().any(|(day, _)| *day >= 6);
        if weekend { (1..=7).collect() } else { (1..=5).collect() }
    }
}
