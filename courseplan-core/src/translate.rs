//! Lesson rows to concrete calendar events.
//!
//! A lesson row says "periods P of weekday D, in weeks W". Given the first
//! day of the semester this expands into one event per active week, dated
//! `begin + (week - 1) * 7 + (day - 1)` unless a fixture moves or cancels
//! that slot.

use chrono::{Days, NaiveDate, NaiveTime};
use tracing::debug;

use crate::bitmask::runs;
use crate::event::{CalendarEvent, EventDuration};
use crate::fixture::{Fixture, find_fixture};
use crate::lesson::Lesson;
use crate::location::format_location;
use crate::period::PeriodTable;

/// How a row whose periods are not consecutive is turned into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockPolicy {
    /// One event from the first to the last listed period.
    #[default]
    Merge,
    /// One event per run of consecutive periods.
    Split,
}

/// Per-semester inputs of the translation.
#[derive(Debug, Clone)]
pub struct SemesterPlan {
    /// Semester id, e.g. `2025-2026_Autumn`
    pub semester: String,
    /// Monday of week 1
    pub begin: NaiveDate,
    pub fixtures: Vec<Fixture>,
}

impl SemesterPlan {
    pub fn new(semester: impl Into<String>, begin: NaiveDate) -> Self {
        SemesterPlan {
            semester: semester.into(),
            begin,
            fixtures: Vec::new(),
        }
    }

    pub fn with_fixtures(mut self, fixtures: Vec<Fixture>) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn calendar_name(&self) -> String {
        format!("Timetable {}", self.semester)
    }

    /// Date of `day` in `week`, after fixtures. None when the slot is
    /// cancelled or cannot be dated.
    pub fn date_of(&self, week: u32, day: u32) -> Option<NaiveDate> {
        if let Some(fixture) = find_fixture(&self.fixtures, week, day) {
            return fixture.on;
        }
        naive_date(self.begin, week, day)
    }
}

/// `begin + (week - 1) * 7 + (day - 1)` days, ignoring fixtures.
pub fn naive_date(begin: NaiveDate, week: u32, day: u32) -> Option<NaiveDate> {
    if week == 0 || !(1..=7).contains(&day) {
        return None;
    }
    let offset = u64::from(week - 1) * 7 + u64::from(day - 1);
    begin.checked_add_days(Days::new(offset))
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    periods: PeriodTable,
    policy: BlockPolicy,
}

impl Translator {
    pub fn new(periods: PeriodTable, policy: BlockPolicy) -> Self {
        Translator { periods, policy }
    }

    pub fn periods(&self) -> &PeriodTable {
        &self.periods
    }

    /// Events of every lesson, in lesson-then-week order.
    pub fn translate(&self, lessons: &[Lesson], plan: &SemesterPlan) -> Vec<CalendarEvent> {
        lessons
            .iter()
            .flat_map(|lesson| self.lesson_events(lesson, plan))
            .collect()
    }

    /// Events of one lesson across all of its active weeks.
    pub fn lesson_events(&self, lesson: &Lesson, plan: &SemesterPlan) -> Vec<CalendarEvent> {
        lesson
            .weeks
            .positions()
            .into_iter()
            .flat_map(|week| self.materialize(lesson, week, plan))
            .collect()
    }

    /// Events of one lesson in one week. Empty when the week cannot be
    /// dated or the lesson has no periods.
    pub fn materialize(&self, lesson: &Lesson, week: u32, plan: &SemesterPlan) -> Vec<CalendarEvent> {
        let periods = lesson.periods.positions();
        let blocks = match (self.policy, periods.first(), periods.last()) {
            (_, None, _) | (_, _, None) => {
                debug!(section = %lesson.section_id, week, "no periods, skipping");
                return Vec::new();
            }
            (BlockPolicy::Merge, Some(&first), Some(&last)) => vec![(first, last)],
            (BlockPolicy::Split, _, _) => runs(&periods),
        };

        let Some(date) = plan.date_of(week, lesson.day) else {
            debug!(section = %lesson.section_id, week, day = lesson.day, "no date, skipping");
            return Vec::new();
        };

        let location = format_location(&lesson.schedule_text, &lesson.location, lesson.day);

        blocks
            .into_iter()
            .filter_map(|(first, last)| {
                let start_at = self.periods.start_of(first)?;
                let end_at = self.periods.end_of(last)?;
                if end_at <= start_at {
                    return None;
                }
                let time = NaiveTime::from_hms_opt(start_at / 60, start_at % 60, 0)?;

                Some(CalendarEvent {
                    start: date.and_time(time),
                    duration: EventDuration::from_minutes(end_at - start_at),
                    title: lesson.title(),
                    description: format!(
                        "{}, {} credits, week {}",
                        lesson.instructor, lesson.credits, week
                    ),
                    location: location.clone(),
                    calendar_name: plan.calendar_name(),
                    section_id: lesson.section_id.clone(),
                    week,
                    start_period: first,
                })
            })
            .collect()
    }
}

/// Translate with the default period table and merged blocks.
pub fn translate(lessons: &[Lesson], plan: &SemesterPlan) -> Vec<CalendarEvent> {
    Translator::default().translate(lessons, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmask::Bitmask;
    use crate::lesson::tests::make_lesson;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn autumn_2025() -> SemesterPlan {
        SemesterPlan::new("2025-2026_Autumn", date(2025, 9, 1))
    }

    fn week7_lesson() -> Lesson {
        make_lesson("S1", Bitmask::from("0000001"), Bitmask::from("0001100"), 1)
    }

    #[test]
    fn test_single_week_scenario() {
        let events = translate(&[week7_lesson()], &autumn_2025());

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.start.date(), date(2025, 10, 13));
        assert_eq!(event.start.format("%H:%M").to_string(), "10:40");
        assert_eq!(event.duration.total_minutes(), 95);
        assert_eq!(event.duration, EventDuration { hours: 1, minutes: 35 });
        assert_eq!(event.end().format("%H:%M").to_string(), "12:15");
        assert_eq!(event.title, "MATH1001 Calculus");
        assert_eq!(event.description, "Zhang San, 4 credits, week 7");
        assert_eq!(event.location, "A101");
        assert_eq!(event.calendar_name, "Timetable 2025-2026_Autumn");
        assert_eq!(event.week, 7);
        assert_eq!(event.start_period, 4);
    }

    #[test]
    fn test_integer_encoding_gives_same_event() {
        let lesson = make_lesson("S1", Bitmask::Integer(1 << 6), Bitmask::Integer(24), 1);
        let events = translate(&[lesson], &autumn_2025());
        assert_eq!(events, translate(&[week7_lesson()], &autumn_2025()));
    }

    #[test]
    fn test_fixture_replaces_date() {
        let plan = autumn_2025().with_fixtures(vec![Fixture::moved(7, 1, date(2025, 10, 14))]);
        let plain = translate(&[week7_lesson()], &autumn_2025());
        let moved = translate(&[week7_lesson()], &plan);

        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].start.date(), date(2025, 10, 14));
        assert_eq!(moved[0].start.time(), plain[0].start.time());
        assert_eq!(moved[0].duration, plain[0].duration);
        assert_eq!(moved[0].title, plain[0].title);
        assert_eq!(moved[0].description, plain[0].description);
        assert_eq!(moved[0].location, plain[0].location);
    }

    #[test]
    fn test_fixture_only_affects_its_slot() {
        // weeks 6, 7, 8 on Monday; fixture for week 7 Tuesday and week 7 Monday
        let lesson = make_lesson("S1", Bitmask::from("00000111"), Bitmask::from("11"), 1);
        let plan = autumn_2025().with_fixtures(vec![
            Fixture::moved(7, 2, date(2025, 12, 1)),
            Fixture::moved(7, 1, date(2025, 10, 18)),
        ]);

        let dates: Vec<NaiveDate> = translate(&[lesson], &plan)
            .iter()
            .map(|e| e.start.date())
            .collect();
        assert_eq!(
            dates,
            vec![date(2025, 10, 6), date(2025, 10, 18), date(2025, 10, 20)]
        );
    }

    #[test]
    fn test_cancelled_fixture_skips_week() {
        let lesson = make_lesson("S1", Bitmask::from("0000011"), Bitmask::from("11"), 1);
        let plan = autumn_2025().with_fixtures(vec![Fixture::cancelled(6, 1)]);

        let events = translate(&[lesson], &plan);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].week, 7);
    }

    #[test]
    fn test_all_zero_weeks_emit_nothing() {
        let lesson = make_lesson("S1", Bitmask::from("0000000"), Bitmask::from("0001100"), 1);
        assert!(translate(&[lesson], &autumn_2025()).is_empty());
    }

    #[test]
    fn test_all_zero_periods_emit_nothing() {
        let lesson = make_lesson("S1", Bitmask::from("1111"), Bitmask::Integer(0), 1);
        assert!(translate(&[lesson], &autumn_2025()).is_empty());
    }

    #[test]
    fn test_invalid_day_emits_nothing() {
        let lesson = make_lesson("S1", Bitmask::from("1"), Bitmask::from("1"), 0);
        assert!(translate(&[lesson], &autumn_2025()).is_empty());
    }

    #[test]
    fn test_periods_outside_table_emit_nothing() {
        let lesson = make_lesson("S1", Bitmask::from("1"), Bitmask::from("000000000000001"), 1);
        assert!(translate(&[lesson], &autumn_2025()).is_empty());
    }

    #[test]
    fn test_count_matches_week_bits() {
        let masks = ["1", "1010101", "1111111111111111", "0100000000000000001"];
        for mask in masks {
            let weeks = Bitmask::from(mask);
            let expected = weeks.count();
            let lesson = make_lesson("S1", weeks, Bitmask::from("11"), 3);
            assert_eq!(translate(&[lesson], &autumn_2025()).len(), expected, "mask {mask}");
        }
    }

    #[test]
    fn test_duration_matches_period_table() {
        let table = PeriodTable::default();
        for (first, last) in [(1, 1), (1, 2), (3, 5), (6, 9), (11, 14)] {
            let bits: u64 = (first..=last).fold(0, |acc, p| acc | 1u64 << (p - 1));
            let lesson = make_lesson("S1", Bitmask::Integer(1), Bitmask::Integer(bits), 2);
            let events = translate(&[lesson], &autumn_2025());
            let expected = table.end_of(last).unwrap() - table.start_of(first).unwrap();

            assert_eq!(events.len(), 1);
            assert_eq!(events[0].duration.total_minutes(), expected);
            assert!(events[0].duration.is_positive());
        }
    }

    #[test]
    fn test_non_contiguous_periods_merge_by_default() {
        let lesson = make_lesson("S1", Bitmask::from("1"), Bitmask::from("110011"), 1);
        let events = translate(&[lesson], &autumn_2025());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start.format("%H:%M").to_string(), "08:00");
        // period 6 starts 13:00, ends 13:45
        assert_eq!(events[0].end().format("%H:%M").to_string(), "13:45");
    }

    #[test]
    fn test_non_contiguous_periods_split() {
        let lesson = make_lesson("S1", Bitmask::from("11"), Bitmask::from("110011"), 1);
        let translator = Translator::new(PeriodTable::default(), BlockPolicy::Split);
        let events = translator.translate(&[lesson], &autumn_2025());

        assert_eq!(events.len(), 4);
        let spans: Vec<(String, String)> = events
            .iter()
            .map(|e| (e.start.format("%m-%d %H:%M").to_string(), e.end().format("%H:%M").to_string()))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("09-01 08:00".to_string(), "09:35".to_string()),
                ("09-01 11:30".to_string(), "13:45".to_string()),
                ("09-08 08:00".to_string(), "09:35".to_string()),
                ("09-08 11:30".to_string(), "13:45".to_string()),
            ]
        );
    }

    #[test]
    fn test_lesson_then_week_order() {
        let a = make_lesson("A", Bitmask::from("11"), Bitmask::from("1"), 3);
        let b = make_lesson("B", Bitmask::from("11"), Bitmask::from("1"), 1);
        let order: Vec<(String, u32)> = translate(&[a, b], &autumn_2025())
            .into_iter()
            .map(|e| (e.section_id, e.week))
            .collect();

        assert_eq!(
            order,
            vec![
                ("A".to_string(), 1),
                ("A".to_string(), 2),
                ("B".to_string(), 1),
                ("B".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_translation_is_repeatable() {
        let lessons = vec![
            week7_lesson(),
            make_lesson("B", Bitmask::Integer(0xffff), Bitmask::Integer(0b111), 5),
        ];
        let plan = autumn_2025().with_fixtures(vec![Fixture::moved(3, 5, date(2025, 9, 20))]);

        let first = translate(&lessons, &plan);
        let second = translate(&lessons, &plan);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_custom_period_table() {
        let table = PeriodTable::from_times(&["9:00", "10:00"], 50).unwrap();
        let translator = Translator::new(table, BlockPolicy::Merge);
        let lesson = make_lesson("S1", Bitmask::from("1"), Bitmask::from("11"), 1);
        let events = translator.translate(&[lesson], &autumn_2025());

        assert_eq!(events[0].start.format("%H:%M").to_string(), "09:00");
        assert_eq!(events[0].duration.total_minutes(), 110);
    }

    #[test]
    fn test_naive_date() {
        let begin = date(2025, 9, 1);
        assert_eq!(naive_date(begin, 1, 1), Some(begin));
        assert_eq!(naive_date(begin, 1, 7), Some(date(2025, 9, 7)));
        assert_eq!(naive_date(begin, 2, 1), Some(date(2025, 9, 8)));
        assert_eq!(naive_date(begin, 0, 1), None);
        assert_eq!(naive_date(begin, 1, 8), None);
    }
}
