//! Lesson filters for browsing.

use std::collections::BTreeSet;

use crate::lesson::Lesson;
use crate::selection::Plan;

/// Criteria for narrowing down the lesson list. Unset fields match anything.
///
/// Text criteria are case-insensitive substrings. A set criterion matches
/// when the lesson matches any one of its values.
#[derive(Debug, Clone, Default)]
pub struct LessonFilter {
    /// Code, name, instructor or section id
    pub keyword: Option<String>,
    /// Instructors or lead teacher
    pub lecturer: Option<String>,
    /// Room
    pub place: Option<String>,
    /// Schedule text, e.g. `星期三`
    pub schedule: Option<String>,
    /// Class composition
    pub composition: Option<String>,
    /// Enrollment remark
    pub notes: Option<String>,
    /// Grades, matched exactly against the comma separated grade list
    pub grades: BTreeSet<String>,
    pub colleges: BTreeSet<String>,
    /// Course nature, e.g. `必修`
    pub natures: BTreeSet<String>,
    /// General education categories
    pub general_types: BTreeSet<String>,
    /// 1 = Monday .. 7 = Sunday
    pub day: Option<u32>,
    pub starred_only: bool,
}

impl LessonFilter {
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.lecturer.is_none()
            && self.place.is_none()
            && self.schedule.is_none()
            && self.composition.is_none()
            && self.notes.is_none()
            && self.grades.is_empty()
            && self.colleges.is_empty()
            && self.natures.is_empty()
            && self.general_types.is_empty()
            && self.day.is_none()
            && !self.starred_only
    }

    pub fn matches(&self, lesson: &Lesson, plan: &Plan) -> bool {
        if self.starred_only && !plan.is_starred(&lesson.section_id) {
            return false;
        }

        if let Some(day) = self.day {
            if lesson.day != day {
                return false;
            }
        }

        if let Some(keyword) = &self.keyword {
            let hit = [
                &lesson.code,
                &lesson.name,
                &lesson.instructor,
                &lesson.section_id,
            ]
            .iter()
            .any(|field| contains_ci(field, keyword));
            if !hit {
                return false;
            }
        }

        if let Some(lecturer) = &self.lecturer {
            let hit = contains_ci(&lesson.instructor, lecturer)
                || lesson
                    .lead_teacher
                    .as_deref()
                    .is_some_and(|t| contains_ci(t, lecturer));
            if !hit {
                return false;
            }
        }

        text_matches(Some(&lesson.location), &self.place)
            && text_matches(Some(&lesson.schedule_text), &self.schedule)
            && text_matches(lesson.composition.as_deref(), &self.composition)
            && text_matches(lesson.remark.as_deref(), &self.notes)
            && any_of(lesson.grades.as_deref(), &self.grades, |grades, grade| {
                grades.split(',').any(|g| g.trim() == grade)
            })
            && any_of(lesson.college.as_deref(), &self.colleges, contains_ci)
            && any_of(lesson.nature.as_deref(), &self.natures, contains_ci)
            && any_of(lesson.general_type.as_deref(), &self.general_types, contains_ci)
    }

    /// Matching lessons, in input order.
    pub fn apply<'a>(&self, lessons: &'a [Lesson], plan: &Plan) -> Vec<&'a Lesson> {
        lessons.iter().filter(|l| self.matches(l, plan)).collect()
    }
}

fn contains_ci(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(&needle.to_lowercase())
}

fn text_matches(field: Option<&str>, needle: &Option<String>) -> bool {
    match needle {
        None => true,
        Some(needle) => field.is_some_and(|f| contains_ci(f, needle)),
    }
}

fn any_of<F>(field: Option<&str>, wanted: &BTreeSet<String>, hit: F) -> bool
where
    F: Fn(&str, &str) -> bool,
{
    if wanted.is_empty() {
        return true;
    }
    field.is_some_and(|f| wanted.iter().any(|w| hit(f, w.as_str())))
}
