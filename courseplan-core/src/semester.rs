//! Semester index published next to the lesson data.
//!
//! `lessonData_index.json` lists every semester with lesson data, oldest
//! first, together with the date its first teaching week starts.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoursePlanError, CoursePlanResult};

pub const INDEX_FILE: &str = "lessonData_index.json";
pub const LESSON_DIR: &str = "LessonData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Autumn,
    Spring,
    Summer,
    Winter,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Autumn => "Autumn",
            Term::Spring => "Spring",
            Term::Summer => "Summer",
            Term::Winter => "Winter",
        }
    }

    /// Short Chinese label used by the registrar (秋/春/夏/冬).
    pub fn label_zh(&self) -> &'static str {
        match self {
            Term::Autumn => "秋",
            Term::Spring => "春",
            Term::Summer => "夏",
            Term::Winter => "冬",
        }
    }
}

impl FromStr for Term {
    type Err = CoursePlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "autumn" | "fall" => Ok(Term::Autumn),
            "spring" => Ok(Term::Spring),
            "summer" => Ok(Term::Summer),
            "winter" => Ok(Term::Winter),
            _ => Err(CoursePlanError::SemesterNotFound(format!("unknown term '{s}'"))),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the semester index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterEntry {
    /// Academic year, e.g. `2025-2026`
    pub year: String,
    /// Term name, e.g. `Autumn`
    pub semester: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub updated_time: String,
    /// Monday of the first teaching week, `YYYY-MM-DD`
    #[serde(default)]
    pub first_day: Option<String>,
}

impl SemesterEntry {
    /// Semester id, e.g. `2025-2026_Autumn`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.year, self.semester)
    }

    pub fn term(&self) -> Option<Term> {
        self.semester.parse().ok()
    }

    pub fn first_day(&self) -> CoursePlanResult<NaiveDate> {
        let raw = self.first_day.as_deref().ok_or_else(|| {
            CoursePlanError::SemesterNotFound(format!("{} has no first_day", self.id()))
        })?;
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            CoursePlanError::LessonData(format!(
                "Invalid first_day '{}' for {}. Expected YYYY-MM-DD",
                raw,
                self.id()
            ))
        })
    }

    /// Path of the parsed lesson file, relative to the data root.
    pub fn lesson_file(&self) -> String {
        lesson_file(&self.id())
    }

    /// e.g. `2025-2026 学年, 秋 学期 (更新于 2025-08-20)`
    pub fn label(&self) -> String {
        let term = self
            .term()
            .map(|t| t.label_zh().to_string())
            .unwrap_or_else(|| self.semester.clone());
        if self.updated_at.is_empty() {
            format!("{} 学年, {} 学期", self.year, term)
        } else {
            format!("{} 学年, {} 学期 (更新于 {})", self.year, term, self.updated_at)
        }
    }
}

/// Lesson file of a semester id, relative to the data root.
pub fn lesson_file(semester_id: &str) -> String {
    format!("{LESSON_DIR}/Parsed_{semester_id}.json")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemesterIndex {
    entries: Vec<SemesterEntry>,
}

impl SemesterIndex {
    pub fn new(entries: Vec<SemesterEntry>) -> Self {
        SemesterIndex { entries }
    }

    pub fn parse(json: &str) -> CoursePlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn entries(&self) -> &[SemesterEntry] {
        &self.entries
    }

    /// The most recently added semester, shown by default.
    pub fn latest(&self) -> Option<&SemesterEntry> {
        self.entries.last()
    }

    pub fn get(&self, id: &str) -> Option<&SemesterEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Look up `id`, or the latest semester when `id` is None.
    pub fn resolve(&self, id: Option<&str>) -> CoursePlanResult<&SemesterEntry> {
        match id {
            Some(id) => self.get(id).ok_or_else(|| {
                let available: Vec<String> = self.entries.iter().map(SemesterEntry::id).collect();
                CoursePlanError::SemesterNotFound(format!(
                    "'{}'. Available: {}",
                    id,
                    available.join(", ")
                ))
            }),
            None => self
                .latest()
                .ok_or_else(|| CoursePlanError::SemesterNotFound("index is empty".into())),
        }
    }
}
