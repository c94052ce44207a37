//! Lesson rows as published by the course data pipeline.
//!
//! One row is one weekly time block of a course section; a section that
//! meets twice a week appears as two rows sharing the same `section_id`.
//! Field names on the wire follow the pipeline's JSON (`kch`, `kcmc`, ...).

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::bitmask::Bitmask;
use crate::schedule_text::{ScheduleBlock, parse_blocks};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Course code
    #[serde(rename = "kch")]
    pub code: String,
    /// Course name
    #[serde(rename = "kcmc")]
    pub name: String,
    /// Section identifier, the key used for starring and selecting
    #[serde(rename = "jxbmc")]
    pub section_id: String,
    /// Instructors, comma separated
    #[serde(rename = "jszc", default)]
    pub instructor: String,
    #[serde(rename = "xf", default, deserialize_with = "lenient_f64")]
    pub credits: f64,
    /// Active weeks
    #[serde(rename = "zcd", default)]
    pub weeks: Bitmask,
    /// Active periods of the day
    #[serde(rename = "cdjc", default)]
    pub periods: Bitmask,
    /// 1 = Monday .. 7 = Sunday, 0 when the section has no fixed time
    #[serde(rename = "xqj", default, deserialize_with = "lenient_u32")]
    pub day: u32,
    /// Rooms, `;` separated in the same order as the schedule blocks
    #[serde(rename = "jxdd", default)]
    pub location: String,
    /// Human readable schedule, e.g. `星期一第1-2节{1-16周}`
    #[serde(rename = "sksj", default)]
    pub schedule_text: String,

    #[serde(rename = "kkxy", default, skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(rename = "nj", default, skip_serializing_if = "Option::is_none")]
    pub grades: Option<String>,
    /// General education category
    #[serde(rename = "kzmc", default, skip_serializing_if = "Option::is_none")]
    pub general_type: Option<String>,
    #[serde(rename = "kcxzmc", default, skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,
    #[serde(rename = "zjs", default, skip_serializing_if = "Option::is_none")]
    pub lead_teacher: Option<String>,
    #[serde(rename = "jsxx", default, skip_serializing_if = "Option::is_none")]
    pub teacher_info: Option<String>,
    #[serde(rename = "qsjsz", default, skip_serializing_if = "Option::is_none")]
    pub week_text: Option<String>,
    #[serde(rename = "skjc", default, skip_serializing_if = "Option::is_none")]
    pub period_text: Option<String>,
    #[serde(rename = "jxbzc", default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    #[serde(rename = "xkbz", default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(rename = "xn", default, skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(
        rename = "xq",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub term: Option<String>,
    #[serde(
        rename = "row_id",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub row_id: Option<String>,
}

impl Lesson {
    /// Calendar title, `"{code} {name}"`.
    pub fn title(&self) -> String {
        format!("{} {}", self.code, self.name)
    }

    /// True when the row has at least one week and one period.
    pub fn is_scheduled(&self) -> bool {
        !self.weeks.is_empty() && !self.periods.is_empty() && (1..=7).contains(&self.day)
    }

    /// Fill an empty week or period mask from the row's block of
    /// `schedule_text`. A row without a day takes the day of the only block.
    pub fn fill_masks_from_schedule(&mut self) {
        if !self.weeks.is_empty() && !self.periods.is_empty() {
            return;
        }
        let Some(block) = self.own_block() else {
            return;
        };

        if self.weeks.is_empty() {
            self.weeks = Bitmask::Integer(block.week_mask());
        }
        if self.periods.is_empty() {
            self.periods = Bitmask::Integer(block.period_mask());
        }
        if !(1..=7).contains(&self.day) {
            self.day = block.day;
        }
        debug!(section = %self.section_id, "masks taken from schedule text");
    }

    fn own_block(&self) -> Option<ScheduleBlock> {
        let blocks: Vec<ScheduleBlock> = parse_blocks(&self.schedule_text)
            .into_iter()
            .flatten()
            .collect();

        if (1..=7).contains(&self.day) {
            blocks.into_iter().find(|b| b.day == self.day)
        } else if blocks.len() == 1 {
            blocks.into_iter().next()
        } else {
            None
        }
    }
}

/// Parse a JSON array of lesson rows, filling missing masks from the
/// schedule text.
pub fn parse_lessons(json: &str) -> serde_json::Result<Vec<Lesson>> {
    let mut lessons: Vec<Lesson> = serde_json::from_str(json)?;
    for lesson in &mut lessons {
        lesson.fill_masks_from_schedule();
    }
    Ok(lessons)
}

/// Credits summed once per section.
pub fn total_credits<'a, I>(lessons: I) -> f64
where
    I: IntoIterator<Item = &'a Lesson>,
{
    let mut seen = std::collections::HashSet::new();
    lessons
        .into_iter()
        .filter(|l| seen.insert(l.section_id.as_str()))
        .map(|l| l.credits)
        .sum()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(n) => u32::try_from(n).unwrap_or(0),
        NumberOrString::Float(f) if f >= 0.0 => f as u32,
        NumberOrString::Float(_) => 0,
        NumberOrString::Str(s) => s.trim().parse().unwrap_or(0),
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(n) => n as f64,
        NumberOrString::Float(f) => f,
        NumberOrString::Str(s) => s.trim().parse().unwrap_or(0.0),
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => None,
            Some(NumberOrString::Int(n)) => Some(n.to_string()),
            Some(NumberOrString::Float(f)) => Some(f.to_string()),
            Some(NumberOrString::Str(s)) => Some(s),
        },
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A lesson with no optional metadata, for tests across the crate.
    pub(crate) fn make_lesson(section_id: &str, weeks: Bitmask, periods: Bitmask, day: u32) -> Lesson {
        Lesson {
            code: "MATH1001".to_string(),
            name: "Calculus".to_string(),
            section_id: section_id.to_string(),
            instructor: "Zhang San".to_string(),
            credits: 4.0,
            weeks,
            periods,
            day,
            location: "A101".to_string(),
            schedule_text: "星期一第4-5节{7周}".to_string(),
            college: None,
            grades: None,
            general_type: None,
            nature: None,
            lead_teacher: None,
            teacher_info: None,
            week_text: None,
            period_text: None,
            composition: None,
            remark: None,
            academic_year: None,
            term: None,
            row_id: None,
        }
    }

    #[test]
    fn test_parse_pipeline_row() {
        let json = r#"[{
            "qsjsz": "1-16周",
            "zjs": "张三",
            "jszc": "张三,李四",
            "kkbm_id": "12",
            "xqj": 1,
            "kch": "MATH1001",
            "kkxy": "数学科学学院",
            "zcd": 65535,
            "sksj": "星期一第1-2节{1-16周}",
            "kcmc": "数学分析",
            "skjc": "1-2节",
            "jxbmc": "(2025-2026-1)-MATH1001-01",
            "xf": 4.0,
            "rwzxs": 64,
            "jxbzc": "2025级数学",
            "kcxzmc": "必修",
            "xkbz": "",
            "cdjc": 3,
            "xn": "2025-2026",
            "jsxx": "张三,李四",
            "xq": 1,
            "nj": "2025",
            "row_id": "3_0",
            "kzmc": "",
            "jxdd": "理科楼A101"
        }]"#;

        let lessons = parse_lessons(json).unwrap();
        assert_eq!(lessons.len(), 1);
        let lesson = &lessons[0];
        assert_eq!(lesson.code, "MATH1001");
        assert_eq!(lesson.section_id, "(2025-2026-1)-MATH1001-01");
        assert_eq!(lesson.day, 1);
        assert_eq!(lesson.weeks.count(), 16);
        assert_eq!(lesson.periods.positions(), vec![1, 2]);
        assert_eq!(lesson.credits, 4.0);
        assert_eq!(lesson.term.as_deref(), Some("1"));
        assert_eq!(lesson.row_id.as_deref(), Some("3_0"));
        assert_eq!(lesson.college.as_deref(), Some("数学科学学院"));
        assert!(lesson.is_scheduled());
    }

    #[test]
    fn test_parse_unscheduled_row() {
        // rows without time information carry xqj as the string "0"
        let json = r#"[{"kch": "PE0001", "kcmc": "体育", "jxbmc": "PE-01",
            "xqj": "0", "zcd": 0, "cdjc": 0, "xf": "1.5", "row_id": 7}]"#;

        let lesson = &parse_lessons(json).unwrap()[0];
        assert_eq!(lesson.day, 0);
        assert_eq!(lesson.credits, 1.5);
        assert_eq!(lesson.row_id.as_deref(), Some("7"));
        assert!(!lesson.is_scheduled());
    }

    #[test]
    fn test_missing_masks_come_from_schedule_text() {
        let json = r#"[{"kch": "PHYS1001", "kcmc": "Physics", "jxbmc": "P-01",
            "xqj": 3, "zcd": 0, "cdjc": 0,
            "sksj": "星期一第1-2节{1-16周};星期三第6-7节{1-15(单)周}",
            "jxdd": "A101;B202"}]"#;

        let lesson = &parse_lessons(json).unwrap()[0];
        assert_eq!(lesson.periods.positions(), vec![6, 7]);
        assert_eq!(lesson.weeks.positions(), vec![1, 3, 5, 7, 9, 11, 13, 15]);
        assert_eq!(lesson.day, 3);
        assert!(lesson.is_scheduled());
    }

    #[test]
    fn test_existing_masks_are_kept() {
        let mut lesson = make_lesson("A", Bitmask::Integer(1), Bitmask::Integer(0b11), 1);
        lesson.fill_masks_from_schedule();
        assert_eq!(lesson.weeks.positions(), vec![1]);
        assert_eq!(lesson.periods.positions(), vec![1, 2]);
    }

    #[test]
    fn test_dayless_row_takes_the_only_block() {
        let mut lesson = make_lesson("A", Bitmask::default(), Bitmask::default(), 0);
        lesson.fill_masks_from_schedule();
        assert_eq!(lesson.day, 1);
        assert_eq!(lesson.weeks.positions(), vec![7]);
        assert_eq!(lesson.periods.positions(), vec![4, 5]);

        let mut two_blocks = make_lesson("B", Bitmask::default(), Bitmask::default(), 0);
        two_blocks.schedule_text = "星期一第1节{1周};星期二第1节{1周}".to_string();
        two_blocks.fill_masks_from_schedule();
        assert!(two_blocks.weeks.is_empty());
        assert_eq!(two_blocks.day, 0);
    }

    #[test]
    fn test_total_credits_counts_each_section_once() {
        let a1 = make_lesson("A", Bitmask::Integer(1), Bitmask::Integer(1), 1);
        let a2 = make_lesson("A", Bitmask::Integer(1), Bitmask::Integer(2), 3);
        let mut b = make_lesson("B", Bitmask::Integer(1), Bitmask::Integer(1), 2);
        b.credits = 2.5;

        assert_eq!(total_credits([&a1, &a2, &b]), 6.5);
        assert_eq!(total_credits(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_title() {
        let lesson = make_lesson("A", Bitmask::default(), Bitmask::default(), 1);
        assert_eq!(lesson.title(), "MATH1001 Calculus");
    }
}
