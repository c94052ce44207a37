//! Terminal rendering for courseplan types.
//!
//! Extension traits that add colored output to courseplan-core types using
//! owo_colors.

use std::collections::BTreeSet;

use courseplan_core::Lesson;
use courseplan_core::classtable::ClassTable;
use courseplan_core::period::{PeriodTable, format_time_of_day};
use courseplan_core::selection::Plan;
use owo_colors::OwoColorize;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Width of one day column in the class table
const CELL_WIDTH: usize = 11;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Lesson {
    fn render(&self) -> String {
        let schedule = if self.schedule_text.is_empty() {
            "(no fixed time)".to_string()
        } else {
            self.schedule_text.clone()
        };

        format!(
            "{} {} {} {} {}",
            self.title().bold(),
            format!("[{}]", self.section_id).cyan(),
            self.instructor,
            format_credits(self.credits).yellow(),
            schedule.dimmed()
        )
    }
}

pub fn format_credits(credits: f64) -> String {
    if credits.fract() == 0.0 {
        format!("{credits:.0} cr")
    } else {
        format!("{credits:.1} cr")
    }
}

/// One line per section, with its star/select state.
pub fn render_marked(lesson: &Lesson, plan: &Plan) -> String {
    let marker = if plan.is_selected(&lesson.section_id) {
        "●".green().to_string()
    } else if plan.is_starred(&lesson.section_id) {
        "★".yellow().to_string()
    } else {
        " ".to_string()
    };
    format!("{} {}", marker, lesson.render())
}

/// Keep the first row of every section.
pub fn unique_sections<'a>(rows: impl IntoIterator<Item = &'a Lesson>) -> Vec<&'a Lesson> {
    let mut seen = BTreeSet::new();
    rows.into_iter()
        .filter(|l| seen.insert(l.section_id.as_str()))
        .collect()
}

/// Grid of periods by days. Cells show the course code, a legend below
/// maps codes to titles and rooms.
pub fn render_class_table(table: &ClassTable, periods: &PeriodTable) -> String {
    let mut lines = Vec::new();
    let days = table.days();

    let mut header = format!("{:<10}", "");
    for day in &days {
        header.push_str(&format!("{:<w$}", DAY_NAMES[(*day - 1) as usize], w = CELL_WIDTH));
    }
    lines.push(header.bold().to_string());

    for period in 1..=table.periods() as u32 {
        let start = periods
            .start_of(period)
            .map(format_time_of_day)
            .unwrap_or_default();
        let mut line = format!("{:>2} {:<7}", period, start).dimmed().to_string();

        for day in &days {
            let slots = table.get(*day, period);
            let cell = match slots {
                [] => format!("{:<w$}", "·", w = CELL_WIDTH),
                [only] => pad(course_code(&only.title)),
                [first, rest @ ..] => pad(&format!("{}+{}", course_code(&first.title), rest.len())),
            };
            if slots.is_empty() {
                line.push_str(&cell.dimmed().to_string());
            } else {
                line.push_str(&cell.green().to_string());
            }
        }
        lines.push(line);
    }

    let mut legend: Vec<String> = Vec::new();
    let mut seen = BTreeSet::new();
    for day in &days {
        for period in 1..=table.periods() as u32 {
            for slot in table.get(*day, period) {
                if seen.insert(slot.section_id.clone()) {
                    let room = if slot.location.is_empty() {
                        String::new()
                    } else {
                        format!(" @ {}", slot.location)
                    };
                    legend.push(format!(
                        "  {} {}{}",
                        slot.title,
                        format!("[{}]", slot.section_id).cyan(),
                        room.dimmed()
                    ));
                }
            }
        }
    }
    if !legend.is_empty() {
        lines.push(String::new());
        lines.extend(legend);
    }

    lines.join("\n")
}

fn course_code(title: &str) -> &str {
    title.split_whitespace().next().unwrap_or(title)
}

fn pad(text: &str) -> String {
    let truncated: String = text.chars().take(CELL_WIDTH - 1).collect();
    format!("{:<w$}", truncated, w = CELL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(4.0), "4 cr");
        assert_eq!(format_credits(2.5), "2.5 cr");
    }

    #[test]
    fn test_course_code_and_pad() {
        assert_eq!(course_code("MATH1001 Calculus"), "MATH1001");
        assert_eq!(pad("ABCDEFGHIJKLMNOP").trim_end(), "ABCDEFGHIJ");
        assert_eq!(pad("X").len(), CELL_WIDTH);
    }

    #[test]
    fn test_class_table_lists_sections_in_legend() {
        let lessons = courseplan_core::lesson::parse_lessons(
            r#"[{"kch": "MATH1001", "kcmc": "Calculus", "jxbmc": "S1",
                 "zcd": 1, "cdjc": 24, "xqj": 1, "jxdd": "A101"}]"#,
        )
        .unwrap();
        let periods = PeriodTable::default();
        let table = ClassTable::build(&lessons, None, &periods);

        let out = render_class_table(&table, &periods);
        assert!(out.contains("MATH1001"));
        assert!(out.contains("A101"));
        assert!(out.contains("Fri"));
        assert!(!out.contains("Sat"));
    }

    #[test]
    fn test_shared_cell_lists_extra_sections() {
        let lessons = courseplan_core::lesson::parse_lessons(
            r#"[{"kch": "MATH1001", "kcmc": "Calculus", "jxbmc": "S1", "zcd": 1, "cdjc": 1, "xqj": 2},
                {"kch": "CS1001", "kcmc": "Programming", "jxbmc": "S2", "zcd": 1, "cdjc": 1, "xqj": 2}]"#,
        )
        .unwrap();
        let periods = PeriodTable::default();
        let table = ClassTable::build(&lessons, None, &periods);

        let out = render_class_table(&table, &periods);
        assert!(out.contains("MATH1001+1"));
        assert!(out.contains("CS1001 Programming"));
    }
}
