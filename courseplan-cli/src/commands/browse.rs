use anyhow::Result;
use clap::Args;
use courseplan_core::filter::LessonFilter;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{render_marked, unique_sections};

#[derive(Args)]
pub struct BrowseArgs {
    /// Matches course code, name, instructor or section id
    keyword: Option<String>,

    /// Instructor or lead teacher
    #[arg(long)]
    lecturer: Option<String>,

    /// Room
    #[arg(long)]
    place: Option<String>,

    /// Schedule text, e.g. 星期三
    #[arg(long)]
    schedule: Option<String>,

    /// Class composition
    #[arg(long)]
    composition: Option<String>,

    /// Enrollment remark
    #[arg(long)]
    notes: Option<String>,

    /// Grade, repeatable
    #[arg(long)]
    grade: Vec<String>,

    /// Offering college, repeatable
    #[arg(long)]
    college: Vec<String>,

    /// Course nature (必修, 选修, ...), repeatable
    #[arg(long)]
    nature: Vec<String>,

    /// General education category, repeatable
    #[arg(long)]
    general: Vec<String>,

    /// Day of week, 1 = Monday .. 7 = Sunday
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=7))]
    day: Option<u32>,

    /// Only starred lessons
    #[arg(long)]
    starred: bool,
}

impl BrowseArgs {
    pub fn into_filter(self) -> LessonFilter {
        LessonFilter {
            keyword: self.keyword,
            lecturer: self.lecturer,
            place: self.place,
            schedule: self.schedule,
            composition: self.composition,
            notes: self.notes,
            grades: self.grade.into_iter().collect(),
            colleges: self.college.into_iter().collect(),
            natures: self.nature.into_iter().collect(),
            general_types: self.general.into_iter().collect(),
            day: self.day,
            starred_only: self.starred,
        }
    }
}

pub fn run(ctx: &Context, semester: Option<&str>, filter: &LessonFilter) -> Result<()> {
    let entry = ctx.semester(semester)?;
    let lessons = ctx.lessons(&entry)?;
    let plan = ctx.plan(&entry)?;

    let mut found = unique_sections(filter.apply(&lessons, &plan));
    found.sort_by(|a, b| a.code.cmp(&b.code).then(a.section_id.cmp(&b.section_id)));

    println!("{}", entry.label().bold());
    if found.is_empty() {
        println!("{}", "No matching lessons".dimmed());
        return Ok(());
    }

    for lesson in &found {
        println!("{}", render_marked(lesson, &plan));
    }
    println!();
    println!("{}", format!("{} sections", found.len()).dimmed());

    Ok(())
}
