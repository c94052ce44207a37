use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, Utc};
use courseplan_core::ics::{IcsOptions, export_or_empty};
use courseplan_core::semester::SemesterEntry;
use courseplan_core::{BlockPolicy, CalendarEvent, Lesson, SemesterPlan, Translator};
use owo_colors::OwoColorize;
use tracing::info;

use crate::context::Context;

pub struct ExportArgs {
    pub output: Option<PathBuf>,
    pub begin: Option<String>,
    pub split_blocks: bool,
    pub starred: bool,
}

pub fn run(ctx: &Context, semester: Option<&str>, args: ExportArgs) -> Result<()> {
    let entry = ctx.semester(semester)?;
    let events = build_events(ctx, &entry, &args)?;

    if events.is_empty() {
        eprintln!("{}", "No lessons to export. Use `courseplan select` first".dimmed());
    }

    let options = IcsOptions {
        timezone: ctx.config.timezone()?,
        stamp: Utc::now(),
    };
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.ics", entry.id())));

    let written = write_calendar(&events, &options, &output)?;
    if let Some(count) = written {
        if output.as_path() != Path::new("-") {
            println!("{} {} events to {}", "✓".green(), count, output.display());
        }
    }

    Ok(())
}

/// Events of the selected (or starred) sections of `entry`.
pub fn build_events(ctx: &Context, entry: &SemesterEntry, args: &ExportArgs) -> Result<Vec<CalendarEvent>> {
    let lessons = ctx.lessons(entry)?;
    let plan = ctx.plan(entry)?;

    let begin = match &args.begin {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --begin '{raw}'. Expected YYYY-MM-DD"))?,
        None => entry
            .first_day()
            .context("Pass --begin with the Monday of week 1")?,
    };

    let policy = if args.split_blocks {
        BlockPolicy::Split
    } else {
        BlockPolicy::Merge
    };
    let translator = Translator::new(ctx.config.period_table()?, policy);
    let semester_plan = SemesterPlan::new(entry.id(), begin).with_fixtures(ctx.config.fixtures_for(&entry.id()));

    let rows: Vec<_> = if args.starred {
        plan.starred_lessons(&lessons)
    } else {
        plan.selected_lessons(&lessons)
    }
    .into_iter()
    .cloned()
    .collect();

    let events = translator.translate(&rows, &semester_plan);
    info!(
        semester = %entry.id(),
        sections = section_count(&rows),
        events = events.len(),
        "translated timetable"
    );
    Ok(events)
}

fn section_count(rows: &[Lesson]) -> usize {
    rows.iter().map(|l| l.section_id.as_str()).collect::<BTreeSet<_>>().len()
}

/// Write the calendar of `events` to `output`. Returns the number of events
/// written, or None when generation failed and an empty file was written.
fn write_calendar(events: &[CalendarEvent], options: &IcsOptions, output: &Path) -> Result<Option<usize>> {
    let mut failed = false;
    let ics = export_or_empty(events, options, |e| {
        failed = true;
        eprintln!("{} {}", "Calendar export failed:".red(), e.to_string().red());
    });
    write_output(output, &ics)?;

    Ok((!failed).then_some(events.len()))
}

fn write_output(path: &Path, ics: &str) -> Result<()> {
    if path == Path::new("-") {
        print!("{ics}");
        return Ok(());
    }
    std::fs::write(path, ics).with_context(|| format!("Failed to write {}", path.display()))
}
