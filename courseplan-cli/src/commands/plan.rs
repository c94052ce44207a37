use anyhow::Result;
use courseplan_core::Lesson;
use courseplan_core::selection::Plan;
use courseplan_core::semester::SemesterEntry;
use owo_colors::OwoColorize;
use tracing::warn;

use crate::context::Context;
use crate::render::{Render, format_credits, unique_sections};

pub fn star(ctx: &Context, semester: Option<&str>, sections: &[String]) -> Result<()> {
    let (entry, lessons) = load(ctx, semester)?;
    let known = known_sections(&lessons, sections);
    let plan = ctx.plans.update(&entry.id(), |plan| {
        known.iter().fold(plan.clone(), |plan, id| plan.star(id))
    })?;
    print_summary(&plan, &lessons);
    Ok(())
}

pub fn unstar(ctx: &Context, semester: Option<&str>, sections: &[String], all: bool) -> Result<()> {
    let (entry, lessons) = load(ctx, semester)?;
    let plan = ctx.plans.update(&entry.id(), |plan| {
        if all {
            plan.unstar_all(plan.starred.iter().map(String::as_str))
        } else {
            plan.unstar_all(sections.iter().map(String::as_str))
        }
    })?;
    print_summary(&plan, &lessons);
    Ok(())
}

pub fn select(ctx: &Context, semester: Option<&str>, sections: &[String], all: bool) -> Result<()> {
    let (entry, lessons) = load(ctx, semester)?;
    let known = known_sections(&lessons, sections);
    let plan = ctx.plans.update(&entry.id(), |plan| {
        if all {
            plan.select_all_starred()
        } else {
            known.iter().fold(plan.clone(), |plan, id| plan.select(id))
        }
    })?;
    print_summary(&plan, &lessons);
    Ok(())
}

pub fn deselect(ctx: &Context, semester: Option<&str>, sections: &[String], all: bool) -> Result<()> {
    let (entry, lessons) = load(ctx, semester)?;
    let plan = ctx.plans.update(&entry.id(), |plan| {
        if all {
            plan.clear_selection()
        } else {
            sections.iter().fold(plan.clone(), |plan, id| plan.deselect(id))
        }
    })?;
    print_summary(&plan, &lessons);
    Ok(())
}

pub fn show(ctx: &Context, semester: Option<&str>) -> Result<()> {
    let (entry, lessons) = load(ctx, semester)?;
    let plan = ctx.plan(&entry)?;

    println!("{}", entry.label().bold());
    if plan.starred.is_empty() {
        println!("{}", "Nothing starred yet. Use `courseplan star <section>`".dimmed());
        return Ok(());
    }

    for lesson in unique_sections(plan.starred_lessons(&lessons)) {
        let check = if plan.is_selected(&lesson.section_id) {
            "[x]".green().to_string()
        } else {
            "[ ]".dimmed().to_string()
        };
        println!("{} {}", check, lesson.render());
    }

    let missing: Vec<&String> = plan
        .starred
        .iter()
        .filter(|id| !lessons.iter().any(|l| &l.section_id == *id))
        .collect();
    for id in missing {
        println!("{} {}", "[?]".yellow(), format!("{id} (not in lesson data)").dimmed());
    }

    println!();
    print_summary(&plan, &lessons);
    Ok(())
}

fn load(ctx: &Context, semester: Option<&str>) -> Result<(SemesterEntry, Vec<Lesson>)> {
    let entry = ctx.semester(semester)?;
    let lessons = ctx.lessons(&entry)?;
    Ok((entry, lessons))
}

/// Section ids present in the lesson data. Unknown ones are reported and
/// dropped.
fn known_sections(lessons: &[Lesson], sections: &[String]) -> Vec<String> {
    sections
        .iter()
        .filter(|id| {
            let found = lessons.iter().any(|l| &l.section_id == *id);
            if !found {
                warn!(section = %id, "unknown section");
                println!("{} {}", "Unknown section".yellow(), id);
            }
            found
        })
        .cloned()
        .collect()
}

fn print_summary(plan: &Plan, lessons: &[Lesson]) {
    let (selected, starred) = plan.credits(lessons);
    println!(
        "{} selected ({}), {} starred ({})",
        plan.selected.len(),
        format_credits(selected).yellow(),
        plan.starred.len(),
        format_credits(starred).yellow()
    );
}
