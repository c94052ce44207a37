use anyhow::Result;
use courseplan_core::classtable::ClassTable;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::render_class_table;

pub fn run(ctx: &Context, semester: Option<&str>, week: Option<u32>) -> Result<()> {
    let entry = ctx.semester(semester)?;
    let lessons = ctx.lessons(&entry)?;
    let plan = ctx.plan(&entry)?;
    let periods = ctx.config.period_table()?;

    let table = ClassTable::build(plan.selected_lessons(&lessons), week, &periods);

    match week {
        Some(week) => println!("{} {}", entry.label().bold(), format!("week {week}").dimmed()),
        None => println!("{}", entry.label().bold()),
    }

    if table.is_empty() {
        println!("{}", "No selected lessons. Use `courseplan select`".dimmed());
        return Ok(());
    }

    println!("{}", render_class_table(&table, &periods));

    Ok(())
}
