use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let index = ctx.data.index()?;
    let current = index
        .resolve(ctx.requested_semester(None))
        .ok()
        .map(|entry| entry.id());

    if index.entries().is_empty() {
        println!("{}", "No semesters in the index".dimmed());
        return Ok(());
    }

    for entry in index.entries().iter().rev() {
        let id = entry.id();
        let marker = if current.as_deref() == Some(id.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let local = if ctx.data.lessons_path(&id).exists() {
            String::new()
        } else {
            format!(" {}", "(not downloaded)".dimmed())
        };

        println!("{} {}  {}{}", marker, id.bold(), entry.label().dimmed(), local);
    }

    Ok(())
}
