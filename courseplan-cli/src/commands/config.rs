use anyhow::Result;
use courseplan_core::config::CoursePlanConfig;
use owo_colors::OwoColorize;

use crate::context::Context;

pub fn run(ctx: &Context, show: bool) -> Result<()> {
    if show {
        print!("{}", ctx.config.to_toml()?);
        return Ok(());
    }

    let config_path = CoursePlanConfig::config_path()?;
    let config = &ctx.config;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", ctx.data.root().display());
    println!("  Index:      {}", ctx.data.index_path().display());
    println!("  Plans:      {}", ctx.plans.path().display());

    println!();
    println!("{}", "Settings".bold());
    println!(
        "  Remote:     {}",
        config.remote_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  Semester:   {}",
        config.default_semester.as_deref().unwrap_or("(latest)")
    );
    match config.timezone()? {
        Some(tz) => println!("  Time zone:  {}", tz.name()),
        None => println!("  Time zone:  floating"),
    }

    let periods = config.period_table()?;
    println!(
        "  Periods:    {} ({} min padding)",
        periods.len(),
        periods.padding()
    );
    if !config.fixtures.is_empty() {
        println!("  Fixtures:   {}", config.fixtures.len());
    }

    Ok(())
}
