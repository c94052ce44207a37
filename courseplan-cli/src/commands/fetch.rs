use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::context::Context;
use crate::utils::tui::create_spinner;

pub async fn run(ctx: &Context, semester: Option<&str>, url: Option<String>, all: bool) -> Result<()> {
    let Some(base_url) = url.or_else(|| ctx.config.remote_url.clone()) else {
        anyhow::bail!(
            "No remote URL. Pass --url or set remote_url in {}",
            courseplan_core::config::CoursePlanConfig::config_path()?.display()
        );
    };
    let client = Client::new(&base_url)?;

    let spinner = create_spinner("Semester index".to_string());
    let result = match client.fetch_index().await {
        Ok(json) => ctx.data.write_index(&json).map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();
    let index = result?;
    println!("{} Semester index ({} semesters)", "✓".green(), index.entries().len());

    let ids: Vec<String> = if all {
        index.entries().iter().map(|e| e.id()).collect()
    } else {
        vec![index.resolve(ctx.requested_semester(semester))?.id()]
    };

    let mut failed = 0;
    for id in &ids {
        let spinner = create_spinner(id.clone());
        let result = match client.fetch_lessons(id).await {
            Ok(json) => ctx.data.write_lessons(id, &json).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        spinner.finish_and_clear();

        match result {
            Ok(count) => println!("{} {} ({} lessons)", "✓".green(), id, count),
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), id, e.to_string().red());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} semesters failed to download", failed, ids.len());
    }

    Ok(())
}
