mod client;
mod commands;
mod context;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::commands::browse::BrowseArgs;
use crate::context::Context;

#[derive(Parser)]
#[command(name = "courseplan")]
#[command(about = "Browse course offerings, plan your timetable and export it to your calendar")]
struct Cli {
    /// Semester id, e.g. 2025-2026_Autumn (defaults to the configured or latest one)
    #[arg(short, long, global = true)]
    semester: Option<String>,

    /// More log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List semesters with lesson data
    Semesters,
    /// Download the semester index and lesson data
    Fetch {
        /// Base URL of the lesson data (overrides remote_url in the config)
        #[arg(long)]
        url: Option<String>,

        /// Download every semester in the index
        #[arg(long)]
        all: bool,
    },
    /// Search the lessons of a semester
    Browse(BrowseArgs),
    /// Add sections to the shortlist
    Star {
        #[arg(required = true)]
        sections: Vec<String>,
    },
    /// Remove sections from the shortlist (and the selection)
    Unstar {
        sections: Vec<String>,

        /// Remove every starred section
        #[arg(long, conflicts_with = "sections")]
        all: bool,
    },
    /// Select sections for the class table and export
    Select {
        sections: Vec<String>,

        /// Select every starred section
        #[arg(long, conflicts_with = "sections")]
        all: bool,
    },
    /// Deselect sections
    Deselect {
        sections: Vec<String>,

        /// Clear the selection
        #[arg(long, conflicts_with = "sections")]
        all: bool,
    },
    /// Show starred and selected sections with credit totals
    Plan,
    /// Show the weekly class table of the selected sections
    Classtable {
        /// Only lessons held in this teaching week
        #[arg(short, long)]
        week: Option<u32>,
    },
    /// Export the selected sections as an .ics file
    Export {
        /// Output file, "-" for stdout (default: <semester>.ics)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Monday of week 1 (YYYY-MM-DD), overrides the semester index
        #[arg(long)]
        begin: Option<String>,

        /// One event per run of consecutive periods instead of one per row
        #[arg(long)]
        split_blocks: bool,

        /// Export every starred section, not only the selected ones
        #[arg(long)]
        starred: bool,
    },
    /// Show configuration and data paths
    Config {
        /// Print the effective configuration as TOML
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::load()?;
    let semester = cli.semester.as_deref();

    match cli.command {
        Commands::Semesters => commands::semesters::run(&ctx),
        Commands::Fetch { url, all } => commands::fetch::run(&ctx, semester, url, all).await,
        Commands::Browse(args) => commands::browse::run(&ctx, semester, &args.into_filter()),
        Commands::Star { sections } => commands::plan::star(&ctx, semester, &sections),
        Commands::Unstar { sections, all } => commands::plan::unstar(&ctx, semester, &sections, all),
        Commands::Select { sections, all } => commands::plan::select(&ctx, semester, &sections, all),
        Commands::Deselect { sections, all } => {
            commands::plan::deselect(&ctx, semester, &sections, all)
        }
        Commands::Plan => commands::plan::show(&ctx, semester),
        Commands::Classtable { week } => commands::classtable::run(&ctx, semester, week),
        Commands::Export {
            output,
            begin,
            split_blocks,
            starred,
        } => commands::export::run(
            &ctx,
            semester,
            commands::export::ExportArgs {
                output,
                begin,
                split_blocks,
                starred,
            },
        ),
        Commands::Config { show } => commands::config::run(&ctx, show),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
