//! ReCalendar CLI
//!
//! Command-line front end for generating printable planners.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use recalendar_core::{CalendarState, LayoutConfig};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        calendar,
        layout,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    info!("ReCalendar started");

    match command {
        Template => {
            let year = calendar
                .year
                .unwrap_or_else(|| i32::from(jiff::Zoned::now().year()));
            return cli::template(&renderer, year);
        }
        Schema => return cli::schema(&renderer),
        _ => {}
    }

    let mut state =
        CalendarState::load_or_default(config.as_deref()).context("Failed to load configuration")?;
    calendar
        .apply(&mut state)
        .context("Invalid calendar option")?;
    let layout = LayoutConfig::try_from(&layout).context("Invalid page layout")?;
    let cli = Cli::new(state, layout, renderer);

    match command {
        Generate { output_dir } => cli.generate(&output_dir).await,
        Preview { output } => cli.preview(&output).await,
        Weekdays => cli.weekdays(),
        Months => cli.months(),
        Template | Schema => Ok(()),
    }
}
