//! Command handlers.
//!
//! Each handler drives a [`GenerationSession`] or reads the calendar state
//! and prints a markdown summary through the [`TerminalRenderer`].

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use recalendar_core::{
    calendar::weekday_order, CalendarState, ConfigurationDocument, DirectorySaveTarget,
    GenerationOutcome, GenerationSession, GenerationSummary, LayoutConfig, LayoutEngine,
    MonthList, WeekdayTable, WorkerBuilder,
};

use crate::renderer::TerminalRenderer;

pub struct Cli {
    state: CalendarState,
    layout: LayoutConfig,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(state: CalendarState, layout: LayoutConfig, renderer: TerminalRenderer) -> Self {
        Self {
            state,
            layout,
            renderer,
        }
    }

    fn session(&self, output_dir: &Path) -> Result<GenerationSession> {
        let client = WorkerBuilder::new()
            .with_renderer(LayoutEngine::new(self.layout))
            .build()
            .context("Failed to start generation worker")?;
        Ok(GenerationSession::new(
            self.state.clone(),
            client,
            DirectorySaveTarget::new(output_dir),
        ))
    }

    /// Generates the full document into `output_dir`.
    pub async fn generate(&self, output_dir: &Path) -> Result<()> {
        let mut session = self.session(output_dir)?;
        let outcome = session.generate(false).await?;
        session.teardown();
        self.finish(outcome)
    }

    /// Generates the first month and writes it to `output`.
    pub async fn preview(&self, output: &Path) -> Result<()> {
        let scratch = output.parent().unwrap_or_else(|| Path::new("."));
        let mut session = self.session(scratch)?;
        let outcome = session.generate(true).await?;

        if let GenerationOutcome::Preview { handle, .. } = &outcome {
            let bytes = session
                .artifacts()
                .resolve(handle)
                .ok_or_else(|| anyhow!("Preview {handle} was revoked before it was written"))?;
            fs::write(output, &bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote preview to {}", output.display());
        }
        session.teardown();
        self.finish(outcome)?;
        self.renderer
            .render(&format!("**Written to:** {}\n", output.display()))
    }

    fn finish(&self, outcome: GenerationOutcome) -> Result<()> {
        let summary = GenerationSummary(&outcome).to_string();
        match outcome {
            GenerationOutcome::Failed { error, .. } => {
                debug!("{summary}");
                Err(error).context("Generation failed")
            }
            _ => self.renderer.render(&summary),
        }
    }

    /// Lists weekdays in display order with their canonical indices.
    pub fn weekdays(&self) -> Result<()> {
        let locale = self.state.configuration().language();
        let table = WeekdayTable(weekday_order(locale));
        self.renderer
            .render(&format!("# Weekdays ({locale})\n\n{table}"))
    }

    /// Lists the months the configuration covers.
    pub fn months(&self) -> Result<()> {
        let configuration = self.state.configuration();
        let list = MonthList {
            months: configuration.months()?,
            locale: configuration.language(),
        };
        self.renderer.render(&format!("# Months\n\n{list}"))
    }
}

/// Prints a sample configuration document for `year`.
pub fn template(renderer: &TerminalRenderer, year: i32) -> Result<()> {
    let document = ConfigurationDocument::sample(year);
    let json = serde_json::to_string_pretty(&document)?;
    renderer.raw(&format!("{json}\n"))
}

/// Prints the JSON schema of the configuration document.
pub fn schema(renderer: &TerminalRenderer) -> Result<()> {
    let schema = schemars::schema_for!(ConfigurationDocument);
    let json = serde_json::to_string_pretty(&schema)?;
    renderer.raw(&format!("{json}\n"))
}
