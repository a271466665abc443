// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a bar chart into a `vizbar_dom` document and writes it out as an HTML page.

mod html;
mod letters;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use vizbar_charts::{BarChart, BarChartConfig, ChartError, Entry};
use vizbar_dom::{Bound, Document, DomError, ElementId, Tag};

#[derive(Parser, Debug)]
#[command(name = "vizbar_demo")]
#[command(version, about = "Render a bar chart to an HTML page")]
struct Args {
    /// JSON array of `{ "key", "value" }` entries (`letter` / `frequency` also accepted).
    /// Defaults to English letter frequencies.
    #[arg(long)]
    data: Option<PathBuf>,

    /// JSON chart configuration; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Re-render with only the first N entries after the initial render.
    #[arg(long, value_name = "N")]
    subset: Option<usize>,

    /// Finish pending transitions before writing the page.
    #[arg(long)]
    settle: bool,

    /// Output file.
    #[arg(long, default_value = "vizbar_demo.html")]
    out: PathBuf,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("render failed: {0}")]
    Render(#[from] ChartError),
    #[error(transparent)]
    Dom(#[from] DomError),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn render(
    chart: &mut BarChart,
    doc: &mut Document,
    container: ElementId,
    data: Vec<Entry>,
) -> Result<(), DemoError> {
    for outcome in chart.render(doc, &Bound::datum([container], data)) {
        let report = outcome.result?;
        tracing::info!(
            created = report.created,
            entered = report.bars.entered,
            updated = report.bars.updated,
            exited = report.bars.exited,
            width = report.drawable.width,
            height = report.drawable.height,
            "rendered"
        );
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), DemoError> {
    let data: Vec<Entry> = match &args.data {
        Some(path) => read_json(path)?,
        None => letters::letters(),
    };
    let config: BarChartConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => BarChartConfig::default(),
    };
    tracing::debug!(entries = data.len(), ?config, "loaded inputs");

    let mut doc = Document::new();
    let container = doc.append(doc.root(), Tag::Div)?;
    doc.element_mut(container)?.classed("chart", true);

    let mut chart = BarChart::with_config(config);
    render(&mut chart, &mut doc, container, data.clone())?;
    if let Some(n) = args.subset {
        let subset = data.into_iter().take(n).collect();
        render(&mut chart, &mut doc, container, subset)?;
    }
    if args.settle {
        tracing::debug!(pending = doc.pending_transitions(), "settling transitions");
        doc.settle();
    }

    let markup = doc.to_svg_string(container)?;
    let page = html::render_page("VizBar demo", &markup);
    std::fs::write(&args.out, page).map_err(|source| DemoError::Io {
        path: args.out.clone(),
        source,
    })?;
    tracing::info!(path = %args.out.display(), "wrote page");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "vizbar_demo failed");
            ExitCode::FAILURE
        }
    }
}
