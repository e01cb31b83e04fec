//! `snda weekly`: one interaction graph per observed calendar week.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use snda_core::temporal::{Positions, WeeklyGraph, weekly_graphs};
use tracing::info;

use super::{DatasetArg, load_dataset, parse_dataset};
use crate::layout::LayoutKind;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `snda weekly`.
#[derive(Args, Debug)]
pub struct WeeklyArgs {
    /// Edge list to segment, as LABEL=PATH.
    #[arg(long = "dataset", value_name = "LABEL=PATH", value_parser = parse_dataset)]
    pub dataset: DatasetArg,

    /// Layout used for node positions in JSON output.
    #[arg(long, value_enum, default_value_t = LayoutKind::Circle)]
    pub layout: LayoutKind,
}

/// One week of `snda weekly` output.
#[derive(Debug, Serialize)]
pub struct WeekView {
    pub label: String,
    pub iso_week: String,
    pub start: NaiveDate,
    pub interactions: usize,
    pub nodes: usize,
    pub edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Positions>,
}

impl WeekView {
    fn new(week: &WeeklyGraph, positions: Option<Positions>) -> Self {
        Self {
            label: week.label.clone(),
            iso_week: week.iso_label.clone(),
            start: week.start,
            interactions: week.interactions,
            nodes: week.graph.node_count(),
            edges: week.graph.edge_count(),
            positions,
        }
    }
}

/// Report payload for `snda weekly`.
#[derive(Debug, Serialize)]
pub struct WeeklyOutput {
    pub dataset: String,
    pub weeks: Vec<WeekView>,
}

/// Execute `snda weekly`.
pub fn run_weekly(args: &WeeklyArgs, output: OutputMode) -> anyhow::Result<()> {
    let edges = load_dataset(&args.dataset, output)?;
    let weeks = weekly_graphs(&edges);
    info!(dataset = %args.dataset.label, weeks = weeks.len(), "weekly graphs built");

    // Positions are only emitted in JSON, so skip the layout work otherwise.
    let layout = output.is_json().then(|| args.layout.build());
    let payload = WeeklyOutput {
        dataset: args.dataset.label.clone(),
        weeks: weeks
            .iter()
            .map(|week| WeekView::new(week, layout.as_deref().map(|l| week.layout_with(l))))
            .collect(),
    };

    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &WeeklyOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "WEEK\tISO\tINTERACTIONS\tNODES\tEDGES")?;
    for week in &payload.weeks {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            week.label, week.iso_week, week.interactions, week.nodes, week.edges
        )?;
    }
    Ok(())
}

fn render_pretty(payload: &WeeklyOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Weekly Network Evolution for {}", payload.dataset))?;
    if payload.weeks.is_empty() {
        writeln!(w, "No interactions.")?;
        return Ok(());
    }
    for week in &payload.weeks {
        writeln!(
            w,
            "Week {} ({})  nodes: {:>5}  edges: {:>5}  interactions: {:>6}",
            week.label, week.iso_week, week.nodes, week.edges, week.interactions
        )?;
    }
    Ok(())
}
