//! `snda analyze`: totals and top-K centrality tables for each dataset.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use snda_core::config::AnalysisConfig;
use snda_core::report::{DatasetReport, MetricOutcome};
use tracing::info;

use super::{DatasetArg, load_dataset, parse_dataset};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `snda analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Edge list to analyze, as LABEL=PATH. Repeat to compare datasets.
    #[arg(
        long = "dataset",
        value_name = "LABEL=PATH",
        required = true,
        value_parser = parse_dataset
    )]
    pub datasets: Vec<DatasetArg>,

    /// Number of nodes per ranking (overrides `top_k` in the config file).
    #[arg(long)]
    pub top_k: Option<usize>,
}

/// Report payload for `snda analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub top_k: usize,
    pub datasets: Vec<DatasetReport>,
}

/// Execute `snda analyze`.
pub fn run_analyze(
    args: &AnalyzeArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(k) = args.top_k {
        config.top_k = k;
    }

    let mut datasets = Vec::with_capacity(args.datasets.len());
    for dataset in &args.datasets {
        let edges = load_dataset(dataset, output)?;
        info!(dataset = %dataset.label, edges = edges.len(), "analyzing dataset");
        datasets.push(DatasetReport::analyze(&dataset.label, &edges, &config));
    }

    let payload = AnalyzeOutput {
        top_k: config.top_k,
        datasets,
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &AnalyzeOutput, w: &mut dyn Write) -> io::Result<()> {
    for report in &payload.datasets {
        writeln!(w, "dataset\t{}", report.name)?;
        writeln!(w, "nodes\t{}", report.summary.node_count)?;
        writeln!(w, "edges\t{}", report.summary.edge_count)?;
        for section in &report.metrics {
            match &section.outcome {
                MetricOutcome::Ranked { entries } => {
                    for (rank, entry) in entries.iter().enumerate() {
                        writeln!(
                            w,
                            "{}\t{}\t{}\t{:.6}",
                            section.kind.key(),
                            rank + 1,
                            entry.node,
                            entry.score
                        )?;
                    }
                }
                MetricOutcome::NotComputable { notice, code, .. } => {
                    writeln!(w, "{}\t-\t{notice}\t{code}", section.kind.key())?;
                }
            }
        }
    }
    Ok(())
}

fn render_pretty(payload: &AnalyzeOutput, w: &mut dyn Write) -> io::Result<()> {
    for (i, report) in payload.datasets.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        pretty_section(w, &format!("{} Network Analysis for the Entire Dataset", report.name))?;
        let s = &report.summary;
        pretty_kv(w, "Nodes", s.node_count.to_string())?;
        pretty_kv(w, "Edges", s.edge_count.to_string())?;
        pretty_kv(w, "Density", format!("{:.4}", s.density))?;
        pretty_kv(w, "Components", s.component_count.to_string())?;
        pretty_kv(w, "Isolated", s.isolated_node_count.to_string())?;
        pretty_kv(w, "Self-loops", s.self_loop_count.to_string())?;
        pretty_kv(w, "Max degree", s.max_degree.to_string())?;
        pretty_kv(w, "Content hash", &s.content_hash)?;

        writeln!(w)?;
        writeln!(
            w,
            "Top {} Nodes by Centrality Measures ({})",
            payload.top_k, report.name
        )?;
        for section in &report.metrics {
            writeln!(w)?;
            match &section.outcome {
                MetricOutcome::Ranked { entries } if entries.is_empty() => {
                    writeln!(w, "{}: (no nodes)", section.kind)?;
                }
                MetricOutcome::Ranked { entries } => {
                    writeln!(w, "{}:", section.kind)?;
                    let width = entries.iter().map(|e| e.node.len()).max().unwrap_or(4).max(4);
                    writeln!(w, "  {:>3}  {:<width$}  {:>10}", "#", "Node", "Score")?;
                    for (rank, entry) in entries.iter().enumerate() {
                        writeln!(
                            w,
                            "  {:>3}  {:<width$}  {:>10.6}",
                            rank + 1,
                            entry.node,
                            entry.score
                        )?;
                    }
                }
                MetricOutcome::NotComputable {
                    notice,
                    code,
                    reason,
                } => {
                    writeln!(w, "{}: {notice}", section.kind)?;
                    writeln!(w, "  error[{code}]: {reason}")?;
                }
            }
        }
    }
    Ok(())
}
