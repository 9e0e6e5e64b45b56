// src/report.rs

use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::data_analysis::summary::MethodSummary;
use crate::plot_framework::format_duration_s;

/// Machine- and human-readable summary of one render run. The markdown and
/// JSON outputs are both generated from this structure.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub generator: String,
    pub timing: Option<TimingSection>,
    pub correlation: Option<CorrelationSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingSection {
    pub methods: Vec<MethodRecord>,
    pub figures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodRecord {
    pub method: String,
    pub trials: usize,
    pub median_s: f64,
    pub mean_s: f64,
    pub std_dev_s: f64,
    pub min_s: f64,
    pub max_s: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationSection {
    pub indices: Vec<String>,
    pub groups: Vec<IndexGroup>,
    pub figures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexGroup {
    pub group: usize,
    pub members: Vec<String>,
}

impl From<&MethodSummary> for MethodRecord {
    fn from(s: &MethodSummary) -> Self {
        MethodRecord {
            method: s.method.clone(),
            trials: s.trials,
            median_s: s.median_s,
            mean_s: s.mean_s,
            std_dev_s: s.std_dev_s,
            min_s: s.min_s,
            max_s: s.max_s,
        }
    }
}

pub fn timing_section(summaries: &[MethodSummary], figures: &[String]) -> TimingSection {
    TimingSection {
        methods: summaries.iter().map(MethodRecord::from).collect(),
        figures: figures.to_vec(),
    }
}

/// Groups index names by cluster assignment, preserving group numbering.
pub fn correlation_section(
    index_names: &[String],
    assignment: &[usize],
    figures: &[String],
) -> CorrelationSection {
    let n_groups = assignment.iter().max().map(|&g| g + 1).unwrap_or(0);
    let mut groups: Vec<IndexGroup> = (0..n_groups)
        .map(|group| IndexGroup {
            group,
            members: Vec::new(),
        })
        .collect();
    for (name, &group) in index_names.iter().zip(assignment.iter()) {
        groups[group].members.push(name.clone());
    }
    CorrelationSection {
        indices: index_names.to_vec(),
        groups,
        figures: figures.to_vec(),
    }
}

pub fn build_report(
    timing: Option<TimingSection>,
    correlation: Option<CorrelationSection>,
) -> ReportSummary {
    ReportSummary {
        generator: format!(
            "{} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
        timing,
        correlation,
    }
}

pub fn render_markdown(report: &ReportSummary) -> String {
    let mut out = String::new();
    out.push_str("# Complexity benchmark report\n\n");
    out.push_str(&format!("Generated by {}.\n", report.generator));

    if let Some(timing) = &report.timing {
        out.push_str("\n## Computation time\n\n");
        out.push_str("Methods ordered ascending by median duration across all trials.\n\n");
        out.push_str("| Method | Trials | Median | Mean | SD | Min | Max |\n");
        out.push_str("|---|---|---|---|---|---|---|\n");
        for m in &timing.methods {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                m.method,
                m.trials,
                format_duration_s(m.median_s),
                format_duration_s(m.mean_s),
                format_duration_s(m.std_dev_s),
                format_duration_s(m.min_s),
                format_duration_s(m.max_s),
            ));
        }
        for figure in &timing.figures {
            out.push_str(&format!("\n![{}]({})\n", figure, figure));
        }
    }

    if let Some(correlation) = &report.correlation {
        out.push_str("\n## Index correlation and clustering\n\n");
        out.push_str(&format!(
            "{} indices analyzed.\n\n",
            correlation.indices.len()
        ));
        out.push_str("| Group | Indices |\n");
        out.push_str("|---|---|\n");
        for group in &correlation.groups {
            out.push_str(&format!(
                "| {} | {} |\n",
                group.group + 1,
                group.members.join(", ")
            ));
        }
        for figure in &correlation.figures {
            out.push_str(&format!("\n![{}]({})\n", figure, figure));
        }
    }

    out
}

pub fn write_markdown(report: &ReportSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, render_markdown(report))?;
    Ok(())
}

pub fn write_json(report: &ReportSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    Ok(())
}
