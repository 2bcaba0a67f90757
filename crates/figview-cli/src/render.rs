//! Plain-text rendering of selection lists and render reports.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use figview_core::app::RenderReport;
use figview_core::domain::{Category, OutcomeKind, ResolutionOutcome, SelectionLists};

pub const APP_TITLE: &str = "Visualize the results for a specific model and scenario";

pub fn selection_lists(lists: &SelectionLists) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {APP_TITLE}\n");
    let _ = writeln!(out, "Models:");
    for model in lists.models() {
        let _ = writeln!(out, "  {model}");
    }
    let _ = writeln!(out, "\nScenarios:");
    for scenario in lists.scenarios() {
        let _ = writeln!(out, "  {scenario}");
    }
    out
}

/// One section per category, in report order.
pub fn report(report: &RenderReport, written: &BTreeMap<Category, PathBuf>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {APP_TITLE}");
    let _ = writeln!(out, "{}", report.selection.label());
    for outcome in &report.outcomes {
        let _ = writeln!(out, "\n## {}", outcome.category.title());
        section(&mut out, report, outcome, written.get(&outcome.category));
    }
    out
}

fn section(
    out: &mut String,
    report: &RenderReport,
    outcome: &ResolutionOutcome,
    path: Option<&PathBuf>,
) {
    let label = report.selection.label();
    let reason = outcome.reason.as_deref().unwrap_or("unknown error");
    match (outcome.kind, &outcome.figure) {
        (OutcomeKind::Found, Some(figure)) => {
            let (w, h) = (figure.width, figure.height);
            match path {
                Some(path) => {
                    let _ = writeln!(out, "{} ({w}x{h})", path.display());
                }
                None => {
                    let _ = writeln!(out, "{} ({w}x{h}, not saved)", figure.entry);
                }
            }
            let _ = writeln!(out, "{}", figure.label);
            if let Some(caption) = &figure.caption {
                let _ = writeln!(out, "{caption}");
            }
        }
        (OutcomeKind::ArtifactNotFound, _) => {
            let _ = writeln!(
                out,
                "warning: No existing figure in {} for {label}",
                outcome.category.title()
            );
        }
        _ => {
            let _ = writeln!(out, "error: Error loading image {}: {reason}", outcome.artifact);
        }
    }
}
