//! Rendering of a comparison: CI annotations, terminal text, JSON, markdown.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::compare::{Comparison, Delta, Outcome};
use crate::results::ResultSet;

/// Prefix understood by the CI runner as a warning annotation.
pub const WARNING_PREFIX: &str = "::warning ::";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Annotation,
    Text,
    Json,
    Markdown,
}

/// A comparison together with the names it is reported under.
pub struct Report<'a> {
    pub comparison: &'a Comparison,
    pub label: &'a str,
    pub branch: &'a str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    label: &'a str,
    branch: &'a str,
    baseline: &'a ResultSet,
    current: &'a ResultSet,
    delta: &'a Delta,
    outcome: Outcome,
}

impl<'a> Report<'a> {
    pub fn new(comparison: &'a Comparison, label: &'a str, branch: &'a str) -> Self {
        Self {
            comparison,
            label,
            branch,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        Ok(match format {
            ReportFormat::Annotation => self.annotations().join("\n"),
            ReportFormat::Text => self.text(),
            ReportFormat::Json => self.json()?,
            ReportFormat::Markdown => self.markdown(),
        })
    }

    /// The summary annotation, followed by a "No changes" annotation when
    /// the pass count did not move.
    pub fn annotations(&self) -> Vec<String> {
        let d = &self.comparison.delta;
        let mut lines = vec![format!(
            "{}Changes from {}: PASS {:+} / SKIP {:+} / FAIL {:+}",
            WARNING_PREFIX, self.branch, d.pass, d.skip, d.fail
        )];
        if d.pass == 0 {
            lines.push(format!("{}{} tests No changes", WARNING_PREFIX, self.label));
        }
        lines
    }

    pub fn json(&self) -> Result<String> {
        let c = self.comparison;
        let report = JsonReport {
            label: self.label,
            branch: self.branch,
            baseline: &c.baseline,
            current: &c.current,
            delta: &c.delta,
            outcome: c.outcome(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    pub fn markdown(&self) -> String {
        let c = self.comparison;
        let (b, n, d) = (&c.baseline.record, &c.current.record, &c.delta);
        let mut md = String::new();
        md.push_str(&format!("### {} results vs {}\n\n", self.label, self.branch));
        md.push_str(&format!("| | {} | current | delta |\n", self.branch));
        md.push_str("|---|---:|---:|---:|\n");
        md.push_str(&format!("| PASS | {} | {} | {:+} |\n", b.pass, n.pass, d.pass));
        md.push_str(&format!("| SKIP | {} | {} | {:+} |\n", b.skip, n.skip, d.skip));
        md.push_str(&format!("| FAIL | {} | {} | {:+} |\n", b.fail, n.fail, d.fail));
        md.push_str(&format!("\n**Outcome:** {}\n", c.outcome().as_str()));
        md
    }

    /// Colourised terminal summary.
    pub fn text(&self) -> String {
        let c = self.comparison;
        let (b, n, d) = (&c.baseline.record, &c.current.record, &c.delta);
        let mut lines = vec![
            format!("{} results vs {}", self.label, self.branch)
                .green()
                .bold()
                .to_string(),
            "─".repeat(40).dimmed().to_string(),
        ];

        let rows = [
            ("PASS", b.pass, n.pass, good_when_up(d.pass)),
            ("SKIP", b.skip, n.skip, neutral(d.skip)),
            ("FAIL", b.fail, n.fail, good_when_down(d.fail)),
        ];
        for (name, before, after, delta) in rows {
            lines.push(format!(
                "  {}{:>8} → {:<8}{}",
                format!("{:<6}", name).bold(),
                before,
                after,
                delta
            ));
        }

        lines.push(String::new());
        lines.push(match c.outcome() {
            Outcome::Improved => format!(
                "{} {} more passing",
                "✓".green().bold(),
                d.pass
            ),
            Outcome::Unchanged => format!("{} {} tests No changes", "✓".green(), self.label),
            Outcome::Regressed => format!(
                "{} {} fewer passing",
                "✗".red().bold(),
                d.pass.unsigned_abs()
            ),
        });
        lines.join("\n")
    }
}

fn signed(v: i64) -> String {
    format!("({:+})", v)
}

fn good_when_up(v: i64) -> ColoredString {
    match v {
        v if v > 0 => signed(v).green(),
        v if v < 0 => signed(v).red(),
        _ => signed(v).dimmed(),
    }
}

fn good_when_down(v: i64) -> ColoredString {
    match v {
        v if v > 0 => signed(v).red(),
        v if v < 0 => signed(v).green(),
        _ => signed(v).dimmed(),
    }
}

fn neutral(v: i64) -> ColoredString {
    if v == 0 {
        signed(v).dimmed()
    } else {
        signed(v).yellow()
    }
}
