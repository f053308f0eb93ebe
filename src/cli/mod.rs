use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::compare::{self, Comparison};
use crate::config::Config;
use crate::exit_codes;
use crate::report::{Report, ReportFormat};
use crate::results::ResultSet;

#[derive(Parser, Debug)]
#[command(
    name = "bfscmp",
    about = "Compare bfs test results against the main branch baseline and annotate the CI run",
    version
)]
pub struct Cli {
    /// Summary of the current run [default: bfs-result.json]
    pub current: Option<PathBuf>,

    /// Summary recorded on the reference branch [default: latest-bfs-result.json]
    pub baseline: Option<PathBuf>,

    /// Suite label used in the "No changes" annotation [default: BFS]
    #[arg(short, long)]
    pub label: Option<String>,

    /// Reference branch named in the summary annotation [default: main]
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "annotation")]
    pub format: OutputFormat,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Print the command-line reference as markdown and exit
    #[arg(long)]
    pub markdown_help: bool,

    /// Write a man page into DIR and exit
    #[arg(long, value_name = "DIR")]
    pub generate_man_pages: Option<PathBuf>,
}

/// Output format for the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `::warning ::` lines for the CI runner
    Annotation,
    /// Colourised terminal summary
    Text,
    Json,
    Markdown,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Annotation => ReportFormat::Annotation,
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Markdown => ReportFormat::Markdown,
        }
    }
}

/// Fully resolved inputs of one comparison.
#[derive(Debug, Clone)]
pub struct Settings {
    pub current: PathBuf,
    pub baseline: PathBuf,
    pub label: String,
    pub branch: String,
    pub format: ReportFormat,
}

impl Cli {
    /// Command-line values win over the config file, which wins over defaults.
    pub fn settings(&self, config: Config) -> Settings {
        Settings {
            current: self.current.clone().unwrap_or(config.current),
            baseline: self.baseline.clone().unwrap_or(config.baseline),
            label: self.label.clone().unwrap_or(config.label),
            branch: self.branch.clone().unwrap_or(config.branch),
            format: self.format.into(),
        }
    }
}

/// Entry point of the binary. Returns the process exit code.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<u8> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "bfscmp", out);
        return Ok(exit_codes::SUCCESS);
    }
    if cli.markdown_help {
        writeln!(out, "{}", clap_markdown::help_markdown::<Cli>())?;
        return Ok(exit_codes::SUCCESS);
    }
    if let Some(dir) = &cli.generate_man_pages {
        let page = generate_man_page(dir)?;
        writeln!(out, "Wrote {}", page.display())?;
        return Ok(exit_codes::SUCCESS);
    }

    let config = Config::load()?;
    check(&cli.settings(config), out)
}

/// Compare the configured files, print the report and decide the exit code.
pub fn check(settings: &Settings, out: &mut dyn Write) -> Result<u8> {
    let comparison = compare_files(&settings.current, &settings.baseline)?;
    let report = Report::new(&comparison, &settings.label, &settings.branch);
    writeln!(out, "{}", report.render(settings.format)?)?;

    let outcome = comparison.outcome();
    if outcome.is_regression() {
        log::warn!(
            "{} pass count regressed by {}",
            settings.label,
            comparison.delta.pass.unsigned_abs()
        );
        Ok(exit_codes::REGRESSION)
    } else {
        log::info!("{} outcome: {}", settings.label, outcome.as_str());
        Ok(exit_codes::SUCCESS)
    }
}

/// Load both summaries and compare them.
pub fn compare_files(current: &Path, baseline: &Path) -> Result<Comparison> {
    log::debug!(
        "comparing {} against {}",
        current.display(),
        baseline.display()
    );
    let current = ResultSet::load(current)?;
    let baseline = ResultSet::load(baseline)?;
    Ok(compare::compare(baseline, current)?)
}

fn generate_man_page(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    clap_mangen::generate_to(Cli::command(), dir)
        .with_context(|| format!("Failed to write man page into {}", dir.display()))?;
    Ok(dir.join("bfscmp.1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, json).unwrap();
        path
    }

    fn settings(current: PathBuf, baseline: PathBuf) -> Settings {
        Settings {
            current,
            baseline,
            label: "BFS".to_string(),
            branch: "main".to_string(),
            format: ReportFormat::Annotation,
        }
    }

    #[test]
    fn cli_values_override_config() {
        let cli = Cli::parse_from(["bfscmp", "new.json", "--label", "GNU"]);
        let config = Config {
            baseline: PathBuf::from("cfg-old.json"),
            branch: "trunk".to_string(),
            ..Config::default()
        };
        let s = cli.settings(config);
        assert_eq!(s.current, PathBuf::from("new.json"));
        assert_eq!(s.baseline, PathBuf::from("cfg-old.json"));
        assert_eq!(s.label, "GNU");
        assert_eq!(s.branch, "trunk");
        assert_eq!(s.format, ReportFormat::Annotation);
    }

    #[test]
    fn defaults_match_historical_file_names() {
        let cli = Cli::parse_from(["bfscmp"]);
        let s = cli.settings(Config::default());
        assert_eq!(s.current, PathBuf::from("bfs-result.json"));
        assert_eq!(s.baseline, PathBuf::from("latest-bfs-result.json"));
    }

    #[test]
    fn check_returns_regression_code() {
        let tmp = TempDir::new().unwrap();
        let cur = write(tmp.path(), "cur.json", r#"{"b": {"pass": 8, "fail": 3}}"#);
        let old = write(tmp.path(), "old.json", r#"{"a": {"pass": 10, "fail": 2}}"#);

        let mut out = Vec::new();
        let code = check(&settings(cur, old), &mut out).unwrap();
        assert_eq!(code, exit_codes::REGRESSION);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "::warning ::Changes from main: PASS -2 / SKIP +0 / FAIL +1\n"
        );
    }

    #[test]
    fn check_returns_success_on_no_change() {
        let tmp = TempDir::new().unwrap();
        let cur = write(tmp.path(), "cur.json", r#"{"x": {"pass": 5, "fail": 0}}"#);
        let old = write(tmp.path(), "old.json", r#"{"y": {"pass": 5, "fail": 0}}"#);

        let mut out = Vec::new();
        let code = check(&settings(cur, old), &mut out).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "::warning ::Changes from main: PASS +0 / SKIP +0 / FAIL +0\n\
             ::warning ::BFS tests No changes\n"
        );
    }

    #[test]
    fn check_prints_nothing_on_error() {
        let tmp = TempDir::new().unwrap();
        let cur = write(tmp.path(), "cur.json", "{}");
        let old = write(tmp.path(), "old.json", r#"{"a": {"pass": 10, "fail": 2}}"#);

        let mut out = Vec::new();
        let err = check(&settings(cur, old), &mut out).unwrap_err();
        assert!(err.to_string().contains("expected exactly one result entry"));
        assert!(out.is_empty());
    }

    #[test]
    fn man_page_is_written() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("man");
        let page = generate_man_page(&dir).unwrap();
        assert_eq!(page, dir.join("bfscmp.1"));
        let content = fs::read_to_string(page).unwrap();
        assert!(content.contains("bfscmp"));
    }
}
