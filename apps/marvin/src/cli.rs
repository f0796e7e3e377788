//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "marvin",
    version,
    about = "Documentation QA tool",
    long_about = "Marvin runs documentation checkers (Vale, markdownlint), keeps every run under the results directory, and browses the history in an interactive dashboard.\n\nConfiguration precedence: CLI > marvin.toml > defaults.",
    after_help = "Examples:\n  marvin vale\n  marvin markdownlint ./content --fix\n  marvin dashboard\n  marvin vale --json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Clone, Default)]
/// Flags shared by every command that reads or writes results.
pub struct CommonOpts {
    #[arg(long, help = "Repository root (default: detected from current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Directory holding result records (default: .marvin/results)")]
    pub output_dir: Option<String>,
    #[arg(long, help = "Output mode: tui|plain|json (default: tui)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the TUI and print plain text")]
    pub no_tui: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print raw JSON (implies --no-tui)")]
    pub json: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable verbose logging")]
    pub verbose: bool,
}

impl CommonOpts {
    /// Output mode requested on the command line, if any. `--json` wins.
    pub fn output_mode(&self) -> Option<String> {
        if self.json {
            Some("json".to_string())
        } else if self.no_tui {
            Some("plain".to_string())
        } else {
            self.output.clone()
        }
    }
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current marvin version.")]
    Version,
    /// Run Vale prose linting
    #[command(
        about = "Run Vale prose linting",
        long_about = "Run Vale on documentation files, save the result, and show it. Scans docs/ unless a path is given.",
        after_help = "Examples:\n  marvin vale\n  marvin vale ./content --min-alert-level warning\n  marvin vale --glob='!{node_modules/*,.vitepress/*}'"
    )]
    Vale {
        #[arg(help = "Path to scan (default: docs/)")]
        path: Option<String>,
        #[arg(long, help = "Vale config file (default: auto-detect .vale.ini)")]
        config: Option<String>,
        #[arg(long, help = "Minimum alert level: suggestion|warning|error")]
        min_alert_level: Option<String>,
        #[arg(long, help = "Glob pattern to filter files (e.g. '!node_modules')")]
        glob: Option<String>,
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Run markdownlint
    #[command(
        about = "Run markdownlint on Markdown files",
        long_about = "Run markdownlint, save the result, and show it. Scans docs/ unless a path is given.",
        after_help = "Examples:\n  marvin markdownlint\n  marvin markdownlint ./content --config .markdownlint.yaml\n  marvin markdownlint --fix"
    )]
    Markdownlint {
        #[arg(help = "Path to scan (default: docs/)")]
        path: Option<String>,
        #[arg(long, help = "markdownlint config file (default: auto-detect)")]
        config: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Fix issues where possible")]
        fix: bool,
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Browse aggregated results
    #[command(
        about = "View aggregated results from all checks",
        long_about = "Load every saved run and show per-checker statistics. Tab/Shift+Tab switch checkers, Enter toggles the detailed issue list.",
        after_help = "Examples:\n  marvin dashboard\n  marvin dashboard --output-dir ./custom-results\n  marvin dashboard --json"
    )]
    Dashboard {
        #[command(flatten)]
        common: CommonOpts,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vale_with_flags() {
        let cli = Cli::try_parse_from([
            "marvin",
            "vale",
            "content",
            "--min-alert-level",
            "warning",
            "--json",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Vale {
                path,
                min_alert_level,
                common,
                ..
            } => {
                assert_eq!(path.as_deref(), Some("content"));
                assert_eq!(min_alert_level.as_deref(), Some("warning"));
                assert_eq!(common.output_mode().as_deref(), Some("json"));
            }
            _ => panic!("expected vale"),
        }
    }

    #[test]
    fn test_no_tui_maps_to_plain() {
        let cli = Cli::try_parse_from(["marvin", "dashboard", "--no-tui"]).unwrap();
        match cli.cmd {
            Commands::Dashboard { common } => {
                assert_eq!(common.output_mode().as_deref(), Some("plain"))
            }
            _ => panic!("expected dashboard"),
        }
    }
}
