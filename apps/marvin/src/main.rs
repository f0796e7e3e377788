//! Marvin CLI binary entry point.
//! Delegates to the library for checking, persisting, and presenting results.

use clap::Parser;
use marvin::aggregate::aggregate;
use marvin::checker::{
    CheckOptions, Checker, CheckerError, MarkdownlintChecker, ValeChecker,
};
use marvin::cli::{Cli, Commands, CommonOpts};
use marvin::config::{self, CliOverrides, Effective};
use marvin::store::{scan_results, ResultWriter};
use marvin::tui::{self, Theme};
use marvin::{logging, output, utils, Error};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::{debug, info};

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> marvin::Result<i32> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Vale {
            path,
            config,
            min_alert_level,
            glob,
            common,
        } => {
            let eff = resolve(&common, path)?;
            let checker = ValeChecker::new(
                eff.vale.config.clone(),
                min_alert_level.or_else(|| eff.vale.min_alert_level.clone()),
                glob.or_else(|| eff.vale.glob.clone()),
                eff.vale.binary.clone(),
            );
            run_checker(&checker, &eff, config)
        }
        Commands::Markdownlint {
            path,
            config,
            fix,
            common,
        } => {
            let eff = resolve(&common, path)?;
            let checker = MarkdownlintChecker::new(
                eff.markdownlint.config.clone(),
                fix || eff.markdownlint.fix.unwrap_or(false),
                eff.markdownlint.binary.clone(),
            );
            run_checker(&checker, &eff, config)
        }
        Commands::Dashboard { common } => {
            let eff = resolve(&common, None)?;
            run_dashboard(&eff, common.verbose)
        }
    }
}

fn resolve(common: &CommonOpts, path: Option<String>) -> marvin::Result<Effective> {
    logging::init(common.verbose);
    let eff = config::resolve_effective(&CliOverrides {
        repo_root: common.repo_root.clone(),
        output_dir: common.output_dir.clone(),
        output: common.output_mode(),
        path,
    })?;
    match &eff.config_path {
        Some(p) => debug!(config = %p.display(), "loaded configuration"),
        None => debug!(root = %eff.repo_root.display(), "no marvin config found; using defaults"),
    }
    Ok(eff)
}

/// Interactive output only makes sense on a terminal.
fn effective_output(eff: &Effective) -> &str {
    if eff.output == "tui" && !io::stdout().is_terminal() {
        "plain"
    } else {
        eff.output.as_str()
    }
}

fn run_checker(
    checker: &dyn Checker,
    eff: &Effective,
    config_override: Option<String>,
) -> marvin::Result<i32> {
    let scan_path = Path::new(&eff.path);
    if !scan_path.exists() {
        return Err(Error::PathNotFound(scan_path.to_path_buf()));
    }
    if let Err(e) = checker.validate() {
        if let CheckerError::NotFound { tool } = &e {
            eprintln!(
                "{} {} must be installed and on PATH (or set [{}].binary in marvin.toml)",
                utils::note_prefix(),
                tool,
                tool
            );
        }
        return Err(e.into());
    }

    info!(checker = checker.name(), path = %scan_path.display(), "running check");
    let result = checker.check(&CheckOptions {
        path: scan_path.to_path_buf(),
        config_file: config_override,
        extra_args: Vec::new(),
    })?;

    let saved = ResultWriter::new(&eff.output_dir).write(&result)?;
    let saved = utils::rel_to_wd(&saved);
    info!(file = %saved, "results saved");

    match effective_output(eff) {
        "json" => output::print_result(&result, "json")?,
        "plain" => {
            output::print_result(&result, "plain")?;
            println!("\nResults saved to: {}", saved);
        }
        _ => {
            tui::show_result(&result, &Theme::detect())?;
            println!("\nResults saved to: {}", saved);
        }
    }

    Ok(if result.summary.error_count > 0 { 1 } else { 0 })
}

fn run_dashboard(eff: &Effective, verbose: bool) -> marvin::Result<i32> {
    let report = scan_results(&eff.output_dir);
    if verbose && !report.skipped.is_empty() {
        eprintln!(
            "{} skipped {} unreadable record(s) in {}",
            utils::note_prefix(),
            report.skipped.len(),
            utils::rel_to_wd(&eff.output_dir)
        );
    }
    let data = aggregate(report.results);
    info!(
        checks = data.total_checks,
        checkers = data.checkers.len(),
        "loaded results"
    );

    if data.is_empty() {
        println!("No check results found.");
        println!("Run 'marvin vale' or 'marvin markdownlint' to generate results.");
        println!(
            "{} Results are stored in: {}",
            utils::info_prefix(),
            utils::rel_to_wd(&eff.output_dir)
        );
        return Ok(0);
    }

    match effective_output(eff) {
        "json" => output::print_dashboard(&data, "json", &Theme::plain())?,
        "plain" => output::print_dashboard(&data, "plain", &Theme::plain())?,
        _ => tui::show_dashboard(&data, &Theme::detect())?,
    }
    Ok(0)
}
