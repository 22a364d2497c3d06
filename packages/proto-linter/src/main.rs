//! proto-linter CLI

use clap::{Parser, ValueEnum};
use colored::*;
use proto_linter::{
    collect_descriptor_files, config, lint_documents, load_documents,
    logging::{LintLogEntry, LintLogger},
    models::{Failure, LintReport},
    rules::RuleRegistry,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status when any infrastructure error occurred
const EXIT_INFRASTRUCTURE_ERROR: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "proto-linter")]
#[command(version, about = "A linter for protobuf service naming conventions")]
struct Args {
    /// `*.proto.json` schema descriptors or directories containing them
    #[arg(default_value = ".")]
    paths: Vec<String>,

    /// Enable specific rules (comma-separated, or "ALL")
    #[arg(long, value_delimiter = ',')]
    enable: Vec<String>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Exclude paths matching patterns
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,

    /// Use this config file instead of searching for proto-linter.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore proto-linter.toml configuration
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Append a JSON Lines record of this run to the given file
    #[arg(long)]
    log_file: Option<String>,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let registry = RuleRegistry::with_default_rules();

    if args.list_rules {
        for rule in registry.rules() {
            println!("{}  {}", rule.rule_id().cyan().bold(), rule.description());
        }
        return ExitCode::SUCCESS;
    }

    // Load config
    let config = if args.no_config {
        None
    } else {
        match config::load_config(args.config.as_deref()) {
            Ok(config) => config,
            Err(e) => return infrastructure_error(&e),
        }
    };

    // Merge CLI args with config
    let (enabled_rules, exclude_patterns) = config::merge_config(
        config.as_ref(),
        &registry.rule_ids(),
        &args.enable,
        &args.disable,
        &args.exclude,
    );

    if args.verbose {
        eprintln!("Enabled rules: {:?}", enabled_rules);
        eprintln!("Exclude patterns: {:?}", exclude_patterns);
    }

    let rules = match registry.enabled(enabled_rules.as_deref()) {
        Ok(rules) => rules,
        Err(e) => return infrastructure_error(&e),
    };

    if args.verbose {
        eprintln!(
            "Active rules: {}",
            rules
                .iter()
                .map(|r| r.rule_id())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    // Collect and decode descriptors
    let files = collect_descriptor_files(&args.paths, &exclude_patterns);

    if args.verbose {
        eprintln!("Found {} schema descriptor(s)", files.len());
    }

    if files.is_empty() {
        eprintln!("No schema descriptors found");
        return ExitCode::SUCCESS;
    }

    let documents = match load_documents(&files) {
        Ok(documents) => documents,
        Err(e) => return infrastructure_error(&e),
    };

    let dir_path = args
        .paths
        .first()
        .map(|p| Path::new(p).to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut report = lint_documents(&documents, &rules, &dir_path);
    if let Some(cfg) = &config {
        report.retain_failures(|f| !cfg.is_ignored(f));
    }

    // Output results
    match args.output_format {
        OutputFormat::Json => print_json(&report, &registry),
        OutputFormat::Text => print_text(&report),
    }

    let log_file = args
        .log_file
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.log_file.clone()));
    if let Some(log_file) = log_file {
        write_log(&log_file, &report, args.output_format.as_str(), enabled_rules, args.verbose);
    }

    let errors = report.errors();
    for (rule_id, error) in &errors {
        eprintln!("{} {}: {}", "error".red().bold(), rule_id.cyan(), error);
    }

    // Print summary
    let total = report.failures().len();
    if total > 0 {
        eprintln!("\nFound {} failure(s)", total);
    } else if args.verbose {
        eprintln!("\nNo failures found.");
    }

    // Return exit code
    if !errors.is_empty() {
        ExitCode::from(EXIT_INFRASTRUCTURE_ERROR)
    } else if total > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn infrastructure_error(error: &proto_linter::error::LintError) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), error);
    ExitCode::from(EXIT_INFRASTRUCTURE_ERROR)
}

fn write_log(
    log_file: &str,
    report: &LintReport,
    run_mode: &str,
    enabled_rules: Option<Vec<String>>,
    verbose: bool,
) {
    let entry = LintLogEntry::from_report(report, run_mode, enabled_rules);
    match LintLogger::new(log_file).and_then(|mut logger| logger.log(&entry)) {
        Ok(()) if verbose => eprintln!("Logged run to {}", log_file),
        Ok(()) => {}
        Err(e) => eprintln!("{} failed to write log {}: {}", "warning:".yellow().bold(), log_file, e),
    }
}

fn print_text(report: &LintReport) {
    for failure in report.failures() {
        print_failure(failure);
    }
}

fn print_failure(failure: &Failure) {
    println!(
        "{}:{}:{}:{} ({})",
        failure.position.filename.dimmed(),
        failure.position.line.to_string().yellow(),
        failure.position.column,
        failure.message,
        failure.lint_id.cyan()
    );
}

fn print_json(report: &LintReport, registry: &RuleRegistry) {
    // Group by rule for JSON output
    let mut grouped: BTreeMap<&str, Vec<serde_json::Value>> = BTreeMap::new();

    for failure in report.failures() {
        grouped
            .entry(failure.lint_id.as_str())
            .or_default()
            .push(serde_json::json!({
                "file": failure.position.filename,
                "line": failure.position.line,
                "column": failure.position.column,
                "message": failure.message,
            }));
    }

    let output: Vec<serde_json::Value> = grouped
        .into_iter()
        .map(|(rule_id, failures)| {
            let description = registry.get(rule_id).map(|r| r.description()).unwrap_or_default();
            serde_json::json!({
                "rule": rule_id,
                "description": description,
                "count": failures.len(),
                "failures": failures,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
