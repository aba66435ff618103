mod config;
mod explain;
mod files;
mod scan;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig};
use fs_err as fs;
use impsort_domain::{apply_fix, check_imports, Config};
use impsort_edit::{render_patch, write_fixed, EditError, Precondition, SourceBuffer};
use impsort_types::report::{Diagnostic, FileReport};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Upper bound on check/fix rounds per file.
const MAX_FIX_PASSES: usize = 10;

#[derive(Debug, Parser)]
#[command(
    name = "impsort",
    version,
    about = "Check and fix import grouping and ordering in JavaScript and TypeScript sources."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report import order violations (exit code 1 when any are found).
    Check(CheckArgs),
    /// Rewrite import groups into their canonical order.
    Fix(FixArgs),
    /// Explain what a sort strategy does.
    Explain(ExplainArgs),
}

#[derive(Debug, clap::Args)]
struct OptionArgs {
    /// Config file (default: ./impsort.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Sort strategy, repeatable, in chain order (e.g., "pathDepth:desc"). Replaces the
    /// configured chain.
    #[arg(long = "strategy", value_name = "NAME[:ASC|DESC]")]
    strategies: Vec<String>,

    /// Regex matching internal module paths.
    #[arg(long)]
    internal_pattern: Option<String>,

    /// Also sort `{ ... }` specifier lists.
    #[arg(long, default_value_t = false)]
    sort_destructured: bool,

    /// Do not split external and internal imports.
    #[arg(long, default_value_t = false)]
    no_group_external_internal: bool,
}

impl OptionArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            strategies: self.strategies.clone(),
            internal_pattern: self.internal_pattern.clone(),
            sort_destructured: self.sort_destructured,
            no_group_external_internal: self.no_group_external_internal,
        }
    }
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Files, directories or glob patterns (default: current directory).
    paths: Vec<String>,

    #[command(flatten)]
    options: OptionArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct FixArgs {
    /// Files, directories or glob patterns (default: current directory).
    paths: Vec<String>,

    #[command(flatten)]
    options: OptionArgs,

    /// Print a unified diff instead of writing files.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Strategy name (e.g., "pathDepth", "alphabetical").
    strategy: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("error: {:#}", e);
            let code = e.downcast_ref::<EditError>().map_or(1, EditError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Fix(args) => cmd_fix(args),
        Command::Explain(args) => cmd_explain(args),
    }
}

fn load_merged(options: &OptionArgs) -> anyhow::Result<MergedConfig> {
    let cwd = Utf8PathBuf::from(".");
    let file_config = config::load_or_default(options.config.as_deref(), &cwd)
        .context("load impsort.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(&options.overrides());
    debug!("merged options: {:?}", merged.options);
    Ok(merged)
}

fn path_args(paths: Vec<String>) -> Vec<String> {
    if paths.is_empty() {
        vec![".".to_string()]
    } else {
        paths
    }
}

fn check_source(source: &str, config: &Config) -> Vec<Diagnostic> {
    check_imports(scan::scan_imports(source), source, config)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let merged = load_merged(&args.options)?;
    let config = Config::from_raw(&merged.options);
    let files = files::collect_files(&path_args(args.paths), &merged.exclude)?;

    let mut reports = Vec::new();
    let mut total = 0;
    for path in &files {
        let source = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        let diagnostics = check_source(&source, &config);
        total += diagnostics.len();

        match args.format {
            OutputFormat::Text => {
                for d in &diagnostics {
                    println!("{}", format_diagnostic(path, &source, d));
                }
            }
            OutputFormat::Json => reports.push(FileReport::new(path.as_str(), diagnostics)),
        }
    }

    if let OutputFormat::Json = args.format {
        let json = serde_json::to_string_pretty(&reports).context("serialize json")?;
        println!("{}", json);
    }

    info!("checked {} file(s), {} problem(s)", files.len(), total);
    Ok(if total == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<ExitCode> {
    let merged = load_merged(&args.options)?;
    let config = Config::from_raw(&merged.options);
    let files = files::collect_files(&path_args(args.paths), &merged.exclude)?;

    let mut changed = 0;
    let mut unresolved = 0;
    for path in &files {
        let source = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        let precondition = Precondition::of_contents(path, &source);

        let (fixed, remaining) = fix_source(&source, &config)
            .with_context(|| format!("fix {}", path))?;
        if remaining > 0 {
            warn!("{}: {} problem(s) could not be fixed", path, remaining);
            unresolved += remaining;
        }
        if fixed == source {
            continue;
        }

        changed += 1;
        if args.dry_run {
            print!("{}", render_patch(path, &source, &fixed));
        } else {
            write_fixed(&precondition, &fixed)?;
            info!("fixed {}", path);
        }
    }

    info!("{} of {} file(s) changed", changed, files.len());
    Ok(if unresolved == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Fix until a pass reports nothing or stops changing the text. Returns the text and the
/// number of diagnostics still reported.
fn fix_source(source: &str, config: &Config) -> Result<(String, usize), EditError> {
    let mut current = source.to_string();
    for pass in 1..=MAX_FIX_PASSES {
        let diagnostics = check_source(&current, config);
        if diagnostics.is_empty() {
            return Ok((current, 0));
        }

        let mut buffer = SourceBuffer::new(current.as_str());
        for diagnostic in &diagnostics {
            apply_fix(diagnostic, &mut buffer)?;
        }
        let next = buffer.finish()?;
        debug!(pass, diagnostics = diagnostics.len(), "fix pass");
        if next == current {
            return Ok((current, diagnostics.len()));
        }
        current = next;
    }

    let remaining = check_source(&current, config).len();
    Ok((current, remaining))
}

/// `path:line:col: [category] message`, 1-based.
fn format_diagnostic(path: &Utf8Path, source: &str, diagnostic: &Diagnostic) -> String {
    match diagnostic.range {
        Some(range) => {
            let (line, col) = line_col(source, range.start);
            format!(
                "{}:{}:{}: [{}] {}",
                path,
                line,
                col,
                diagnostic.category.as_str(),
                diagnostic.message
            )
        }
        None => format!(
            "{}: [{}] {}",
            path,
            diagnostic.category.as_str(),
            diagnostic.message
        ),
    }
}

fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let prefix = source.get(..offset).unwrap_or(source);
    let line = prefix.matches('\n').count() + 1;
    let col = prefix.rsplit('\n').next().unwrap_or_default().chars().count() + 1;
    (line, col)
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<ExitCode> {
    use explain::{list_strategy_keys, lookup_strategy};

    let Some(strategy) = lookup_strategy(&args.strategy) else {
        let available = list_strategy_keys().join(", ");
        anyhow::bail!(
            "Unknown strategy: '{}'\n\nAvailable strategies: {}",
            args.strategy,
            available
        );
    };

    println!("================================================================================");
    println!("STRATEGY: {}", strategy.title);
    println!("================================================================================");
    println!();
    println!("Key:        {}", strategy.key);
    println!(
        "Chain:      {}",
        if strategy.refinable {
            "ties are refined by the next strategy"
        } else {
            "terminal (ties keep their order)"
        }
    );
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", strategy.description);
    println!();

    println!("EXAMPLE (ASC)");
    println!("--------------------------------------------------------------------------------");
    println!("{}", strategy.example);
    println!();

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_col_is_one_based() {
        let source = "import a from 'a';\n  import b from 'b';\n";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 21), (2, 3));
    }

    #[test]
    fn fix_source_reaches_a_fixed_point() {
        let config = Config::from_raw(&impsort_types::options::RawOptions {
            sort_destructured_specifiers: Some(true),
            ..Default::default()
        });
        let source = "import { z, a } from './z';\nimport React from 'react';\n\nrender();\n";
        let (fixed, remaining) = fix_source(source, &config).expect("fix");
        assert_eq!(remaining, 0);
        assert_eq!(
            fixed,
            "import React from 'react';\nimport { a, z } from './z';\n\nrender();\n"
        );
    }

    #[test]
    fn clean_source_is_untouched() {
        let source = "import fs from 'fs';\nimport a from './a';\n";
        let (fixed, remaining) = fix_source(source, &Config::default()).expect("fix");
        assert_eq!((fixed.as_str(), remaining), (source, 0));
    }

    #[test]
    fn format_with_position() {
        let source = "x;\nimport z from 'z';\nimport a from 'a';\n";
        let diagnostics = check_source(source, &Config::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            format_diagnostic(Utf8Path::new("src/app.ts"), source, &diagnostics[0]),
            "src/app.ts:2:1: [order] Imports should be sorted by filename (ASC): \"z\" should come after \"a\""
        );
    }
}
