// src/main.rs
//
// reformadoc: reflows `///` XML documentation comments in a source file
//
// - Text is re-wrapped to the wrap column; block elements (summary, para, list
//   items, ...) get their own lines; list and table parts are indented.
// - <code> content keeps its own line breaks; only the exterior indentation
//   and markers of its lines are normalised.
// - Malformed markup is passed through verbatim.
// - Only `///` comments are touched; `/** */` comments are left alone.
//
// Settings, lowest priority first: .editorconfig files, the nearest
// reformadoc.toml (or --config), then the flags below.
//
// Set RUST_LOG (e.g. RUST_LOG=reformadoc=debug) for tracing output on stderr.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use reformadoc::settings::{load_for_file, Settings};
use reformadoc::{apply_edits, format_document, format_span, NewLine, Span};
use tracing::info;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Wrap column (default: max_line_length / guidelines from .editorconfig, else 80)
    #[arg(long, value_name = "COLUMN")]
    wrap_column: Option<usize>,

    /// Columns per tab stop
    #[arg(long, value_name = "COLUMNS")]
    tab_size: Option<usize>,

    /// Indentation added inside lists and tables
    #[arg(long, value_name = "COLUMNS")]
    indent_size: Option<usize>,

    /// Indent continuation lines with tabs
    #[arg(long, action = ArgAction::SetTrue)]
    use_tabs: bool,

    /// Line terminator for new line breaks (default: detected from the input)
    #[arg(long, value_name = "lf|crlf", value_parser = parse_new_line)]
    newline: Option<NewLine>,

    /// Settings file (default: nearest reformadoc.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only format comments overlapping this byte range
    #[arg(long, value_name = "START..END", value_parser = parse_span)]
    span: Option<Span>,

    /// Report whether the file would change; write nothing and exit with 1 if so
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,

    /// Input file
    input: PathBuf,

    /// Output file (default: overwrite input)
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let config = load_for_file(&cli.input, &src, cli.config.as_deref(), overrides(&cli))
        .with_context(|| format!("failed to load settings for {}", cli.input.display()))?;

    let edits = match cli.span {
        Some(span) => format_span(&src, span, &config),
        None => format_document(&src, &config),
    }
    .with_context(|| format!("failed to format {}", cli.input.display()))?;

    let out = apply_edits(&src, &edits);
    let changed = out != src;
    info!(edits = edits.len(), changed, "formatted {}", cli.input.display());

    if cli.check {
        if changed {
            println!("{} would be reformatted", cli.input.display());
            return Ok(ExitCode::from(1));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let out_path = cli.output.as_ref().unwrap_or(&cli.input);
    if changed || cli.output.is_some() {
        fs::write(out_path, out)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(ExitCode::SUCCESS)
}

/* ============================ Flag conversion ============================ */

fn overrides(cli: &Cli) -> Settings {
    Settings {
        use_tabs: cli.use_tabs.then_some(true),
        tab_size: cli.tab_size,
        indent_size: cli.indent_size,
        new_line: cli.newline,
        wrap_column: cli.wrap_column,
        editor_guides: None,
    }
}

fn parse_new_line(s: &str) -> Result<NewLine> {
    match NewLine::parse(s) {
        Some(new_line) => Ok(new_line),
        None => bail!("expected `lf` or `crlf`, got `{s}`"),
    }
}

fn parse_span(s: &str) -> Result<Span> {
    let Some((start, end)) = s.split_once("..") else {
        bail!("expected START..END, got `{s}`");
    };
    let start: usize = start.trim().parse().context("invalid START")?;
    let end: usize = end.trim().parse().context("invalid END")?;
    if start > end {
        bail!("START ({start}) is after END ({end})");
    }
    Ok(Span::new(start, end))
}

/* ================================ Tracing ================================ */

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spans() {
        assert_eq!(parse_span("3..10").unwrap(), Span::new(3, 10));
        assert_eq!(parse_span("4..4").unwrap(), Span::empty(4));
        assert!(parse_span("10..3").is_err());
        assert!(parse_span("10").is_err());
        assert!(parse_span("a..3").is_err());
    }

    #[test]
    fn parses_new_lines() {
        assert_eq!(parse_new_line("CRLF").unwrap(), NewLine::CrLf);
        assert!(parse_new_line("cr").is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
