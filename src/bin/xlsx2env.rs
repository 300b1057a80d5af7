//! CLI binary for xlsx2env.
//!
//! A thin shim over the library crate that maps CLI flags onto a
//! configuration overlay, runs the generation, and handles output.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xlsx2env::{
    compile_pdf, generate, write_document, ColumnLabels, ConfigOverrides, EnvelopeConfig,
    PageDimensions, RowRange,
};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Everything from the conf file
  xlsx2env --config env.conf

  # Conf file with the row range overridden
  xlsx2env --config env.conf --rows 5-40 guests.xlsx

  # No conf file at all: flags over built-in defaults
  xlsx2env guests.xlsx --sheet 1 --rows 2-20 --columns A,B,C,D -o batch.tex

  # Write batch.tex and compile batch.pdf
  xlsx2env --config env.conf -o batch.pdf

  # Inspect the LaTeX on stdout without writing anything
  xlsx2env --config env.conf --print

CONF FILE (six lines, fixed order):
  guests.xlsx            spreadsheet path
  2                      sheet number (1-based)
  [5, 129]               first and last data row (1-based, inclusive)
  ['B','E','F','G']      columns: name, street, city, country
  [5.25, 7.25, 1]        envelope height, width, margin in inches
  envelopes.pdf          output name (.pdf requests compilation)

Rows whose street cell is "?" are skipped: that marks a guest whose
address is intentionally blank in the list.

Run `xlsx2env --init-config` to write a starter env.conf.
"#;

/// Typeset mailing envelopes from a spreadsheet guest list.
#[derive(Parser, Debug)]
#[command(
    name = "xlsx2env",
    version,
    about = "Typeset mailing envelopes from a spreadsheet guest list",
    long_about = "Reads a range of rows from an .xlsx workbook, sanitises the address fields \
into LaTeX-safe markup, and writes a one-envelope-per-page .tex document sized to the \
physical envelope. Optionally compiles it to PDF with an external LaTeX compiler.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the guest-list workbook (overrides the conf file).
    input: Option<PathBuf>,

    /// Conf file to load (six-line format, see --help).
    #[arg(short, long, env = "XLSX2ENV_CONFIG")]
    config: Option<PathBuf>,

    /// Sheet number, 1-based.
    #[arg(long, env = "XLSX2ENV_SHEET")]
    sheet: Option<usize>,

    /// Data rows as START-END (1-based, inclusive), e.g. 5-129.
    #[arg(long, env = "XLSX2ENV_ROWS")]
    rows: Option<String>,

    /// Column letters for name,street,city,country, e.g. B,E,F,G.
    #[arg(long, env = "XLSX2ENV_COLUMNS")]
    columns: Option<String>,

    /// Envelope height,width,margin in inches, e.g. 5.25,7.25,1.
    #[arg(long, env = "XLSX2ENV_DIMS")]
    dims: Option<String>,

    /// Output name (overrides the conf file). A .pdf extension writes the
    /// .tex and compiles it.
    #[arg(short, long, env = "XLSX2ENV_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the LaTeX source to stdout instead of writing a file.
    #[arg(long)]
    print: bool,

    /// Compile the written .tex to PDF even when the output name is not .pdf.
    #[arg(long)]
    pdf: bool,

    /// LaTeX compiler to invoke for PDF output.
    #[arg(long, env = "XLSX2ENV_COMPILER", default_value = "pdflatex")]
    compiler: String,

    /// Leave the return-address block off the envelopes.
    #[arg(long)]
    no_return_address: bool,

    /// Leave the stamp placeholder box off the envelopes.
    #[arg(long)]
    no_stamp: bool,

    /// Print run statistics as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Write a starter env.conf to the working directory and exit.
    #[arg(long, exclusive = true)]
    init_config: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "XLSX2ENV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "XLSX2ENV_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Starter conf ─────────────────────────────────────────────────────
    if cli.init_config {
        let path = PathBuf::from("env.conf");
        std::fs::write(&path, EnvelopeConfig::default_conf_contents())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    // ── Resolve configuration: defaults < conf file < flags ──────────────
    let overrides = build_overrides(&cli)?;
    let config = EnvelopeConfig::resolve(cli.config.as_deref(), &overrides)
        .context("Invalid configuration")?;

    // ── Generate ─────────────────────────────────────────────────────────
    let output = generate(&config).context("Envelope generation failed")?;

    if cli.print {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.document.text().as_bytes())
            .context("Failed to write to stdout")?;
        handle.write_all(b"\n").ok();
    } else {
        let (tex_path, wants_pdf) = plan_output(&config, cli.pdf);
        write_document(&output.document, &tex_path)
            .with_context(|| format!("Failed to write {}", tex_path.display()))?;
        if wants_pdf {
            compile_pdf(&tex_path, &cli.compiler).context("PDF compilation failed")?;
        }
        if !cli.quiet {
            eprintln!(
                "{} envelopes → {}  ({} rows scanned, {} skipped)",
                output.stats.envelopes,
                tex_path.display(),
                output.stats.rows_scanned,
                output.stats.skipped,
            );
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output.stats).context("Failed to serialise stats")?
        );
    }

    Ok(())
}

/// Where the .tex goes, and whether a PDF compile follows.
///
/// A `.pdf` output name means "write the .tex next to it, then compile",
/// matching the conf-file convention.
fn plan_output(config: &EnvelopeConfig, force_pdf: bool) -> (PathBuf, bool) {
    let is_pdf_name = config
        .output
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf_name {
        (config.output.with_extension("tex"), true)
    } else {
        (config.output.clone(), force_pdf)
    }
}

/// Map CLI flags to a configuration overlay.
fn build_overrides(cli: &Cli) -> Result<ConfigOverrides> {
    let mut overrides = ConfigOverrides {
        source: cli.input.clone(),
        sheet: cli.sheet,
        output: cli.output.clone(),
        ..Default::default()
    };

    if let Some(ref s) = cli.rows {
        overrides.rows = Some(parse_rows(s)?);
    }
    if let Some(ref s) = cli.columns {
        overrides.columns = Some(parse_columns(s)?);
    }
    if let Some(ref s) = cli.dims {
        overrides.dims = Some(parse_dims(s)?);
    }
    if cli.no_return_address {
        overrides.include_return_address = Some(false);
    }
    if cli.no_stamp {
        overrides.include_stamp = Some(false);
    }

    Ok(overrides)
}

/// Parse `--rows` as `START-END` (also accepts `START,END`).
fn parse_rows(s: &str) -> Result<RowRange> {
    let (start, end) = s
        .split_once('-')
        .or_else(|| s.split_once(','))
        .with_context(|| format!("Invalid row range '{s}': expected START-END"))?;
    let start: usize = start.trim().parse().context("Invalid start row")?;
    let end: usize = end.trim().parse().context("Invalid end row")?;
    if start < 1 {
        anyhow::bail!("Rows are 1-indexed, minimum is 1 (got {start})");
    }
    if start > end {
        anyhow::bail!("Invalid row range '{start}-{end}': start must be <= end");
    }
    Ok(RowRange { start, end })
}

/// Parse `--columns` as four comma-separated letters.
fn parse_columns(s: &str) -> Result<ColumnLabels> {
    let letters: Vec<char> = s
        .split(',')
        .map(|item| {
            let item = item.trim();
            let mut chars = item.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Ok(c),
                _ => anyhow::bail!("Invalid column letter '{item}'"),
            }
        })
        .collect::<Result<_>>()?;
    let &[name, street, city, country] = letters.as_slice() else {
        anyhow::bail!(
            "Expected 4 column letters (name,street,city,country), got {}",
            letters.len()
        );
    };
    Ok(ColumnLabels {
        name,
        street,
        city,
        country,
    })
}

/// Parse `--dims` as three comma-separated inch values.
fn parse_dims(s: &str) -> Result<PageDimensions> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid dimension '{}'", v.trim()))
        })
        .collect::<Result<_>>()?;
    let &[height, width, margin] = values.as_slice() else {
        anyhow::bail!(
            "Expected 3 dimensions (height,width,margin), got {}",
            values.len()
        );
    };
    Ok(PageDimensions {
        height,
        width,
        margin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_dash_and_comma() {
        assert_eq!(parse_rows("5-129").unwrap(), RowRange { start: 5, end: 129 });
        assert_eq!(parse_rows("2,9").unwrap(), RowRange { start: 2, end: 9 });
        assert!(parse_rows("9-2").is_err());
        assert!(parse_rows("all").is_err());
    }

    #[test]
    fn test_parse_columns() {
        let c = parse_columns("B,E,F,G").unwrap();
        assert_eq!((c.name, c.street, c.city, c.country), ('B', 'E', 'F', 'G'));
        assert!(parse_columns("B,E,F").is_err());
        assert!(parse_columns("B,E,F,42").is_err());
    }

    #[test]
    fn test_parse_dims() {
        let d = parse_dims("5.25, 7.25, 1").unwrap();
        assert_eq!((d.height, d.width, d.margin), (5.25, 7.25, 1.0));
        assert!(parse_dims("5.25,7.25").is_err());
    }

    #[test]
    fn test_plan_output_pdf_name() {
        let mut config = EnvelopeConfig::default();
        config.output = PathBuf::from("batch.pdf");
        let (tex, pdf) = plan_output(&config, false);
        assert_eq!(tex, PathBuf::from("batch.tex"));
        assert!(pdf);
    }

    #[test]
    fn test_plan_output_tex_name() {
        let mut config = EnvelopeConfig::default();
        config.output = PathBuf::from("batch.tex");
        let (tex, pdf) = plan_output(&config, false);
        assert_eq!(tex, PathBuf::from("batch.tex"));
        assert!(!pdf);
    }
}
