//! Top-level entry points: configuration in, document out.
//!
//! [`generate`] owns one run end to end: validate the configuration, open
//! the workbook, extract the rows, synthesize the document. It returns the
//! assembled [`EnvelopeOutput`]; persisting the text and invoking a LaTeX
//! compiler are separate adapters ([`write_document`], [`compile_pdf`]) so
//! library callers that only want the string never touch the filesystem.

use crate::config::EnvelopeConfig;
use crate::error::EnvelopeError;
use crate::output::{Document, EnvelopeOutput, GenerationStats};
use crate::pipeline::columns::ColumnIndices;
use crate::pipeline::source::{TabularReader, XlsxReader};
use crate::pipeline::{extract, synthesize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Generate the envelope document from the workbook named in `config`.
///
/// # Errors
/// Fatal on an invalid configuration, an unopenable workbook, or an
/// out-of-range sheet. No partial document is ever returned.
pub fn generate(config: &EnvelopeConfig) -> Result<EnvelopeOutput, EnvelopeError> {
    config.validate()?;
    let mut reader = XlsxReader::open(&config.source)?;
    generate_with_reader(&mut reader, config)
}

/// Generate from an already-open [`TabularReader`].
///
/// This is the seam for tests and for callers whose guest list does not
/// live in an `.xlsx` file.
pub fn generate_with_reader(
    reader: &mut dyn TabularReader,
    config: &EnvelopeConfig,
) -> Result<EnvelopeOutput, EnvelopeError> {
    config.validate()?;
    info!(
        "Generating envelopes: sheet {}, rows {}-{}",
        config.sheet, config.rows.start, config.rows.end
    );

    let columns = ColumnIndices::from_labels(&config.columns);
    debug!("Column indices: {:?}", columns);

    // config.sheet is 1-based user-facing; readers are 0-based. A sheet
    // error coming back up is restated in the user's numbering.
    let extraction = extract::extract(
        reader,
        config.sheet - 1,
        (config.rows.start, config.rows.end),
        &columns,
    )
    .map_err(|e| match e {
        EnvelopeError::SheetOutOfRange { total, .. } => EnvelopeError::SheetOutOfRange {
            sheet: config.sheet,
            total,
        },
        other => other,
    })?;

    let document = synthesize::synthesize(
        &extraction.records,
        &config.dims,
        config.include_return_address,
        config.include_stamp,
    );

    let stats = GenerationStats {
        rows_scanned: extraction.rows_scanned,
        envelopes: extraction.records.len(),
        skipped: extraction.skipped,
    };
    info!(
        "Generated {} envelopes from {} rows ({} skipped)",
        stats.envelopes, stats.rows_scanned, stats.skipped
    );

    Ok(EnvelopeOutput { document, stats })
}

/// Generate and write the `.tex` file in one call.
pub fn generate_to_file(
    config: &EnvelopeConfig,
    path: impl AsRef<Path>,
) -> Result<GenerationStats, EnvelopeError> {
    let output = generate(config)?;
    write_document(&output.document, path)?;
    Ok(output.stats)
}

/// Write the document text to `path`.
///
/// Atomic write (temp file + rename) so a failed run never leaves a
/// truncated `.tex` behind.
pub fn write_document(document: &Document, path: impl AsRef<Path>) -> Result<(), EnvelopeError> {
    let path = path.as_ref();
    let write_failed = |source: std::io::Error| EnvelopeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
    }

    let tmp_path = path.with_extension("tex.tmp");
    std::fs::write(&tmp_path, document.text()).map_err(write_failed)?;
    std::fs::rename(&tmp_path, path).map_err(write_failed)?;

    info!("Wrote {}", path.display());
    Ok(())
}

/// Run the external LaTeX compiler against a written `.tex` file.
///
/// The compiler runs in the `.tex` file's directory so auxiliary files and
/// the resulting PDF land next to it. A missing binary and a non-zero exit
/// both surface as [`EnvelopeError::CompilerFailed`].
pub fn compile_pdf(tex_path: impl AsRef<Path>, compiler: &str) -> Result<(), EnvelopeError> {
    let tex_path = tex_path.as_ref();
    let failed = |detail: String| EnvelopeError::CompilerFailed {
        command: compiler.to_string(),
        detail,
    };

    let mut cmd = Command::new(compiler);
    cmd.arg("-interaction=nonstopmode").arg("-halt-on-error");
    if let Some(dir) = tex_path.parent() {
        if !dir.as_os_str().is_empty() {
            cmd.current_dir(dir);
        }
    }
    cmd.arg(tex_path.file_name().unwrap_or(tex_path.as_os_str()));

    info!("Compiling {} with {}", tex_path.display(), compiler);
    let output = cmd.output().map_err(|e| failed(e.to_string()))?;

    if !output.status.success() {
        // The interesting line in LaTeX output is the one starting with '!'.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = stdout
            .lines()
            .find(|l| l.starts_with('!'))
            .unwrap_or("see the compiler log")
            .to_string();
        return Err(failed(format!("{} ({detail})", output.status)));
    }

    info!("Compiled {}", tex_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::source::MemoryReader;

    fn rows(data: &[[&str; 4]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn config() -> EnvelopeConfig {
        EnvelopeConfig::builder()
            .sheet(1)
            .rows(1, 3)
            .columns('A', 'B', 'C', 'D')
            .dims(5.25, 7.25, 1.0)
            .build()
            .unwrap()
    }

    fn guests() -> MemoryReader {
        MemoryReader::single_sheet(rows(&[
            ["Jane Doe", "123 1st Ave", "Springfield", "USA"],
            ["John Roe", "?", "Nowhere", "USA"],
            ["Ann Lee", "45th Main St", "Lakeview", "Canada"],
        ]))
    }

    #[test]
    fn test_stats_account_for_skips() {
        let output = generate_with_reader(&mut guests(), &config()).unwrap();
        assert_eq!(output.stats.rows_scanned, 3);
        assert_eq!(output.stats.envelopes, 2);
        assert_eq!(output.stats.skipped, 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let mut config = config();
        config.rows.start = 0;
        let err = generate_with_reader(&mut guests(), &config).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidConfig(_)));
    }

    #[test]
    fn test_sheet_conversion_is_one_based() {
        let mut config = config();
        config.sheet = 2; // MemoryReader has a single sheet at index 0
        let err = generate_with_reader(&mut guests(), &config).unwrap_err();
        // The error reports the sheet number the user asked for, not the
        // 0-based reader index.
        assert!(matches!(
            err,
            EnvelopeError::SheetOutOfRange { sheet: 2, total: 1 }
        ));
    }

    #[test]
    fn test_generate_missing_workbook() {
        let mut config = config();
        config.source = "/no/such/guests.xlsx".into();
        let err = generate(&config).unwrap_err();
        assert!(matches!(err, EnvelopeError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_write_document_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("envelopes.tex");
        let output = generate_with_reader(&mut guests(), &config()).unwrap();
        write_document(&output.document, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, output.document.text());
        // No temp file left behind.
        assert!(!path.with_extension("tex.tmp").exists());
    }

    #[test]
    fn test_compile_pdf_missing_compiler() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.tex");
        std::fs::write(&path, "\\documentclass{article}").unwrap();
        let err = compile_pdf(&path, "definitely-not-a-latex-compiler").unwrap_err();
        assert!(matches!(err, EnvelopeError::CompilerFailed { .. }));
    }
}
