//! Configuration for one envelope-generation run.
//!
//! A run is fully described by [`EnvelopeConfig`]: where the guest list
//! lives, which sheet and rows hold the data, which columns map to the four
//! address fields, the physical envelope size, and the output name. Keeping
//! every knob in one plain struct makes a run reproducible from its logged
//! configuration alone.
//!
//! Three layers can contribute values, merged in a fixed precedence:
//! explicit overrides (CLI flags) > conf file > built-in defaults. The conf
//! file is the original six-line format; overrides arrive as a typed
//! [`ConfigOverrides`] rather than ad-hoc token parsing, so precedence is
//! deterministic and testable.

use crate::error::EnvelopeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inclusive 1-based row range within the selected sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Spreadsheet column letters for the four address fields (`A`–`Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLabels {
    pub name: char,
    pub street: char,
    pub city: char,
    pub country: char,
}

impl ColumnLabels {
    fn letters(&self) -> [char; 4] {
        [self.name, self.street, self.city, self.country]
    }
}

/// Physical envelope dimensions, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub height: f64,
    pub width: f64,
    pub margin: f64,
}

/// Everything one generation run needs to know.
///
/// Built via [`EnvelopeConfig::builder()`], parsed from a conf file with
/// [`EnvelopeConfig::from_conf_file`], or assembled from all three layers
/// with [`EnvelopeConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Path to the workbook holding the guest list.
    pub source: PathBuf,
    /// Sheet number as shown in the spreadsheet UI (1-based).
    pub sheet: usize,
    /// Rows holding guest data, 1-based inclusive.
    pub rows: RowRange,
    /// Column letters for name, street, city, country.
    pub columns: ColumnLabels,
    /// Envelope height, width, margin in inches.
    pub dims: PageDimensions,
    /// Output name; a `.pdf` extension additionally requests compilation.
    pub output: PathBuf,
    /// Typeset the fixed sender block in the top-left corner.
    pub include_return_address: bool,
    /// Typeset the stamp placeholder box in the top-right corner.
    pub include_stamp: bool,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("guests.xlsx"),
            sheet: 2,
            rows: RowRange { start: 5, end: 129 },
            columns: ColumnLabels {
                name: 'B',
                street: 'E',
                city: 'F',
                country: 'G',
            },
            dims: PageDimensions {
                height: 5.25,
                width: 7.25,
                margin: 1.0,
            },
            output: PathBuf::from("envelopes.pdf"),
            include_return_address: true,
            include_stamp: true,
        }
    }
}

impl EnvelopeConfig {
    /// Create a new builder seeded with the defaults.
    pub fn builder() -> EnvelopeConfigBuilder {
        EnvelopeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Structural validation. Every entry point into the pipeline calls this
    /// before any I/O happens, so a malformed run aborts producing nothing.
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if self.sheet == 0 {
            return Err(EnvelopeError::InvalidConfig(
                "sheet number is 1-based; got 0".into(),
            ));
        }
        if self.rows.start == 0 {
            return Err(EnvelopeError::InvalidConfig(
                "row numbers are 1-based; range must start at 1 or later".into(),
            ));
        }
        if self.rows.is_empty() {
            return Err(EnvelopeError::InvalidConfig(format!(
                "row range [{},{}] is inverted",
                self.rows.start, self.rows.end
            )));
        }
        for letter in self.columns.letters() {
            if !letter.is_ascii_alphabetic() {
                return Err(EnvelopeError::InvalidConfig(format!(
                    "column label '{letter}' is not a letter A-Z"
                )));
            }
        }
        let d = &self.dims;
        for (label, v) in [("height", d.height), ("width", d.width), ("margin", d.margin)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(EnvelopeError::InvalidConfig(format!(
                    "envelope {label} must be a positive number of inches, got {v}"
                )));
            }
        }
        if self.output.as_os_str().is_empty() {
            return Err(EnvelopeError::InvalidConfig("output name is empty".into()));
        }
        Ok(())
    }

    /// Parse the six-line conf format:
    ///
    /// ```text
    /// guests.xlsx
    /// 2
    /// [5, 129]
    /// ['B','E','F','G']
    /// [5.25, 7.25, 1]
    /// envelopes.pdf
    /// ```
    pub fn from_conf_file(path: impl AsRef<Path>) -> Result<Self, EnvelopeError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| EnvelopeError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Using configuration file {}", path.display());
        Self::from_conf_str(&text)
    }

    /// Parse conf-file contents. Separated from the file read for tests.
    pub fn from_conf_str(text: &str) -> Result<Self, EnvelopeError> {
        let lines: Vec<&str> = text.lines().collect();
        let line = |n: usize| -> Result<&str, EnvelopeError> {
            lines
                .get(n - 1)
                .map(|l| l.trim())
                .ok_or(EnvelopeError::ConfigMalformed {
                    line: n,
                    detail: "missing line (conf files have 6 lines)".into(),
                })
        };

        let source = line(1)?;
        if source.is_empty() {
            return Err(EnvelopeError::ConfigMalformed {
                line: 1,
                detail: "expected a spreadsheet path".into(),
            });
        }

        let sheet: usize = line(2)?
            .parse()
            .map_err(|_| EnvelopeError::ConfigMalformed {
                line: 2,
                detail: format!("expected a sheet number, got '{}'", lines[1].trim()),
            })?;

        let rows = bracket_items(line(3)?, 3, 2, "[start,end]")?;
        let rows = RowRange {
            start: parse_num(&rows[0], 3)?,
            end: parse_num(&rows[1], 3)?,
        };

        let cols = bracket_items(line(4)?, 4, 4, "[name,street,city,country] column letters")?;
        let letter = |s: &str| -> Result<char, EnvelopeError> {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(EnvelopeError::ConfigMalformed {
                    line: 4,
                    detail: format!("expected a single column letter, got '{s}'"),
                }),
            }
        };
        let columns = ColumnLabels {
            name: letter(&cols[0])?,
            street: letter(&cols[1])?,
            city: letter(&cols[2])?,
            country: letter(&cols[3])?,
        };

        let dims = bracket_items(line(5)?, 5, 3, "[height,width,margin]")?;
        let dims = PageDimensions {
            height: parse_num(&dims[0], 5)?,
            width: parse_num(&dims[1], 5)?,
            margin: parse_num(&dims[2], 5)?,
        };

        let output = line(6)?;
        if output.is_empty() {
            return Err(EnvelopeError::ConfigMalformed {
                line: 6,
                detail: "expected an output name".into(),
            });
        }

        let config = Self {
            source: PathBuf::from(source),
            sheet,
            rows,
            columns,
            dims,
            output: PathBuf::from(output),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// The default conf-file contents, for seeding a fresh working directory.
    pub fn default_conf_contents() -> String {
        let d = Self::default();
        format!(
            "{}\n{}\n[{}, {}]\n['{}','{}','{}','{}']\n[{}, {}, {}]\n{}\n",
            d.source.display(),
            d.sheet,
            d.rows.start,
            d.rows.end,
            d.columns.name,
            d.columns.street,
            d.columns.city,
            d.columns.country,
            d.dims.height,
            d.dims.width,
            d.dims.margin,
            d.output.display(),
        )
    }

    /// Assemble a configuration from all three layers: built-in defaults,
    /// then the conf file (when given), then explicit overrides.
    pub fn resolve(
        conf_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, EnvelopeError> {
        let mut config = match conf_file {
            Some(path) => Self::from_conf_file(path)?,
            None => Self::default(),
        };
        overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// Split a `[a, b, c]` line into its items, stripping optional quotes.
///
/// `expected` is the required arity; `shape` describes the line for the
/// error message.
fn bracket_items(
    line: &str,
    conf_line: usize,
    expected: usize,
    shape: &str,
) -> Result<Vec<String>, EnvelopeError> {
    let malformed = |detail: String| EnvelopeError::ConfigMalformed {
        line: conf_line,
        detail,
    };

    let inner = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed(format!("expected {shape}, got '{line}'")))?;

    let items: Vec<String> = inner
        .split(',')
        .map(|item| {
            item.trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .to_string()
        })
        .collect();

    if items.len() != expected {
        return Err(malformed(format!(
            "expected {shape} ({expected} items), got {}",
            items.len()
        )));
    }
    Ok(items)
}

/// Parse one numeric item of a bracket list.
fn parse_num<T: std::str::FromStr>(s: &str, conf_line: usize) -> Result<T, EnvelopeError> {
    s.parse().map_err(|_| EnvelopeError::ConfigMalformed {
        line: conf_line,
        detail: format!("expected a number, got '{s}'"),
    })
}

/// Builder for [`EnvelopeConfig`].
#[derive(Debug)]
pub struct EnvelopeConfigBuilder {
    config: EnvelopeConfig,
}

impl EnvelopeConfigBuilder {
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source = path.into();
        self
    }

    /// Sheet number, 1-based as shown in the spreadsheet UI.
    pub fn sheet(mut self, sheet: usize) -> Self {
        self.config.sheet = sheet;
        self
    }

    /// Inclusive 1-based row range.
    pub fn rows(mut self, start: usize, end: usize) -> Self {
        self.config.rows = RowRange { start, end };
        self
    }

    /// Column letters for name, street, city, country.
    pub fn columns(mut self, name: char, street: char, city: char, country: char) -> Self {
        self.config.columns = ColumnLabels {
            name,
            street,
            city,
            country,
        };
        self
    }

    /// Envelope height, width, margin in inches.
    pub fn dims(mut self, height: f64, width: f64, margin: f64) -> Self {
        self.config.dims = PageDimensions {
            height,
            width,
            margin,
        };
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn include_return_address(mut self, v: bool) -> Self {
        self.config.include_return_address = v;
        self
    }

    pub fn include_stamp(mut self, v: bool) -> Self {
        self.config.include_stamp = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<EnvelopeConfig, EnvelopeError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// A partial configuration layered on top of a base.
///
/// Each `Some` field replaces the base value; `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub source: Option<PathBuf>,
    pub sheet: Option<usize>,
    pub rows: Option<RowRange>,
    pub columns: Option<ColumnLabels>,
    pub dims: Option<PageDimensions>,
    pub output: Option<PathBuf>,
    pub include_return_address: Option<bool>,
    pub include_stamp: Option<bool>,
}

impl ConfigOverrides {
    /// Overlay onto `config`. The result is re-validated by the caller
    /// ([`EnvelopeConfig::resolve`]), not here.
    pub fn apply(&self, config: &mut EnvelopeConfig) {
        if let Some(ref source) = self.source {
            config.source = source.clone();
        }
        if let Some(sheet) = self.sheet {
            config.sheet = sheet;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(dims) = self.dims {
            config.dims = dims;
        }
        if let Some(ref output) = self.output {
            config.output = output.clone();
        }
        if let Some(v) = self.include_return_address {
            config.include_return_address = v;
        }
        if let Some(v) = self.include_stamp {
            config.include_stamp = v;
        }
    }
}
