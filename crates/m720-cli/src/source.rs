//! Reading, checking and writing declarations in either file format.

use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::Serialize;

use m720_csv::{CsvError, read_csv, write_csv};
use m720_fixed::{
    FixedWidthOptions, read_fixed_width_with_options, write_fixed_width_with_options,
};
use m720_model::Declaration;

/// On-disk representation of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationFormat {
    /// 500-column lines, the filing format.
    Fixed,
    /// Header and detail sections in one CSV file.
    Csv,
    /// The declaration as written by `m720 export`.
    Json,
}

impl DeclarationFormat {
    /// `.720` and `.txt` are fixed-width, `.csv` is CSV, `.json` is JSON.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "720" | "txt" => Some(Self::Fixed),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// An explicit choice wins over the extension.
    pub fn resolve(path: &Path, explicit: Option<Self>) -> Result<Self> {
        explicit
            .or_else(|| Self::from_extension(path))
            .ok_or_else(|| {
                anyhow!(
                    "cannot infer the format of {}; pass --format fixed|csv|json",
                    path.display()
                )
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fixed => "fixed-width",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for DeclarationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-width options for an encoding label such as `latin9` or `utf-8`.
pub fn encoding_options(label: &str) -> Result<FixedWidthOptions> {
    FixedWidthOptions::from_label(label).ok_or_else(|| anyhow!("unknown encoding '{label}'"))
}

/// Read a declaration. CSV input must also pass validation.
pub fn load(
    path: &Path,
    format: DeclarationFormat,
    options: FixedWidthOptions,
) -> Result<Declaration> {
    let declaration = match format {
        DeclarationFormat::Fixed => read_fixed_width_with_options(path, options)
            .with_context(|| format!("read fixed-width file {}", path.display()))?,
        DeclarationFormat::Csv => {
            read_csv(path).with_context(|| format!("read CSV file {}", path.display()))?
        }
        DeclarationFormat::Json => read_json(path)?,
    };
    tracing::info!(
        path = %path.display(),
        %format,
        details = declaration.detalles.len(),
        "read declaration"
    );
    Ok(declaration)
}

/// Write a declaration in the given format.
pub fn store(
    path: &Path,
    format: DeclarationFormat,
    options: FixedWidthOptions,
    declaration: &Declaration,
) -> Result<()> {
    match format {
        DeclarationFormat::Fixed => write_fixed_width_with_options(path, declaration, options)
            .with_context(|| format!("write fixed-width file {}", path.display()))?,
        DeclarationFormat::Csv => write_csv(path, declaration)
            .with_context(|| format!("write CSV file {}", path.display()))?,
        DeclarationFormat::Json => {
            let json = to_json(declaration, true)?;
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write JSON file {}", path.display()))?;
        }
    }
    tracing::info!(
        path = %path.display(),
        %format,
        details = declaration.detalles.len(),
        "wrote declaration"
    );
    Ok(())
}

/// Result of validating one file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub path: PathBuf,
    pub format: DeclarationFormat,
    /// Detail count, when the file decoded.
    pub details: Option<usize>,
    pub violations: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Decode and validate a file, collecting violations instead of failing on
/// them. Decoding errors are still errors.
pub fn check(
    path: &Path,
    format: DeclarationFormat,
    options: FixedWidthOptions,
) -> Result<ValidationOutcome> {
    let (details, violations) = match format {
        DeclarationFormat::Fixed | DeclarationFormat::Json => {
            let declaration = load(path, format, options)?;
            let violations = m720_validate::validate(&declaration);
            (Some(declaration.detalles.len()), violations)
        }
        DeclarationFormat::Csv => match read_csv(path) {
            Ok(declaration) => (Some(declaration.detalles.len()), Vec::new()),
            Err(CsvError::Validation(error)) => (None, error.violations),
            Err(error) => {
                return Err(error).with_context(|| format!("read CSV file {}", path.display()));
            }
        },
    };
    tracing::info!(
        path = %path.display(),
        violations = violations.len(),
        "checked declaration"
    );
    Ok(ValidationOutcome {
        path: path.to_path_buf(),
        format,
        details,
        violations,
    })
}

/// Deserialize a declaration, with blank optional text read as absent.
fn read_json(path: &Path) -> Result<Declaration> {
    let file = File::open(path).with_context(|| format!("open JSON file {}", path.display()))?;
    let mut declaration: Declaration = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse JSON file {}", path.display()))?;
    declaration.normalize();
    Ok(declaration)
}

/// Serialize a declaration as JSON.
pub fn to_json(declaration: &Declaration, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(declaration)
    } else {
        serde_json::to_string(declaration)
    };
    json.context("serialize declaration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(
            DeclarationFormat::from_extension(Path::new("2024.720")),
            Some(DeclarationFormat::Fixed)
        );
        assert_eq!(
            DeclarationFormat::from_extension(Path::new("out/Decl.CSV")),
            Some(DeclarationFormat::Csv)
        );
        assert_eq!(
            DeclarationFormat::from_extension(Path::new("export.json")),
            Some(DeclarationFormat::Json)
        );
        assert_eq!(DeclarationFormat::from_extension(Path::new("notes")), None);
    }

    #[test]
    fn test_resolve_prefers_explicit() {
        let path = Path::new("export.dat");
        assert!(DeclarationFormat::resolve(path, None).is_err());
        assert_eq!(
            DeclarationFormat::resolve(path, Some(DeclarationFormat::Csv)).expect("explicit"),
            DeclarationFormat::Csv
        );
        assert_eq!(
            DeclarationFormat::resolve(Path::new("a.csv"), Some(DeclarationFormat::Fixed))
                .expect("explicit"),
            DeclarationFormat::Fixed
        );
    }

    #[test]
    fn test_encoding_options() {
        assert_eq!(encoding_options("utf-8").expect("utf-8").encoding.name(), "UTF-8");
        assert_eq!(
            encoding_options("latin9").expect("latin9").encoding.name(),
            "ISO-8859-15"
        );
        let err = encoding_options("klingon").expect_err("unknown");
        assert_eq!(err.to_string(), "unknown encoding 'klingon'");
    }
}
