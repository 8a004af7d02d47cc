use std::path::PathBuf;

use m720_cli::source::DeclarationFormat;

#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub from: DeclarationFormat,
    pub to: DeclarationFormat,
    pub details: usize,
}
