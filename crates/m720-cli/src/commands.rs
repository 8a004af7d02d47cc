use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info_span;

use m720_cli::source::{
    DeclarationFormat, ValidationOutcome, check, encoding_options, load, store, to_json,
};
use m720_model::Declaration;

use crate::cli::{ConvertArgs, ExportArgs, InputArgs, ValidateArgs};
use crate::types::ConvertResult;

pub fn run_show(args: &InputArgs) -> Result<Declaration> {
    let _span = info_span!("show", input = %args.input.display()).entered();
    read_input(args)
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationOutcome> {
    let input = &args.input;
    let _span = info_span!("validate", input = %input.input.display()).entered();
    let format = DeclarationFormat::resolve(&input.input, input.format)?;
    let options = encoding_options(&input.encoding)?;
    check(&input.input, format, options)
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let input = &args.input;
    let _span = info_span!(
        "convert",
        input = %input.input.display(),
        output = %args.output.display()
    )
    .entered();
    let from = DeclarationFormat::resolve(&input.input, input.format)?;
    let to = DeclarationFormat::resolve(&args.output, args.to)?;
    let output_options = encoding_options(
        args.output_encoding
            .as_deref()
            .unwrap_or(input.encoding.as_str()),
    )?;

    let declaration = read_input(input)?;
    store(&args.output, to, output_options, &declaration)?;
    Ok(ConvertResult {
        input: input.input.clone(),
        output: args.output.clone(),
        from,
        to,
        details: declaration.detalles.len(),
    })
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let _span = info_span!("export", input = %args.input.input.display()).entered();
    let declaration = read_input(&args.input)?;
    let json = to_json(&declaration, !args.compact)?;
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write JSON file {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote JSON export");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("write JSON to stdout")?;
        }
    }
    Ok(())
}

fn read_input(args: &InputArgs) -> Result<Declaration> {
    let format = DeclarationFormat::resolve(&args.input, args.format)?;
    let options = encoding_options(&args.encoding)?;
    load(&args.input, format, options)
}
