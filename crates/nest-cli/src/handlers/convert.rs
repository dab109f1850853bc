//! Convert command handler.
//!
//! Reads a JSON list of records, groups it by the given nesting levels and
//! writes the tree. The whole input is read and the whole tree is built
//! before anything is written.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use nest_core::{ExportOptions, NestingLevels, RecordsToTreeConverter, validate_settings};

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Arguments of the convert command.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub levels: Vec<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub render: bool,
    pub indent: Option<usize>,
}

/// Execute the convert command against stdin/stdout or the given files.
pub fn execute(config: &CliConfig, args: ConvertArgs) -> Result<(), CliError> {
    let levels = NestingLevels::new(args.levels)?;
    let mut settings = config.settings().clone();
    if args.indent.is_some() {
        settings.export_indent = args.indent;
    }
    validate_settings(&settings)?;
    let options = settings.export_options();

    let output = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| CliError::Io(format!("cannot open {}: {e}", path.display())))?;
            run(levels, options, args.render, file)?
        }
        None => run(levels, options, args.render, io::stdin().lock())?,
    };

    // The output file is only created once the conversion has succeeded.
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| CliError::Io(format!("cannot create {}: {e}", path.display())))?;
            write_output(BufWriter::new(file), &output)
        }
        None => write_output(io::stdout().lock(), &output),
    }
}

/// Convert everything readable from `reader` into the text to write:
/// indented JSON with a trailing newline, or the rendered tree.
pub fn run<R: Read>(
    levels: NestingLevels,
    options: ExportOptions,
    render: bool,
    mut reader: R,
) -> Result<String, CliError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    tracing::debug!(target: "nest.cli", bytes = input.len(), levels = %levels, "Input read");

    let mut converter = RecordsToTreeConverter::with_options(levels, options);
    converter.create_tree(&input)?;

    if render {
        Ok(converter.render_tree()?)
    } else {
        let mut json = converter.export_json()?;
        json.push('\n');
        Ok(json)
    }
}

fn write_output<W: Write>(mut writer: W, output: &str) -> Result<(), CliError> {
    writer.write_all(output.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> NestingLevels {
        NestingLevels::new(["currency", "country"]).unwrap()
    }

    #[test]
    fn test_run_writes_json() {
        let input = br#"[{"currency": "EUR", "country": "FR", "amount": 1}]"#;
        let text = run(levels(), ExportOptions::default(), false, &input[..]).unwrap();

        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["EUR"]["FR"][0]["amount"], 1);
    }

    #[test]
    fn test_run_renders_text() {
        let input = br#"[{"currency": "EUR", "country": "FR"}]"#;
        let text = run(levels(), ExportOptions::default(), true, &input[..]).unwrap();

        assert_eq!(
            text,
            "Node('/root')\n└── Node('/root/EUR')\n    └── Node('/root/EUR/FR', values=[{}])\n"
        );
    }

    #[test]
    fn test_run_reports_missing_attributes() {
        let input = br#"[{"currency": "EUR"}]"#;

        let err = run(levels(), ExportOptions::default(), false, &input[..]).unwrap_err();

        assert!(matches!(err, CliError::BadlyFormed(_)));
    }

    #[test]
    fn test_write_output_flushes_text() {
        let mut out = Vec::new();
        write_output(&mut out, "tree\n").unwrap();
        assert_eq!(out, b"tree\n");
    }

    #[test]
    fn test_execute_rejects_empty_levels() {
        let config = CliConfig::from_settings(nest_core::Settings::default()).unwrap();
        let err = execute(&config, ConvertArgs::default()).unwrap_err();
        assert!(matches!(err, CliError::Arguments(_)));
    }

    #[test]
    fn test_execute_rejects_oversized_indent() {
        let config = CliConfig::from_settings(nest_core::Settings::default()).unwrap();
        let args = ConvertArgs {
            levels: vec!["currency".into()],
            indent: Some(64),
            ..ConvertArgs::default()
        };
        let err = execute(&config, args).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }
}
