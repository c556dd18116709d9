//! Documentation generation command
//!
//! Loads a JSON program tree, runs the documentation pass and writes the
//! document to a file or stdout.

use anyhow::{bail, Context, Result};
use quill::config::CONFIG_FILE_NAME;
use quill::{DocPrinter, OutputFormat, QuillBuilder, QuillConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

const USAGE: &str = "\
Usage: quill <tree.json> [options]

Options:
  -o, --output <FILE>     Write the document to FILE instead of stdout
  -f, --format <FORMAT>   Output format: xml or json
  -c, --config <FILE>     Configuration file (default: ./quill.toml if present)
  -l, --list              List documented entries on the terminal
  -h, --help              Show this help";

/// Run the generate command with the given arguments
pub fn run(args: &[String]) -> Result<()> {
    let cmd = GenerateCommand::parse(args)?;
    if cmd.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let Some(ref input) = cmd.input else {
        bail!("missing input tree\n\n{}", USAGE);
    };

    let config = cmd.load_config()?;
    debug!(format = %config.format, root = %config.root_element, "quill.cli config");

    let output = QuillBuilder::from_config(config)
        .build_file(input)
        .with_context(|| format!("Failed to document {}", input.display()))?;

    output.diagnostics.print();
    output.diagnostics.print_summary();

    if cmd.list {
        DocPrinter::new(&output.entries, true).print_to_stdout();
    }

    match cmd.output {
        Some(ref path) => {
            output
                .write_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Documented {} entries into {}",
                output.entry_count(),
                path.display()
            );
        }
        None if !cmd.list => print!("{}", output.document),
        None => {}
    }

    Ok(())
}

/// Generate command configuration
#[derive(Debug, Default, PartialEq)]
struct GenerateCommand {
    /// Program tree (JSON)
    input: Option<PathBuf>,
    /// Output file, stdout when absent
    output: Option<PathBuf>,
    /// Format override
    format: Option<OutputFormat>,
    /// Explicit configuration file
    config: Option<PathBuf>,
    /// Print a terminal listing
    list: bool,
    help: bool,
}

impl GenerateCommand {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cmd = GenerateCommand::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    if i + 1 < args.len() {
                        cmd.output = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--output requires a value");
                    }
                }
                "--format" | "-f" => {
                    if i + 1 < args.len() {
                        cmd.format = Some(args[i + 1].parse()?);
                        i += 2;
                    } else {
                        bail!("--format requires a value (xml or json)");
                    }
                }
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        cmd.config = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--config requires a value");
                    }
                }
                "--list" | "-l" => {
                    cmd.list = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    cmd.help = true;
                    i += 1;
                }
                arg if !arg.starts_with('-') => {
                    if cmd.input.is_some() {
                        bail!("Unexpected argument: {}", arg);
                    }
                    cmd.input = Some(PathBuf::from(arg));
                    i += 1;
                }
                _ => {
                    bail!("Unknown flag: {}", args[i]);
                }
            }
        }

        Ok(cmd)
    }

    /// Explicit config file, else `quill.toml` in the working directory,
    /// with `--format` applied on top
    fn load_config(&self) -> Result<QuillConfig> {
        let mut config = match self.config {
            Some(ref path) => QuillConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => QuillConfig::discover(Path::new("."))
                .with_context(|| format!("Failed to load {}", CONFIG_FILE_NAME))?,
        };
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const TREE: &str = r#"{
        "body": [
            { "kind": "docComment", "text": "/** @summary Adds. @param a First */", "span": { "start": 0, "end": 36 } },
            { "kind": "method", "name": "add", "span": { "start": 37, "end": 60 },
              "params": [{ "name": "a", "typeAnnotation": { "shape": "identifier", "name": "int" } }] }
        ]
    }"#;

    #[test]
    fn test_parse_args() {
        let cmd = GenerateCommand::parse(&args(&[
            "tree.json", "-o", "out.xml", "--format", "json", "--list",
        ]))
        .unwrap();

        assert_eq!(cmd.input, Some(PathBuf::from("tree.json")));
        assert_eq!(cmd.output, Some(PathBuf::from("out.xml")));
        assert_eq!(cmd.format, Some(OutputFormat::Json));
        assert!(cmd.list);
        assert!(!cmd.help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(GenerateCommand::parse(&args(&["--output"])).is_err());
        assert!(GenerateCommand::parse(&args(&["--format", "yaml"])).is_err());
        assert!(GenerateCommand::parse(&args(&["--bogus"])).is_err());
        assert!(GenerateCommand::parse(&args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_missing_input() {
        let err = run(&[]).unwrap_err();
        assert!(err.to_string().contains("missing input"));
    }

    #[test]
    fn test_run_writes_document() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("tree.json");
        let config = dir.path().join("custom.toml");
        let out = dir.path().join("docs.json");
        std::fs::write(&tree, TREE).unwrap();
        std::fs::write(&config, "format = \"xml\"\nroot_element = \"api\"").unwrap();

        run(&args(&[
            tree.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json[0]["fqn"], "add");
        assert_eq!(json[0]["tags"]["summary"], "Adds.");
    }

    #[test]
    fn test_run_with_missing_tree() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("quill.toml");
        std::fs::write(&config, "").unwrap();

        let err = run(&args(&[
            dir.path().join("absent.json").to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("Failed to document"));
    }
}
