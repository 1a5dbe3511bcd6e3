//! swagger-ir CLI
//!
//! Command-line interface for converting Swagger 2.0 documents into the
//! service IR.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use swagger_ir_common::{Service, TypeDescriptor};
use swagger_ir_parser::{Oas2Parser, ParseOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-ir")]
#[command(version, about = "Convert Swagger 2.0 documents into a service IR", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Swagger document and display the extracted service
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a document\n  \
        swagger-ir parse --spec petstore.json\n\n  \
        # Write the IR next to it\n  \
        swagger-ir parse --spec petstore.yaml --output petstore.ir.json\n\n  \
        # Print the IR to stdout\n  \
        swagger-ir parse --spec petstore.json --json")]
    Parse {
        /// Path to the Swagger document
        #[arg(short, long)]
        spec: PathBuf,

        /// Document format (auto-detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<InputFormat>,

        /// Write the IR as pretty-printed JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum schema nesting depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the IR as JSON to stdout instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Yaml,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "JSON"),
            InputFormat::Yaml => write!(f, "YAML"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            spec,
            format,
            output,
            max_depth,
            json,
        } => {
            parse_command(ParseConfig {
                spec_path: spec.as_path(),
                format,
                output: output.as_deref(),
                max_depth,
                json,
                verbose: cli.verbose,
            })?;
        }
    }

    Ok(())
}

/// Logs go to stderr so `--json` output stays clean
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

struct ParseConfig<'a> {
    spec_path: &'a Path,
    format: Option<InputFormat>,
    output: Option<&'a Path>,
    max_depth: Option<usize>,
    json: bool,
    verbose: bool,
}

fn parse_command(config: ParseConfig<'_>) -> Result<()> {
    let ParseConfig {
        spec_path,
        format,
        output,
        max_depth,
        json,
        verbose,
    } = config;

    // Progress lines would corrupt the JSON on stdout
    let report = !json;

    if report {
        println!("{} Parsing spec file: {}", "→".cyan(), spec_path.display());
    }

    let detected_format = format.unwrap_or_else(|| {
        let detected = detect_format(spec_path);
        if report {
            println!(
                "{} Auto-detected format: {}",
                "→".cyan(),
                detected.to_string().yellow()
            );
        }
        detected
    });

    let content = fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read {}", spec_path.display()))?;

    let parser = match detected_format {
        InputFormat::Json => Oas2Parser::from_json(&content),
        InputFormat::Yaml => Oas2Parser::from_yaml(&content),
    }
    .context("Failed to load Swagger document")?;

    let mut options = ParseOptions::default();
    if let Some(max_depth) = max_depth {
        options.max_depth = max_depth;
    }
    let parser = parser.with_options(options);
    tracing::debug!(format = %detected_format, options = ?parser.options(), "loaded document");

    let service = parser.parse().context("Failed to parse Swagger document")?;

    if let Some(output) = output {
        let rendered =
            serde_json::to_string_pretty(&service).context("Failed to serialize service IR")?;
        fs::write(output, rendered)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if report {
            println!("{} Wrote IR to {}", "✓".green(), output.display());
        }
    }

    if json {
        let rendered =
            serde_json::to_string_pretty(&service).context("Failed to serialize service IR")?;
        println!("{}", rendered);
        return Ok(());
    }

    print_summary(&service, verbose);
    Ok(())
}

fn print_summary(service: &Service, verbose: bool) {
    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Service:".bold());
    println!("  Title: {}", service.title.yellow());
    println!("  Major version: {}", service.major_version.to_string().yellow());
    println!("  Interfaces: {}", service.interfaces.len());
    println!("  Types: {}", service.types.len());
    println!("  Enums: {}", service.enums.len());

    if !verbose {
        return;
    }

    println!("\n{}", "Interfaces:".bold());
    for interface in &service.interfaces {
        println!("  • {}", interface.name.cyan());
        for path in &interface.protocols.http {
            for method in &path.methods {
                println!(
                    "    {} {} {} ({})",
                    method.verb.to_string().to_uppercase(),
                    path.path,
                    method.name,
                    method.success_code
                );
            }
        }
    }

    if !service.types.is_empty() {
        println!("\n{}", "Types:".bold());
        for ty in &service.types {
            println!("  • {}", ty.name.cyan());
            for property in &ty.properties {
                println!("    {}: {}", property.name, render_type(&property.ty));
            }
        }
    }

    if !service.enums.is_empty() {
        println!("\n{}", "Enums:".bold());
        for value in &service.enums {
            println!("  • {} [{}]", value.name.cyan(), value.values.join(", "));
        }
    }
}

/// `widget[]`, `string?`
fn render_type(ty: &TypeDescriptor) -> String {
    let mut rendered = ty.type_name.clone();
    if ty.is_array {
        rendered.push_str("[]");
    }
    if !ty.is_required() {
        rendered.push('?');
    }
    rendered
}

/// Detect document format from the file extension
fn detect_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => InputFormat::Yaml,
        _ => InputFormat::Json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("api.yaml")), InputFormat::Yaml);
        assert_eq!(detect_format(Path::new("api.yml")), InputFormat::Yaml);
        assert_eq!(detect_format(Path::new("api.json")), InputFormat::Json);
        assert_eq!(detect_format(Path::new("swagger")), InputFormat::Json);
    }

    #[test]
    fn test_render_type() {
        assert_eq!(
            render_type(&TypeDescriptor::local("widget", vec![]).into_required(true)),
            "widget"
        );

        let mut array = TypeDescriptor::primitive("string", vec![]);
        array.is_array = true;
        assert_eq!(render_type(&array), "string[]?");
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "swagger-ir",
            "parse",
            "--spec",
            "api.yaml",
            "--max-depth",
            "12",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse {
                spec,
                max_depth,
                json,
                format,
                output,
            } => {
                assert_eq!(spec, PathBuf::from("api.yaml"));
                assert_eq!(max_depth, Some(12));
                assert!(json);
                assert!(format.is_none());
                assert!(output.is_none());
            }
        }
    }
}
