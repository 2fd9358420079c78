//! nbconf CLI - notebook configuration export tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use nbconf::{
    detect_format_from_path, parse_file, render, CellKind, ExportFormat, ExtractOptions,
    LocateOptions, Nbconf, SectionWalker, TomlOptions, DEFAULT_SPLIT_HEADER_KEY,
};

#[derive(Parser)]
#[command(name = "nbconf")]
#[command(version)]
#[command(about = "Export notebook configuration sections to YAML and TOML", long_about = None)]
struct Cli {
    /// Input notebook (exported to YAML)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Input notebook (located from the environment if omitted)
    #[arg(short, long, value_name = "FILE", env = "NBCONF_INPUT")]
    input: Option<PathBuf>,

    /// Markdown heading level that opens a section
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u8).range(1..=6))]
    heading_level: u8,

    /// Keep IPython magic (%) and shell (!) lines
    #[arg(long)]
    keep_magics: bool,

    /// Directive token scanned for in the history file
    #[arg(long, default_value = "%notebook")]
    directive: String,
}

impl SourceArgs {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .with_heading_level(self.heading_level)
            .with_skip_magics(!self.keep_magics)
    }

    fn builder(&self, split_key: Option<&str>) -> Nbconf {
        let mut builder = Nbconf::new()
            .with_extract_options(self.extract_options())
            .with_locate_options(LocateOptions::new().with_directive(&self.directive));
        if let Some(key) = split_key {
            builder = builder.with_toml_options(TomlOptions::new().with_split_header_key(key));
        }
        builder
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export notebook configuration to YAML
    #[command(alias = "yml")]
    Yaml {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (notebook path with .yaml if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export notebook configuration to TOML
    Toml {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (notebook path with .toml if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Key whose list of tuples becomes a TOML array of arrays
        #[arg(long, value_name = "KEY", env = "NBCONF_SPLIT_KEY", default_value = DEFAULT_SPLIT_HEADER_KEY)]
        split_key: String,
    },

    /// Print the rendered configuration without writing a file
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: FormatArg,

        /// Key whose list of tuples becomes a TOML array of arrays
        #[arg(long, value_name = "KEY", env = "NBCONF_SPLIT_KEY", default_value = DEFAULT_SPLIT_HEADER_KEY)]
        split_key: String,
    },

    /// Print the section and key structure
    Tree {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show notebook and extraction information
    Info {
        #[command(flatten)]
        source: SourceArgs,

        /// Print extraction statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Block-style YAML
    Yaml,
    /// TOML tables
    Toml,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => ExportFormat::Yaml,
            FormatArg::Toml => ExportFormat::Toml,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Yaml { source, output }) => {
            cmd_export(&source, output.as_deref(), ExportFormat::Yaml, None)
        }
        Some(Commands::Toml {
            source,
            output,
            split_key,
        }) => cmd_export(
            &source,
            output.as_deref(),
            ExportFormat::Toml,
            Some(split_key.as_str()),
        ),
        Some(Commands::Show {
            source,
            format,
            split_key,
        }) => cmd_show(&source, format.into(), &split_key),
        Some(Commands::Tree { source }) => cmd_tree(&source),
        Some(Commands::Info { source, json }) => cmd_info(&source, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: export YAML if input is provided
            if let Some(input) = cli.input {
                let source = SourceArgs {
                    input: Some(input),
                    heading_level: 2,
                    keep_magics: false,
                    directive: "%notebook".to_string(),
                };
                cmd_export(&source, cli.output.as_deref(), ExportFormat::Yaml, None)
            } else {
                println!("{}", "Usage: nbconf <FILE> [OUTPUT]".yellow());
                println!("       nbconf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(
    source: &SourceArgs,
    output: Option<&Path>,
    format: ExportFormat,
    split_key: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let artifact = source
        .builder(split_key)
        .export(source.input.as_deref(), output, format)?;

    println!(
        "{} {}",
        format!("{} file saved to:", format.label()).green(),
        artifact.path.display()
    );

    Ok(())
}

fn cmd_show(
    source: &SourceArgs,
    format: ExportFormat,
    split_key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = source
        .builder(Some(split_key))
        .render(source.input.as_deref(), format)?;
    print!("{}", content);
    Ok(())
}

fn cmd_tree(source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = source.builder(None).extract(source.input.as_deref())?;
    print!("{}", render::to_tree(&extraction.tree));
    Ok(())
}

fn cmd_info(source: &SourceArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = source.builder(None).locate(source.input.as_deref())?;
    let format = detect_format_from_path(&path)?;
    let notebook = parse_file(&path)?;
    let extraction = SectionWalker::new(source.extract_options()).walk(&notebook);

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction.stats)?);
        return Ok(());
    }

    let stats = &extraction.stats;

    println!("{}", "Notebook Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), path.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Cells".bold(), notebook.cell_count());
    println!("{}: {}", "Markdown cells".bold(), notebook.count_kind(CellKind::Markdown));
    println!("{}: {}", "Code cells".bold(), notebook.count_kind(CellKind::Code));
    println!("{}: {}", "Raw cells".bold(), notebook.count_kind(CellKind::Raw));

    println!();
    println!("{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Sections".bold(), extraction.tree.section_count());
    println!("{}: {}", "Keys".bold(), extraction.tree.key_count());
    println!("{}: {}", "Headings seen".bold(), stats.headings);
    println!("{}: {}", "Assignments".bold(), stats.assignments);
    println!("{}: {}", "Other code lines".bold(), stats.rejected_lines);
    println!("{}: {}", "Before first section".bold(), stats.orphan_lines);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "nbconf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Notebook configuration export tool");
    println!();
    println!("License: MIT");
}
