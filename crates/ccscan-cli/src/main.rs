//! ccscan CLI
//!
//! Command-line access to compiler discovery, dependency listing and header
//! preprocessing.

use anyhow::{Context, Result};
use ccscan_compiler::{MacroDirective, Toolchain};
use ccscan_core::Config;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ccscan")]
#[command(author, version, about = "C compiler discovery and header preprocessing", long_about = None)]
struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the selected compiler
    Which,

    /// List the headers a header depends on
    Includes {
        /// Header to inspect
        #[arg(value_name = "HEADER")]
        header: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Dump declarations and macros of one or more headers
    Preprocess {
        /// Headers to include, in order
        #[arg(value_name = "HEADER", required = true)]
        headers: Vec<String>,

        /// Include directory (repeatable)
        #[arg(short = 'I', long = "include", value_name = "DIR")]
        include: Vec<PathBuf>,

        /// Macro definition NAME or NAME=VALUE (repeatable)
        #[arg(short = 'D', long = "define", value_name = "MACRO")]
        define: Vec<String>,

        /// File whose contents are placed before the includes
        #[arg(long, value_name = "FILE")]
        previous: Option<PathBuf>,

        /// Drop macros the compiler defines for an empty file
        #[arg(long)]
        filter_standard_defines: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let mut toolchain = Toolchain::discover(&config)?;

    match cli.command {
        Commands::Which => cmd_which(&toolchain),
        Commands::Includes { header, format } => cmd_includes(&toolchain, &header, format),
        Commands::Preprocess {
            headers,
            include,
            define,
            previous,
            filter_standard_defines,
            format,
            output,
        } => {
            toolchain.add_to_include_path(&include);
            for spec in &define {
                let directive = MacroDirective::parse(spec);
                debug!("Adding {:?}", directive);
                toolchain.apply(&directive);
            }
            cmd_preprocess(
                &toolchain,
                &headers,
                previous.as_deref(),
                filter_standard_defines,
                format,
                output.as_deref(),
            )
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_which(toolchain: &Toolchain) -> Result<()> {
    let compiler = toolchain.compiler();
    let empty: [&str; 0] = [];

    println!("Compiler: {}", compiler.command_line(&empty));
    println!("Kind:     {}", compiler.kind());
    if let Some(version) = compiler.version() {
        println!("Version:  {}", version);
    }

    Ok(())
}

fn cmd_includes(toolchain: &Toolchain, header: &str, format: Format) -> Result<()> {
    let deps = toolchain.includes(header)?;

    match format {
        Format::Json => {
            let result = serde_json::json!({
                "header": header,
                "includes": deps,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Text => {
            for dep in &deps {
                println!("{}", dep);
            }
        }
    }

    Ok(())
}

fn cmd_preprocess(
    toolchain: &Toolchain,
    headers: &[String],
    previous: Option<&Path>,
    filter_standard_defines: bool,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let previous_defines = match previous {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => String::new(),
    };

    let (declarations, mut defines) = toolchain.preprocess(&previous_defines, headers)?;
    if filter_standard_defines {
        defines = toolchain.filter_standard_defines(&defines)?;
    }

    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(&serde_json::json!({
            "headers": headers,
            "declarations": declarations,
            "defines": defines,
        }))?,
        Format::Text => format!(
            "/* declarations */\n{}\n/* defines */\n{}\n",
            declarations.trim_end(),
            defines.trim_end()
        ),
    };

    if let Some(out_path) = output {
        std::fs::write(out_path, &rendered)?;
        eprintln!("Output written to: {}", out_path.display());
    } else {
        print!("{}", rendered);
        if format == Format::Json {
            println!();
        }
    }

    Ok(())
}
