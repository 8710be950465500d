//! mdtangle CLI - tangle a literate markdown document into program text

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdtangle::config::{read_config, read_config_file, AmbiguityPolicy};
use mdtangle::{Config, Document, Result};

#[derive(Parser)]
#[command(name = "mdtangle")]
#[command(author, version, about = "Tangle labeled fragments out of a markdown document", long_about = None)]
struct Cli {
    /// Input document (standard input if omitted or "-")
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (standard output if omitted or "-")
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tangle this fragment instead of the declared root
    #[arg(short, long, value_name = "LABEL")]
    root: Option<String>,

    /// Fail on ambiguous short labels in initializations
    #[arg(long)]
    strict: bool,

    /// List fragment labels instead of tangling
    #[arg(short, long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Treats a missing path and "-" alike as the standard stream.
fn file_arg(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

fn load_config(cli: &Cli, input: Option<&Path>) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => {
            let start_dir = match input.and_then(Path::parent) {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => std::env::current_dir()?,
            };
            read_config(&start_dir)?
        }
    };

    if cli.strict {
        config.ambiguous_init = AmbiguityPolicy::Error;
    }
    Ok(config)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Writes the finished text; the output file is only created once everything succeeded.
fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let input = file_arg(cli.input.as_deref());
    let output = file_arg(cli.output.as_deref());

    let config = load_config(cli, input)?;
    let text = read_input(input)?;
    let document = Document::parse(&text, input, &config)?;

    let result: String = if cli.list {
        document
            .outline()
            .into_iter()
            .map(|(label, is_root)| {
                if is_root {
                    format!("{} (root)\n", label)
                } else {
                    format!("{}\n", label)
                }
            })
            .collect()
    } else {
        match &cli.root {
            Some(label) => document.tangle_fragment(label)?,
            None => document.tangle()?,
        }
    };

    write_output(output, &result)?;
    tracing::info!(
        "Wrote {} bytes to {}",
        result.len(),
        output.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with tangled output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
