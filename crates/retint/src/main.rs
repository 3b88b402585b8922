use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use retint::generate::{generate, GenerateOptions, Summary};
use retint::label;
use retint::xresources::load_scheme;
use retint::VariantConfig;

#[derive(Debug, Parser)]
#[command(
    name = "retint",
    about = "Generate recolored variants of GTK theme directories",
    version
)]
struct Cli {
    /// Read colors from an xrdb file instead of probing ~/.Xresources
    /// and ~/.Xdefaults
    #[arg(short, long)]
    xresources: Option<PathBuf>,

    /// Config file with format hints and variant definitions
    #[arg(short, long, default_value = "variants.conf")]
    config_file: PathBuf,

    /// Directory holding the template themes
    #[arg(short, long, default_value = "templates")]
    input_dir: PathBuf,

    /// Destination directory for the generated variants; must not exist
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Naming template for output directories ({variant}, {theme})
    #[arg(long, default_value = label::DEFAULT_DIR_NAME_FORMAT)]
    dir_name_format: String,

    /// Naming template for patched theme descriptors ({variant}, {original})
    #[arg(long, default_value = label::DEFAULT_READABLE_NAME_FORMAT)]
    readable_name_format: String,

    /// Trace every color substitution
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            println!(
                "{} {} theme directories written to {} ({} variants x {} themes)",
                style("done:").green().bold(),
                summary.directories,
                cli.output_dir.display(),
                summary.variants,
                summary.themes,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Summary> {
    let palette = load_scheme(cli.xresources.as_deref());
    let config = VariantConfig::load(&cli.config_file).context("loading variant config")?;

    let options = GenerateOptions {
        input_dir: cli.input_dir.clone(),
        output_dir: cli.output_dir.clone(),
        dir_name_format: cli.dir_name_format.clone(),
        readable_name_format: cli.readable_name_format.clone(),
    };
    let summary = generate(&config, &palette, &options).context("generating variant themes")?;
    Ok(summary)
}

/// Logging goes to stderr so stdout stays clean for the summary line.
/// `--verbose` pins the filter to debug; otherwise `RUST_LOG` applies,
/// defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("retint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("retint=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
