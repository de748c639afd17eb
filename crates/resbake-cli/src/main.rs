//! resbake - Embed a directory tree of resources into C source
//!
//! Every regular file under the input directory becomes a `const char`
//! array in the generated source file, declared `extern` in the generated
//! header.

use anyhow::{Context, Result};
use clap::Parser;
use resbake_core::{BakeConfig, BakeStats, Baker, TextExtensions, DEFAULT_TEXT_EXTENSIONS};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Embed a directory tree of resources into C header/source byte arrays
#[derive(Parser, Debug)]
#[command(name = "resbake")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// The directory to process
    #[arg(value_name = "DIR_PATH", default_value = ".")]
    dir: PathBuf,

    /// Write declarations (header) to FILE
    #[arg(short = 'H', long = "header", value_name = "FILE")]
    header: PathBuf,

    /// Write definitions (source) to FILE
    #[arg(short = 's', long = "source", value_name = "FILE")]
    source: PathBuf,

    /// Prefix every generated symbol with PREFIX
    #[arg(short = 'p', long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Header include guard, uppercased [default: header filename without extension, sanitized and uppercased]
    #[arg(short = 'd', long = "define", value_name = "DEFINE")]
    define: Option<String>,

    /// Files with these extensions get a terminating NUL byte
    #[arg(
        short = 't',
        long = "text-extensions",
        value_name = "EXT1,EXT2,...",
        default_value = DEFAULT_TEXT_EXTENSIONS
    )]
    text_extensions: TextExtensions,

    /// Keep incomplete output files if the walk fails
    #[arg(long)]
    keep_partial: bool,

    /// Visit entries in filesystem order instead of sorting by name
    #[arg(long)]
    unsorted: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn to_config(&self) -> BakeConfig {
        let mut config = BakeConfig::new(&self.dir, &self.header, &self.source)
            .text_extensions(self.text_extensions.clone())
            .keep_partial(self.keep_partial)
            .sort_entries(!self.unsorted);
        if let Some(prefix) = &self.prefix {
            config = config.prefix(prefix);
        }
        if let Some(define) = &self.define {
            config = config.guard(define);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let stats = run(&cli)?;
    print_summary(&stats);
    Ok(())
}

/// Run the generator for the parsed command line
fn run(cli: &Cli) -> Result<BakeStats> {
    let baker = Baker::new(cli.to_config());
    debug!("Configuration: {:?}", baker.config());

    baker.run().with_context(|| {
        format!(
            "Failed to embed '{}' into '{}' and '{}'",
            cli.dir.display(),
            cli.header.display(),
            cli.source.display()
        )
    })
}

fn print_summary(stats: &BakeStats) {
    info!(
        "Summary: {} embedded ({} text, {} binary, {} bytes) from {} directories, {} empty skipped, {} outputs skipped",
        stats.embedded(),
        stats.text_files,
        stats.binary_files,
        stats.bytes,
        stats.directories,
        stats.skipped_empty,
        stats.skipped_outputs
    );
}
