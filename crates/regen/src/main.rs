//! regen-atoms CLI
//!
//! Regenerates the static atom declarations from a Gecko object directory.

use atomregen::{RegenConfig, RegenError};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser as ClapParser};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "regen-atoms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate Rust linkage declarations for Gecko's static atoms", long_about = None)]
struct Cli {
    /// Gecko object directory (registry headers live under dist/include)
    objdir: PathBuf,

    /// Generated module path
    #[arg(short, long, default_value = "atom_macro.rs")]
    output: PathBuf,

    /// Extra registry configuration (TOML), merged over the built-in registries
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let usage = RegenError::MalformedInvocation(Cli::command().render_usage().to_string());
            println!("{}", usage);
            eprintln!("Error: {}", e.kind());
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("atomregen=info,regen_atoms=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli.objdir, &cli.output, cli.config.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(objdir: &Path, output: &Path, config_path: Option<&Path>) -> Result<(), RegenError> {
    let mut config = RegenConfig::default_config()?;

    if let Some(path) = config_path {
        let content = fs::read_to_string(path).map_err(|e| {
            RegenError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        config.merge(RegenConfig::from_toml(&content)?);
    }

    let generator = config.build()?;
    let count = generator.write(objdir, output)?;
    println!("Generated {} atoms -> {}", count, output.display());
    Ok(())
}
