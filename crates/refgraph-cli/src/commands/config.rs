//! `refgraph config`: inspect and edit the TOML settings file

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting name (see `config list`)
        key: String,
    },
    /// Change one setting; the value is validated before saving
    Set {
        /// Setting name (see `config list`)
        key: String,
        /// New value; `reference_extensions` takes a comma-separated list
        value: String,
    },
    /// Show every setting grouped as in the file
    List,
    /// Print where the settings file lives
    Path,
    /// Write a settings file with the default scan options
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();
    match &args.command {
        ConfigCommands::Get { key } => get(&path, key),
        ConfigCommands::Set { key, value } => set(&path, key, value),
        ConfigCommands::List => list(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => init(&path, *force),
    }
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {} (available: {})",
        key,
        Config::keys().join(", ")
    )
}

fn get(path: &Path, key: &str) -> anyhow::Result<()> {
    let value = Config::load_from(path)
        .get(key)
        .ok_or_else(|| unknown_key(key))?;
    println!("{}", value);
    Ok(())
}

fn set(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_from(path);
    config.set(key, value)?;
    config.save_to(path)?;

    // Echo what was stored, after trimming and splitting
    let stored = config.get(key).ok_or_else(|| unknown_key(key))?;
    tracing::info!("Updated {} in {}", key, path.display());
    println!("{} = {}", key, stored);
    Ok(())
}

fn list(path: &Path) -> anyhow::Result<()> {
    let config = Config::load_from(path);
    let origin = if path.exists() { "" } else { " (not created, showing defaults)" };
    println!("# {}{}", path.display(), origin);
    println!();
    println!("default_depth = {}", config.default_depth);
    println!();
    println!("[scan]");
    println!("marker               = {:?}", config.scan.marker);
    println!("meta_suffix          = {:?}", config.scan.meta_suffix);
    println!(
        "reference_extensions = {} type(s): {}",
        config.scan.reference_extensions.len(),
        config.scan.reference_extensions.join(", ")
    );
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            path.display()
        );
    }

    let config = Config::default();
    config.save_to(path)?;
    println!("Wrote {}", path.display());
    println!(
        "Scanning '{}' sidecars for '{}' markers; references read from: {}",
        config.scan.meta_suffix,
        config.scan.marker.trim_end(),
        config.scan.reference_extensions.join(", ")
    );
    Ok(())
}
