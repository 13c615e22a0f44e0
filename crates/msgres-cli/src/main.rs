//! msgres - look up localized string resources from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use msgres_common::{init_logging, LoggingConfig};
use msgres_config::{ResourceSettings, SettingsLoader};
use msgres_core::locale::{parse_locale, runtime_language};
use msgres_core::{
    PropertiesLoaderConfig, PropertiesStringResourceLoader, StaticDataLoader, StringResource,
    StringResourceHolder,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file path (YAML or TOML)
    #[arg(short, long, env = "MSGRES_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Log filter directive
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the template of one id
    Get {
        /// Message id
        id: String,

        /// Locale to resolve, e.g. `ja` or `en_US` (default: configured default locale)
        #[arg(long)]
        lang: Option<String>,
    },
    /// List every id with the languages it carries
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig::default().with_level(&cli.log_level))
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")?;

    let settings = match cli.config {
        Some(ref path) => SettingsLoader::load_from_file(path)?,
        None => SettingsLoader::load()?,
    };
    debug!(?settings, "Settings loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Get { id, lang } => get(&settings, &id, lang.as_deref(), &mut out),
        Command::List { json } => list(&settings, json, &mut out),
    }
}

fn default_language(settings: &ResourceSettings) -> &str {
    settings.default_locale.as_deref().unwrap_or_else(|| runtime_language())
}

fn get(
    settings: &ResourceSettings,
    id: &str,
    lang: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let holder = StringResourceHolder::from_settings(settings)?;
    let locale = parse_locale(lang.unwrap_or_else(|| default_language(settings)))?;

    let resource = holder.get(id)?;
    let text = resource
        .text(&locale)
        .with_context(|| format!("available languages: {}", languages(&resource)))?;

    writeln!(out, "{text}")?;
    Ok(())
}

fn list(settings: &ResourceSettings, json: bool, out: &mut impl Write) -> Result<()> {
    let loader = PropertiesStringResourceLoader::new(PropertiesLoaderConfig::from(settings));
    let resources = loader.load_all()?;
    info!("Listing {} resources", resources.len());

    if json {
        let resources: Vec<&StringResource> = resources.iter().map(AsRef::as_ref).collect();
        serde_json::to_writer_pretty(&mut *out, &resources)?;
        writeln!(out)?;
    } else {
        for resource in &resources {
            writeln!(out, "{}\t{}", resource.id(), languages(resource))?;
        }
    }
    Ok(())
}

fn languages(resource: &StringResource) -> String {
    resource.languages().collect::<Vec<_>>().join(",")
}
