use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{Term, style};
use std::path::{Path, PathBuf};
use suite_core::{CANONICAL_FLAGS, Resolver, Selection, default_catalog, select};
use suite_resolve::PackageLocator;
use tracing_subscriber::EnvFilter;

mod config;

use config::SuiteConfig;

/// suitecfg - Configure which test-suite subprojects get built
#[derive(Parser)]
#[command(name = "suitecfg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the runtime and show which units would build
    Plan {
        /// Path to the configuration file (default: suite.toml)
        #[arg(default_value = "suite.toml")]
        config: PathBuf,

        /// Emit the activated units as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// List every unit in the catalog with its flag requirements
    Catalog,

    /// Show the configured dependency and effective flag values
    Status {
        /// Path to the configuration file (default: suite.toml)
        #[arg(default_value = "suite.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { config, json } => cmd_plan(&config, json, cli.verbose),
        Commands::Catalog => cmd_catalog(),
        Commands::Status { config } => cmd_status(&config),
    }
}

/// Load the config, or report and exit with a non-zero status
fn load_config(term: &Term, path: &Path) -> Result<SuiteConfig> {
    match SuiteConfig::load(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            term.write_line(&format!("{} {}", style("error:").red().bold(), e))?;
            std::process::exit(1);
        }
    }
}

fn cmd_plan(config_path: &Path, json: bool, verbose: bool) -> Result<()> {
    let term = Term::stderr();
    let config = load_config(&term, config_path)?;

    term.write_line(&format!(
        "{} Configuring suite from {}",
        style("::").cyan().bold(),
        config_path.display()
    ))?;

    let catalog = default_catalog();
    let locator = PackageLocator::new();

    let selection = match select(&config.dependency, &locator, &config.flags, &catalog) {
        Ok(selection) => selection,
        Err(e) => {
            term.write_line(&format!("{} {}", style("error:").red().bold(), e))?;
            std::process::exit(1);
        }
    };

    if let Some(resolved) = &selection.dependency {
        term.write_line(&format!(
            "{} Using {} {} at {}",
            style("::").cyan().bold(),
            resolved.name,
            resolved.version,
            resolved.root.display()
        ))?;
    }

    term.write_line("")?;
    print_selection(&term, &selection, verbose)?;

    term.write_line("")?;
    term.write_line(&format!(
        "{} {} of {} unit(s) activated",
        style("::").cyan().bold(),
        selection.unit_count(),
        catalog.len()
    ))?;

    if json {
        // Machine-readable handoff for the actual build step
        println!("{}", serde_json::to_string_pretty(&selection.units)?);
    }

    Ok(())
}

fn cmd_catalog() -> Result<()> {
    let term = Term::stderr();

    for unit in default_catalog() {
        let requirement = if unit.requires.is_empty() {
            style("unconditional".to_string()).dim()
        } else {
            style(format!("requires {}", unit.requires.join(", "))).yellow()
        };

        term.write_line(&format!(
            "  {} {} ({})",
            style(&unit.name).bold(),
            style(unit.path.display()).dim(),
            requirement
        ))?;
    }

    Ok(())
}

fn cmd_status(config_path: &Path) -> Result<()> {
    let term = Term::stderr();
    let config = load_config(&term, config_path)?;

    term.write_line(&format!(
        "{} suitecfg v{}",
        style("::").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    ))?;
    term.write_line("")?;
    term.write_line(&format!("  Dependency: {}", config.dependency.name))?;
    term.write_line(&format!("  Minimum:    {}", config.dependency.min_version))?;

    let locator = PackageLocator::new();
    match locator.locate(&config.dependency) {
        Ok(resolved) => {
            term.write_line(&format!(
                "  Resolved:   {} at {}",
                style(resolved.version.to_string()).green(),
                resolved.root.display()
            ))?;
        }
        Err(e) => {
            term.write_line(&format!("  Resolved:   {}", style(format!("no ({e})")).yellow()))?;
        }
    }

    term.write_line("")?;
    term.write_line("  Flags:")?;
    for flag in CANONICAL_FLAGS {
        let value = if config.flags.is_enabled(flag) {
            style("true").green()
        } else {
            style("false").dim()
        };
        term.write_line(&format!("    {flag} = {value}"))?;
    }

    // Supplied flags the catalog never refers to are worth surfacing, but
    // they are not an error.
    for (name, value) in config.flags.iter() {
        if !CANONICAL_FLAGS.contains(&name) {
            term.write_line(&format!(
                "    {name} = {value} {}",
                style("(not used by any unit)").yellow()
            ))?;
        }
    }

    Ok(())
}

fn print_selection(term: &Term, selection: &Selection, verbose: bool) -> Result<()> {
    for activation in &selection.units {
        term.write_line(&format!(
            "  {} {} {}",
            style("+").green().bold(),
            activation.unit.name,
            style(format!("({})", activation.unit.path.display())).dim()
        ))?;
    }

    for skipped in &selection.skipped {
        term.write_line(&format!(
            "  {} {} {}",
            style("-").dim(),
            style(&skipped.unit.name).dim(),
            style(format!("(missing: {})", skipped.missing.join(", "))).dim()
        ))?;
    }

    if verbose {
        if let Some(activation) = selection.units.first() {
            term.write_line("")?;
            term.write_line(&format!(
                "  Warning options: {}",
                style(activation.warn_options.join(" ")).dim()
            ))?;
        }
    }

    Ok(())
}
