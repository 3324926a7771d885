//! plugrack CLI

mod modules;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use example_logging::LogSink;
use example_transform::TextTransform;
use plugrack_config::{load_config, HostConfig, LogFormat};
use plugrack_registry::{Plugin, PluginInfo, Registry, TypeRef};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "plugrack")]
#[command(about = "Inspect the plugins linked into this build", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "PLUGRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered plugins in canonical order
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one plugin
    Show {
        /// Plugin name
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List plugins implementing a capability
    Implementing {
        /// Capability name
        #[arg(value_enum)]
        capability: Capability,
    },

    /// Validate configuration file
    Validate,

    /// Show version information
    Version,
}

/// Capabilities known to this binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Capability {
    /// Every plugin
    Plugin,
    /// Text transforms
    TextTransform,
    /// Log sinks
    LogSink,
}

impl Capability {
    fn type_ref(self) -> TypeRef {
        match self {
            Capability::Plugin => TypeRef::interface::<dyn Plugin>(),
            Capability::TextTransform => TypeRef::interface::<dyn TextTransform>(),
            Capability::LogSink => TypeRef::interface::<dyn LogSink>(),
        }
    }
}

/// Printable view of a registered plugin
#[derive(Debug, Serialize)]
struct PluginSummary {
    name: String,
    priority: i32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    plugin_type: Option<String>,
    capabilities: Vec<String>,
}

impl PluginSummary {
    fn new(registry: &Registry, info: &PluginInfo) -> Self {
        let mut capabilities: Vec<String> = registry
            .capabilities_of(&info.name)
            .map(|caps| caps.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        capabilities.sort();

        Self {
            name: info.name.clone(),
            priority: info.priority,
            plugin_type: registry
                .plugin_type_of(&info.name)
                .map(|t| t.name().to_string()),
            capabilities,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("plugrack");
        println!("Version: {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HostConfig::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level);
    init_tracing(level, config.logging.format)?;

    if let Commands::Validate = cli.command {
        return validate(cli.config.as_ref(), &config);
    }

    let registry = plugrack_registry::global();
    modules::register_modules(registry, &config, modules::MODULES)?;

    match cli.command {
        Commands::List { json } => {
            let summaries: Vec<PluginSummary> = registry
                .plugins()
                .iter()
                .map(|info| PluginSummary::new(registry, info))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    println!("{:>6}  {}", summary.priority, summary.name);
                }
            }
            Ok(())
        }

        Commands::Show { name, json } => show(registry, &name, json),

        Commands::Implementing { capability } => {
            let token = capability.type_ref();
            for info in registry.plugins_implementing(Some(&token))? {
                println!("{:>6}  {}", info.priority, info.name);
            }
            Ok(())
        }

        Commands::Validate | Commands::Version => Ok(()),
    }
}

/// Print one plugin; an unknown name is an error so `main` exits with 1
fn show(registry: &Registry, name: &str, json: bool) -> Result<()> {
    let info = registry
        .plugin_by_name(name)
        .ok_or_else(|| anyhow!("plugin '{name}' is not registered"))?;
    let summary = PluginSummary::new(registry, &info);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Name: {}", summary.name);
        println!("Priority: {}", summary.priority);
        if let Some(plugin_type) = &summary.plugin_type {
            println!("Type: {plugin_type}");
        }
        println!("Capabilities:");
        for capability in &summary.capabilities {
            println!("  {capability}");
        }
    }
    Ok(())
}

fn validate(path: Option<&PathBuf>, config: &HostConfig) -> Result<()> {
    let Some(path) = path else {
        bail!("No configuration file given (use --config or PLUGRACK_CONFIG)");
    };

    // load_config already validated the file
    tracing::info!(config = %path.display(), "Configuration is valid");
    println!("Configuration is valid: {}", path.display());
    println!("  Log level: {}", config.logging.level);
    println!("  Log format: {}", config.logging.format);
    println!("  Strict registration: {}", config.registration.strict);
    println!("  Modules: {}", config.modules.len());
    Ok(())
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let level: tracing::Level = match level.parse() {
        Ok(level) => level,
        Err(_) => bail!("Invalid log level: {level}"),
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    Ok(())
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
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "plugrack",
            "list",
            "--config",
            "plugrack.yaml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("plugrack.yaml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::List { json: false }));
    }

    #[test]
    fn test_parse_capability_names() {
        for (arg, want) in [
            ("plugin", Capability::Plugin),
            ("text-transform", Capability::TextTransform),
            ("log-sink", Capability::LogSink),
        ] {
            let cli = Cli::try_parse_from(["plugrack", "implementing", arg]).unwrap();
            match cli.command {
                Commands::Implementing { capability } => assert_eq!(capability, want),
                _ => panic!("unexpected command for {arg}"),
            }
        }

        assert!(Cli::try_parse_from(["plugrack", "implementing", "cache"]).is_err());
    }

    #[test]
    fn test_capability_queries() {
        let registry = Registry::new();
        modules::register_modules(&registry, &HostConfig::default(), modules::MODULES).unwrap();

        let names = |capability: Capability| -> Vec<String> {
            registry
                .plugins_implementing(Some(&capability.type_ref()))
                .unwrap()
                .into_iter()
                .map(|info| info.name)
                .collect()
        };

        assert_eq!(
            names(Capability::Plugin),
            vec!["stderr-sink", "uppercase", "reverse"]
        );
        assert_eq!(names(Capability::TextTransform), vec!["uppercase", "reverse"]);
        assert_eq!(names(Capability::LogSink), vec!["stderr-sink"]);
    }

    #[test]
    fn test_plugin_summary() {
        let registry = Registry::new();
        example_transform::register(&registry).unwrap();

        let info = registry.plugin_by_name("reverse").unwrap();
        let summary = PluginSummary::new(&registry, &info);

        assert_eq!(summary.priority, 20);
        assert_eq!(summary.capabilities.len(), 2);
        assert!(summary.plugin_type.unwrap().ends_with("ReversePlugin"));
    }

    #[test]
    fn test_show_unknown_plugin_is_error() {
        let registry = Registry::new();
        example_logging::register(&registry).unwrap();

        assert!(show(&registry, "stderr-sink", false).is_ok());
        assert!(show(&registry, "stderr-sink", true).is_ok());

        let err = show(&registry, "missing", false).unwrap_err();
        assert!(err.to_string().contains("plugin 'missing' is not registered"));
    }

    #[test]
    fn test_validate_requires_path() {
        assert!(validate(None, &HostConfig::default()).is_err());
    }
}
