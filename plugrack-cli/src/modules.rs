//! Built-in plugin modules

use anyhow::{Context, Result};
use plugrack_config::HostConfig;
use plugrack_registry::Registry;

/// Registers every plugin of one module
pub type ModuleRegistrar = fn(&Registry) -> plugrack_registry::Result<()>;

/// Plugin modules linked into this binary
pub const MODULES: &[(&str, ModuleRegistrar)] = &[
    ("example-transform", example_transform::register),
    ("example-logging", example_logging::register),
];

/// Register the enabled modules into `registry`
///
/// In strict mode the first failure aborts; otherwise the failing module is
/// skipped.
pub fn register_modules(
    registry: &Registry,
    config: &HostConfig,
    modules: &[(&str, ModuleRegistrar)],
) -> Result<()> {
    for (name, register) in modules {
        if !config.is_module_enabled(name) {
            tracing::info!(module = %name, "Module disabled, skipping");
            continue;
        }

        match register(registry) {
            Ok(()) => tracing::debug!(module = %name, "Module registered"),
            Err(err) if config.registration.strict => {
                tracing::error!(module = %name, error = %err, "Module registration failed");
                return Err(err).with_context(|| format!("Failed to register module '{name}'"));
            }
            Err(err) => {
                tracing::warn!(module = %name, error = %err, "Module registration failed, skipping");
            }
        }
    }

    Ok(())
}
