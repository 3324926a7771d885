//! Process-wide registry

use crate::registry::Registry;
use once_cell::sync::Lazy;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry
///
/// Created empty on first use and kept for the life of the process. Hosts
/// usually fill it from `main` before any query runs.
pub fn global() -> &'static Registry {
    &GLOBAL
}
