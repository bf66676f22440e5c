//! Read-only state shared by every file of a run

use crate::config::EngineConfig;
use crate::detectors::ScopeMode;
use crate::namespace::NamespaceAliases;
use crate::tags::TagRegistry;

/// Alias table, tag registry and scope mode, built once per run
#[derive(Debug, Default)]
pub struct EngineContext {
    pub aliases: NamespaceAliases,
    pub registry: TagRegistry,
    pub scope_mode: ScopeMode,
}

impl EngineContext {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            aliases: NamespaceAliases::new(config.namespaces.iter()),
            registry: TagRegistry::builtin(),
            scope_mode: config.scope_mode,
        }
    }

    /// Default context with a custom alias table
    pub fn with_aliases(aliases: NamespaceAliases) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }
}
