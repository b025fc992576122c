//! Item system configuration.

/// Configuration for an [`ItemSystem`](crate::ItemSystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSystemConfig {
    pub default_label: DefaultLabel,
    pub orphan_policy: OrphanPolicy,
}

impl Default for ItemSystemConfig {
    fn default() -> Self {
        ItemSystemConfig {
            default_label: DefaultLabel::KindName,
            orphan_policy: OrphanPolicy::Fail,
        }
    }
}

/// Label given to items created without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultLabel {
    /// Use the kind name (e.g. "Button"). An explicit empty label is kept.
    KindName,
    /// Leave the label unset and let the toolkit decide.
    None,
}

/// What `children()` and `handlers()` do with ids missing from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Fail with [`PixleError::RegistryLookup`](crate::PixleError::RegistryLookup).
    Fail,
    /// Leave the id out of the result and log a warning.
    Skip,
}
