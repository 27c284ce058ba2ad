//! Hook plan data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A symlink to materialize under the container root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymlinkEntry {
    /// Destination of the link. Absolute targets are rewritten relative to
    /// the link's directory; relative ones are used verbatim.
    pub target: String,
    /// Location of the link, interpreted inside the container root.
    pub link: String,
}

impl SymlinkEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(target: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            link: link.into(),
        }
    }
}

/// Everything one invocation applies to a container root.
///
/// Produced once per container start or hot-plug event and consumed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookPlan {
    /// Container root filesystem the plan was computed for (informational).
    #[serde(default)]
    pub container_rootfs: String,
    /// Library directories to add to the linker configuration, in preference order.
    #[serde(default)]
    pub ld_cache_updates: Vec<String>,
    /// Symlinks to create, in order.
    #[serde(default)]
    pub symlinks: Vec<SymlinkEntry>,
}

impl HookPlan {
    /// Returns `true` when applying the plan would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ld_cache_updates.is_empty() && self.symlinks.is_empty()
    }
}

/// Devices and mounts configured by a separate subsystem.
///
/// Shares the file naming convention of [`HookPlan`] but is not applied here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDevices {
    /// Unix character device configurations.
    #[serde(default)]
    pub unix_char_devs: Vec<BTreeMap<String, String>>,
    /// Bind mount configurations.
    #[serde(default)]
    pub bind_mounts: Vec<BTreeMap<String, String>>,
}
