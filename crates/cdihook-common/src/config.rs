//! Naming and path configuration for hook application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{HookError, Result};

/// Names and locations the hook pipeline reads and writes.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// File name of the linker configuration fragment.
    pub linker_conf_name: String,
    /// Linker configuration directory, relative to the container root.
    pub linker_conf_dir: PathBuf,
    /// Linker cache file, relative to the container root.
    pub linker_cache_path: PathBuf,
    /// Explicit path to the host `ldconfig`; looked up when unset.
    pub ldconfig: Option<PathBuf>,
    /// Suffix of hook plan files.
    pub hooks_file_suffix: String,
    /// Suffix of config devices files.
    pub config_devices_file_suffix: String,
    /// Key prefix for unix character devices.
    pub unix_device_prefix: String,
    /// Key prefix for bind mounts.
    pub disk_device_prefix: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            linker_conf_name: constants::LINKER_CONF_NAME.into(),
            linker_conf_dir: PathBuf::from(constants::LINKER_CONF_DIR),
            linker_cache_path: PathBuf::from(constants::LINKER_CACHE_PATH),
            ldconfig: None,
            hooks_file_suffix: constants::HOOKS_FILE_SUFFIX.into(),
            config_devices_file_suffix: constants::CONFIG_DEVICES_FILE_SUFFIX.into(),
            unix_device_prefix: constants::UNIX_DEVICE_PREFIX.into(),
            disk_device_prefix: constants::DISK_DEVICE_PREFIX.into(),
        }
    }
}

impl HookConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::NotFound`] if the file is missing, [`HookError::Io`]
    /// if it cannot be read, or [`HookError::Decode`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| HookError::Decode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Directory holding the linker configuration fragment inside `rootfs`.
    #[must_use]
    pub fn linker_conf_dir_in(&self, rootfs: &Path) -> PathBuf {
        rootfs.join(&self.linker_conf_dir)
    }

    /// Full path of the linker configuration fragment inside `rootfs`.
    #[must_use]
    pub fn linker_conf_path_in(&self, rootfs: &Path) -> PathBuf {
        self.linker_conf_dir_in(rootfs).join(&self.linker_conf_name)
    }

    /// Full path of the linker cache inside `rootfs`.
    #[must_use]
    pub fn linker_cache_path_in(&self, rootfs: &Path) -> PathBuf {
        rootfs.join(&self.linker_cache_path)
    }

    /// Hook plan file name for the given stem.
    #[must_use]
    pub fn hooks_file_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.hooks_file_suffix)
    }

    /// Config devices file name for the given stem.
    #[must_use]
    pub fn config_devices_file_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.config_devices_file_suffix)
    }
}
