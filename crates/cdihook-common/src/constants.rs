//! Default names and paths used when no [`HookConfig`](crate::config::HookConfig)
//! override is supplied.

/// Suffix of the file holding the hook plan for a device.
pub const HOOKS_FILE_SUFFIX: &str = "_cdi_hooks.json";

/// Suffix of the file holding the config devices for a device.
pub const CONFIG_DEVICES_FILE_SUFFIX: &str = "_cdi_config_devices.json";

/// Key prefix for unix character devices (`cdi.unix.<device>.<dest>`).
pub const UNIX_DEVICE_PREFIX: &str = "cdi.unix";

/// Key prefix for bind mounts backing user space files (`cdi.disk.<device>.<dest>`).
pub const DISK_DEVICE_PREFIX: &str = "cdi.disk";

/// Linker configuration fragment written inside the container.
///
/// The `00-` prefix sorts it ahead of every other fragment so these
/// directories take precedence when the dynamic linker resolves libraries.
pub const LINKER_CONF_NAME: &str = "00-cdihook.conf";

/// Linker configuration directory, relative to the container root.
pub const LINKER_CONF_DIR: &str = "etc/ld.so.conf.d";

/// Linker cache file, relative to the container root.
pub const LINKER_CACHE_PATH: &str = "etc/ld.so.cache";

/// Host location of `ldconfig` tried before searching `PATH`.
pub const DEFAULT_LDCONFIG: &str = "/sbin/ldconfig";

/// Permission bits for directories created under the container root.
pub const DIR_MODE: u32 = 0o755;

/// Permission bits for the linker configuration fragment.
pub const CONF_FILE_MODE: u32 = 0o644;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "cdi-hook";
