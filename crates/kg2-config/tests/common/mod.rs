//! Shared `figment::Jail` setup.

use figment::Jail;

/// Point the user config directory into the jail so a developer's own
/// `~/.config/kg2/config.toml` never leaks into a test.
pub fn isolate_user_config(jail: &mut Jail) {
    let root = jail.directory().to_path_buf();
    jail.set_env("HOME", root.display());
    jail.set_env("XDG_CONFIG_HOME", root.join(".config").display());
}
