//! Sandbox paths.

use std::path::PathBuf;

/// Directory for files the plugin writes on the host.
///
/// Zellij mounts the host filesystem at `/host` inside the WASM sandbox, so
/// this resolves to `~/.local/share/zellij/zcatalog` on the host.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zcatalog")
}

/// Maps a user-supplied path onto the sandbox's view of the host.
///
/// `~` and `~/...` resolve under `/host`; other paths are used as given.
#[must_use]
pub fn host_path(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from("/host"),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("/host{rest}")),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_is_under_host() {
        assert!(data_dir().starts_with("/host"));
        assert!(data_dir().ends_with("zcatalog"));
    }

    #[test]
    fn test_host_path() {
        assert_eq!(host_path("~"), PathBuf::from("/host"));
        assert_eq!(host_path("~/themes/dark.toml"), PathBuf::from("/host/themes/dark.toml"));
        assert_eq!(host_path("/etc/theme.toml"), PathBuf::from("/etc/theme.toml"));
        assert_eq!(host_path("~user/x"), PathBuf::from("~user/x"));
    }
}
