use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host configuration manifest, looked up next to the process and in the
/// platform config directory.
pub const CONFIG_FILE: &str = "albumranking.conf.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Overrides base-address discovery when set.
    #[serde(default)]
    pub base_address: Option<String>,
    /// Directory holding the hosting page served to the user.
    #[serde(default = "default_frontend_dist")]
    pub frontend_dist: PathBuf,
}

fn default_frontend_dist() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_address: None,
            frontend_dist: default_frontend_dist(),
        }
    }
}

impl HostConfig {
    /// Load the manifest if one exists; a missing file yields defaults,
    /// a malformed file is fatal.
    pub fn load() -> Result<Self> {
        for candidate in Self::search_paths() {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read host configuration {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("malformed host configuration {}", path.display()))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(mut dir) = dirs::config_dir() {
            dir.push("AlbumRanking");
            dir.push(CONFIG_FILE);
            paths.push(dir);
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let config: HostConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_address, None);
        assert_eq!(config.frontend_dist, PathBuf::from("dist"));
    }

    #[test]
    fn manifest_fields_are_honored() {
        let config: HostConfig = serde_json::from_str(
            r#"{"base_address": "https://example.test/", "frontend_dist": "www"}"#,
        )
        .unwrap();
        assert_eq!(config.base_address.as_deref(), Some("https://example.test/"));
        assert_eq!(config.frontend_dist, PathBuf::from("www"));
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = HostConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("malformed host configuration"));
    }

    #[test]
    fn readable_manifest_loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_address": "https://example.test/"}}"#).unwrap();
        let config = HostConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_address.as_deref(), Some("https://example.test/"));
    }
}
