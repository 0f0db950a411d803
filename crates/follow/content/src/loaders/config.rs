//! Follow configuration loader.

use std::path::Path;

use follow_core::FollowConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for follow controller tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`FollowConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<FollowConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<FollowConfig> {
        let config: FollowConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse follow config TOML: {}", e))?;

        anyhow::ensure!(config.tile_size > 0, "tile_size must be positive");
        anyhow::ensure!(
            config.path_max_node_count > 0,
            "path_max_node_count must be positive"
        );
        Ok(config)
    }
}
