use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "macrolog.db";

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory, creating it if needed. An explicit
    /// `data_dir` wins over the platform default.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = if let Some(dir) = data_dir {
            dir.to_path_buf()
        } else {
            let proj_dirs = ProjectDirs::from("", "", "macrolog")
                .context("Could not determine home directory")?;
            proj_dirs.data_dir().to_path_buf()
        };

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join(DB_FILE_NAME);

        Ok(Config { db_path, data_dir })
    }
}
