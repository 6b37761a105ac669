use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the database connection string
pub const DATABASE_ENV: &str = "PHONOFIX_DATABASE";

pub const DEFAULT_DATABASE: &str = "phonofix.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_DISPLAY_LIMIT: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PhonofixConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub display_limit: Option<usize>,
}

impl PhonofixConfig {
    /// Starter config written by `phonofix init`
    pub fn starter() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            display_limit: Some(DEFAULT_DISPLAY_LIMIT),
        }
    }

    /// Database location: explicit value (flag or environment) first, then
    /// the config file, then the default.
    pub fn database_path(&self, explicit: Option<&str>) -> PathBuf {
        explicit
            .or(self.database.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit.unwrap_or(DEFAULT_DISPLAY_LIMIT)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("phonofix.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PhonofixConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PhonofixConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PhonofixConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Create the parent directory of a database file. `:memory:` has none.
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
