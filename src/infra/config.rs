use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Endpoint used when nothing else is configured, matching a local
/// development deployment of the analysis service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub api_base_url: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

pub struct ConfigManager {
    _config_dir: PathBuf,
    config: UserConfig,
}

impl ConfigManager {
    const CONFIG_FILE: &'static str = ".triager.yml";
    const ENV_API_URL: &'static str = "TRIAGER_API_URL";

    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            _config_dir: config_dir,
            config,
        })
    }

    // Local file first, then the home directory, then built-in defaults.
    fn load_config(config_dir: &Path) -> Result<UserConfig> {
        let local = config_dir.join(Self::CONFIG_FILE);
        let config_path = if local.exists() {
            Some(local)
        } else {
            dirs::home_dir()
                .map(|home| home.join(Self::CONFIG_FILE))
                .filter(|path| path.exists())
        };

        match config_path {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)?;
                let config: UserConfig = serde_yaml::from_str(&contents)?;
                Ok(config)
            }
            None => Ok(UserConfig::default()),
        }
    }

    /// Effective config: the environment variable wins over the file.
    pub fn get(&self) -> UserConfig {
        if let Ok(url) = std::env::var(Self::ENV_API_URL) {
            if !url.is_empty() {
                return UserConfig { api_base_url: url };
            }
        }
        self.config.clone()
    }

    pub fn create_default(config_dir: impl AsRef<Path>) -> Result<()> {
        let config_path = config_dir.as_ref().join(Self::CONFIG_FILE);

        if config_path.exists() {
            return Ok(());
        }

        let default_content = r#"# Triager configuration
# Point this at your deployment of the analysis service.
# The TRIAGER_API_URL environment variable overrides this file.

api_base_url: http://localhost:8000
"#;

        std::fs::write(&config_path, default_content)?;
        println!("Created config at {}", config_path.display());

        Ok(())
    }
}
