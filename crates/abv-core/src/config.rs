use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::nicknames::NicknameMap;

/// Root application configuration, loaded from `~/.abv/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub core: CoreConfig,
    pub scan: ScanConfig,
    pub untappd: UntappdConfig,
    pub server: ServerConfig,
    /// Formal brewery name → short nickname.
    pub nicknames: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Directory holding the log, image cache and backups.
    pub config_path: String,
    /// SQLite database file. Relative paths resolve against `config_path`.
    pub database_file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scanning this barcode undoes the scanner's last action.
    pub undo_barcode: String,
    /// Scanning this barcode redoes the scanner's last undone action.
    pub redo_barcode: String,
    pub default_quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UntappdConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    pub web_port: u16,
    /// Directory containing `front.html` and `static/`.
    pub web_root: String,
    /// API host name substituted into the front page template.
    pub api_url: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for CoreConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        Self {
            config_path: home.join(".abv").to_string_lossy().to_string(),
            database_file: "abv.sqlite".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            undo_barcode: String::new(),
            redo_barcode: String::new(),
            default_quantity: 1,
        }
    }
}

impl Default for UntappdConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            base_url: "https://api.untappd.com".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8081,
            web_port: 8080,
            web_root: PathBuf::from("/srv")
                .join("http")
                .to_string_lossy()
                .to_string(),
            api_url: "localhost".to_string(),
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.abv/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("ABV_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".abv")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Untappd credentials may come from the environment instead of the file.
    pub fn apply_env(&mut self) {
        if let Ok(id) = std::env::var("ABV_UNTAPPD_ID") {
            self.untappd.client_id = id;
        }
        if let Ok(secret) = std::env::var("ABV_UNTAPPD_SECRET") {
            self.untappd.client_secret = secret;
        }
    }

    // ─── Derived paths ─────────────────────────────────────

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.core.config_path)
    }

    /// Path to the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        let file = PathBuf::from(&self.core.database_file);
        if file.is_absolute() {
            file
        } else {
            self.base_dir().join(file)
        }
    }

    /// Path to the label image cache.
    pub fn images_dir(&self) -> PathBuf {
        self.base_dir().join("images")
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir().join("abv.log")
    }

    pub fn backup_path(&self) -> PathBuf {
        self.base_dir().join("backup.sqlite")
    }

    pub fn nickname_map(&self) -> NicknameMap {
        NicknameMap::new(self.nicknames.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.api_port, 8081);
        assert_eq!(cfg.server.web_port, 8080);
        assert_eq!(cfg.scan.default_quantity, 1);
        assert!(cfg.core.config_path.ends_with(".abv"));
    }

    #[test]
    fn test_full_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[core]
config_path = "/var/lib/abv"
database_file = "stock.sqlite"

[scan]
undo_barcode = "999000"
redo_barcode = "999001"
default_quantity = 6

[untappd]
client_id = "id"
client_secret = "secret"

[server]
api_port = 9081
api_url = "bar.local"

[nicknames]
"Founders Brewing Co." = "Founders"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.scan.undo_barcode, "999000");
        assert_eq!(cfg.scan.default_quantity, 6);
        assert_eq!(cfg.untappd.client_secret, "secret");
        assert_eq!(cfg.untappd.base_url, "https://api.untappd.com");
        assert_eq!(cfg.server.api_port, 9081);
        assert_eq!(cfg.server.web_port, 8080);
        assert_eq!(cfg.database_path(), PathBuf::from("/var/lib/abv/stock.sqlite"));
        assert_eq!(cfg.nickname_map().short_brand("Founders Brewing Co."), "Founders");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scan]\nredo_barcode = \"111\"\n\n[nicknames]\n\"Bell's Brewery\" = \"Bell's\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.scan.redo_barcode, "111");
        assert_eq!(cfg.scan.default_quantity, 1);
        assert_eq!(cfg.untappd.base_url, "https://api.untappd.com");
        assert_eq!(cfg.nicknames.len(), 1);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let cfg = AppConfig::load_from(Path::new("/tmp/nonexistent_abv_config.toml")).unwrap();
        assert_eq!(cfg.server.api_url, "localhost");
    }

    #[test]
    fn test_derived_paths() {
        let mut cfg = AppConfig::default();
        cfg.core.config_path = "/var/lib/abv".to_string();
        assert_eq!(cfg.database_path(), PathBuf::from("/var/lib/abv/abv.sqlite"));
        assert_eq!(cfg.images_dir(), PathBuf::from("/var/lib/abv/images"));
        assert_eq!(cfg.log_path(), PathBuf::from("/var/lib/abv/abv.log"));

        cfg.core.database_file = "/data/stock.sqlite".to_string();
        assert_eq!(cfg.database_path(), PathBuf::from("/data/stock.sqlite"));
    }
}
