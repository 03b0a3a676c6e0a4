use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

const DEFAULT_FILE_PATH: &str = "data/apis.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which storage backend serves the api repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub backend: Backend,
    /// JSON file used by the `file` backend.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String { "compact".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

/// Read `CONFIG_PATH` if set, else `./config.toml`. Only a missing
/// `./config.toml` falls back to defaults; an explicit path must be readable.
pub fn load_default() -> Result<AppConfig> {
    match std::env::var("CONFIG_PATH") {
        Ok(path) => load_from_file(&path)
            .map_err(|e| anyhow!("cannot load CONFIG_PATH={path}: {e}")),
        Err(_) if std::path::Path::new("config.toml").exists() => load_from_file("config.toml"),
        Err(_) => Ok(AppConfig::default()),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.repository.normalize_from_env();
        self.repository.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl RepositoryConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; the env var only fills a missing path
        let missing = self.path.as_deref().map(|p| p.trim().is_empty()).unwrap_or(true);
        if missing {
            self.path = std::env::var("API_REPOSITORY_PATH").ok();
        }
        if self.backend == Backend::File && self.path.is_none() {
            self.path = Some(DEFAULT_FILE_PATH.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::File {
            let path = self.path.as_deref().unwrap_or_default();
            if path.trim().is_empty() {
                return Err(anyhow!("repository.path is required for the file backend"));
            }
            if !path.ends_with(".json") {
                return Err(anyhow!("repository.path must point to a .json file"));
            }
        }
        Ok(())
    }

    pub fn file_path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_FILE_PATH)
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.format.to_ascii_lowercase().as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be compact or json, got {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let cfg = load_from_str("")?;
        assert_eq!(cfg.repository.backend, Backend::Memory);
        assert_eq!(cfg.logging.format, "compact");
        Ok(())
    }

    #[test]
    fn file_backend_parses_and_validates() -> Result<()> {
        let mut cfg = load_from_str(
            r#"
            [repository]
            backend = "file"
            path = "var/registry.json"

            [logging]
            format = "json"
            "#,
        )?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.repository.backend, Backend::File);
        assert_eq!(cfg.repository.file_path(), "var/registry.json");
        Ok(())
    }

    #[test]
    fn rejects_non_json_path_and_unknown_format() -> Result<()> {
        let cfg = load_from_str("[repository]\nbackend = \"file\"\npath = \"apis.txt\"\n")?;
        assert!(cfg.repository.validate().is_err());

        let cfg = load_from_str("[logging]\nformat = \"xml\"\n")?;
        assert!(cfg.logging.validate().is_err());
        Ok(())
    }

    // only test touching CONFIG_PATH; both cases share it to avoid racing on the env var
    #[test]
    fn explicit_config_path_must_be_readable() -> Result<()> {
        std::env::set_var("CONFIG_PATH", "/nonexistent/registry-typo.toml");
        let missing = AppConfig::load_and_validate();

        let path = std::env::temp_dir().join(format!("registry_config_{}.toml", std::process::id()));
        std::fs::write(&path, "[repository]\nbackend = \"file\"\npath = \"var/apis.json\"\n")?;
        std::env::set_var("CONFIG_PATH", &path);
        let loaded = AppConfig::load_and_validate();

        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);

        assert!(missing.is_err());
        let cfg = loaded?;
        assert_eq!(cfg.repository.backend, Backend::File);
        assert_eq!(cfg.repository.file_path(), "var/apis.json");
        Ok(())
    }

    #[test]
    fn unknown_backend_fails_to_parse() {
        assert!(load_from_str("[repository]\nbackend = \"mongo\"\n").is_err());
    }
}
