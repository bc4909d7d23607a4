use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Location and behaviour of the JSON catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Indentation used when the collection is written back.
    #[serde(default = "default_indent")]
    pub indent: String,
    /// Fail reads of an unparsable file instead of treating it as empty.
    #[serde(default)]
    pub strict_decode: bool,
    /// `price`/`stock` of `0` count as missing values.
    #[serde(default = "default_true")]
    pub reject_zero_numbers: bool,
    /// Skip the record being updated when checking a patched `code` for duplicates.
    #[serde(default)]
    pub exclude_self_on_update: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            indent: default_indent(),
            strict_decode: false,
            reject_zero_numbers: true,
            exclude_self_on_update: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_store_path() -> PathBuf { PathBuf::from("products.json") }
fn default_indent() -> String { "\t".to_string() }
fn default_true() -> bool { true }
fn default_log_format() -> String { "compact".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file at `CONFIG_PATH` first; see [`AppConfig::load_or_env_from`].
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// Load `path`; only when the file does not exist, build the config from
    /// `SERVER_HOST`, `SERVER_PORT`, `PRODUCTS_PATH` and `TOKIO_WORKER_THREADS`.
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("config file {path}"))),
        };
        cfg.normalize_and_validate()
            .map_err(|e| e.context(format!("config file {path}")))?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg.store.normalize_from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.normalize_from_env();
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        // PRODUCTS_PATH wins over the TOML value
        if let Ok(path) = std::env::var("PRODUCTS_PATH") {
            if !path.trim().is_empty() {
                self.path = PathBuf::from(path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("store.path is empty; set it in config.toml or PRODUCTS_PATH"));
        }
        if self.path.file_name().is_none() {
            return Err(anyhow!("store.path must name a file, got {}", self.path.display()));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(anyhow!("store.indent may only contain spaces and tabs"));
        }
        Ok(())
    }
}
