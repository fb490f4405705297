use anyhow::Result;
use serde::Deserialize;
use anyhow::{anyhow, Context};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Directory of static frontend assets served for unmatched GET paths.
    #[serde(default)]
    pub frontend_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            log_format: LogFormat::Compact,
            frontend_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }
fn default_data_file() -> String { "data/data.json".into() }

/// Path of the config file: `CONFIG_PATH`, or `config.toml` in the working dir.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    // keep the io::Error as the root cause so callers can tell "missing" apart
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content).with_context(|| format!("invalid config file {path}"))
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file first; only when that file does not exist, defaults overridden by
    /// `SERVER_HOST`, `SERVER_PORT`, `DATA_FILE` and `TOKIO_WORKER_THREADS`.
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            // no config file: fall back to env vars on top of defaults
            Err(e) if is_missing_file(&e) => Self::from_env(),
            // unreadable or malformed file: surface it instead of silently using defaults
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()
            .with_context(|| format!("invalid configuration (config file: {path})"))?;
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
        if let Ok(path) = std::env::var("DATA_FILE") {
            cfg.storage.data_file = path;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // normalize server: empty host, zero worker threads, blank frontend dir
        self.server.normalize()?;
        // storage must name a data file
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        // blank host means "listen everywhere"
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        // u16 caps the upper bound; only 0 needs rejecting
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        // missing or zero worker threads fall back to 4
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        // an empty frontend_dir disables static serving
        if let Some(dir) = &self.frontend_dir {
            if dir.trim().is_empty() { self.frontend_dir = None; }
        }
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file is empty; set it in config.toml or DATA_FILE"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() -> Result<()> {
        let mut cfg = load_from_str("")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.log_format, LogFormat::Compact);
        assert_eq!(cfg.storage.data_file, "data/data.json");
        assert_eq!(cfg.bind_addr()?.to_string(), "0.0.0.0:8000");
        Ok(())
    }

    #[test]
    fn sections_override_defaults() -> Result<()> {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            worker_threads = 0
            log_format = "json"
            frontend_dir = "frontend"

            [storage]
            data_file = "/tmp/meds.json"
        "#;
        let mut cfg = load_from_str(toml)?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.port, 9000);
        // zero worker threads falls back to the default
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.log_format, LogFormat::Json);
        assert_eq!(cfg.server.frontend_dir.as_deref(), Some("frontend"));
        assert_eq!(cfg.storage.data_file, "/tmp/meds.json");
        Ok(())
    }

    #[test]
    fn rejects_port_zero_and_empty_data_file() {
        let mut cfg = load_from_str("[server]\nport = 0\n").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = load_from_str("[storage]\ndata_file = \"  \"\n").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn load_from_file_reads_toml() -> Result<()> {
        let path = std::env::temp_dir().join(format!("medicine_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nport = 8123\n")?;
        let cfg = load_from_file(path.to_str().ok_or_else(|| anyhow!("non-utf8 temp path"))?)?;
        assert_eq!(cfg.server.port, 8123);
        assert_eq!(cfg.server.host, "0.0.0.0");
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent/medicine-config.toml").is_err());
    }

    #[test]
    fn missing_config_file_falls_back_to_env_defaults() -> Result<()> {
        let cfg = AppConfig::load_or_env_from("/nonexistent/medicine-config.toml")?;
        assert!(!cfg.storage.data_file.is_empty());
        assert_eq!(cfg.server.worker_threads.map(|w| w > 0), Some(true));
        Ok(())
    }

    #[test]
    fn invalid_config_file_is_reported_not_replaced() -> Result<()> {
        let path = std::env::temp_dir().join(format!("medicine_cfg_{}.toml", uuid::Uuid::new_v4()));
        let path_str = path.to_str().ok_or_else(|| anyhow!("non-utf8 temp path"))?.to_string();

        // fails validation
        std::fs::write(&path, "[server]\nport = 0\n\n[storage]\ndata_file = \"/srv/meds.json\"\n")?;
        let res = AppConfig::load_or_env_from(&path_str);

        // fails to parse
        std::fs::write(&path, "[server\nport = ")?;
        let parse_res = AppConfig::load_or_env_from(&path_str);
        let _ = std::fs::remove_file(&path);

        let err = res.expect_err("port 0 must be rejected");
        assert!(format!("{err:#}").contains("server.port"));
        assert!(parse_res.is_err());
        Ok(())
    }

    #[test]
    fn valid_config_file_wins_over_env() -> Result<()> {
        let path = std::env::temp_dir().join(format!("medicine_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[storage]\ndata_file = \"/srv/meds.json\"\n")?;
        let res = AppConfig::load_or_env_from(path.to_str().ok_or_else(|| anyhow!("non-utf8 temp path"))?);
        let _ = std::fs::remove_file(&path);

        assert_eq!(res?.storage.data_file, "/srv/meds.json");
        Ok(())
    }
}
