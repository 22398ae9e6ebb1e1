use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// How the store picks the id of a newly created toy.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Counter that only moves forward; ids are never reused.
    #[default]
    Monotonic,
    /// `len + 1`; collides with live ids once anything was deleted.
    Count,
}

impl std::str::FromStr for IdStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "count" => Ok(Self::Count),
            other => Err(anyhow!("unknown id strategy `{other}`; expected `monotonic` or `count`")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { id_strategy: IdStrategy::default(), seed: default_seed() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 5000 }
fn default_seed() -> bool { true }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config built purely from environment variables, used when no config file exists.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Ok(p) = std::env::var("SERVER_PORT") {
            cfg.server.port = p
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT `{p}` is not a valid port: {e}"))?;
        }
        cfg.server.worker_threads = match std::env::var("TOKIO_WORKER_THREADS") {
            Ok(v) => Some(
                v.trim()
                    .parse::<usize>()
                    .map_err(|e| anyhow!("TOKIO_WORKER_THREADS `{v}` is not a thread count: {e}"))?,
            ),
            Err(_) => None,
        };
        if let Ok(s) = std::env::var("TOY_ID_STRATEGY") {
            cfg.store.id_strategy = s.parse()?;
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// File config if present, otherwise the environment. A file that exists but is invalid is an error.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        if std::path::Path::new(&path).exists() {
            let mut cfg = load_from_file(&path)?;
            cfg.normalize_and_validate()?;
            Ok(cfg)
        } else {
            Self::from_env()
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    /// `host:port` for display; IPv6 literals are bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
