use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::{fs, path::Path, path::PathBuf};

/// Environment variable holding the Alchemy API key.
pub const ALCHEMY_KEY_ENV: &str = "ALCHEMY_API_KEY";
/// Environment variable holding the Etherscan API key.
pub const ETHERSCAN_KEY_ENV: &str = "ETHERSCAN_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot find home directory")]
    NoHomeDir,
    #[error("Failed to access configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration file format error: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Ethereum networks served by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Network {
    #[default]
    #[serde(rename = "eth-mainnet")]
    Mainnet,
    #[serde(rename = "eth-sepolia")]
    Sepolia,
    #[serde(rename = "eth-holesky")]
    Holesky,
}

impl Network {
    /// Subdomain used by the provider for this network.
    pub fn slug(&self) -> &'static str {
        match self {
            Network::Mainnet => "eth-mainnet",
            Network::Sepolia => "eth-sepolia",
            Network::Holesky => "eth-holesky",
        }
    }

    /// Host of the block-explorer API for this network.
    pub fn etherscan_host(&self) -> &'static str {
        match self {
            Network::Mainnet => "api.etherscan.io",
            Network::Sepolia => "api-sepolia.etherscan.io",
            Network::Holesky => "api-holesky.etherscan.io",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eth-mainnet" | "mainnet" => Ok(Network::Mainnet),
            "eth-sepolia" | "sepolia" => Ok(Network::Sepolia),
            "eth-holesky" | "holesky" => Ok(Network::Holesky),
            _ => Err(ConfigError::InvalidValue {
                key: "network".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alchemy_api_key: String,
    #[serde(default)]
    pub etherscan_api_key: String,
    #[serde(default)]
    pub network: Network,
    /// Overrides the JSON-RPC endpoint derived from `network`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alchemy_url: Option<String>,
    /// Overrides the NFT API endpoint derived from `network`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alchemy_nft_url: Option<String>,
    /// Overrides the block-explorer endpoint derived from `network`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etherscan_api_url: Option<String>,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    fn expand_path(path: &str) -> PathBuf {
        let expanded = shellexpand::tilde(path);
        PathBuf::from(expanded.into_owned())
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".ethscope/config.json"))
    }

    /// JSON-RPC endpoint of the data provider.
    pub fn alchemy_rpc_url(&self) -> String {
        match &self.alchemy_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.g.alchemy.com/v2/{}",
                self.network.slug(),
                self.alchemy_api_key
            ),
        }
    }

    /// Base URL of the provider's NFT REST API.
    pub fn alchemy_nft_base_url(&self) -> String {
        match &self.alchemy_nft_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.g.alchemy.com/nft/v2/{}",
                self.network.slug(),
                self.alchemy_api_key
            ),
        }
    }

    /// Block-explorer API endpoint.
    pub fn etherscan_url(&self) -> String {
        match &self.etherscan_api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}/api", self.network.etherscan_host()),
        }
    }

    /// Load from the default location, then apply the API keys found in the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// File contents only, creating the default file when missing.
    pub fn load_file() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            return Self::load_from(&path);
        }
        log::info!(
            "Configuration file not found. Creating default configuration: {:?}",
            path
        );
        let cfg = Self::default();
        cfg.save_to(&path)?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let path = Self::expand_path(&path.to_string_lossy());
        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)
    }

    /// Overlay API keys from the environment. Empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ALCHEMY_KEY_ENV).filter(|k| !k.is_empty()) {
            self.alchemy_api_key = key;
        }
        if let Some(key) = lookup(ETHERSCAN_KEY_ENV).filter(|k| !k.is_empty()) {
            self.etherscan_api_key = key;
        }
    }

    /// Update a single key in memory. Callers persist with `save`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "alchemy_api_key" => self.alchemy_api_key = value.to_string(),
            "etherscan_api_key" => self.etherscan_api_key = value.to_string(),
            "network" => self.network = value.parse()?,
            "alchemy_url" => self.alchemy_url = optional(value),
            "alchemy_nft_url" => self.alchemy_nft_url = optional(value),
            "etherscan_api_url" => self.etherscan_api_url = optional(value),
            "bind_address" => self.bind_address = value.to_string(),
            "port" => {
                self.port = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn view(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn init_default() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        Self::default().save_to(&path)?;
        Ok(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alchemy_api_key: String::new(),
            etherscan_api_key: String::new(),
            network: Network::default(),
            alchemy_url: None,
            alchemy_nft_url: None,
            etherscan_api_url: None,
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}
