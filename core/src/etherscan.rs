use crate::error::{ProviderError, Result};
use crate::types::AccountTx;
use ethscope_config::Config;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Number of rows requested from the `txlist` endpoint.
pub const ACCOUNT_TX_PAGE_SIZE: u32 = 20;
const END_BLOCK: u64 = 99_999_999;

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

/// Client for the block-explorer REST API.
pub struct EtherscanClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self::with_client(Client::new(), api_url, api_key)
    }

    pub fn with_client(http: Client, api_url: &str, api_key: &str) -> Self {
        EtherscanClient {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.etherscan_url(), &cfg.etherscan_api_key)
    }

    /// First page of an account's normal transactions, oldest first.
    pub async fn account_txs(&self, address: &str) -> Result<Vec<AccountTx>> {
        let page_size = ACCOUNT_TX_PAGE_SIZE.to_string();
        let end_block = END_BLOCK.to_string();
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", end_block.as_str()),
                ("page", "1"),
                ("offset", page_size.as_str()),
                ("sort", "asc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let data: ExplorerResponse = serde_json::from_slice(&bytes)?;
        debug!(
            "txlist for {}: status={} message={}",
            address, data.status, data.message
        );

        match data.result {
            Value::Array(rows) => {
                let txs = rows
                    .into_iter()
                    .map(serde_json::from_value::<AccountTx>)
                    .collect::<std::result::Result<Vec<AccountTx>, _>>()?;
                Ok(txs)
            }
            Value::Null => Ok(Vec::new()),
            other => {
                let detail = match other {
                    Value::String(s) => s,
                    v => v.to_string(),
                };
                warn!("Block explorer rejected txlist for {}: {}", address, detail);
                Err(ProviderError::Explorer(format!("{}: {}", data.message, detail)))
            }
        }
    }
}
