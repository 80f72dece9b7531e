use crate::error::{ProviderError, Result};
use crate::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::quantity;
use crate::types::{Block, ContractMetadataResponse, NftMetadata, Transaction};
use ethscope_config::Config;
use log::debug;
use primitive_types::U256;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};

/// Client for the blockchain-data provider: JSON-RPC for chain data and the
/// NFT REST API for contract metadata.
pub struct AlchemyClient {
    http: Client,
    rpc_url: String,
    nft_url: String,
    next_id: AtomicU64,
}

impl AlchemyClient {
    pub fn new(rpc_url: &str, nft_url: &str) -> Self {
        Self::with_client(Client::new(), rpc_url, nft_url)
    }

    pub fn with_client(http: Client, rpc_url: &str, nft_url: &str) -> Self {
        AlchemyClient {
            http,
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            nft_url: nft_url.trim_end_matches('/').to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.alchemy_rpc_url(), &cfg.alchemy_nft_base_url())
    }

    /// Issue one JSON-RPC call. A `null` result maps to `None`.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Option<T>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("RPC {} (id={})", method, id);

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&JsonRpcRequest::new(id, method, params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let rpc: JsonRpcResponse = serde_json::from_slice(&bytes)?;
        if let Some(err) = rpc.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        match rpc.result {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    async fn call_required<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        self.call(method, params)
            .await?
            .ok_or_else(|| ProviderError::InvalidResponse(format!("{} returned null", method)))
    }

    pub async fn block_number(&self) -> Result<u64> {
        let raw: Value = self.call_required("eth_blockNumber", json!([])).await?;
        quantity::parse_u64(&raw)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("invalid block number: {}", raw)))
    }

    pub async fn get_block(&self, number: u64) -> Result<Option<Block>> {
        self.call(
            "eth_getBlockByNumber",
            json!([format!("0x{:x}", number), false]),
        )
        .await
    }

    pub async fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>> {
        self.call("eth_getTransactionByHash", json!([hash])).await
    }

    pub async fn get_balance(&self, address: &str, block_tag: &str) -> Result<U256> {
        let raw: Value = self
            .call_required("eth_getBalance", json!([address, block_tag]))
            .await?;
        quantity::parse_u256(&raw)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("invalid balance: {}", raw)))
    }

    pub async fn get_contract_metadata(&self, contract_address: &str) -> Result<NftMetadata> {
        let url = format!("{}/getContractMetadata", self.nft_url);
        let response = self
            .http
            .get(&url)
            .query(&[("contractAddress", contract_address)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let raw: ContractMetadataResponse = serde_json::from_slice(&bytes)?;
        Ok(raw.into())
    }
}
