//! Data-access functions consumed by the views.
//!
//! Every function performs its remote call(s), logs any failure and returns
//! an empty default (`[]`, `None` or zero), so callers never see an error.

use crate::alchemy::AlchemyClient;
use crate::error::{ProviderError, Result};
use crate::etherscan::EtherscanClient;
use crate::types::{AccountTx, Block, NftMetadata, Transaction};
use crate::units::parse_quantity;
use ethscope_config::Config;
use futures::future::try_join_all;
use log::{error, info};
use primitive_types::U256;

/// Maximum number of records fetched concurrently by the batch lookups.
pub const BATCH_WINDOW: usize = 10;

pub struct Explorer {
    alchemy: AlchemyClient,
    etherscan: EtherscanClient,
}

impl Explorer {
    pub fn new(alchemy: AlchemyClient, etherscan: EtherscanClient) -> Self {
        Explorer { alchemy, etherscan }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            AlchemyClient::from_config(cfg),
            EtherscanClient::from_config(cfg),
        )
    }

    /// The ten most recent blocks, newest first.
    pub async fn last_ten_blocks(&self) -> Vec<Block> {
        match self.fetch_last_blocks().await {
            Ok(blocks) => {
                info!("✅ Fetched {} latest blocks", blocks.len());
                blocks
            }
            Err(e) => {
                error!("❌ Error fetching last ten blocks: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_last_blocks(&self) -> Result<Vec<Block>> {
        let latest = self.alchemy.block_number().await?;
        let oldest = latest.saturating_sub(BATCH_WINDOW as u64 - 1);

        let lookups = (oldest..=latest)
            .rev()
            .map(|number| self.alchemy.get_block(number));
        let blocks = try_join_all(lookups).await?;

        Ok(blocks.into_iter().flatten().collect())
    }

    /// The first ten transactions of the latest block.
    pub async fn last_ten_txs(&self) -> Vec<Transaction> {
        match self.fetch_last_txs().await {
            Ok(txs) => {
                info!("✅ Fetched {} latest transactions", txs.len());
                txs
            }
            Err(e) => {
                error!("❌ Error fetching last ten transactions: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_last_txs(&self) -> Result<Vec<Transaction>> {
        let latest = self.alchemy.block_number().await?;
        let block = self.alchemy.get_block(latest).await?.ok_or_else(|| {
            ProviderError::InvalidResponse(format!("latest block {} not available", latest))
        })?;

        let lookups = block
            .transactions
            .iter()
            .take(BATCH_WINDOW)
            .map(|hash| self.alchemy.get_transaction(hash));
        let txs = try_join_all(lookups).await?;

        Ok(txs.into_iter().flatten().collect())
    }

    /// Block by number; accepts decimal or `0x`-hex.
    pub async fn individual_block(&self, block_number: &str) -> Option<Block> {
        let result = match parse_quantity(block_number) {
            Some(number) => self.alchemy.get_block(number).await,
            None => Err(ProviderError::InvalidInput(format!(
                "invalid block number '{}'",
                block_number
            ))),
        };

        result.unwrap_or_else(|e| {
            error!("❌ Error fetching block {}: {}", block_number, e);
            None
        })
    }

    pub async fn individual_transaction(&self, tx_hash: &str) -> Option<Transaction> {
        self.alchemy
            .get_transaction(tx_hash)
            .await
            .unwrap_or_else(|e| {
                error!("❌ Error fetching transaction {}: {}", tx_hash, e);
                None
            })
    }

    /// Balance in wei at the latest block.
    pub async fn account_balance(&self, address: &str) -> U256 {
        self.alchemy
            .get_balance(address, "latest")
            .await
            .unwrap_or_else(|e| {
                error!("❌ Error fetching balance for address {}: {}", address, e);
                U256::zero()
            })
    }

    pub async fn account_txs(&self, address: &str) -> Vec<AccountTx> {
        self.etherscan
            .account_txs(address)
            .await
            .unwrap_or_else(|e| {
                error!(
                    "❌ Error fetching transactions for address {}: {}",
                    address, e
                );
                Vec::new()
            })
    }

    /// Contract-level metadata of an NFT collection. The token id only
    /// identifies the search; the lookup is per contract.
    pub async fn nft_metadata(&self, nft_address: &str, token_id: &str) -> Option<NftMetadata> {
        match self.alchemy.get_contract_metadata(nft_address).await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                error!(
                    "❌ Error fetching NFT metadata for {} with token ID {}: {}",
                    nft_address, token_id, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn block_json(number: u64, txs: &[String]) -> Value {
        json!({
            "number": format!("0x{:x}", number),
            "hash": format!("0x{:064x}", number + 1),
            "parentHash": format!("0x{:064x}", number),
            "timestamp": "0x6553f100",
            "miner": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
            "gasUsed": "0x1c9c380",
            "gasLimit": "0x1c9c380",
            "baseFeePerGas": "0x3b9aca00",
            "transactions": txs,
        })
    }

    fn tx_json(hash: &str) -> Value {
        json!({
            "hash": hash,
            "blockHash": format!("0x{:064x}", 1),
            "blockNumber": "0x64",
            "transactionIndex": "0x0",
            "from": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
            "to": "0x388c818ca8b9251b393131c08a736a67ccb19297",
            "value": "0xde0b6b3a7640000",
            "gas": "0x5208",
            "gasPrice": "0x3b9aca00",
            "nonce": "0x1",
            "input": "0x"
        })
    }

    fn rpc_result(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0", "id": 1, "result": result
        }))
    }

    /// Answers `eth_getBlockByNumber` and `eth_getTransactionByHash` with a
    /// record built from the requested parameter.
    struct Echo {
        txs_per_block: usize,
    }

    impl Respond for Echo {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            let param = body["params"][0].as_str().unwrap().to_string();
            match body["method"].as_str().unwrap() {
                "eth_getBlockByNumber" => {
                    let number = u64::from_str_radix(&param[2..], 16).unwrap();
                    let txs: Vec<String> = (0..self.txs_per_block)
                        .map(|i| format!("0x{:064x}", i))
                        .collect();
                    rpc_result(block_json(number, &txs))
                }
                "eth_getTransactionByHash" => rpc_result(tx_json(&param)),
                other => panic!("unexpected method {}", other),
            }
        }
    }

    async fn mount_chain(server: &MockServer, latest: u64, txs_per_block: usize) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
            .respond_with(rpc_result(json!(format!("0x{:x}", latest))))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .respond_with(Echo { txs_per_block })
            .with_priority(10)
            .mount(server)
            .await;
    }

    fn explorer(server: &MockServer) -> Explorer {
        Explorer::new(
            AlchemyClient::new(&server.uri(), &format!("{}/nft", server.uri())),
            EtherscanClient::new(&format!("{}/api", server.uri()), "key"),
        )
    }

    fn unreachable() -> Explorer {
        Explorer::new(
            AlchemyClient::new("http://127.0.0.1:1", "http://127.0.0.1:1/nft"),
            EtherscanClient::new("http://127.0.0.1:1/api", "key"),
        )
    }

    #[tokio::test]
    async fn test_last_ten_blocks_newest_first() {
        let server = MockServer::start().await;
        mount_chain(&server, 100, 0).await;

        let blocks = explorer(&server).last_ten_blocks().await;
        let numbers: Vec<u64> = blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, (91..=100).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_last_blocks_near_genesis() {
        let server = MockServer::start().await;
        mount_chain(&server, 3, 0).await;

        let blocks = explorer(&server).last_ten_blocks().await;
        let numbers: Vec<u64> = blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_one_failed_block_empties_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "eth_getBlockByNumber",
                "params": ["0x5f", false]
            })))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;
        mount_chain(&server, 100, 0).await;

        assert!(explorer(&server).last_ten_blocks().await.is_empty());
    }

    #[tokio::test]
    async fn test_last_ten_txs_capped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getTransactionByHash" })))
            .respond_with(Echo { txs_per_block: 0 })
            .expect(BATCH_WINDOW as u64)
            .with_priority(1)
            .mount(&server)
            .await;
        mount_chain(&server, 100, 25).await;

        let txs = explorer(&server).last_ten_txs().await;
        assert_eq!(txs.len(), BATCH_WINDOW);
        assert_eq!(txs[0].hash, format!("0x{:064x}", 0));
        assert_eq!(txs[9].hash, format!("0x{:064x}", 9));
    }

    #[tokio::test]
    async fn test_last_txs_of_empty_block() {
        let server = MockServer::start().await;
        mount_chain(&server, 100, 0).await;

        assert!(explorer(&server).last_ten_txs().await.is_empty());
    }

    #[tokio::test]
    async fn test_individual_lookups() {
        let server = MockServer::start().await;
        mount_chain(&server, 100, 2).await;
        let explorer = explorer(&server);

        let block = explorer.individual_block("42").await.unwrap();
        assert_eq!(block.number, 42);
        assert_eq!(block.transactions.len(), 2);

        let block = explorer.individual_block("0x2a").await.unwrap();
        assert_eq!(block.number, 42);

        let hash = format!("0x{:064x}", 7);
        let tx = explorer.individual_transaction(&hash).await.unwrap();
        assert_eq!(tx.hash, hash);
        assert_eq!(tx.value, U256::exp10(18));
    }

    #[tokio::test]
    async fn test_unparsable_block_number_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        assert!(explorer(&server).individual_block("latest-ish").await.is_none());
    }

    #[tokio::test]
    async fn test_account_balance() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "eth_getBalance",
                "params": ["0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae", "latest"]
            })))
            .respond_with(rpc_result(json!("0x1bc16d674ec80000")))
            .mount(&server)
            .await;

        let balance = explorer(&server)
            .account_balance("0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae")
            .await;
        assert_eq!(balance, U256::from(2_000_000_000_000_000_000u64));
    }

    #[tokio::test]
    async fn test_defaults_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let explorer = explorer(&server);

        assert!(explorer.last_ten_blocks().await.is_empty());
        assert!(explorer.last_ten_txs().await.is_empty());
        assert!(explorer.individual_block("1").await.is_none());
        assert!(explorer.individual_transaction("0x01").await.is_none());
        assert_eq!(explorer.account_balance("0x01").await, U256::zero());
        assert!(explorer.account_txs("0x01").await.is_empty());
        assert!(explorer.nft_metadata("0x01", "1").await.is_none());
    }

    #[tokio::test]
    async fn test_defaults_on_rpc_error_object() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1,
                "error": { "code": -32000, "message": "header not found" }
            })))
            .mount(&server)
            .await;
        let explorer = explorer(&server);

        assert!(explorer.last_ten_blocks().await.is_empty());
        assert!(explorer.last_ten_txs().await.is_empty());
        assert!(explorer.individual_block("1").await.is_none());
        assert!(explorer.individual_transaction("0x01").await.is_none());
        assert_eq!(explorer.account_balance("0x01").await, U256::zero());
        assert!(explorer.account_txs("0x01").await.is_empty());
        assert!(explorer.nft_metadata("0x01", "1").await.is_none());
    }

    #[tokio::test]
    async fn test_defaults_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let explorer = explorer(&server);

        assert!(explorer.last_ten_blocks().await.is_empty());
        assert_eq!(explorer.account_balance("0x01").await, U256::zero());
        assert!(explorer.account_txs("0x01").await.is_empty());
        assert!(explorer.nft_metadata("0x01", "1").await.is_none());
    }

    #[tokio::test]
    async fn test_defaults_when_unreachable() {
        let explorer = unreachable();

        assert!(explorer.last_ten_blocks().await.is_empty());
        assert!(explorer.last_ten_txs().await.is_empty());
        assert!(explorer.individual_block("1").await.is_none());
        assert!(explorer.individual_transaction("0x01").await.is_none());
        assert_eq!(explorer.account_balance("0x01").await, U256::zero());
        assert!(explorer.account_txs("0x01").await.is_empty());
        assert!(explorer.nft_metadata("0x01", "1").await.is_none());
    }
}
