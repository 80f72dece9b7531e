use crate::quantity;
use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Block header as returned by `eth_getBlockByNumber` with hashes only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(deserialize_with = "quantity::u64")]
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    #[serde(deserialize_with = "quantity::u64")]
    pub timestamp: u64,
    #[serde(default)]
    pub miner: String,
    #[serde(default)]
    pub nonce: String,
    #[serde(
        default,
        deserialize_with = "quantity::u256",
        serialize_with = "quantity::serialize_u256"
    )]
    pub difficulty: U256,
    #[serde(
        deserialize_with = "quantity::u256",
        serialize_with = "quantity::serialize_u256"
    )]
    pub gas_used: U256,
    #[serde(
        deserialize_with = "quantity::u256",
        serialize_with = "quantity::serialize_u256"
    )]
    pub gas_limit: U256,
    #[serde(
        default,
        deserialize_with = "quantity::opt_u256",
        serialize_with = "quantity::serialize_opt_u256"
    )]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default, deserialize_with = "quantity::opt_u64")]
    pub size: Option<u64>,
    #[serde(default)]
    pub extra_data: String,
    #[serde(default)]
    pub transactions: Vec<String>,
}

impl Block {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.timestamp as i64, 0)
    }
}

/// Transaction as returned by `eth_getTransactionByHash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    #[serde(default)]
    pub block_hash: Option<String>,
    // null while pending
    #[serde(default, deserialize_with = "quantity::opt_u64")]
    pub block_number: Option<u64>,
    #[serde(default, deserialize_with = "quantity::opt_u64")]
    pub transaction_index: Option<u64>,
    pub from: String,
    // null for contract creation
    #[serde(default)]
    pub to: Option<String>,
    #[serde(
        deserialize_with = "quantity::u256",
        serialize_with = "quantity::serialize_u256"
    )]
    pub value: U256,
    #[serde(
        default,
        deserialize_with = "quantity::u256",
        serialize_with = "quantity::serialize_u256"
    )]
    pub gas: U256,
    #[serde(
        default,
        deserialize_with = "quantity::opt_u256",
        serialize_with = "quantity::serialize_opt_u256"
    )]
    pub gas_price: Option<U256>,
    #[serde(default, deserialize_with = "quantity::u64")]
    pub nonce: u64,
    #[serde(default)]
    pub input: String,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        self.block_number.is_none()
    }
}

/// One row of the block explorer's `txlist` response. Numbers arrive as
/// decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTx {
    #[serde(deserialize_with = "quantity::u64")]
    pub block_number: u64,
    #[serde(deserialize_with = "quantity::u64")]
    pub time_stamp: u64,
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(
        deserialize_with = "quantity::u256",
        serialize_with = "quantity::serialize_u256"
    )]
    pub value: U256,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub gas_price: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub is_error: String,
    #[serde(default)]
    pub confirmations: String,
    #[serde(default)]
    pub function_name: String,
    #[serde(default)]
    pub contract_address: String,
}

impl AccountTx {
    pub fn failed(&self) -> bool {
        self.is_error == "1"
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.time_stamp as i64, 0)
    }
}

/// Marketplace data the provider attaches to a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSeaMetadata {
    #[serde(default)]
    pub floor_price: Option<f64>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub discord_url: Option<String>,
    #[serde(default)]
    pub last_ingested_at: Option<String>,
}

/// NFT contract metadata, flattened out of the provider envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftMetadata {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub total_supply: Option<String>,
    pub token_type: Option<String>,
    pub open_sea: Option<OpenSeaMetadata>,
}

/// Raw `getContractMetadata` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadataResponse {
    pub address: String,
    #[serde(default)]
    pub contract_metadata: ContractMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub open_sea: Option<OpenSeaMetadata>,
}

impl From<ContractMetadataResponse> for NftMetadata {
    fn from(resp: ContractMetadataResponse) -> Self {
        let meta = resp.contract_metadata;
        NftMetadata {
            address: resp.address,
            name: meta.name,
            symbol: meta.symbol,
            total_supply: meta.total_supply,
            token_type: meta.token_type,
            open_sea: meta.open_sea,
        }
    }
}
