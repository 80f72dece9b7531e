pub mod address;
pub mod alchemy;
pub mod error;
pub mod etherscan;
pub mod quantity;
pub mod rpc;
pub mod search;
pub mod services;
pub mod types;
pub mod units;

pub use alchemy::AlchemyClient;
pub use error::ProviderError;
pub use etherscan::EtherscanClient;
pub use services::{BATCH_WINDOW, Explorer};
pub use types::{AccountTx, Block, NftMetadata, OpenSeaMetadata, Transaction};
