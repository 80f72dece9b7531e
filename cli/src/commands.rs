use chrono::{DateTime, Utc};
use ethscope_core::address::{short_hash, to_checksum_address};
use ethscope_core::search::NftSearch;
use ethscope_core::units::{format_ether, format_gwei};
use ethscope_core::{AccountTx, Block, Explorer, NftMetadata, Transaction};
use primitive_types::U256;

#[derive(clap::Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Query(QueryCommands),

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigCommands,
    },
}

/// Commands that read chain data through the providers.
#[derive(clap::Subcommand)]
pub enum QueryCommands {
    /// Show the ten most recent blocks
    Blocks,

    /// Show up to ten transactions from the latest block
    Txs,

    /// Look up a block by number (decimal or 0x-hex)
    Block { number: String },

    /// Look up a transaction by hash
    Tx { hash: String },

    /// Check the ETH balance of an address
    Balance { address: String },

    /// List the most recent transactions of an address
    History { address: String },

    /// Show collection metadata of an NFT contract
    Nft {
        address: String,
        #[arg(help = "Token id within the collection")]
        token_id: String,
    },
}

#[derive(clap::Subcommand)]
pub enum ConfigCommands {
    View,
    Set { key: String, value: String },
    Init,
}

fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn display_address(address: &str) -> String {
    to_checksum_address(address).unwrap_or_else(|| address.to_string())
}

pub fn render_blocks(blocks: &[Block]) -> String {
    if blocks.is_empty() {
        return "❌ No blocks available".to_string();
    }
    let mut lines = vec![format!("📦 Latest {} blocks", blocks.len())];
    lines.extend(blocks.iter().map(|block| {
        format!(
            "  #{:<10} {}  {:>4} txs  miner {}",
            block.number,
            format_time(block.datetime()),
            block.transactions.len(),
            short_hash(&block.miner)
        )
    }));
    lines.join("\n")
}

pub fn render_block(block: &Block) -> String {
    let mut lines = vec![
        format!("📦 Block #{}", block.number),
        format!("  Hash:        {}", block.hash),
        format!("  Parent:      {}", block.parent_hash),
        format!("  Time:        {}", format_time(block.datetime())),
        format!("  Miner:       {}", display_address(&block.miner)),
        format!("  Gas used:    {} / {}", block.gas_used, block.gas_limit),
    ];
    if let Some(base_fee) = block.base_fee_per_gas {
        lines.push(format!("  Base fee:    {} Gwei", format_gwei(base_fee)));
    }
    lines.push(format!("  Transactions: {}", block.transactions.len()));
    lines.join("\n")
}

pub fn render_transactions(txs: &[Transaction]) -> String {
    if txs.is_empty() {
        return "❌ No transactions available".to_string();
    }
    let mut lines = vec![format!("🔁 Latest {} transactions", txs.len())];
    lines.extend(txs.iter().map(|tx| {
        format!(
            "  {}  {} → {}  {} ETH{}",
            short_hash(&tx.hash),
            short_hash(&tx.from),
            tx.to
                .as_deref()
                .map(short_hash)
                .unwrap_or_else(|| "contract creation".to_string()),
            format_ether(tx.value),
            if tx.is_pending() { "  (pending)" } else { "" }
        )
    }));
    lines.join("\n")
}

pub fn render_transaction(tx: &Transaction) -> String {
    let status = match tx.block_number {
        Some(number) => format!("included in block #{}", number),
        None => "pending".to_string(),
    };
    let to = tx
        .to
        .as_deref()
        .map(display_address)
        .unwrap_or_else(|| "contract creation".to_string());

    let mut lines = vec![
        format!("🔁 Transaction {}", tx.hash),
        format!("  Status:    {}", status),
        format!("  From:      {}", display_address(&tx.from)),
        format!("  To:        {}", to),
        format!("  Value:     {} ETH", format_ether(tx.value)),
        format!("  Gas limit: {}", tx.gas),
    ];
    if let Some(price) = tx.gas_price {
        lines.push(format!("  Gas price: {} Gwei", format_gwei(price)));
    }
    lines.push(format!("  Nonce:     {}", tx.nonce));
    lines.join("\n")
}

pub fn render_balance(address: &str, balance: U256) -> String {
    format!("💰 {}: {} ETH", display_address(address), format_ether(balance))
}

pub fn render_history(address: &str, txs: &[AccountTx]) -> String {
    if txs.is_empty() {
        return format!("❌ No transactions found for {}", address);
    }
    let mut lines = vec![format!(
        "📍 {} transactions for {}",
        txs.len(),
        display_address(address)
    )];
    lines.extend(txs.iter().map(|tx| {
        format!(
            "  #{:<10} {}  {}  {} → {}  {} ETH{}",
            tx.block_number,
            format_time(tx.datetime()),
            short_hash(&tx.hash),
            short_hash(&tx.from),
            short_hash(&tx.to),
            format_ether(tx.value),
            if tx.failed() { "  (failed)" } else { "" }
        )
    }));
    lines.join("\n")
}

pub fn render_nft(metadata: &NftMetadata, token_id: &str) -> String {
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        format!("🖼️  {} (token #{})", display_address(&metadata.address), token_id),
        format!("  Name:         {}", or_dash(&metadata.name)),
        format!("  Symbol:       {}", or_dash(&metadata.symbol)),
        format!("  Total supply: {}", or_dash(&metadata.total_supply)),
        format!("  Token type:   {}", or_dash(&metadata.token_type)),
    ];
    if let Some(open_sea) = &metadata.open_sea {
        lines.push(format!("  Collection:   {}", or_dash(&open_sea.collection_name)));
        if let Some(floor) = open_sea.floor_price {
            lines.push(format!("  Floor price:  {} ETH", floor));
        }
        if let Some(description) = &open_sea.description {
            lines.push(format!("  Description:  {}", description));
        }
    }
    lines.join("\n")
}

/// Run a data command and return the text to print.
pub async fn execute(explorer: &Explorer, command: QueryCommands) -> String {
    match command {
        QueryCommands::Blocks => render_blocks(&explorer.last_ten_blocks().await),
        QueryCommands::Txs => render_transactions(&explorer.last_ten_txs().await),
        QueryCommands::Block { number } => match explorer.individual_block(&number).await {
            Some(block) => render_block(&block),
            None => format!("❌ Block not found: {}", number),
        },
        QueryCommands::Tx { hash } => match explorer.individual_transaction(&hash).await {
            Some(tx) => render_transaction(&tx),
            None => format!("❌ Transaction not found: {}", hash),
        },
        QueryCommands::Balance { address } => {
            let balance = explorer.account_balance(&address).await;
            render_balance(&address, balance)
        }
        QueryCommands::History { address } => {
            let txs = explorer.account_txs(&address).await;
            render_history(&address, &txs)
        }
        QueryCommands::Nft { address, token_id } => {
            let search = NftSearch {
                nft_address: Some(address),
                token_id: Some(token_id),
            };
            let (address, token_id) = match search.validate() {
                Ok(fields) => fields,
                Err(e) => return format!("❌ {}", e),
            };
            match explorer.nft_metadata(&address, &token_id).await {
                Some(metadata) => render_nft(&metadata, &token_id),
                None => "❌ Failed to fetch NFT metadata. Please try again.".to_string(),
            }
        }
    }
}
