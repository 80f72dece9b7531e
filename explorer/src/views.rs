use crate::html::{self, escape, field, heading, join_classes, link, page, path_segment};
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use ethscope_core::address::{is_tx_hash, short_hash, to_checksum_address};
use ethscope_core::search::{AddressSearch, NftSearch};
use ethscope_core::types::{AccountTx, Block, NftMetadata, Transaction};
use ethscope_core::units::{format_ether, format_gwei};

const INPUT_CLASSES: &[&str] = &["w-1/2", "p-3", "rounded", "bg-gray-200", "focus:outline-blue-500"];
const SUBMIT_CLASSES: &[&str] = &["bg-blue-400", "text-white", "rounded-md", "p-3"];

fn display_address(address: &str) -> String {
    to_checksum_address(address).unwrap_or_else(|| address.to_string())
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

fn block_link(number: u64) -> String {
    link(&format!("/block/{}", number), &number.to_string())
}

fn tx_link(hash: &str, text: &str) -> String {
    link(&format!("/transaction/{}", path_segment(hash)), text)
}

fn account_link(address: &str, text: &str) -> String {
    link(&format!("/transactions/{}", path_segment(address)), text)
}

fn card(title: &str, rows: &str, empty: &str) -> String {
    let content = if rows.is_empty() {
        format!(r#"<div class="text-gray-500">{}</div>"#, escape(empty))
    } else {
        rows.to_string()
    };
    format!(
        r#"<section class="{}"><h2 class="text-xl font-bold mb-3">{}</h2>{}</section>"#,
        join_classes(&["w-2/5", "border", "rounded", "p-4"]),
        escape(title),
        content
    )
}

fn block_row(block: &Block) -> String {
    format!(
        r#"<div class="border-b py-2"><div>Block {}</div><div>Miner {}</div><div class="text-gray-500">{} txns · {}</div></div>"#,
        block_link(block.number),
        account_link(&block.miner, &short_hash(&display_address(&block.miner))),
        block.transactions.len(),
        escape(&format_time(block.datetime()))
    )
}

fn tx_row(tx: &Transaction) -> String {
    let to = match &tx.to {
        Some(to) => account_link(to, &short_hash(&display_address(to))),
        None => "Contract Creation".to_string(),
    };
    format!(
        r#"<div class="border-b py-2"><div>Tx {}</div><div>From {} To {}</div><div class="text-gray-500">{} ETH</div></div>"#,
        tx_link(&tx.hash, &short_hash(&tx.hash)),
        account_link(&tx.from, &short_hash(&display_address(&tx.from))),
        to,
        escape(&format_ether(tx.value))
    )
}

pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    let (blocks, txs) = tokio::join!(
        state.explorer.last_ten_blocks(),
        state.explorer.last_ten_txs()
    );

    let block_rows: String = blocks.iter().map(block_row).collect();
    let tx_rows: String = txs.iter().map(tx_row).collect();

    let body = format!(
        r#"<div class="flex justify-evenly my-10">{}{}</div>"#,
        card("Latest Blocks", &block_rows, "No blocks available"),
        card("Latest Transactions", &tx_rows, "No transactions available")
    );
    page(StatusCode::OK, "Home", &body)
}

fn block_details(block: &Block) -> String {
    let parent = if block.number > 0 {
        link(&format!("/block/{}", block.number - 1), &block.parent_hash)
    } else {
        escape(&block.parent_hash)
    };
    let base_fee = block
        .base_fee_per_gas
        .map(|fee| format!("{} Gwei", format_gwei(fee)))
        .unwrap_or_else(|| "-".to_string());
    let tx_list: String = block
        .transactions
        .iter()
        .map(|hash| format!("<li>{}</li>", tx_link(hash, hash)))
        .collect();

    [
        field("Block Height", &escape(&block.number.to_string())),
        field("Timestamp", &escape(&format_time(block.datetime()))),
        field("Hash", &escape(&block.hash)),
        field("Parent Hash", &parent),
        field(
            "Miner",
            &account_link(&block.miner, &display_address(&block.miner)),
        ),
        field(
            "Transactions",
            &escape(&block.transactions.len().to_string()),
        ),
        field("Gas Used", &escape(&block.gas_used.to_string())),
        field("Gas Limit", &escape(&block.gas_limit.to_string())),
        field("Base Fee", &escape(&base_fee)),
        field("Nonce", &escape(&block.nonce)),
        field("Extra Data", &escape(&block.extra_data)),
        format!(r#"<ul class="mt-4 font-mono text-sm">{}</ul>"#, tx_list),
    ]
    .concat()
}

pub async fn block(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let block_number = path.into_inner();
    log::info!("🔍 Looking up block: {}", block_number);

    match state.explorer.individual_block(&block_number).await {
        Some(block) => {
            let body = format!(
                r#"{}<div class="mx-10">{}</div>"#,
                heading(&format!("Block #{}", block.number)),
                block_details(&block)
            );
            page(StatusCode::OK, &format!("Block {}", block.number), &body)
        }
        None => {
            log::warn!("❌ Block not found: {}", block_number);
            page(
                StatusCode::NOT_FOUND,
                "Block not found",
                &format!(
                    "{}{}",
                    heading("Block not found"),
                    html::error_text(&format!("No block matches '{}'", block_number))
                ),
            )
        }
    }
}

fn tx_details(tx: &Transaction) -> String {
    let status = if tx.is_pending() { "Pending" } else { "Included" };
    let block = match tx.block_number {
        Some(number) => block_link(number),
        None => "-".to_string(),
    };
    let to = match &tx.to {
        Some(to) => account_link(to, &display_address(to)),
        None => "Contract Creation".to_string(),
    };
    let gas_price = tx
        .gas_price
        .map(|p| format!("{} Gwei", format_gwei(p)))
        .unwrap_or_else(|| "-".to_string());

    [
        field("Transaction Hash", &escape(&tx.hash)),
        field("Status", status),
        field("Block", &block),
        field("From", &account_link(&tx.from, &display_address(&tx.from))),
        field("To", &to),
        field("Value", &escape(&format!("{} ETH", format_ether(tx.value)))),
        field("Gas Limit", &escape(&tx.gas.to_string())),
        field("Gas Price", &escape(&gas_price)),
        field("Nonce", &escape(&tx.nonce.to_string())),
        field(
            "Input Data",
            &format!(r#"<code class="text-sm">{}</code>"#, escape(&tx.input)),
        ),
    ]
    .concat()
}

pub async fn transaction(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let tx_hash = path.into_inner();
    log::info!("🔍 Looking up transaction by hash: {}", tx_hash);

    match state.explorer.individual_transaction(&tx_hash).await {
        Some(tx) => {
            let body = format!(
                r#"{}<div class="mx-10">{}</div>"#,
                heading("Transaction Details"),
                tx_details(&tx)
            );
            page(StatusCode::OK, "Transaction", &body)
        }
        None => {
            log::warn!("❌ Transaction not found: {}", tx_hash);
            let detail = if is_tx_hash(&tx_hash) {
                format!("No transaction matches '{}'", tx_hash)
            } else {
                format!("'{}' is not a 32-byte transaction hash", tx_hash)
            };
            page(
                StatusCode::NOT_FOUND,
                "Transaction not found",
                &format!(
                    "{}{}",
                    heading("Transaction not found"),
                    html::error_text(&detail)
                ),
            )
        }
    }
}

fn account_tx_row(tx: &AccountTx) -> String {
    let status = if tx.failed() { "Failed" } else { "Success" };
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} ETH</td><td>{}</td></tr>",
        tx_link(&tx.hash, &short_hash(&tx.hash)),
        block_link(tx.block_number),
        escape(&format_time(tx.datetime())),
        account_link(&tx.from, &short_hash(&display_address(&tx.from))),
        if tx.to.is_empty() {
            "Contract Creation".to_string()
        } else {
            account_link(&tx.to, &short_hash(&display_address(&tx.to)))
        },
        escape(&format_ether(tx.value)),
        status
    )
}

pub async fn account_txs(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let address = path.into_inner();
    log::info!("📍 Fetching transactions for {}", address);

    let txs = state.explorer.account_txs(&address).await;
    let content = if txs.is_empty() {
        html::error_text("No transactions found")
    } else {
        let rows: String = txs.iter().map(account_tx_row).collect();
        format!(
            r#"<table class="{}"><thead><tr><th>Tx Hash</th><th>Block</th><th>Time</th><th>From</th><th>To</th><th>Value</th><th>Status</th></tr></thead><tbody>{}</tbody></table>"#,
            join_classes(&["table-auto", "mx-auto", "text-left"]),
            rows
        )
    };

    let body = format!(
        "{}{}",
        heading(&format!("Transactions for {}", display_address(&address))),
        content
    );
    page(StatusCode::OK, "Account Transactions", &body)
}

fn address_form(value: &str) -> String {
    format!(
        r#"<form method="get" action="/account-balance" class="flex flex-col gap-5 items-center"><input type="text" placeholder="Account Address" name="address" value="{}" class="{}"><input type="submit" value="Search" class="{}"></form>"#,
        escape(value),
        join_classes(INPUT_CLASSES),
        join_classes(SUBMIT_CLASSES)
    )
}

pub async fn account_balance(
    state: web::Data<AppState>,
    query: web::Query<AddressSearch>,
) -> HttpResponse {
    let form = query.into_inner();
    let mut body = format!(
        "{}{}",
        heading("Account Balance"),
        address_form(form.address.as_deref().unwrap_or(""))
    );

    if form.is_submitted() {
        match form.validate() {
            Ok(address) => {
                let balance = state.explorer.account_balance(&address).await;
                body.push_str(&format!(
                    r#"<div class="{}">{}{}<div>{}</div></div>"#,
                    join_classes(&["flex", "flex-col", "items-center", "gap-2", "my-10"]),
                    field("Address", &escape(&display_address(&address))),
                    field(
                        "Balance",
                        &format!(
                            r#"<span class="text-blue-500">{} ETH</span>"#,
                            escape(&format_ether(balance))
                        )
                    ),
                    account_link(&address, "View transactions")
                ));
            }
            Err(e) => body.push_str(&html::error_text(&e.to_string())),
        }
    }

    page(StatusCode::OK, "Account Balance", &body)
}

fn nft_form(form: &NftSearch) -> String {
    format!(
        r#"<form method="get" action="/nft" class="flex flex-col gap-5 items-center"><input type="text" placeholder="NFT Address" name="nftAddress" value="{}" class="{}"><input type="text" placeholder="Token ID" name="tokenId" value="{}" class="{}"><input type="submit" value="Search" class="{}"></form>"#,
        escape(form.nft_address.as_deref().unwrap_or("")),
        join_classes(INPUT_CLASSES),
        escape(form.token_id.as_deref().unwrap_or("")),
        join_classes(INPUT_CLASSES),
        join_classes(SUBMIT_CLASSES)
    )
}

fn nft_details(nft: &NftMetadata) -> String {
    let open_sea = nft.open_sea.clone().unwrap_or_default();
    let image = open_sea
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img class="object-contain" src="{}" alt="NFT">"#,
                escape(url)
            )
        })
        .unwrap_or_default();
    let floor_price = open_sea
        .floor_price
        .map(|p| format!("{} ETH", p))
        .unwrap_or_else(|| "-".to_string());
    let highlight = |text: &str| format!(r#"<span class="text-blue-500">{}</span>"#, escape(text));

    format!(
        r#"<div class="{}">{}{}{}{}{}</div>"#,
        join_classes(&["flex", "flex-col", "items-center", "gap-2", "my-10"]),
        image,
        field("NFT Address", &highlight(&nft.address)),
        field(
            "Collection Name",
            &highlight(nft.name.as_deref().unwrap_or("-"))
        ),
        field("Floor Price", &highlight(&floor_price)),
        field(
            "Description",
            &format!(
                r#"<span class="text-gray-500">{}</span>"#,
                escape(open_sea.description.as_deref().unwrap_or(""))
            )
        ),
    )
}

pub async fn nft(state: web::Data<AppState>, query: web::Query<NftSearch>) -> HttpResponse {
    let form = query.into_inner();
    let mut body = format!(
        r#"{}<p class="text-center">Note: Only NFTs listed on OpenSea are supported</p>{}"#,
        heading("Search NFT"),
        nft_form(&form)
    );

    if form.is_submitted() {
        match form.validate() {
            Ok((nft_address, token_id)) => {
                match state.explorer.nft_metadata(&nft_address, &token_id).await {
                    Some(nft) => body.push_str(&nft_details(&nft)),
                    None => body.push_str(&html::error_text(
                        "Failed to fetch NFT metadata. Please try again.",
                    )),
                }
            }
            Err(e) => body.push_str(&html::error_text(&e.to_string())),
        }
    }

    page(StatusCode::OK, "NFT", &body)
}
