use crate::state::AppState;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use ethscope_core::search::NftSearch;
use ethscope_core::units::format_ether;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub network: String,
    pub started_at: String,
    pub timestamp: String,
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": message }))
}

// 헬스 체크 엔드포인트
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        network: state.network.to_string(),
        started_at: state.started_at.to_rfc3339(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

// 최신 블록 10개
pub async fn get_latest_blocks(state: web::Data<AppState>) -> HttpResponse {
    let blocks = state.explorer.last_ten_blocks().await;
    HttpResponse::Ok().json(serde_json::json!({
        "count": blocks.len(),
        "blocks": blocks,
    }))
}

// 번호로 블록 조회
pub async fn get_block(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let block_number = path.into_inner();

    match state.explorer.individual_block(&block_number).await {
        Some(block) => HttpResponse::Ok().json(block),
        None => not_found("Block not found"),
    }
}

// 최신 블록의 트랜잭션 10개
pub async fn get_latest_transactions(state: web::Data<AppState>) -> HttpResponse {
    let transactions = state.explorer.last_ten_txs().await;
    HttpResponse::Ok().json(serde_json::json!({
        "count": transactions.len(),
        "transactions": transactions,
    }))
}

// 해시로 트랜잭션 조회
pub async fn get_transaction(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let hash = path.into_inner();

    log::info!("🔍 Looking up transaction by hash: {}", hash);

    match state.explorer.individual_transaction(&hash).await {
        Some(tx) => HttpResponse::Ok().json(tx),
        None => {
            log::warn!("❌ Transaction not found: {}", hash);
            not_found("Transaction not found")
        }
    }
}

// 주소 잔액 조회
pub async fn get_address_balance(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let address = path.into_inner();
    let balance = state.explorer.account_balance(&address).await;

    HttpResponse::Ok().json(serde_json::json!({
        "address": address,
        "balance": format!("0x{:x}", balance),
        "balance_eth": format_ether(balance),
    }))
}

// 주소별 트랜잭션 목록
pub async fn get_address_transactions(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let address = path.into_inner();
    log::info!("📍 Fetching transactions for {}", address);

    let transactions = state.explorer.account_txs(&address).await;
    HttpResponse::Ok().json(serde_json::json!({
        "address": address,
        "count": transactions.len(),
        "transactions": transactions,
    }))
}

// NFT 컨트랙트 메타데이터
pub async fn get_nft_metadata(
    state: web::Data<AppState>,
    query: web::Query<NftSearch>,
) -> HttpResponse {
    let (nft_address, token_id) = match query.validate() {
        Ok(fields) => fields,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    match state.explorer.nft_metadata(&nft_address, &token_id).await {
        Some(metadata) => HttpResponse::Ok().json(metadata),
        None => not_found("NFT metadata not found"),
    }
}
