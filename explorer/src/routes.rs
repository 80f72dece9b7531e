use crate::{handlers, views};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/blocks/latest", web::get().to(handlers::get_latest_blocks))
            .route("/blocks/{number}", web::get().to(handlers::get_block))
            .route(
                "/transactions/latest",
                web::get().to(handlers::get_latest_transactions),
            )
            .route(
                "/transactions/{hash}",
                web::get().to(handlers::get_transaction),
            )
            .route(
                "/address/{address}/balance",
                web::get().to(handlers::get_address_balance),
            )
            .route(
                "/address/{address}/transactions",
                web::get().to(handlers::get_address_transactions),
            )
            .route("/nft", web::get().to(handlers::get_nft_metadata)),
    )
    .route("/", web::get().to(views::home))
    .route("/account-balance", web::get().to(views::account_balance))
    .route("/block/{block_number}", web::get().to(views::block))
    .route("/transaction/{tx_hash}", web::get().to(views::transaction))
    .route("/transactions/{address}", web::get().to(views::account_txs))
    .route("/nft", web::get().to(views::nft));
}
