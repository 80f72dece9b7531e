mod handlers;
mod html;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod views;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use ethscope_config::Config;
use log::{info, warn};
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("🌐 Ethscope Explorer starting...");

    let cfg = Config::load()?;
    if cfg.alchemy_api_key.is_empty() && cfg.alchemy_url.is_none() {
        warn!("⚠️ No Alchemy API key configured; chain data requests will fail");
    }
    if cfg.etherscan_api_key.is_empty() {
        warn!("⚠️ No Etherscan API key configured; account history requests will fail");
    }
    info!("🔗 Network: {}", cfg.network);

    let app_state = web::Data::new(AppState::from_config(&cfg));

    info!(
        "📡 Server listening on http://{}:{}",
        cfg.bind_address, cfg.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(routes::configure)
    })
    .bind((cfg.bind_address.as_str(), cfg.port))?
    .run()
    .await?;

    Ok(())
}
