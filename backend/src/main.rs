//! Backend entry-point: configuration, persistence bootstrap, REST server.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use shelfcheck_backend::domain::TokenService;
use shelfcheck_backend::inbound::http::HttpState;
use shelfcheck_backend::outbound::persistence::{migrations, DbPool, PoolConfig};
use shelfcheck_backend::server::{
    create_server, http_state_in_memory, http_state_with_pool, AppConfig,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;
    let tokens = Arc::new(TokenService::new(&config.token_secret));

    let http_state = build_state(&config, tokens).await?;
    info!(bind_addr = %config.bind_addr, "starting server");
    create_server(web::Data::new(http_state), &config)?.await
}

async fn build_state(
    config: &AppConfig,
    tokens: Arc<TokenService>,
) -> std::io::Result<HttpState> {
    match &config.database_url {
        Some(url) => {
            migrations::run_pending(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            Ok(http_state_with_pool(pool, tokens))
        }
        None => {
            warn!("DATABASE_URL not set; running on in-memory stores");
            Ok(http_state_in_memory(tokens, config.dev_accounts()))
        }
    }
}
