use std::{path::Path, sync::Arc};

use axum::{
    http::{header::CONTENT_SECURITY_POLICY, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod checkout;
mod components;
mod config;
mod err_responses;
mod icons;
mod mercado_pago;
#[cfg(test)]
mod test_support;
mod webhook;

use config::{CheckoutSettings, Config};
use mercado_pago::{MercadoPagoClient, PaymentGateway};

const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'self'; \
    script-src 'self' https://cdn.tailwindcss.com https://vercel.live; \
    img-src 'self' data:; style-src 'self' 'unsafe-inline'";

#[derive(Clone)]
struct AppState {
    gateway: Arc<dyn PaymentGateway>,
    checkout: Arc<CheckoutSettings>,
}

fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(public_dir.join("produtos.html")))
        .route("/pagar", get(checkout::pix_checkout))
        .route("/webhook", post(webhook::webhook_handler))
        .with_state(state)
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY_VALUE),
        ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let gateway = MercadoPagoClient::new(reqwest::Client::new(), &config.gateway);
    let state = AppState {
        gateway: Arc::new(gateway),
        checkout: Arc::new(config.checkout.clone()),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Servidor rodando na porta {}", config.port);

    axum::serve(listener, router(state, &config.public_dir)).await?;
    Ok(())
}
