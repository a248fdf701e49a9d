mod client;
pub mod payment;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

pub use self::client::MercadoPagoClient;
pub use self::payment::{Payment, PaymentRequest, PaymentStatus, PixQrCode};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("falha na comunicação com o Mercado Pago")]
    Transport(#[from] reqwest::Error),
    #[error("Mercado Pago respondeu {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("resposta inesperada do Mercado Pago")]
    Decode(#[from] serde_json::Error),
}

/// Payment operations this server needs from the gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError>;

    async fn get_payment(&self, id: &str) -> Result<Payment, GatewayError>;
}
