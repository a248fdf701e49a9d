use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    components::PixCheckoutPage,
    config::CheckoutSettings,
    err_responses::{error_chain, ErrorResponse, MapErrorResponse},
    mercado_pago::{
        payment::QrCodeShapeError, GatewayError, Payment, PaymentGateway, PaymentRequest,
        PixQrCode,
    },
    AppState,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Valor inválido para pagamento: {0:?}")]
    InvalidAmount(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Dados do QR code não encontrados na resposta do Mercado Pago")]
    MissingQrData,
    #[error("QR code ou código PIX não encontrados na resposta do Mercado Pago")]
    MissingQrCode,
}

impl From<QrCodeShapeError> for CheckoutError {
    fn from(err: QrCodeShapeError) -> Self {
        match err {
            QrCodeShapeError::MissingTransactionData => Self::MissingQrData,
            QrCodeShapeError::MissingQrCode => Self::MissingQrCode,
        }
    }
}

/// Parses a price such as `"19.90"` or `"19,90"`; only positive amounts pass.
pub fn parse_amount(raw: &str) -> Result<Decimal, CheckoutError> {
    let amount = Decimal::from_str(&raw.trim().replace(',', "."))
        .map_err(|_| CheckoutError::InvalidAmount(raw.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(CheckoutError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

pub async fn create_pix_payment(
    gateway: &dyn PaymentGateway,
    settings: &CheckoutSettings,
    amount: &str,
    description: String,
    external_reference: Option<String>,
) -> Result<Payment, CheckoutError> {
    let mut request = PaymentRequest::pix(parse_amount(amount)?, description, &settings.payer_email);
    request.external_reference = external_reference;
    request.notification_url = settings.notification_url.clone();

    match gateway.create_payment(&request).await {
        Ok(payment) => {
            info!(payment_id = ?payment.id, response = %payment.raw, "Resposta do Mercado Pago");
            Ok(payment)
        }
        Err(err) => {
            error!(error = %error_chain(&err), "Erro detalhado ao criar pagamento");
            Err(err.into())
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CheckoutQuery {
    id: Option<String>,
    nome: Option<String>,
    preco: Option<String>,
}

async fn checkout(state: &AppState, query: &CheckoutQuery) -> Result<PixQrCode, CheckoutError> {
    let nome = query.nome.as_deref().unwrap_or_default();
    let payment = create_pix_payment(
        state.gateway.as_ref(),
        &state.checkout,
        query.preco.as_deref().unwrap_or_default(),
        format!("Pagamento de {nome}"),
        query.id.clone().filter(|id| !id.is_empty()),
    )
    .await?;

    Ok(payment.pix_qr_code()?)
}

pub async fn pix_checkout(
    State(state): State<AppState>,
    Query(query): Query<CheckoutQuery>,
) -> Result<Response, Response> {
    info!(id = ?query.id, nome = ?query.nome, preco = ?query.preco, "Iniciando pagamento");

    let result = checkout(&state, &query).await;
    if let Err(err) = &result {
        error!(error = %error_chain(err), "Erro detalhado");
    }
    let qr = result.map_err_response(ErrorResponse::Json {
        debug: state.checkout.debug_errors,
    })?;

    Ok(PixCheckoutPage {
        nome: query.nome.as_deref().unwrap_or_default(),
        preco: query.preco.as_deref().unwrap_or_default(),
        qr: &qr,
    }
    .into_response())
}
