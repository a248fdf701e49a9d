use axum::{extract::State, http::StatusCode, response::Response, Json};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    err_responses::{error_chain, ErrorResponse, MapErrorResponse},
    mercado_pago::{GatewayError, PaymentGateway, PaymentStatus},
    AppState,
};

/// Gateway notification; fields stay untyped so malformed ones read as absent.
#[derive(Deserialize, Debug, Default)]
pub struct WebhookNotification {
    data: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    action: Option<Value>,
}

impl WebhookNotification {
    /// Any JSON body is accepted; non-object bodies carry no notification.
    pub fn from_body(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    pub fn payment_id(&self) -> Option<String> {
        match self.data.as_ref()?.get("id")? {
            Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("Erro ao consultar o pagamento {id}")]
pub struct WebhookLookupError {
    id: String,
    #[source]
    source: GatewayError,
}

#[derive(Debug, PartialEq)]
pub enum NotificationOutcome {
    Approved { external_reference: Option<String> },
    Other(Option<PaymentStatus>),
}

pub async fn process_notification(
    gateway: &dyn PaymentGateway,
    id: &str,
) -> Result<NotificationOutcome, WebhookLookupError> {
    let payment = gateway
        .get_payment(id)
        .await
        .map_err(|source| WebhookLookupError {
            id: id.to_string(),
            source,
        })?;

    if payment.is_approved() {
        let external_reference = payment.external_reference;
        info!(
            payment_id = id,
            "Pagamento aprovado para o pedido {}",
            external_reference.as_deref().unwrap_or("desconhecido")
        );
        return Ok(NotificationOutcome::Approved { external_reference });
    }

    debug!(
        payment_id = id,
        status = ?payment.status,
        status_detail = ?payment.status_detail,
        "Notificação sem ação"
    );
    Ok(NotificationOutcome::Other(payment.status))
}

pub async fn webhook_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<StatusCode, Response> {
    let notification = WebhookNotification::from_body(body);
    let Some(id) = notification.payment_id() else {
        warn!(?notification, "Notificação sem data.id");
        return Ok(StatusCode::BAD_REQUEST);
    };
    debug!(
        payment_id = %id,
        kind = ?notification.kind,
        action = ?notification.action,
        "Notificação recebida"
    );

    let result = process_notification(state.gateway.as_ref(), &id).await;
    if let Err(err) = &result {
        error!(error = %error_chain(err), "Erro ao processar notificação");
    }
    result.map_err_response(ErrorResponse::StatusCode(
        StatusCode::INTERNAL_SERVER_ERROR,
    ))?;

    Ok(StatusCode::OK)
}
