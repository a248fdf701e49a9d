use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{GatewayError, Payment, PaymentGateway, PaymentRequest};
use crate::config::GatewaySettings;

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Mercado Pago REST client for the `/v1/payments` resource.
#[derive(Clone)]
pub struct MercadoPagoClient {
    http_client: Client,
    api_url: Url,
    access_token: String,
    create_timeout: Duration,
    lookup_timeout: Duration,
}

impl MercadoPagoClient {
    pub fn new(http_client: Client, settings: &GatewaySettings) -> Self {
        Self {
            http_client,
            api_url: settings.api_url.clone(),
            access_token: settings.access_token.clone(),
            create_timeout: settings.create_timeout,
            lookup_timeout: settings.lookup_timeout,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Payment, GatewayError> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, %body, "Mercado Pago response");

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(ApiErrorBody {
                    message: Some(message),
                    ..
                }) => message,
                Ok(ApiErrorBody {
                    error: Some(error), ..
                }) => error,
                _ => body,
            };
            return Err(GatewayError::Api { status, message });
        }

        Ok(Payment::from_json(serde_json::from_str(&body)?)?)
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoClient {
    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError> {
        let builder = self
            .http_client
            .post(self.endpoint(&["v1", "payments"]))
            .header("X-Idempotency-Key", Uuid::new_v4().to_string())
            .timeout(self.create_timeout)
            .json(request);
        self.send(builder).await
    }

    async fn get_payment(&self, id: &str) -> Result<Payment, GatewayError> {
        let builder = self
            .http_client
            .get(self.endpoint(&["v1", "payments", id]))
            .timeout(self.lookup_timeout);
        self.send(builder).await
    }
}
