use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Payer {
    pub email: String,
}

/// Body of `POST /v1/payments` for a PIX charge.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub transaction_amount: Decimal,
    pub description: String,
    pub payment_method_id: &'static str,
    pub payer: Payer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
}

impl PaymentRequest {
    pub fn pix(amount: Decimal, description: String, payer_email: &str) -> Self {
        Self {
            transaction_amount: amount,
            description,
            payment_method_id: "pix",
            payer: Payer {
                email: payer_email.to_string(),
            },
            external_reference: None,
            notification_url: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Authorized,
    InProcess,
    InMediation,
    Rejected,
    Cancelled,
    Refunded,
    ChargedBack,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TransactionData {
    pub qr_code: Option<String>,
    pub qr_code_base64: Option<String>,
    pub ticket_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PointOfInteraction {
    pub transaction_data: Option<TransactionData>,
}

/// The subset of Mercado Pago's payment resource this server reads.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Payment {
    pub id: Option<u64>,
    pub status: Option<PaymentStatus>,
    pub status_detail: Option<String>,
    pub external_reference: Option<String>,
    pub point_of_interaction: Option<PointOfInteraction>,
    /// The full document as the gateway sent it.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

/// QR code data of a PIX payment, both fields guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PixQrCode {
    pub qr_code: String,
    pub qr_code_base64: String,
    pub ticket_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrCodeShapeError {
    MissingTransactionData,
    MissingQrCode,
}

impl Payment {
    pub fn from_json(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut payment: Self = serde_json::from_value(raw.clone())?;
        payment.raw = raw;
        Ok(payment)
    }

    pub fn is_approved(&self) -> bool {
        self.status == Some(PaymentStatus::Approved)
    }

    pub fn pix_qr_code(&self) -> Result<PixQrCode, QrCodeShapeError> {
        let data = self
            .point_of_interaction
            .as_ref()
            .and_then(|poi| poi.transaction_data.as_ref())
            .ok_or(QrCodeShapeError::MissingTransactionData)?;

        let non_empty = |field: &Option<String>| field.clone().filter(|s| !s.is_empty());

        match (non_empty(&data.qr_code), non_empty(&data.qr_code_base64)) {
            (Some(qr_code), Some(qr_code_base64)) => Ok(PixQrCode {
                qr_code,
                qr_code_base64,
                ticket_url: non_empty(&data.ticket_url),
            }),
            _ => Err(QrCodeShapeError::MissingQrCode),
        }
    }
}
