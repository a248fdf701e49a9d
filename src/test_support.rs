use std::{
    io,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::Router;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::subscriber::DefaultGuard;

use crate::{
    config::CheckoutSettings,
    mercado_pago::{GatewayError, Payment, PaymentGateway, PaymentRequest},
    AppState,
};

/// In-memory gateway; operations without a canned response fail with a 502.
#[derive(Default)]
pub struct MockGateway {
    created: Option<Value>,
    looked_up: Option<Value>,
    create_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    last_request: Mutex<Option<PaymentRequest>>,
    last_lookup: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created(mut self, payment: Value) -> Self {
        self.created = Some(payment);
        self
    }

    pub fn with_looked_up(mut self, payment: Value) -> Self {
        self.looked_up = Some(payment);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<PaymentRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_lookup(&self) -> Option<String> {
        self.last_lookup.lock().unwrap().clone()
    }

    fn respond(canned: &Option<Value>) -> Result<Payment, GatewayError> {
        match canned {
            Some(payment) => Ok(Payment::from_json(payment.clone())?),
            None => Err(GatewayError::Api {
                status: StatusCode::BAD_GATEWAY,
                message: "gateway indisponível".into(),
            }),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment, GatewayError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Self::respond(&self.created)
    }

    async fn get_payment(&self, id: &str) -> Result<Payment, GatewayError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_lookup.lock().unwrap() = Some(id.to_string());
        Self::respond(&self.looked_up)
    }
}

pub fn public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

pub fn test_app(gateway: MockGateway, debug_errors: bool) -> (Router, Arc<MockGateway>) {
    let gateway = Arc::new(gateway);
    let state = AppState {
        gateway: gateway.clone(),
        checkout: Arc::new(CheckoutSettings {
            payer_email: "comprador@exemplo.com".into(),
            notification_url: None,
            debug_errors,
        }),
    };
    (crate::router(state, &public_dir()), gateway)
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct CapturedLogs {
    buffer: LogBuffer,
    _guard: DefaultGuard,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.0.lock().unwrap()).into_owned()
    }
}

/// Routes this thread's log output into a buffer until the returned value drops.
pub fn capture_logs() -> CapturedLogs {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    CapturedLogs {
        buffer,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
