use std::error::Error;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use reqwest::StatusCode;
use serde::Serialize;

pub enum ErrorResponse {
    /// 500 with a JSON `{error, stack}` body; `stack` only when `debug` is set.
    Json { debug: bool },
    StatusCode(StatusCode),
}

pub trait MapErrorResponse<T> {
    fn map_err_response(self, mapper: ErrorResponse) -> Result<T, Response>;
}

impl<T, E: Error + 'static> MapErrorResponse<T> for Result<T, E> {
    fn map_err_response(self, mapper: ErrorResponse) -> Result<T, Response> {
        match self {
            Ok(val) => Ok(val),
            Err(err) => Err(mapper.transform(&err)),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

/// The error and each of its sources, one per line.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |err| (*err).source())
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join("\n    caused by: ")
}

impl ErrorResponse {
    pub fn transform(&self, err: &(dyn Error + 'static)) -> Response {
        match self {
            Self::Json { debug } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: err.to_string(),
                    stack: debug.then(|| error_chain(err)),
                }),
            )
                .into_response(),
            Self::StatusCode(code) => {
                (*code, code.canonical_reason().unwrap_or_default()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body;
    use serde_json::Value;
    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error)]
    #[error("conexão recusada")]
    struct Inner;

    #[derive(Debug, Error)]
    #[error("falha ao criar pagamento")]
    struct Outer(#[source] Inner);

    async fn json_body(response: Response) -> Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn stack_is_hidden_unless_debug() {
        let result: Result<(), Outer> = Err(Outer(Inner));
        let response = result
            .map_err_response(ErrorResponse::Json { debug: false })
            .unwrap_err();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "falha ao criar pagamento");
        assert!(body.get("stack").is_none());
    }

    #[tokio::test]
    async fn debug_includes_source_chain() {
        let response = ErrorResponse::Json { debug: true }.transform(&Outer(Inner));
        let body = json_body(response).await;
        assert_eq!(
            body["stack"],
            "falha ao criar pagamento\n    caused by: conexão recusada"
        );
    }

    #[test]
    fn status_code_mapping_hides_error_text() {
        let response = ErrorResponse::StatusCode(StatusCode::BAD_GATEWAY).transform(&Inner);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
