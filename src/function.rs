//! Serverless entry point.
//!
//! Receives API-Gateway style proxy events, answers CORS pre-flight itself and
//! hands POST bodies to the shared [`ChatRelay`]. Errors carry the underlying
//! message in `details`, unlike the standalone server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, UPSTREAM_FAILURE},
    message::{ChatRequest, ErrorBody},
    services::relay::ChatRelay,
};

pub const INVALID_REQUEST: &str = "Invalid request";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

fn cors_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl FunctionResponse {
    fn new(status_code: u16, body: String) -> Self {
        Self { status_code, headers: cors_headers(), body }
    }

    fn json<T: Serialize>(status_code: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::new(status_code, body),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize function response");
                Self::new(500, format!(r#"{{"error":"{UPSTREAM_FAILURE}"}}"#))
            }
        }
    }

    fn error(err: AppError) -> Self {
        let error = match err {
            AppError::BadRequest(_) => INVALID_REQUEST.to_string(),
            ref other => other.public_message(),
        };
        let body = ErrorBody::new(error).with_details(err.to_string());
        Self::json(err.status().as_u16(), &body)
    }
}

pub async fn handle_event(relay: &ChatRelay, event: FunctionEvent) -> FunctionResponse {
    if event.http_method.eq_ignore_ascii_case("OPTIONS") {
        return FunctionResponse::new(200, String::new());
    }

    let request: ChatRequest = match serde_json::from_str(event.body.as_deref().unwrap_or_default()) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "rejected malformed function event body");
            return FunctionResponse::error(AppError::BadRequest(e.to_string()));
        }
    };

    match relay.handle(request).await {
        Ok(response) => FunctionResponse::json(200, &response),
        Err(e) => {
            let err = AppError::from(e);
            if let AppError::Upstream(detail) = &err {
                tracing::error!(%detail, "chat function failed");
            }
            FunctionResponse::error(err)
        }
    }
}
