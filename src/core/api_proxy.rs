//! Server-side forwarding of `/api/*` to the REST backend
//!
//! The browser talks to the console's own origin. Requests under `/api`
//! are replayed against `BACKEND_URL` with method, body, `Content-Type` and
//! `Authorization` preserved, and the backend's answer is passed back.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::config::Config;

/// Proxy state: the backend base URL and a shared HTTP client
#[derive(Clone)]
pub struct ApiProxyState {
    pub backend_url: Option<String>,
    client: reqwest::Client,
}

impl ApiProxyState {
    pub fn new(config: &Config) -> Self {
        Self {
            backend_url: config.backend_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn target_url(&self, path: &str, query: Option<&str>) -> Option<String> {
        let base = self.backend_url.as_deref()?;
        let mut url = format!("{}/{}", base, path.trim_start_matches('/'));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        Some(url)
    }
}

/// API error response
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    code: String,
}

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = ApiError {
        error: message.into(),
        code: code.to_string(),
    };
    (status, Json(body)).into_response()
}

/// Create the API proxy router
pub fn api_proxy_router(state: ApiProxyState) -> Router {
    Router::new()
        .route("/api/{*path}", any(proxy_handler))
        .with_state(Arc::new(state))
}

/// ANY /api/{*path}
async fn proxy_handler(
    State(state): State<Arc<ApiProxyState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(url) = state.target_url(&path, query.as_deref()) else {
        tracing::warn!("API request to /api/{} but BACKEND_URL is not set", path);
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "BACKEND_NOT_CONFIGURED",
            "Backend is not configured",
        );
    };

    tracing::debug!("Forwarding {} /api/{} to {}", method, path, url);

    let mut request = state.client.request(method, &url).body(body);
    for name in [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT] {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }

    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("Failed to reach backend: {}", e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNREACHABLE",
                format!("Failed to reach backend: {}", e),
            );
        }
    };

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    match resp.bytes().await {
        Ok(bytes) => {
            if status.is_server_error() {
                tracing::warn!("Backend answered {} for /api/{}", status, path);
            }
            (status, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read backend response: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNREACHABLE",
                format!("Failed to read backend response: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(backend_url: Option<&str>) -> ApiProxyState {
        ApiProxyState {
            backend_url: backend_url.map(str::to_string),
            client: reqwest::Client::new(),
        }
    }

    #[test]
    fn test_target_url() {
        let state = state(Some("http://backend:8080/api"));
        assert_eq!(
            state.target_url("auth/login", None).as_deref(),
            Some("http://backend:8080/api/auth/login")
        );
        assert_eq!(
            state.target_url("/reports", Some("page=2")).as_deref(),
            Some("http://backend:8080/api/reports?page=2")
        );
        assert_eq!(
            state.target_url("reports", Some("")).as_deref(),
            Some("http://backend:8080/api/reports")
        );
    }

    #[test]
    fn test_target_url_without_backend() {
        assert_eq!(state(None).target_url("auth/login", None), None);
    }

    #[test]
    fn test_error_response_status() {
        let resp = error_response(StatusCode::BAD_GATEWAY, "BACKEND_UNREACHABLE", "down");
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
