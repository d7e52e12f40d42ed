use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::errors::ApiError;
use crate::observability::UNAUTHORIZED_TOTAL;
use crate::routes::ServerState;

pub const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Clone, Debug, Default)]
pub struct ServerAuthConfig {
    /// Empty means any supplied key is accepted.
    pub api_key: String,
}

impl ServerAuthConfig {
    fn accepts(&self, provided: &str) -> bool {
        self.api_key.trim().is_empty() || self.api_key == provided
    }
}

/// Middleware: require the `X-Api-Key` header on room routes.
pub async fn require_api_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(provided) = req.headers().get(API_KEY_HEADER) else {
        warn!(path = %req.uri().path(), "api key missing");
        UNAUTHORIZED_TOTAL.inc();
        return Err(ApiError::Unauthorized("API Key is missing"));
    };

    let ok = provided.to_str().map(|k| state.auth.accepts(k)).unwrap_or(false);
    if !ok {
        warn!(path = %req.uri().path(), "invalid api key attempt");
        UNAUTHORIZED_TOTAL.inc();
        return Err(ApiError::Unauthorized("Invalid API Key"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_configured_key_accepts_anything() {
        let cfg = ServerAuthConfig::default();
        assert!(cfg.accepts("whatever"));
        assert!(cfg.accepts(""));
    }

    #[test]
    fn configured_key_must_match_exactly() {
        let cfg = ServerAuthConfig { api_key: "k-123".into() };
        assert!(cfg.accepts("k-123"));
        assert!(!cfg.accepts("k-124"));
        assert!(!cfg.accepts("K-123"));
    }
}
