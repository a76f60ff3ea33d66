//! # Root Handler
//!
//! Identifies the service to anyone probing the base URL.

use axum::Json;
use serde_json::{json, Value};

/// GET `/` - service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "This is Sola AI swap service"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_returns_service_banner() {
        let Json(body) = root().await;
        assert_eq!(body["message"], "This is Sola AI swap service");
    }
}
