//! HTTP implementation of the engine service boundary

use super::{ApiError, ApiResult, BestMoveResponse, EngineService, MoveResponse};
use crate::game::fen::Fen;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Reqwest-backed client for the engine service
#[derive(Debug, Clone)]
pub struct HttpEngineService {
    base_url: String,
    http: reqwest::Client,
}

impl HttpEngineService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> ApiResult<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl EngineService for HttpEngineService {
    async fn best_move(&self, fen: &Fen, depth: u8) -> ApiResult<BestMoveResponse> {
        debug!(depth, "[API] POST /bestmove");
        self.post("/bestmove", json!({ "fen": fen.as_str(), "depth": depth }))
            .await
    }

    async fn apply_move(&self, fen: &Fen, notation: &str) -> ApiResult<MoveResponse> {
        debug!(notation, "[API] POST /move");
        self.post("/move", json!({ "fen": fen.as_str(), "move": notation }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let service = HttpEngineService::new("http://localhost:8080/");
        assert_eq!(service.base_url, "http://localhost:8080");
    }
}
