//! HTTP/JSON client for the twenty-questions game service.
//!
//! Endpoints:
//! * `POST {base}/api/games` with `{ "player1_type", "player2_type" }`
//! * `GET  {base}/api/games/{id}/next`
//! * `POST {base}/api/games/{id}/action` with `{ "action_type", "content" }`
//!
//! Non-success responses carry `{ "detail": "..." }`, which is surfaced verbatim.

use super::{GameService, ServiceError};
use crate::config::Config;
use crate::game::models::{GameSnapshot, PlayerAction, Players};
use color_eyre::{eyre::WrapErr, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const CREATE_FALLBACK: &str = "Failed to create game";
const NEXT_FALLBACK: &str = "Failed to get next action";
const ACTION_FALLBACK: &str = "Action failed";

pub struct HttpGameService {
    client: Client,
    base_url: String,
    game_id: Option<String>,
}

impl HttpGameService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent("twenty_questions_tui/0.1")
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .wrap_err("building reqwest client for game service")?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            game_id: None,
        })
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    fn game_url(&self, suffix: &str) -> Result<String, ServiceError> {
        let id = self.game_id.as_deref().ok_or(ServiceError::NoActiveGame)?;
        Ok(format!("{}/api/games/{}/{}", self.base_url, id, suffix))
    }
}

/// Message to show for a non-success response body.
pub(crate) fn error_detail(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(v) => match v.get("detail") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            // FastAPI validation errors come back as a list of objects
            Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
            _ => fallback.to_string(),
        },
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => fallback.to_string(),
    }
}

/// Decodes a full snapshot and checks its invariants.
pub(crate) fn decode_snapshot(body: &str) -> Result<GameSnapshot, ServiceError> {
    let snapshot: GameSnapshot =
        serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    snapshot.check_invariants().map_err(ServiceError::Malformed)?;
    Ok(snapshot)
}

fn transport(e: reqwest::Error) -> ServiceError {
    ServiceError::Transport(e.to_string())
}

async fn read_snapshot(resp: Response, fallback: &str) -> Result<GameSnapshot, ServiceError> {
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    debug!(target: "service", status = %status, len = text.len(), "game_service_response_raw");

    if !status.is_success() {
        return Err(ServiceError::Rejected {
            status: status.as_u16(),
            detail: error_detail(&text, fallback),
        });
    }
    decode_snapshot(&text)
}

impl GameService for HttpGameService {
    #[instrument(name = "create_game", skip(self), fields(base = %self.base_url))]
    async fn create_game(&mut self, players: Players) -> Result<GameSnapshot, ServiceError> {
        let resp = self
            .client
            .post(format!("{}/api/games", self.base_url))
            .json(&players)
            .send()
            .await
            .map_err(transport)?;
        let snapshot = read_snapshot(resp, CREATE_FALLBACK).await?;
        let id = snapshot
            .game_id
            .clone()
            .ok_or_else(|| ServiceError::Malformed("missing game_id".to_string()))?;
        self.game_id = Some(id);
        Ok(snapshot)
    }

    #[instrument(name = "advance_automated_turn", skip(self), fields(game_id = ?self.game_id))]
    async fn advance_automated_turn(&mut self) -> Result<GameSnapshot, ServiceError> {
        let url = self.game_url("next")?;
        let resp = self.client.get(url).send().await.map_err(transport)?;
        read_snapshot(resp, NEXT_FALLBACK).await
    }

    #[instrument(name = "submit_action", skip(self), fields(game_id = ?self.game_id))]
    async fn submit_action(&mut self, action: &PlayerAction) -> Result<GameSnapshot, ServiceError> {
        let url = self.game_url("action")?;
        let resp = self
            .client
            .post(url)
            .json(action)
            .send()
            .await
            .map_err(transport)?;
        read_snapshot(resp, ACTION_FALLBACK).await
    }
}
