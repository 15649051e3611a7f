//! ゲームサービス連携（トレイト・エラー・バックグラウンドワーカー）

pub mod http;
pub mod worker;

use crate::game::models::{GameSnapshot, PlayerAction, Players};
use thiserror::Error;

pub use http::HttpGameService;
pub use worker::{start_service_worker, ServiceCall, ServiceReply, ServiceRequest};

/// Failure of a service call. `Display` is what the session shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Transport(String),
    /// Non-success response; `detail` is the service's own message.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("No active game")]
    NoActiveGame,
    #[error("Game service worker stopped")]
    WorkerStopped,
}

/// The remote game service. Every call returns a complete snapshot.
///
/// Calls run one at a time on the worker's runtime, hence `&mut self` and no
/// `Send` bound on the returned futures.
#[allow(async_fn_in_trait)]
pub trait GameService {
    async fn create_game(&mut self, players: Players) -> Result<GameSnapshot, ServiceError>;

    async fn advance_automated_turn(&mut self) -> Result<GameSnapshot, ServiceError>;

    async fn submit_action(&mut self, action: &PlayerAction) -> Result<GameSnapshot, ServiceError>;
}
