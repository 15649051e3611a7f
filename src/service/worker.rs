//! ゲームサービスワーカー（TUIとは別スレッドで動く）
//!
//! UIスレッドからリクエストを受け取り、1件ずつ順番にサービスを呼び出して
//! 結果をチャンネルで返す。チケット番号はそのまま返信に載せる。

use super::{GameService, ServiceError};
use crate::game::models::{GameSnapshot, PlayerAction, Players};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

/// ワーカーが実行する呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    CreateGame(Players),
    AdvanceAutomatedTurn,
    SubmitAction(PlayerAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub ticket: u64,
    pub call: ServiceCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReply {
    pub ticket: u64,
    pub result: Result<GameSnapshot, ServiceError>,
}

/// サービスワーカーを開始。リクエスト送信側が drop されるとスレッドは終了する。
pub fn start_service_worker<S>(
    mut service: S,
    rx_request: Receiver<ServiceRequest>,
    tx_reply: Sender<ServiceReply>,
) -> JoinHandle<()>
where
    S: GameService + Send + 'static,
{
    std::thread::spawn(move || {
        // 専用スレッド内でTokioランタイムを構築
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!(target: "service", "runtime_build_error: {e}");
                return;
            }
        };
        rt.block_on(async move {
            while let Ok(request) = rx_request.recv() {
                debug!(target: "service", ticket = request.ticket, call = ?request.call, "request_received");
                let result = execute(&mut service, request.call).await;
                match &result {
                    Ok(snapshot) => {
                        info!(target: "service", ticket = request.ticket, status = %snapshot.status, "reply_ready")
                    }
                    Err(e) => error!(target: "service", ticket = request.ticket, "service_error: {e}"),
                }
                if tx_reply.send(ServiceReply { ticket: request.ticket, result }).is_err() {
                    // UI側が終了済み
                    break;
                }
            }
        });
    })
}

async fn execute<S: GameService>(service: &mut S, call: ServiceCall) -> Result<GameSnapshot, ServiceError> {
    match call {
        ServiceCall::CreateGame(players) => service.create_game(players).await,
        ServiceCall::AdvanceAutomatedTurn => service.advance_automated_turn().await,
        ServiceCall::SubmitAction(action) => service.submit_action(&action).await,
    }
}
