//! セッションモデル: 「これまでに何が起きたか」の唯一の保持先

use super::flow::{directive_for, Directive};
use super::input::{ActionIntent, ValidationError};
use super::log::QuestionLog;
use super::models::{GameSnapshot, Players};

/// 入力欄の一時状態（UIとコントローラの境界でのみ使う）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransientInput {
    /// 入力中のテキスト
    pub draft: String,
    /// 直近のローカル検証エラー（キー入力で消える）
    pub error: Option<ValidationError>,
    /// 質問/推測の切り替え
    pub intent: ActionIntent,
}

impl TransientInput {
    pub fn push_char(&mut self, ch: char) {
        self.draft.push(ch);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
        self.error = None;
    }

    pub fn set_intent(&mut self, intent: ActionIntent) {
        self.intent = intent;
        self.error = None;
    }
}

/// プレイヤー種別・最新スナップショット・履歴・入力状態
#[derive(Debug, Default, Clone)]
pub struct Session {
    players: Option<Players>,
    snapshot: Option<GameSnapshot>,
    log: QuestionLog,
    input: TransientInput,
    /// サービスエラー（詳細メッセージをそのまま保持）
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> Option<Players> {
        self.players
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn log(&self) -> &QuestionLog {
        &self.log
    }

    pub fn input(&self) -> &TransientInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TransientInput {
        &mut self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// プレイヤー種別を記録（ゲーム中は変更不可）
    ///
    /// # Returns
    /// - `true` - 記録した
    /// - `false` - 既にゲームが始まっている
    pub fn begin(&mut self, players: Players) -> bool {
        if self.players.is_some() {
            return false;
        }
        self.players = Some(players);
        true
    }

    /// スナップショットを丸ごと置き換え、履歴に新しいイベントを追記する。
    /// 追記したエントリ数を返す。
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) -> usize {
        let added = self.log.record_transition(self.snapshot.as_ref(), &snapshot);
        self.snapshot = Some(snapshot);
        self.error = None;
        added
    }

    /// ゲーム開始前の状態へ全てを戻す
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 現在の指示（スナップショットが無ければ None）
    pub fn directive(&self) -> Option<Directive> {
        match (&self.snapshot, &self.players) {
            (Some(snapshot), Some(players)) => Some(directive_for(snapshot, players)),
            _ => None,
        }
    }
}
