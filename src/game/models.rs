//! ゲームのデータモデル（サーバーが返すスナップショットとプレイヤー情報）

use serde::{Deserialize, Serialize};
use std::fmt;

/// サーバーが `max_questions` を省略した場合の既定値
pub const DEFAULT_MAX_QUESTIONS: u32 = 20;

/// プレイヤーの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    /// Player 1: お題を決めて質問に答える側
    SecretHolder,
    /// Player 2: 質問・推測する側
    Questioner,
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerRole::SecretHolder => write!(f, "Player 1"),
            PlayerRole::Questioner => write!(f, "Player 2"),
        }
    }
}

/// プレイヤーの種別（ゲーム作成時に一度だけ決まる）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerType {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "llm")]
    Automated,
}

impl PlayerType {
    pub fn is_automated(self) -> bool {
        matches!(self, PlayerType::Automated)
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerType::Human => write!(f, "Human"),
            PlayerType::Automated => write!(f, "LLM"),
        }
    }
}

/// 両プレイヤーの種別の組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Players {
    #[serde(rename = "player1_type")]
    pub player1: PlayerType,
    #[serde(rename = "player2_type")]
    pub player2: PlayerType,
}

impl Players {
    pub fn new(player1: PlayerType, player2: PlayerType) -> Self {
        Self { player1, player2 }
    }

    /// 役割に対応するプレイヤー種別
    pub fn type_of(&self, role: PlayerRole) -> PlayerType {
        match role {
            PlayerRole::SecretHolder => self.player1,
            PlayerRole::Questioner => self.player2,
        }
    }
}

impl fmt::Display for Players {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.player1, self.player2)
    }
}

/// サーバーが報告するゲーム状態（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    WaitingForObject,
    WaitingForQuestion,
    WaitingForAnswer,
    WaitingForGuess,
    WaitingForDecision,
    QuestionAnswered,
    GuessIncorrect,
    Playing,
    GameOver,
    Error,
}

impl GameStatus {
    pub const ALL: [GameStatus; 10] = [
        GameStatus::WaitingForObject,
        GameStatus::WaitingForQuestion,
        GameStatus::WaitingForAnswer,
        GameStatus::WaitingForGuess,
        GameStatus::WaitingForDecision,
        GameStatus::QuestionAnswered,
        GameStatus::GuessIncorrect,
        GameStatus::Playing,
        GameStatus::GameOver,
        GameStatus::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::WaitingForObject => "waiting_for_object",
            GameStatus::WaitingForQuestion => "waiting_for_question",
            GameStatus::WaitingForAnswer => "waiting_for_answer",
            GameStatus::WaitingForGuess => "waiting_for_guess",
            GameStatus::WaitingForDecision => "waiting_for_decision",
            GameStatus::QuestionAnswered => "question_answered",
            GameStatus::GuessIncorrect => "guess_incorrect",
            GameStatus::Playing => "playing",
            GameStatus::GameOver => "game_over",
            GameStatus::Error => "error",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_max_questions() -> u32 {
    DEFAULT_MAX_QUESTIONS
}

/// サーバーが発行するゲーム状態の完全なスナップショット。
///
/// クライアントは決して部分更新しない。`status` 以外のフィールドは
/// 前のターンの値が残っていることがあるため、必ず `status` と組で解釈する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub pending_question: Option<String>,
    #[serde(default)]
    pub guess: Option<String>,
    #[serde(default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub game_id: Option<String>,
    /// サーバー側の進行状況 ("playing" / "won" / "lost")
    #[serde(default)]
    pub game_status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

impl GameSnapshot {
    /// 指定ステータスだけを持つスナップショット（主にテスト・ベンチ用）
    pub fn with_status(status: GameStatus) -> Self {
        Self {
            status,
            question_count: 0,
            max_questions: DEFAULT_MAX_QUESTIONS,
            question: None,
            answer: None,
            pending_question: None,
            guess: None,
            correct: None,
            object: None,
            winner: None,
            game_over: status == GameStatus::GameOver,
            game_id: None,
            game_status: None,
            message: None,
            action: None,
        }
    }

    /// ゲームが終了しているか
    pub fn is_concluded(&self) -> bool {
        self.status == GameStatus::GameOver || self.game_over
    }

    /// 残り質問数
    pub fn questions_remaining(&self) -> u32 {
        self.max_questions.saturating_sub(self.question_count)
    }

    /// 回答待ちの質問（`pending_question` が無ければ `question` を使う）
    pub fn question_awaiting_answer(&self) -> Option<&str> {
        self.pending_question
            .as_deref()
            .or(self.question.as_deref())
    }

    /// `0 <= question_count <= max_questions` を検査
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.question_count > self.max_questions {
            return Err(format!(
                "question_count {} exceeds max_questions {}",
                self.question_count, self.max_questions
            ));
        }
        Ok(())
    }
}

/// サービスに送るアクション種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    SetObject,
    AnswerQuestion,
    AskQuestion,
    MakeGuess,
}

/// `POST /action` のリクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub action_type: ActionType,
    pub content: String,
}

impl PlayerAction {
    pub fn new(action_type: ActionType, content: impl Into<String>) -> Self {
        Self {
            action_type,
            content: content.into(),
        }
    }
}
