//! アプリケーション設定

use color_eyre::{eyre::eyre, Result};
use std::time::Duration;

/// ゲームサービスのベースURL
pub const ENV_API_BASE: &str = "TWENTYQ_API_BASE";
/// 自動ターン前の待ち時間（ミリ秒）
pub const ENV_SETTLE_MS: &str = "TWENTYQ_SETTLE_MS";
/// イベントポーリング間隔（ミリ秒）
pub const ENV_POLL_MS: &str = "TWENTYQ_POLL_MS";
/// HTTPリクエストのタイムアウト（秒）
pub const ENV_TIMEOUT_SECS: &str = "TWENTYQ_TIMEOUT_SECS";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// ゲームサービスのベースURL
    pub api_base: String,
    /// 自動ターンを要求するまでの待ち時間（観戦しやすくするためだけのもの）
    pub settle_delay_ms: u64,
    /// イベントポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
    /// HTTPリクエストのタイムアウト（秒）
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            // NOTE: Keep in sync with tests (tests/config_tests.rs).
            settle_delay_ms: 1000,
            poll_interval_ms: 100,
            request_timeout_secs: 15,
        }
    }
}

impl Config {
    /// 新しい設定インスタンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数（.env を含む）から設定を読み込む。未設定の項目は既定値。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup(ENV_API_BASE) {
            let base = base.trim();
            if base.is_empty() {
                return Err(eyre!("{ENV_API_BASE} is empty"));
            }
            config.api_base = base.to_string();
        }
        if let Some(v) = lookup(ENV_SETTLE_MS) {
            config.settle_delay_ms = parse_number(ENV_SETTLE_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_POLL_MS) {
            config.poll_interval_ms = parse_number(ENV_POLL_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = parse_number(ENV_TIMEOUT_SECS, &v)?;
        }
        Ok(config)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| eyre!("{key} must be a non-negative integer (got {raw:?}): {e}"))
}
