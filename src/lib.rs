// 同階層のファイルをモジュールとしてインポート
pub mod config;
pub mod game; // game-flow controller, session model, input rules
pub mod service; // game service client + background worker
pub mod modes; // Mode system for different UI modes

pub use config::Config;
pub use game::GameController;

use color_eyre::Result;
use crossterm::event::{self as crossterm_event, Event, KeyEventKind};
use ratatui::DefaultTerminal;

// Ensure .env is loaded for tests before anything else runs in the test process.
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}

/// アプリケーションのメインループを実行
pub fn run(mut terminal: DefaultTerminal, config: Config) -> Result<()> {
    let poll_interval = config.poll_interval();
    let mut current_mode = modes::AppMode::Menu(modes::MenuMode::new(config.clone()));

    loop {
        // 現在のモードで更新処理を実行（サービス応答の取り込み・自動ターン）
        current_mode.update();

        // 画面を描画
        terminal.draw(|f| current_mode.render(f))?;

        // poll_interval 以内にイベントが来たら処理
        if crossterm_event::poll(poll_interval)? {
            match crossterm_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match current_mode.handle_key(key) {
                        Ok(Some(next_mode)) => {
                            // モード遷移またはExit
                            if matches!(next_mode, modes::AppMode::Exit) {
                                break;
                            }
                            current_mode = next_mode;
                        }
                        Ok(None) => {
                            // 同じモード継続
                        }
                        Err(e) => {
                            // エラーが発生した場合はメニューに戻す
                            tracing::error!(target: "app", "Error in mode: {:?}", e);
                            current_mode = modes::AppMode::Menu(modes::MenuMode::new(config.clone()));
                        }
                    }
                }
                Event::Resize(_, _) => {
                    // 次ループで再描画されるので特別な処理なし
                }
                _ => {}
            }
        }
    }
    Ok(())
}
