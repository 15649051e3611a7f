//! ゲームモード: 20の質問の対戦画面

use super::{AppMode, MenuMode, Mode};
use crate::config::Config;
use crate::game::{
    ActionIntent, Directive, EntryKind, GameController, GameSnapshot, GameStatus, InputKind,
    PlayerType, Players, Submission,
};
use crate::service::HttpGameService;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Stylize,
    style::Color,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;
use tracing::info;

/// ゲームモード状態
pub struct GameMode {
    controller: GameController,
    config: Config,
}

impl GameMode {
    /// HTTPサービスに接続してゲームを作成する
    pub fn new(players: Players, config: &Config) -> Result<Self> {
        let service = HttpGameService::new(config)?;
        let mut controller = GameController::spawn(service, config.settle_delay());
        controller.start(players);
        Ok(Self::with_controller(controller, config.clone()))
    }

    /// 既存のコントローラを使う（テスト用）
    pub fn with_controller(controller: GameController, config: Config) -> Self {
        Self { controller, config }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    fn back_to_menu(&mut self) -> AppMode {
        self.controller.reset();
        AppMode::Menu(MenuMode::new(self.config.clone()))
    }
}

impl Mode for GameMode {
    fn update(&mut self) {
        self.controller.tick(Instant::now());
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(7), // ゲーム情報
                Constraint::Length(5), // 状況メッセージ
                Constraint::Length(4), // 入力欄
                Constraint::Min(4),    // 質問履歴
                Constraint::Length(1), // 操作説明
            ])
            .split(f.area());

        render_info(f, chunks[0], &self.controller);
        render_status(f, chunks[1], &self.controller);
        render_input(f, chunks[2], &self.controller);
        render_history(f, chunks[3], &self.controller);
        render_footer(f, chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                info!(target: "app", "game mode: returning to menu");
                return Ok(Some(self.back_to_menu()));
            }
            KeyCode::Char('c') if ctrl => return Ok(Some(AppMode::Exit)),
            KeyCode::Char('r') if ctrl => {
                if self.controller.retry() {
                    info!(target: "app", "game mode: retry requested");
                }
            }
            KeyCode::Enter => {
                if self.controller.directive() == Some(Directive::Terminate) {
                    info!(target: "app", "game mode: new game");
                    return Ok(Some(self.back_to_menu()));
                }
                if let Submission::Sent(action) = self.controller.submit() {
                    info!(target: "app", action_type = ?action.action_type, "game mode: submitted");
                }
            }
            KeyCode::Tab => {
                if input_kind(&self.controller) == Some(InputKind::QuestionOrGuess) {
                    self.controller.toggle_intent();
                }
            }
            KeyCode::Backspace => self.controller.pop_char(),
            KeyCode::Char(ch) if !ctrl => self.controller.push_char(ch),
            _ => {}
        }
        Ok(None)
    }
}

fn input_kind(controller: &GameController) -> Option<InputKind> {
    controller.directive().and_then(Directive::input_kind)
}

/// 入力欄のプレースホルダー
pub fn placeholder(kind: InputKind, intent: ActionIntent) -> &'static str {
    match kind {
        InputKind::Object => "Enter object...",
        InputKind::YesNo => "yes/no",
        InputKind::Guess => "Enter guess...",
        InputKind::QuestionOrGuess => match intent {
            ActionIntent::Guess => "Enter your guess...",
            ActionIntent::Question => "Enter question...",
        },
    }
}

/// 状況メッセージ（ステータスごとの案内）
pub fn status_message(snapshot: &GameSnapshot, players: &Players) -> Vec<String> {
    let human_questioner = players.player2 == PlayerType::Human && !snapshot.game_over;
    let mut lines = Vec::new();
    match snapshot.status {
        GameStatus::WaitingForObject => lines.push("What object are you thinking of?".to_string()),
        GameStatus::WaitingForAnswer => {
            if let Some(q) = snapshot.question_awaiting_answer() {
                lines.push(format!("Question: {q}"));
            }
            lines.push("Answer yes or no:".to_string());
        }
        GameStatus::WaitingForQuestion => {
            if let (Some(g), Some(false)) = (&snapshot.guess, snapshot.correct) {
                lines.push(format!("Incorrect guess: \"{g}\""));
                lines.push("You can ask another question or make another guess.".to_string());
                lines.push(format!("Questions remaining: {}", snapshot.questions_remaining()));
            } else {
                lines.push("Ask a yes/no question:".to_string());
            }
        }
        GameStatus::WaitingForDecision => lines.push("Ask another question or make a guess:".to_string()),
        GameStatus::WaitingForGuess => lines.push("Make your guess:".to_string()),
        GameStatus::QuestionAnswered => {
            if let Some(q) = &snapshot.question {
                lines.push(format!("Q: {q}"));
                lines.push(format!("A: {}", snapshot.answer.as_deref().unwrap_or("-")));
            }
            if human_questioner {
                lines.push("Ask another question or make a guess:".to_string());
            }
        }
        GameStatus::GuessIncorrect => {
            let guess = snapshot.guess.as_deref().unwrap_or("-");
            if human_questioner {
                lines.push(format!("Incorrect guess: \"{guess}\""));
                lines.push("You can ask another question or make another guess.".to_string());
                lines.push(format!("Questions remaining: {}", snapshot.questions_remaining()));
            } else {
                lines.push(format!("Wrong guess: {guess}"));
                if let Some(m) = &snapshot.message {
                    lines.push(m.clone());
                }
            }
        }
        GameStatus::Playing => lines.push("Waiting for the next move...".to_string()),
        GameStatus::Error => {
            lines.push(snapshot.message.clone().unwrap_or_else(|| "The game service reported an error.".to_string()));
        }
        GameStatus::GameOver => {}
    }

    if snapshot.is_concluded() {
        let human_won = match snapshot.winner.as_deref() {
            Some("Player 1") => players.player1 == PlayerType::Human,
            Some("Player 2") => players.player2 == PlayerType::Human,
            _ => false,
        };
        lines.push(if human_won { "You win!" } else { "Game Finished!" }.to_string());
        if let Some(o) = &snapshot.object {
            lines.push(format!("The object was: {o}"));
        }
    }
    lines
}

/// ゲーム情報を描画
fn render_info(f: &mut Frame, area: Rect, controller: &GameController) {
    let block = Block::default()
        .title(" Twenty Questions ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let mut lines = Vec::new();
    if let Some(players) = controller.players() {
        lines.push(Line::from(format!("Mode: {players}")));
    }
    match controller.snapshot() {
        Some(s) => {
            lines.push(Line::from(format!("Questions: {} / {}", s.question_count, s.max_questions)));
            if let Some(gs) = &s.game_status {
                lines.push(Line::from(format!("Status: {gs}")));
            }
            if let Some(w) = &s.winner {
                lines.push(Line::from(format!("Winner: {w}").green()));
            }
            if let Some(o) = &s.object {
                lines.push(Line::from(format!("Object: {o}")));
            }
        }
        None => lines.push(Line::from("Loading...".cyan())),
    }

    f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Left), area);
}

/// 状況メッセージとエラーを描画
fn render_status(f: &mut Frame, area: Rect, controller: &GameController) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(e) = controller.error() {
        lines.push(Line::from(format!("Error: {e}")).fg(Color::Red));
    }
    if let (Some(s), Some(p)) = (controller.snapshot(), controller.players()) {
        lines.extend(status_message(s, &p).into_iter().map(Line::from));
    }
    if controller.is_busy() && controller.directive() != Some(Directive::Terminate) {
        lines.push(Line::from("Processing...".yellow()));
    } else if controller.auto_advance_at().is_some() {
        lines.push(Line::from("Next automated turn shortly...".dark_gray()));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// 入力パネルを描画
fn render_input(f: &mut Frame, area: Rect, controller: &GameController) {
    let block = Block::default()
        .title(" Input ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let input = controller.input();
    let mut lines = Vec::new();
    match input_kind(controller) {
        Some(kind) => {
            if kind == InputKind::QuestionOrGuess {
                let (q, g) = match input.intent {
                    ActionIntent::Question => ("[Ask Question]".bold().cyan(), " Make Guess ".dark_gray()),
                    ActionIntent::Guess => (" Ask Question ".dark_gray(), "[Make Guess]".bold().cyan()),
                };
                lines.push(Line::from(vec![q, " ".into(), g, "  (Tab to switch, or prefix \"g:\")".dark_gray()]));
            }
            let text = if controller.is_busy() {
                Line::from("Loading...".dark_gray())
            } else if input.draft.is_empty() {
                Line::from(placeholder(kind, input.intent).dark_gray())
            } else {
                Line::from(format!("{}_", input.draft))
            };
            lines.push(text);
            if let Some(e) = &input.error {
                lines.push(Line::from(e.to_string()).fg(Color::Red));
            }
        }
        None if controller.directive() == Some(Directive::Terminate) => {
            lines.push(Line::from("Press Enter for a new game".green()));
        }
        None => lines.push(Line::from("(no input needed)".dark_gray())),
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// 質問履歴を描画（新しいものが上）
fn render_history(f: &mut Frame, area: Rect, controller: &GameController) {
    let block = Block::default()
        .title(" Question History ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let lines: Vec<Line> = controller
        .log()
        .entries()
        .iter()
        .rev()
        .flat_map(|e| {
            let response = match e.kind {
                EntryKind::Question => Line::from(format!("A: {}", e.response)),
                EntryKind::Guess if e.response == "Correct!" => Line::from(format!("A: {}", e.response)).green(),
                EntryKind::Guess => Line::from(format!("A: {}", e.response)).yellow(),
            };
            [Line::from(format!("Q: {}", e.prompt)), response]
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// 操作説明を描画
fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new("Enter: Submit | Tab: Question/Guess | Ctrl+R: Retry | Esc: Menu | Ctrl+C: Quit")
        .style(ratatui::style::Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}
