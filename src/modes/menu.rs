//! メニューモード: 起動時の対戦形式選択画面

use super::{AppMode, GameMode, Mode};
use crate::config::Config;
use crate::game::{PlayerType, Players};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::fmt;
use tracing::info;

/// メニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    HumanVsLlm,
    LlmVsHuman,
    LlmVsLlm,
    Exit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::HumanVsLlm => write!(f, "Human vs LLM (You think, LLM asks)"),
            MenuItem::LlmVsHuman => write!(f, "LLM vs Human (LLM thinks, you ask)"),
            MenuItem::LlmVsLlm => write!(f, "LLM vs LLM (Watch two LLMs play)"),
            MenuItem::Exit => write!(f, "Exit"),
        }
    }
}

impl MenuItem {
    fn all() -> [MenuItem; 4] {
        [MenuItem::HumanVsLlm, MenuItem::LlmVsHuman, MenuItem::LlmVsLlm, MenuItem::Exit]
    }

    fn next(self) -> MenuItem {
        match self {
            MenuItem::HumanVsLlm => MenuItem::LlmVsHuman,
            MenuItem::LlmVsHuman => MenuItem::LlmVsLlm,
            MenuItem::LlmVsLlm => MenuItem::Exit,
            MenuItem::Exit => MenuItem::HumanVsLlm,
        }
    }

    fn prev(self) -> MenuItem {
        match self {
            MenuItem::HumanVsLlm => MenuItem::Exit,
            MenuItem::LlmVsHuman => MenuItem::HumanVsLlm,
            MenuItem::LlmVsLlm => MenuItem::LlmVsHuman,
            MenuItem::Exit => MenuItem::LlmVsLlm,
        }
    }

    /// 対戦形式（Exit は None）
    pub fn players(self) -> Option<Players> {
        use PlayerType::{Automated, Human};
        match self {
            MenuItem::HumanVsLlm => Some(Players::new(Human, Automated)),
            MenuItem::LlmVsHuman => Some(Players::new(Automated, Human)),
            MenuItem::LlmVsLlm => Some(Players::new(Automated, Automated)),
            MenuItem::Exit => None,
        }
    }
}

/// メニューモード状態
pub struct MenuMode {
    selected: MenuItem,
    config: Config,
}

impl MenuMode {
    pub fn new(config: Config) -> Self {
        Self {
            selected: MenuItem::HumanVsLlm,
            config,
        }
    }

    pub fn selected(&self) -> MenuItem {
        self.selected
    }
}

impl Mode for MenuMode {
    fn update(&mut self) {
        // メニューには定期更新は不要
    }

    fn render(&self, f: &mut Frame) {
        let area = f.area();

        let block = Block::default()
            .title("Twenty Questions - Mode Selection")
            .borders(Borders::ALL);

        f.render_widget(block, area);

        // コンテンツエリア（パディング考慮）
        let content_area = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: area.height.saturating_sub(4),
        };

        let title = Paragraph::new("Select Mode")
            .style(Style::default().fg(Color::Cyan).bold());
        f.render_widget(title, Rect {
            x: content_area.x,
            y: content_area.y,
            width: content_area.width,
            height: 2,
        });

        let menu_start_y = content_area.y + 3;
        for (index, item) in MenuItem::all().iter().enumerate() {
            let is_selected = self.selected == *item;
            let prefix = if is_selected { "▶ " } else { "  " };

            let style = if is_selected {
                Style::default().fg(Color::White).bg(Color::Blue).bold()
            } else {
                Style::default().fg(Color::White)
            };

            let paragraph = Paragraph::new(format!("{prefix}{item}")).style(style);
            f.render_widget(paragraph, Rect {
                x: content_area.x,
                y: menu_start_y + index as u16,
                width: content_area.width,
                height: 1,
            });
        }

        // フッター（操作説明）
        let footer = Paragraph::new("↑/↓: Navigate | Enter: Select | Esc/q: Exit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(footer, Rect {
            x: area.x,
            y: area.height.saturating_sub(2),
            width: area.width,
            height: 1,
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.prev();
                Ok(None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = self.selected.next();
                Ok(None)
            }
            KeyCode::Enter => match self.selected.players() {
                Some(players) => {
                    info!(target: "app", %players, "menu: new game");
                    Ok(Some(AppMode::Game(GameMode::new(players, &self.config)?)))
                }
                None => Ok(Some(AppMode::Exit)),
            },
            KeyCode::Esc | KeyCode::Char('q') => Ok(Some(AppMode::Exit)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps() {
        let mut item = MenuItem::HumanVsLlm;
        for _ in 0..MenuItem::all().len() {
            item = item.next();
        }
        assert_eq!(item, MenuItem::HumanVsLlm);
        assert_eq!(MenuItem::HumanVsLlm.prev(), MenuItem::Exit);
    }

    #[test]
    fn matchups() {
        assert_eq!(
            MenuItem::HumanVsLlm.players(),
            Some(Players::new(PlayerType::Human, PlayerType::Automated))
        );
        assert_eq!(MenuItem::Exit.players(), None);
    }
}
