// End-to-end flow: controller + real worker thread + scripted in-memory service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use twenty_questions::game::{
    ActionType, Directive, EntryKind, GameController, GameSnapshot, GameStatus, InputKind,
    PlayerAction, PlayerType, Players, Submission,
};
use twenty_questions::service::{GameService, ServiceError};
mod common;

#[ctor::ctor]
fn _init() { common::init(); }

const SETTLE: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
enum Move {
    Ask(&'static str, &'static str),
    Guess(&'static str),
}

/// Plays the automated Player 2 from a fixed script, the way the game service would.
struct ScriptedService {
    players: Option<Players>,
    object: Option<String>,
    count: u32,
    max: u32,
    script: VecDeque<Move>,
    submit_delay: Duration,
    advances: Arc<AtomicUsize>,
    submits: Arc<AtomicUsize>,
}

impl ScriptedService {
    fn new(script: Vec<Move>, max: u32) -> Self {
        Self {
            players: None,
            object: None,
            count: 0,
            max,
            script: script.into(),
            submit_delay: Duration::ZERO,
            advances: Arc::new(AtomicUsize::new(0)),
            submits: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn snapshot(&self, status: GameStatus) -> GameSnapshot {
        let mut s = GameSnapshot::with_status(status);
        s.game_id = Some("game-1".into());
        s.question_count = self.count;
        s.max_questions = self.max;
        s
    }

    fn conclude(&self, mut s: GameSnapshot, winner: &str) -> GameSnapshot {
        s.game_over = true;
        s.winner = Some(winner.into());
        s.object = self.object.clone();
        s
    }
}

impl GameService for ScriptedService {
    async fn create_game(&mut self, players: Players) -> Result<GameSnapshot, ServiceError> {
        self.players = Some(players);
        if players.player1 == PlayerType::Automated {
            self.object = Some("dog".into());
            let status = if players.player2 == PlayerType::Automated {
                GameStatus::Playing
            } else {
                GameStatus::WaitingForQuestion
            };
            return Ok(self.snapshot(status));
        }
        Ok(self.snapshot(GameStatus::WaitingForObject))
    }

    async fn advance_automated_turn(&mut self) -> Result<GameSnapshot, ServiceError> {
        self.advances.fetch_add(1, Ordering::SeqCst);
        let Some(next) = self.script.pop_front() else {
            return Err(ServiceError::Rejected { status: 400, detail: "script exhausted".into() });
        };
        self.count += 1;
        match next {
            Move::Ask(q, a) => {
                let mut s = self.snapshot(GameStatus::QuestionAnswered);
                s.question = Some(q.into());
                s.answer = Some(a.into());
                if self.count >= self.max {
                    s = self.conclude(s, "Player 1");
                }
                Ok(s)
            }
            Move::Guess(g) => {
                let correct = self.object.as_deref().is_some_and(|o| o.eq_ignore_ascii_case(g));
                let status = if correct || self.count >= self.max {
                    GameStatus::GameOver
                } else {
                    GameStatus::GuessIncorrect
                };
                let mut s = self.snapshot(status);
                s.guess = Some(g.into());
                s.correct = Some(correct);
                if status == GameStatus::GameOver {
                    s = self.conclude(s, if correct { "Player 2" } else { "Player 1" });
                }
                Ok(s)
            }
        }
    }

    async fn submit_action(&mut self, action: &PlayerAction) -> Result<GameSnapshot, ServiceError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
        match action.action_type {
            ActionType::SetObject => {
                self.object = Some(action.content.clone());
                Ok(self.snapshot(GameStatus::Playing))
            }
            ActionType::AskQuestion => {
                self.count += 1;
                let mut s = self.snapshot(GameStatus::QuestionAnswered);
                s.question = Some(action.content.clone());
                s.answer = Some("no".into());
                Ok(s)
            }
            _ => Err(ServiceError::Rejected { status: 400, detail: "Invalid action type".into() }),
        }
    }
}

fn type_text(ctl: &mut GameController, text: &str) {
    for ch in text.chars() {
        ctl.push_char(ch);
    }
}

fn status(ctl: &GameController) -> Option<GameStatus> {
    ctl.snapshot().map(|s| s.status)
}

#[test]
fn human_holder_vs_automated_questioner_until_correct_guess() {
    let service = ScriptedService::new(
        vec![
            Move::Ask("Is it an animal?", "yes"),
            Move::Ask("Does it bark?", "yes"),
            Move::Guess("cat"),
            Move::Guess("dog"),
        ],
        20,
    );
    let advances = service.advances.clone();
    let mut ctl = GameController::spawn(service, SETTLE);

    assert!(ctl.start(Players::new(PlayerType::Human, PlayerType::Automated)));
    assert!(common::pump_until(&mut ctl, |c| c.snapshot().is_some()));
    assert_eq!(status(&ctl), Some(GameStatus::WaitingForObject));
    assert_eq!(ctl.directive(), Some(Directive::AwaitHuman(InputKind::Object)));

    type_text(&mut ctl, "dog");
    assert_eq!(ctl.submit(), Submission::Sent(PlayerAction::new(ActionType::SetObject, "dog")));

    assert!(common::pump_until(&mut ctl, |c| c.directive() == Some(Directive::Terminate)));

    let snap = ctl.snapshot().unwrap();
    assert_eq!(snap.status, GameStatus::GameOver);
    assert_eq!(snap.winner.as_deref(), Some("Player 2"));
    assert_eq!(snap.object.as_deref(), Some("dog"));
    assert_eq!(advances.load(Ordering::SeqCst), 4);

    let log: Vec<_> = ctl
        .log()
        .entries()
        .iter()
        .map(|e| (e.kind, e.prompt.as_str(), e.response.as_str()))
        .collect();
    assert_eq!(
        log,
        vec![
            (EntryKind::Question, "Is it an animal?", "yes"),
            (EntryKind::Question, "Does it bark?", "yes"),
            (EntryKind::Guess, "Guess: cat", "Wrong"),
            (EntryKind::Guess, "Guess: dog", "Correct!"),
        ]
    );
    assert!(ctl.auto_advance_at().is_none());
    assert!(ctl.error().is_none());
}

#[test]
fn automated_match_runs_out_of_questions() {
    let service = ScriptedService::new(
        vec![
            Move::Ask("Is it bigger than a car?", "no"),
            Move::Guess("cat"),
            Move::Ask("Is it a pet?", "yes"),
        ],
        3,
    );
    let advances = service.advances.clone();
    let mut ctl = GameController::spawn(service, SETTLE);

    ctl.start(Players::new(PlayerType::Automated, PlayerType::Automated));
    assert!(common::pump_until(&mut ctl, |c| c.directive() == Some(Directive::Terminate)));

    let snap = ctl.snapshot().unwrap();
    assert_eq!(snap.question_count, snap.max_questions);
    assert!(snap.game_over);
    assert_eq!(snap.winner.as_deref(), Some("Player 1"));
    assert_eq!(snap.object.as_deref(), Some("dog"));
    assert_eq!(ctl.log().len(), 3);

    // no further automated turns once the game concluded
    std::thread::sleep(SETTLE * 5);
    ctl.tick(std::time::Instant::now());
    assert_eq!(advances.load(Ordering::SeqCst), 3);
}

#[test]
fn rapid_double_submit_with_slow_service_sends_once() {
    let mut service = ScriptedService::new(Vec::new(), 20);
    service.submit_delay = Duration::from_millis(200);
    let submits = service.submits.clone();
    let mut ctl = GameController::spawn(service, SETTLE);

    ctl.start(Players::new(PlayerType::Automated, PlayerType::Human));
    assert!(common::pump_until(&mut ctl, |c| c.snapshot().is_some()));
    assert_eq!(ctl.directive(), Some(Directive::AwaitHuman(InputKind::QuestionOrGuess)));

    type_text(&mut ctl, "Is it alive?");
    assert!(matches!(ctl.submit(), Submission::Sent(_)));
    assert_eq!(ctl.submit(), Submission::Ignored);
    ctl.tick(std::time::Instant::now());
    assert_eq!(ctl.submit(), Submission::Ignored);

    assert!(common::pump_until(&mut ctl, |c| !c.is_busy()));
    assert_eq!(submits.load(Ordering::SeqCst), 1);
    assert_eq!(status(&ctl), Some(GameStatus::QuestionAnswered));
    assert_eq!(ctl.log().len(), 1);
    assert_eq!(ctl.input().draft, "");
}

#[test]
fn service_error_stops_self_driving_loop() {
    // empty script: the first automated turn is rejected
    let service = ScriptedService::new(Vec::new(), 20);
    let advances = service.advances.clone();
    let mut ctl = GameController::spawn(service, SETTLE);

    ctl.start(Players::new(PlayerType::Automated, PlayerType::Automated));
    assert!(common::pump_until(&mut ctl, |c| c.error().is_some()));
    assert_eq!(ctl.error(), Some("script exhausted"));
    assert_eq!(status(&ctl), Some(GameStatus::Playing));

    std::thread::sleep(SETTLE * 5);
    ctl.tick(std::time::Instant::now());
    assert_eq!(advances.load(Ordering::SeqCst), 1);
    assert!(!ctl.is_busy());
}
