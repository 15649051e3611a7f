//! Event-driven flow controller.
//!
//! Owns the session, the single in-flight service request and the settling
//! timer for automated turns. All methods run on the UI thread; service
//! calls go to the worker over a channel and their replies are drained by
//! [`GameController::tick`].
//!
//! Invariants:
//! * at most one request is outstanding; while it is, submissions and input
//!   edits are ignored and no automated turn is scheduled or fired;
//! * a reply is applied only if its ticket matches the outstanding request,
//!   so each completion re-enters the controller at most once;
//! * the auto-advance deadline is cleared by every snapshot change, every
//!   dispatched request and `reset`.

use super::flow::Directive;
use super::input::{interpret, ActionIntent, ValidationError};
use super::log::QuestionLog;
use super::models::{ActionType, GameSnapshot, PlayerAction, Players};
use super::session::{Session, TransientInput};
use crate::service::{
    start_service_worker, GameService, ServiceCall, ServiceError, ServiceReply, ServiceRequest,
};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Request dispatched.
    Sent(PlayerAction),
    /// Local validation failed; nothing was sent.
    Rejected(ValidationError),
    /// Not accepted right now (busy, blank draft, or no human input expected).
    Ignored,
}

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    call: ServiceCall,
}

pub struct GameController {
    session: Session,
    settle_delay: Duration,
    tx: Sender<ServiceRequest>,
    rx: Receiver<ServiceReply>,
    next_ticket: u64,
    in_flight: Option<InFlight>,
    auto_advance_at: Option<Instant>,
}

impl GameController {
    /// Controller talking to a worker through the given channel ends.
    pub fn new(tx: Sender<ServiceRequest>, rx: Receiver<ServiceReply>, settle_delay: Duration) -> Self {
        Self {
            session: Session::new(),
            settle_delay,
            tx,
            rx,
            next_ticket: 1,
            in_flight: None,
            auto_advance_at: None,
        }
    }

    /// Starts a worker thread for `service` and wires a controller to it.
    pub fn spawn<S>(service: S, settle_delay: Duration) -> Self
    where
        S: GameService + Send + 'static,
    {
        let (tx_request, rx_request) = mpsc::channel::<ServiceRequest>();
        let (tx_reply, rx_reply) = mpsc::channel::<ServiceReply>();
        start_service_worker(service, rx_request, tx_reply);
        Self::new(tx_request, rx_reply, settle_delay)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn players(&self) -> Option<Players> {
        self.session.players()
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.session.snapshot()
    }

    pub fn log(&self) -> &QuestionLog {
        self.session.log()
    }

    pub fn input(&self) -> &TransientInput {
        self.session.input()
    }

    pub fn error(&self) -> Option<&str> {
        self.session.error()
    }

    pub fn directive(&self) -> Option<Directive> {
        self.session.directive()
    }

    /// A request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Deadline of the scheduled automated turn, if any.
    pub fn auto_advance_at(&self) -> Option<Instant> {
        self.auto_advance_at
    }

    /// Records the player types and requests game creation.
    pub fn start(&mut self, players: Players) -> bool {
        if self.is_busy() || !self.session.begin(players) {
            warn!(target: "app", %players, "start_ignored");
            return false;
        }
        info!(target: "app", %players, "start_game");
        self.dispatch(ServiceCall::CreateGame(players))
    }

    /// Back to the pre-game state. Any pending timer and outstanding reply are abandoned.
    pub fn reset(&mut self) {
        if let Some(f) = self.in_flight.take() {
            debug!(target: "app", ticket = f.ticket, "reset_abandons_request");
        }
        self.auto_advance_at = None;
        self.session.reset();
        info!(target: "app", "session_reset");
    }

    pub fn push_char(&mut self, ch: char) {
        if !self.is_busy() {
            self.session.input_mut().push_char(ch);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_busy() {
            self.session.input_mut().pop_char();
        }
    }

    pub fn set_intent(&mut self, intent: ActionIntent) {
        if !self.is_busy() {
            self.session.input_mut().set_intent(intent);
        }
    }

    pub fn toggle_intent(&mut self) {
        let next = self.session.input().intent.toggled();
        self.set_intent(next);
    }

    /// Validates the draft against the current directive and dispatches it.
    pub fn submit(&mut self) -> Submission {
        if self.is_busy() {
            debug!(target: "app", "submit_ignored_busy");
            return Submission::Ignored;
        }
        let Some(Directive::AwaitHuman(kind)) = self.session.directive() else {
            return Submission::Ignored;
        };
        let input = self.session.input();
        if input.draft.trim().is_empty() {
            return Submission::Ignored;
        }

        match interpret(kind, &input.draft, input.intent) {
            Err(e) => {
                info!(target: "app", kind = ?kind, "validation_error: {e}");
                self.session.input_mut().error = Some(e.clone());
                Submission::Rejected(e)
            }
            Ok(action) => {
                if self.dispatch(ServiceCall::SubmitAction(action.clone())) {
                    Submission::Sent(action)
                } else {
                    Submission::Ignored
                }
            }
        }
    }

    /// Explicit human recovery after a failed service call: re-requests game
    /// creation, or the automated turn that failed.
    pub fn retry(&mut self) -> bool {
        if self.is_busy() || self.session.error().is_none() {
            return false;
        }
        let Some(players) = self.session.players() else {
            return false;
        };
        if self.session.snapshot().is_none() {
            return self.dispatch(ServiceCall::CreateGame(players));
        }
        if self.session.directive() == Some(Directive::AutoAdvance) {
            return self.dispatch(ServiceCall::AdvanceAutomatedTurn);
        }
        false
    }

    /// Drains worker replies, then fires the automated turn if it is due.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(reply) = self.rx.try_recv() {
            self.handle_reply(reply, now);
        }
        self.fire_due_advance(now);
    }

    /// Replaces the snapshot and re-evaluates the directive.
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot, now: Instant) {
        self.auto_advance_at = None;
        let status = snapshot.status;
        let added = self.session.apply_snapshot(snapshot);
        debug!(target: "app", %status, log_added = added, "snapshot_applied");

        if !self.is_busy() && self.session.directive() == Some(Directive::AutoAdvance) {
            self.auto_advance_at = Some(now + self.settle_delay);
            debug!(target: "app", delay_ms = self.settle_delay.as_millis() as u64, "auto_advance_scheduled");
        }
    }

    fn handle_reply(&mut self, reply: ServiceReply, now: Instant) {
        let Some(done) = self.in_flight.take_if(|f| f.ticket == reply.ticket) else {
            debug!(target: "app", ticket = reply.ticket, "stale_reply_dropped");
            return;
        };

        match reply.result {
            Ok(snapshot) => {
                if let ServiceCall::SubmitAction(action) = &done.call {
                    let input = self.session.input_mut();
                    input.draft.clear();
                    if matches!(action.action_type, ActionType::AskQuestion | ActionType::MakeGuess) {
                        input.intent = ActionIntent::Question;
                    }
                }
                self.apply_snapshot(snapshot, now);
            }
            Err(e) => {
                warn!(target: "app", ticket = done.ticket, call = ?done.call, "service_error: {e}");
                self.session.set_error(e.to_string());
            }
        }
    }

    fn fire_due_advance(&mut self, now: Instant) {
        let Some(at) = self.auto_advance_at else {
            return;
        };
        if now < at || self.is_busy() {
            return;
        }
        self.auto_advance_at = None;
        if self.session.directive() == Some(Directive::AutoAdvance) {
            self.dispatch(ServiceCall::AdvanceAutomatedTurn);
        }
    }

    fn dispatch(&mut self, call: ServiceCall) -> bool {
        if self.is_busy() {
            return false;
        }
        self.auto_advance_at = None;
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        info!(target: "app", ticket, call = ?call, "dispatch");
        if self.tx.send(ServiceRequest { ticket, call: call.clone() }).is_err() {
            error!(target: "app", ticket, "worker_channel_closed");
            self.session.set_error(ServiceError::WorkerStopped.to_string());
            return false;
        }
        self.session.clear_error();
        self.in_flight = Some(InFlight { ticket, call });
        true
    }
}
