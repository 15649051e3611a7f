//! Status classification: which side acts next and what the client must do.
//!
//! Every call site asks [`classify_directive`] instead of checking statuses
//! and player types on its own.

use super::models::{GameSnapshot, GameStatus, PlayerRole, Players};

/// Grammar accepted from a human for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Name of the secret object.
    Object,
    /// `yes` / `no` answer to the pending question.
    YesNo,
    /// Free text: a question, or a guess via prefix or intent toggle.
    QuestionOrGuess,
    /// Free text guess only.
    Guess,
}

/// The controller's decision for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    AwaitHuman(InputKind),
    AutoAdvance,
    Terminate,
}

impl Directive {
    pub fn input_kind(self) -> Option<InputKind> {
        match self {
            Directive::AwaitHuman(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Role expected to act in `status`, if a single role is implied.
pub fn acting_role(status: GameStatus) -> Option<PlayerRole> {
    match status {
        GameStatus::WaitingForObject | GameStatus::WaitingForAnswer => Some(PlayerRole::SecretHolder),
        GameStatus::WaitingForQuestion
        | GameStatus::WaitingForDecision
        | GameStatus::WaitingForGuess
        | GameStatus::QuestionAnswered
        | GameStatus::GuessIncorrect => Some(PlayerRole::Questioner),
        GameStatus::Playing | GameStatus::GameOver | GameStatus::Error => None,
    }
}

/// Single transition table for the game-status state machine.
pub fn classify_directive(status: GameStatus, game_over: bool, players: &Players) -> Directive {
    if game_over {
        return Directive::Terminate;
    }

    let kind = match status {
        GameStatus::GameOver | GameStatus::Error => return Directive::Terminate,
        // Advancing from `playing` lets the service name the next step, even for a human questioner.
        GameStatus::Playing => return Directive::AutoAdvance,
        GameStatus::WaitingForObject => InputKind::Object,
        GameStatus::WaitingForAnswer => InputKind::YesNo,
        GameStatus::WaitingForGuess => InputKind::Guess,
        GameStatus::WaitingForQuestion
        | GameStatus::WaitingForDecision
        | GameStatus::QuestionAnswered
        | GameStatus::GuessIncorrect => InputKind::QuestionOrGuess,
    };

    match acting_role(status) {
        Some(role) if players.type_of(role).is_automated() => Directive::AutoAdvance,
        _ => Directive::AwaitHuman(kind),
    }
}

/// Directive for a received snapshot.
pub fn directive_for(snapshot: &GameSnapshot, players: &Players) -> Directive {
    classify_directive(snapshot.status, snapshot.game_over, players)
}
