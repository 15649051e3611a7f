//! Question/answer history, derived from snapshot transitions.
//!
//! Invariant: entries are only appended, in the order the events were observed.
//! An event already visible in the previous snapshot is never logged again, so
//! re-applying the same snapshot is a no-op.

use super::models::{GameSnapshot, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Question,
    Guess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionLogEntry {
    pub kind: EntryKind,
    pub prompt: String,
    pub response: String,
}

impl QuestionLogEntry {
    fn question(question: &str, answer: &str) -> Self {
        Self {
            kind: EntryKind::Question,
            prompt: question.to_string(),
            response: answer.to_string(),
        }
    }

    fn guess(guess: &str, correct: bool) -> Self {
        Self {
            kind: EntryKind::Guess,
            prompt: format!("Guess: {guess}"),
            response: if correct { "Correct!" } else { "Wrong" }.to_string(),
        }
    }
}

/// (question_count, question, answer)
type AnsweredKey<'a> = (u32, &'a str, &'a str);
/// (question_count, guess, correct)
type GuessKey<'a> = (u32, &'a str, bool);

fn answered_question(s: &GameSnapshot) -> Option<AnsweredKey<'_>> {
    if s.status != GameStatus::QuestionAnswered {
        return None;
    }
    Some((s.question_count, s.question.as_deref()?, s.answer.as_deref()?))
}

fn guess_outcome(s: &GameSnapshot) -> Option<GuessKey<'_>> {
    match s.status {
        GameStatus::GuessIncorrect
        | GameStatus::GameOver
        | GameStatus::WaitingForQuestion
        | GameStatus::WaitingForDecision => {
            Some((s.question_count, s.guess.as_deref()?, s.correct == Some(true)))
        }
        _ => None,
    }
}

/// Entries that the step `prev -> next` adds to the history.
pub fn transition_entries(prev: Option<&GameSnapshot>, next: &GameSnapshot) -> Vec<QuestionLogEntry> {
    let mut out = Vec::new();

    if let Some(key @ (_, question, answer)) = answered_question(next) {
        if prev.and_then(answered_question) != Some(key) {
            out.push(QuestionLogEntry::question(question, answer));
        }
    }
    if let Some(key @ (_, guess, correct)) = guess_outcome(next) {
        if prev.and_then(guess_outcome) != Some(key) {
            out.push(QuestionLogEntry::guess(guess, correct));
        }
    }
    out
}

#[derive(Debug, Default, Clone)]
pub struct QuestionLog {
    entries: Vec<QuestionLogEntry>,
}

impl QuestionLog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QuestionLogEntry] {
        &self.entries
    }

    /// Appends whatever `prev -> next` adds; returns the number of new entries.
    pub fn record_transition(&mut self, prev: Option<&GameSnapshot>, next: &GameSnapshot) -> usize {
        let added = transition_entries(prev, next);
        let n = added.len();
        self.entries.extend(added);
        n
    }
}
