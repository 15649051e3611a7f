//! Local validation and classification of human input.

use super::flow::InputKind;
use super::models::{ActionType, PlayerAction};
use thiserror::Error;

/// Explicit toggle used when free text could be a question or a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionIntent {
    #[default]
    Question,
    Guess,
}

impl ActionIntent {
    pub fn toggled(self) -> Self {
        match self {
            ActionIntent::Question => ActionIntent::Guess,
            ActionIntent::Guess => ActionIntent::Question,
        }
    }
}

/// Rejected before any service call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please answer with \"yes\" or \"no\"")]
    NotYesNo,
    #[error("Please enter a guess after \"guess:\"")]
    EmptyGuess,
    #[error("Input is empty")]
    Empty,
}

/// Normalised yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

/// Accepts `yes`, `no`, `y`, `n` in any case, surrounding whitespace ignored.
pub fn parse_answer(input: &str) -> Result<Answer, ValidationError> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(Answer::Yes),
        "no" | "n" => Ok(Answer::No),
        _ => Err(ValidationError::NotYesNo),
    }
}

/// Free text after disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeText {
    Question(String),
    Guess(String),
}

const GUESS_PREFIXES: [&str; 2] = ["guess:", "g:"];

fn strip_guess_prefix(text: &str) -> Option<&str> {
    GUESS_PREFIXES.iter().find_map(|prefix| {
        let head = text.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| &text[prefix.len()..])
    })
}

/// Classifies free text. An inline `guess:` / `g:` prefix wins over `intent`.
pub fn classify_free_text(input: &str, intent: ActionIntent) -> Result<FreeText, ValidationError> {
    let text = input.trim();
    if let Some(rest) = strip_guess_prefix(text) {
        let guess = rest.trim();
        if guess.is_empty() {
            return Err(ValidationError::EmptyGuess);
        }
        return Ok(FreeText::Guess(guess.to_string()));
    }
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(match intent {
        ActionIntent::Guess => FreeText::Guess(text.to_string()),
        ActionIntent::Question => FreeText::Question(text.to_string()),
    })
}

/// Turns a draft into the action to submit for the given input kind.
pub fn interpret(kind: InputKind, draft: &str, intent: ActionIntent) -> Result<PlayerAction, ValidationError> {
    match kind {
        InputKind::YesNo => {
            parse_answer(draft).map(|a| PlayerAction::new(ActionType::AnswerQuestion, a.as_str()))
        }
        InputKind::QuestionOrGuess => Ok(match classify_free_text(draft, intent)? {
            FreeText::Question(q) => PlayerAction::new(ActionType::AskQuestion, q),
            FreeText::Guess(g) => PlayerAction::new(ActionType::MakeGuess, g),
        }),
        InputKind::Object | InputKind::Guess => {
            let text = draft.trim();
            if text.is_empty() {
                return Err(ValidationError::Empty);
            }
            let action_type = if kind == InputKind::Object {
                ActionType::SetObject
            } else {
                ActionType::MakeGuess
            };
            Ok(PlayerAction::new(action_type, text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_accepted() {
        assert_eq!(parse_answer("yes"), Ok(Answer::Yes));
        assert_eq!(parse_answer("YES "), Ok(Answer::Yes));
        assert_eq!(parse_answer("y"), Ok(Answer::Yes));
        assert_eq!(parse_answer("n"), Ok(Answer::No));
        assert_eq!(parse_answer(" No"), Ok(Answer::No));
    }

    #[test]
    fn answers_rejected() {
        for bad in ["maybe", "", "yess", "   "] {
            assert_eq!(parse_answer(bad), Err(ValidationError::NotYesNo), "input={bad:?}");
        }
    }

    #[test]
    fn guess_prefixes() {
        let expected = Ok(FreeText::Guess("red apple".into()));
        assert_eq!(classify_free_text("guess: red apple", ActionIntent::Question), expected);
        assert_eq!(classify_free_text("g:red apple", ActionIntent::Question), expected);
        assert_eq!(classify_free_text("  GUESS:  red apple ", ActionIntent::Question), expected);
        assert_eq!(classify_free_text("G: red apple", ActionIntent::Question), expected);
    }

    #[test]
    fn empty_guess_after_prefix_is_error() {
        assert_eq!(classify_free_text("guess:", ActionIntent::Question), Err(ValidationError::EmptyGuess));
        assert_eq!(classify_free_text("g:   ", ActionIntent::Guess), Err(ValidationError::EmptyGuess));
    }

    #[test]
    fn intent_toggle_selects_guess() {
        assert_eq!(
            classify_free_text("a fruit", ActionIntent::Guess),
            Ok(FreeText::Guess("a fruit".into()))
        );
        assert_eq!(
            classify_free_text("Is it a fruit?", ActionIntent::Question),
            Ok(FreeText::Question("Is it a fruit?".into()))
        );
    }

    #[test]
    fn only_text_after_first_colon_is_the_guess() {
        assert_eq!(
            classify_free_text("guess: time: the clock", ActionIntent::Question),
            Ok(FreeText::Guess("time: the clock".into()))
        );
    }

    #[test]
    fn non_prefix_words_stay_questions() {
        assert_eq!(
            classify_free_text("guessing game?", ActionIntent::Question),
            Ok(FreeText::Question("guessing game?".into()))
        );
    }

    #[test]
    fn interpret_by_kind() {
        assert_eq!(
            interpret(InputKind::YesNo, "Y", ActionIntent::Question),
            Ok(PlayerAction::new(ActionType::AnswerQuestion, "yes"))
        );
        assert_eq!(
            interpret(InputKind::Object, " dog ", ActionIntent::Guess),
            Ok(PlayerAction::new(ActionType::SetObject, "dog"))
        );
        assert_eq!(
            interpret(InputKind::Guess, "cat", ActionIntent::Question),
            Ok(PlayerAction::new(ActionType::MakeGuess, "cat"))
        );
        assert_eq!(
            interpret(InputKind::QuestionOrGuess, "g: cat", ActionIntent::Question),
            Ok(PlayerAction::new(ActionType::MakeGuess, "cat"))
        );
        assert_eq!(
            interpret(InputKind::YesNo, "maybe", ActionIntent::Question),
            Err(ValidationError::NotYesNo)
        );
    }
}
