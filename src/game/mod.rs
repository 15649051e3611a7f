pub mod models;
pub mod flow;
pub mod input;
pub mod log;
pub mod session;
pub mod controller;

pub use controller::{GameController, Submission};
pub use flow::{classify_directive, directive_for, Directive, InputKind};
pub use input::{ActionIntent, ValidationError};
pub use log::{EntryKind, QuestionLog, QuestionLogEntry};
pub use models::{ActionType, GameSnapshot, GameStatus, PlayerAction, PlayerRole, PlayerType, Players};
pub use session::{Session, TransientInput};
