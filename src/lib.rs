pub mod action;
pub mod ai;
pub mod config;
pub mod console;
pub mod deck;
pub mod decision;
pub mod engine;
pub mod notify;
pub mod player;
pub mod rules;
pub mod session;

pub use action::ActionId;
pub use ai::{ChallengePolicy, ComputerDecisions};
pub use config::GameConfig;
pub use deck::Deck;
pub use decision::{Claim, ClaimKind, DecisionSource, ScriptedDecisions};
pub use engine::{TurnEngine, TurnOutcome};
pub use notify::{GameEvent, NotificationSink, NullSink, RecordingSink};
pub use player::{Control, Player};
pub use rules::{ActionRule, RuleTable};
pub use session::GameSession;

use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static CHARACTER_VARIANTS: [Character; 5] = [
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
];

// copies of each character in the court deck
pub const COPIES_PER_CHARACTER: usize = 3;

pub const TOTAL_CARDS: usize = CHARACTER_VARIANTS.len() * COPIES_PER_CHARACTER;

impl Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Duke => "duke",
            Assassin => "assassin",
            Captain => "captain",
            Ambassador => "ambassador",
            Contessa => "contessa",
        };
        f.write_str(name)
    }
}

/// Everything that can abort a game session.
///
/// Apart from `Io` and `InvalidPlayerCount`, these are broken engine invariants or
/// a decision source that answered outside the options it was offered. None of
/// them are expected during a well-formed game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoupError {
    IllegalAction(ActionId),
    InsufficientFunds { action: ActionId, coins: u8 },
    EmptyDeck,
    AlreadyEliminated(usize),
    InvalidTarget(usize),
    InvalidChoice(String),
    InvalidPlayerCount(usize),
    SeatMismatch { seats: usize, sources: usize },
    TurnLimit(usize),
    Io(String),
}

impl Display for CoupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoupError::IllegalAction(action) => write!(f, "illegal action: {action}"),
            CoupError::InsufficientFunds { action, coins } => {
                write!(f, "cannot afford {action} with {coins} coins")
            }
            CoupError::EmptyDeck => f.write_str("drew from an empty deck"),
            CoupError::AlreadyEliminated(player_idx) => {
                write!(f, "player {player_idx} has no influence left to lose")
            }
            CoupError::InvalidTarget(player_idx) => write!(f, "player {player_idx} is not a valid target"),
            CoupError::InvalidChoice(msg) => write!(f, "invalid choice: {msg}"),
            CoupError::InvalidPlayerCount(n) => {
                write!(f, "number of players must be between {} and {}, got {n}", config::MIN_PLAYERS, config::MAX_PLAYERS)
            }
            CoupError::SeatMismatch { seats, sources } => {
                write!(f, "{sources} decision sources for {seats} seats")
            }
            CoupError::TurnLimit(turns) => write!(f, "no winner after {turns} turns"),
            CoupError::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

impl std::error::Error for CoupError {}

impl From<std::io::Error> for CoupError {
    fn from(err: std::io::Error) -> Self {
        CoupError::Io(err.to_string())
    }
}
