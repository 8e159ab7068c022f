use std::io::Write;
use serde::{Deserialize, Serialize};
use crate::action::ActionId;
use crate::decision::Claim;
use crate::session::GameSession;
use crate::Character;

/// Something that just happened at the table.
///
/// Events only carry public information: an unchallenged block never says
/// which character it claimed, and an exchange never shows the cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted { turn: usize, player: usize },
    ActionAnnounced { actor: usize, action: ActionId, claimed: Option<Character>, target: Option<usize> },
    CoinsChanged { player: usize, delta: i16, coins: u8 },
    CardRevealed { player: usize, card: Character },
    PlayerEliminated { player: usize },
    ChallengeIssued { challenger: usize, claim: Claim },
    // `shown` is the card the claimant proved the claim with, when they could
    ChallengeResolved { challenger: usize, claimant: usize, succeeded: bool, shown: Option<Character> },
    BlockDeclared { blocker: usize, actor: usize, action: ActionId },
    BlockResolved { blocker: usize, actor: usize, action: ActionId, stands: bool },
    Exchanged { player: usize },
    Winner { player: usize },
}

/// Receives every committed event. Sinks can't influence the game.
pub trait NotificationSink {
    fn notify(&mut self, session: &GameSession, event: &GameEvent);
}

pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _: &GameSession, _: &GameEvent) {}
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, f: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| f(e)).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, _: &GameSession, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Writes one json object per event.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NotificationSink for JsonSink<W> {
    fn notify(&mut self, _: &GameSession, event: &GameEvent) {
        if let Ok(line) = serde_json::to_string(event) {
            // a broken pipe shouldn't stop the game
            let _ = writeln!(self.out, "{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::ActionId;
    use crate::config::GameConfig;
    use crate::notify::{GameEvent, JsonSink, NotificationSink, RecordingSink};
    use crate::session::GameSession;
    use crate::Character::Duke;

    #[test]
    fn json_lines() {
        let session = GameSession::new(&GameConfig { seed: Some(2), ..GameConfig::default() }).unwrap();
        let mut sink = JsonSink::new(Vec::new());

        sink.notify(&session, &GameEvent::ActionAnnounced { actor: 0, action: ActionId::Tax, claimed: Some(Duke), target: None });
        sink.notify(&session, &GameEvent::Winner { player: 2 });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: GameEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, GameEvent::ActionAnnounced { actor: 0, action: ActionId::Tax, claimed: Some(Duke), target: None });
        assert_eq!(lines[1], r#"{"Winner":{"player":2}}"#);
    }

    #[test]
    fn recording() {
        let session = GameSession::new(&GameConfig { seed: Some(2), ..GameConfig::default() }).unwrap();
        let mut sink = RecordingSink::new();
        sink.notify(&session, &GameEvent::PlayerEliminated { player: 1 });
        sink.notify(&session, &GameEvent::Winner { player: 0 });
        assert_eq!(sink.count(|e| matches!(e, GameEvent::Winner { .. })), 1);
    }
}
