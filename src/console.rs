//! Terminal front end: prompts for the human seat and coloured event output.
//!
//! Malformed answers are re-prompted here; the engine only ever sees a valid
//! choice or an i/o error.

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Write};
use crossterm::style::{style, StyledContent, Stylize};
use crate::action::ActionId;
use crate::decision::{Claim, ClaimKind, DecisionSource};
use crate::notify::{GameEvent, NotificationSink};
use crate::session::GameSession;
use crate::{Character, CoupError};

fn character_ink<D: Display>(character: Character, text: D) -> StyledContent<D> {
    let text = style(text);
    match character {
        Character::Duke => text.magenta(),
        Character::Captain => text.blue(),
        Character::Ambassador => text.green(),
        Character::Assassin => text.black().on_white(),
        Character::Contessa => text.red(),
    }
}

fn action_ink<D: Display>(action: ActionId, text: D) -> StyledContent<D> {
    let text = style(text);
    match action {
        ActionId::Income | ActionId::ForeignAid => text.yellow(),
        ActionId::Coup => text.on_red(),
        ActionId::Tax => text.magenta(),
        ActionId::Steal => text.blue(),
        ActionId::Exchange => text.green(),
        ActionId::Assassinate => text.black().on_white(),
    }
}

pub fn card(character: Character) -> String {
    character_ink(character, format!("[{character}]")).to_string()
}

fn cards(hand: &[Character]) -> String {
    hand.iter().map(|&c| card(c)).collect::<Vec<String>>().join(" ")
}

fn coins(amount: u8) -> StyledContent<u8> {
    style(amount).yellow()
}

pub fn display_welcome<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Welcome to Coup - Command Line Edition".green())
}

/// Prints the table before a turn. A human sees their own hand, computer
/// turns only show what every player can see.
pub fn display_state<W: Write>(out: &mut W, session: &GameSession) -> io::Result<()> {
    let rule = "=======================================".green();
    let current = session.current_player_idx();
    let me = session.player(current);

    writeln!(out, "{rule}")?;
    if me.is_computer() {
        writeln!(out, "Table:")?;
    } else {
        writeln!(out, "Other players:")?;
    }

    for (player_idx, player) in session.players().iter().enumerate() {
        if player_idx == current && !me.is_computer() {
            continue;
        }
        writeln!(
            out,
            "{}. {} ({} cards) {} - {} coins",
            player_idx + 1,
            player.name,
            player.influence(),
            cards(player.revealed()),
            coins(player.coins)
        )?;
    }

    if !me.is_computer() {
        writeln!(out, "{rule}")?;
        writeln!(out, "Coins: {}", coins(me.coins))?;
        writeln!(out, "Cards: {}", cards(me.hand()))?;
        if !me.revealed().is_empty() {
            writeln!(out, "Revealed cards: {}", cards(me.revealed()))?;
        }
    }
    writeln!(out, "{rule}")
}

pub struct ConsoleDecisions<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl ConsoleDecisions<StdinLock<'static>, Box<dyn Write>> {
    /// Prompts go to stderr when stdout carries the event stream.
    pub fn stdin(prompts_to_stderr: bool) -> Self {
        let out: Box<dyn Write> = if prompts_to_stderr { Box::new(io::stderr()) } else { Box::new(io::stdout()) };
        Self::new(io::stdin().lock(), out)
    }
}

impl<R: BufRead, W: Write> ConsoleDecisions<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn ask(&mut self, prompt: &str) -> Result<String, CoupError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CoupError::Io("input closed".to_string()));
        }

        Ok(line.trim().to_string())
    }

    fn error(&mut self, msg: &str) -> Result<(), CoupError> {
        writeln!(self.out, "{}", msg.red())?;
        Ok(())
    }

    // 0-based index of a 1-based menu answer
    fn ask_number(&mut self, prompt: &str, options: usize) -> Result<usize, CoupError> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options).contains(&n) => return Ok(n - 1),
                _ => self.error("Invalid option. Try again.")?,
            }
        }
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, CoupError> {
        loop {
            match self.ask(prompt)?.as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.error("Invalid decision. Try again.")?,
            }
        }
    }

    fn list_cards(&mut self, hand: &[Character]) -> Result<(), CoupError> {
        for (idx, &character) in hand.iter().enumerate() {
            writeln!(self.out, "{}. {}", idx + 1, card(character))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleDecisions<R, W> {
    fn choose_action(&mut self, session: &GameSession, me: usize, legal: &[ActionId]) -> Result<ActionId, CoupError> {
        writeln!(self.out, "What would you like to do, {}?", session.player(me).name)?;
        for (idx, action) in legal.iter().enumerate() {
            writeln!(self.out, "{}. {}", idx + 1, action_ink(*action, action.label()))?;
        }

        let idx = self.ask_number("Enter the number of your action: ", legal.len())?;
        Ok(legal[idx])
    }

    fn choose_target(&mut self, session: &GameSession, me: usize, _: ActionId, candidates: &[usize]) -> Result<usize, CoupError> {
        writeln!(self.out, "Who would you like to target, {}?", session.player(me).name)?;
        for (idx, &player_idx) in candidates.iter().enumerate() {
            writeln!(self.out, "{}. {}", idx + 1, session.player(player_idx).name)?;
        }

        let idx = self.ask_number("Enter the number of your target: ", candidates.len())?;
        Ok(candidates[idx])
    }

    fn decide_challenge(&mut self, session: &GameSession, me: usize, claim: &Claim) -> Result<bool, CoupError> {
        let claimant = &session.player(claim.claimant).name;
        writeln!(self.out, "{}, would you like to challenge {claimant}?", session.player(me).name)?;

        let target = match claim.target {
            Some(target) if target == me => " on you".to_string(),
            Some(target) => format!(" on {}", session.player(target).name),
            None => String::new(),
        };
        match claim.kind {
            ClaimKind::Action => {
                writeln!(self.out, "{claimant} is performing a/an {}{target}.", action_ink(claim.action, claim.action))?;
            }
            ClaimKind::Block => {
                writeln!(self.out, "{claimant} is blocking your {}.", action_ink(claim.action, claim.action))?;
            }
        }

        self.ask_yes_no("Enter 'y' to challenge and 'n' to allow: ")
    }

    fn decide_block(&mut self, session: &GameSession, me: usize, actor: usize, action: ActionId) -> Result<bool, CoupError> {
        writeln!(self.out, "{}, would you like to block?", session.player(me).name)?;
        writeln!(self.out, "{} is performing a/an {}.", session.player(actor).name, action_ink(action, action))?;

        self.ask_yes_no("Enter 'y' to block or 'n' to allow: ")
    }

    fn choose_card_to_reveal(&mut self, session: &GameSession, me: usize, hand: &[Character]) -> Result<usize, CoupError> {
        writeln!(self.out, "{}, choose a card to reveal.", session.player(me).name)?;
        self.list_cards(hand)?;
        self.ask_number("Enter card number: ", hand.len())
    }

    fn choose_cards_to_keep(&mut self, session: &GameSession, me: usize, offered: &[Character], keep_count: usize) -> Result<Vec<Character>, CoupError> {
        writeln!(self.out, "{}, choose {keep_count} cards to keep.", session.player(me).name)?;

        let mut remaining = offered.to_vec();
        let mut kept = Vec::with_capacity(keep_count);
        while kept.len() < keep_count {
            self.list_cards(&remaining)?;
            let idx = self.ask_number("Enter card number: ", remaining.len())?;
            kept.push(remaining.remove(idx));
        }

        Ok(kept)
    }
}

/// Narrates events in prose.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn describe(session: &GameSession, event: &GameEvent) -> String {
        let name = |player_idx: usize| session.player(player_idx).name.clone();

        match event {
            GameEvent::TurnStarted { player, .. } => {
                let who = session.player(*player);
                if who.is_computer() {
                    format!("{}'s turn", who.name).dark_cyan().to_string()
                } else {
                    format!("Player {}'s turn (Human)", who.name)
                }
            }
            GameEvent::ActionAnnounced { actor, action, claimed, target } => {
                let by = claimed.map(|c| format!(" by {}", card(c))).unwrap_or_default();
                let on = target.map(|t| format!(" on {}", name(t))).unwrap_or_default();
                format!("{} chooses to perform {}{by}{on}", name(*actor), action_ink(*action, format!("[{action}]")))
            }
            GameEvent::CoinsChanged { player, coins: amount, .. } => {
                format!("{} has {} coins now.", name(*player), coins(*amount))
            }
            GameEvent::CardRevealed { player, card: revealed } => {
                format!("{} revealed {revealed}", name(*player)).red().to_string()
            }
            GameEvent::PlayerEliminated { player } => {
                format!("{} has been eliminated from the game.", name(*player)).red().to_string()
            }
            GameEvent::ChallengeIssued { challenger, claim } => {
                let what = match claim.kind {
                    ClaimKind::Action => format!("{}", claim.action),
                    ClaimKind::Block => format!("block of {}", claim.action),
                };
                format!("{} challenges {}'s {what}!", name(*challenger), name(claim.claimant))
            }
            GameEvent::ChallengeResolved { claimant, succeeded: true, .. } => {
                format!("Challenge succeeded. {} did not have the claimed card.", name(*claimant)).green().to_string()
            }
            GameEvent::ChallengeResolved { claimant, shown, .. } => {
                let shown = shown.map(|c| c.to_string()).unwrap_or_default();
                format!("Challenge failed. {} did have a {shown}.", name(*claimant)).on_red().to_string()
            }
            GameEvent::BlockDeclared { blocker, actor, action } => {
                format!("{} blocks {}'s {action}.", name(*blocker), name(*actor))
            }
            GameEvent::BlockResolved { blocker, actor, action, stands: true } => {
                format!("{} blocked {}'s {action}.", name(*blocker), name(*actor))
            }
            GameEvent::BlockResolved { blocker, .. } => {
                format!("{}'s block was a bluff.", name(*blocker))
            }
            GameEvent::Exchanged { player } => {
                format!("{} exchanged cards with the court deck.", name(*player))
            }
            GameEvent::Winner { player } => {
                format!("{} won the game!\nGame Over", name(*player)).green().to_string()
            }
        }
    }
}

impl<W: Write> NotificationSink for ConsoleSink<W> {
    fn notify(&mut self, session: &GameSession, event: &GameEvent) {
        let _ = writeln!(self.out, "{}", Self::describe(session, event));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use crate::action::ActionId;
    use crate::config::GameConfig;
    use crate::console::{display_state, ConsoleDecisions, ConsoleSink};
    use crate::decision::{Claim, ClaimKind, DecisionSource};
    use crate::notify::{GameEvent, NotificationSink};
    use crate::session::GameSession;
    use crate::Character::{Ambassador, Captain, Contessa, Duke};
    use crate::CoupError;

    fn session() -> GameSession {
        let config = GameConfig { seed: Some(8), human_name: "Ada".to_string(), ..GameConfig::default() };
        GameSession::new(&config).unwrap()
    }

    fn console(input: &str) -> ConsoleDecisions<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleDecisions::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reprompts_until_valid() {
        let session = session();
        let mut console = console("zero\n9\n2\n");

        let action = console.choose_action(&session, 0, &[ActionId::Income, ActionId::Tax]).unwrap();
        assert_eq!(action, ActionId::Tax);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out.matches("Invalid option").count(), 2);
    }

    #[test]
    fn targets_by_menu_position() {
        let session = session();
        let mut console = console("2\n");
        assert_eq!(console.choose_target(&session, 0, ActionId::Steal, &[1, 2]).unwrap(), 2);
    }

    #[test]
    fn yes_no() {
        let session = session();
        let mut console = console("maybe\ny\nn\n");
        let claim = Claim { kind: ClaimKind::Action, actor: 1, claimant: 1, action: ActionId::Tax, target: None };

        assert!(console.decide_challenge(&session, 0, &claim).unwrap());
        assert!(!console.decide_block(&session, 0, 1, ActionId::Assassinate).unwrap());
    }

    #[test]
    fn keep_distinct_cards() {
        let session = session();
        // second answer indexes the list after the first pick is removed
        let mut console = console("3\n3\n");

        let kept = console.choose_cards_to_keep(&session, 0, &[Duke, Captain, Contessa, Ambassador], 2).unwrap();
        assert_eq!(kept, vec![Contessa, Ambassador]);
    }

    #[test]
    fn closed_input() {
        let session = session();
        let mut console = console("");
        assert!(matches!(console.choose_card_to_reveal(&session, 0, &[Duke, Captain]), Err(CoupError::Io(_))));
    }

    #[test]
    fn narrates_events() {
        let session = session();
        let mut sink = ConsoleSink::new(Vec::new());
        sink.notify(&session, &GameEvent::PlayerEliminated { player: 1 });
        sink.notify(&session, &GameEvent::Winner { player: 0 });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("AI 1 has been eliminated from the game."));
        assert!(out.contains("Ada won the game!"));
    }

    #[test]
    fn state_hides_other_hands() {
        let session = session();
        let mut out = Vec::new();
        display_state(&mut out, &session).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("2. AI 1 (2 cards)"));
        assert!(!out.contains("1. Ada"));
        assert!(out.contains("Cards: "));
    }

    #[test]
    fn computer_turn_shows_public_table() {
        let mut session = session();
        session.advance_turn();
        let mut out = Vec::new();
        display_state(&mut out, &session).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Table:"));
        assert!(out.contains("1. Ada (2 cards)"));
        assert!(out.contains("2. AI 1 (2 cards)"));
        assert!(!out.contains("Cards: "));
    }
}
