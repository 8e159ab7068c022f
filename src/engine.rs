//! One player turn, start to finish.
//!
//! ```text
//! - action (pay for assassinate)
//!     - responders in seating order after the actor, first one to act wins
//!         - challenge
//!             - claimant has the card: challenger loses, claimant swaps card, action goes ahead
//!             - bluff: claimant loses, action is cancelled
//!         - block (target, or anyone for foreign aid)
//!             - actor challenges the block
//!                 - blocker has a blocking card: actor loses, block stands
//!                 - bluff: blocker loses, action goes ahead
//!             - actor relents: block stands
//!         - pass
//!     - effects
//! - winner? otherwise next living player
//! ```

use rand::{thread_rng, Rng};
use crate::action::{ActionId, ChosenAction};
use crate::ai::{ChallengePolicy, ComputerDecisions};
use crate::config::GameConfig;
use crate::console::ConsoleDecisions;
use crate::decision::{Claim, ClaimKind, DecisionSource};
use crate::notify::{GameEvent, NotificationSink};
use crate::player::Control;
use crate::rules::ActionRule;
use crate::session::GameSession;
use crate::{Character, CoupError};

const TRACE_TURNS: bool = false;

pub const MAX_TURNS: usize = 10_000;

// cards drawn from the court deck by an exchange
const EXCHANGE_DRAW: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    GameOver { winner: usize },
}

pub struct TurnEngine {
    // one per seat
    decisions: Vec<Box<dyn DecisionSource>>,
}

impl TurnEngine {
    pub fn new(decisions: Vec<Box<dyn DecisionSource>>) -> Self {
        Self { decisions }
    }

    /// Console prompts for the human seat, computer players for the rest.
    pub fn for_session(session: &GameSession, config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| thread_rng().gen());
        let decisions = session
            .players()
            .iter()
            .enumerate()
            .map(|(seat, player)| -> Box<dyn DecisionSource> {
                match player.control {
                    Control::Human => Box::new(ConsoleDecisions::stdin(config.json_events)),
                    Control::Computer => Box::new(ComputerDecisions::new(
                        seed.wrapping_add(seat as u64 + 1),
                        config.computer_policy,
                        config.ai_delay,
                    )),
                }
            })
            .collect();

        Self { decisions }
    }

    pub fn computer_only(session: &GameSession, policy: ChallengePolicy, seed: u64) -> Self {
        let decisions = session
            .players_indexes()
            .map(|seat| -> Box<dyn DecisionSource> {
                Box::new(ComputerDecisions::new(seed.wrapping_add(seat as u64 + 1), policy, Default::default()))
            })
            .collect();

        Self { decisions }
    }

    pub fn play_game(&mut self, session: &mut GameSession, sink: &mut dyn NotificationSink) -> Result<usize, CoupError> {
        loop {
            if let TurnOutcome::GameOver { winner } = self.play_turn(session, sink)? {
                return Ok(winner);
            }

            if session.turn >= MAX_TURNS {
                return Err(CoupError::TurnLimit(session.turn));
            }
        }
    }

    pub fn play_turn(&mut self, session: &mut GameSession, sink: &mut dyn NotificationSink) -> Result<TurnOutcome, CoupError> {
        if self.decisions.len() != session.players.len() {
            return Err(CoupError::SeatMismatch { seats: session.players.len(), sources: self.decisions.len() });
        }

        if let Some(winner) = session.winner() {
            return Ok(TurnOutcome::GameOver { winner });
        }

        sink.notify(session, &GameEvent::TurnStarted { turn: session.turn, player: session.current_player_idx });

        let chosen = self.choose_action(session, sink)?;

        if TRACE_TURNS {
            eprintln!("T{}: {:?} | {:?}", session.turn, chosen, session.players[chosen.actor].hand);
        }

        if self.respond(session, chosen, sink)? {
            self.apply_effects(session, chosen, sink)?;
        }

        if let Some(winner) = session.winner() {
            sink.notify(session, &GameEvent::Winner { player: winner });
            return Ok(TurnOutcome::GameOver { winner });
        }

        session.advance_turn();

        Ok(TurnOutcome::Continue)
    }

    fn choose_action(&mut self, session: &mut GameSession, sink: &mut dyn NotificationSink) -> Result<ChosenAction, CoupError> {
        let actor = session.current_player_idx;
        if session.is_player_dead(actor) {
            return Err(CoupError::AlreadyEliminated(actor));
        }

        let coins = session.players[actor].coins;
        let legal = session.rules.legal_actions(coins);
        let action = self.decisions[actor].choose_action(session, actor, &legal)?;

        if !legal.contains(&action) {
            if coins < session.rules.rule(action).cost {
                return Err(CoupError::InsufficientFunds { action, coins });
            }
            return Err(CoupError::IllegalAction(action));
        }

        let target = if action.requires_target() {
            let candidates = session.other_player_indexes(actor);
            let target = self.decisions[actor].choose_target(session, actor, action, &candidates)?;
            if !candidates.contains(&target) {
                return Err(CoupError::InvalidTarget(target));
            }
            Some(target)
        } else {
            None
        };

        let rule = session.rules.rule(action).clone();
        if pays_up_front(&rule) {
            let coins = coins.checked_sub(rule.cost).ok_or(CoupError::InsufficientFunds { action, coins })?;
            set_coins(session, actor, coins, sink);
        }

        sink.notify(session, &GameEvent::ActionAnnounced { actor, action, claimed: rule.performed_by, target });

        Ok(ChosenAction { actor, action, target })
    }

    // true if the action goes ahead
    fn respond(&mut self, session: &mut GameSession, chosen: ChosenAction, sink: &mut dyn NotificationSink) -> Result<bool, CoupError> {
        let ChosenAction { actor, action, target } = chosen;
        let rule = session.rules.rule(action).clone();

        for responder in session.other_player_indexes(actor) {
            if rule.can_be_challenged {
                let claim = Claim { kind: ClaimKind::Action, actor, claimant: actor, action, target };
                if self.decisions[responder].decide_challenge(session, responder, &claim)? {
                    let claimed = rule.performed_by.ok_or(CoupError::IllegalAction(action))?;
                    let succeeded = self.resolve_challenge(session, responder, claim, &[claimed], sink)?;
                    return Ok(!succeeded);
                }
            }

            // anyone can block an untargeted action like foreign aid
            let may_block = session.rules.is_blockable(action) && target.map_or(true, |target| target == responder);
            if may_block && self.decisions[responder].decide_block(session, responder, actor, action)? {
                let stands = self.resolve_block(session, responder, chosen, sink)?;
                return Ok(!stands);
            }
        }

        Ok(true)
    }

    // true if the challenge succeeded, i.e. the claim was a bluff
    fn resolve_challenge(&mut self, session: &mut GameSession, challenger: usize, claim: Claim, claimed: &[Character], sink: &mut dyn NotificationSink) -> Result<bool, CoupError> {
        sink.notify(session, &GameEvent::ChallengeIssued { challenger, claim });

        let claimant = claim.claimant;
        let proof = claimed.iter().copied().find(|&character| session.players[claimant].holds(character));

        match proof {
            Some(card) => {
                sink.notify(session, &GameEvent::ChallengeResolved { challenger, claimant, succeeded: false, shown: Some(card) });
                self.lose_influence(session, challenger, sink)?;
                session.swap_with_deck(claimant, card)?;
                Ok(false)
            }
            None => {
                sink.notify(session, &GameEvent::ChallengeResolved { challenger, claimant, succeeded: true, shown: None });
                self.lose_influence(session, claimant, sink)?;
                Ok(true)
            }
        }
    }

    // true if the block stands
    fn resolve_block(&mut self, session: &mut GameSession, blocker: usize, chosen: ChosenAction, sink: &mut dyn NotificationSink) -> Result<bool, CoupError> {
        let ChosenAction { actor, action, target } = chosen;
        sink.notify(session, &GameEvent::BlockDeclared { blocker, actor, action });

        let claim = Claim { kind: ClaimKind::Block, actor, claimant: blocker, action, target };
        let stands = if self.decisions[actor].decide_challenge(session, actor, &claim)? {
            let blocked_by = session.rules.rule(action).blocked_by.clone();
            !self.resolve_challenge(session, actor, claim, &blocked_by, sink)?
        } else {
            true
        };

        sink.notify(session, &GameEvent::BlockResolved { blocker, actor, action, stands });

        Ok(stands)
    }

    fn apply_effects(&mut self, session: &mut GameSession, chosen: ChosenAction, sink: &mut dyn NotificationSink) -> Result<(), CoupError> {
        let ChosenAction { actor, action, target } = chosen;
        let rule = session.rules.rule(action).clone();

        if !pays_up_front(&rule) && rule.cost > 0 {
            let coins = session.players[actor].coins;
            let coins = coins.checked_sub(rule.cost).ok_or(CoupError::InsufficientFunds { action, coins })?;
            set_coins(session, actor, coins, sink);
        }

        if rule.income > 0 {
            let coins = session.players[actor].coins.saturating_add(rule.income);
            set_coins(session, actor, coins, sink);
        }

        match action {
            ActionId::Steal => {
                let target = target.ok_or(CoupError::IllegalAction(action))?;
                let amount = rule.steal_amount.min(session.players[target].coins);
                let target_coins = session.players[target].coins - amount;
                let actor_coins = session.players[actor].coins.saturating_add(amount);
                set_coins(session, target, target_coins, sink);
                set_coins(session, actor, actor_coins, sink);
            }
            ActionId::Assassinate | ActionId::Coup => {
                let target = target.ok_or(CoupError::IllegalAction(action))?;
                // target could already be dead from losing a challenge
                if !session.is_player_dead(target) {
                    self.lose_influence(session, target, sink)?;
                }
            }
            ActionId::Exchange => self.exchange(session, actor, sink)?,
            ActionId::Income | ActionId::ForeignAid | ActionId::Tax => {}
        }

        Ok(())
    }

    fn exchange(&mut self, session: &mut GameSession, player_idx: usize, sink: &mut dyn NotificationSink) -> Result<(), CoupError> {
        let keep_count = session.players[player_idx].hand.len();

        let mut offered = session.players[player_idx].hand.clone();
        for _ in 0..EXCHANGE_DRAW {
            offered.push(session.deck.draw(&mut session.rng)?);
        }

        let kept = self.decisions[player_idx].choose_cards_to_keep(session, player_idx, &offered, keep_count)?;
        if kept.len() != keep_count {
            return Err(CoupError::InvalidChoice(format!("kept {} cards, must keep {keep_count}", kept.len())));
        }

        let mut returned = offered;
        for card in &kept {
            let idx = returned
                .iter()
                .position(|c| c == card)
                .ok_or_else(|| CoupError::InvalidChoice(format!("{card} was not offered")))?;
            returned.remove(idx);
        }

        session.players[player_idx].hand = kept;
        session.deck.return_and_shuffle(returned, &mut session.rng);

        sink.notify(session, &GameEvent::Exchanged { player: player_idx });

        Ok(())
    }

    fn lose_influence(&mut self, session: &mut GameSession, player_idx: usize, sink: &mut dyn NotificationSink) -> Result<(), CoupError> {
        let hand = session.players[player_idx].hand.clone();
        let card_idx = match hand.len() {
            0 => return Err(CoupError::AlreadyEliminated(player_idx)),
            1 => 0,
            _ => self.decisions[player_idx].choose_card_to_reveal(session, player_idx, &hand)?,
        };

        let card = session.players[player_idx].reveal(player_idx, card_idx)?;
        sink.notify(session, &GameEvent::CardRevealed { player: player_idx, card });

        if session.is_player_dead(player_idx) {
            sink.notify(session, &GameEvent::PlayerEliminated { player: player_idx });
        }

        Ok(())
    }
}

// contestable actions are paid for when announced, coup as it resolves
fn pays_up_front(rule: &ActionRule) -> bool {
    rule.cost > 0 && (rule.can_be_challenged || rule.is_blockable())
}

fn set_coins(session: &mut GameSession, player_idx: usize, coins: u8, sink: &mut dyn NotificationSink) {
    let delta = coins as i16 - session.players[player_idx].coins as i16;
    if delta == 0 {
        return;
    }

    session.players[player_idx].coins = coins;
    sink.notify(session, &GameEvent::CoinsChanged { player: player_idx, delta, coins });
}
