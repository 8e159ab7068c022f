// computer players: uniform random choice among whatever is legal

use std::thread;
use std::time::Duration;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use crate::action::ActionId;
use crate::decision::{Claim, DecisionSource};
use crate::session::GameSession;
use crate::{Character, CoupError};

/// How a computer player answers challenge and block offers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChallengePolicy {
    // always decline
    Never,
    // challenge or block with this probability
    Random(f64),
    // block only when holding a blocking character, never challenge
    HonestBlock,
}

pub struct ComputerDecisions {
    rng: Pcg64,
    policy: ChallengePolicy,
    // pause before answering so a human can follow along
    delay: Duration,
}

impl ComputerDecisions {
    pub fn new(seed: u64, policy: ChallengePolicy, delay: Duration) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            policy,
            delay,
        }
    }

    fn think(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn pick<T: Copy>(&mut self, options: &[T], what: &str) -> Result<T, CoupError> {
        options
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| CoupError::InvalidChoice(format!("no {what} to choose from")))
    }
}

impl DecisionSource for ComputerDecisions {
    fn choose_action(&mut self, _: &GameSession, _: usize, legal: &[ActionId]) -> Result<ActionId, CoupError> {
        self.think();
        self.pick(legal, "actions")
    }

    fn choose_target(&mut self, _: &GameSession, _: usize, _: ActionId, candidates: &[usize]) -> Result<usize, CoupError> {
        self.pick(candidates, "targets")
    }

    fn decide_challenge(&mut self, _: &GameSession, _: usize, _: &Claim) -> Result<bool, CoupError> {
        self.think();
        Ok(match self.policy {
            ChallengePolicy::Never | ChallengePolicy::HonestBlock => false,
            ChallengePolicy::Random(p) => self.rng.gen_bool(p.clamp(0.0, 1.0)),
        })
    }

    fn decide_block(&mut self, session: &GameSession, me: usize, _: usize, action: ActionId) -> Result<bool, CoupError> {
        self.think();
        Ok(match self.policy {
            ChallengePolicy::Never => false,
            ChallengePolicy::Random(p) => self.rng.gen_bool(p.clamp(0.0, 1.0)),
            ChallengePolicy::HonestBlock => session
                .rules()
                .rule(action)
                .blocked_by
                .iter()
                .any(|&character| session.player(me).holds(character)),
        })
    }

    fn choose_card_to_reveal(&mut self, _: &GameSession, _: usize, hand: &[Character]) -> Result<usize, CoupError> {
        self.think();
        Ok(self.rng.gen_range(0..hand.len().max(1)))
    }

    fn choose_cards_to_keep(&mut self, _: &GameSession, _: usize, offered: &[Character], keep_count: usize) -> Result<Vec<Character>, CoupError> {
        Ok(offered.choose_multiple(&mut self.rng, keep_count).copied().collect())
    }
}
