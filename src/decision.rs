//! The questions the engine asks a seat, and who answers them.
//!
//! Every seat gets one [`DecisionSource`], chosen when the game is set up: a
//! console prompt for the human, [`crate::ai::ComputerDecisions`] for computer
//! players. The engine only ever offers legal options and checks the answer
//! it gets back.

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use crate::action::ActionId;
use crate::session::GameSession;
use crate::{Character, CoupError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimKind {
    // the actor claims the character that performs the action
    Action,
    // the blocker claims one of the action's blocking characters
    Block,
}

/// A claim open to challenge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub kind: ClaimKind,
    pub actor: usize,
    pub claimant: usize,
    pub action: ActionId,
    pub target: Option<usize>,
}

pub trait DecisionSource {
    fn choose_action(&mut self, session: &GameSession, me: usize, legal: &[ActionId]) -> Result<ActionId, CoupError>;

    fn choose_target(&mut self, session: &GameSession, me: usize, action: ActionId, candidates: &[usize]) -> Result<usize, CoupError>;

    fn decide_challenge(&mut self, session: &GameSession, me: usize, claim: &Claim) -> Result<bool, CoupError>;

    fn decide_block(&mut self, session: &GameSession, me: usize, actor: usize, action: ActionId) -> Result<bool, CoupError>;

    /// Index into `hand` of the card to give up. Only asked when there is a choice.
    fn choose_card_to_reveal(&mut self, session: &GameSession, me: usize, hand: &[Character]) -> Result<usize, CoupError>;

    fn choose_cards_to_keep(&mut self, session: &GameSession, me: usize, offered: &[Character], keep_count: usize) -> Result<Vec<Character>, CoupError>;
}

/// Answers from queues filled in ahead of time.
///
/// Empty queues fall back to the first option, declining challenges and
/// blocks, and keeping the first cards offered.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    pub actions: VecDeque<ActionId>,
    pub targets: VecDeque<usize>,
    pub challenges: VecDeque<bool>,
    pub blocks: VecDeque<bool>,
    pub reveals: VecDeque<usize>,
    pub keeps: VecDeque<Vec<Character>>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, action: ActionId) -> Self {
        self.actions.push_back(action);
        self
    }

    pub fn target(mut self, target: usize) -> Self {
        self.targets.push_back(target);
        self
    }

    pub fn challenge(mut self, challenge: bool) -> Self {
        self.challenges.push_back(challenge);
        self
    }

    pub fn block(mut self, block: bool) -> Self {
        self.blocks.push_back(block);
        self
    }

    pub fn reveal(mut self, card_idx: usize) -> Self {
        self.reveals.push_back(card_idx);
        self
    }

    pub fn keep(mut self, cards: Vec<Character>) -> Self {
        self.keeps.push_back(cards);
        self
    }
}

impl DecisionSource for ScriptedDecisions {
    fn choose_action(&mut self, _: &GameSession, _: usize, legal: &[ActionId]) -> Result<ActionId, CoupError> {
        match self.actions.pop_front() {
            Some(action) => Ok(action),
            None => legal.first().copied().ok_or_else(|| CoupError::InvalidChoice("no legal actions".to_string())),
        }
    }

    fn choose_target(&mut self, _: &GameSession, _: usize, _: ActionId, candidates: &[usize]) -> Result<usize, CoupError> {
        match self.targets.pop_front() {
            Some(target) => Ok(target),
            None => candidates.first().copied().ok_or_else(|| CoupError::InvalidChoice("no targets".to_string())),
        }
    }

    fn decide_challenge(&mut self, _: &GameSession, _: usize, _: &Claim) -> Result<bool, CoupError> {
        Ok(self.challenges.pop_front().unwrap_or(false))
    }

    fn decide_block(&mut self, _: &GameSession, _: usize, _: usize, _: ActionId) -> Result<bool, CoupError> {
        Ok(self.blocks.pop_front().unwrap_or(false))
    }

    fn choose_card_to_reveal(&mut self, _: &GameSession, _: usize, _: &[Character]) -> Result<usize, CoupError> {
        Ok(self.reveals.pop_front().unwrap_or(0))
    }

    fn choose_cards_to_keep(&mut self, _: &GameSession, _: usize, offered: &[Character], keep_count: usize) -> Result<Vec<Character>, CoupError> {
        Ok(self.keeps.pop_front().unwrap_or_else(|| offered.iter().take(keep_count).copied().collect()))
    }
}
