use std::fmt::{Debug, Formatter};
use std::ops::Range;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::player::{Control, Player};
use crate::rules::RuleTable;
use crate::CoupError;

/// The table: who sits where, whose turn it is, and the court deck.
///
/// Seating never changes during a game. Eliminated players keep their seat
/// with an empty hand.
#[derive(Clone)]
pub struct GameSession {
    pub(crate) turn: usize,
    pub(crate) current_player_idx: usize,
    pub(crate) rules: RuleTable,
    pub(crate) deck: Deck,
    pub(crate) players: Vec<Player>,
    pub(crate) rng: Pcg64,
}

impl Debug for GameSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("T {} | P {} | deck {}\n", self.turn, self.current_player_idx, self.deck.len()).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            f.write_str(format!("\tP {player_idx}: ${} | {:?} | {:?}\n", player.coins, player.hand, player.revealed).as_str())?;
        }
        Ok(())
    }
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Result<Self, CoupError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut deck = Deck::new(&mut rng);

        let mut players = Vec::with_capacity(config.num_players);
        for seat in 0..config.num_players {
            let hand = vec![deck.draw(&mut rng)?, deck.draw(&mut rng)?];
            let player = if seat == 0 && !config.all_computer {
                Player::new(config.human_name.clone(), Control::Human, hand)
            } else {
                Player::new(format!("AI {seat}"), Control::Computer, hand)
            };
            players.push(player);
        }

        Ok(Self {
            turn: 0,
            current_player_idx: 0,
            rules: RuleTable::default(),
            deck,
            players,
            rng,
        })
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn current_player_idx(&self) -> usize {
        self.current_player_idx
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_idx]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_idx: usize) -> &Player {
        &self.players[player_idx]
    }

    pub fn players_indexes(&self) -> Range<usize> {
        0..self.players.len()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn is_player_dead(&self, player_idx: usize) -> bool {
        self.players[player_idx].is_eliminated()
    }

    /// Living players other than `exclude_idx`, in seating order starting
    /// right after them.
    pub fn other_player_indexes(&self, exclude_idx: usize) -> Vec<usize> {
        (1..self.players.len())
            .map(|n| (exclude_idx + n) % self.players.len())
            .filter(|player_idx| !self.is_player_dead(*player_idx))
            .collect()
    }

    pub fn living_players(&self) -> usize {
        self.players.iter().filter(|player| !player.is_eliminated()).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.living_players() == 1
    }

    pub fn winner(&self) -> Option<usize> {
        if !self.is_game_over() {
            return None;
        }

        self.players.iter().position(|player| !player.is_eliminated())
    }

    // deck + hands + revealed, 15 for the whole game
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.players.iter().map(|player| player.hand.len() + player.revealed.len()).sum::<usize>()
    }

    pub(crate) fn advance_turn(&mut self) {
        // player's turn is over
        self.turn += 1;

        // go to next player
        self.current_player_idx = self.next_living_player();
    }

    fn next_living_player(&self) -> usize {
        let mut idx = (self.current_player_idx + 1) % self.players.len();
        while self.is_player_dead(idx) && idx != self.current_player_idx {
            idx = (idx + 1) % self.players.len();
        }

        idx
    }

    /// Puts the claimed card back in the deck and deals a replacement, so a
    /// player who proved a claim doesn't keep showing the same card.
    pub(crate) fn swap_with_deck(&mut self, player_idx: usize, character: crate::Character) -> Result<(), CoupError> {
        let card = self.players[player_idx]
            .take_card(character)
            .ok_or_else(|| CoupError::InvalidChoice(format!("player {player_idx} does not hold {character}")))?;

        self.deck.return_and_shuffle([card], &mut self.rng);
        let replacement = self.deck.draw(&mut self.rng)?;
        self.players[player_idx].hand.push(replacement);

        Ok(())
    }
}
