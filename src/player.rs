use serde::{Deserialize, Serialize};
use crate::{Character, CoupError};

pub const STARTING_COINS: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Human,
    Computer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub control: Control,
    pub coins: u8,
    // hidden influence cards
    pub(crate) hand: Vec<Character>,
    // face up, lost for good
    pub(crate) revealed: Vec<Character>,
}

impl Player {
    pub fn new(name: impl Into<String>, control: Control, hand: Vec<Character>) -> Self {
        Self {
            name: name.into(),
            control,
            coins: STARTING_COINS,
            hand,
            revealed: vec![],
        }
    }

    pub fn hand(&self) -> &[Character] {
        &self.hand
    }

    pub fn revealed(&self) -> &[Character] {
        &self.revealed
    }

    pub fn influence(&self) -> usize {
        self.hand.len()
    }

    pub fn is_eliminated(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn is_computer(&self) -> bool {
        self.control == Control::Computer
    }

    pub fn holds(&self, character: Character) -> bool {
        self.hand.contains(&character)
    }

    /// Flips the card at `card_idx` face up.
    ///
    /// Picking which card is up to the caller; with a single card left the
    /// index is ignored.
    pub fn reveal(&mut self, player_idx: usize, card_idx: usize) -> Result<Character, CoupError> {
        let card_idx = match self.hand.len() {
            0 => return Err(CoupError::AlreadyEliminated(player_idx)),
            1 => 0,
            n if card_idx >= n => {
                return Err(CoupError::InvalidChoice(format!("card {card_idx} of a {n} card hand")));
            }
            _ => card_idx,
        };

        let card = self.hand.remove(card_idx);
        self.revealed.push(card);

        Ok(card)
    }

    // takes the claimed card out of the hand so it can be swapped with the deck
    pub(crate) fn take_card(&mut self, character: Character) -> Option<Character> {
        let idx = self.hand.iter().position(|&c| c == character)?;
        Some(self.hand.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use crate::player::{Control, Player};
    use crate::Character::{Assassin, Duke};
    use crate::CoupError;

    #[test]
    fn reveal_both_cards() {
        let mut player = Player::new("p", Control::Computer, vec![Duke, Assassin]);
        assert_eq!(player.coins, 2);
        assert!(!player.is_eliminated());

        assert_eq!(player.reveal(0, 1), Ok(Assassin));
        assert_eq!(player.hand(), &[Duke]);
        assert_eq!(player.revealed(), &[Assassin]);

        // single card left, index doesn't matter
        assert_eq!(player.reveal(0, 5), Ok(Duke));
        assert!(player.is_eliminated());
        assert_eq!(player.revealed(), &[Assassin, Duke]);

        assert_eq!(player.reveal(0, 0), Err(CoupError::AlreadyEliminated(0)));
    }

    #[test]
    fn reveal_out_of_range() {
        let mut player = Player::new("p", Control::Human, vec![Duke, Assassin]);
        assert!(matches!(player.reveal(3, 2), Err(CoupError::InvalidChoice(_))));
        assert_eq!(player.influence(), 2);
    }

    #[test]
    fn take_claimed_card() {
        let mut player = Player::new("p", Control::Human, vec![Duke, Assassin]);
        assert!(player.holds(Assassin));
        assert_eq!(player.take_card(Assassin), Some(Assassin));
        assert_eq!(player.take_card(Assassin), None);
        assert_eq!(player.hand(), &[Duke]);
    }
}
