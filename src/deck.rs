use rand::seq::SliceRandom;
use rand::Rng;
use crate::{Character, CoupError, CHARACTER_VARIANTS, COPIES_PER_CHARACTER};

/// The court deck.
///
/// The pile is reshuffled after every change so the position of a card that was
/// pushed back can't be used to predict the next draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Character>,
}

impl Deck {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<Character> = CHARACTER_VARIANTS.iter()
            .flat_map(|&card| std::iter::repeat(card).take(COPIES_PER_CHARACTER))
            .collect();

        cards.shuffle(rng);

        Self { cards }
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Character, CoupError> {
        if self.cards.is_empty() {
            return Err(CoupError::EmptyDeck);
        }

        let card = self.cards.remove(0);
        self.cards.shuffle(rng);

        Ok(card)
    }

    pub fn return_and_shuffle<R: Rng + ?Sized>(&mut self, cards: impl IntoIterator<Item = Character>, rng: &mut R) {
        self.cards.extend(cards);
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Character] {
        &self.cards
    }

    // pulls a specific card out so tests can deal fixed hands
    #[cfg(test)]
    pub(crate) fn take(&mut self, character: Character) -> Option<Character> {
        let idx = self.cards.iter().position(|&c| c == character)?;
        Some(self.cards.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use crate::deck::Deck;
    use crate::{CoupError, CHARACTER_VARIANTS, TOTAL_CARDS};

    #[test]
    fn full_court() {
        let mut rng = Pcg64::seed_from_u64(7);
        let deck = Deck::new(&mut rng);
        assert_eq!(deck.len(), TOTAL_CARDS);

        for character in CHARACTER_VARIANTS {
            assert_eq!(deck.cards().iter().filter(|&&c| c == character).count(), 3);
        }
    }

    #[test]
    fn draw_until_empty() {
        let mut rng = Pcg64::seed_from_u64(7);
        let mut deck = Deck::new(&mut rng);

        let mut drawn = vec![];
        for _ in 0..TOTAL_CARDS {
            drawn.push(deck.draw(&mut rng).unwrap());
        }

        assert!(deck.is_empty());
        assert_eq!(deck.draw(&mut rng), Err(CoupError::EmptyDeck));

        deck.return_and_shuffle(drawn, &mut rng);
        assert_eq!(deck.len(), TOTAL_CARDS);
    }

    #[test]
    fn seeded_decks_match() {
        let a = Deck::new(&mut Pcg64::seed_from_u64(99));
        let b = Deck::new(&mut Pcg64::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
