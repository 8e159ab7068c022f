use crate::action::{ActionId, ACTION_VARIANTS};
use crate::Character;
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

// at this many coins a player must coup
pub const MAX_COINS_FOR_COUP: u8 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRule {
    // character claimed by performing the action, None for free actions and coup
    pub performed_by: Option<Character>,
    pub cost: u8,
    pub income: u8,
    // upper bound on coins taken from the target
    pub steal_amount: u8,
    pub blocked_by: Vec<Character>,
    pub can_be_challenged: bool,
}

impl ActionRule {
    fn free(income: u8, blocked_by: Vec<Character>) -> Self {
        Self {
            performed_by: None,
            cost: 0,
            income,
            steal_amount: 0,
            blocked_by,
            can_be_challenged: false,
        }
    }

    fn character(character: Character) -> Self {
        Self {
            performed_by: Some(character),
            cost: 0,
            income: 0,
            steal_amount: 0,
            blocked_by: vec![],
            can_be_challenged: true,
        }
    }

    pub fn is_blockable(&self) -> bool {
        !self.blocked_by.is_empty()
    }
}

/// The rules of every action, built once per session and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<(ActionId, ActionRule)>,
}

impl Default for RuleTable {
    fn default() -> Self {
        let rules = ACTION_VARIANTS
            .iter()
            .map(|&action| {
                let rule = match action {
                    ActionId::Income => ActionRule::free(1, vec![]),
                    ActionId::ForeignAid => ActionRule::free(2, vec![Duke]),
                    ActionId::Coup => ActionRule { cost: 7, ..ActionRule::free(0, vec![]) },
                    ActionId::Tax => ActionRule { income: 3, ..ActionRule::character(Duke) },
                    ActionId::Steal => ActionRule {
                        steal_amount: 2,
                        blocked_by: vec![Captain, Ambassador],
                        ..ActionRule::character(Captain)
                    },
                    ActionId::Exchange => ActionRule::character(Ambassador),
                    ActionId::Assassinate => ActionRule {
                        cost: 3,
                        blocked_by: vec![Contessa],
                        ..ActionRule::character(Assassin)
                    },
                };
                (action, rule)
            })
            .collect();

        Self { rules }
    }
}

impl RuleTable {
    pub fn rule(&self, action: ActionId) -> &ActionRule {
        self.rules
            .iter()
            .find(|(id, _)| *id == action)
            .map(|(_, rule)| rule)
            .unwrap_or_else(|| unreachable!("every action has a rule"))
    }

    pub fn is_blockable(&self, action: ActionId) -> bool {
        self.rule(action).is_blockable()
    }

    pub fn legal_actions(&self, coins: u8) -> Vec<ActionId> {
        if coins >= MAX_COINS_FOR_COUP {
            // forced coup at $10+
            return vec![ActionId::Coup];
        }

        self.rules
            .iter()
            .filter(|(_, rule)| coins >= rule.cost)
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::action::ActionId;
    use crate::rules::{RuleTable, MAX_COINS_FOR_COUP};
    use crate::Character::{Ambassador, Captain, Contessa, Duke};

    #[test]
    fn forced_coup() {
        let rules = RuleTable::default();
        for coins in MAX_COINS_FOR_COUP..=20 {
            assert_eq!(rules.legal_actions(coins), vec![ActionId::Coup]);
        }
    }

    #[test]
    fn legality_follows_cost() {
        let rules = RuleTable::default();

        let broke = rules.legal_actions(0);
        assert!(!broke.contains(&ActionId::Assassinate));
        assert!(!broke.contains(&ActionId::Coup));
        assert_eq!(broke.len(), 5);

        let three = rules.legal_actions(3);
        assert!(three.contains(&ActionId::Assassinate));
        assert!(!three.contains(&ActionId::Coup));

        let nine = rules.legal_actions(9);
        assert_eq!(nine.len(), 7);
    }

    #[test]
    fn claims_and_blockers() {
        let rules = RuleTable::default();

        assert_eq!(rules.rule(ActionId::Tax).performed_by, Some(Duke));
        assert_eq!(rules.rule(ActionId::Tax).income, 3);
        assert!(!rules.is_blockable(ActionId::Tax));

        assert_eq!(rules.rule(ActionId::Steal).blocked_by, vec![Captain, Ambassador]);
        assert_eq!(rules.rule(ActionId::Assassinate).blocked_by, vec![Contessa]);
        assert_eq!(rules.rule(ActionId::ForeignAid).blocked_by, vec![Duke]);
        assert!(!rules.is_blockable(ActionId::Exchange));

        for action in [ActionId::Income, ActionId::ForeignAid, ActionId::Coup] {
            assert!(!rules.rule(action).can_be_challenged);
            assert_eq!(rules.rule(action).performed_by, None);
        }
        for action in [ActionId::Tax, ActionId::Steal, ActionId::Exchange, ActionId::Assassinate] {
            assert!(rules.rule(action).can_be_challenged);
        }

        assert!(!rules.is_blockable(ActionId::Coup));
        assert_eq!(rules.rule(ActionId::Coup).cost, 7);
    }
}
