use std::fmt::{Debug, Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionId {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Steal,
    Exchange,
    Assassinate,
}

pub static ACTION_VARIANTS: [ActionId; 7] = [
    ActionId::Income,
    ActionId::ForeignAid,
    ActionId::Coup,
    ActionId::Tax,
    ActionId::Steal,
    ActionId::Exchange,
    ActionId::Assassinate,
];

impl ActionId {
    // coup, assassinate and steal are aimed at another living player
    pub fn requires_target(&self) -> bool {
        matches!(self, ActionId::Coup | ActionId::Assassinate | ActionId::Steal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionId::Income => "Income (Take 1 coin)",
            ActionId::ForeignAid => "Foreign aid (Take 2 coins)",
            ActionId::Coup => "Coup (Pay 7 coins to launch a coup)",
            ActionId::Tax => "Tax (Take 3 coins as the Duke)",
            ActionId::Steal => "Steal (Steal 2 coins as the Captain)",
            ActionId::Exchange => "Exchange (Exchange cards with the Court Deck as the Ambassador)",
            ActionId::Assassinate => "Assassinate (Pay 3 coins to assassinate another player's influence)",
        }
    }
}

impl Display for ActionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionId::Income => "income",
            ActionId::ForeignAid => "foreign_aid",
            ActionId::Coup => "coup",
            ActionId::Tax => "tax",
            ActionId::Steal => "steal",
            ActionId::Exchange => "exchange",
            ActionId::Assassinate => "assassinate",
        };
        f.write_str(name)
    }
}

/// An action picked for this turn, with its target when it has one.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenAction {
    pub actor: usize,
    pub action: ActionId,
    pub target: Option<usize>,
}

impl Debug for ChosenAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let actor = self.actor;
        match (self.action, self.target) {
            (ActionId::Income, _) => f.write_fmt(format_args!("Player {actor} takes Income")),
            (ActionId::ForeignAid, _) => f.write_fmt(format_args!("Player {actor} gets foreign aid")),
            (ActionId::Tax, _) => f.write_fmt(format_args!("Player {actor} gets Taxes")),
            (ActionId::Exchange, _) => f.write_fmt(format_args!("Player {actor} exchanges with the court deck")),
            (ActionId::Coup, Some(target)) => f.write_fmt(format_args!("Player {actor} coups {target}")),
            (ActionId::Assassinate, Some(target)) => {
                f.write_fmt(format_args!("Player {actor} assassinates {target}"))
            }
            (ActionId::Steal, Some(target)) => f.write_fmt(format_args!("Player {actor} steals from {target}")),
            (action, None) => f.write_fmt(format_args!("Player {actor} performs {action} without a target")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{ActionId, ChosenAction, ACTION_VARIANTS};

    #[test]
    fn targeted_actions() {
        let targeted: Vec<ActionId> = ACTION_VARIANTS.iter().copied().filter(|a| a.requires_target()).collect();
        assert_eq!(targeted, vec![ActionId::Coup, ActionId::Steal, ActionId::Assassinate]);
    }

    #[test]
    fn debug_reads_like_a_log_line() {
        let chosen = ChosenAction { actor: 0, action: ActionId::Steal, target: Some(2) };
        assert_eq!(format!("{:?}", chosen), "Player 0 steals from 2");
        assert_eq!(ActionId::ForeignAid.to_string(), "foreign_aid");
    }
}
