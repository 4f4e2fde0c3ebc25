use crate::RuleId;

use super::StateId;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    Shift(StateId),
    Reduce(RuleId),
    Accept,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Shift(_) => ActionKind::Shift,
            Action::Reduce(_) => ActionKind::Reduce,
            Action::Accept => ActionKind::Accept,
        }
    }
}

/// The kind of an action, regardless of its target.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ActionKind {
    #[default]
    Shift,
    Reduce,
    Accept,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(to) => write!(f, "s{}", to),
            Action::Reduce(to) => write!(f, "r{}", to),
            Action::Accept => write!(f, "acc"),
        }
    }
}
