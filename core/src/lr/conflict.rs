use std::collections::BTreeSet;

use crate::{RuleId, TerminalId};

use super::{Action, ActionKind, LrTable, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
    ShiftAccept,
    ReduceAccept,
}

impl ConflictKind {
    /// Classify the actions of a cell, None if there is no conflict.
    pub fn classify(actions: &[Action]) -> Option<Self> {
        (actions.len() > 1).then(|| Self::of_conflict(actions))
    }

    /// A cell holds at most one shift and one accept, so two actions or
    /// more without any reduce are a shift and an accept.
    fn of_conflict(actions: &[Action]) -> Self {
        let shifts = actions.iter().any(|a| a.kind() == ActionKind::Shift);
        let reduces = actions
            .iter()
            .filter(|a| a.kind() == ActionKind::Reduce)
            .count();

        match (shifts, reduces) {
            (_, 0) => Self::ShiftAccept,
            (true, _) => Self::ShiftReduce,
            (false, 1) => Self::ReduceAccept,
            (false, _) => Self::ReduceReduce,
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShiftReduce => write!(f, "shift/reduce"),
            Self::ReduceReduce => write!(f, "reduce/reduce"),
            Self::ShiftAccept => write!(f, "shift/accept"),
            Self::ReduceAccept => write!(f, "reduce/accept"),
        }
    }
}

/// A (state, terminal) pair holding more than one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conflict {
    pub state: StateId,
    pub terminal: TerminalId,
    pub kind: ConflictKind,
}

impl LrTable<'_> {
    /// Returns the list of conflicts in the action table.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.iter_cells()
            .filter(|(_, _, actions)| actions.len() > 1)
            .map(|(state, terminal, actions)| Conflict {
                state,
                terminal,
                kind: ConflictKind::of_conflict(actions),
            })
            .collect()
    }

    /// Returns the count of conflicts in the action table.
    pub fn count_conflicts(&self) -> usize {
        self.iter_cells()
            .filter(|(_, _, actions)| actions.len() > 1)
            .count()
    }

    /// Solve every shift/reduce conflict by keeping the favoured actions only.
    ///
    /// Other conflicts are left untouched. Returns the number of solved cells.
    pub fn resolve(&mut self, favor: ActionKind) -> usize {
        let mut solved = 0;

        for cell in self.rows.iter_mut().flat_map(|row| row.0.iter_mut()) {
            if ConflictKind::classify(cell) == Some(ConflictKind::ShiftReduce) {
                cell.retain(|action| action.kind() == favor);
                solved += 1;
            }
        }

        log::debug!("{} shift/reduce conflict(s) solved in favor of {:?}", solved, favor);

        solved
    }

    /// Rules whose completion is never reached from the start symbol.
    pub fn unused_rule_ids(&self) -> BTreeSet<RuleId> {
        self.grammar
            .rules()
            .iter()
            .filter(|rule| {
                let completed = rule.completed();
                !self
                    .automaton
                    .states()
                    .iter()
                    .any(|set| set.contains(&completed))
            })
            .map(|rule| rule.id)
            .collect()
    }

    /// The names of the unused rules, for grammar linting.
    pub fn unused_rules(&self) -> BTreeSet<String> {
        self.unused_rule_ids()
            .into_iter()
            .map(|id| self.grammar.rule_name(id).to_string())
            .collect()
    }
}
