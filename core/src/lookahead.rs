use std::collections::{BTreeSet, HashSet};

use crate::{Grammar, Item, ItemSet, NonTerminalId, TerminalId, EOS_ID};

/// Where each non-terminal is used in the grammar.
///
/// For a non-terminal N, holds every item (A -> α N • β), that is the
/// position immediately following each occurrence of N in a rhs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextUse(Vec<BTreeSet<Item>>);

impl NextUse {
    pub fn new(grammar: &Grammar) -> Self {
        let mut uses = vec![BTreeSet::<Item>::default(); grammar.non_terminals_len()];

        for item in grammar.items().filter(|item| item.position > 0) {
            let previous = grammar.rule(item.rule).rhs[item.position - 1];
            if let Some(nt) = previous.as_non_terminal() {
                uses[nt].insert(item);
            }
        }

        Self(uses)
    }

    /// The items following an occurrence of the non-terminal.
    pub fn uses(&self, nt: NonTerminalId) -> impl Iterator<Item = &Item> {
        self.0.get(nt).into_iter().flatten()
    }

    /// Collect the items which may follow the reduction of the completed item.
    ///
    /// If the reduced non-terminal ends another rule (B -> γ A •), the search
    /// carries on with the uses of B. Each item is visited at most once.
    pub fn next_items(&self, grammar: &Grammar, item: Item) -> ItemSet {
        let mut visited = HashSet::<Item>::default();
        let mut items = ItemSet::default();
        let mut stack = vec![grammar.rule(item.rule).lhs];

        while let Some(nt) = stack.pop() {
            for &next in self.uses(nt) {
                if !visited.insert(next) {
                    continue;
                }

                if next.is_completed(grammar) {
                    stack.push(grammar.rule(next.rule).lhs);
                } else {
                    items.insert(next);
                }
            }
        }

        items
    }

    /// Returns all the terminals which may follow the reduction of the completed item.
    ///
    /// The end of stream is always part of the lookahead.
    pub fn following_tokens(&self, grammar: &Grammar, item: Item) -> BTreeSet<TerminalId> {
        let mut tokens = self.next_items(grammar, item).closure(grammar).first(grammar);
        tokens.insert(EOS_ID);

        log::trace!(
            "lookahead of {}: {} terminal(s)",
            item.display(grammar),
            tokens.len()
        );

        tokens
    }
}
