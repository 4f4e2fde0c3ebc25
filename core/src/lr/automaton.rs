use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{Grammar, Item, ItemSet, Symbol};

use super::StateId;

/// One row per state, the transitions by symbol.
pub type GotoTable = Vec<BTreeMap<Symbol, StateId>>;

/// The canonical collection of LR(0) item sets.
///
/// States are sorted by content, so the numbering only depends
/// on the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<ItemSet>,
    index: HashMap<ItemSet, StateId>,
    initial: StateId,
    goto: GotoTable,
}

/// Closes kernels, remembering the closure of each kernel met so far.
#[derive(Default)]
struct Closures(HashMap<ItemSet, ItemSet>);

impl Closures {
    fn close(&mut self, grammar: &Grammar, kernel: ItemSet) -> &ItemSet {
        self.0
            .entry(kernel)
            .or_insert_with_key(|kernel| kernel.closure(grammar))
    }
}

impl Automaton {
    pub fn build(grammar: &Grammar) -> Self {
        let mut closures = Closures::default();

        let initial = closures
            .close(grammar, ItemSet::from_iter([Item::start()]))
            .clone();

        let mut discovered = HashSet::<ItemSet>::default();
        let mut stack = vec![initial.clone()];

        while let Some(set) = stack.pop() {
            if discovered.contains(&set) {
                continue;
            }

            for (_, kernel) in set.transition(grammar) {
                let target = closures.close(grammar, kernel);
                if !discovered.contains(target) {
                    stack.push(target.clone());
                }
            }

            log::trace!("discovered state of {} items", set.len());
            discovered.insert(set);
        }

        let mut states: Vec<ItemSet> = discovered.into_iter().collect();
        states.sort();

        let index: HashMap<ItemSet, StateId> = states
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, set)| (set, id))
            .collect();

        let goto = states
            .iter()
            .map(|set| {
                set.transition(grammar)
                    .into_iter()
                    .filter_map(|(sym, kernel)| {
                        index
                            .get(closures.close(grammar, kernel))
                            .map(|&to| (sym, to))
                    })
                    .collect()
            })
            .collect();

        let initial = index.get(&initial).copied().unwrap_or_default();

        log::debug!(
            "automaton built: {} states, initial state #{}",
            states.len(),
            initial
        );

        Self {
            states,
            index,
            initial,
            goto,
        }
    }

    /// The number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn state(&self, id: StateId) -> Option<&ItemSet> {
        self.states.get(id)
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    /// Returns the index of the closure of the item set, if it is a state.
    pub fn index_of(&self, grammar: &Grammar, items: &ItemSet) -> Option<StateId> {
        self.index.get(&items.closure(grammar)).copied()
    }

    pub fn goto_table(&self) -> &GotoTable {
        &self.goto
    }

    pub fn goto(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.goto.get(state).and_then(|row| row.get(&symbol)).copied()
    }

    /// Iterate over the states, along with their transitions.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &ItemSet, &BTreeMap<Symbol, StateId>)> {
        self.states
            .iter()
            .zip(self.goto.iter())
            .enumerate()
            .map(|(id, (set, row))| (id, set, row))
    }
}
