use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::{Grammar, RuleId, Symbol, TerminalId, START_RULE};

pub type ItemSetId = usize;

/// A rule item.
///
/// The rule's rhs is recognized up to the position.
///
/// # Example
/// A -> w • eof
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    pub rule: RuleId,
    pub position: usize,
}

impl Item {
    pub const fn new(rule: RuleId, position: usize) -> Self {
        Self { rule, position }
    }

    /// The item opening the augmented start rule (S' -> • S)
    pub const fn start() -> Self {
        Self::new(START_RULE, 0)
    }

    /// Returns the symbol after the dot.
    /// If A -> w •, then returns None.
    pub fn symbol(&self, grammar: &Grammar) -> Option<Symbol> {
        grammar.rule(self.rule).rhs.get(self.position).copied()
    }

    /// Check if we reached the end of a rule.
    ///
    /// # Example
    /// A -> w •
    pub fn is_completed(&self, grammar: &Grammar) -> bool {
        self.position >= grammar.rule(self.rule).len()
    }

    /// Returns the item with the dot moved one symbol forward.
    ///
    /// # Example
    /// (A -> • w eof).next() -> (A -> w • eof)
    pub fn next(&self) -> Self {
        Self::new(self.rule, self.position + 1)
    }

    pub fn display<'g>(&self, grammar: &'g Grammar) -> DisplayItem<'g> {
        DisplayItem {
            item: *self,
            grammar,
        }
    }
}

pub struct DisplayItem<'g> {
    item: Item,
    grammar: &'g Grammar,
}

impl std::fmt::Display for DisplayItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = self.grammar.rule(self.item.rule);

        let mut rhs = rule
            .rhs
            .iter()
            .map(|sym| self.grammar.name(*sym).to_string())
            .enumerate()
            .map(|(pos, mut s)| {
                if pos == self.item.position {
                    s.insert_str(0, "• ");
                }
                s
            })
            .join(" ");

        if self.item.position >= rule.len() {
            if !rhs.is_empty() {
                rhs.push(' ');
            }
            rhs.push('•');
        }

        write!(
            f,
            "[({}) {} -> {}]",
            rule.id,
            self.grammar.rule_name(rule.id),
            rhs
        )
    }
}

/// A set of items.
///
/// Items are kept ordered so that two sets holding the same items
/// compare, hash and sort identically whatever the insertion order.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ItemSet(BTreeSet<Item>);

impl FromIterator<Item> for ItemSet {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Item;
    type IntoIter = std::collections::btree_set::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl ItemSet {
    /// Iterate over all items within the set.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.0.contains(item)
    }

    /// Returns true if the item was not yet in the set.
    pub fn insert(&mut self, item: Item) -> bool {
        self.0.insert(item)
    }

    pub fn is_superset(&self, other: &ItemSet) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Iterate over all completed items (A -> w •)
    pub fn completed<'a>(&'a self, grammar: &'a Grammar) -> impl Iterator<Item = Item> + 'a {
        self.iter()
            .copied()
            .filter(move |item| item.is_completed(grammar))
    }

    /// Close the item set
    ///
    /// Every item whose dot stands before a non-terminal brings
    /// the opening items of that non-terminal's rules, until nothing new is added.
    pub fn closure(&self, grammar: &Grammar) -> ItemSet {
        let mut closed = self.clone();
        let mut stack: Vec<Item> = self.iter().copied().collect();

        while let Some(item) = stack.pop() {
            if let Some(Symbol::NonTerminal(nt)) = item.symbol(grammar) {
                for rule in grammar.rules_by_lhs(nt) {
                    let derived = Item::new(rule.id, 0);
                    if closed.insert(derived) {
                        stack.push(derived);
                    }
                }
            }
        }

        closed
    }

    /// Group the items by the symbol after the dot, and move the dot over it.
    ///
    /// The transition returns, for each symbol, the kernel of the reached set.
    pub fn transition(&self, grammar: &Grammar) -> BTreeMap<Symbol, ItemSet> {
        let mut targets = BTreeMap::<Symbol, ItemSet>::default();

        for item in self.iter() {
            if let Some(sym) = item.symbol(grammar) {
                targets.entry(sym).or_default().insert(item.next());
            }
        }

        targets
    }

    /// The items which cannot be derived by a closure.
    pub fn kernel(&self) -> ItemSet {
        self.iter()
            .copied()
            .filter(|item| item.position > 0 || item.rule == START_RULE)
            .collect()
    }

    /// The terminals standing right after the dot.
    pub fn first(&self, grammar: &Grammar) -> BTreeSet<TerminalId> {
        self.iter()
            .filter_map(|item| item.symbol(grammar))
            .filter_map(|sym| sym.as_terminal())
            .collect()
    }

    pub fn display<'g>(&'g self, grammar: &'g Grammar, id: usize) -> DisplayItemSet<'g> {
        DisplayItemSet {
            id,
            set: self,
            grammar,
        }
    }
}

pub struct DisplayItemSet<'g> {
    id: usize,
    set: &'g ItemSet,
    grammar: &'g Grammar,
}

impl std::fmt::Display for DisplayItemSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}{{", self.id)?;
        write!(
            f,
            "{}",
            self.set.iter().map(|item| item.display(self.grammar)).join(", ")
        )?;
        write!(f, "}}")
    }
}
