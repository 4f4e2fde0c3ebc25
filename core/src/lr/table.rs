use itertools::Itertools as _;
use prettytable::Table as PtTable;
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Grammar, ItemSet, NextUse, RuleId, Symbol, TerminalId, EOS_ID, START_RULE};

use super::{Action, Automaton, StateId};

pub mod traits {
    use crate::{lr::Action, Symbol, TerminalId};

    pub trait LrTable {
        /// The state the parsing starts from.
        fn initial_state(&self) -> usize;

        /// Every action registered for the terminal, empty if none.
        fn actions(&self, state: usize, terminal: TerminalId) -> &[Action];

        fn goto(&self, state: usize, symbol: Symbol) -> Option<usize>;

        /// The number of rows in the table.
        fn len(&self) -> usize;
    }
}

/// The actions of a (state, terminal) pair.
///
/// More than one action is a conflict.
pub type Cell = SmallVec<[Action; 2]>;

/// A row of the action table, one cell per terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Row(pub(super) Vec<Cell>);

impl Row {
    fn new(terminals: usize) -> Self {
        Self(vec![Cell::new(); terminals])
    }

    fn push(&mut self, terminal: TerminalId, action: Action) {
        self.0[terminal].push(action)
    }

    fn get(&self, terminal: TerminalId) -> &[Action] {
        self.0.get(terminal).map(|cell| cell.as_slice()).unwrap_or_default()
    }

    /// Reduces (and accept) come first, in item order, then shifts.
    fn from_state(
        grammar: &Grammar,
        set: &ItemSet,
        goto: &BTreeMap<Symbol, StateId>,
        lookaheads: &mut Lookaheads<'_>,
    ) -> Self {
        let mut row = Self::new(grammar.terminals_len());

        for item in set.completed(grammar) {
            if item.rule == START_RULE {
                row.push(EOS_ID, Action::Accept);
            } else {
                for &terminal in lookaheads.get(grammar, item.rule) {
                    row.push(terminal, Action::Reduce(item.rule));
                }
            }
        }

        for (sym, &to) in goto {
            if let Symbol::Terminal(terminal) = sym {
                row.push(*terminal, Action::Shift(to));
            }
        }

        row
    }
}

/// The reduction lookaheads, computed once per rule.
struct Lookaheads<'a> {
    next_use: &'a NextUse,
    cache: HashMap<RuleId, BTreeSet<TerminalId>>,
}

impl<'a> Lookaheads<'a> {
    fn new(next_use: &'a NextUse) -> Self {
        Self {
            next_use,
            cache: HashMap::default(),
        }
    }

    fn get(&mut self, grammar: &Grammar, rule: RuleId) -> &BTreeSet<TerminalId> {
        let next_use = self.next_use;
        self.cache.entry(rule).or_insert_with(|| {
            next_use.following_tokens(grammar, grammar.rule(rule).completed())
        })
    }
}

/// The ACTION/GOTO tables of a grammar.
#[derive(Clone, PartialEq)]
pub struct LrTable<'g> {
    pub(super) grammar: &'g Grammar,
    pub(super) automaton: Automaton,
    pub(super) next_use: NextUse,
    /// The action rows, indexed by state then by terminal.
    pub(super) rows: Vec<Row>,
}

impl std::fmt::Debug for LrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::fmt::Display for LrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols = self.grammar.symbols();
        // The augmented start symbol never appears in a transition.
        let non_terminals = || symbols.iter_non_terminals().skip(1);

        let mut table = PtTable::new();

        table.add_row(
            ["#"]
                .into_iter()
                .chain(
                    symbols
                        .iter_terminals()
                        .chain(non_terminals())
                        .map(|sym| symbols.name(sym)),
                )
                .collect(),
        );

        for (id, row) in self.rows.iter().enumerate() {
            table.add_row(
                [id.to_string()]
                    .into_iter()
                    .chain(row.0.iter().map(|cell| cell.iter().join(",")))
                    .chain(non_terminals().map(|sym| {
                        self.automaton
                            .goto(id, sym)
                            .map(|to| to.to_string())
                            .unwrap_or_default()
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}

impl traits::LrTable for LrTable<'_> {
    fn initial_state(&self) -> usize {
        self.automaton.initial_state()
    }

    fn actions(&self, state: usize, terminal: TerminalId) -> &[Action] {
        LrTable::action(self, state, terminal)
    }

    fn goto(&self, state: usize, symbol: Symbol) -> Option<usize> {
        self.automaton.goto(state, symbol)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<'g> LrTable<'g> {
    /// Build the LR(0) automaton of a grammar, and derive its action table.
    pub fn build(grammar: &'g Grammar) -> Self {
        let automaton = Automaton::build(grammar);
        let next_use = NextUse::new(grammar);

        let rows = {
            let mut lookaheads = Lookaheads::new(&next_use);
            automaton
                .iter()
                .map(|(_, set, goto)| Row::from_state(grammar, set, goto, &mut lookaheads))
                .collect()
        };

        let table = Self {
            grammar,
            automaton,
            next_use,
            rows,
        };

        log::debug!(
            "action table built: {} states, {} conflict(s)",
            table.len(),
            table.count_conflicts()
        );

        table
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The number of states.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn initial_state(&self) -> StateId {
        self.automaton.initial_state()
    }

    /// The actions of the pair, empty if the parse cannot go on.
    pub fn action(&self, state: StateId, terminal: TerminalId) -> &[Action] {
        self.rows
            .get(state)
            .map(|row| row.get(terminal))
            .unwrap_or_default()
    }

    /// Same as [LrTable::action], with the terminal's name.
    pub fn action_by_name(&self, state: StateId, terminal: &str) -> &[Action] {
        self.grammar
            .terminal(terminal)
            .map(|terminal| self.action(state, terminal))
            .unwrap_or_default()
    }

    pub fn goto(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.automaton.goto(state, symbol)
    }

    /// Returns all terminals which may follow the reduction of the rule.
    pub fn following_tokens(&self, rule: RuleId) -> BTreeSet<TerminalId> {
        self.next_use
            .following_tokens(self.grammar, self.grammar.rule(rule).completed())
    }

    /// Iterate over every non-empty cell.
    pub fn iter_cells(&self) -> impl Iterator<Item = (StateId, TerminalId, &[Action])> {
        self.rows.iter().enumerate().flat_map(|(state, row)| {
            row.0
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(terminal, cell)| (state, terminal, cell.as_slice()))
        })
    }

    /// Pretty-print all the states.
    pub fn dump_states(&self) -> String {
        self.automaton
            .states()
            .iter()
            .enumerate()
            .map(|(id, set)| set.display(self.grammar, id))
            .join("\n\n")
    }
}
