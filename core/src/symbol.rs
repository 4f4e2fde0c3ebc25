/// Index of a terminal in the grammar's terminal table.
pub type TerminalId = usize;

/// Index of a non-terminal in the grammar's non-terminal table.
pub type NonTerminalId = usize;

/// The end-of-input marker, always interned as terminal #0.
pub const EOS: &str = "$";
pub const EOS_ID: TerminalId = 0;

/// Symbol definition
///
/// Symbols are interned by the grammar, two symbols are equal
/// if and only if they share the same name.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(TerminalId),
    NonTerminal(NonTerminalId),
}

impl Symbol {
    pub const fn eos() -> Self {
        Self::Terminal(EOS_ID)
    }

    pub fn is_eos(&self) -> bool {
        matches!(self, Self::Terminal(EOS_ID))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Self::NonTerminal(_))
    }

    pub fn as_terminal(&self) -> Option<TerminalId> {
        match self {
            Self::Terminal(id) => Some(*id),
            Self::NonTerminal(_) => None,
        }
    }

    pub fn as_non_terminal(&self) -> Option<NonTerminalId> {
        match self {
            Self::Terminal(_) => None,
            Self::NonTerminal(id) => Some(*id),
        }
    }
}

/// Interned symbol names.
///
/// Terminals and non-terminals live in two separate tables so that
/// terminal ids can index the columns of the action table directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMap {
    terminals: Vec<String>,
    non_terminals: Vec<String>,
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self {
            terminals: vec![EOS.to_string()],
            non_terminals: vec![],
        }
    }
}

impl SymbolMap {
    /// Intern a terminal, returns the existing id if already known.
    pub fn intern_terminal(&mut self, name: &str) -> TerminalId {
        match self.terminals.iter().position(|sym| sym == name) {
            Some(id) => id,
            None => {
                self.terminals.push(name.to_string());
                self.terminals.len() - 1
            }
        }
    }

    /// Intern a non-terminal, returns the existing id if already known.
    pub fn intern_non_terminal(&mut self, name: &str) -> NonTerminalId {
        match self.non_terminals.iter().position(|sym| sym == name) {
            Some(id) => id,
            None => {
                self.non_terminals.push(name.to_string());
                self.non_terminals.len() - 1
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.terminals
            .iter()
            .position(|sym| sym == name)
            .map(Symbol::Terminal)
            .or_else(|| {
                self.non_terminals
                    .iter()
                    .position(|sym| sym == name)
                    .map(Symbol::NonTerminal)
            })
    }

    pub fn name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(id) => &self.terminals[id],
            Symbol::NonTerminal(id) => &self.non_terminals[id],
        }
    }

    pub fn iter_terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.terminals.len()).map(Symbol::Terminal)
    }

    pub fn iter_non_terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.non_terminals.len()).map(Symbol::NonTerminal)
    }

    /// Iterate over all symbols, terminals first.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter_terminals().chain(self.iter_non_terminals())
    }

    pub fn terminals_len(&self) -> usize {
        self.terminals.len()
    }

    pub fn non_terminals_len(&self) -> usize {
        self.non_terminals.len()
    }
}
