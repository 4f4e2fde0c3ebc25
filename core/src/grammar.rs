use itertools::Itertools;

use crate::{ErrorKind, GlrError, GlrResult, Item, NonTerminalId, Symbol, SymbolMap, TerminalId};

/// The rule's identifier in the grammar.
pub type RuleId = usize;

/// The augmented start rule, its completion triggers the acceptance.
pub const START_RULE: RuleId = 0;

/// Defines a grammar rule
///
/// X := A1..An
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef<'a> {
    pub lhs: &'a str,
    pub rhs: &'a [&'a str],
}

impl<'a> RuleDef<'a> {
    pub const fn new(lhs: &'a str, rhs: &'a [&'a str]) -> Self {
        Self { lhs, rhs }
    }
}

/// Declares a [RuleDef].
///
/// # Example
/// ```
/// use glr_tables_core::{rule, RuleDef};
///
/// const SUM: RuleDef<'static> = rule!("S" => "S" "+" "T");
/// assert_eq!(SUM.rhs, &["S", "+", "T"]);
/// ```
#[macro_export]
macro_rules! rule {
    ($lhs:literal => $($rhs:literal)*) => {
        $crate::RuleDef::new($lhs, &[$($rhs),*])
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A grammar rule
///
/// # Example
/// A -> w
pub struct Rule {
    pub id: RuleId,
    pub lhs: NonTerminalId,
    pub rhs: Vec<Symbol>,
}

impl Rule {
    /// Check the rules contains a certain symbol in its RHS.
    #[inline(always)]
    pub fn contains(&self, sym: &Symbol) -> bool {
        self.rhs.contains(sym)
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    /// The completed item of the rule (A -> w •)
    pub fn completed(&self) -> Item {
        Item::new(self.id, self.rhs.len())
    }
}

/// A context-free grammar.
///
/// Rule #0 is the augmented start rule `S' -> S`, generated
/// from the start symbol.
///
/// # Example
///
/// ```
/// use glr_tables_core::{rule, Grammar};
///
/// let grammar = Grammar::new(
///     "S",
///     ["+", "id"],
///     &[
///         rule!("S" => "S" "+" "T"),
///         rule!("S" => "T"),
///         rule!("T" => "id"),
///     ],
/// ).unwrap();
///
/// assert_eq!(grammar.rules().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    symbols: SymbolMap,
    rules: Vec<Rule>,
    start: Symbol,
}

impl Grammar {
    pub fn new<I, S>(start: &str, terminals: I, rules: &[RuleDef<'_>]) -> GlrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if rules.is_empty() {
            return Err(GlrError::new(ErrorKind::EmptyGrammar));
        }

        let mut symbols = SymbolMap::default();

        for term in terminals {
            symbols.intern_terminal(term.as_ref());
        }

        let augmented = symbols.intern_non_terminal(&augmented_name(start, &symbols, rules));

        for def in rules {
            if matches!(symbols.get(def.lhs), Some(Symbol::Terminal(_))) {
                return Err(GlrError::new(ErrorKind::DuplicatedSymbol(def.lhs.to_string())));
            }
            symbols.intern_non_terminal(def.lhs);
        }

        let start = match symbols.get(start) {
            Some(sym @ Symbol::NonTerminal(_)) => sym,
            _ => return Err(GlrError::new(ErrorKind::unknown_symbol(start))),
        };

        let mut compiled = Vec::with_capacity(rules.len() + 1);
        compiled.push(Rule {
            id: START_RULE,
            lhs: augmented,
            rhs: vec![start],
        });

        for (id, def) in rules.iter().enumerate() {
            let lhs = match symbols.get(def.lhs) {
                Some(Symbol::NonTerminal(lhs)) => lhs,
                _ => return Err(GlrError::new(ErrorKind::unknown_symbol(def.lhs))),
            };

            let rhs = def
                .rhs
                .iter()
                .map(|name| {
                    symbols
                        .get(name)
                        .ok_or_else(|| GlrError::new(ErrorKind::unknown_symbol(name)))
                })
                .collect::<GlrResult<Vec<_>>>()?;

            compiled.push(Rule { id: id + 1, lhs, rhs });
        }

        log::debug!(
            "grammar loaded: {} rules, {} terminals, {} non-terminals",
            compiled.len(),
            symbols.terminals_len(),
            symbols.non_terminals_len()
        );

        Ok(Self {
            symbols,
            rules: compiled,
            start,
        })
    }

    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    /// The user start symbol (the rhs of the augmented rule).
    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn eos(&self) -> Symbol {
        Symbol::eos()
    }

    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name)
    }

    pub fn try_symbol(&self, name: &str) -> GlrResult<Symbol> {
        self.symbol(name)
            .ok_or_else(|| GlrError::new(ErrorKind::unknown_symbol(name)))
    }

    pub fn terminal(&self, name: &str) -> Option<TerminalId> {
        self.symbol(name).and_then(|sym| sym.as_terminal())
    }

    pub fn name(&self, symbol: Symbol) -> &str {
        self.symbols.name(symbol)
    }

    pub fn rule_name(&self, id: RuleId) -> &str {
        self.symbols.name(Symbol::NonTerminal(self.rules[id].lhs))
    }

    /// Iterate over all rules of the grammar
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// # Panics
    /// Panics if the rule does not exist.
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id]
    }

    pub fn try_rule(&self, id: RuleId) -> GlrResult<&Rule> {
        self.rules
            .get(id)
            .ok_or_else(|| GlrError::new(ErrorKind::UnknownRule(id)))
    }

    /// Iterate the rules behind a specific non-terminal symbol.
    pub fn rules_by_lhs(&self, lhs: NonTerminalId) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| rule.lhs == lhs)
    }

    pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter_terminals()
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter_non_terminals()
    }

    pub fn terminals_len(&self) -> usize {
        self.symbols.terminals_len()
    }

    pub fn non_terminals_len(&self) -> usize {
        self.symbols.non_terminals_len()
    }

    /// The item universe: every rule at every dot position.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.rules
            .iter()
            .flat_map(|rule| (0..=rule.len()).map(move |pos| Item::new(rule.id, pos)))
    }

    /// Format a rule as `(id) A -> w`.
    pub fn display_rule(&self, id: RuleId) -> String {
        let rule = self.rule(id);
        format!(
            "({}) {} -> {}",
            rule.id,
            self.rule_name(id),
            rule.rhs.iter().map(|sym| self.name(*sym)).join(" ")
        )
    }
}

/// Prime the start symbol until the name is used nowhere in the grammar.
fn augmented_name(start: &str, symbols: &SymbolMap, rules: &[RuleDef<'_>]) -> String {
    let is_used = |name: &str| {
        symbols.get(name).is_some()
            || rules
                .iter()
                .any(|def| def.lhs == name || def.rhs.contains(&name))
    };

    let mut name = format!("{start}'");
    while is_used(&name) {
        name.push('\'');
    }

    name
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self.rules.iter().map(|rule| {
            format!(
                "{} = {}",
                self.rule_name(rule.id),
                rule.rhs.iter().map(|sym| self.name(*sym)).join(" ")
            )
        });

        write!(f, "{}", lines.format("\n"))
    }
}
