use std::collections::BTreeSet;

use glr_tables::{
    rule, Action, ActionKind, ConflictKind, ErrorKind, Grammar, Item, ItemSet, LrTable, RuleDef,
    Symbol, EOS_ID,
};

const SUM: &[RuleDef<'static>] = &[
    rule!("S" => "S" "+" "T"),
    rule!("S" => "T"),
    rule!("T" => "id"),
];

const ARITH: &[RuleDef<'static>] = &[
    rule!("E" => "E" "+" "E"),
    rule!("E" => "E" "*" "E"),
    rule!("E" => "(" "E" ")"),
    rule!("E" => "id"),
];

const LIST: &[RuleDef<'static>] = &[
    rule!("L" => "L" "," "I"),
    rule!("L" => "I"),
    rule!("I" => "id"),
    rule!("I" => "[" "L" "]"),
    rule!("Dead" => "id" "id"),
];

const TAIL: &[RuleDef<'static>] = &[
    rule!("E" => "T" "E'"),
    rule!("E'" => "+" "T" "E'"),
    rule!("E'" =>),
    rule!("T" => "id"),
];

/// Walks every action of the table at once, as a GLR parser would,
/// and tells whether the input is recognized.
fn recognize<T: glr_tables::traits::LrTable>(table: &T, grammar: &Grammar, input: &[&str]) -> bool {
    let mut tokens: Vec<usize> = input
        .iter()
        .map(|name| grammar.terminal(name).expect("unknown terminal"))
        .collect();
    tokens.push(EOS_ID);

    let mut stacks = vec![vec![table.initial_state()]];

    for &token in &tokens {
        let mut shifted = BTreeSet::<Vec<usize>>::default();
        let mut work = std::mem::take(&mut stacks);

        while let Some(stack) = work.pop() {
            let state = *stack.last().unwrap();

            for action in table.actions(state, token) {
                match *action {
                    Action::Accept => return true,
                    Action::Shift(to) => {
                        let mut stack = stack.clone();
                        stack.push(to);
                        shifted.insert(stack);
                    }
                    Action::Reduce(rule) => {
                        let rule = grammar.rule(rule);
                        let mut stack = stack.clone();
                        stack.truncate(stack.len() - rule.len());
                        let top = *stack.last().unwrap();

                        if let Some(to) = table.goto(top, Symbol::NonTerminal(rule.lhs)) {
                            stack.push(to);
                            work.push(stack);
                        }
                    }
                }
            }
        }

        stacks = shifted.into_iter().collect();
    }

    false
}

#[test]
fn test_sum_grammar() {
    let g = Grammar::new("S", ["+", "id"], SUM).unwrap();
    let table = LrTable::build(&g);

    assert_eq!(table.count_conflicts(), 0);
    assert!(table.unused_rules().is_empty());

    // Initial state: S' -> • S, S -> • S + T, S -> • T, T -> • id
    let initial = table.automaton().state(table.initial_state()).unwrap();
    for rule in 0..4 {
        assert!(initial.contains(&Item::new(rule, 0)));
    }

    let after_id = table
        .goto(table.initial_state(), g.symbol("id").unwrap())
        .unwrap();
    assert!(table
        .automaton()
        .state(after_id)
        .unwrap()
        .contains(&Item::new(3, 1)));
    assert_eq!(table.action_by_name(after_id, "+"), &[Action::Reduce(3)]);
    assert_eq!(table.action_by_name(after_id, "$"), &[Action::Reduce(3)]);

    assert!(recognize(&table, &g, &["id"]));
    assert!(recognize(&table, &g, &["id", "+", "id", "+", "id"]));
    assert!(!recognize(&table, &g, &["id", "+"]));
    assert!(!recognize(&table, &g, &["+", "id"]));
    assert!(!recognize(&table, &g, &[]));
}

#[test]
fn test_ambiguous_grammar_keeps_every_action() {
    let g = Grammar::new("E", ["+", "*", "(", ")", "id"], ARITH).unwrap();
    let mut table = LrTable::build(&g);

    let conflicts = table.conflicts();
    assert_eq!(table.count_conflicts(), conflicts.len());
    assert!(conflicts.iter().all(|c| c.kind == ConflictKind::ShiftReduce));

    // The conflicting table still recognizes every valid sentence.
    assert!(recognize(&table, &g, &["id", "+", "id", "*", "id"]));
    assert!(recognize(&table, &g, &["(", "id", "+", "id", ")", "*", "id"]));
    assert!(!recognize(&table, &g, &["(", "id", "+", ")"]));

    assert_eq!(table.resolve(ActionKind::Shift), conflicts.len());
    assert_eq!(table.count_conflicts(), 0);

    for c in conflicts {
        assert!(matches!(table.action(c.state, c.terminal), [Action::Shift(_)]));
    }

    // Favouring shifts makes the operators right-associative, still a valid parse.
    assert!(recognize(&table, &g, &["id", "+", "id", "*", "id"]));
}

#[test]
fn test_unused_rules() {
    let g = Grammar::new("L", [",", "[", "]", "id"], LIST).unwrap();
    let table = LrTable::build(&g);

    assert_eq!(
        table.unused_rules(),
        BTreeSet::from_iter(["Dead".to_string()])
    );

    let dead = g.rules().len() - 1;
    assert_eq!(table.unused_rule_ids(), BTreeSet::from_iter([dead]));

    assert!(recognize(&table, &g, &["[", "id", ",", "id", "]", ",", "id"]));
    assert!(!recognize(&table, &g, &["id", "id"]));
}

#[test]
fn test_states_and_goto() {
    let g = Grammar::new("L", [",", "[", "]", "id"], LIST).unwrap();
    let table = LrTable::build(&g);
    let automaton = table.automaton();

    let states: BTreeSet<&ItemSet> = automaton.states().iter().collect();
    assert_eq!(states.len(), automaton.len());

    for (id, set) in automaton.states().iter().enumerate() {
        assert_eq!(automaton.index_of(&g, set), Some(id));

        for (sym, kernel) in set.transition(&g) {
            let to = automaton.goto(id, sym).unwrap();
            assert_eq!(automaton.state(to), Some(&kernel.closure(&g)));
        }
    }
}

#[test]
fn test_tail_grammar_with_empty_rule() {
    let g = Grammar::new("E", ["+", "id"], TAIL).unwrap();
    let table = LrTable::build(&g);

    assert_eq!(g.rule_name(0), "E''");
    assert_eq!(table.count_conflicts(), 0);
    assert!(table.unused_rules().is_empty());

    // E' -> • is reduced on the end of stream only.
    let reduces: BTreeSet<usize> = table
        .iter_cells()
        .filter(|(_, _, actions)| actions.contains(&Action::Reduce(3)))
        .map(|(_, terminal, _)| terminal)
        .collect();
    assert_eq!(reduces, BTreeSet::from_iter([EOS_ID]));

    assert!(recognize(&table, &g, &["id"]));
    assert!(recognize(&table, &g, &["id", "+", "id"]));
    assert!(recognize(&table, &g, &["id", "+", "id", "+", "id"]));
    assert!(!recognize(&table, &g, &["id", "+"]));
    assert!(!recognize(&table, &g, &["id", "id"]));
}

#[test]
fn test_unknown_symbol() {
    let err = Grammar::new("S", ["+"], SUM).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownSymbol("id".to_string()));
}

#[test]
fn test_table_rendering() {
    let g = Grammar::new("S", ["+", "id"], SUM).unwrap();
    let table = LrTable::build(&g);

    let rendered = table.to_string();
    assert!(rendered.contains("acc"));
    assert!(rendered.contains("r3"));
    assert!(table.dump_states().contains("[(0) S' -> • S]"));
}
