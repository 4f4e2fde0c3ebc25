pub mod error;
pub mod grammar;
pub mod item;
pub mod lookahead;
pub mod lr;
pub mod symbol;

pub use error::{ErrorKind, GlrError};
pub use grammar::*;
pub use item::*;
pub use lookahead::*;
pub use symbol::*;

pub use lr::{Action, ActionKind, Automaton, Conflict, ConflictKind, LrTable};

pub mod traits {
    pub use crate::lr::traits::LrTable;
}

pub type GlrResult<T> = Result<T, GlrError>;

#[cfg(test)]
pub mod fixtures {
    use crate::{rule, Grammar, RuleDef};

    pub const SUM_RULES: &[RuleDef<'static>] = &[
        rule!("S" => "S" "+" "T"),
        rule!("S" => "T"),
        rule!("T" => "id"),
    ];

    pub const EXPR_RULES: &[RuleDef<'static>] = &[
        rule!("E" => "E" "+" "T"),
        rule!("E" => "T"),
        rule!("T" => "T" "*" "F"),
        rule!("T" => "F"),
        rule!("F" => "(" "E" ")"),
        rule!("F" => "id"),
    ];

    pub const AMBIGUOUS_RULES: &[RuleDef<'static>] = &[
        rule!("E" => "E" "+" "E"),
        rule!("E" => "id"),
    ];

    pub const REDUCE_REDUCE_RULES: &[RuleDef<'static>] = &[
        rule!("S" => "A" "x"),
        rule!("S" => "B" "x"),
        rule!("A" => "a"),
        rule!("B" => "a"),
    ];

    /// A and B end each other.
    pub const CYCLIC_RULES: &[RuleDef<'static>] = &[
        rule!("A" => "a" "B"),
        rule!("A" => "a"),
        rule!("B" => "b" "A"),
        rule!("B" => "b"),
    ];

    /// Right-recursive tail with an empty rule, E' is a user symbol.
    pub const TAIL_RULES: &[RuleDef<'static>] = &[
        rule!("E" => "T" "E'"),
        rule!("E'" => "+" "T" "E'"),
        rule!("E'" =>),
        rule!("T" => "id"),
    ];

    pub const UNREACHABLE_RULES: &[RuleDef<'static>] = &[
        rule!("S" => "a"),
        rule!("U" => "x"),
    ];

    pub fn sum_grammar() -> Grammar {
        Grammar::new("S", ["+", "id"], SUM_RULES).expect("cannot load grammar")
    }

    pub fn expr_grammar() -> Grammar {
        Grammar::new("E", ["+", "*", "(", ")", "id"], EXPR_RULES).expect("cannot load grammar")
    }

    pub fn ambiguous_grammar() -> Grammar {
        Grammar::new("E", ["+", "id"], AMBIGUOUS_RULES).expect("cannot load grammar")
    }

    pub fn reduce_reduce_grammar() -> Grammar {
        Grammar::new("S", ["a", "x"], REDUCE_REDUCE_RULES).expect("cannot load grammar")
    }

    pub fn cyclic_grammar() -> Grammar {
        Grammar::new("A", ["a", "b"], CYCLIC_RULES).expect("cannot load grammar")
    }

    pub fn tail_grammar() -> Grammar {
        Grammar::new("E", ["+", "id"], TAIL_RULES).expect("cannot load grammar")
    }

    pub fn unreachable_grammar() -> Grammar {
        Grammar::new("S", ["a", "x"], UNREACHABLE_RULES).expect("cannot load grammar")
    }

    pub fn all() -> Vec<Grammar> {
        vec![
            sum_grammar(),
            expr_grammar(),
            ambiguous_grammar(),
            reduce_reduce_grammar(),
            cyclic_grammar(),
            tail_grammar(),
            unreachable_grammar(),
        ]
    }

    #[test]
    fn test_grammars() {
        for g in all() {
            println!("{}", g);
        }
    }
}
