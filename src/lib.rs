//! Builds the LR(0) automaton of a context-free grammar, and derives
//! the ACTION/GOTO tables driving a (generalized) shift/reduce parser.
//!
//! # Example
//!
//! ```
//! use glr_tables::{rule, Action, Grammar, LrTable};
//!
//! let grammar = Grammar::new(
//!     "S",
//!     ["+", "id"],
//!     &[
//!         rule!("S" => "S" "+" "T"),
//!         rule!("S" => "T"),
//!         rule!("T" => "id"),
//!     ],
//! )
//! .unwrap();
//!
//! let table = LrTable::build(&grammar);
//! assert_eq!(table.count_conflicts(), 0);
//!
//! let id = grammar.symbol("id").unwrap();
//! let state = table.goto(table.initial_state(), id).unwrap();
//! assert_eq!(table.action_by_name(state, "+"), &[Action::Reduce(3)]);
//! ```
pub use glr_tables_core::*;
