use crate::ItemSetId;

mod action;
mod automaton;
mod conflict;
mod table;

pub use action::*;
pub use automaton::*;
pub use conflict::*;
pub use table::*;

pub type StateId = ItemSetId;
