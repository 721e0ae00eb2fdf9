// src/ui/mod.rs
pub mod form;
pub mod terminal;

pub use form::{FormView, TradeForm};
pub use terminal::TerminalForm;
