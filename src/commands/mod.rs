//! Application operations wired to the GUI.

pub mod search;

pub use search::SearchCommand;
