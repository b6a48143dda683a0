//! Desktop form: query + price inputs, actions, status line, results table.

pub mod app;

pub use app::{run, SearchApp};
