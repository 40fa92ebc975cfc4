//! Geomark Application
//!
//! A line-oriented shell that drives the editing core against a logging
//! render adapter, for working on layouts without a map UI.

mod console;
mod shell;

pub use console::ConsoleAdapter;
pub use shell::{Shell, ShellCommand};
