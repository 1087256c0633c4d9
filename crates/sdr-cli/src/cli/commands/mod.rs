//! CLI command handlers, one file per command.

mod apply;
mod header;
mod rules;
mod strategy;

pub use apply::{run_apply, run_preview};
pub use header::run_header;

#[cfg(test)]
pub(crate) use apply::{applied, preview_line};
#[cfg(test)]
pub(crate) use header::rewritten_header;
pub use rules::run_rules;
pub use strategy::run_strategy;
