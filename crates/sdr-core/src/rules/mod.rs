//! Rename rule engine.
//!
//! A rule list is an ordered pipeline of small text transformations applied
//! to a bare filename (no directory). Each rule sees the output of the
//! previous one; the engine never fails and returns the input untouched
//! when there is nothing to do.

mod apply;
mod rule;
mod text;

pub use apply::{apply_rules, apply_rules_on};
pub use rule::{Rule, RuleKind, UnknownRuleKind};
