//! `sdr rules ...` – edit the stored rule list.
//!
//! Each invocation is one edit session: load, change, commit.

use anyhow::{bail, Context, Result};
use sdr_core::rules::{Rule, RuleKind};
use sdr_core::settings::{KeyValueStore, RuleEditSession, RuleSet};

use crate::cli::{Direction, RulesCommand};

pub async fn run_rules(store: &dyn KeyValueStore, command: RulesCommand) -> Result<()> {
    let current = RuleSet::load(store).await?;
    let mut session = RuleEditSession::begin(&current);
    match command {
        RulesCommand::List => {
            print_rules(&current);
            return Ok(());
        }
        RulesCommand::Add {
            kind,
            text,
            replace_with,
        } => {
            let rule = build_rule(kind, text, replace_with)?;
            println!("Added {rule}");
            session.push(rule);
        }
        RulesCommand::Remove { position } => {
            let index = to_index(position)?;
            let removed = session
                .remove(index)
                .with_context(|| format!("no rule at position {position}"))?;
            println!("Removed {removed}");
        }
        RulesCommand::Move {
            position,
            direction,
        } => {
            let index = to_index(position)?;
            let (moved, word) = match direction {
                Direction::Up => (session.move_up(index), "up"),
                Direction::Down => (session.move_down(index), "down"),
            };
            if !moved {
                bail!("cannot move rule {position} {word}");
            }
        }
        RulesCommand::Enable => session.set_enabled(true),
        RulesCommand::Disable => session.set_enabled(false),
        RulesCommand::Clear => session.clear(),
    }

    let saved = session.commit(store).await?;
    print_rules(&saved);
    Ok(())
}

fn build_rule(
    kind: RuleKind,
    text: Option<String>,
    replace_with: Option<String>,
) -> Result<Rule> {
    if kind.takes_text() && text.as_deref().map_or(true, str::is_empty) {
        bail!("{kind} needs a text argument");
    }
    if !kind.takes_text() && text.is_some() {
        bail!("{kind} takes no text argument");
    }
    match (kind, replace_with) {
        (RuleKind::Replace, replace_with) => Ok(Rule::Replace {
            find: text,
            replace_with: Some(replace_with.unwrap_or_default()),
        }),
        (_, Some(_)) => bail!("--with only applies to replace"),
        (kind, None) => Ok(Rule::new(kind, text)),
    }
}

fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .context("rule positions start at 1")
}

fn print_rules(set: &RuleSet) {
    println!("Renaming: {}", if set.enabled { "on" } else { "off" });
    if set.rules.is_empty() {
        println!("No rules.");
        return;
    }
    for (i, rule) in set.rules.iter().enumerate() {
        println!("{:>3}. {}", i + 1, rule);
    }
}
