//! `sdr apply <filename>` and `sdr preview <filename>`.

use anyhow::{Context, Result};
use sdr_core::intercept::bare_filename;
use sdr_core::rules::apply_rules;
use sdr_core::settings::{KeyValueStore, RuleSet};

pub async fn run_apply(store: &dyn KeyValueStore, filename: &str) -> Result<()> {
    println!("{}", applied(store, filename).await?);
    Ok(())
}

pub async fn run_preview(store: &dyn KeyValueStore, filename: &str) -> Result<()> {
    println!("{}", preview_line(store, filename).await?);
    Ok(())
}

/// The renamed bare filename, ignoring the enabled flag.
pub(crate) async fn applied(store: &dyn KeyValueStore, filename: &str) -> Result<String> {
    let name = bare_filename(filename).context("no filename in argument")?;
    let set = RuleSet::load(store).await?;
    Ok(apply_rules(name, &set.rules))
}

/// Describes the rename only when the rules would actually fire.
pub(crate) async fn preview_line(store: &dyn KeyValueStore, filename: &str) -> Result<String> {
    let name = bare_filename(filename).context("no filename in argument")?;
    let set = RuleSet::load(store).await?;
    if !set.is_active() {
        return Ok(format!("Renaming is off; {name} is kept."));
    }
    let renamed = apply_rules(name, &set.rules);
    Ok(if renamed == name {
        format!("{name} (unchanged)")
    } else {
        format!("{name} -> {renamed}")
    })
}
