//! `sdr header <value>` – show a Content-Disposition value after renaming.

use anyhow::{bail, Result};
use sdr_core::intercept::{
    bare_filename, parse_content_disposition_filename, rewrite_content_disposition_filename,
};
use sdr_core::rules::apply_rules;
use sdr_core::settings::{KeyValueStore, RuleSet};

pub async fn run_header(store: &dyn KeyValueStore, value: &str) -> Result<()> {
    println!("{}", rewritten_header(store, value).await?);
    Ok(())
}

/// The header value with its filename run through the stored rules.
pub(crate) async fn rewritten_header(store: &dyn KeyValueStore, value: &str) -> Result<String> {
    let Some(original) = parse_content_disposition_filename(value) else {
        bail!("no filename parameter in header value");
    };
    let set = RuleSet::load(store).await?;
    let name = bare_filename(&original).unwrap_or(original.as_str());
    let renamed = apply_rules(name, &set.rules);
    Ok(rewrite_content_disposition_filename(value, &renamed).unwrap_or_else(|| value.to_string()))
}
