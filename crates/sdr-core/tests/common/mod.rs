#![allow(dead_code)]

pub mod fake_host;

use sdr_core::rules::Rule;
use sdr_core::settings::{MemoryStore, RuleSet};
use std::sync::Arc;

/// A memory store holding `rules` under the given enabled flag.
pub async fn store_with(enabled: bool, rules: Vec<Rule>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    RuleSet::new(enabled, rules)
        .save(store.as_ref())
        .await
        .unwrap();
    store
}

/// `replace("IMG_", "Photo_")` then `addEnd("_edited")`.
pub fn photo_rules() -> Vec<Rule> {
    vec![
        Rule::Replace {
            find: Some("IMG_".to_string()),
            replace_with: Some("Photo_".to_string()),
        },
        Rule::AddEnd {
            text: Some("_edited".to_string()),
        },
    ]
}
