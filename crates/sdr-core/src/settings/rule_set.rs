//! The user's rule set as stored under `renameRulesEnabled` / `renameRules`.

use serde_json::Value;

use super::store::{KeyValueStore, StoreError};
use crate::rules::Rule;

/// Store key for the on/off switch (boolean, default false).
pub const RULES_ENABLED_KEY: &str = "renameRulesEnabled";
/// Store key for the ordered rule array (default empty).
pub const RULES_KEY: &str = "renameRules";

/// Ordered rules plus the enabled flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub enabled: bool,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(enabled: bool, rules: Vec<Rule>) -> Self {
        Self { enabled, rules }
    }

    /// Rules only run when switched on and non-empty.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.rules.is_empty()
    }

    /// Reads both keys in one go. Absent keys give the defaults; malformed
    /// rule entries are dropped.
    pub async fn load(store: &dyn KeyValueStore) -> Result<RuleSet, StoreError> {
        let mut values = store
            .get_many(&[RULES_ENABLED_KEY, RULES_KEY])
            .await?
            .into_iter();
        let enabled = values
            .next()
            .flatten()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let rules = match values.next().flatten() {
            Some(Value::Array(items)) => decode_rules(items),
            Some(other) => {
                tracing::warn!("ignoring {RULES_KEY}: expected an array, got {other}");
                Vec::new()
            }
            None => Vec::new(),
        };
        Ok(RuleSet { enabled, rules })
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let rules = serde_json::to_value(&self.rules).map_err(|e| StoreError::Backend(e.to_string()))?;
        store
            .set_many(vec![
                (RULES_ENABLED_KEY.to_string(), Value::Bool(self.enabled)),
                (RULES_KEY.to_string(), rules),
            ])
            .await?;
        tracing::info!(enabled = self.enabled, rules = self.rules.len(), "saved rename rules");
        Ok(())
    }
}

/// Decodes each entry on its own so one bad entry does not lose the rest.
/// Entries without a non-empty `type` are skipped entirely.
fn decode_rules(items: Vec<Value>) -> Vec<Rule> {
    items
        .into_iter()
        .filter(|item| {
            item.get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| !t.is_empty())
        })
        .filter_map(|item| match serde_json::from_value::<Rule>(item) {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::debug!("skipping malformed rule: {e}");
                None
            }
        })
        .collect()
}
