//! Cancellable rule editing.
//!
//! A session works on its own copy of the rule set; nothing reaches the store
//! until [`RuleEditSession::commit`]. Dropping the session discards the edits.

use super::rule_set::RuleSet;
use super::store::{KeyValueStore, StoreError};
use crate::rules::{Rule, RuleKind};

#[derive(Debug, Clone)]
pub struct RuleEditSession {
    draft: RuleSet,
}

impl RuleEditSession {
    pub fn begin(current: &RuleSet) -> Self {
        Self {
            draft: current.clone(),
        }
    }

    pub fn draft(&self) -> &RuleSet {
        &self.draft
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.draft.enabled = enabled;
    }

    pub fn push(&mut self, rule: Rule) {
        self.draft.rules.push(rule);
    }

    pub fn remove(&mut self, index: usize) -> Option<Rule> {
        (index < self.draft.rules.len()).then(|| self.draft.rules.remove(index))
    }

    /// Swaps the rule at `index` with its predecessor. False at the top.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.draft.rules.len() {
            return false;
        }
        self.draft.rules.swap(index - 1, index);
        true
    }

    /// Swaps the rule at `index` with its successor. False at the bottom.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.draft.rules.len().saturating_sub(1) {
            return false;
        }
        self.draft.rules.swap(index, index + 1);
        true
    }

    /// Changes a rule's kind, keeping whatever text it already had.
    pub fn change_kind(&mut self, index: usize, kind: RuleKind) -> bool {
        match self.draft.rules.get_mut(index) {
            Some(rule) => {
                *rule = rule.with_kind(kind);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.draft.rules.clear();
    }

    /// Persists the draft and returns it.
    pub async fn commit(self, store: &dyn KeyValueStore) -> Result<RuleSet, StoreError> {
        self.draft.save(store).await?;
        Ok(self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    fn add_end(s: &str) -> Rule {
        Rule::AddEnd {
            text: Some(s.to_string()),
        }
    }

    #[test]
    fn reorder_and_remove() {
        let base = RuleSet::new(true, vec![add_end("a"), add_end("b"), add_end("c")]);
        let mut session = RuleEditSession::begin(&base);

        assert!(!session.move_up(0));
        assert!(!session.move_down(2));
        assert!(!session.move_down(7));
        assert!(!session.move_down(usize::MAX));
        assert!(!session.move_up(usize::MAX));
        assert!(session.move_down(0));
        assert_eq!(session.draft().rules, vec![add_end("b"), add_end("a"), add_end("c")]);
        assert!(session.move_up(2));
        assert_eq!(session.draft().rules, vec![add_end("b"), add_end("c"), add_end("a")]);

        assert_eq!(session.remove(1), Some(add_end("c")));
        assert_eq!(session.remove(5), None);
        assert_eq!(session.draft().rules.len(), 2);

        // The snapshot is independent of the original.
        assert_eq!(base.rules.len(), 3);
    }

    #[test]
    fn change_kind_keeps_text() {
        let base = RuleSet::new(false, vec![add_end("copy")]);
        let mut session = RuleEditSession::begin(&base);
        assert!(session.change_kind(0, RuleKind::Remove));
        assert!(!session.change_kind(1, RuleKind::Remove));
        assert_eq!(
            session.draft().rules,
            vec![Rule::Remove {
                text: Some("copy".to_string())
            }]
        );
    }

    #[tokio::test]
    async fn nothing_is_stored_until_commit() {
        let store = MemoryStore::new();
        let mut session = RuleEditSession::begin(&RuleSet::default());
        session.set_enabled(true);
        session.push(Rule::CamelCase);
        assert_eq!(RuleSet::load(&store).await.unwrap(), RuleSet::default());

        let saved = session.commit(&store).await.unwrap();
        assert_eq!(saved, RuleSet::new(true, vec![Rule::CamelCase]));
        assert_eq!(RuleSet::load(&store).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn dropped_session_discards_edits() {
        let store = MemoryStore::new();
        let current = RuleSet::new(true, vec![Rule::TitleCase]);
        current.save(&store).await.unwrap();

        let mut session = RuleEditSession::begin(&current);
        session.clear();
        drop(session);

        assert_eq!(RuleSet::load(&store).await.unwrap(), current);
    }
}
