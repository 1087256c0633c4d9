//! Sequential application of a rule list to a filename.

use chrono::{Local, NaiveDate};

use super::rule::Rule;
use super::text;

/// Applies `rules` in order, each one consuming the previous output.
///
/// `prependDate` uses today's local date. Never fails: malformed or
/// unknown rules leave the filename as it was.
pub fn apply_rules(filename: &str, rules: &[Rule]) -> String {
    apply_rules_on(filename, rules, Local::now().date_naive())
}

/// Same as [`apply_rules`] with an explicit date for `prependDate`.
pub fn apply_rules_on(filename: &str, rules: &[Rule], today: NaiveDate) -> String {
    let mut result = filename.to_string();
    for rule in rules {
        if let Some(next) = apply_rule(&result, rule, today) {
            result = next;
        }
        if normalizes_after(rule) {
            result = text::collapse_whitespace(&result);
        }
    }
    result
}

/// Returns the transformed string, or `None` when the rule is a no-op.
fn apply_rule(current: &str, rule: &Rule, today: NaiveDate) -> Option<String> {
    match rule {
        Rule::Replace { find, replace_with } => {
            let find = non_empty(find)?;
            Some(current.replace(find, replace_with.as_deref().unwrap_or_default()))
        }
        Rule::Remove { text } => Some(current.replace(non_empty(text)?, "")),
        Rule::AddEnd { text } => Some(text::append_to_name(current, non_empty(text)?)),
        Rule::AddBeginning { text } => Some(format!("{}{current}", non_empty(text)?)),
        Rule::MoveAfterDate { text } => text::move_after_date(current, non_empty(text)?),
        Rule::PrependDate => Some(format!("{} - {current}", today.format("%Y-%m-%d"))),
        Rule::UnderscoreSpaces => Some(text::underscore_spaces(current)),
        Rule::RemoveSpecial => Some(text::remove_special(current)),
        Rule::TitleCase => Some(text::title_case(current)),
        Rule::CamelCase => Some(text::camel_case(current)),
        Rule::Unknown => {
            tracing::trace!("skipping unknown rule kind");
            None
        }
    }
}

/// Whitespace is collapsed after every rule except the two that remove it.
fn normalizes_after(rule: &Rule) -> bool {
    !matches!(rule, Rule::UnderscoreSpaces | Rule::CamelCase)
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
