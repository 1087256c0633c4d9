//! Rule descriptors as persisted in the `renameRules` store key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single filename transformation.
///
/// Stored as a JSON object tagged by `type`. Parameter fields may be missing
/// (the rule is then a no-op); an unrecognised `type` becomes [`Rule::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rule {
    Replace {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        find: Option<String>,
        #[serde(default, rename = "replaceWith", skip_serializing_if = "Option::is_none")]
        replace_with: Option<String>,
    },
    Remove {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    AddEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    AddBeginning {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    MoveAfterDate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    PrependDate,
    UnderscoreSpaces,
    RemoveSpecial,
    TitleCase,
    CamelCase,
    #[serde(other)]
    Unknown,
}

/// Tag of a [`Rule`], without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Replace,
    Remove,
    AddEnd,
    AddBeginning,
    MoveAfterDate,
    PrependDate,
    UnderscoreSpaces,
    RemoveSpecial,
    TitleCase,
    CamelCase,
    Unknown,
}

impl RuleKind {
    /// Every kind a user can pick, in menu order.
    pub const SELECTABLE: [RuleKind; 10] = [
        RuleKind::Replace,
        RuleKind::Remove,
        RuleKind::PrependDate,
        RuleKind::UnderscoreSpaces,
        RuleKind::RemoveSpecial,
        RuleKind::TitleCase,
        RuleKind::CamelCase,
        RuleKind::AddEnd,
        RuleKind::AddBeginning,
        RuleKind::MoveAfterDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Replace => "replace",
            RuleKind::Remove => "remove",
            RuleKind::AddEnd => "addEnd",
            RuleKind::AddBeginning => "addBeginning",
            RuleKind::MoveAfterDate => "moveAfterDate",
            RuleKind::PrependDate => "prependDate",
            RuleKind::UnderscoreSpaces => "underscoreSpaces",
            RuleKind::RemoveSpecial => "removeSpecial",
            RuleKind::TitleCase => "titleCase",
            RuleKind::CamelCase => "camelCase",
            RuleKind::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Replace => "Replace",
            RuleKind::Remove => "Remove",
            RuleKind::AddEnd => "Add to End",
            RuleKind::AddBeginning => "Add to Beginning",
            RuleKind::MoveAfterDate => "Move After Date",
            RuleKind::PrependDate => "Prepend Date",
            RuleKind::UnderscoreSpaces => "Spaces to Underscores",
            RuleKind::RemoveSpecial => "Remove Special Characters",
            RuleKind::TitleCase => "Title Case",
            RuleKind::CamelCase => "CamelCase",
            RuleKind::Unknown => "Unknown",
        }
    }

    /// True for kinds that take a `text` (or `find`) parameter.
    pub fn takes_text(self) -> bool {
        matches!(
            self,
            RuleKind::Replace
                | RuleKind::Remove
                | RuleKind::AddEnd
                | RuleKind::AddBeginning
                | RuleKind::MoveAfterDate
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a rule kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule kind: {0}")]
pub struct UnknownRuleKind(pub String);

impl FromStr for RuleKind {
    type Err = UnknownRuleKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::SELECTABLE
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRuleKind(s.to_string()))
    }
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Replace { .. } => RuleKind::Replace,
            Rule::Remove { .. } => RuleKind::Remove,
            Rule::AddEnd { .. } => RuleKind::AddEnd,
            Rule::AddBeginning { .. } => RuleKind::AddBeginning,
            Rule::MoveAfterDate { .. } => RuleKind::MoveAfterDate,
            Rule::PrependDate => RuleKind::PrependDate,
            Rule::UnderscoreSpaces => RuleKind::UnderscoreSpaces,
            Rule::RemoveSpecial => RuleKind::RemoveSpecial,
            Rule::TitleCase => RuleKind::TitleCase,
            Rule::CamelCase => RuleKind::CamelCase,
            Rule::Unknown => RuleKind::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// The primary text parameter: `find` for replace, `text` otherwise.
    pub fn text(&self) -> Option<&str> {
        match self {
            Rule::Replace { find, .. } => find.as_deref(),
            Rule::Remove { text }
            | Rule::AddEnd { text }
            | Rule::AddBeginning { text }
            | Rule::MoveAfterDate { text } => text.as_deref(),
            _ => None,
        }
    }

    /// Build a rule of `kind` carrying `text` as its primary parameter.
    pub fn new(kind: RuleKind, text: Option<String>) -> Rule {
        match kind {
            RuleKind::Replace => Rule::Replace {
                find: text,
                replace_with: None,
            },
            RuleKind::Remove => Rule::Remove { text },
            RuleKind::AddEnd => Rule::AddEnd { text },
            RuleKind::AddBeginning => Rule::AddBeginning { text },
            RuleKind::MoveAfterDate => Rule::MoveAfterDate { text },
            RuleKind::PrependDate => Rule::PrependDate,
            RuleKind::UnderscoreSpaces => Rule::UnderscoreSpaces,
            RuleKind::RemoveSpecial => Rule::RemoveSpecial,
            RuleKind::TitleCase => Rule::TitleCase,
            RuleKind::CamelCase => Rule::CamelCase,
            RuleKind::Unknown => Rule::Unknown,
        }
    }

    /// Switch to another kind, carrying the current text over.
    /// A replacement string is dropped.
    pub fn with_kind(&self, kind: RuleKind) -> Rule {
        Rule::new(kind, self.text().map(str::to_string))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Replace { find, replace_with } => write!(
                f,
                "{}: \"{}\" -> \"{}\"",
                self.label(),
                find.as_deref().unwrap_or_default(),
                replace_with.as_deref().unwrap_or_default()
            ),
            _ => match self.text() {
                Some(text) => write!(f, "{}: \"{}\"", self.label(), text),
                None if self.kind().takes_text() => write!(f, "{}: \"\"", self.label()),
                None => f.write_str(self.label()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_replace_with_camel_case_field() {
        let rule: Rule =
            serde_json::from_str(r#"{"type":"replace","find":"IMG_","replaceWith":"Photo_"}"#)
                .unwrap();
        assert_eq!(
            rule,
            Rule::Replace {
                find: Some("IMG_".to_string()),
                replace_with: Some("Photo_".to_string()),
            }
        );
    }

    #[test]
    fn missing_fields_are_absent() {
        let rule: Rule = serde_json::from_str(r#"{"type":"replace"}"#).unwrap();
        assert_eq!(
            rule,
            Rule::Replace {
                find: None,
                replace_with: None
            }
        );
        let rule: Rule = serde_json::from_str(r#"{"type":"addEnd","text":null}"#).unwrap();
        assert_eq!(rule, Rule::AddEnd { text: None });
    }

    #[test]
    fn parameterless_kind_ignores_leftover_text() {
        // A row switched from "remove" to "titleCase" still carries its text.
        let rule: Rule = serde_json::from_str(r#"{"type":"titleCase","text":"old"}"#).unwrap();
        assert_eq!(rule, Rule::TitleCase);
    }

    #[test]
    fn unrecognised_type_is_unknown() {
        let rule: Rule = serde_json::from_str(r#"{"type":"reverse","text":"x"}"#).unwrap();
        assert_eq!(rule, Rule::Unknown);
    }

    #[test]
    fn serialize_uses_type_tag() {
        let json = serde_json::to_value(Rule::MoveAfterDate {
            text: Some("FINAL".to_string()),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "moveAfterDate", "text": "FINAL"})
        );
        let json = serde_json::to_value(Rule::UnderscoreSpaces).unwrap();
        assert_eq!(json, serde_json::json!({"type": "underscoreSpaces"}));
    }

    #[test]
    fn kind_from_str_is_case_insensitive() {
        assert_eq!("addEnd".parse::<RuleKind>(), Ok(RuleKind::AddEnd));
        assert_eq!("ADDEND".parse::<RuleKind>(), Ok(RuleKind::AddEnd));
        assert!("unknown".parse::<RuleKind>().is_err());
    }

    #[test]
    fn with_kind_carries_text_between_find_and_text() {
        let remove = Rule::Remove {
            text: Some("copy".to_string()),
        };
        assert_eq!(
            remove.with_kind(RuleKind::Replace),
            Rule::Replace {
                find: Some("copy".to_string()),
                replace_with: None
            }
        );
        let replace = Rule::Replace {
            find: Some("a".to_string()),
            replace_with: Some("b".to_string()),
        };
        assert_eq!(
            replace.with_kind(RuleKind::AddEnd),
            Rule::AddEnd {
                text: Some("a".to_string())
            }
        );
        assert_eq!(replace.with_kind(RuleKind::CamelCase), Rule::CamelCase);
    }

    #[test]
    fn display_shows_label_and_parameters() {
        let rule = Rule::Replace {
            find: Some("_".to_string()),
            replace_with: Some("-".to_string()),
        };
        assert_eq!(rule.to_string(), "Replace: \"_\" -> \"-\"");
        assert_eq!(Rule::TitleCase.to_string(), "Title Case");
        assert_eq!(Rule::AddEnd { text: None }.to_string(), "Add to End: \"\"");
    }
}
