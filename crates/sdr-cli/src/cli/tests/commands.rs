//! Command handlers against a file-backed store in a temp dir.

use crate::cli::commands::{
    applied, preview_line, rewritten_header, run_apply, run_header, run_preview, run_rules,
    run_strategy,
};
use crate::cli::{Direction, RulesCommand};
use sdr_core::config::SdrConfig;
use sdr_core::intercept::HostCapabilities;
use sdr_core::rules::{Rule, RuleKind};
use sdr_core::settings::{JsonFileStore, RuleSet};

fn add(kind: RuleKind, text: Option<&str>, replace_with: Option<&str>) -> RulesCommand {
    RulesCommand::Add {
        kind,
        text: text.map(str::to_string),
        replace_with: replace_with.map(str::to_string),
    }
}

#[tokio::test]
async fn rules_edits_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("storage.json"));

    run_rules(&store, add(RuleKind::Replace, Some("IMG_"), Some("Photo_")))
        .await
        .unwrap();
    run_rules(&store, add(RuleKind::AddEnd, Some("_edited"), None))
        .await
        .unwrap();
    run_rules(&store, add(RuleKind::TitleCase, None, None))
        .await
        .unwrap();
    run_rules(&store, RulesCommand::Enable).await.unwrap();

    let set = RuleSet::load(&store).await.unwrap();
    assert!(set.enabled);
    assert_eq!(
        set.rules,
        vec![
            Rule::Replace {
                find: Some("IMG_".to_string()),
                replace_with: Some("Photo_".to_string()),
            },
            Rule::AddEnd {
                text: Some("_edited".to_string()),
            },
            Rule::TitleCase,
        ]
    );

    run_rules(
        &store,
        RulesCommand::Move {
            position: 3,
            direction: Direction::Up,
        },
    )
    .await
    .unwrap();
    run_rules(&store, RulesCommand::Remove { position: 1 })
        .await
        .unwrap();
    let set = RuleSet::load(&store).await.unwrap();
    assert_eq!(set.rules.len(), 2);
    assert_eq!(set.rules[0], Rule::TitleCase);

    run_rules(&store, RulesCommand::Disable).await.unwrap();
    run_rules(&store, RulesCommand::Clear).await.unwrap();
    let set = RuleSet::load(&store).await.unwrap();
    assert!(!set.enabled);
    assert!(set.rules.is_empty());
}

#[tokio::test]
async fn rejected_edits_leave_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let store = JsonFileStore::new(&path);

    assert!(run_rules(&store, add(RuleKind::AddEnd, None, None)).await.is_err());
    assert!(run_rules(&store, add(RuleKind::CamelCase, Some("x"), None)).await.is_err());
    assert!(run_rules(&store, add(RuleKind::Remove, Some("x"), Some("y"))).await.is_err());
    assert!(run_rules(&store, RulesCommand::Remove { position: 0 }).await.is_err());
    assert!(run_rules(&store, RulesCommand::Remove { position: 1 }).await.is_err());
    assert!(run_rules(
        &store,
        RulesCommand::Move {
            position: 1,
            direction: Direction::Up,
        }
    )
    .await
    .is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn apply_preview_and_header_read_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("storage.json"));
    run_rules(&store, add(RuleKind::Replace, Some("IMG_"), Some("Photo_")))
        .await
        .unwrap();

    assert_eq!(applied(&store, "/tmp/IMG_1.jpg").await.unwrap(), "Photo_1.jpg");
    assert_eq!(
        preview_line(&store, "IMG_1.jpg").await.unwrap(),
        "Renaming is off; IMG_1.jpg is kept."
    );
    assert_eq!(
        rewritten_header(&store, "attachment; filename=\"IMG_1.jpg\"")
            .await
            .unwrap(),
        "attachment; filename=\"Photo_1.jpg\""
    );

    run_rules(&store, RulesCommand::Enable).await.unwrap();
    assert_eq!(
        preview_line(&store, "dir/IMG_1.jpg").await.unwrap(),
        "IMG_1.jpg -> Photo_1.jpg"
    );
    assert_eq!(
        preview_line(&store, "report.pdf").await.unwrap(),
        "report.pdf (unchanged)"
    );

    assert!(applied(&store, "/tmp/").await.is_err());
    assert!(rewritten_header(&store, "inline").await.is_err());
    run_apply(&store, "IMG_2.jpg").await.unwrap();
    run_preview(&store, "IMG_2.jpg").await.unwrap();
    run_header(&store, "inline; filename=IMG_2.jpg").await.unwrap();
}

#[test]
fn strategy_requires_some_capability() {
    let mut cfg = SdrConfig::default();
    run_strategy(&cfg).unwrap();
    cfg.capabilities = HostCapabilities::default();
    assert!(run_strategy(&cfg).is_err());
}
