use crate::integration::support::{ctx, labels, root, World};
use chrono::Duration;
use contree::config::ContentTreeConfig;
use contree::drafts::DraftKind;
use contree::tree::sentinel::{AUTO_SAVE_ROOT, RECYCLE_BIN_ROOT};
use contree::tree::NodeCategory;
use contree::UsersToLoad;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn expired_drafts_are_deleted_while_building_the_tree() {
    let world = World::sample();
    let ancient = world.draft(DraftKind::Viewsheet, Some("bob"), "old", Duration::days(8));
    let borderline = world.draft(DraftKind::Worksheet, Some("bob"), "edge", Duration::days(7));

    world
        .service()
        .get_tree(&ctx("bob"), &UsersToLoad::None)
        .await
        .unwrap();

    assert!(!world.drafts.contains(&ancient));
    assert!(world.drafts.contains(&borderline));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reaping_covers_drafts_the_viewer_cannot_see() {
    let world = World::sample();
    let before = world.drafts.len();

    world
        .service()
        .get_tree(&ctx("bob"), &UsersToLoad::None)
        .await
        .unwrap();

    // alice's 30-day-old draft is gone even though bob never sees it
    assert_eq!(world.drafts.len(), before - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn drafts_are_grouped_by_owner_then_kind() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();

    let auto = root(&tree, NodeCategory::AutoSaveFolder, AUTO_SAVE_ROOT).unwrap();
    assert_eq!(labels(&auto.children), vec!["alice", "bob"]);
    let alice = &auto.children[0];
    assert_eq!(labels(&alice.children), vec!["Worksheets", "Viewsheets"]);
    assert_eq!(labels(&alice.children[0].children), vec!["fresh"]);
    assert!(alice.children[1].children.is_empty());
    assert!(alice.is_placeholder());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn non_admins_see_only_their_own_drafts_and_deletions() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("alice"), &UsersToLoad::None)
        .await
        .unwrap();

    let auto = root(&tree, NodeCategory::AutoSaveFolder, AUTO_SAVE_ROOT).unwrap();
    assert_eq!(labels(&auto.children), vec!["alice"]);

    let recycle = root(&tree, NodeCategory::RecycleBinFolder, RECYCLE_BIN_ROOT).unwrap();
    assert_eq!(labels(&recycle.children), vec!["Archived"]);
    assert_eq!(
        recycle.children[0].metadata.description.as_deref(),
        Some("Sales/Archived (viewsheet)")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stale_recycle_records_are_dropped() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();

    let recycle = root(&tree, NodeCategory::RecycleBinFolder, RECYCLE_BIN_ROOT).unwrap();
    assert_eq!(labels(&recycle.children), vec!["Archived", "Gone"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn retention_is_configurable() {
    let world = World::sample();
    let mut config = ContentTreeConfig::default();
    config.drafts.retention_days = 1;

    world
        .service_with(&config)
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();

    // only bob's one-hour-old draft survives a one-day window
    assert_eq!(world.drafts.len(), 1);
}
