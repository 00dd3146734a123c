use crate::integration::support::{ctx, World};
use contree::config::ContentTreeConfig;
use contree::security::ResourceType;
use contree::sources::SourceKind;
use contree::{ApiError, UsersToLoad};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn registry_failure_fails_the_whole_request() {
    let world = World::sample();
    world.registry.fail_with("registry unavailable");

    let err = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Source { .. }));
    assert!(err.to_string().contains("registry unavailable"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn draft_store_failure_is_attributed_to_recycle_bin() {
    let world = World::sample();
    world.drafts.fail_with("draft volume offline");

    let err = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap_err();
    assert_eq!(err.source_kind(), Some(SourceKind::RecycleBin));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn directory_failure_fails_search_too() {
    let world = World::sample();
    world.directory.fail_with("ldap down");

    let result = world.service().search_tree(&ctx("admin"), "sales").await;
    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn oracle_failure_denies_instead_of_failing() {
    let world = World::sample();
    world.grant("alice", ResourceType::Report, "Sales/Budget");
    world.oracle.fail_with("security provider timeout");

    let tree = world
        .service()
        .get_tree(&ctx("alice"), &UsersToLoad::None)
        .await
        .unwrap();
    assert!(tree.iter().all(|node| node.label != "Repository"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn single_worker_pool_still_completes() {
    let world = World::sample();
    let mut config = ContentTreeConfig::default();
    config.gather.max_workers = 1;
    config.gather.adapter_timeout_ms = 0;

    let tree = world
        .service_with(&config)
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();
    assert_eq!(tree.len(), 11);
}
