use crate::integration::support::{all_labels, ctx, labels, World};
use contree::security::ResourceType;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn substring_match_keeps_ancestor_chain() {
    let world = World::sample();
    let found = world
        .service()
        .search_tree(&ctx("admin"), "forecast")
        .await
        .unwrap();

    assert_eq!(labels(&found), vec!["Repository"]);
    assert_eq!(
        all_labels(&found[0]),
        vec!["Repository", "Sales", "Q1", "Forecast"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exact_match_returns_whole_subtree() {
    let world = World::sample();
    let found = world
        .service()
        .search_tree(&ctx("admin"), "SALES")
        .await
        .unwrap();

    let repository = found.iter().find(|n| n.label == "Repository").unwrap();
    assert_eq!(
        all_labels(repository),
        vec!["Repository", "Sales", "Q1", "Forecast", "Budget"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn search_loads_every_private_folder() {
    let world = World::sample();
    let found = world
        .service()
        .search_tree(&ctx("alice"), "roadmap")
        .await
        .unwrap();

    assert_eq!(labels(&found), vec!["Users' Reports"]);
    assert_eq!(
        all_labels(&found[0]),
        vec!["Users' Reports", "alice", "Plans", "Roadmap"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn search_never_reveals_redacted_nodes() {
    let world = World::sample();
    world.grant("bob", ResourceType::Report, "Sales/Budget");

    let hidden = world
        .service()
        .search_tree(&ctx("bob"), "campaigns")
        .await
        .unwrap();
    assert!(hidden.is_empty());

    let visible = world
        .service()
        .search_tree(&ctx("bob"), "budget")
        .await
        .unwrap();
    assert_eq!(all_labels(&visible[0]), vec!["Repository", "Sales", "Budget"]);
}
