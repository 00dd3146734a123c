use crate::integration::support::{all_labels, ctx, labels, root, World};
use contree::security::{ResourceAction, ResourceType};
use contree::tree::sentinel::{USERS_DASHBOARDS_ROOT, USERS_ROOT};
use contree::tree::NodeCategory;
use contree::UsersToLoad;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn users_only_see_their_own_private_folder() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("alice"), &UsersToLoad::All)
        .await
        .unwrap();

    let users = root(&tree, NodeCategory::UserRoot, USERS_ROOT).unwrap();
    assert_eq!(labels(&users.children), vec!["alice"]);
    let alice = &users.children[0];
    assert_eq!(alice.flags.read_only, Some(false));
    assert_eq!(all_labels(alice), vec!["alice", "Plans", "Roadmap"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn global_grants_do_not_open_other_users_areas() {
    let world = World::sample();
    // A wildcard report grant covers global content only.
    world
        .oracle
        .grant("bob", ResourceType::Report, "*", ResourceAction::Admin);
    let tree = world
        .service()
        .get_tree(&ctx("bob"), &UsersToLoad::All)
        .await
        .unwrap();

    let users = root(&tree, NodeCategory::UserRoot, USERS_ROOT).unwrap();
    assert_eq!(labels(&users.children), vec!["bob"]);
    let names: Vec<String> = tree.iter().flat_map(all_labels).collect();
    assert!(!names.iter().any(|l| l == "Roadmap"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn managing_a_user_still_needs_content_grants() {
    let world = World::sample();
    world
        .oracle
        .grant("bob", ResourceType::SecurityUser, "alice", ResourceAction::Admin);
    let tree = world
        .service()
        .get_tree(&ctx("bob"), &UsersToLoad::All)
        .await
        .unwrap();

    let users = root(&tree, NodeCategory::UserRoot, USERS_ROOT).unwrap();
    assert_eq!(labels(&users.children), vec!["bob"]);
    let dashboards = root(&tree, NodeCategory::DashboardFolder, USERS_DASHBOARDS_ROOT).unwrap();
    assert!(dashboards.children.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn security_user_admin_may_see_granted_content_of_managed_user() {
    let world = World::sample();
    world
        .oracle
        .grant("bob", ResourceType::SecurityUser, "alice", ResourceAction::Admin);
    world.grant("bob", ResourceType::Report, "alice/Plans/Roadmap");
    world.grant("bob", ResourceType::Dashboard, "alice/My Board");
    let tree = world
        .service()
        .get_tree(&ctx("bob"), &UsersToLoad::All)
        .await
        .unwrap();

    let users = root(&tree, NodeCategory::UserRoot, USERS_ROOT).unwrap();
    assert_eq!(labels(&users.children), vec!["alice", "bob"]);
    let alice = users.child("alice").unwrap();
    assert_eq!(alice.flags.read_only, Some(true));
    assert_eq!(all_labels(alice), vec!["alice", "Plans", "Roadmap"]);
    let roadmap = alice.find(NodeCategory::Viewsheet, "alice/Plans/Roadmap").unwrap();
    assert_eq!(roadmap.flags.read_only, Some(false));

    let dashboards = root(&tree, NodeCategory::DashboardFolder, USERS_DASHBOARDS_ROOT).unwrap();
    assert_eq!(labels(&dashboards.children), vec!["alice"]);
    assert_eq!(labels(&dashboards.children[0].children), vec!["My Board"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn global_grant_does_not_match_private_path() {
    let world = World::sample();
    world
        .oracle
        .grant("alice", ResourceType::SecurityUser, "bob", ResourceAction::Admin);
    world.grant("alice", ResourceType::Report, "Scratch");
    let tree = world
        .service()
        .get_tree(&ctx("alice"), &UsersToLoad::All)
        .await
        .unwrap();

    let users = root(&tree, NodeCategory::UserRoot, USERS_ROOT).unwrap();
    assert_eq!(labels(&users.children), vec!["alice"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn private_dashboards_follow_owner() {
    let world = World::sample();
    for (viewer, expected) in [("alice", vec!["alice"]), ("bob", vec![])] {
        let tree = world
            .service()
            .get_tree(&ctx(viewer), &UsersToLoad::None)
            .await
            .unwrap();
        let dashboards =
            root(&tree, NodeCategory::DashboardFolder, USERS_DASHBOARDS_ROOT).unwrap();
        assert_eq!(labels(&dashboards.children), expected, "viewer {}", viewer);
    }
}
