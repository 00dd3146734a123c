use crate::integration::support::{all_labels, ctx, labels, root, World};
use contree::tree::sentinel::{LIBRARY_ROOT, REPOSITORY_ROOT, SCRIPT_LIBRARY, USERS_ROOT};
use contree::tree::NodeCategory;
use contree::UsersToLoad;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn admin_sees_every_source_in_adapter_order() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::All)
        .await
        .unwrap();

    assert_eq!(
        labels(&tree),
        vec![
            "Repository",
            "Worksheets",
            "Data Sources",
            "Library",
            "Users' Reports",
            "Trash",
            "Dashboards",
            "Users' Dashboards",
            "Schedule Tasks",
            "Recycle Bin",
            "Auto Saved Files",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn repository_is_folders_first_and_fully_writable_for_admin() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();

    let repository = root(&tree, NodeCategory::RepositoryFolder, REPOSITORY_ROOT).unwrap();
    assert_eq!(labels(&repository.children), vec!["Marketing", "Sales"]);
    let sales = repository.child("Sales").unwrap();
    assert_eq!(labels(&sales.children), vec!["Q1", "Budget"]);
    assert_eq!(sales.flags.read_only, Some(false));

    let worksheets = root(&tree, NodeCategory::WorksheetFolder, REPOSITORY_ROOT).unwrap();
    assert_eq!(labels(&worksheets.children), vec!["Orders"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn data_source_children_list_models_before_queries() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();

    let sources = root(&tree, NodeCategory::DataSourceFolder, REPOSITORY_ROOT).unwrap();
    let warehouse = sources.child("Warehouse").unwrap();
    assert_eq!(labels(&warehouse.children), vec!["Sales Model", "Revenue"]);
    assert_eq!(warehouse.children[1].path, "Warehouse/Revenue");

    let library = root(&tree, NodeCategory::LibraryFolder, LIBRARY_ROOT).unwrap();
    assert_eq!(library.flags.read_only, None);
    let scripts = library.child(SCRIPT_LIBRARY).unwrap();
    assert_eq!(labels(&scripts.children), vec!["helpers"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unrequested_private_folders_are_listed_but_not_loaded() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::only(["alice"]))
        .await
        .unwrap();

    let users = root(&tree, NodeCategory::UserRoot, USERS_ROOT).unwrap();
    assert_eq!(labels(&users.children), vec!["admin", "alice", "bob"]);

    let alice = users.child("alice").unwrap();
    assert!(!alice.flags.unloaded);
    assert_eq!(all_labels(alice), vec!["alice", "Plans", "Roadmap"]);

    let bob = users.child("bob").unwrap();
    assert!(bob.flags.unloaded);
    assert!(bob.children.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn built_in_schedule_tasks_are_flagged() {
    let world = World::sample();
    let tree = world
        .service()
        .get_tree(&ctx("admin"), &UsersToLoad::None)
        .await
        .unwrap();

    let schedule = root(&tree, NodeCategory::ScheduleTaskFolder, REPOSITORY_ROOT).unwrap();
    let backup = schedule.child("__asset file backup").unwrap();
    assert!(backup.flags.built_in);
    assert!(!schedule.child("Nightly Export").unwrap().flags.built_in);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn denied_viewer_keeps_virtual_roots_only() {
    let world = World::sample();
    world.directory.add_user("guest", false);
    let tree = world
        .service()
        .get_tree(&ctx("guest"), &UsersToLoad::None)
        .await
        .unwrap();

    assert_eq!(
        labels(&tree),
        vec![
            "Users' Reports",
            "Dashboards",
            "Users' Dashboards",
            "Recycle Bin",
            "Auto Saved Files",
        ]
    );
    for node in &tree {
        if node.category.is_recycle_grouping() {
            assert_eq!(node.flags.read_only, None);
        } else {
            assert_eq!(node.flags.read_only, Some(true));
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn partial_grant_keeps_read_only_ancestors() {
    let world = World::sample();
    world.grant(
        "alice",
        contree::security::ResourceType::Report,
        "Sales/Q1/Forecast",
    );
    let tree = world
        .service()
        .get_tree(&ctx("alice"), &UsersToLoad::None)
        .await
        .unwrap();

    let repository = root(&tree, NodeCategory::RepositoryFolder, REPOSITORY_ROOT).unwrap();
    assert_eq!(repository.flags.read_only, Some(true));
    assert_eq!(all_labels(repository), vec!["Repository", "Sales", "Q1", "Forecast"]);
    let q1 = repository.child("Sales").unwrap().child("Sales/Q1").unwrap();
    assert_eq!(q1.flags.read_only, Some(true));
    assert_eq!(q1.children[0].flags.read_only, Some(false));
}
