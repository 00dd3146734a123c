//! Property tests over randomly generated trees and grants

use contree::redact::Redactor;
use contree::search::{fold_label, search};
use contree::security::{ResourceAction, ResourceType};
use contree::store::memory::GrantTableOracle;
use contree::tree::sentinel::USERS_ROOT;
use contree::tree::{Node, NodeCategory};
use contree::{Identity, RequestContext};
use proptest::prelude::*;
use std::sync::Arc;

const VIEWER: &str = "viewer";

fn arb_category() -> impl Strategy<Value = NodeCategory> {
    prop_oneof![
        Just(NodeCategory::RepositoryFolder),
        Just(NodeCategory::Viewsheet),
        Just(NodeCategory::Worksheet),
        Just(NodeCategory::Dashboard),
        Just(NodeCategory::ScheduleTask),
        Just(NodeCategory::RecycleBinEntry),
    ]
}

fn arb_owner() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => Just(None),
        1 => Just(Some(VIEWER.to_string())),
        1 => Just(Some("other".to_string())),
    ]
}

fn arb_tree() -> impl Strategy<Value = Node> {
    let leaf = (arb_category(), "[a-c]{1,2}", arb_owner()).prop_map(|(category, label, owner)| {
        Node::new(label.clone(), label, category).with_owner(owner)
    });
    leaf.prop_recursive(4, 40, 4, |inner| {
        (
            "[a-c]{1,2}",
            arb_owner(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(label, owner, children)| {
                Node::new(label.clone(), label, NodeCategory::RepositoryFolder)
                    .with_owner(owner)
                    .with_children(children)
            })
    })
    .prop_map(|tree| {
        Node::new(USERS_ROOT, USERS_ROOT, NodeCategory::UserRoot).with_children(vec![tree])
    })
}

fn redactor(granted: &[String]) -> Redactor {
    let oracle = GrantTableOracle::new();
    for label in granted {
        for resource in [
            ResourceType::Report,
            ResourceType::Asset,
            ResourceType::Dashboard,
        ] {
            oracle.grant(VIEWER, resource, label, ResourceAction::Admin);
        }
        oracle.grant(VIEWER, ResourceType::ScheduleTask, label, ResourceAction::Read);
    }
    Redactor::new(Arc::new(oracle))
}

fn any_node(node: &Node, pred: &dyn Fn(&Node) -> bool) -> bool {
    pred(node) || node.children.iter().any(|c| any_node(c, pred))
}

fn all_nodes(node: &Node, pred: &dyn Fn(&Node) -> bool) -> bool {
    pred(node) && node.children.iter().all(|c| all_nodes(c, pred))
}

proptest! {
    #[test]
    fn redaction_is_idempotent(tree in arb_tree(), granted in prop::collection::vec("[a-c]{1,2}", 0..4)) {
        let redactor = redactor(&granted);
        let ctx = RequestContext::new(Identity::new(VIEWER));
        let once = redactor.redact(&tree, &ctx).expect("virtual root always survives");
        let twice = redactor.redact(&once, &ctx).expect("virtual root always survives");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn redaction_never_leaks_other_owners(tree in arb_tree(), granted in prop::collection::vec("[a-c]{1,2}", 0..4)) {
        let redactor = redactor(&granted);
        let ctx = RequestContext::new(Identity::new(VIEWER));
        let redacted = redactor.redact(&tree, &ctx).expect("virtual root always survives");
        prop_assert!(!any_node(&redacted, &|n| n.owner.as_deref() == Some("other")));
    }

    #[test]
    fn read_only_survivors_are_roots_or_have_children(tree in arb_tree(), granted in prop::collection::vec("[a-c]{1,2}", 0..4)) {
        let redactor = redactor(&granted);
        let ctx = RequestContext::new(Identity::new(VIEWER));
        let redacted = redactor.redact(&tree, &ctx).expect("virtual root always survives");
        let check = |n: &Node| {
            n.label == USERS_ROOT || n.flags.read_only != Some(true) || !n.children.is_empty()
        };
        prop_assert!(all_nodes(&redacted, &check));
    }

    #[test]
    fn search_keeps_root_iff_anything_matches(tree in arb_tree(), filter in "[a-c]{1,2}") {
        let found = search(&tree, &filter);
        let matches = |n: &Node| fold_label(&n.label).contains(&filter);
        if any_node(&tree, &matches) {
            let found = found.expect("root kept when a descendant matches");
            prop_assert_eq!(found.label.as_str(), USERS_ROOT);
        } else {
            prop_assert!(found.is_none());
        }
    }
}
