use chrono::{DateTime, Duration, TimeZone, Utc};
use contree::config::ContentTreeConfig;
use contree::drafts::{DraftFile, DraftKind, DraftScope, FixedClock};
use contree::security::{ResourceAction, ResourceType};
use contree::sources::{AssetEntry, RecycleRecord, RegistryCategory};
use contree::store::memory::{
    GrantTableOracle, InMemoryAssetStore, InMemoryDirectory, InMemoryDraftStore, InMemoryRegistry,
};
use contree::store::Collaborators;
use contree::tree::NodeCategory;
use contree::{ContentTreeService, Identity, Node, RequestContext};
use std::sync::Arc;

pub struct World {
    pub assets: Arc<InMemoryAssetStore>,
    pub registry: Arc<InMemoryRegistry>,
    pub oracle: Arc<GrantTableOracle>,
    pub directory: Arc<InMemoryDirectory>,
    pub drafts: Arc<InMemoryDraftStore>,
    pub now: DateTime<Utc>,
}

impl World {
    pub fn empty() -> Self {
        Self {
            assets: Arc::new(InMemoryAssetStore::new()),
            registry: Arc::new(InMemoryRegistry::new()),
            oracle: Arc::new(GrantTableOracle::new()),
            directory: Arc::new(InMemoryDirectory::new()),
            drafts: Arc::new(InMemoryDraftStore::new()),
            now: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    /// Three users (admin, alice, bob) and a little of every kind of content
    pub fn sample() -> Self {
        let world = Self::empty();

        world.directory.add_user("admin", true);
        world.directory.add_user("alice", false);
        world.directory.add_user("bob", false);
        world.oracle.grant_everything("admin");

        for (path, category) in [
            ("Sales", NodeCategory::RepositoryFolder),
            ("Sales/Q1", NodeCategory::RepositoryFolder),
            ("Sales/Budget", NodeCategory::Viewsheet),
            ("Sales/Q1/Forecast", NodeCategory::Viewsheet),
            ("Marketing", NodeCategory::RepositoryFolder),
            ("Marketing/Campaigns", NodeCategory::Viewsheet),
            ("Orders", NodeCategory::Worksheet),
        ] {
            world.assets.add_entry(AssetEntry::new(path, category));
        }
        world
            .assets
            .add_entry(AssetEntry::new("Plans", NodeCategory::RepositoryFolder).owned_by("alice"));
        world
            .assets
            .add_entry(AssetEntry::new("Plans/Roadmap", NodeCategory::Viewsheet).owned_by("alice"));
        world
            .assets
            .add_entry(AssetEntry::new("Scratch", NodeCategory::Viewsheet).owned_by("bob"));
        world
            .assets
            .add_trash_entry(AssetEntry::new("Old Report", NodeCategory::Viewsheet));

        world
            .registry
            .add(RegistryCategory::DataSource, None, "Warehouse");
        world
            .registry
            .add(RegistryCategory::Query, Some("Warehouse"), "Revenue");
        world
            .registry
            .add(RegistryCategory::LogicalModel, Some("Warehouse"), "Sales Model");
        world.registry.add(RegistryCategory::Script, None, "helpers");
        world
            .registry
            .add(RegistryCategory::ScheduleTask, None, "Nightly Export");
        world
            .registry
            .add(RegistryCategory::ScheduleTask, None, "__asset file backup");
        world.registry.add(RegistryCategory::Dashboard, None, "Overview");
        world
            .registry
            .add(RegistryCategory::Dashboard, Some("alice"), "My Board");

        world.recycle("recycle/1", "Sales/Archived", Some("alice"), true);
        world.recycle("recycle/2", "Marketing/Gone", Some("bob"), true);
        world.recycle("recycle/3", "Sales/Stale", Some("alice"), false);

        world.draft(DraftKind::Worksheet, Some("alice"), "fresh", Duration::days(2));
        world.draft(DraftKind::Viewsheet, Some("alice"), "ancient", Duration::days(30));
        world.draft(DraftKind::Viewsheet, Some("bob"), "bobs", Duration::hours(1));

        world
    }

    pub fn recycle(&self, path: &str, original: &str, owner: Option<&str>, backed: bool) {
        self.assets.add_recycle_record(RecycleRecord {
            path: path.to_string(),
            original_path: original.to_string(),
            original_category: NodeCategory::Viewsheet,
            label: None,
            owner: owner.map(str::to_string),
            deleted_by: owner.map(str::to_string),
            deleted_at: self.now.timestamp_millis(),
        });
        if backed {
            self.assets.add_content(path);
        }
    }

    /// Insert a user-scope draft aged `age`; returns its file name
    pub fn draft(&self, kind: DraftKind, owner: Option<&str>, name: &str, age: Duration) -> String {
        let file = DraftFile::compose(DraftScope::User, kind, owner, name);
        self.drafts
            .insert(&file, (self.now - age).timestamp_millis());
        file
    }

    pub fn grant(&self, user: &str, resource_type: ResourceType, path: &str) {
        self.oracle
            .grant(user, resource_type, path, ResourceAction::Admin);
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            assets: self.assets.clone(),
            registry: self.registry.clone(),
            oracle: self.oracle.clone(),
            directory: self.directory.clone(),
            drafts: self.drafts.clone(),
        }
    }

    pub fn service(&self) -> ContentTreeService {
        self.service_with(&ContentTreeConfig::default())
    }

    pub fn service_with(&self, config: &ContentTreeConfig) -> ContentTreeService {
        ContentTreeService::new(
            self.collaborators(),
            config,
            Arc::new(FixedClock(self.now)),
        )
    }
}

pub fn ctx(user: &str) -> RequestContext {
    RequestContext::new(Identity::new(user))
}

pub fn root<'a>(tree: &'a [Node], category: NodeCategory, path: &str) -> Option<&'a Node> {
    tree.iter()
        .find(|node| node.category == category && node.path == path)
}

pub fn labels(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|node| node.label.as_str()).collect()
}

/// Every label in the subtree, depth first
pub fn all_labels(node: &Node) -> Vec<String> {
    let mut out = vec![node.label.clone()];
    for child in &node.children {
        out.extend(all_labels(child));
    }
    out
}
