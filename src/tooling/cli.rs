//! CLI Tooling
//!
//! Command-line access to the content tree over a fixture-backed set of
//! collaborators. Every command runs as one viewer and prints the result.

use crate::config::{ConfigLoader, ContentTreeConfig};
use crate::error::ApiError;
use crate::service::ContentTreeService;
use crate::store::{Collaborators, Fixture};
use crate::tooling::format::{
    format_tree_json, format_tree_table, format_tree_text, format_users_table,
};
use crate::tree::Node;
use crate::types::{Identity, RequestContext, UsersToLoad};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::debug;

/// Contree CLI - permission-filtered content trees
#[derive(Parser)]
#[command(name = "contree")]
#[command(about = "Aggregate and redact a BI content tree for one viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Fixture file (YAML or JSON) describing the collaborators' contents
    #[arg(long, global = true, default_value = "contree.yaml")]
    pub fixture: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the content tree visible to a user
    Tree {
        /// Viewer identity
        #[arg(long)]
        user: String,
        /// Load this user's private folder (repeatable)
        #[arg(long = "load")]
        load: Vec<String>,
        /// Load every user's private folder
        #[arg(long, conflicts_with = "load")]
        all_users: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Search the visible tree by label
    Search {
        /// Viewer identity
        #[arg(long)]
        user: String,
        /// Label text; an exact match includes the whole subtree
        filter: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List users known to the identity directory
    Users,
}

impl Cli {
    /// Config file settings with CLI logging flags applied on top
    pub fn resolve_config(&self) -> Result<ContentTreeConfig, ApiError> {
        let mut config = ConfigLoader::load_optional(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if self.no_color {
            config.logging.color = false;
        }
        Ok(config)
    }
}

pub struct CliContext {
    service: ContentTreeService,
    collaborators: Collaborators,
    runtime: Runtime,
    color: bool,
}

impl CliContext {
    pub fn new(fixture: &Path, config: &ContentTreeConfig, color: bool) -> Result<Self, ApiError> {
        let collaborators = Fixture::load(fixture)?.into_collaborators(Utc::now());
        debug!(fixture = %fixture.display(), "Loaded fixture");
        let service = ContentTreeService::with_system_clock(collaborators.clone(), config);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::TaskFailed(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            service,
            collaborators,
            runtime,
            color: color && std::io::stdout().is_terminal(),
        })
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Tree {
                user,
                load,
                all_users,
                format,
            } => {
                let users = if *all_users {
                    UsersToLoad::All
                } else if load.is_empty() {
                    UsersToLoad::None
                } else {
                    UsersToLoad::only(load.iter().cloned())
                };
                let ctx = RequestContext::new(Identity::new(user.as_str()));
                let tree = self
                    .runtime
                    .block_on(self.service.get_tree(&ctx, &users))?;
                self.render(&tree, *format)
            }
            Commands::Search {
                user,
                filter,
                format,
            } => {
                let ctx = RequestContext::new(Identity::new(user.as_str()));
                let found = self
                    .runtime
                    .block_on(self.service.search_tree(&ctx, filter))?;
                self.render(&found, *format)
            }
            Commands::Users => self.handle_users(),
        }
    }

    fn render(&self, nodes: &[Node], format: OutputFormat) -> Result<String, ApiError> {
        match format {
            OutputFormat::Text => Ok(format_tree_text(nodes, self.color)),
            OutputFormat::Json => format_tree_json(nodes),
            OutputFormat::Table => Ok(format_tree_table(nodes)),
        }
    }

    fn handle_users(&self) -> Result<String, ApiError> {
        let directory = &self.collaborators.directory;
        let users = directory.users().map_err(ApiError::Directory)?;
        let rows = users
            .iter()
            .map(|user| {
                directory
                    .is_system_admin(user)
                    .map(|admin| (user.name().to_string(), admin))
                    .map_err(ApiError::Directory)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format_users_table(&rows))
    }
}
