//! Contree: Permission-Filtered Content Trees
//!
//! Aggregates the content of a BI console (reports, worksheets, data sources,
//! libraries, dashboards, schedule tasks, recycle bin and auto-saved drafts)
//! into one tree and redacts it for a single viewer.
//!
//! A request flows through [`gather::Gatherer`] (six source adapters run in
//! parallel), [`gather::merge`], [`redact::Redactor`] and optionally
//! [`search::search_all`]. [`service::ContentTreeService`] wires the pipeline
//! together.

pub mod concurrency;
pub mod config;
pub mod drafts;
pub mod error;
pub mod gather;
pub mod logging;
pub mod redact;
pub mod search;
pub mod security;
pub mod service;
pub mod sources;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, StoreError};
pub use service::ContentTreeService;
pub use tree::{Node, NodeCategory};
pub use types::{Identity, RequestContext, UsersToLoad};
