//! Content tree
//!
//! Node value types, sentinel paths, the node-to-permission-resource mapping,
//! per-adapter ordering and the flat-entry hierarchy builder.

pub mod builder;
pub mod compare;
pub mod node;
pub mod resource;
pub mod sentinel;

pub use builder::TreeBuilder;
pub use node::{Node, NodeCategory, NodeFlags, NodeKind, NodeMetadata};
pub use resource::{resource_for, PermissionResource};
