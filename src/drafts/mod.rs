//! Auto-saved drafts
//!
//! Draft files are named `scope^TYPE^owner^name`. The name is parsed once into
//! a `DraftFile` at the `DraftStore` boundary; nothing downstream re-splits it.

pub mod reaper;

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use reaper::DraftReaper;

const NAME_DELIMITER: char = '^';
const ANONYMOUS_OWNERS: [&str; 3] = ["", "_NULL_", "anonymous"];

/// Scope segment of a draft file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftScope {
    Global,
    User,
    Other(u32),
}

impl DraftScope {
    fn from_code(code: u32) -> Self {
        match code {
            1 => DraftScope::Global,
            4 => DraftScope::User,
            other => DraftScope::Other(other),
        }
    }

    fn code(self) -> u32 {
        match self {
            DraftScope::Global => 1,
            DraftScope::User => 4,
            DraftScope::Other(code) => code,
        }
    }
}

/// Kind of asset a draft was saved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DraftKind {
    Worksheet,
    Viewsheet,
}

impl DraftKind {
    fn parse(segment: &str) -> Option<Self> {
        if segment.eq_ignore_ascii_case("WORKSHEET") {
            Some(DraftKind::Worksheet)
        } else if segment.eq_ignore_ascii_case("VIEWSHEET") {
            Some(DraftKind::Viewsheet)
        } else {
            None
        }
    }

    fn as_segment(self) -> &'static str {
        match self {
            DraftKind::Worksheet => "WORKSHEET",
            DraftKind::Viewsheet => "VIEWSHEET",
        }
    }
}

/// Parsed auto-save file descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraftFile {
    /// Opaque store file name
    pub file_name: String,
    pub scope: DraftScope,
    pub kind: DraftKind,
    /// `None` for drafts saved by anonymous sessions
    pub owner: Option<String>,
    pub name: String,
}

impl DraftFile {
    pub fn parse(file_name: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidDraftName(file_name.to_string());
        let mut parts = file_name.splitn(4, NAME_DELIMITER);
        let scope = parts
            .next()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(DraftScope::from_code)
            .ok_or_else(invalid)?;
        let kind = parts.next().and_then(DraftKind::parse).ok_or_else(invalid)?;
        let owner = parts.next().ok_or_else(invalid)?;
        let name = parts.next().filter(|n| !n.is_empty()).ok_or_else(invalid)?;

        let owner = if ANONYMOUS_OWNERS.contains(&owner) {
            None
        } else {
            Some(owner.to_string())
        };

        Ok(Self {
            file_name: file_name.to_string(),
            scope,
            kind,
            owner,
            name: name.to_string(),
        })
    }

    /// Compose a file name from its parts
    pub fn compose(scope: DraftScope, kind: DraftKind, owner: Option<&str>, name: &str) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            scope.code(),
            kind.as_segment(),
            owner.unwrap_or("_NULL_"),
            name,
            d = NAME_DELIMITER
        )
    }

    pub fn owned_by(&self, user: &str) -> bool {
        self.owner.as_deref() == Some(user)
    }
}

impl fmt::Display for DraftFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Auto-save storage collaborator
pub trait DraftStore: Send + Sync {
    /// Every draft currently stored; unparseable names are skipped by the store
    fn list(&self) -> Result<Vec<DraftFile>, StoreError>;

    /// Last-modified time in epoch milliseconds
    fn last_modified(&self, draft: &DraftFile) -> Result<i64, StoreError>;

    fn delete(&self, draft: &DraftFile) -> Result<(), StoreError>;
}

/// Time source for retention decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
