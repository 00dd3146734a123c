//! Core types shared across the content tree engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Viewing identity: the user on whose behalf a tree is built
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Per-request caller context
///
/// Passed explicitly into every collaborator call. The gatherer hands each
/// adapter task its own clone, so identity substitution inside one task never
/// leaks into another task or back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub identity: Identity,
    pub locale: String,
}

impl RequestContext {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            locale: "en_US".to_string(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn viewer(&self) -> &Identity {
        &self.identity
    }
}

/// Which users' private folders get their contents loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsersToLoad {
    #[default]
    None,
    Only(BTreeSet<String>),
    All,
}

impl UsersToLoad {
    pub fn only<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(users.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, user: &str) -> bool {
        match self {
            UsersToLoad::None => false,
            UsersToLoad::Only(users) => users.contains(user),
            UsersToLoad::All => true,
        }
    }
}
