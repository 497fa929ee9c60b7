//! Generation identifiers and alias roles

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::DocumentType;

/// Symbolic alias role pointing at zero or one generation per document type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Generation currently being populated
    InProgress,
    /// Generation currently served to readers
    Latest,
    /// Prior generation retained for rollback
    Previous,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::InProgress => "in-progress",
            Role::Latest => "latest",
            Role::Previous => "previous",
        }
    }
}

/// One physical, versioned index: `{type}-{creation unix timestamp}`.
///
/// Created once, never mutated in place, eventually deleted. Parsing is an
/// exact structured match on that form; an identifier whose prefix merely
/// contains a type name does not parse as that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexGeneration {
    pub doc_type: DocumentType,
    pub created_at: i64,
}

impl IndexGeneration {
    /// A fresh generation for `doc_type`, stamped with the current time
    pub fn create(doc_type: DocumentType) -> Self {
        Self {
            doc_type,
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn at(doc_type: DocumentType, created_at: i64) -> Self {
        Self {
            doc_type,
            created_at,
        }
    }

    /// The physical index name
    pub fn name(&self) -> String {
        format!("{}-{}", self.doc_type.as_str(), self.created_at)
    }

    /// Parse an index name as a generation identifier.
    ///
    /// Returns `None` for names that do not have the exact
    /// `{type}-{timestamp}` shape, including foreign indices living in the
    /// same cluster.
    pub fn parse(name: &str) -> Option<Self> {
        let (prefix, ts) = name.rsplit_once('-')?;
        let doc_type = DocumentType::from_str(prefix).ok()?;
        let created_at = ts.parse::<i64>().ok()?;
        Some(Self {
            doc_type,
            created_at,
        })
    }
}

impl fmt::Display for IndexGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
