use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of document types kept in the search index.
///
/// Each variant determines the source table, the document schema, and the
/// field mapping of the index generations built for it. The wire name
/// (`cats`, `tags`, ...) is the generation-name prefix and the trigger
/// path segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum DocumentType {
    #[serde(rename = "cats")]
    #[strum(serialize = "cats")]
    Category,

    #[serde(rename = "tags")]
    #[strum(serialize = "tags")]
    Tag,

    #[serde(rename = "walls")]
    #[strum(serialize = "walls")]
    Wall,

    #[serde(rename = "blocks")]
    #[strum(serialize = "blocks")]
    Block,

    #[serde(rename = "programs")]
    #[strum(serialize = "programs")]
    Program,

    #[serde(rename = "episodes")]
    #[strum(serialize = "episodes")]
    Episode,

    #[serde(rename = "medias")]
    #[strum(serialize = "medias")]
    Media,
}

impl DocumentType {
    /// Wire name used in generation identifiers and trigger routes.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Category => "cats",
            DocumentType::Tag => "tags",
            DocumentType::Wall => "walls",
            DocumentType::Block => "blocks",
            DocumentType::Program => "programs",
            DocumentType::Episode => "episodes",
            DocumentType::Media => "medias",
        }
    }
}
