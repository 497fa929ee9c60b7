use serde::Serialize;

use super::DocumentType;

/// Category document. `parent_id` links hierarchical categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ParentUUID")]
    pub parent_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wall {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Kind")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Episode document. `program_id` links the episode to its parent program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Position")]
    pub position: i32,
    #[serde(rename = "ProgramID")]
    pub program_id: String,
}

/// Media document. `episode_id` links the media to its parent episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Media {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "DirectLink")]
    pub direct_link: String,
    #[serde(rename = "Kind")]
    pub kind: String,
    #[serde(rename = "EpisodeID")]
    pub episode_id: String,
}

/// A denormalized projection of one source record, ready for indexing.
///
/// Serializes transparently to the inner document so the bulk payload
/// carries exactly the mapped fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Category(Category),
    Tag(Tag),
    Wall(Wall),
    Block(Block),
    Program(Program),
    Episode(Episode),
    Media(Media),
}

impl Document {
    pub fn doc_type(&self) -> DocumentType {
        match self {
            Document::Category(_) => DocumentType::Category,
            Document::Tag(_) => DocumentType::Tag,
            Document::Wall(_) => DocumentType::Wall,
            Document::Block(_) => DocumentType::Block,
            Document::Program(_) => DocumentType::Program,
            Document::Episode(_) => DocumentType::Episode,
            Document::Media(_) => DocumentType::Media,
        }
    }
}

impl From<Category> for Document {
    fn from(doc: Category) -> Self {
        Document::Category(doc)
    }
}

impl From<Tag> for Document {
    fn from(doc: Tag) -> Self {
        Document::Tag(doc)
    }
}

impl From<Wall> for Document {
    fn from(doc: Wall) -> Self {
        Document::Wall(doc)
    }
}

impl From<Block> for Document {
    fn from(doc: Block) -> Self {
        Document::Block(doc)
    }
}

impl From<Program> for Document {
    fn from(doc: Program) -> Self {
        Document::Program(doc)
    }
}

impl From<Episode> for Document {
    fn from(doc: Episode) -> Self {
        Document::Episode(doc)
    }
}

impl From<Media> for Document {
    fn from(doc: Media) -> Self {
        Document::Media(doc)
    }
}
