//! MySQL snapshot source
//!
//! One `SELECT` per document type; UUID columns are stored as BINARY(16)
//! and read back through `BIN_TO_UUID`. Nullable text columns map to
//! empty strings in the projection, matching the index mappings.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::FromRow;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{
    Block, Category, Document, DocumentType, Episode, Media, Program, Tag, Wall,
};

use super::SnapshotSource;

/// Snapshot source backed by the catalog's MySQL database
#[derive(Clone)]
pub struct MySqlSnapshotSource {
    pool: MySqlPool,
}

impl MySqlSnapshotSource {
    /// Open a connection pool against the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn categories(&self) -> Result<Vec<Document>> {
        const QUERY: &str = "SELECT BIN_TO_UUID(UUID) AS uuid, name, description, \
                             BIN_TO_UUID(parentUUID) AS parent_uuid FROM category";
        let rows: Vec<CategoryRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(CategoryRow::into_document).collect())
    }

    async fn tags(&self) -> Result<Vec<Document>> {
        const QUERY: &str =
            "SELECT BIN_TO_UUID(UUID) AS uuid, name, description FROM tag";
        let rows: Vec<NamedRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(NamedRow::into_tag).collect())
    }

    async fn walls(&self) -> Result<Vec<Document>> {
        const QUERY: &str =
            "SELECT BIN_TO_UUID(UUID) AS uuid, name, description FROM wall";
        let rows: Vec<NamedRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(NamedRow::into_wall).collect())
    }

    async fn blocks(&self) -> Result<Vec<Document>> {
        const QUERY: &str =
            "SELECT BIN_TO_UUID(UUID) AS uuid, name, description, kind FROM block";
        let rows: Vec<BlockRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(BlockRow::into_document).collect())
    }

    async fn programs(&self) -> Result<Vec<Document>> {
        const QUERY: &str =
            "SELECT BIN_TO_UUID(UUID) AS uuid, name, description FROM program";
        let rows: Vec<NamedRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(NamedRow::into_program).collect())
    }

    async fn episodes(&self) -> Result<Vec<Document>> {
        const QUERY: &str = "SELECT BIN_TO_UUID(UUID) AS uuid, name, description, position, \
                             BIN_TO_UUID(programUUID) AS program_uuid FROM episode";
        let rows: Vec<EpisodeRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(EpisodeRow::into_document).collect())
    }

    async fn medias(&self) -> Result<Vec<Document>> {
        const QUERY: &str = "SELECT BIN_TO_UUID(UUID) AS uuid, direct_link, kind, \
                             BIN_TO_UUID(episodeUUID) AS episode_uuid FROM media";
        let rows: Vec<MediaRow> = sqlx::query_as(QUERY).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(MediaRow::into_document).collect())
    }
}

#[async_trait]
impl SnapshotSource for MySqlSnapshotSource {
    async fn fetch_all(&self, doc_type: DocumentType) -> Result<Vec<Document>> {
        let documents = match doc_type {
            DocumentType::Category => self.categories().await?,
            DocumentType::Tag => self.tags().await?,
            DocumentType::Wall => self.walls().await?,
            DocumentType::Block => self.blocks().await?,
            DocumentType::Program => self.programs().await?,
            DocumentType::Episode => self.episodes().await?,
            DocumentType::Media => self.medias().await?,
        };
        debug!(doc_type = %doc_type, records = documents.len(), "Snapshot fetched");
        Ok(documents)
    }
}

#[derive(FromRow)]
struct CategoryRow {
    uuid: String,
    name: Option<String>,
    description: Option<String>,
    parent_uuid: Option<String>,
}

impl CategoryRow {
    fn into_document(self) -> Document {
        Document::Category(Category {
            id: self.uuid,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            parent_id: self.parent_uuid.unwrap_or_default(),
        })
    }
}

/// Shared row shape for tag, wall, and program tables
#[derive(FromRow)]
struct NamedRow {
    uuid: String,
    name: Option<String>,
    description: Option<String>,
}

impl NamedRow {
    fn into_tag(self) -> Document {
        Document::Tag(Tag {
            id: self.uuid,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }

    fn into_wall(self) -> Document {
        Document::Wall(Wall {
            id: self.uuid,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }

    fn into_program(self) -> Document {
        Document::Program(Program {
            id: self.uuid,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }
}

#[derive(FromRow)]
struct BlockRow {
    uuid: String,
    name: Option<String>,
    description: Option<String>,
    kind: Option<String>,
}

impl BlockRow {
    fn into_document(self) -> Document {
        Document::Block(Block {
            id: self.uuid,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
        })
    }
}

#[derive(FromRow)]
struct EpisodeRow {
    uuid: String,
    name: Option<String>,
    description: Option<String>,
    position: i32,
    program_uuid: Option<String>,
}

impl EpisodeRow {
    fn into_document(self) -> Document {
        Document::Episode(Episode {
            id: self.uuid,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            position: self.position,
            program_id: self.program_uuid.unwrap_or_default(),
        })
    }
}

#[derive(FromRow)]
struct MediaRow {
    uuid: String,
    direct_link: Option<String>,
    kind: Option<String>,
    episode_uuid: Option<String>,
}

impl MediaRow {
    fn into_document(self) -> Document {
        Document::Media(Media {
            id: self.uuid,
            direct_link: self.direct_link.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            episode_id: self.episode_uuid.unwrap_or_default(),
        })
    }
}
