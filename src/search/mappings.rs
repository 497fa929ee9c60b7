//! Per-type index settings and field mappings
//!
//! Mappings are `dynamic: false`: only the mapped projection fields are
//! indexed, anything else in a document is stored but not searchable.

use serde_json::{json, Value};

use crate::config::IndexingConfig;
use crate::models::DocumentType;

/// Build the index-creation body for one document type
pub fn index_body(doc_type: DocumentType, settings: &IndexingConfig) -> Value {
    json!({
        "settings": {
            "index": {
                "refresh_interval": format!("{}s", settings.refresh_interval_secs),
                "number_of_shards": settings.number_of_shards.to_string(),
                "number_of_replicas": settings.number_of_replicas.to_string(),
                "mapping.nested_fields.limit": settings.nested_fields_limit,
            }
        },
        "mappings": {
            "dynamic": false,
            "properties": properties(doc_type),
        }
    })
}

fn properties(doc_type: DocumentType) -> Value {
    match doc_type {
        DocumentType::Category => json!({
            "ID": { "type": "keyword" },
            "Name": { "type": "text" },
            "Description": { "type": "text" },
            "ParentUUID": { "type": "keyword" },
        }),
        DocumentType::Tag | DocumentType::Wall | DocumentType::Program => json!({
            "ID": { "type": "keyword" },
            "Name": { "type": "text" },
            "Description": { "type": "text" },
        }),
        DocumentType::Block => json!({
            "ID": { "type": "keyword" },
            "Name": { "type": "text" },
            "Description": { "type": "text" },
            "Kind": { "type": "keyword" },
        }),
        DocumentType::Episode => json!({
            "ID": { "type": "keyword" },
            "Name": { "type": "text" },
            "Description": { "type": "text" },
            "Position": { "type": "integer" },
            "ProgramID": { "type": "keyword" },
        }),
        DocumentType::Media => json!({
            "ID": { "type": "keyword" },
            "DirectLink": { "type": "text" },
            "Kind": { "type": "keyword" },
            "EpisodeID": { "type": "keyword" },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn test_settings() -> IndexingConfig {
        IndexingConfig {
            bulk_retry_attempts: 5,
            bulk_retry_backoff_secs: 5,
            refresh_interval_secs: 10,
            number_of_shards: 1,
            number_of_replicas: 5,
            nested_fields_limit: 200,
        }
    }

    #[test]
    fn test_settings_rendered() {
        let body = index_body(DocumentType::Tag, &test_settings());
        let index = &body["settings"]["index"];
        assert_eq!(index["refresh_interval"], "10s");
        assert_eq!(index["number_of_shards"], "1");
        assert_eq!(index["number_of_replicas"], "5");
        assert_eq!(index["mapping.nested_fields.limit"], 200);
        assert_eq!(body["mappings"]["dynamic"], false);
    }

    #[test]
    fn test_every_type_maps_id_as_keyword() {
        let settings = test_settings();
        for doc_type in DocumentType::iter() {
            let body = index_body(doc_type, &settings);
            assert_eq!(
                body["mappings"]["properties"]["ID"]["type"], "keyword",
                "missing ID keyword mapping for {doc_type}"
            );
        }
    }

    #[test]
    fn test_relational_links_mapped() {
        let settings = test_settings();

        let episode = index_body(DocumentType::Episode, &settings);
        assert_eq!(
            episode["mappings"]["properties"]["ProgramID"]["type"],
            "keyword"
        );
        assert_eq!(
            episode["mappings"]["properties"]["Position"]["type"],
            "integer"
        );

        let media = index_body(DocumentType::Media, &settings);
        assert_eq!(
            media["mappings"]["properties"]["EpisodeID"]["type"],
            "keyword"
        );

        let category = index_body(DocumentType::Category, &settings);
        assert_eq!(
            category["mappings"]["properties"]["ParentUUID"]["type"],
            "keyword"
        );
    }
}
