//! Docker Hub wire types and the assembled [`ImageRecord`]

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: Option<String>,
}

/// One page of `GET /v2/repositories/{namespace}`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RepositoryPage {
    pub count: Option<u64>,
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<RepositorySummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub namespace: Option<String>,
}

/// `GET /v2/repositories/{namespace}/{repository}`
///
/// Every field is optional; absent values are defaulted when the record is assembled.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RepositoryDetail {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub description: Option<String>,
    pub pull_count: Option<u64>,
    pub star_count: Option<u64>,
    pub last_updated: Option<String>,
    pub is_official: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct TagPage {
    #[serde(default)]
    pub results: Vec<TagSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TagSummary {
    pub name: Option<String>,
}

/// One page of the public product search
#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct SearchPage {
    pub summaries: Option<Vec<SearchSummary>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchSummary {
    pub publisher: Option<Publisher>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Publisher {
    pub name: Option<String>,
}

/// Metadata collected for a single repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    #[serde(rename = "Image Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Pulls")]
    pub pull_count: u64,
    #[serde(rename = "Stars Count")]
    pub star_count: u64,
    #[serde(rename = "Tags")]
    pub tags: Vec<String>,
    #[serde(rename = "By")]
    pub publisher: String,
    #[serde(rename = "Last Updated")]
    pub last_updated: Option<String>,
    #[serde(rename = "Official Status", serialize_with = "serialize_official")]
    pub official: bool,
}

impl ImageRecord {
    /// Combine a detail response and tag names, defaulting anything the registry left out
    pub fn assemble(
        namespace: &str,
        repository: &str,
        detail: RepositoryDetail,
        tags: Vec<String>,
    ) -> Self {
        Self {
            name: detail.name.unwrap_or_else(|| repository.to_string()),
            description: detail.description,
            pull_count: detail.pull_count.unwrap_or(0),
            star_count: detail.star_count.unwrap_or(0),
            tags,
            publisher: detail.namespace.unwrap_or_else(|| namespace.to_string()),
            last_updated: detail.last_updated,
            official: detail.is_official.unwrap_or(false),
        }
    }

    pub fn official_status(&self) -> &'static str {
        if self.official { "Official" } else { "Community" }
    }
}

fn serialize_official<S: Serializer>(official: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *official { "Official" } else { "Community" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_are_defaulted() {
        let detail: RepositoryDetail =
            serde_json::from_value(json!({ "name": "redis", "pull_count": 42 })).unwrap();
        let record = ImageRecord::assemble("library", "redis", detail, vec![]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Image Name"], "redis");
        assert_eq!(value["Description"], serde_json::Value::Null);
        assert_eq!(value["Pulls"], 42);
        assert_eq!(value["Stars Count"], 0);
        assert_eq!(value["By"], "library");
        assert_eq!(value["Last Updated"], serde_json::Value::Null);
        assert_eq!(value["Official Status"], "Community");
    }

    #[test]
    fn test_null_fields_are_defaulted() {
        let detail: RepositoryDetail = serde_json::from_value(json!({
            "name": null,
            "description": null,
            "star_count": null,
            "is_official": null
        }))
        .unwrap();
        let record = ImageRecord::assemble("bitnami", "nginx", detail, vec!["latest".into()]);
        assert_eq!(record.name, "nginx");
        assert_eq!(record.publisher, "bitnami");
        assert_eq!(record.star_count, 0);
        assert_eq!(record.official_status(), "Community");
    }

    #[test]
    fn test_official_and_field_order() {
        let detail = RepositoryDetail {
            name: Some("alpine".into()),
            namespace: Some("library".into()),
            description: Some("A minimal Docker image".into()),
            pull_count: Some(1_000),
            star_count: Some(10),
            last_updated: Some("2024-01-01T00:00:00Z".into()),
            is_official: Some(true),
        };
        let record = ImageRecord::assemble("library", "alpine", detail, vec!["3.19".into()]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"Image Name":"alpine","Description":"A minimal Docker image","Pulls":1000,"Stars Count":10,"Tags":["3.19"],"By":"library","Last Updated":"2024-01-01T00:00:00Z","Official Status":"Official"}"#
        );
    }
}
