// src/domain/comment.rs
use crate::domain::de::lenient_id;
use crate::domain::Identity;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub center_id: Option<i64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub star: u8,
    #[serde(default)]
    pub user: Option<CommentAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Author summary embedded in a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<&Identity> for CommentAuthor {
    fn from(identity: &Identity) -> Self {
        Self {
            id: Some(identity.id),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
        }
    }
}

impl CommentAuthor {
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Comment {
    pub fn belongs_to_center(&self, center_id: i64) -> bool {
        self.center_id == Some(center_id)
    }

    pub fn author_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.id)
    }

    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        self.author_id() == Some(identity.id)
    }

    pub fn author_name(&self) -> String {
        self.user
            .as_ref()
            .map(CommentAuthor::display_name)
            .unwrap_or_default()
    }

    /// Creation date as `dd.mm.yyyy`; unparseable timestamps are returned as sent.
    pub fn created_date(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.format("%d.%m.%Y").to_string());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d") {
            return Some(date.format("%d.%m.%Y").to_string());
        }
        Some(raw.to_string())
    }
}

/// POST body for a new comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub text: String,
    pub star: u8,
    pub center_id: i64,
}

/// PUT body for an edited comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentUpdate {
    pub text: String,
    pub star: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_string_center_id_when_deserializing_then_coerces_to_integer() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1, "centerId": "42", "text": "Zo'r", "star": 5
        }))
        .expect("valid comment");

        assert!(comment.belongs_to_center(42));
        assert!(comment.user.is_none());
    }

    #[test]
    fn given_new_comment_when_serializing_then_uses_camel_case_keys() {
        let body = NewComment {
            text: "Good course".to_string(),
            star: 4,
            center_id: 42,
        };

        let value = serde_json::to_value(&body).expect("serializable");

        assert_eq!(value, json!({"text": "Good course", "star": 4, "centerId": 42}));
    }

    #[test]
    fn given_rfc3339_timestamp_when_formatting_then_returns_day_month_year() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1, "createdAt": "2024-03-05T10:15:00.000Z"
        }))
        .expect("valid comment");

        assert_eq!(comment.created_date().as_deref(), Some("05.03.2024"));
    }

    #[test]
    fn given_garbage_timestamp_when_formatting_then_returns_raw_value() {
        let comment: Comment =
            serde_json::from_value(json!({"id": 1, "createdAt": "kecha"})).expect("valid comment");

        assert_eq!(comment.created_date().as_deref(), Some("kecha"));
    }

    #[test]
    fn given_author_with_missing_last_name_when_displaying_then_joins_present_parts() {
        let author = CommentAuthor {
            id: Some(7),
            first_name: Some("Ali".to_string()),
            last_name: None,
        };
        assert_eq!(author.display_name(), "Ali");
    }
}
