// src/domain/identity.rs
use crate::domain::de::lenient_id;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Snapshot of the logged-in user as cached next to the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<i64>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl Identity {
    /// Parse the serialized `user` entry. A record without a usable id is
    /// treated as absent; id `0` counts as unusable.
    pub fn from_stored(raw: &str) -> Option<Identity> {
        let stored: StoredUser = match serde_json::from_str(raw) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Stored user data could not be parsed");
                return None;
            }
        };
        match stored.id {
            Some(id) if id != 0 => Some(Identity {
                id,
                first_name: stored.first_name,
                last_name: stored.last_name,
            }),
            _ => {
                warn!("Stored user data has no id");
                None
            }
        }
    }

    pub fn to_stored(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
        })
        .to_string()
    }
}
