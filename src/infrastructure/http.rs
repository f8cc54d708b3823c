// src/infrastructure/http.rs
use crate::application::{CenterApi, CommentApi};
use crate::domain::{ApiError, Center, Comment, CommentUpdate, NewComment};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

/// Blocking client for the platform REST API.
///
/// No retries and no timeouts; every call is a single request.
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: ureq::Request, token: Option<&str>) -> ureq::Request {
        match token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }
}

/// Map a failed exchange onto the shared taxonomy.
pub fn classify(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(401, _) => ApiError::Unauthorized,
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned));
            ApiError::Server { status, message }
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

fn read_body(response: ureq::Response) -> Result<Value, ApiError> {
    let body = response.into_string().map_err(|e| ApiError::Transport(e.to_string()))?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| ApiError::MalformedPayload(e.to_string()))
}

/// Extract `data` from an `{ "data": ... }` envelope. Absent or `null` data is `None`.
pub fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<Option<T>, ApiError> {
    match body.get("data") {
        None | Some(Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data.clone())
            .map(Some)
            .map_err(|e| ApiError::MalformedPayload(e.to_string())),
    }
}

impl CenterApi for HttpApi {
    #[instrument(level = "debug", skip(self))]
    fn get_center(&mut self, id: i64) -> Result<Option<Center>, ApiError> {
        let url = self.url(&format!("/centers/{}", id));
        let response = self.agent.get(&url).call().map_err(classify)?;
        let body = read_body(response)?;
        trace!(?body, "Center response");
        unwrap_data(body)
    }
}

impl CommentApi for HttpApi {
    #[instrument(level = "debug", skip(self, token))]
    fn list_comments(&mut self, token: Option<&str>) -> Result<Option<Vec<Comment>>, ApiError> {
        let url = self.url("/comments");
        let request = self.authorized(self.agent.get(&url), token);
        let body = read_body(request.call().map_err(classify)?)?;

        // Anything but an array under `data` counts as a missing payload.
        match body.get("data") {
            Some(Value::Array(items)) => {
                let mut comments = Vec::with_capacity(items.len());
                for item in items {
                    match serde_json::from_value::<Comment>(item.clone()) {
                        Ok(comment) => comments.push(comment),
                        Err(e) => warn!(error = %e, "Skipping malformed comment"),
                    }
                }
                debug!(count = comments.len(), "Comments fetched");
                Ok(Some(comments))
            }
            _ => Ok(None),
        }
    }

    #[instrument(level = "debug", skip(self, token))]
    fn create_comment(
        &mut self,
        token: &str,
        comment: &NewComment,
    ) -> Result<Option<Comment>, ApiError> {
        let url = self.url("/comments");
        let payload =
            serde_json::to_value(comment).map_err(|e| ApiError::MalformedPayload(e.to_string()))?;
        let response = self
            .authorized(self.agent.post(&url), Some(token))
            .set("Content-Type", "application/json")
            .send_json(payload)
            .map_err(classify)?;
        unwrap_data(read_body(response)?)
    }

    #[instrument(level = "debug", skip(self, token))]
    fn update_comment(
        &mut self,
        token: &str,
        id: i64,
        update: &CommentUpdate,
    ) -> Result<Option<Comment>, ApiError> {
        let url = self.url(&format!("/comments/{}", id));
        let payload =
            serde_json::to_value(update).map_err(|e| ApiError::MalformedPayload(e.to_string()))?;
        let response = self
            .authorized(self.agent.put(&url), Some(token))
            .send_json(payload)
            .map_err(classify)?;
        unwrap_data(read_body(response)?)
    }

    #[instrument(level = "debug", skip(self, token))]
    fn delete_comment(&mut self, token: &str, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/comments/{}", id));
        self.authorized(self.agent.delete(&url), Some(token))
            .call()
            .map_err(classify)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(status: u16, body: &str) -> ureq::Error {
        let response = ureq::Response::new(status, "Status", body).expect("valid response");
        ureq::Error::Status(status, response)
    }

    #[test]
    fn given_401_when_classifying_then_unauthorized() {
        assert_eq!(classify(status_error(401, "{}")), ApiError::Unauthorized);
    }

    #[test]
    fn given_error_body_with_message_when_classifying_then_keeps_message() {
        let error = classify(status_error(400, r#"{"message":"Matn kerak"}"#));

        assert_eq!(
            error,
            ApiError::Server {
                status: 400,
                message: Some("Matn kerak".to_string())
            }
        );
    }

    #[test]
    fn given_non_json_error_body_when_classifying_then_no_message() {
        let error = classify(status_error(502, "<html>Bad Gateway</html>"));

        assert_eq!(
            error,
            ApiError::Server {
                status: 502,
                message: None
            }
        );
    }

    #[test]
    fn given_null_data_when_unwrapping_then_none() {
        let result: Result<Option<Center>, ApiError> = unwrap_data(json!({"data": null}));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn given_missing_data_when_unwrapping_then_none() {
        let result: Result<Option<Center>, ApiError> = unwrap_data(json!({"message": "ok"}));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn given_wrong_shape_when_unwrapping_then_malformed() {
        let result: Result<Option<Comment>, ApiError> = unwrap_data(json!({"data": "oops"}));
        assert!(matches!(result, Err(ApiError::MalformedPayload(_))));
    }

    #[test]
    fn given_trailing_slash_when_creating_client_then_trims_base_url() {
        let api = HttpApi::new("https://findcourse.net.uz/api/");
        assert_eq!(api.url("/comments"), "https://findcourse.net.uz/api/comments");
    }
}
