mod helpers;

use anyhow::Result;
use centerview::application::CommentPanel;
use centerview::domain::{messages, CommentError};
use helpers::{payloads, user, StubServer, TestSession};

#[test]
fn given_full_collection_when_loading_then_keeps_only_center_comments() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    let session = TestSession::anonymous()?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);

    // Act
    let count = panel.load()?;

    // Assert
    assert_eq!(count, 3);
    assert!(panel.comments().iter().all(|c| c.center_id == Some(42)));
    assert!(!panel.is_loading());
    assert_eq!(panel.error(), None);
    Ok(())
}

#[test]
fn given_signed_in_user_when_creating_then_posts_and_adds_entry() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, r#"{"data":[]}"#);
    server.route(
        "POST",
        "/comments",
        201,
        r#"{"data":{"id":99,"text":"Good course","star":4,"centerId":42}}"#,
    );
    let session = TestSession::signed_in("tok-7", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    // Act
    panel.set_draft_text("Good course");
    panel.click_draft_star(4);
    let created = panel.submit_new()?;

    // Assert
    assert_eq!(created.id, 99);
    assert_eq!(created.author_id(), Some(7));
    assert_eq!(panel.comments().len(), 1);
    assert_eq!(panel.draft().text, "");
    let post = &server.requests_with_method("POST")[0];
    assert_eq!(
        post.json(),
        serde_json::json!({"text": "Good course", "star": 4, "centerId": 42})
    );
    assert_eq!(post.authorization.as_deref(), Some("Bearer tok-7"));
    Ok(())
}

#[test]
fn given_expired_token_when_deleting_then_session_file_is_cleared() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    server.route("DELETE", "/comments/1", 401, r#"{"message":"jwt expired"}"#);
    let session = TestSession::signed_in("expired", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    // Act
    let result = panel.delete(1);

    // Assert
    assert_eq!(result, Err(CommentError::SessionExpired));
    assert_eq!(panel.error(), Some(messages::SESSION_EXPIRED));
    assert!(!panel.is_authenticated());
    assert!(!session.path.exists());
    assert_eq!(panel.comments().len(), 3, "list untouched on failure");
    Ok(())
}

#[test]
fn given_own_comment_when_editing_then_puts_update_and_replaces_entry() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    server.route(
        "PUT",
        "/comments/1",
        200,
        r#"{"data":{"id":1,"centerId":42,"text":"Juda zo'r","star":4}}"#,
    );
    let session = TestSession::signed_in("tok-7", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    // Act
    panel.begin_edit(1)?;
    panel.set_edit_text("Juda zo'r");
    panel.click_edit_star(4);
    let updated = panel.submit_edit()?;

    // Assert
    assert_eq!(updated.text, "Juda zo'r");
    assert_eq!(updated.author_name(), "Ali Valiyev", "previous author kept");
    assert!(panel.editing().is_none());
    assert_eq!(panel.comments().iter().filter(|c| c.id == 1).count(), 1);
    let put = &server.requests_with_method("PUT")[0];
    assert_eq!(put.json(), serde_json::json!({"text": "Juda zo'r", "star": 4}));
    Ok(())
}

#[test]
fn given_token_without_user_when_deleting_then_no_request_is_sent() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    let session = TestSession::with_token_only("tok")?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    // Act
    let result = panel.delete(1);

    // Assert
    assert_eq!(result, Err(CommentError::MissingIdentity));
    assert!(server.requests_with_method("DELETE").is_empty());
    assert_eq!(panel.comments().len(), 3);
    Ok(())
}

#[test]
fn given_someone_elses_comment_when_deleting_then_no_request_is_sent() -> Result<()> {
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    let session = TestSession::signed_in("tok-7", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    let result = panel.delete(2);

    assert!(matches!(result, Err(CommentError::NotOwner { id: 2, .. })));
    assert!(server.requests_with_method("DELETE").is_empty());
    Ok(())
}

#[test]
fn given_create_response_without_data_when_creating_then_reloads_list() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    server.route("POST", "/comments", 201, r#"{"message":"created"}"#);
    let session = TestSession::signed_in("tok-7", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    // Act
    panel.set_draft_text("Yangi izoh");
    let result = panel.submit_new();

    // Assert
    assert!(matches!(result, Err(CommentError::StalePayload(_))));
    assert_eq!(panel.error(), Some(messages::CREATED_BUT_STALE));
    assert_eq!(server.requests_with_method("GET").len(), 2);
    Ok(())
}

#[test]
fn given_create_payload_with_string_id_when_creating_then_reloads_instead_of_failing() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    server.route(
        "POST",
        "/comments",
        201,
        r#"{"data":{"id":"99","centerId":42,"text":"Good course","star":4}}"#,
    );
    let session = TestSession::signed_in("tok-7", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;

    // Act
    panel.set_draft_text("Good course");
    let result = panel.submit_new();

    // Assert
    assert!(matches!(result, Err(CommentError::StalePayload(_))));
    assert_eq!(panel.error(), Some(messages::CREATED_BUT_STALE));
    assert_eq!(panel.draft().text, "", "draft cleared so a retry cannot duplicate");
    assert_eq!(server.requests_with_method("GET").len(), 2);
    Ok(())
}

#[test]
fn given_edit_payload_with_null_text_when_editing_then_reloads_and_closes_form() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/comments", 200, payloads::COMMENTS);
    server.route(
        "PUT",
        "/comments/1",
        200,
        r#"{"data":{"id":1,"text":null,"star":3}}"#,
    );
    let session = TestSession::signed_in("tok-7", &user(7, "Ali"))?;
    let mut panel = CommentPanel::new(server.api(), session.open(), 42);
    panel.load()?;
    panel.begin_edit(1)?;

    // Act
    let result = panel.submit_edit();

    // Assert
    assert!(matches!(result, Err(CommentError::StalePayload(_))));
    assert_eq!(panel.error(), Some(messages::EDITED_BUT_STALE));
    assert!(panel.editing().is_none());
    assert_eq!(server.requests_with_method("GET").len(), 2);
    Ok(())
}
