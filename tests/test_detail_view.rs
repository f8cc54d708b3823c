mod helpers;

use anyhow::Result;
use centerview::application::{DetailState, DetailView};
use centerview::domain::{messages, DetailError};
use centerview::ports::HtmlPresenter;
use helpers::{payloads, StubServer, TestSession};

#[test]
fn given_existing_center_when_loading_then_state_is_loaded() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/centers/42", 200, payloads::CENTER_42);
    let session = TestSession::anonymous()?;
    let mut detail = DetailView::new(server.api(), session.open());

    // Act
    let center = detail.load(42)?;

    // Assert
    assert_eq!(center.name, "Najot Ta'lim");
    assert!(matches!(detail.state(), DetailState::Loaded(_)));
    assert_eq!(server.requests()[0].path, "/api/centers/42");
    Ok(())
}

#[test]
fn given_null_data_when_loading_then_not_found_and_no_sections_rendered() -> Result<()> {
    // Arrange
    let server = StubServer::start()?;
    server.route("GET", "/centers/42", 200, payloads::CENTER_NULL_DATA);
    let session = TestSession::anonymous()?;
    let mut detail = DetailView::new(server.api(), session.open());

    // Act
    let result = detail.load(42).map(|c| c.name.clone());
    let html = HtmlPresenter::new().render(detail.state(), detail.sections(), None);

    // Assert
    assert_eq!(result, Err(DetailError::NotFound));
    assert!(html.contains(messages::CENTER_NOT_FOUND));
    assert!(!html.contains("data-section"));
    assert!(detail.comment_panel(server.api()).is_none());
    Ok(())
}

#[test]
fn given_server_failure_when_loading_then_load_failed_message() -> Result<()> {
    let server = StubServer::start()?;
    server.route("GET", "/centers/42", 500, r#"{"message":"boom"}"#);
    let session = TestSession::anonymous()?;
    let mut detail = DetailView::new(server.api(), session.open());

    let result = detail.load(42).map(|c| c.name.clone());

    assert_eq!(result, Err(DetailError::LoadFailed));
    assert_eq!(
        detail.state(),
        &DetailState::Failed(DetailError::LoadFailed)
    );
    assert_eq!(DetailError::LoadFailed.to_string(), messages::CENTER_LOAD_FAILED);
    Ok(())
}

#[test]
fn given_same_center_when_loading_twice_then_fetches_once() -> Result<()> {
    let server = StubServer::start()?;
    server.route("GET", "/centers/42", 200, payloads::CENTER_42);
    let session = TestSession::anonymous()?;
    let mut detail = DetailView::new(server.api(), session.open());

    detail.load(42)?;
    detail.load(42)?;

    assert_eq!(server.requests().len(), 1);
    Ok(())
}

#[test]
fn given_loaded_center_when_mounting_panel_then_panel_targets_center() -> Result<()> {
    let server = StubServer::start()?;
    server.route("GET", "/centers/42", 200, payloads::CENTER_42);
    let session = TestSession::anonymous()?;
    let mut detail = DetailView::new(server.api(), session.open());
    detail.load(42)?;

    let panel = detail.comment_panel(server.api()).expect("panel mounted");

    assert_eq!(panel.center_id(), 42);
    assert!(panel.is_loading(), "panel starts in loading state");
    Ok(())
}
