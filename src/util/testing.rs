// src/util/testing.rs

use anyhow::Result;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::env;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CenterApi, CommentApi, SessionStore, StoredSession};
use crate::domain::{
    ApiError, Center, Comment, CommentAuthor, CommentUpdate, Course, DomainError, Identity,
    NewComment, ScheduleEntry,
};

pub fn identity(id: i64) -> Identity {
    Identity {
        id,
        first_name: Some(format!("User{id}")),
        last_name: Some("Test".to_string()),
    }
}

pub fn sample_center(id: i64) -> Center {
    Center {
        id: Some(id),
        name: format!("Center {id}"),
        image: Some(format!("center-{id}.png")),
        address: Some("Toshkent, Chilonzor".to_string()),
        phone: Some("+998 71 200 00 00".to_string()),
        description: Some("IT va til kurslari".to_string()),
        courses: vec![Course {
            name: "Rust".to_string(),
            description: Some("Tizim dasturlash".to_string()),
            price: Some("500000".to_string()),
        }],
        schedule: vec![ScheduleEntry {
            course: "Rust".to_string(),
            day: "Dushanba".to_string(),
            time: "18:00".to_string(),
        }],
        facilities: vec!["Wi-Fi".to_string(), "Kutubxona".to_string()],
    }
}

pub fn sample_comment(id: i64, center_id: i64, author_id: i64) -> Comment {
    Comment {
        id,
        center_id: Some(center_id),
        text: format!("Comment {id}"),
        star: 4,
        user: Some(CommentAuthor::from(&identity(author_id))),
        created_at: Some("2024-03-05T10:15:00.000Z".to_string()),
    }
}

/// In-memory stand-in for the browser's local storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    state: StoredSession,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.state.token = Some(token.to_string());
        self
    }

    pub fn with_user(mut self, identity: &Identity) -> Self {
        self.state.user = Some(identity.to_stored());
        self
    }

    pub fn with_raw_user(mut self, raw: &str) -> Self {
        self.state.user = Some(raw.to_string());
        self
    }

    pub fn snapshot(&self) -> StoredSession {
        self.state.clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredSession, DomainError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, session: &StoredSession) -> Result<(), DomainError> {
        self.state = session.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DomainError> {
        self.state = StoredSession::default();
        Ok(())
    }
}

enum CenterBehavior {
    Found(Center),
    EmptyPayload,
    Fail(ApiError),
}

/// Shared mock for use cases that depend on CenterApi
///
/// # Examples
///
/// ```
/// use centerview::util::testing::{sample_center, MockCenterApi};
///
/// let api = MockCenterApi::builder()
///     .with_center(sample_center(42))
///     .with_empty_payload(43)
///     .build();
/// ```
pub struct MockCenterApi {
    behaviors: HashMap<i64, CenterBehavior>,
    requests: Rc<RefCell<Vec<i64>>>,
}

impl MockCenterApi {
    pub fn builder() -> MockCenterApiBuilder {
        MockCenterApiBuilder::new()
    }

    /// Ids requested so far, shared with the mock after it is moved into a view.
    pub fn request_log(&self) -> Rc<RefCell<Vec<i64>>> {
        Rc::clone(&self.requests)
    }
}

impl CenterApi for MockCenterApi {
    fn get_center(&mut self, id: i64) -> Result<Option<Center>, ApiError> {
        self.requests.borrow_mut().push(id);
        match self.behaviors.get(&id) {
            Some(CenterBehavior::Found(center)) => Ok(Some(center.clone())),
            Some(CenterBehavior::EmptyPayload) | None => Ok(None),
            Some(CenterBehavior::Fail(e)) => Err(e.clone()),
        }
    }
}

pub struct MockCenterApiBuilder {
    behaviors: HashMap<i64, CenterBehavior>,
}

impl MockCenterApiBuilder {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
        }
    }

    /// Serve a center under its own id
    pub fn with_center(mut self, center: Center) -> Self {
        let id = center.id.unwrap_or_default();
        self.behaviors.insert(id, CenterBehavior::Found(center));
        self
    }

    /// Answer with `{"data": null}`
    pub fn with_empty_payload(mut self, id: i64) -> Self {
        self.behaviors.insert(id, CenterBehavior::EmptyPayload);
        self
    }

    pub fn with_error(mut self, id: i64, error: ApiError) -> Self {
        self.behaviors.insert(id, CenterBehavior::Fail(error));
        self
    }

    pub fn build(self) -> MockCenterApi {
        MockCenterApi {
            behaviors: self.behaviors,
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Default for MockCenterApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One request as seen by MockCommentApi
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List { token: Option<String> },
    Create { token: String, body: NewComment },
    Update { token: String, id: i64, body: CommentUpdate },
    Delete { token: String, id: i64 },
}

pub type CallLog = Rc<RefCell<Vec<ApiCall>>>;

/// Shared mock for use cases that depend on CommentApi
///
/// Lists return the configured collection; create, update and delete
/// answer with queued responses, falling back to echoing the request.
pub struct MockCommentApi {
    comments: Option<Vec<Comment>>,
    list_error: Option<ApiError>,
    create_responses: VecDeque<Result<Option<Comment>, ApiError>>,
    update_responses: VecDeque<Result<Option<Comment>, ApiError>>,
    delete_responses: VecDeque<Result<(), ApiError>>,
    next_failure: Option<ApiError>,
    calls: CallLog,
    next_id: i64,
}

impl MockCommentApi {
    pub fn builder() -> MockCommentApiBuilder {
        MockCommentApiBuilder::new()
    }

    pub fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    /// Make the next request of any kind fail with `error`
    pub fn fail_next_with(&mut self, error: ApiError) {
        self.next_failure = Some(error);
    }

    fn take_failure(&mut self) -> Result<(), ApiError> {
        match self.next_failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl CommentApi for MockCommentApi {
    fn list_comments(&mut self, token: Option<&str>) -> Result<Option<Vec<Comment>>, ApiError> {
        self.calls.borrow_mut().push(ApiCall::List {
            token: token.map(str::to_owned),
        });
        self.take_failure()?;
        if let Some(e) = &self.list_error {
            return Err(e.clone());
        }
        Ok(self.comments.clone())
    }

    fn create_comment(
        &mut self,
        token: &str,
        comment: &NewComment,
    ) -> Result<Option<Comment>, ApiError> {
        self.calls.borrow_mut().push(ApiCall::Create {
            token: token.to_string(),
            body: comment.clone(),
        });
        self.take_failure()?;
        if let Some(response) = self.create_responses.pop_front() {
            return response;
        }
        self.next_id += 1;
        Ok(Some(Comment {
            id: self.next_id,
            center_id: Some(comment.center_id),
            text: comment.text.clone(),
            star: comment.star,
            user: None,
            created_at: None,
        }))
    }

    fn update_comment(
        &mut self,
        token: &str,
        id: i64,
        update: &CommentUpdate,
    ) -> Result<Option<Comment>, ApiError> {
        self.calls.borrow_mut().push(ApiCall::Update {
            token: token.to_string(),
            id,
            body: update.clone(),
        });
        self.take_failure()?;
        if let Some(response) = self.update_responses.pop_front() {
            return response;
        }
        Ok(Some(Comment {
            id,
            center_id: None,
            text: update.text.clone(),
            star: update.star,
            user: None,
            created_at: None,
        }))
    }

    fn delete_comment(&mut self, token: &str, id: i64) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(ApiCall::Delete {
            token: token.to_string(),
            id,
        });
        self.take_failure()?;
        self.delete_responses.pop_front().unwrap_or(Ok(()))
    }
}

/// Builder for MockCommentApi
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockCommentApiBuilder {
    comments: Option<Vec<Comment>>,
    list_error: Option<ApiError>,
    create_responses: VecDeque<Result<Option<Comment>, ApiError>>,
    update_responses: VecDeque<Result<Option<Comment>, ApiError>>,
    delete_responses: VecDeque<Result<(), ApiError>>,
}

impl MockCommentApiBuilder {
    pub fn new() -> Self {
        Self {
            comments: Some(Vec::new()),
            list_error: None,
            create_responses: VecDeque::new(),
            update_responses: VecDeque::new(),
            delete_responses: VecDeque::new(),
        }
    }

    /// Full platform-wide collection returned by list_comments
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = Some(comments);
        self
    }

    /// list_comments answers 2xx without a `data` array
    pub fn with_list_payload_missing(mut self) -> Self {
        self.comments = None;
        self
    }

    pub fn with_list_error(mut self, error: ApiError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn with_create_response(mut self, response: Result<Option<Comment>, ApiError>) -> Self {
        self.create_responses.push_back(response);
        self
    }

    pub fn with_update_response(mut self, response: Result<Option<Comment>, ApiError>) -> Self {
        self.update_responses.push_back(response);
        self
    }

    pub fn with_delete_response(mut self, response: Result<(), ApiError>) -> Self {
        self.delete_responses.push_back(response);
        self
    }

    pub fn build(self) -> MockCommentApi {
        MockCommentApi {
            comments: self.comments,
            list_error: self.list_error,
            create_responses: self.create_responses,
            update_responses: self.update_responses,
            delete_responses: self.delete_responses,
            next_failure: None,
            calls: Rc::new(RefCell::new(Vec::new())),
            next_id: 1000,
        }
    }
}

impl Default for MockCommentApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["ureq", "rustls", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
