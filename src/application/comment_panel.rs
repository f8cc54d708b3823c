// src/application/comment_panel.rs
use crate::application::session::{SessionStore, SharedSession};
use crate::domain::{
    ApiError, Comment, CommentAuthor, CommentError, CommentUpdate, Identity, NewComment,
    Operation, Rating, StarRow,
};
use tracing::{debug, info, instrument, warn};

/// Comment endpoints of the platform API.
///
/// Methods returning `Ok(None)` received a 2xx response whose body lacked
/// the expected `data` payload.
pub trait CommentApi {
    /// Fetch every comment on the platform; there is no per-center filter.
    fn list_comments(&mut self, token: Option<&str>) -> Result<Option<Vec<Comment>>, ApiError>;

    fn create_comment(
        &mut self,
        token: &str,
        comment: &NewComment,
    ) -> Result<Option<Comment>, ApiError>;

    fn update_comment(
        &mut self,
        token: &str,
        id: i64,
        update: &CommentUpdate,
    ) -> Result<Option<Comment>, ApiError>;

    fn delete_comment(&mut self, token: &str, id: i64) -> Result<(), ApiError>;
}

/// Pending text and rating of the compose form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub text: String,
    pub rating: Rating,
}

/// The single comment currently being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub comment_id: i64,
    pub text: String,
    pub rating: Rating,
}

/// Read-only snapshot handed to the presenter.
#[derive(Debug)]
pub struct CommentPanelView<'a> {
    pub comments: &'a [Comment],
    pub loading: bool,
    pub error: Option<&'a str>,
    pub authenticated: bool,
    pub identity: Option<Identity>,
    pub draft: &'a Draft,
    pub editing: Option<&'a EditState>,
}

impl CommentPanelView<'_> {
    /// Edit and delete controls are only offered on the user's own comments.
    pub fn can_modify(&self, comment: &Comment) -> bool {
        self.authenticated
            && self
                .identity
                .as_ref()
                .is_some_and(|identity| comment.is_owned_by(identity))
    }
}

pub struct CommentPanel<A: CommentApi, S: SessionStore> {
    api: A,
    session: SharedSession<S>,
    center_id: i64,
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
    draft: Draft,
    editing: Option<EditState>,
}

impl<A: CommentApi, S: SessionStore> CommentPanel<A, S> {
    pub fn new(api: A, session: SharedSession<S>, center_id: i64) -> Self {
        Self {
            api,
            session,
            center_id,
            comments: Vec::new(),
            loading: true,
            error: None,
            draft: Draft::default(),
            editing: None,
        }
    }

    pub fn center_id(&self) -> i64 {
        self.center_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn view(&self) -> CommentPanelView<'_> {
        let session = self.session.borrow();
        CommentPanelView {
            comments: &self.comments,
            loading: self.loading,
            error: self.error.as_deref(),
            authenticated: session.is_authenticated(),
            identity: session.identity().cloned(),
            draft: &self.draft,
            editing: self.editing.as_ref(),
        }
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn draft_stars(&self) -> StarRow {
        StarRow::interactive(self.draft.rating)
    }

    pub fn click_draft_star(&mut self, star: u8) {
        if let Some(rating) = self.draft_stars().click(star) {
            self.draft.rating = rating;
        }
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some(editing) = self.editing.as_mut() {
            editing.text = text.into();
        }
    }

    pub fn click_edit_star(&mut self, star: u8) {
        if let Some(editing) = self.editing.as_mut() {
            if let Some(rating) = StarRow::interactive(editing.rating).click(star) {
                editing.rating = rating;
            }
        }
    }

    /// Replace the list with the server's comments for this center.
    #[instrument(level = "debug", skip(self), fields(center_id = self.center_id))]
    pub fn load(&mut self) -> Result<usize, CommentError> {
        self.loading = true;
        self.error = None;
        let result = self.fetch_filtered();
        self.loading = false;
        self.settle(result)
    }

    /// Post the compose form.
    #[instrument(level = "debug", skip(self), fields(center_id = self.center_id))]
    pub fn submit_new(&mut self) -> Result<Comment, CommentError> {
        let result = self.create();
        self.settle(result)
    }

    /// Enter edit mode for one of the user's own comments, leaving any other.
    pub fn begin_edit(&mut self, comment_id: i64) -> Result<(), CommentError> {
        let result = self.prepare_edit(comment_id);
        self.settle(result)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    #[instrument(level = "debug", skip(self), fields(center_id = self.center_id))]
    pub fn submit_edit(&mut self) -> Result<Comment, CommentError> {
        let result = self.update();
        self.settle(result)
    }

    #[instrument(level = "debug", skip(self), fields(center_id = self.center_id))]
    pub fn delete(&mut self, comment_id: i64) -> Result<(), CommentError> {
        let result = self.remove(comment_id);
        self.settle(result)
    }

    fn fetch_filtered(&mut self) -> Result<usize, CommentError> {
        let token = self.session.borrow().token().map(str::to_owned);
        match self.api.list_comments(token.as_deref()) {
            Ok(Some(all)) => {
                let total = all.len();
                let center_id = self.center_id;
                self.comments = all
                    .into_iter()
                    .filter(|c| c.belongs_to_center(center_id))
                    .collect();
                debug!(total, kept = self.comments.len(), "Comments filtered by center");
                Ok(self.comments.len())
            }
            Ok(None) => {
                warn!("Comment list response had no data array");
                self.comments.clear();
                Ok(0)
            }
            Err(e) => Err(self.on_api_error(Operation::Load, e)),
        }
    }

    fn create(&mut self) -> Result<Comment, CommentError> {
        if self.draft.text.trim().is_empty() {
            return Err(CommentError::EmptyText);
        }
        let (token, identity) = self.require_author(Operation::Create)?;

        let body = NewComment {
            text: self.draft.text.clone(),
            star: self.draft.rating.value(),
            center_id: self.center_id,
        };
        match self.api.create_comment(&token, &body) {
            Ok(Some(mut created)) => {
                if created.user.is_none() {
                    created.user = Some(CommentAuthor::from(&identity));
                }
                created.center_id.get_or_insert(self.center_id);
                self.upsert(created.clone());
                self.draft = Draft::default();
                info!(comment_id = created.id, "Comment created");
                Ok(created)
            }
            Ok(None) => {
                warn!("Create response had no comment payload, reloading");
                self.draft = Draft::default();
                self.reload_after_stale_payload();
                Err(CommentError::StalePayload(Operation::Create))
            }
            Err(ApiError::MalformedPayload(reason)) => {
                warn!(%reason, "Create response payload unreadable, reloading");
                self.draft = Draft::default();
                self.reload_after_stale_payload();
                Err(CommentError::StalePayload(Operation::Create))
            }
            Err(e) => Err(self.on_api_error(Operation::Create, e)),
        }
    }

    fn prepare_edit(&mut self, comment_id: i64) -> Result<(), CommentError> {
        let (_, identity) = self.require_author(Operation::Edit)?;
        let editing = {
            let comment = self.find_owned(Operation::Edit, comment_id, &identity)?;
            EditState {
                comment_id,
                text: comment.text.clone(),
                rating: Rating::clamped(comment.star),
            }
        };
        self.editing = Some(editing);
        Ok(())
    }

    fn update(&mut self) -> Result<Comment, CommentError> {
        let editing = self.editing.clone().ok_or(CommentError::NotEditing)?;
        if editing.text.trim().is_empty() {
            return Err(CommentError::EmptyText);
        }
        let (token, identity) = self.require_author(Operation::Edit)?;

        let update = CommentUpdate {
            text: editing.text.clone(),
            star: editing.rating.value(),
        };
        match self.api.update_comment(&token, editing.comment_id, &update) {
            Ok(Some(mut updated)) => {
                let previous = self.comments.iter().find(|c| c.id == editing.comment_id);
                if updated.user.is_none() {
                    updated.user = previous
                        .and_then(|c| c.user.clone())
                        .or_else(|| Some(CommentAuthor::from(&identity)));
                }
                if updated.center_id.is_none() {
                    updated.center_id = previous.and_then(|c| c.center_id).or(Some(self.center_id));
                }
                self.replace(editing.comment_id, updated.clone());
                self.editing = None;
                info!(comment_id = updated.id, "Comment edited");
                Ok(updated)
            }
            Ok(None) => {
                warn!(comment_id = editing.comment_id, "Edit response had no comment payload, reloading");
                self.editing = None;
                self.reload_after_stale_payload();
                Err(CommentError::StalePayload(Operation::Edit))
            }
            Err(ApiError::MalformedPayload(reason)) => {
                warn!(comment_id = editing.comment_id, %reason, "Edit response payload unreadable, reloading");
                self.editing = None;
                self.reload_after_stale_payload();
                Err(CommentError::StalePayload(Operation::Edit))
            }
            Err(e) => Err(self.on_api_error(Operation::Edit, e)),
        }
    }

    fn remove(&mut self, comment_id: i64) -> Result<(), CommentError> {
        let (token, identity) = self.require_author(Operation::Delete)?;
        self.find_owned(Operation::Delete, comment_id, &identity)?;

        if let Err(e) = self.api.delete_comment(&token, comment_id) {
            return Err(self.on_api_error(Operation::Delete, e));
        }
        self.comments.retain(|c| c.id != comment_id);
        if self.editing.as_ref().is_some_and(|e| e.comment_id == comment_id) {
            self.editing = None;
        }
        info!(comment_id, "Comment deleted");
        Ok(())
    }

    /// Token and identity, checked in that order.
    fn require_author(&self, op: Operation) -> Result<(String, Identity), CommentError> {
        let session = self.session.borrow();
        let token = session
            .token()
            .map(str::to_owned)
            .ok_or(CommentError::NotAuthenticated(op))?;
        let identity = session.identity().cloned().ok_or(CommentError::MissingIdentity)?;
        Ok((token, identity))
    }

    fn find_owned(
        &self,
        op: Operation,
        comment_id: i64,
        identity: &Identity,
    ) -> Result<&Comment, CommentError> {
        let comment = self
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| {
                warn!(comment_id, "Comment not present in local list");
                CommentError::CommentNotFound { op, id: comment_id }
            })?;
        if !comment.is_owned_by(identity) {
            return Err(CommentError::NotOwner { op, id: comment_id });
        }
        Ok(comment)
    }

    /// Shared failure policy for every request: no retry, and any 401 tears
    /// the session down.
    fn on_api_error(&mut self, op: Operation, error: ApiError) -> CommentError {
        warn!(?op, error = %error, "Comment request failed");
        match error {
            ApiError::Unauthorized => {
                self.session.borrow_mut().invalidate();
                CommentError::SessionExpired
            }
            ApiError::Transport(_) => CommentError::Connectivity,
            ApiError::Server {
                message: Some(message),
                ..
            } if op != Operation::Load && !message.trim().is_empty() => {
                CommentError::ServerMessage(message)
            }
            ApiError::Server { .. } | ApiError::MalformedPayload(_) => CommentError::Failed(op),
        }
    }

    fn reload_after_stale_payload(&mut self) {
        if let Err(e) = self.fetch_filtered() {
            warn!(error = %e, "Reload after unexpected payload failed");
        }
    }

    fn upsert(&mut self, comment: Comment) {
        match self.comments.iter().position(|c| c.id == comment.id) {
            Some(pos) => self.comments[pos] = comment,
            None => self.comments.push(comment),
        }
    }

    fn replace(&mut self, target_id: i64, comment: Comment) {
        let Some(pos) = self.comments.iter().position(|c| c.id == target_id) else {
            debug!(target_id, "Edited comment no longer in list");
            return;
        };
        let new_id = comment.id;
        self.comments[pos] = comment;
        let mut index = 0;
        self.comments.retain(|c| {
            let keep = c.id != new_id || index == pos;
            index += 1;
            keep
        });
    }

    fn settle<T>(&mut self, result: Result<T, CommentError>) -> Result<T, CommentError> {
        self.error = result.as_ref().err().map(ToString::to_string);
        result
    }
}
