// src/domain/error.rs
use crate::domain::messages;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("Session store error: {0}")]
    SessionStore(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// Failure of a single HTTP exchange with the platform API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Unauthorized (HTTP 401)")]
    Unauthorized,
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Server responded with HTTP {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("Unexpected payload: {0}")]
    MalformedPayload(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetailError {
    #[error("{}", messages::CENTER_NOT_FOUND)]
    NotFound,
    #[error("{}", messages::CENTER_LOAD_FAILED)]
    LoadFailed,
}

/// The four network operations of the comment panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Edit,
    Delete,
}

impl Operation {
    fn login_required(self) -> &'static str {
        match self {
            Operation::Load | Operation::Create => messages::LOGIN_TO_CREATE,
            Operation::Edit => messages::LOGIN_TO_EDIT,
            Operation::Delete => messages::LOGIN_TO_DELETE,
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Operation::Load => messages::LOAD_FAILED,
            Operation::Create => messages::CREATE_FAILED,
            Operation::Edit => messages::EDIT_FAILED,
            Operation::Delete => messages::DELETE_FAILED,
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Operation::Edit => messages::EDIT_TARGET_NOT_FOUND,
            _ => messages::COMMENT_NOT_FOUND,
        }
    }

    fn not_owner(self) -> &'static str {
        match self {
            Operation::Edit => messages::NOT_OWNER_EDIT,
            _ => messages::NOT_OWNER_DELETE,
        }
    }

    fn stale(self) -> &'static str {
        match self {
            Operation::Edit => messages::EDITED_BUT_STALE,
            _ => messages::CREATED_BUT_STALE,
        }
    }
}

/// Outcome of a comment panel operation that did not succeed.
///
/// `Display` yields the localized message the panel shows inline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommentError {
    #[error("{}", messages::EMPTY_TEXT)]
    EmptyText,
    #[error("{}", .0.login_required())]
    NotAuthenticated(Operation),
    #[error("{}", messages::IDENTITY_MISSING)]
    MissingIdentity,
    #[error("{}", .op.not_found())]
    CommentNotFound { op: Operation, id: i64 },
    #[error("{}", .op.not_owner())]
    NotOwner { op: Operation, id: i64 },
    #[error("{}", messages::NOT_EDITING)]
    NotEditing,
    #[error("{}", messages::SESSION_EXPIRED)]
    SessionExpired,
    #[error("{}", messages::CONNECTIVITY)]
    Connectivity,
    #[error("Xato: {0}")]
    ServerMessage(String),
    #[error("{}", .0.failed())]
    Failed(Operation),
    #[error("{}", .0.stale())]
    StalePayload(Operation),
}
