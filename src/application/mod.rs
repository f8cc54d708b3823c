// src/application/mod.rs
pub mod comment_panel;
pub mod detail_view;
pub mod session;

pub use comment_panel::{CommentApi, CommentPanel, CommentPanelView, Draft, EditState};
pub use detail_view::{CenterApi, DetailState, DetailView};
pub use session::{Session, SessionEvent, SessionStore, SharedSession, StoredSession};
