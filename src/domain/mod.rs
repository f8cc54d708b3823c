// src/domain/mod.rs
pub mod center;
pub mod comment;
pub mod de;
pub mod error;
pub mod identity;
pub mod messages;
pub mod rating;
pub mod section;

pub use center::{Center, Course, ScheduleEntry};
pub use comment::{Comment, CommentAuthor, CommentUpdate, NewComment};
pub use error::{ApiError, CommentError, DetailError, DomainError, Operation};
pub use identity::Identity;
pub use rating::{Rating, Star, StarRow};
pub use section::{Section, SectionToggles};
