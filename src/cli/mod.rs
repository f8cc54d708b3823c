// src/cli/mod.rs
pub mod args;

pub use args::{Args, Command, CommentsCommand, SessionCommand};
