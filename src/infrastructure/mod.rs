// src/infrastructure/mod.rs
pub mod config;
pub mod http;
pub mod renderer;
pub mod session_file;

pub use config::Config;
pub use http::HttpApi;
pub use renderer::ContentRenderer;
pub use session_file::FileSessionStore;
