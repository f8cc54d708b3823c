// src/constants.rs
//
// Application-wide constants. Each one documents where it is used.

/// Base URL of the platform REST API.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_API_BASE_URL: &str = "https://findcourse.net.uz/api";

/// Base URL under which center images are served, by `{base}/{center.image}`.
///
/// Used in: `infrastructure/config.rs`, `ports/html.rs`
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://findcourse.net.uz/image";

/// Rating preselected in the compose form and restored after a successful post.
///
/// Used in: `domain/rating.rs`
pub const DEFAULT_RATING: u8 = 5;

/// Number of star controls in a rating row.
///
/// Used in: `domain/rating.rs`
pub const MAX_RATING: u8 = 5;

/// Name of the directory under the platform config/data dirs.
///
/// Used in: `infrastructure/config.rs`
pub const APP_DIR_NAME: &str = "centerview";

/// File holding the cached `token` and `user` entries.
///
/// Used in: `infrastructure/config.rs`
pub const SESSION_FILE_NAME: &str = "session.json";

/// Delay in milliseconds after launching the browser before the process may exit.
///
/// The rendered page lives in a temporary directory owned by the renderer; the
/// browser needs a moment to read it before the directory is removed.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
