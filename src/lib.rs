// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::{
    CommentApi, CommentPanel, DetailView, Session, SessionStore, SharedSession,
};
use crate::cli::args::{Args, Command, CommentsCommand, SessionCommand};
use crate::domain::{Comment, CommentAuthor, Identity, Section};
use crate::infrastructure::{Config, ContentRenderer, FileSessionStore, HttpApi};
use crate::ports::HtmlPresenter;
use crate::util::text::{excerpt, star_strip};
use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

/// Width of the text column in `comments list`
const LIST_EXCERPT_CHARS: usize = 60;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting centerview with arguments");

    // Initialize infrastructure
    let config = resolve_config(&args)?;
    let api = HttpApi::new(&config.api.base_url);
    let session_path = config.session_path()?;
    debug!(path = %session_path.display(), "Using session file");
    let session = Session::open(FileSessionStore::new(session_path)).shared();

    match args.command {
        Command::View {
            center_id,
            json,
            expand,
            no_open,
        } => view_center(&config, api, session, center_id, &expand, json, no_open),
        Command::Comments(command) => handle_comments(command, api, session),
        Command::Session(command) => handle_session(command, session),
    }
}

/// Config file values, overridden by command line flags.
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &args.session_file {
        config.session.path = path.to_string_lossy().into_owned();
    }
    Ok(config)
}

fn view_center(
    config: &Config,
    api: HttpApi,
    session: SharedSession<FileSessionStore>,
    center_id: i64,
    expand: &[Section],
    json: bool,
    no_open: bool,
) -> Result<()> {
    let mut detail = DetailView::new(api.clone(), session);
    for &section in expand {
        if !detail.sections().is_expanded(section) {
            detail.toggle(section);
        }
    }

    info!(center_id, "Viewing center");
    let failure = detail.load(center_id).err();

    if json {
        if let Some(error) = failure {
            bail!(error);
        }
        let center = detail.center().context("Center not loaded")?;
        println!("{}", serde_json::to_string_pretty(center)?);
        return Ok(());
    }

    let mut panel = detail.comment_panel(api);
    if let Some(panel) = panel.as_mut() {
        if let Err(e) = panel.load() {
            warn!(error = %e, "Comments failed to load");
        }
    }

    let presenter = HtmlPresenter::with_image_base(config.api.image_base_url.clone());
    let panel_view = panel.as_ref().map(CommentPanel::view);
    let html = presenter.render(detail.state(), detail.sections(), panel_view.as_ref());
    debug!(bytes = html.len(), "Generated HTML");

    let mut renderer = ContentRenderer::new();
    let path = renderer.create_temp_file("center.html", &html)?;
    if no_open {
        renderer.keep();
        println!("{}", path.display());
    } else {
        renderer.open_in_browser(&path)?;
    }

    match failure {
        Some(error) => bail!(error),
        None => Ok(()),
    }
}

fn handle_comments(
    command: CommentsCommand,
    api: HttpApi,
    session: SharedSession<FileSessionStore>,
) -> Result<()> {
    match command {
        CommentsCommand::List { center_id, json } => {
            let mut panel = CommentPanel::new(api, session, center_id);
            panel.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(panel.comments())?);
            } else {
                print_comments(panel.comments());
            }
        }
        CommentsCommand::Add {
            center_id,
            text,
            star,
        } => {
            let mut panel = CommentPanel::new(api, session, center_id);
            panel.set_draft_text(text);
            panel.click_draft_star(star);
            let created = panel.submit_new()?;
            println!("Izoh qo'shildi: {}", created.id);
        }
        CommentsCommand::Edit {
            center_id,
            comment_id,
            text,
            star,
        } => {
            if text.is_none() && star.is_none() {
                bail!("Nothing to change: pass --text and/or --star");
            }
            let mut panel = loaded_panel(api, session, center_id)?;
            panel.begin_edit(comment_id)?;
            if let Some(text) = text {
                panel.set_edit_text(text);
            }
            if let Some(star) = star {
                panel.click_edit_star(star);
            }
            let updated = panel.submit_edit()?;
            println!("Izoh tahrirlandi: {}", updated.id);
        }
        CommentsCommand::Delete {
            center_id,
            comment_id,
        } => {
            let mut panel = loaded_panel(api, session, center_id)?;
            panel.delete(comment_id)?;
            println!("Izoh o'chirildi: {}", comment_id);
        }
    }
    Ok(())
}

/// Edit and delete act on the loaded list, like the page does.
fn loaded_panel<A: CommentApi, S: SessionStore>(
    api: A,
    session: SharedSession<S>,
    center_id: i64,
) -> Result<CommentPanel<A, S>> {
    let mut panel = CommentPanel::new(api, session, center_id);
    panel.load()?;
    Ok(panel)
}

fn print_comments(comments: &[Comment]) {
    for comment in comments {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            comment.id,
            star_strip(comment.star),
            comment.author_name(),
            comment.created_date().unwrap_or_default(),
            excerpt(&comment.text, LIST_EXCERPT_CHARS)
        );
    }
}

fn handle_session(
    command: SessionCommand,
    session: SharedSession<FileSessionStore>,
) -> Result<()> {
    match command {
        SessionCommand::Show => {
            let session = session.borrow();
            match (session.is_authenticated(), session.identity()) {
                (true, Some(identity)) => println!(
                    "{} (id {})",
                    CommentAuthor::from(identity).display_name(),
                    identity.id
                ),
                (true, None) => println!("Token stored, user data missing"),
                (false, _) => println!("Not signed in"),
            }
        }
        SessionCommand::Set {
            token,
            id,
            first_name,
            last_name,
        } => {
            let identity = Identity {
                id,
                first_name,
                last_name,
            };
            session
                .borrow_mut()
                .establish(&token, identity)
                .context("Failed to store session")?;
            println!("Session saved");
        }
        SessionCommand::Clear => {
            session.borrow_mut().invalidate();
            println!("Session cleared");
        }
    }
    Ok(())
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use super::*;
    use crate::util::testing;
    use clap::Parser;
    use std::io::Write;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_flags_when_resolving_config_then_flags_override_file() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[api]\nbase_url = \"http://file.example/api\"\n[session]\npath = \"/from/file.json\""
        )
        .expect("write");
        let config_path = file.path().to_string_lossy().into_owned();
        let args = Args::parse_from([
            "centerview",
            "--config",
            config_path.as_str(),
            "--api-url",
            "http://flag.example/api",
            "session",
            "show",
        ]);

        // Act
        let config = resolve_config(&args).expect("config");

        // Assert
        assert_eq!(config.api.base_url, "http://flag.example/api");
        assert_eq!(config.session.path, "/from/file.json");
    }

    #[test]
    fn given_session_commands_when_running_then_file_follows() {
        // Arrange
        let dir = tempfile::tempdir().expect("temp dir");
        let session_file = dir.path().join("session.json");
        let session_arg = session_file.to_string_lossy().into_owned();
        let set = Args::parse_from([
            "centerview",
            "--session-file",
            session_arg.as_str(),
            "session",
            "set",
            "--token",
            "tok",
            "--id",
            "7",
            "--first-name",
            "Ali",
        ]);

        // Act
        run(set).expect("session set");

        // Assert
        let stored = FileSessionStore::new(&session_file).load().expect("load");
        assert_eq!(stored.token.as_deref(), Some("tok"));
        assert_eq!(
            Identity::from_stored(stored.user.as_deref().expect("user")).map(|i| i.id),
            Some(7)
        );

        let clear = Args::parse_from([
            "centerview",
            "--session-file",
            session_arg.as_str(),
            "session",
            "clear",
        ]);
        run(clear).expect("session clear");
        assert!(!session_file.exists());
    }

    #[test]
    fn given_edit_without_changes_when_running_then_fails_before_network() {
        let dir = tempfile::tempdir().expect("temp dir");
        let session_arg = dir.path().join("s.json").to_string_lossy().into_owned();
        let args = Args::parse_from([
            "centerview",
            "--api-url",
            "http://127.0.0.1:9",
            "--session-file",
            session_arg.as_str(),
            "comments",
            "edit",
            "42",
            "1",
        ]);

        let error = run(args).expect_err("nothing to change");

        assert!(error.to_string().contains("Nothing to change"));
    }
}
