// src/cli/args.rs
use crate::domain::Section;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides the config file
    #[arg(long, value_name = "URL", env = "CENTERVIEW_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session file, overrides the config file
    #[arg(long, value_name = "PATH", global = true)]
    pub session_file: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (view, comments, or session)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// View a center in the browser
    View {
        /// Center ID to view
        #[arg(value_name = "CENTER_ID")]
        center_id: i64,

        /// Output center as JSON instead of opening in browser
        #[arg(long)]
        json: bool,

        /// Sections to render expanded
        #[arg(short, long, value_name = "SECTION", value_enum, num_args = 1..)]
        expand: Vec<Section>,

        /// Write the page but do not launch a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Read and manage the comments of a center
    #[command(subcommand)]
    Comments(CommentsCommand),

    /// Inspect or change the stored session
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum CommentsCommand {
    /// List comments with author, date, rating and first line of text
    List {
        #[arg(value_name = "CENTER_ID")]
        center_id: i64,

        /// Output comments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a comment (requires a stored session)
    Add {
        #[arg(value_name = "CENTER_ID")]
        center_id: i64,

        #[arg(short, long)]
        text: String,

        /// Rating from 1 to 5
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=5))]
        star: u8,
    },

    /// Edit one of your comments; omitted fields keep their current value
    Edit {
        #[arg(value_name = "CENTER_ID")]
        center_id: i64,

        #[arg(value_name = "COMMENT_ID")]
        comment_id: i64,

        #[arg(short, long)]
        text: Option<String>,

        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        star: Option<u8>,
    },

    /// Delete one of your comments
    Delete {
        #[arg(value_name = "CENTER_ID")]
        center_id: i64,

        #[arg(value_name = "COMMENT_ID")]
        comment_id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Show who is signed in
    Show,

    /// Store a pre-issued token and the matching user
    Set {
        #[arg(long, env = "CENTERVIEW_TOKEN", hide_env_values = true)]
        token: String,

        /// User ID the token belongs to
        #[arg(long)]
        id: i64,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Forget the stored session
    Clear,
}
