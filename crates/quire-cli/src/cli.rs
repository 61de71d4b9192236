//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quire - build and query a blog's search and tag indexes
#[derive(Parser, Debug)]
#[command(name = "quire", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build search-index.json and tags.json from the article directory
    Build {
        /// Article directory (overrides `content.dir`); the index files are
        /// written inside it instead of the configured output paths
        #[arg(long)]
        content_dir: Option<PathBuf>,

        /// Skip the build when no article changed since the last one
        #[arg(long)]
        if_changed: bool,
    },

    /// List articles, newest first
    List {
        /// Only articles carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Articles per page (overrides `listing.page_size`)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// List tags with article counts
    Tags,

    /// Fuzzy search over titles, tags and content
    Search {
        /// Search query
        query: String,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Print an article's table of contents
    Toc {
        /// Article slug
        slug: String,
    },

    /// About-page profile data
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Validate a profile file; exits with status 1 when invalid
    Validate {
        /// Profile file (TOML, or JSON by extension)
        file: PathBuf,
    },

    /// Print statistics derived from a profile file
    Stats {
        /// Profile file (TOML, or JSON by extension)
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `listing.page_size`
    Get { key: String },

    /// Set a value by dotted key in the config file
    Set { key: String, value: String },

    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config path)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export,
}
