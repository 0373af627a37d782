//! CLI module - Command-line interface for cinedex
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// cinedex - Personal movie catalog backed by OMDb
#[derive(Parser)]
#[command(name = "cinedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve,

    /// Look a title up on OMDb and add it to the catalog
    #[command(alias = "a")]
    Add {
        /// Movie title
        #[arg(required = true)]
        title: Vec<String>,
        /// Personal note stored with the movie
        #[arg(long, short, default_value = "")]
        notes: String,
    },

    /// List catalogued movies
    #[command(alias = "ls", alias = "l")]
    List {
        /// Sort field: released or rating
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort order: asc or desc
        #[arg(long)]
        order: Option<String>,
        /// Case-insensitive title substring
        #[arg(long)]
        title: Option<String>,
        /// Case-insensitive substring of director, writer or actors
        #[arg(long)]
        search: Option<String>,
    },

    /// Show details about a catalogued movie
    #[command(alias = "i", alias = "info")]
    Show {
        /// Movie ID
        id: String,
    },

    /// Replace the note of a catalogued movie
    Note {
        /// Movie ID
        id: String,
        /// New note text
        #[arg(required = true)]
        notes: Vec<String>,
    },

    /// Remove a movie from the catalog
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Movie ID to remove
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Create default config file
    Init,
}

impl Commands {
    /// Whether the command looks titles up on OMDb and so needs its credentials.
    #[must_use]
    pub const fn needs_provider(&self) -> bool {
        matches!(self, Self::Serve | Self::Add { .. })
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_title_words_and_takes_notes() {
        let cli = Cli::try_parse_from(["cinedex", "add", "The", "Dark", "Knight", "-n", "rewatch"])
            .unwrap();
        match cli.command {
            Some(Commands::Add { title, notes }) => {
                assert_eq!(title.join(" "), "The Dark Knight");
                assert_eq!(notes, "rewatch");
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn list_accepts_sort_and_filters() {
        let cli = Cli::try_parse_from([
            "cinedex", "ls", "--sort-by", "rating", "--order", "desc", "--search", "nolan",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List {
                sort_by,
                order,
                title,
                search,
            }) => {
                assert_eq!(sort_by.as_deref(), Some("rating"));
                assert_eq!(order.as_deref(), Some("desc"));
                assert_eq!(title, None);
                assert_eq!(search.as_deref(), Some("nolan"));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn only_serve_and_add_need_provider_credentials() {
        let needs = |args: &[&str]| {
            Cli::try_parse_from(args)
                .unwrap()
                .command
                .is_some_and(|c| c.needs_provider())
        };

        assert!(needs(&["cinedex", "serve"]));
        assert!(needs(&["cinedex", "add", "Heat"]));
        assert!(!needs(&["cinedex", "list"]));
        assert!(!needs(&["cinedex", "show", "1"]));
        assert!(!needs(&["cinedex", "note", "1", "rewatch"]));
        assert!(!needs(&["cinedex", "rm", "1", "-y"]));
    }
}
