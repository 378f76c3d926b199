use crate::constants::{APP_DESCRIPTION, APP_NAME};
use crate::entry::Mood;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Log output format (text or json); overrides JOURNAL_SYNC_LOG_FORMAT
    #[clap(long, global = true, value_parser = ["text", "json"])]
    pub log_format: Option<String>,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Pull the remote collection into the local store
    Pull,

    /// List local entries, newest first
    List,

    /// Create an entry and push it
    Create {
        #[clap(short = 't', long)]
        title: String,

        #[clap(short = 'b', long)]
        body: String,

        #[clap(short = 'm', long, value_enum, default_value_t = Mood::Neutral)]
        mood: Mood,
    },

    /// Replace an entry's fields and push it
    Update {
        /// Identifier of the entry to update
        identifier: String,

        #[clap(short = 't', long)]
        title: String,

        #[clap(short = 'b', long)]
        body: String,

        #[clap(short = 'm', long, value_enum, default_value_t = Mood::Neutral)]
        mood: Mood,

        /// RFC 3339 timestamp; defaults to now
        #[clap(long, value_parser = parse_timestamp)]
        timestamp: Option<DateTime<Utc>>,
    },

    /// Delete an entry locally and remotely
    Delete {
        /// Identifier of the entry to delete
        identifier: String,
    },

    /// Push an existing entry to the remote store
    Push {
        /// Identifier of the entry to push
        identifier: String,
    },
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    crate::entry::timestamp::parse(s).map_err(|e| format!("Invalid timestamp '{}': {}", s, e))
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}
