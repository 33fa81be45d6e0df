//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Family records manager: ancestry trees, drill-down navigation, and event reminders
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Data directory holding family files (overrides config)
    #[arg(long, global = true, env = "FAMTREE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage families
    Family {
        #[command(subcommand)]
        command: FamilyCommands,
    },

    /// Manage family members
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },

    /// Show a family as ancestry trees
    Tree {
        /// Family name
        family: String,
    },

    /// Drill down through a family tree interactively
    Browse {
        /// Family name
        family: String,
    },

    /// Show upcoming birthdays, anniversaries, and events
    Alerts {
        /// Family name
        family: String,
        /// Days separating "upcoming" from "later" (default from config)
        #[arg(short, long)]
        window: Option<i64>,
        /// Reference date YYYY-MM-DD (default: today)
        #[arg(long)]
        on: Option<String>,
    },

    /// Show the event calendar for a month
    Calendar {
        /// Family name
        family: String,
        /// Month 1-12
        #[arg(short, long)]
        month: Option<u32>,
        /// Calendar year (applies to custom events)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Manage custom events
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum FamilyCommands {
    /// List families
    List,

    /// Create a new family
    Add {
        /// Family name (becomes the file name)
        name: String,
    },

    /// Delete a family with all members and events
    Remove {
        /// Family name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// List members of a family
    List {
        /// Family name
        family: String,
    },

    /// Add a member
    Add {
        /// Family name
        family: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Birthday YYYY-MM-DD
        #[arg(long)]
        birthday: Option<String>,
        /// Anniversary YYYY-MM-DD
        #[arg(long)]
        anniversary: Option<String>,
        #[arg(long)]
        comments: Option<String>,
        /// Member id of the father
        #[arg(long)]
        father: Option<String>,
        /// Member id of the mother
        #[arg(long)]
        mother: Option<String>,
        /// Photo reference (path or URL)
        #[arg(long)]
        photo: Option<String>,
    },

    /// Remove a member
    Remove {
        /// Family name
        family: String,
        /// Member id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List custom events
    List {
        /// Family name
        family: String,
    },

    /// Add a custom event
    Add {
        /// Family name
        family: String,
        /// Event name
        #[arg(long)]
        name: String,
        /// Event date YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Related member id
        #[arg(long)]
        member: Option<String>,
    },

    /// Remove a custom event
    Remove {
        /// Family name
        family: String,
        /// Event id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}
