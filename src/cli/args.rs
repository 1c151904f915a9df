// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linklocker", author, version, about, long_about = None)]
/// A personal link collection for the terminal
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        email: String,
        /// Read from a prompt when omitted
        #[arg(short = 'p', long = "password")]
        password: Option<String>,
    },
    /// Sign in with e-mail and password
    Signin {
        email: String,
        /// Read from a prompt when omitted
        #[arg(short = 'p', long = "password")]
        password: Option<String>,
    },
    /// End the current session
    Signout,
    /// Show the signed-in user
    Whoami,
    /// List links, newest first
    #[command(visible_alias = "search")]
    List {
        /// Case-insensitive text matched against title, description, url and tags
        query: Option<String>,

        #[arg(
            short = 't',
            long = "tags",
            help = "match any, comma separated list"
        )]
        tags: Option<String>,

        #[arg(long = "json", help = "output as json")]
        json: bool,
    },
    /// Show all tags of the collection
    Tags {
        #[arg(long = "counts", help = "show number of links per tag")]
        counts: bool,
    },
    /// Add a link
    Add {
        url: String,
        #[arg(long = "title", help = "title (required)")]
        title: Option<String>,
        #[arg(short = 'D', long = "description", help = "description")]
        description: Option<String>,
        #[arg(short = 't', long = "tags", help = "comma separated list")]
        tags: Option<String>,
    },
    /// Edit a link; only given fields are changed
    Edit {
        /// Link id or unique id prefix
        id: String,
        #[arg(long = "title")]
        title: Option<String>,
        #[arg(long = "url")]
        url: Option<String>,
        #[arg(short = 'D', long = "description", conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long = "clear-description", help = "remove the description")]
        clear_description: bool,
        #[arg(
            short = 't',
            long = "tags",
            help = "replace tags, comma separated list (empty string removes all)"
        )]
        tags: Option<String>,
    },
    /// Delete a link
    Delete {
        /// Link id or unique id prefix
        id: String,
        #[arg(short = 'y', long = "yes", help = "do not ask for confirmation")]
        yes: bool,
    },
    /// Open a link in the default browser
    Open {
        /// Link id or unique id prefix
        id: String,
    },
    /// Generate shell completion script (bash, zsh, fish)
    Completion {
        shell: String,
    },
}
