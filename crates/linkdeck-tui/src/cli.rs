//! Command-line surface of the `linkdeck` binary.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "linkdeck")]
#[command(about = "Browse, filter and curate a bookmark gallery in the terminal", version)]
pub struct Cli {
    /// Config file. Defaults to `$XDG_CONFIG_HOME/linkdeck/config.yaml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Document path or http(s) URL. Wins over the config file and `LINKDECK_SOURCE`.
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Interactive gallery (the default). Prints a snapshot when not on a terminal.
    View,
    /// Print links passing the given filters.
    List(ListArgs),
    /// Print the tag display list with colors.
    Tags,
    /// Print the document as pretty JSON.
    Export,
}

#[derive(Debug, Args, PartialEq, Eq)]
pub struct ListArgs {
    /// Required tag; repeat for several (all must match).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Case-insensitive substring over title, description and tags.
    #[arg(long, allow_hyphen_values = true)]
    pub search: Option<String>,
}

static DEFAULT_COMMAND: Commands = Commands::View;

impl Cli {
    #[must_use]
    pub fn command_or_default(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&DEFAULT_COMMAND)
    }
}
