//! Command-line interface definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve LLL: label references against label files.
#[derive(Parser, Debug)]
#[command(name = "glossa")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Resolve a label in Brazilian Portuguese:\n",
    "    $ glossa -L pt_BR resolve 'LLL:EXT:core/lang/labels.yaml:labels.save'\n\n",
    "  Show the dependency chain of a language:\n",
    "    $ glossa chain fr_CA\n\n",
    "  Dump a merged label file as JSON:\n",
    "    $ glossa -L de dump EXT:core/lang/labels.yaml",
))]
pub struct Cli {
    /// Path to the config file (defaults to ./glossa.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Language key to activate (overrides the config file)
    #[arg(short = 'L', long, global = true)]
    pub language: Option<String>,

    /// Append the looked-up reference to every resolved label
    #[arg(long, global = true)]
    pub debug: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve label references and print one result per line
    Resolve {
        /// References such as LLL:EXT:core/lang/labels.yaml:labels.save
        #[arg(required = true)]
        references: Vec<String>,
    },

    /// Print the dependency chain of a language key
    Chain {
        /// Language key, e.g. fr_CA
        language: String,
    },

    /// Print a label file, merged along the dependency chain, as JSON
    Dump {
        /// File locator, e.g. EXT:core/lang/labels.yaml
        file: String,

        /// Flatten the active language onto the base labels
        #[arg(long)]
        flat: bool,
    },

    /// List the known language keys
    Locales,
}
