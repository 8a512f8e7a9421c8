//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::TraversalOrder;
use crate::domain::InsertStrategy;

/// Build, reshape and walk bounded-degree (3-slot) trees
#[derive(Parser, Debug)]
#[command(name = "degree3")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Balanced-insert a..i from root a and print every key depth-first
    Demo,

    /// Insert keys, optionally delete some, then print the tree
    Build {
        /// Keys to insert, in order (default: keys from config)
        keys: Vec<String>,
        /// Insertion strategy: fill, smallest-subtree, balanced
        #[arg(short, long)]
        strategy: Option<InsertStrategy>,
        /// Output order: depth-first, breadth-first, edges, tree
        #[arg(short, long)]
        order: Option<TraversalOrder>,
        /// Insertion root (default: first key)
        #[arg(short, long)]
        root: Option<String>,
        /// Keys to delete after building (repeatable)
        #[arg(long = "delete", value_name = "KEY")]
        delete: Vec<String>,
    },

    /// Insert keys and print the centroid of the result
    Centroid {
        /// Keys to insert, in order (default: keys from config)
        keys: Vec<String>,
        /// Insertion strategy: fill, smallest-subtree, balanced
        #[arg(short, long)]
        strategy: Option<InsertStrategy>,
        /// Insertion root (default: first key)
        #[arg(short, long)]
        root: Option<String>,
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
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_build_args_when_parsing_then_strategy_and_deletes_parsed() {
        let cli = Cli::try_parse_from([
            "degree3", "-dd", "build", "a", "b", "c", "--strategy", "fill", "--delete", "b",
            "--delete", "c",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Build {
                keys,
                strategy,
                delete,
                ..
            }) => {
                assert_eq!(keys, ["a", "b", "c"]);
                assert_eq!(strategy, Some(InsertStrategy::Fill));
                assert_eq!(delete, ["b", "c"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_unknown_strategy_when_parsing_then_error() {
        let result = Cli::try_parse_from(["degree3", "build", "--strategy", "heap"]);
        assert!(result.is_err());
    }
}
