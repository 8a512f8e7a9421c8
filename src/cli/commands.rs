//! Command dispatch for the degree3 driver

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings, TraversalOrder};
use crate::domain::{Degree3Graph, InsertStrategy};

const DEMO_ROOT: &str = "a";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo) => _demo(),
        Some(Commands::Build {
            keys,
            strategy,
            order,
            root,
            delete,
        }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _build(&settings, keys, *strategy, *order, root.as_deref(), delete)
        }
        Some(Commands::Centroid {
            keys,
            strategy,
            root,
        }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _centroid(&settings, keys, *strategy, root.as_deref())
        }
        Some(Commands::Config { command }) => _config(command, cli.config.as_deref()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Insert `keys` in order. The first key bootstraps the tree; every later key is
/// inserted relative to `root` (default: the first key).
#[instrument(level = "debug")]
pub fn build_graph(
    keys: &[String],
    root: Option<&str>,
    strategy: InsertStrategy,
) -> CliResult<Degree3Graph<String>> {
    let Some(first) = keys.first() else {
        return Err(CliError::InvalidArgs("no keys to insert".to_string()));
    };
    let root = root.map(str::to_string).unwrap_or_else(|| first.clone());

    let mut graph = Degree3Graph::new();
    for key in keys {
        let anchor = if graph.is_empty() { None } else { Some(&root) };
        let affected = graph.insert(anchor, key.clone(), strategy)?;
        if affected.is_empty() {
            debug!("{} already present, skipped", key);
        }
    }
    info!("built {} node(s) with {}", graph.len(), strategy);
    Ok(graph)
}

/// Lines describing the component of `root` in the requested order.
pub fn format_structure(
    graph: &Degree3Graph<String>,
    root: &String,
    order: TraversalOrder,
) -> CliResult<Vec<String>> {
    let lines = match order {
        TraversalOrder::DepthFirst => graph
            .depth_first(root)?
            .map(|node| format!("{} -> [{}]", node.key, node.neighbors.iter().join(", ")))
            .collect(),
        TraversalOrder::BreadthFirst => graph
            .breadth_first(root)?
            .map(|node| format!("{} -> [{}]", node.key, node.neighbors.iter().join(", ")))
            .collect(),
        TraversalOrder::Edges => graph
            .edge_list(root)?
            .map(|(from, to)| format!("{} -- {}", from, to))
            .collect(),
        TraversalOrder::Tree => graph
            .render(root)?
            .to_string()
            .lines()
            .map(str::to_string)
            .collect(),
    };
    Ok(lines)
}

/// Keys `a`..`i` balanced-inserted from `a`, listed depth-first.
pub fn demo_keys() -> CliResult<Vec<String>> {
    let keys: Vec<String> = ('a'..='i').map(String::from).collect();
    let graph = build_graph(&keys, Some(DEMO_ROOT), InsertStrategy::Balanced)?;
    Ok(graph
        .depth_first(&DEMO_ROOT.to_string())?
        .map(|node| node.key)
        .collect())
}

#[instrument]
fn _demo() -> CliResult<()> {
    for key in demo_keys()? {
        output::demo_node(&key);
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _build(
    settings: &Settings,
    keys: &[String],
    strategy: Option<InsertStrategy>,
    order: Option<TraversalOrder>,
    root: Option<&str>,
    delete: &[String],
) -> CliResult<()> {
    let keys = if keys.is_empty() { &settings.keys[..] } else { keys };
    let strategy = strategy.unwrap_or(settings.strategy);
    let order = order.unwrap_or(settings.order);
    let root = root.or(settings.root.as_deref());

    let mut graph = build_graph(keys, root, strategy)?;

    let mut start = root
        .map(str::to_string)
        .or_else(|| keys.first().cloned())
        .ok_or_else(|| CliError::InvalidArgs("no keys to insert".to_string()))?;
    for key in delete {
        if !graph.exists(key) {
            output::warning(&format!("{} not in tree, nothing deleted", key));
            continue;
        }
        let mutated = graph.delete_node(key)?;
        output::deleted(key, &mutated);
        if *key == start {
            match mutated.first() {
                Some(survivor) => start = survivor.clone(),
                None => {
                    output::warning("tree is empty");
                    return Ok(());
                }
            }
        }
    }

    output::tree_summary(graph.len(), strategy, order);
    for line in format_structure(&graph, &start, order)? {
        output::line(&line);
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _centroid(
    settings: &Settings,
    keys: &[String],
    strategy: Option<InsertStrategy>,
    root: Option<&str>,
) -> CliResult<()> {
    let keys = if keys.is_empty() { &settings.keys[..] } else { keys };
    let strategy = strategy.unwrap_or(settings.strategy);
    let root = root.or(settings.root.as_deref());

    let graph = build_graph(keys, root, strategy)?;
    let start = root
        .map(str::to_string)
        .or_else(|| keys.first().cloned())
        .ok_or_else(|| CliError::InvalidArgs("no keys to insert".to_string()))?;

    let centroid = graph.find_centroid(&start)?;
    output::centroid(&centroid, graph.len(), &start);
    Ok(())
}

fn _config(command: &ConfigCommands, explicit: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(explicit)?;
            output::line(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::line(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::location("Global", path.display()),
                None => output::warning(&"no home directory, global config disabled"),
            }
            if let Some(path) = explicit {
                output::location("Explicit", path.display());
            }
        }
    }
    Ok(())
}
