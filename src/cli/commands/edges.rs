use anyhow::Result;
use console::style;
use std::path::Path;

use super::load_workspace;
use crate::graph::query;

/// Print every ordered pair whose relations include all of `types`, one
/// tab-separated pair per line.
pub fn run(config_path: Option<&Path>, types: &[String]) -> Result<()> {
    let ws = load_workspace(config_path)?;

    let pairs = query::edges_with_types(&ws.graph, types);
    for (source, target) in &pairs {
        println!("{}\t{}", source, target);
    }

    eprintln!(
        "{} pairs with {}",
        style(pairs.len()).green().bold(),
        style(types.join(" + ")).cyan()
    );

    Ok(())
}
