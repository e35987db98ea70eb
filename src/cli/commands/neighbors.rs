use anyhow::Result;
use console::style;
use std::path::Path;

use super::load_workspace;
use crate::graph::query;
use crate::prompt::display_form;

pub fn run(config_path: Option<&Path>, sense: &str) -> Result<()> {
    let ws = load_workspace(config_path)?;

    if !ws.graph.contains(sense) {
        anyhow::bail!("Sense '{}' has no relations in the graph", sense);
    }

    let suffix_len = ws.config.prompt.suffix_len;
    println!(
        "{} ({})",
        style(sense).cyan().bold(),
        style(display_form(sense, suffix_len)).dim()
    );
    match ws.definitions.get(sense) {
        Some(definition) => println!("  {}", definition),
        None => println!("  {}", style("no definition").yellow()),
    }

    println!();
    for (target, relations) in query::node_connections(&ws.graph, sense) {
        for relation in relations {
            println!("  {} {} {}", style("→").dim(), style(relation).dim(), target);
        }
    }
    for (source, relations) in query::node_incoming(&ws.graph, sense) {
        for relation in relations {
            println!("  {} {} {}", style("←").dim(), style(relation).dim(), source);
        }
    }

    Ok(())
}
