pub mod build;
pub mod edges;
pub mod init;
pub mod neighbors;
pub mod prompt;
pub mod stats;

use anyhow::{Context, Result};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::graph::SenseGraph;
use crate::ingest::{self, SourceReport};
use crate::registry::{DefinitionTable, SenseRegistry};

static DATABASE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Everything loaded from the configured dataset.
pub struct Workspace {
    pub config: Config,
    pub registry: SenseRegistry,
    pub definitions: DefinitionTable,
    pub graph: SenseGraph,
    pub reports: Vec<SourceReport>,
}

/// Load configuration, both lookup tables and build the relation graph.
pub fn load_workspace(config_path: Option<&Path>) -> Result<Workspace> {
    let config = Config::load(config_path).context("Failed to load configuration.")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(&format!("{}{{spinner:.green}} {{msg}}", DATABASE))
            .context("Invalid spinner template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner.set_message("Loading sense mapping...");
    let senses_path = config.senses_path();
    let registry = SenseRegistry::load(&senses_path)
        .with_context(|| format!("Failed to load senses from {}", senses_path.display()))?;

    spinner.set_message("Loading definitions...");
    let definitions_path = config.definitions_path();
    let definitions = DefinitionTable::load(&definitions_path).with_context(|| {
        format!("Failed to load definitions from {}", definitions_path.display())
    })?;

    spinner.set_message("Building relation graph...");
    let relation_paths = config.relation_paths();
    let (graph, reports) = ingest::build_graph(relation_paths.as_slice(), &registry)
        .context("Failed to ingest relation files")?;

    spinner.finish_and_clear();

    Ok(Workspace {
        config,
        registry,
        definitions,
        graph,
        reports,
    })
}
