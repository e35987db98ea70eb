use anyhow::{Context, Result};
use console::{Emoji, style};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::load_workspace;
use crate::export::{PromptRecord, write_prompt_record};
use crate::graph::{SenseGraph, SenseId};
use crate::prompt::PromptGenerator;
use crate::registry::{DefinitionTable, SenseRegistry};

static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");

/// Print the prompt for a single sense to stdout.
pub fn run_single(config_path: Option<&Path>, sense: &str) -> Result<()> {
    let ws = load_workspace(config_path)?;

    if !ws.graph.contains(sense) {
        warn!(sense, "Sense has no relations; prompt will list none");
    }
    if ws.definitions.is_defined(sense) {
        warn!(sense, "Sense already has a definition");
    }

    let generator = PromptGenerator::new(&ws.graph, &ws.definitions, ws.config.prompt);
    print!("{}", generator.generate(sense));
    io::stdout().flush()?;

    Ok(())
}

/// Write prompts for undefined senses as JSON Lines.
pub fn run_batch(
    config_path: Option<&Path>,
    output: Option<PathBuf>,
    min_degree: usize,
    all_senses: bool,
    limit: Option<usize>,
) -> Result<()> {
    let ws = load_workspace(config_path)?;

    let mut targets = select_targets(&ws.graph, &ws.definitions, &ws.registry, min_degree, all_senses);
    if let Some(limit) = limit {
        targets.truncate(limit);
    }

    let generator = PromptGenerator::new(&ws.graph, &ws.definitions, ws.config.prompt);

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for sense in &targets {
        let record = PromptRecord {
            sense: sense.to_string(),
            prompt: generator.generate(sense.as_str()),
        };
        write_prompt_record(&mut writer, &record)?;
    }
    writer.flush()?;

    if let Some(path) = &output {
        eprintln!(
            "{}Wrote {} prompts to {}",
            CHECK,
            style(targets.len()).green().bold(),
            style(path.display()).cyan()
        );
    }

    Ok(())
}

/// Senses that need a prompt: undefined graph nodes in graph order, or with
/// `all_senses` every undefined sense of the mapping in mapping order. Only
/// senses with at least `min_degree` relations are kept.
pub fn select_targets<'a>(
    graph: &'a SenseGraph,
    definitions: &DefinitionTable,
    registry: &'a SenseRegistry,
    min_degree: usize,
    all_senses: bool,
) -> Vec<&'a SenseId> {
    let candidates: Vec<&'a SenseId> = if all_senses {
        definitions.undefined_senses(registry)
    } else {
        graph
            .nodes()
            .filter(|n| !definitions.is_defined(n.as_str()))
            .collect()
    };
    candidates
        .into_iter()
        .filter(|s| graph.degree(s.as_str()) >= min_degree)
        .collect()
}
