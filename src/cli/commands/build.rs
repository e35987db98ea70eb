use anyhow::Result;
use console::{Emoji, style};
use indicatif::HumanDuration;
use std::path::PathBuf;
use std::time::Instant;

use super::load_workspace;
use crate::cli::ExportFormat;

static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");

pub fn run(config_path: Option<&std::path::Path>, format: ExportFormat, output: PathBuf) -> Result<()> {
    let started = Instant::now();

    println!();
    println!("{}", style(" glossgraph - Relation Graph Builder ").bold().reverse());
    println!();

    let ws = load_workspace(config_path)?;

    println!(
        "{}Sense mapping: {} raw ids, {} senses, {} definitions",
        PAPER,
        style(ws.registry.len()).green().bold(),
        style(ws.registry.senses().len()).green().bold(),
        style(ws.definitions.len()).green().bold()
    );

    for report in &ws.reports {
        let filename = report.path.file_name().unwrap_or_default().to_string_lossy();
        println!(
            "{}{}: {} records, {} accepted, {} unknown senses, {} duplicates removed",
            LINK,
            style(filename).cyan(),
            report.import.records,
            style(report.import.accepted).green(),
            style(report.import.dropped).dim(),
            style(report.pass.duplicates_removed).yellow()
        );
    }

    println!();
    println!("{}Graph Statistics:", SPARKLE);
    println!(
        "  {} Nodes (senses): {}",
        style("•").cyan(),
        style(ws.graph.node_count()).green().bold()
    );
    println!(
        "  {} Edges (relations): {}",
        style("•").cyan(),
        style(ws.graph.edge_count()).green().bold()
    );

    println!();
    let suffix_len = ws.config.prompt.suffix_len;
    match format {
        ExportFormat::Json => {
            crate::export::export_json(&ws.graph, &ws.definitions, suffix_len, &output)?;
            println!("{}Exported to {}", CHECK, style(output.display()).cyan());
        }
        ExportFormat::Csv => {
            let nodes_path = output.with_extension("nodes.csv");
            let edges_path = output.with_extension("edges.csv");
            crate::export::export_csv(&ws.graph, &ws.definitions, suffix_len, &nodes_path, &edges_path)?;
            println!("{}Exported to:", CHECK);
            println!("  • {}", style(nodes_path.display()).cyan());
            println!("  • {}", style(edges_path.display()).cyan());
        }
    }

    println!();
    println!(
        "{}Done in {}",
        SPARKLE,
        style(HumanDuration(started.elapsed())).green().bold()
    );

    Ok(())
}
