use anyhow::Result;
use console::{Emoji, style};
use std::path::Path;

use super::load_workspace;
use crate::graph::{analytics, query};

static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
static BOOK: Emoji<'_, '_> = Emoji("📖 ", "");
static GRAPH: Emoji<'_, '_> = Emoji("🔗 ", "");

pub fn run(config_path: Option<&Path>) -> Result<()> {
    println!();
    println!("{}", style(" glossgraph - Graph Statistics ").bold().reverse());
    println!();

    let ws = load_workspace(config_path)?;
    let stats = analytics::compute_stats(&ws.graph.to_petgraph());

    println!("{}Graph Overview", CHART);
    println!();
    println!(
        "  {} Senses:               {}",
        style("•").cyan(),
        style(stats.node_count).green().bold()
    );
    println!(
        "  {} Relations:            {}",
        style("•").cyan(),
        style(stats.edge_count).green().bold()
    );
    println!(
        "  {} Connected components: {}",
        style("•").cyan(),
        style(stats.connected_components).green().bold()
    );
    println!(
        "  {} Self-loops:           {}",
        style("•").cyan(),
        style(stats.self_loops).green()
    );
    println!(
        "  {} Density:              {}",
        style("•").cyan(),
        style(format!("{:.6}", stats.density)).green()
    );
    println!(
        "  {} Avg degree:           {}",
        style("•").cyan(),
        style(format!("{:.2}", stats.avg_degree)).green()
    );
    println!(
        "  {} Max degree:           {}",
        style("•").cyan(),
        style(stats.max_degree).green().bold()
    );

    println!();
    println!("{}Definition Coverage", BOOK);
    println!();
    println!(
        "  {} Undefined senses:                {}",
        style("•").cyan(),
        style(query::count_undefined(&ws.graph, &ws.definitions)).yellow().bold()
    );
    println!(
        "  {} Undefined with degree above 1:   {}",
        style("•").cyan(),
        style(query::count_undefined_with_degree_above(&ws.graph, &ws.definitions, 1))
            .yellow()
            .bold()
    );
    println!(
        "  {} Undefined in mapping:            {}",
        style("•").cyan(),
        style(ws.definitions.undefined_senses(&ws.registry).len()).yellow()
    );

    let type_counts = query::relation_type_counts(&ws.graph);
    if !type_counts.is_empty() {
        let mut type_vec: Vec<(String, usize)> = type_counts.into_iter().collect();
        type_vec.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let max = type_vec[0].1.max(1);

        println!();
        println!("{}Relation Types", CHART);
        println!();
        for (t, count) in &type_vec {
            let bar_len = (count * 30).div_ceil(max);
            let bar = "█".repeat(bar_len);
            println!(
                "  {:<30} {} ({})",
                style(t).yellow(),
                style(&bar).green(),
                style(count).dim(),
            );
        }
    }

    if !stats.top_degree.is_empty() {
        println!();
        println!("{}Most Connected Senses", GRAPH);
        println!();
        for (i, (label, degree)) in stats.top_degree.iter().enumerate() {
            let bar_len = (*degree).min(30);
            let bar = "█".repeat(bar_len);
            println!(
                "  {:>2}. {:<30} {} ({})",
                i + 1,
                style(label).cyan().bold(),
                style(&bar).blue(),
                style(degree).dim(),
            );
        }
    }

    println!();

    Ok(())
}
