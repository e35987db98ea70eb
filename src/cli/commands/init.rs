use anyhow::{Context, Result};
use console::{Emoji, style};
use std::fs;
use std::path::Path;

use crate::config::Config;

static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

pub fn run(config_path: Option<&Path>, force: bool, data_dir: &Path) -> Result<()> {
    println!();
    println!("{}", style(" glossgraph - Initialization ").bold().reverse());
    println!();

    let config_path = match config_path {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };

    if config_path.exists() && !force {
        println!(
            "{}Configuration already exists at {}",
            WARN,
            style(config_path.display()).cyan()
        );
        println!("  Use {} to overwrite", style("--force").yellow());
        return Ok(());
    }

    if let Some(dir) = config_path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let data_dir = std::path::absolute(data_dir)
        .with_context(|| format!("Failed to resolve data directory {}", data_dir.display()))?;
    let default_config = Config::template(&data_dir);

    let config_content = toml::to_string_pretty(&default_config)?;
    fs::write(&config_path, config_content).context("Failed to write config file")?;

    println!(
        "{}Created configuration at {}",
        CHECK,
        style(config_path.display()).cyan()
    );

    let missing: Vec<_> = std::iter::once(default_config.senses_path())
        .chain(std::iter::once(default_config.definitions_path()))
        .chain(default_config.relation_paths())
        .filter(|p| !p.exists())
        .collect();
    if !missing.is_empty() {
        println!();
        println!("{}Dataset files not found yet:", WARN);
        for path in &missing {
            println!("  {} {}", style("•").dim(), style(path.display()).yellow());
        }
        println!("  Edit {} to point at your copy.", style(config_path.display()).cyan());
    }

    println!();
    println!("{}Next steps:", ROCKET);
    println!();
    println!("    {} glossgraph stats", style("$").dim());
    println!("    {} glossgraph prompts --output prompts.jsonl", style("$").dim());
    println!();

    Ok(())
}
