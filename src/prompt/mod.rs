//! Definition request prompts built from a sense's graph neighbourhood.

pub mod templates;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::{RelationType, SenseGraph, SenseId};
use crate::registry::DefinitionTable;

/// Bounds and formatting knobs for prompt generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Maximum definition length requested from the model, in words.
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,
    /// Maximum number of outgoing relations listed.
    #[serde(default = "default_outgoing_limit")]
    pub outgoing_limit: usize,
    /// Maximum number of incoming relations listed.
    #[serde(default = "default_incoming_limit")]
    pub incoming_limit: usize,
    /// Length of the sense-number suffix stripped from identifiers.
    #[serde(default = "default_suffix_len")]
    pub suffix_len: usize,
}

fn default_word_limit() -> usize {
    30
}

fn default_outgoing_limit() -> usize {
    10
}

fn default_incoming_limit() -> usize {
    8
}

fn default_suffix_len() -> usize {
    4
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            word_limit: default_word_limit(),
            outgoing_limit: default_outgoing_limit(),
            incoming_limit: default_incoming_limit(),
            suffix_len: default_suffix_len(),
        }
    }
}

/// Human-readable form of a sense identifier: the trailing `suffix_len`
/// characters are dropped and underscores become spaces.
pub fn display_form(sense: &str, suffix_len: usize) -> String {
    let keep = sense.chars().count().saturating_sub(suffix_len);
    sense
        .chars()
        .take(keep)
        .map(|c| if c == '_' { ' ' } else { c })
        .collect()
}

/// A relation between the target sense and a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationEntry<'a> {
    pub relation: &'a RelationType,
    pub sense: &'a SenseId,
}

impl RelationEntry<'_> {
    fn key(&self) -> (&str, &str) {
        (self.relation.as_str(), self.sense.as_str())
    }
}

/// Every relation incident to a sense, in graph order.
#[derive(Debug, Clone, Default)]
pub struct Neighborhood<'a> {
    pub outgoing: Vec<RelationEntry<'a>>,
    pub incoming: Vec<RelationEntry<'a>>,
}

impl<'a> Neighborhood<'a> {
    pub fn collect(graph: &'a SenseGraph, sense: &str) -> Self {
        let outgoing = graph
            .successors(sense)
            .flat_map(|(succ, relations)| {
                relations.iter().map(move |relation| RelationEntry { relation, sense: succ })
            })
            .collect();
        let incoming = graph
            .predecessors(sense)
            .flat_map(|(pred, relations)| {
                relations.iter().map(move |relation| RelationEntry { relation, sense: pred })
            })
            .collect();
        Self { outgoing, incoming }
    }

    /// Apply the listing policy: the outgoing list keeps its first
    /// `outgoing_limit` entries; an incoming entry is dropped when the same
    /// `(type, sense)` pair is anywhere in the full outgoing list, and the
    /// remainder keeps its first `incoming_limit` entries.
    pub fn select(&self, settings: &PromptSettings) -> Neighborhood<'a> {
        let shown_out: HashSet<(&str, &str)> = self.outgoing.iter().map(RelationEntry::key).collect();

        let outgoing = self
            .outgoing
            .iter()
            .take(settings.outgoing_limit)
            .copied()
            .collect();
        let incoming = self
            .incoming
            .iter()
            .filter(|entry| !shown_out.contains(&entry.key()))
            .take(settings.incoming_limit)
            .copied()
            .collect();

        Neighborhood { outgoing, incoming }
    }
}

/// Renders definition request prompts for senses of a finished graph.
pub struct PromptGenerator<'a> {
    graph: &'a SenseGraph,
    definitions: &'a DefinitionTable,
    settings: PromptSettings,
}

impl<'a> PromptGenerator<'a> {
    pub fn new(graph: &'a SenseGraph, definitions: &'a DefinitionTable, settings: PromptSettings) -> Self {
        Self {
            graph,
            definitions,
            settings,
        }
    }

    /// Relations that will appear in the prompt for `sense`.
    pub fn neighborhood(&self, sense: &str) -> Neighborhood<'a> {
        Neighborhood::collect(self.graph, sense).select(&self.settings)
    }

    /// Build the prompt for `sense`. A sense without incident edges, or one
    /// absent from the graph, gets a prompt whose relation blocks are empty.
    pub fn generate(&self, sense: &str) -> String {
        let selected = self.neighborhood(sense);
        let word = display_form(sense, self.settings.suffix_len);

        let outgoing: Vec<String> = selected.outgoing.iter().map(|e| self.render_entry(e)).collect();
        let incoming: Vec<String> = selected.incoming.iter().map(|e| self.render_entry(e)).collect();

        let mut prompt = templates::opening(&word);
        prompt.push_str(&templates::instructions(self.settings.word_limit));
        prompt.push_str(templates::OUTGOING_HEADER);
        prompt.push_str(&outgoing.join("\n"));
        prompt.push_str(templates::INCOMING_HEADER);
        prompt.push_str(&incoming.join("\n"));
        prompt.push('\n');
        prompt
    }

    fn render_entry(&self, entry: &RelationEntry<'_>) -> String {
        let definition = self
            .definitions
            .get(entry.sense.as_str())
            .filter(|d| !d.trim().is_empty());
        templates::relation_entry(
            entry.relation.as_str(),
            &display_form(entry.sense.as_str(), self.settings.suffix_len),
            definition,
        )
    }
}
