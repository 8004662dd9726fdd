//! Presentation model for rendered result pages
//!
//! Everything the templates need is computed here so the templates stay
//! dumb: snippets, score badges, and the expand/collapse links that carry
//! per-result toggle state through the `expand` query parameter.

use crate::results::SearchResult;
use serde::Serialize;

/// Snippet length in characters before the trailing ellipsis.
const SNIPPET_CHARS: usize = 100;

/// Which results of the current set are expanded.
///
/// Flags are positional over the rendered set, so they reset implicitly
/// whenever a new search produces a new set: indices from a previous page
/// that no longer fit are dropped on parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionState {
    expanded: Vec<bool>,
}

impl ExpansionState {
    /// All-collapsed state for a set of `len` results.
    pub fn collapsed(len: usize) -> Self {
        Self {
            expanded: vec![false; len],
        }
    }

    /// Parse the `expand` query parameter for a set of `len` results.
    ///
    /// The parameter is a comma-separated list of result indices. Tokens
    /// that are not indices into the current set are ignored.
    pub fn from_query(raw: Option<&str>, len: usize) -> Self {
        let mut state = Self::collapsed(len);
        if let Some(raw) = raw {
            for index in raw.split(',').filter_map(|t| t.trim().parse::<usize>().ok()) {
                if index < len {
                    state.expanded[index] = true;
                }
            }
        }
        state
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Value of the `expand` parameter after toggling one result.
    pub fn toggle_query(&self, index: usize) -> String {
        let mut parts = Vec::new();
        for (i, &expanded) in self.expanded.iter().enumerate() {
            let flag = if i == index { !expanded } else { expanded };
            if flag {
                parts.push(i.to_string());
            }
        }
        parts.join(",")
    }
}

/// One result prepared for the template.
#[derive(Debug, Serialize)]
pub struct ResultEntry {
    pub index: usize,
    pub snippet: String,
    pub path: String,
    pub score_label: String,
    pub score_band: &'static str,
    pub html: String,
    pub expanded: bool,
    /// `expand` parameter value for this entry's toggle link.
    pub toggle_expand: String,
}

/// Prepare a result set for rendering.
pub fn build_entries(results: &[SearchResult], expansion: &ExpansionState) -> Vec<ResultEntry> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| ResultEntry {
            index,
            snippet: snippet(&result.content),
            path: result.path.clone(),
            score_label: result.score.to_string(),
            score_band: score_band(result.score),
            html: result.html.clone(),
            expanded: expansion.is_expanded(index),
            toggle_expand: expansion.toggle_query(index),
        })
        .collect()
}

/// Leading slice of the matched content, always ellipsized.
fn snippet(content: &str) -> String {
    let head: String = content.chars().take(SNIPPET_CHARS).collect();
    format!("{head}...")
}

/// Badge class for a relevance score: strong matches above 90, moderate
/// above 70, everything else weak. Out-of-range scores are not clamped.
fn score_band(score: f64) -> &'static str {
    if score > 90.0 {
        "high"
    } else if score > 70.0 {
        "medium"
    } else {
        "low"
    }
}
