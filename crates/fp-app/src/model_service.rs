//! Model-set loading and summaries.
//!
//! A "set" is whatever subset of the known models the user has selected.
//! Models load concurrently and independently: one bad file degrades to an
//! empty stand-in instead of blanking the whole view. Only when every
//! selected model fails does the set reset to the error-title state.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::thread;

use fp_model::{
    Edge, FeatureCollection, ModelData, ModelKey, Node, load_boundary, load_model,
};

use crate::error::AppResult;

/// Combined title when every selected model failed to load.
pub const ERROR_LOADING_TITLE: &str = "Error Loading Title";

/// The loaded selection: per-model data plus the combined display title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSet {
    pub models: Vec<ModelData>,
    pub title: String,
}

impl ModelSet {
    pub fn empty() -> ModelSet {
        ModelSet::default()
    }

    /// All nodes across the set, concatenated in selection order.
    pub fn combined_nodes(&self) -> Vec<Node> {
        self.models.iter().flat_map(|m| m.nodes.clone()).collect()
    }

    /// All edges across the set, concatenated in selection order.
    pub fn combined_edges(&self) -> Vec<Edge> {
        self.models.iter().flat_map(|m| m.edges.clone()).collect()
    }
}

/// Load each selected model, fanning out one thread per model and joining
/// the results in selection order.
///
/// Title rules: empty selection → empty title; single model → its own
/// title; multiple → titles joined with " | " (a failed model contributes
/// its display name). If *every* selected model fails, the set resets to
/// empty with [`ERROR_LOADING_TITLE`].
pub fn load_model_set(data_dir: &Path, selections: &[ModelKey]) -> ModelSet {
    if selections.is_empty() {
        return ModelSet::empty();
    }

    let results: Vec<(ModelData, bool)> = thread::scope(|s| {
        let handles: Vec<_> = selections
            .iter()
            .map(|&key| (key, s.spawn(move || load_or_empty(data_dir, key))))
            .collect();
        handles
            .into_iter()
            .map(|(key, handle)| {
                handle
                    .join()
                    .unwrap_or_else(|_| (ModelData::empty(key), false))
            })
            .collect()
    });

    if results.iter().all(|(_, ok)| !ok) {
        return ModelSet {
            models: Vec::new(),
            title: ERROR_LOADING_TITLE.to_string(),
        };
    }

    let title = if results.len() == 1 {
        results[0].0.title.clone()
    } else {
        results
            .iter()
            .map(|(m, _)| m.title.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    };

    ModelSet {
        models: results.into_iter().map(|(m, _)| m).collect(),
        title,
    }
}

fn load_or_empty(data_dir: &Path, key: ModelKey) -> (ModelData, bool) {
    match load_model(data_dir, key) {
        Ok(model) => (model, true),
        Err(err) => {
            tracing::warn!(model = %key, error = %err, "model failed to load");
            (ModelData::empty(key), false)
        }
    }
}

/// Load boundary resources for the given models. Failures are logged and
/// skipped; the returned map only holds the boundaries that parsed.
pub fn load_boundaries<I>(data_dir: &Path, keys: I) -> BTreeMap<ModelKey, FeatureCollection>
where
    I: IntoIterator<Item = ModelKey>,
{
    let mut out = BTreeMap::new();
    for key in keys {
        match load_boundary(data_dir, key) {
            Ok(fc) => {
                out.insert(key, fc);
            }
            Err(err) => {
                tracing::warn!(model = %key, error = %err, "boundary resource failed to load");
            }
        }
    }
    out
}

/// Headline numbers for one model, used by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub key: ModelKey,
    pub title: String,
    pub node_count: usize,
    pub placeable_nodes: usize,
    pub edge_count: usize,
    /// Edges whose endpoints both resolve to placeable nodes.
    pub renderable_edges: usize,
    /// Edges naming at least one node that does not exist.
    pub dangling_edges: usize,
}

pub fn summarize(model: &ModelData) -> ModelSummary {
    let names: HashSet<&str> = model.nodes.iter().map(|n| n.name.as_str()).collect();
    let placeable: HashSet<&str> = model
        .nodes
        .iter()
        .filter(|n| n.position().is_some())
        .map(|n| n.name.as_str())
        .collect();

    let dangling_edges = model
        .edges
        .iter()
        .filter(|e| !names.contains(e.source.as_str()) || !names.contains(e.target.as_str()))
        .count();
    let renderable_edges = model
        .edges
        .iter()
        .filter(|e| placeable.contains(e.source.as_str()) && placeable.contains(e.target.as_str()))
        .count();

    ModelSummary {
        key: model.key,
        title: model.title.clone(),
        node_count: model.nodes.len(),
        placeable_nodes: placeable.len(),
        edge_count: model.edges.len(),
        renderable_edges,
        dangling_edges,
    }
}

/// Resolve command-line model names (display names or short basin names)
/// into keys.
pub fn resolve_keys(names: &[String]) -> AppResult<Vec<ModelKey>> {
    names
        .iter()
        .map(|name| Ok(name.parse::<ModelKey>()?))
        .collect()
}
