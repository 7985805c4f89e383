//! Per-model boundary overlays: one fill+outline layer pair per selected
//! model, reconciled against the current selection on every sync.

use std::collections::{BTreeMap, BTreeSet};

use fp_model::{FeatureCollection, ModelKey};

use crate::MapResult;
use crate::scene::{FillPaint, LayerKind, LayerSpec, LinePaint, MapScene};

pub fn boundary_fill_layer_id(key: ModelKey) -> String {
    key.boundary_stem().to_string()
}

pub fn boundary_border_layer_id(key: ModelKey) -> String {
    format!("{}-border", key.boundary_stem())
}

/// Reconcile boundary layers with the model selection.
///
/// Removes layer pairs for deselected models, adds pairs for newly selected
/// ones; a model already present is left alone, so repeated syncs are
/// no-ops. Does nothing until the scene's style has finished loading: a
/// style change wipes custom layers, and the next sync after the load
/// re-adds everything.
///
/// `boundaries` holds the parsed boundary resources; a selected model with
/// no entry (its resource failed to load) simply gets no overlay.
pub fn sync_boundaries(
    scene: &mut MapScene,
    selected: &BTreeSet<ModelKey>,
    boundaries: &BTreeMap<ModelKey, FeatureCollection>,
) -> MapResult<()> {
    if !scene.style_loaded() {
        return Ok(());
    }

    for key in ModelKey::ALL {
        let source_id = boundary_fill_layer_id(key);
        let want = selected.contains(&key) && boundaries.contains_key(&key);
        let have = scene.has_source(&source_id);

        if have && !want {
            scene.remove_layer(&boundary_border_layer_id(key));
            scene.remove_layer(&source_id);
            scene.remove_source(&source_id)?;
        } else if want && !have {
            let Some(data) = boundaries.get(&key) else {
                continue;
            };
            scene.add_source(source_id.clone(), data.clone())?;
            scene.add_layer(LayerSpec {
                id: source_id.clone(),
                source: source_id.clone(),
                kind: LayerKind::Fill(FillPaint {
                    color: key.boundary_color().to_string(),
                    opacity: 0.2,
                }),
            })?;
            scene.add_layer(LayerSpec {
                id: boundary_border_layer_id(key),
                source: source_id,
                kind: LayerKind::Line(LinePaint {
                    color: "black".to_string(),
                    width: 1.0,
                    opacity: 1.0,
                    dash: None,
                }),
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::MapStyle;

    fn all_boundaries() -> BTreeMap<ModelKey, FeatureCollection> {
        ModelKey::ALL
            .into_iter()
            .map(|k| (k, FeatureCollection::default()))
            .collect()
    }

    fn selected(keys: &[ModelKey]) -> BTreeSet<ModelKey> {
        keys.iter().copied().collect()
    }

    fn pair_count(scene: &MapScene) -> usize {
        ModelKey::ALL
            .into_iter()
            .filter(|k| {
                scene.has_layer(&boundary_fill_layer_id(*k))
                    && scene.has_layer(&boundary_border_layer_id(*k))
            })
            .count()
    }

    #[test]
    fn add_then_extend_selection() {
        let mut scene = MapScene::new(MapStyle::Streets);
        scene.finish_style_load();
        let boundaries = all_boundaries();

        sync_boundaries(&mut scene, &selected(&[ModelKey::Merced]), &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 1);

        sync_boundaries(
            &mut scene,
            &selected(&[ModelKey::Merced, ModelKey::Tuolumne]),
            &boundaries,
        )
        .unwrap();
        assert_eq!(pair_count(&scene), 2);
        assert!(scene.has_layer("Merced"));
        assert!(scene.has_layer("Tuolumne-border"));
    }

    #[test]
    fn resync_is_idempotent() {
        let mut scene = MapScene::new(MapStyle::Streets);
        scene.finish_style_load();
        let boundaries = all_boundaries();
        let sel = selected(&[ModelKey::Stanislaus]);

        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 1);
        assert_eq!(scene.layers().len(), 2);
    }

    #[test]
    fn deselection_removes_only_that_pair() {
        let mut scene = MapScene::new(MapStyle::Streets);
        scene.finish_style_load();
        let boundaries = all_boundaries();

        sync_boundaries(
            &mut scene,
            &selected(&[ModelKey::Merced, ModelKey::SanJoaquin]),
            &boundaries,
        )
        .unwrap();
        assert_eq!(pair_count(&scene), 2);

        sync_boundaries(&mut scene, &selected(&[ModelKey::SanJoaquin]), &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 1);
        assert!(scene.has_source("SJN"));
        assert!(!scene.has_source("Merced"));
    }

    #[test]
    fn gated_on_style_load() {
        let mut scene = MapScene::new(MapStyle::Streets);
        let boundaries = all_boundaries();
        let sel = selected(&[ModelKey::Merced]);

        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 0);

        scene.finish_style_load();
        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 1);
    }

    #[test]
    fn style_change_then_sync_readds() {
        let mut scene = MapScene::new(MapStyle::Streets);
        scene.finish_style_load();
        let boundaries = all_boundaries();
        let sel = selected(&[ModelKey::Merced, ModelKey::Tuolumne]);

        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        scene.set_style(MapStyle::Satellite);
        assert_eq!(pair_count(&scene), 0);

        // not loaded yet: still nothing
        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 0);

        scene.finish_style_load();
        sync_boundaries(&mut scene, &sel, &boundaries).unwrap();
        assert_eq!(pair_count(&scene), 2);
    }

    #[test]
    fn missing_boundary_resource_is_skipped() {
        let mut scene = MapScene::new(MapStyle::Streets);
        scene.finish_style_load();
        let mut boundaries = all_boundaries();
        boundaries.remove(&ModelKey::Tuolumne);

        sync_boundaries(
            &mut scene,
            &selected(&[ModelKey::Merced, ModelKey::Tuolumne]),
            &boundaries,
        )
        .unwrap();
        assert_eq!(pair_count(&scene), 1);
        assert!(!scene.has_source("Tuolumne"));
    }
}
