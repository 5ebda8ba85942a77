//! The reload pipeline: blockstate resolution, model loading and baking.
//!
//! [`bake`] runs the whole pipeline over one set of inputs and produces the
//! immutable lookup tables the renderer reads. Within one bucket a single
//! model is baked and shared by every member state.

pub mod blockstates;
pub mod models;

pub use blockstates::{
    BlockStatesLoader, BlockStatesResult, BlockstateDefinition, BoundModel, Bucket,
    RenderPropertySource, SourcedDefinition, NO_MODEL_BUCKET,
};
pub use models::{missing_model_id, Baker, ModelLoader};

use crate::error::{BakeryError, Result};
use crate::model::{choose_weighted, BakedModel, ModelArena, Sprite, SpriteResolver};
use crate::state::{BlockRegistry, StateId};
use crate::types::{BlockTransform, ModelId, ResourceLocation};
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything one reload consumes. All sources are borrowed; the pipeline
/// owns nothing but its outputs.
pub struct ReloadInput<'a> {
    pub registry: &'a BlockRegistry,
    /// Blockstate definitions per definition path, pack-priority order.
    pub definitions: &'a HashMap<ResourceLocation, Vec<SourcedDefinition>>,
    /// Parsed model files by location.
    pub model_sources: &'a HashMap<ResourceLocation, serde_json::Value>,
    /// Item models to bake under their inventory pose.
    pub items: &'a [ResourceLocation],
    pub render_properties: &'a dyn RenderPropertySource,
    pub sprites: &'a dyn SpriteResolver,
}

/// The immutable output tables of one reload.
pub struct BakedTables {
    /// Render-equivalence bucket per state. Complete over the registry.
    pub lookup: HashMap<StateId, u32>,
    /// Baked model per model id. States in one bucket share one instance.
    pub models: HashMap<ModelId, Arc<BakedModel>>,
    /// The baked fallback, always present.
    pub missing: Arc<BakedModel>,
}

/// Model id under which a state's baked model is registered.
pub fn state_model_id(registry: &BlockRegistry, state: StateId) -> ModelId {
    ModelId::with_variant(
        registry.get(state.block).id().clone(),
        registry.variant_string(state),
    )
}

/// Run the full pipeline. The only fatal failures are a broken builtin
/// missing model and a missing model that fails to bake; everything else
/// degrades to per-state fallbacks.
pub fn bake(input: &ReloadInput<'_>) -> Result<BakedTables> {
    let resolved =
        BlockStatesLoader::new(input.registry, input.definitions, input.render_properties).load();

    let mut baker = Baker::new(input.model_sources, input.sprites)?;
    let missing = baker
        .bake(&missing_model_id(), BlockTransform::default())
        .map_err(|e| BakeryError::BuiltinModel(e.to_string()))?;

    let mut models: HashMap<ModelId, Arc<BakedModel>> = HashMap::new();

    for bucket in &resolved.buckets {
        let Some(&representative) = bucket.states.first() else {
            continue;
        };
        // all states in a bucket resolve identically; bake once
        let baked = match resolved.bound.get(&representative) {
            Some(bound) => bake_bound(
                &mut baker,
                &resolved.arena,
                input.registry,
                bound,
                representative,
                &missing,
            ),
            None => missing.clone(),
        };
        for &state in &bucket.states {
            models.insert(state_model_id(input.registry, state), baked.clone());
        }
    }

    for item in input.items {
        let baked = match baker.bake(item, BlockTransform::default()) {
            Ok(baked) => baked,
            Err(err) => {
                warn!("substituting missing model for item {item}: {err}");
                missing.clone()
            }
        };
        models.insert(ModelId::inventory(item.clone()), baked);
    }

    Ok(BakedTables {
        lookup: resolved.lookup,
        models,
        missing,
    })
}

/// Bake the model bound to one state. Variant bindings pick one weighted
/// entry; multipart bindings bake each active layer and compose the quads.
fn bake_bound(
    baker: &mut Baker<'_>,
    arena: &ModelArena,
    registry: &BlockRegistry,
    bound: &BoundModel,
    state: StateId,
    missing: &Arc<BakedModel>,
) -> Arc<BakedModel> {
    match bound {
        BoundModel::Variants(handle) => {
            let Some(variant) = choose_weighted(arena.models(*handle)) else {
                warn!(
                    "empty variant list for {}",
                    state_model_id(registry, state)
                );
                return missing.clone();
            };
            match baker.bake(&variant.model, variant.transform()) {
                Ok(baked) => baked,
                Err(err) => {
                    warn!("substituting missing model for {}: {err}", variant.model);
                    missing.clone()
                }
            }
        }
        BoundModel::Multipart(multipart) => {
            let mut quads = Vec::new();
            let mut particle: Option<Sprite> = None;
            let mut ambient_occlusion = true;

            for handle in multipart.active_handles(registry, state) {
                let Some(variant) = choose_weighted(arena.models(handle)) else {
                    continue;
                };
                match baker.bake(&variant.model, variant.transform()) {
                    Ok(layer) => {
                        quads.extend(layer.quads.iter().cloned());
                        if particle.is_none() {
                            particle = Some(layer.particle.clone());
                        }
                        ambient_occlusion &= layer.ambient_occlusion;
                    }
                    // a broken layer drops out; the rest of the composite stands
                    Err(err) => {
                        warn!("dropping multipart layer {}: {err}", variant.model);
                    }
                }
            }

            // an empty composite is valid: nothing matched, renders nothing
            Arc::new(BakedModel {
                quads,
                particle: particle.unwrap_or_else(Sprite::missing),
                ambient_occlusion,
            })
        }
    }
}
