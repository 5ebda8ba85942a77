//! Render-side facade over the baked tables.

use crate::error::Result;
use crate::loader::{self, BakedTables, ReloadInput, NO_MODEL_BUCKET};
use crate::model::{BakedModel, Sprite};
use crate::state::{BlockRegistry, StateId};
use crate::types::{ModelId, ResourceLocation};
use std::sync::Arc;

/// The renderer's view of one completed reload. Every accessor is total:
/// unknown states and ids come back as the missing model, never a panic.
pub struct BlockModels {
    tables: BakedTables,
}

impl BlockModels {
    pub fn new(tables: BakedTables) -> Self {
        Self { tables }
    }

    /// Run the reload pipeline and wrap its output.
    pub fn bake(input: &ReloadInput<'_>) -> Result<Self> {
        Ok(Self::new(loader::bake(input)?))
    }

    /// Baked model for a block state. Handles outside the registry fall
    /// back to the missing model like any other miss.
    pub fn model(&self, registry: &BlockRegistry, state: StateId) -> &Arc<BakedModel> {
        if !registry.contains(state) {
            return &self.tables.missing;
        }
        self.tables
            .models
            .get(&loader::state_model_id(registry, state))
            .unwrap_or(&self.tables.missing)
    }

    /// Baked model for an arbitrary model id (item poses included).
    pub fn model_by_id(&self, id: &ModelId) -> &Arc<BakedModel> {
        self.tables.models.get(id).unwrap_or(&self.tables.missing)
    }

    /// Baked inventory model of an item.
    pub fn item_model(&self, item: &ResourceLocation) -> &Arc<BakedModel> {
        self.model_by_id(&ModelId::inventory(item.clone()))
    }

    /// Particle sprite of a state's model.
    pub fn particle_sprite(&self, registry: &BlockRegistry, state: StateId) -> &Sprite {
        &self.model(registry, state).particle
    }

    /// Render-equivalence bucket of a state; [`NO_MODEL_BUCKET`] for states
    /// that are not model-rendered, `None` for states outside the tables.
    pub fn bucket(&self, state: StateId) -> Option<u32> {
        self.tables.lookup.get(&state).copied()
    }

    /// True when the state renders through the model pipeline.
    pub fn is_model_rendered(&self, state: StateId) -> bool {
        self.bucket(state).is_some_and(|b| b != NO_MODEL_BUCKET)
    }

    pub fn missing(&self) -> &Arc<BakedModel> {
        &self.tables.missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SourcedDefinition;
    use crate::state::{RenderType, StateManager};
    use std::collections::HashMap;

    fn baked_fixture() -> (BlockRegistry, StateId, StateId, BlockModels) {
        let mut registry = BlockRegistry::new();
        let stone = registry.register(
            ResourceLocation::parse("core:stone"),
            StateManager::stateless(),
            RenderType::Model,
        );
        let chest = registry.register(
            ResourceLocation::parse("core:chest"),
            StateManager::stateless(),
            RenderType::BlockEntity,
        );

        let mut definitions = HashMap::new();
        definitions.insert(
            ResourceLocation::parse("core:stone").blockstate_path(),
            vec![SourcedDefinition::new(
                "base",
                serde_json::json!({ "variants": { "": { "model": "block/stone" } } }),
            )],
        );

        let mut model_sources = HashMap::new();
        model_sources.insert(
            ResourceLocation::parse("block/stone"),
            serde_json::json!({
                "textures": { "particle": "block/stone", "all": "block/stone" },
                "elements": [{
                    "from": [0, 0, 0], "to": [16, 16, 16],
                    "faces": { "up": { "texture": "#all", "cullface": "up" } }
                }]
            }),
        );

        let location = ResourceLocation::parse("block/stone");
        let mut sprites = HashMap::new();
        sprites.insert(location.clone(), Sprite::new(location, 0.0, 0.0, 1.0, 1.0));

        let models = BlockModels::bake(&ReloadInput {
            registry: &registry,
            definitions: &definitions,
            model_sources: &model_sources,
            items: &[],
            render_properties: &(),
            sprites: &sprites,
        })
        .unwrap();

        (
            registry,
            StateId { block: stone, state: 0 },
            StateId { block: chest, state: 0 },
            models,
        )
    }

    #[test]
    fn test_model_lookup() {
        let (registry, stone, _, models) = baked_fixture();
        assert_eq!(models.model(&registry, stone).quads.len(), 1);
        assert_eq!(
            models.particle_sprite(&registry, stone).location,
            ResourceLocation::parse("block/stone")
        );
        assert!(models.is_model_rendered(stone));
    }

    #[test]
    fn test_non_model_state() {
        let (registry, _, chest, models) = baked_fixture();
        assert_eq!(models.bucket(chest), Some(NO_MODEL_BUCKET));
        assert!(!models.is_model_rendered(chest));
        // still total: falls back to the missing model
        assert!(Arc::ptr_eq(models.model(&registry, chest), models.missing()));
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        let (_, _, _, models) = baked_fixture();
        assert!(Arc::ptr_eq(
            models.item_model(&ResourceLocation::parse("item/unknown")),
            models.missing(),
        ));
        assert_eq!(models.bucket(StateId { block: 99, state: 0 }), None);
    }

    #[test]
    fn test_out_of_registry_state_falls_back() {
        let (registry, stone, _, models) = baked_fixture();

        // handles that never came from this registry resolve like any miss
        let stray_block = StateId { block: 99, state: 0 };
        let stray_state = StateId { block: stone.block, state: 99 };
        assert!(Arc::ptr_eq(models.model(&registry, stray_block), models.missing()));
        assert!(Arc::ptr_eq(models.model(&registry, stray_state), models.missing()));
        assert!(models
            .particle_sprite(&registry, stray_block)
            .is_missing());
    }
}
