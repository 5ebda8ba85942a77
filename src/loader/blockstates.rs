//! Resolution of layered blockstate definitions into per-state unbaked
//! models and render-equivalence buckets.
//!
//! For every block type, the contributing definitions (one per source pack,
//! in pack-priority order) are applied in turn: later packs silently
//! override earlier bindings, while conflicting bindings *within* one
//! definition are an error that discards that definition. States that end
//! up sharing the same active model pieces and the same render-relevant
//! property values are grouped into one bucket and will share a single
//! baked model instance.

use super::models::missing_model_id;
use crate::error::{BakeryError, Result};
use crate::model::multipart::MultipartCase;
use crate::model::{ModelArena, MultipartModel, PieceHandle, Variant};
use crate::state::{BlockId, BlockRegistry, PropertyValue, RenderType, StateId, StatePredicate};
use crate::types::ResourceLocation;
use log::error;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Bucket id of states with a non-model render type.
pub const NO_MODEL_BUCKET: u32 = 0;

/// A blockstate definition contributed by one source pack.
#[derive(Debug, Clone)]
pub struct SourcedDefinition {
    /// Identifier of the contributing pack, for log context.
    pub pack: String,
    /// The definition body, already parsed to JSON.
    pub json: serde_json::Value,
}

impl SourcedDefinition {
    pub fn new(pack: impl Into<String>, json: serde_json::Value) -> Self {
        Self {
            pack: pack.into(),
            json,
        }
    }
}

/// Declares the property subset that visually distinguishes states of a
/// block (the properties its color provider reads). Narrower sets mean
/// more baked-model sharing.
pub trait RenderPropertySource {
    fn render_properties(&self, block: &ResourceLocation) -> Vec<String>;
}

/// No block has render-relevant properties; maximal sharing.
impl RenderPropertySource for () {
    fn render_properties(&self, _block: &ResourceLocation) -> Vec<String> {
        Vec::new()
    }
}

impl RenderPropertySource for HashMap<ResourceLocation, Vec<String>> {
    fn render_properties(&self, block: &ResourceLocation) -> Vec<String> {
        self.get(block).cloned().unwrap_or_default()
    }
}

/// One parsed blockstate definition file: variants or multipart, never both.
#[derive(Debug, Clone)]
pub enum BlockstateDefinition {
    /// Variant keys map to single-or-weighted models.
    Variants(BTreeMap<String, Vec<Variant>>),
    /// Conditional model layers.
    Multipart(Vec<MultipartCase>),
}

impl<'de> Deserialize<'de> for BlockstateDefinition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawDefinition {
            #[serde(default)]
            variants: Option<BTreeMap<String, VariantValue>>,
            #[serde(default)]
            multipart: Option<Vec<MultipartCase>>,
        }

        let raw = RawDefinition::deserialize(deserializer)?;

        // A multipart array wins over variants when both are present.
        if let Some(multipart) = raw.multipart {
            Ok(BlockstateDefinition::Multipart(multipart))
        } else if let Some(variants) = raw.variants {
            Ok(BlockstateDefinition::Variants(
                variants.into_iter().map(|(k, v)| (k, v.into_vec())).collect(),
            ))
        } else {
            Ok(BlockstateDefinition::Variants(BTreeMap::new()))
        }
    }
}

/// A variant value can be a single model or an array of weighted models.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VariantValue {
    Single(Variant),
    Multiple(Vec<Variant>),
}

impl VariantValue {
    fn into_vec(self) -> Vec<Variant> {
        match self {
            VariantValue::Single(v) => vec![v],
            VariantValue::Multiple(v) => v,
        }
    }
}

/// The unbaked model bound to one block state.
#[derive(Debug, Clone)]
pub enum BoundModel {
    /// A weighted variant list (one interned piece).
    Variants(PieceHandle),
    /// A multipart composite; active layers depend on the state.
    Multipart(Arc<MultipartModel>),
}

impl BoundModel {
    /// Model files this binding can reference.
    pub fn dependencies(&self, arena: &ModelArena) -> Vec<ResourceLocation> {
        match self {
            BoundModel::Variants(handle) => arena
                .models(*handle)
                .iter()
                .map(|v| v.model.clone())
                .collect(),
            BoundModel::Multipart(multipart) => multipart
                .components
                .iter()
                .flat_map(|c| arena.models(c.handle).iter().map(|v| v.model.clone()))
                .collect(),
        }
    }

    /// Identity handles of the pieces active for `state`.
    fn active_pieces(&self, registry: &BlockRegistry, state: StateId) -> Vec<PieceHandle> {
        match self {
            BoundModel::Variants(handle) => vec![*handle],
            BoundModel::Multipart(multipart) => multipart.active_handles(registry, state),
        }
    }
}

/// Render-equivalence key of one state: the model pieces active for it plus
/// its render-relevant property values, in declaration order. Equal keys
/// are guaranteed to bake identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pieces: Vec<PieceHandle>,
    values: Vec<PropertyValue>,
}

/// A group of states guaranteed to bake identically.
#[derive(Debug)]
pub struct Bucket {
    pub id: u32,
    pub states: Vec<StateId>,
}

/// Output of [`BlockStatesLoader::load`].
#[derive(Debug)]
pub struct BlockStatesResult {
    pub arena: ModelArena,
    /// Unbaked model per model-rendered state.
    pub bound: HashMap<StateId, BoundModel>,
    /// Bucket id per state. Complete after load: every state of every
    /// block has an entry.
    pub lookup: HashMap<StateId, u32>,
    /// Buckets in id order, ids starting at 1.
    pub buckets: Vec<Bucket>,
}

/// Resolves blockstate definitions for every registered block type.
pub struct BlockStatesLoader<'a> {
    registry: &'a BlockRegistry,
    definitions: &'a HashMap<ResourceLocation, Vec<SourcedDefinition>>,
    render_properties: &'a dyn RenderPropertySource,
}

impl<'a> BlockStatesLoader<'a> {
    pub fn new(
        registry: &'a BlockRegistry,
        definitions: &'a HashMap<ResourceLocation, Vec<SourcedDefinition>>,
        render_properties: &'a dyn RenderPropertySource,
    ) -> Self {
        Self {
            registry,
            definitions,
            render_properties,
        }
    }

    /// Resolve every block type. Never fails: broken definitions are
    /// discarded with a log entry and uncovered states fall back to the
    /// missing model.
    pub fn load(&self) -> BlockStatesResult {
        let mut arena = ModelArena::new();
        // shared placeholder binding for states no definition covered
        let missing = arena.intern(vec![Variant::plain(missing_model_id())]);

        let mut bound = HashMap::new();
        let mut lookup = HashMap::new();
        let mut buckets: Vec<Bucket> = Vec::new();
        let mut next_bucket: u32 = 1;

        for block_id in self.registry.load_order() {
            let block = self.registry.get(block_id);

            if block.render_type() != RenderType::Model {
                for state in self.registry.states_of(block_id) {
                    lookup.insert(state, NO_MODEL_BUCKET);
                }
                continue;
            }

            let block_bound = self.bind_block(block_id, missing, &mut arena);
            self.assign_buckets(
                block_id,
                &block_bound,
                &mut lookup,
                &mut buckets,
                &mut next_bucket,
            );
            for (index, model) in block_bound {
                bound.insert(
                    StateId {
                        block: block_id,
                        state: index,
                    },
                    model,
                );
            }
        }

        BlockStatesResult {
            arena,
            bound,
            lookup,
            buckets,
        }
    }

    /// Apply every contributing definition for one block, then fill gaps
    /// with the missing placeholder.
    fn bind_block(
        &self,
        block_id: BlockId,
        missing: PieceHandle,
        arena: &mut ModelArena,
    ) -> HashMap<usize, BoundModel> {
        let block = self.registry.get(block_id);
        let path = block.id().blockstate_path();
        let mut block_bound: HashMap<usize, BoundModel> = HashMap::new();

        if let Some(definitions) = self.definitions.get(&path) {
            for definition in definitions {
                match self.apply_definition(block_id, definition, arena) {
                    // cross-definition overlap: last writer wins
                    Ok(map) => block_bound.extend(map),
                    Err(err) => error!(
                        "discarding blockstate definition {} from pack '{}': {}",
                        path, definition.pack, err
                    ),
                }
            }
        }

        let states = block.states();
        for index in 0..states.state_count() {
            if !block_bound.contains_key(&index) {
                error!(
                    "no model for variant {}#{}",
                    block.id(),
                    states.variant_string(index)
                );
                block_bound.insert(index, BoundModel::Variants(missing));
            }
        }

        block_bound
    }

    /// Parse and bind one definition. Any error discards the whole
    /// definition without touching previously applied ones.
    fn apply_definition(
        &self,
        block_id: BlockId,
        source: &SourcedDefinition,
        arena: &mut ModelArena,
    ) -> Result<HashMap<usize, BoundModel>> {
        let definition: BlockstateDefinition = serde_json::from_value(source.json.clone())?;
        let block = self.registry.get(block_id);
        let state_count = block.states().state_count();
        let mut out = HashMap::new();

        match definition {
            BlockstateDefinition::Multipart(cases) => {
                let model = Arc::new(MultipartModel::compile(
                    self.registry,
                    block_id,
                    cases,
                    arena,
                )?);
                for index in 0..state_count {
                    out.insert(index, BoundModel::Multipart(model.clone()));
                }
            }
            BlockstateDefinition::Variants(entries) => {
                // the empty key is a fallback for states no other key claims;
                // two non-empty keys claiming the same state is an error
                let mut default_handle: Option<PieceHandle> = None;
                let mut bound_by: HashMap<usize, (PieceHandle, String)> = HashMap::new();
                for (key, models) in entries {
                    let handle = arena.intern(models);
                    if key.is_empty() {
                        default_handle = Some(handle);
                        continue;
                    }
                    let predicate = StatePredicate::compile(self.registry, block_id, &key)?;
                    for index in 0..state_count {
                        let state = StateId {
                            block: block_id,
                            state: index,
                        };
                        if !predicate.test(self.registry, state) {
                            continue;
                        }
                        if let Some((previous, first_key)) = bound_by.get(&index) {
                            if *previous != handle {
                                return Err(BakeryError::VariantOverlap {
                                    block: block.id().to_string(),
                                    first: first_key.clone(),
                                    second: key.clone(),
                                    state: block.states().variant_string(index),
                                });
                            }
                        }
                        bound_by.insert(index, (handle, key.clone()));
                    }
                }
                for index in 0..state_count {
                    if let Some((handle, _)) = bound_by.get(&index) {
                        out.insert(index, BoundModel::Variants(*handle));
                    } else if let Some(handle) = default_handle {
                        out.insert(index, BoundModel::Variants(handle));
                    }
                }
            }
        }

        Ok(out)
    }

    /// Group one block's states by render-equivalence key and hand out
    /// bucket ids. Every state gets an id, singletons included.
    fn assign_buckets(
        &self,
        block_id: BlockId,
        block_bound: &HashMap<usize, BoundModel>,
        lookup: &mut HashMap<StateId, u32>,
        buckets: &mut Vec<Bucket>,
        next_bucket: &mut u32,
    ) {
        let block = self.registry.get(block_id);
        let states = block.states();

        // render-relevant subset, as declaration-order property indices
        let mut relevant: Vec<usize> = self
            .render_properties
            .render_properties(block.id())
            .iter()
            .filter_map(|name| states.property_index(name))
            .collect();
        relevant.sort_unstable();
        relevant.dedup();

        let mut key_ids: HashMap<ModelKey, u32> = HashMap::new();
        for index in 0..states.state_count() {
            let state = StateId {
                block: block_id,
                state: index,
            };
            let model = &block_bound[&index];
            let key = ModelKey {
                pieces: model.active_pieces(self.registry, state),
                values: relevant
                    .iter()
                    .map(|&p| states.values(index)[p].clone())
                    .collect(),
            };
            let id = *key_ids.entry(key).or_insert_with(|| {
                let id = *next_bucket;
                *next_bucket += 1;
                buckets.push(Bucket {
                    id,
                    states: Vec::new(),
                });
                id
            });
            buckets[(id - 1) as usize].states.push(state);
            lookup.insert(state, id);
        }
    }
}
