//! Multipart model definitions: independently-predicated geometry layers.
//!
//! A multipart definition is an ordered list of cases. Every case whose
//! `when` condition matches a state contributes its models as one layer.

use super::{ModelArena, PieceHandle, Variant};
use crate::error::{BakeryError, Result};
use crate::state::{BlockId, BlockRegistry, PropertyMatch, StateCondition, StateId, StatePredicate};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One case from a `multipart` array, as parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct MultipartCase {
    /// Condition for when this case applies. Absent = always applies.
    #[serde(default)]
    pub when: Option<Condition>,
    /// Model(s) to apply when the condition is met.
    pub apply: ApplyValue,
}

/// The apply value can be a single model or a weighted array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApplyValue {
    Single(Variant),
    Multiple(Vec<Variant>),
}

impl ApplyValue {
    pub fn into_vec(self) -> Vec<Variant> {
        match self {
            ApplyValue::Single(v) => vec![v],
            ApplyValue::Multiple(v) => v,
        }
    }
}

/// Raw `when` condition. Values may carry `|`-separated alternatives
/// (e.g., `"north|south"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// OR condition: any of the sub-conditions must match.
    Or {
        #[serde(rename = "OR")]
        any: Vec<Condition>,
    },
    /// AND condition: all of the sub-conditions must match.
    And {
        #[serde(rename = "AND")]
        all: Vec<Condition>,
    },
    /// Simple condition: all listed properties must match.
    Simple(BTreeMap<String, String>),
}

impl Condition {
    /// Compile against one block type's state manager. Unknown properties
    /// and out-of-domain values are hard errors for the definition.
    pub fn compile(&self, registry: &BlockRegistry, block: BlockId) -> Result<StateCondition> {
        match self {
            Condition::Or { any } => Ok(StateCondition::Any(
                any.iter()
                    .map(|c| c.compile(registry, block))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Condition::And { all } => Ok(StateCondition::All(
                all.iter()
                    .map(|c| c.compile(registry, block))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Condition::Simple(terms) => {
                let block_type = registry.get(block);
                let mut matches = Vec::with_capacity(terms.len());
                for (name, raw) in terms {
                    let property = block_type.states().property_index(name).ok_or_else(|| {
                        BakeryError::UnknownProperty {
                            block: block_type.id().to_string(),
                            property: name.clone(),
                        }
                    })?;
                    let definition = &block_type.states().properties()[property];
                    let mut allowed = Vec::new();
                    for alternative in raw.split('|') {
                        let value = definition.parse_value(alternative).ok_or_else(|| {
                            BakeryError::InvalidPropertyValue {
                                block: block_type.id().to_string(),
                                property: name.clone(),
                                value: alternative.to_string(),
                                allowed: definition.allowed_values(),
                            }
                        })?;
                        allowed.push(value);
                    }
                    matches.push(PropertyMatch { property, allowed });
                }
                Ok(StateCondition::Match(StatePredicate::from_matches(
                    block, matches,
                )))
            }
        }
    }
}

/// One compiled multipart layer.
#[derive(Debug, Clone)]
pub struct MultipartComponent {
    pub condition: StateCondition,
    /// Identity handle of this component's parsed variant list.
    pub handle: PieceHandle,
}

/// A compiled multipart model bound to one block type.
#[derive(Debug, Clone)]
pub struct MultipartModel {
    pub components: Vec<MultipartComponent>,
}

impl MultipartModel {
    /// Compile a parsed case list, interning each component's models.
    pub fn compile(
        registry: &BlockRegistry,
        block: BlockId,
        cases: Vec<MultipartCase>,
        arena: &mut ModelArena,
    ) -> Result<Self> {
        let mut components = Vec::with_capacity(cases.len());
        for case in cases {
            let condition = match &case.when {
                Some(condition) => condition.compile(registry, block)?,
                None => StateCondition::Always,
            };
            let handle = arena.intern(case.apply.into_vec());
            components.push(MultipartComponent { condition, handle });
        }
        Ok(Self { components })
    }

    /// Handles of the components active for `state`, in declaration order.
    pub fn active_handles(&self, registry: &BlockRegistry, state: StateId) -> Vec<PieceHandle> {
        self.components
            .iter()
            .filter(|c| c.condition.test(registry, state))
            .map(|c| c.handle)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Property, RenderType, StateManager};
    use crate::types::ResourceLocation;

    fn fence_registry() -> (BlockRegistry, BlockId) {
        let mut registry = BlockRegistry::new();
        let block = registry.register(
            ResourceLocation::parse("core:fence"),
            StateManager::new(vec![Property::bool("north"), Property::bool("south")]).unwrap(),
            RenderType::Model,
        );
        (registry, block)
    }

    fn state(registry: &BlockRegistry, block: BlockId, key: &str) -> StateId {
        let predicate = StatePredicate::compile(registry, block, key).unwrap();
        registry
            .states_of(block)
            .find(|&s| predicate.test(registry, s))
            .unwrap()
    }

    #[test]
    fn test_parse_multipart() {
        let json = r#"[
            { "apply": { "model": "block/fence_post" } },
            { "when": { "north": "true" }, "apply": { "model": "block/fence_side" } }
        ]"#;

        let cases: Vec<MultipartCase> = serde_json::from_str(json).unwrap();
        assert_eq!(cases.len(), 2);
        assert!(cases[0].when.is_none());
        assert!(cases[1].when.is_some());
    }

    #[test]
    fn test_active_handles() {
        let (registry, block) = fence_registry();
        let json = r#"[
            { "apply": { "model": "block/fence_post" } },
            { "when": { "north": "true" }, "apply": { "model": "block/fence_side" } },
            { "when": { "south": "true" }, "apply": { "model": "block/fence_side", "y": 180 } }
        ]"#;
        let cases: Vec<MultipartCase> = serde_json::from_str(json).unwrap();
        let mut arena = ModelArena::new();
        let model = MultipartModel::compile(&registry, block, cases, &mut arena).unwrap();

        let lone = state(&registry, block, "north=false,south=false");
        assert_eq!(model.active_handles(&registry, lone).len(), 1);

        let both = state(&registry, block, "north=true,south=true");
        assert_eq!(model.active_handles(&registry, both).len(), 3);
    }

    #[test]
    fn test_or_condition() {
        let (registry, block) = fence_registry();
        let json = r#"{ "OR": [{ "north": "true" }, { "south": "true" }] }"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        let compiled = condition.compile(&registry, block).unwrap();

        assert!(compiled.test(&registry, state(&registry, block, "north=true,south=false")));
        assert!(compiled.test(&registry, state(&registry, block, "north=false,south=true")));
        assert!(!compiled.test(&registry, state(&registry, block, "north=false,south=false")));
    }

    #[test]
    fn test_pipe_alternatives() {
        let mut registry = BlockRegistry::new();
        let block = registry.register(
            ResourceLocation::parse("core:rail"),
            StateManager::new(vec![Property::enumeration(
                "shape",
                ["straight", "curved", "ascending"],
            )])
            .unwrap(),
            RenderType::Model,
        );

        let json = r#"{ "shape": "straight|curved" }"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        let compiled = condition.compile(&registry, block).unwrap();

        assert!(compiled.test(&registry, state(&registry, block, "shape=straight")));
        assert!(compiled.test(&registry, state(&registry, block, "shape=curved")));
        assert!(!compiled.test(&registry, state(&registry, block, "shape=ascending")));
    }

    #[test]
    fn test_unknown_property_is_error() {
        let (registry, block) = fence_registry();
        let condition: Condition =
            serde_json::from_str(r#"{ "east": "true" }"#).unwrap();
        assert!(matches!(
            condition.compile(&registry, block),
            Err(BakeryError::UnknownProperty { .. })
        ));
    }
}
