//! Variant key compilation into block state predicates.

use super::{BlockId, BlockRegistry, PropertyValue, StateId};
use crate::error::{BakeryError, Result};

/// One property term: the state's value must be among `allowed`.
#[derive(Debug, Clone)]
pub struct PropertyMatch {
    /// Property index in the block's declaration order.
    pub property: usize,
    pub allowed: Vec<PropertyValue>,
}

/// A compiled variant key: logical AND of property terms, scoped to one
/// block type. An empty term list matches every state of the block.
#[derive(Debug, Clone)]
pub struct StatePredicate {
    block: BlockId,
    matches: Vec<PropertyMatch>,
}

impl StatePredicate {
    /// Compile a `"prop=value,prop2=value2"` variant key against a block's
    /// state manager. The empty key matches all states.
    pub fn compile(registry: &BlockRegistry, block: BlockId, key: &str) -> Result<Self> {
        let block_type = registry.get(block);
        let mut matches = Vec::new();

        if !key.is_empty() {
            for segment in key.split(',') {
                let (name, raw) =
                    segment
                        .split_once('=')
                        .ok_or_else(|| BakeryError::MalformedVariantKey {
                            block: block_type.id().to_string(),
                            segment: segment.to_string(),
                        })?;

                let property = block_type.states().property_index(name).ok_or_else(|| {
                    BakeryError::UnknownProperty {
                        block: block_type.id().to_string(),
                        property: name.to_string(),
                    }
                })?;

                let definition = &block_type.states().properties()[property];
                let value = definition.parse_value(raw).ok_or_else(|| {
                    BakeryError::InvalidPropertyValue {
                        block: block_type.id().to_string(),
                        property: name.to_string(),
                        value: raw.to_string(),
                        allowed: definition.allowed_values(),
                    }
                })?;

                matches.push(PropertyMatch {
                    property,
                    allowed: vec![value],
                });
            }
        }

        Ok(Self { block, matches })
    }

    pub(crate) fn from_matches(block: BlockId, matches: Vec<PropertyMatch>) -> Self {
        Self { block, matches }
    }

    /// True iff `state` belongs to this predicate's block type and every
    /// term matches.
    pub fn test(&self, registry: &BlockRegistry, state: StateId) -> bool {
        if state.block != self.block {
            return false;
        }
        let values = registry.state_values(state);
        self.matches
            .iter()
            .all(|m| m.allowed.contains(&values[m.property]))
    }
}

/// A multipart `when` condition compiled against one block type.
#[derive(Debug, Clone)]
pub enum StateCondition {
    Always,
    Match(StatePredicate),
    Any(Vec<StateCondition>),
    All(Vec<StateCondition>),
}

impl StateCondition {
    pub fn test(&self, registry: &BlockRegistry, state: StateId) -> bool {
        match self {
            StateCondition::Always => true,
            StateCondition::Match(predicate) => predicate.test(registry, state),
            StateCondition::Any(conditions) => {
                conditions.iter().any(|c| c.test(registry, state))
            }
            StateCondition::All(conditions) => {
                conditions.iter().all(|c| c.test(registry, state))
            }
        }
    }
}
