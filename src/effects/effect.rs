//! Effect definitions and their registry.
//!
//! Effects are data: an `EffectDefinition` pairs a stable id and a timing
//! with a parameter string in the instruction grammar parsed by
//! [`Instruction::parse`](super::Instruction::parse).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::instruction::{Instruction, ParseError};

/// Stable key of an effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub String);

impl EffectId {
    /// Create a new effect ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EffectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// When an effect resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectTiming {
    /// As soon as the card or stage is built.
    Immediate,
    /// Once every player has acted this round.
    EndOfTurn,
    /// At the end of an age, before the last cards are discarded.
    EndOfRound,
    /// After the last age.
    EndOfGame,
    /// Held until resolved explicitly by id.
    Deferred,
}

/// Static effect definition.
///
/// ```
/// use wonders_engine::effects::{EffectDefinition, EffectTiming, Instruction};
///
/// let effect = EffectDefinition::new("TAVERN", EffectTiming::Immediate, "COINS:5");
/// let parsed: Vec<_> = effect.instructions().collect::<Result<_, _>>().unwrap();
/// assert_eq!(parsed, vec![Instruction::Coins(5)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub id: EffectId,
    pub timing: EffectTiming,
    /// `|`-separated instructions.
    pub parameters: String,
}

impl EffectDefinition {
    /// Create a new effect definition.
    #[must_use]
    pub fn new(id: impl Into<EffectId>, timing: EffectTiming, parameters: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timing,
            parameters: parameters.into(),
        }
    }

    /// Check if there is nothing to execute.
    #[must_use]
    pub fn has_no_parameters(&self) -> bool {
        self.parameters.trim().is_empty()
    }

    /// Parse each segment lazily, in order.
    pub fn instructions(&self) -> impl Iterator<Item = Result<Instruction, ParseError>> + '_ {
        self.parameters.split('|').map(Instruction::parse)
    }
}

/// Registry of effect definitions.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    effects: FxHashMap<EffectId, EffectDefinition>,
}

impl EffectRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect, returning any definition it replaces.
    pub fn register(&mut self, effect: EffectDefinition) -> Option<EffectDefinition> {
        self.effects.insert(effect.id.clone(), effect)
    }

    /// Get an effect by ID.
    #[must_use]
    pub fn get(&self, id: &EffectId) -> Option<&EffectDefinition> {
        self.effects.get(id)
    }

    /// Get the number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effects with a given timing.
    pub fn by_timing(&self, timing: EffectTiming) -> impl Iterator<Item = &EffectDefinition> {
        self.effects.values().filter(move |e| e.timing == timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_id() {
        let id = EffectId::from("VINEYARD");
        assert_eq!(id.as_str(), "VINEYARD");
        assert_eq!(format!("{}", id), "Effect(VINEYARD)");
    }

    #[test]
    fn test_no_parameters() {
        assert!(EffectDefinition::new("X", EffectTiming::Immediate, "  ").has_no_parameters());
        assert!(!EffectDefinition::new("X", EffectTiming::Immediate, "VP:1").has_no_parameters());
    }

    #[test]
    fn test_instructions_split_on_pipe() {
        let effect = EffectDefinition::new("X", EffectTiming::Immediate, "VP:3 | COINS:2");
        let parsed: Vec<_> = effect.instructions().collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], Ok(Instruction::Coins(2)));
    }

    #[test]
    fn test_registry_by_timing() {
        let mut registry = EffectRegistry::new();
        registry.register(EffectDefinition::new("A", EffectTiming::Immediate, "VP:1"));
        registry.register(EffectDefinition::new("B", EffectTiming::EndOfGame, "VP:2"));
        registry.register(EffectDefinition::new("C", EffectTiming::EndOfGame, "VP:3"));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.by_timing(EffectTiming::EndOfGame).count(), 2);
        assert!(registry.get(&EffectId::from("A")).is_some());
        assert!(registry.get(&EffectId::from("Z")).is_none());
    }

    #[test]
    fn test_timing_serialization() {
        let json = serde_json::to_string(&EffectTiming::EndOfRound).unwrap();
        assert_eq!(json, "\"END_OF_ROUND\"");
    }
}
