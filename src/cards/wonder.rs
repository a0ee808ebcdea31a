//! Wonder boards.
//!
//! Stage `s` of a board is built by paying `stage_costs[s]`. The bare board
//! counts as stage 0, so a wonder with `k` stage costs has `k + 1` stages
//! and a player's `wonder_stage` never exceeds `k`.

use serde::{Deserialize, Serialize};

use crate::effects::EffectId;
use crate::resources::{Cost, ResourceCounts, ResourceKind};

/// Unique identifier for a wonder board (one per name and face).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WonderId(pub u32);

impl WonderId {
    /// Create a new wonder ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for WonderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wonder({})", self.0)
    }
}

/// Board side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WonderFace {
    A,
    B,
}

/// One stage's cost and optional effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WonderStage {
    pub cost: Cost,
    pub effect: Option<EffectId>,
}

/// Static wonder board definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wonder {
    pub id: WonderId,
    pub name: String,
    pub face: WonderFace,
    /// Production the board grants from the start of the game.
    pub starting_resources: ResourceCounts,
    /// Buildable stages, in build order.
    pub stages: Vec<WonderStage>,
}

impl Wonder {
    /// Create a board with no production and no stages.
    #[must_use]
    pub fn new(id: WonderId, name: impl Into<String>, face: WonderFace) -> Self {
        Self {
            id,
            name: name.into(),
            face,
            starting_resources: ResourceCounts::new(),
            stages: Vec::new(),
        }
    }

    /// Add starting production.
    #[must_use]
    pub fn with_starting_resource(mut self, kind: ResourceKind, count: i32) -> Self {
        self.starting_resources.add(kind, count);
        self
    }

    /// Append a stage.
    #[must_use]
    pub fn with_stage(mut self, cost: Cost, effect: Option<EffectId>) -> Self {
        self.stages.push(WonderStage { cost, effect });
        self
    }

    /// Stage count including the bare board.
    #[must_use]
    pub fn number_of_stages(&self) -> usize {
        self.stages.len() + 1
    }

    /// The stage built next from `current`, if any remain.
    #[must_use]
    pub fn next_stage(&self, current: usize) -> Option<&WonderStage> {
        if current + 1 >= self.number_of_stages() {
            return None;
        }
        self.stages.get(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn giza() -> Wonder {
        Wonder::new(WonderId::new(1), "Giza", WonderFace::A)
            .with_starting_resource(ResourceKind::Stone, 1)
            .with_stage(Cost::resources([(ResourceKind::Stone, 2)]), None)
            .with_stage(Cost::resources([(ResourceKind::Wood, 3)]), Some("VP:5".into()))
    }

    #[test]
    fn test_number_of_stages_counts_bare_board() {
        assert_eq!(giza().number_of_stages(), 3);
    }

    #[test]
    fn test_next_stage() {
        let wonder = giza();
        assert_eq!(
            wonder.next_stage(0).map(|s| &s.cost),
            Some(&Cost::resources([(ResourceKind::Stone, 2)]))
        );
        assert!(wonder.next_stage(1).is_some());
        assert!(wonder.next_stage(2).is_none());
    }

    #[test]
    fn test_wonder_display() {
        assert_eq!(format!("{}", WonderId::new(4)), "Wonder(4)");
    }
}
