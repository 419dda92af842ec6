//! Simulation state aggregate and frame snapshot
//!
//! The mutable aggregate of per-tick context, player, enemy list, and
//! the two shot pools. Constructed once and mutated in place for the
//! life of the session; cross-field invariants are re-checked after
//! every tick and any violation is fatal to the run.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{BattleStar, Shot};
use super::error::SimError;

/// Current phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Ticks advance normally.
    Running,
    /// The input source signaled exit.
    Exiting,
    /// The player was destroyed.
    GameOver,
}

/// Per-tick scratch values shared between phases.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickContext {
    /// Normalized movement direction read from input this tick.
    pub move_dir: Vec2,
    /// Position of the most recent entity that produced shots.
    pub last_shooter_pos: Vec2,
}

/// The full mutable simulation aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub ctx: TickContext,
    pub player: BattleStar,
    pub enemies: Vec<BattleStar>,
    pub player_shots: Vec<Shot>,
    pub enemy_shots: Vec<Shot>,
    pub phase: SimPhase,
    next_id: u32,
}

impl SimState {
    /// Assemble the aggregate. The initial configuration must already
    /// satisfy the cross-field invariants.
    pub fn new(player: BattleStar, enemies: Vec<BattleStar>) -> Result<Self, SimError> {
        let next_id = enemies
            .iter()
            .map(|e| e.id)
            .chain([player.id])
            .max()
            .unwrap_or(0)
            + 1;
        let state = Self {
            ctx: TickContext::default(),
            player,
            enemies,
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            phase: SimPhase::Running,
            next_id,
        };
        state.check_invariants()?;
        Ok(state)
    }

    /// Allocate a fresh entity ID.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Re-validate the cross-field invariants: the player is never an
    /// enemy, no list holds duplicates, and the two shot pools share no
    /// element. A violation signals a pipeline bug and ends the run.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        let mut entity_ids = HashSet::with_capacity(self.enemies.len() + 1);
        entity_ids.insert(self.player.id);
        for enemy in &self.enemies {
            if enemy.id == self.player.id {
                return Err(SimError::InvariantViolation("player present in enemy list"));
            }
            if !entity_ids.insert(enemy.id) {
                return Err(SimError::InvariantViolation("duplicate enemy in list"));
            }
        }

        let mut shot_ids = HashSet::with_capacity(self.player_shots.len() + self.enemy_shots.len());
        for shot in &self.player_shots {
            if !shot_ids.insert(shot.id) {
                return Err(SimError::InvariantViolation("duplicate shot in player pool"));
            }
        }
        for shot in &self.enemy_shots {
            if !shot_ids.insert(shot.id) {
                return Err(SimError::InvariantViolation("shot shared between pools"));
            }
        }
        Ok(())
    }

    /// Immutable, read-only copy for external consumers. This is the
    /// only channel through which the core's state is observed.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            player_shots: self.player_shots.clone(),
            enemy_shots: self.enemy_shots.clone(),
            phase: self.phase,
        }
    }
}

/// Read-only copy of the simulation handed to rendering or test code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player: BattleStar,
    pub enemies: Vec<BattleStar>,
    pub player_shots: Vec<Shot>,
    pub enemy_shots: Vec<Shot>,
    pub phase: SimPhase,
}

impl FrameSnapshot {
    /// True while the session should keep ticking.
    pub fn should_continue(&self) -> bool {
        self.phase == SimPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{MotionRule, ShootRule};
    use crate::sim::shape::{Circle, Shape};

    fn star(id: u32, x: f32) -> BattleStar {
        BattleStar::new(
            id,
            Vec2::new(x, 100.0),
            Shape::Circle(Circle::new(5.0).unwrap()),
            10,
            MotionRule::Stationary,
            ShootRule::None,
        )
        .unwrap()
    }

    fn shot(id: u32) -> Shot {
        Shot::new(id, Vec2::ZERO, Vec2::X, 1.0, 5).unwrap()
    }

    #[test]
    fn test_new_rejects_player_in_enemy_list() {
        let result = SimState::new(star(1, 400.0), vec![star(1, 100.0)]);
        assert!(matches!(result, Err(SimError::InvariantViolation(_))));
    }

    #[test]
    fn test_invariants_catch_duplicates_and_shared_shots() {
        let mut state = SimState::new(star(1, 400.0), vec![star(2, 100.0)]).unwrap();
        assert!(state.check_invariants().is_ok());

        state.enemies.push(star(2, 200.0));
        assert!(state.check_invariants().is_err());
        state.enemies.pop();

        state.player_shots.push(shot(10));
        state.player_shots.push(shot(10));
        assert!(state.check_invariants().is_err());
        state.player_shots.pop();

        state.enemy_shots.push(shot(10));
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_id_allocation_starts_past_initial_entities() {
        let mut state = SimState::new(star(3, 400.0), vec![star(7, 100.0)]).unwrap();
        assert_eq!(state.next_entity_id(), 8);
        assert_eq!(state.next_entity_id(), 9);
    }

    #[test]
    fn test_snapshot_copies_state_and_roundtrips() {
        let mut state = SimState::new(star(1, 400.0), vec![star(2, 100.0)]).unwrap();
        state.player_shots.push(shot(10));

        let snap = state.snapshot();
        assert!(snap.should_continue());
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.player_shots.len(), 1);

        // Mutating the live state must not touch the snapshot.
        state.player_shots.clear();
        assert_eq!(snap.player_shots.len(), 1);

        let json = serde_json::to_string(&snap).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.player.id, snap.player.id);
        assert_eq!(back.player_shots.len(), 1);
        assert_eq!(back.phase, SimPhase::Running);
    }
}
