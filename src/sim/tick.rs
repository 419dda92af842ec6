//! Fixed-order frame pipeline
//!
//! One `run_frame` call advances the simulation by exactly one tick.
//! The phase order is a frozen contract: movement precedes shooting so
//! shots originate from post-move positions; shooting precedes collision
//! checks so shots fired this tick are tested this tick; boundary
//! pruning precedes collision resolution because it is the cheaper test
//! and shrinks the candidate set for the geometric one.

use glam::Vec2;

use super::bounds::Bounds;
use super::collision::battlestar_hit_by_shot;
use super::entity::Shot;
use super::error::{SimError, finite_vec, unit_vec};
use super::state::{SimPhase, SimState};

/// Decoded input commands for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Normalized movement direction, or zero for no movement.
    pub move_dir: Vec2,
    /// Fire the player's shooter this tick.
    pub shoot: bool,
    /// End the session.
    pub exit: bool,
}

/// Advance the simulation by one tick. Returns `Ok(true)` while the
/// session should continue, `Ok(false)` on exit or player destruction.
/// An `Err` means a state invariant broke and the run is over.
pub fn run_frame(
    state: &mut SimState,
    bounds: &Bounds,
    input: &TickInput,
) -> Result<bool, SimError> {
    match state.phase {
        SimPhase::Exiting | SimPhase::GameOver => return Ok(false),
        SimPhase::Running => {}
    }

    if input.exit {
        state.phase = SimPhase::Exiting;
        return Ok(false);
    }

    advance_shots(state);
    player_phase(state, bounds, input)?;
    enemy_phase(state, bounds)?;
    prune_shots(state, bounds);
    resolve_collisions(state);
    state.check_invariants()?;

    if state.player.destroyed {
        state.phase = SimPhase::GameOver;
        log::info!("player destroyed, game over");
        return Ok(false);
    }
    Ok(true)
}

/// Advance every shot in both pools.
fn advance_shots(state: &mut SimState) {
    for shot in &mut state.player_shots {
        shot.advance();
    }
    for shot in &mut state.enemy_shots {
        shot.advance();
    }
}

/// Store the input direction in the shared context, move the player
/// (slide-back included), then fire on request. An empty fire result is
/// "no shots fired," not an error.
fn player_phase(state: &mut SimState, bounds: &Bounds, input: &TickInput) -> Result<(), SimError> {
    let dir = finite_vec("input direction", input.move_dir)?;
    if dir != Vec2::ZERO {
        unit_vec("input direction", dir)?;
    }
    state.ctx.move_dir = dir;

    state.player.advance(dir, bounds);

    if input.shoot {
        let specs = state.player.fire();
        if !specs.is_empty() {
            state.ctx.last_shooter_pos = state.player.pos;
        }
        for spec in specs {
            let id = state.next_entity_id();
            state.player_shots.push(Shot::from_spec(id, spec)?);
        }
    }
    Ok(())
}

/// Every enemy unconditionally moves then fires; produced shots go to
/// the enemy pool.
fn enemy_phase(state: &mut SimState, bounds: &Bounds) -> Result<(), SimError> {
    for k in 0..state.enemies.len() {
        state.enemies[k].advance(Vec2::ZERO, bounds);
        let specs = state.enemies[k].fire();
        if specs.is_empty() {
            continue;
        }
        state.ctx.last_shooter_pos = state.enemies[k].pos;
        for spec in specs {
            let id = state.next_entity_id();
            state.enemy_shots.push(Shot::from_spec(id, spec)?);
        }
    }
    Ok(())
}

/// Remove (never clamp) shots from either pool that left the playable
/// range. Entities are never removed here.
fn prune_shots(state: &mut SimState, bounds: &Bounds) {
    let before = state.player_shots.len() + state.enemy_shots.len();
    let in_range = |s: &Shot| !bounds.is_outside_x(s.pos.x) && !bounds.is_outside_y(s.pos.y);
    state.player_shots.retain(in_range);
    state.enemy_shots.retain(in_range);
    let pruned = before - state.player_shots.len() - state.enemy_shots.len();
    if pruned > 0 {
        log::debug!("pruned {pruned} out-of-bounds shots");
    }
}

/// Two independent passes.
///
/// Pass 1: each player shot scans enemies in list order; the first
/// containing enemy takes the shot's damage, the shot is consumed, and a
/// destroyed enemy leaves the list. One shot hits at most one enemy.
///
/// Pass 2: each enemy shot is tested against the player; on a hit the
/// damage lands and the shot is consumed. Once the player is destroyed
/// the remaining enemy shots are left unevaluated for this tick; the
/// frame reports "do not continue" immediately afterwards, so this has
/// no next-tick effect unless continuation ever gains a grace period.
fn resolve_collisions(state: &mut SimState) {
    let mut i = 0;
    while i < state.player_shots.len() {
        let hit = state
            .enemies
            .iter()
            .position(|enemy| battlestar_hit_by_shot(enemy, &state.player_shots[i]));
        match hit {
            Some(j) => {
                let shot = state.player_shots.remove(i);
                let enemy = &mut state.enemies[j];
                enemy.apply_damage(shot.damage);
                if enemy.destroyed {
                    state.enemies.remove(j);
                }
            }
            None => i += 1,
        }
    }

    let mut i = 0;
    while i < state.enemy_shots.len() {
        if state.player.destroyed {
            break;
        }
        if battlestar_hit_by_shot(&state.player, &state.enemy_shots[i]) {
            let shot = state.enemy_shots.remove(i);
            state.player.apply_damage(shot.damage);
        } else {
            i += 1;
        }
    }
}
