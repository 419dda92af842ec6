//! Stateless collision testing
//!
//! Pure functions over entities and shot positions. No allocation, no
//! side effects; identical inputs give identical answers any number of
//! times per tick.

use super::entity::{BattleStar, Shot};

/// True iff the shot's position lies inside the target's shape. The
/// target translates the world-space point into its local space before
/// delegating to the shape.
#[inline]
pub fn battlestar_hit_by_shot(target: &BattleStar, shot: &Shot) -> bool {
    target.contains(shot.pos)
}
