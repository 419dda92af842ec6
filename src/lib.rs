//! Starclash - a deterministic top-down shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shapes, entities, collision, tick pipeline)
//! - `draw`: Drawing port consumed by external presenters

pub mod draw;
pub mod sim;

pub use sim::{FrameSnapshot, SimError, SimState, TickInput, run_frame};

/// Game configuration constants
pub mod consts {
    /// Playable area extents (world units)
    pub const ARENA_MIN_X: f32 = 0.0;
    pub const ARENA_MAX_X: f32 = 800.0;
    pub const ARENA_MIN_Y: f32 = 0.0;
    pub const ARENA_MAX_Y: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_HEALTH: i32 = 100;
    pub const PLAYER_SHOT_SPEED: f32 = 12.0;
    pub const PLAYER_SHOT_DAMAGE: i32 = 15;

    /// Enemy defaults
    pub const ENEMY_HEALTH: i32 = 10;
    pub const ENEMY_SHOT_SPEED: f32 = 7.0;
    pub const ENEMY_SHOT_DAMAGE: i32 = 5;
    pub const ENEMY_SHOT_COOLDOWN: u32 = 45;
}
