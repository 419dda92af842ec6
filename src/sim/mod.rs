//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `run_frame` call is one complete, indivisible tick
//! - Fixed phase order (advance, player, enemies, bounds, collisions)
//! - Stable iteration order (list order, entity ID allocation order)
//! - No RNG, no rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod error;
pub mod shape;
pub mod state;
pub mod tick;

pub use bounds::Bounds;
pub use collision::battlestar_hit_by_shot;
pub use entity::{BattleStar, MotionRule, ShootRule, Shot, ShotSpec};
pub use error::SimError;
pub use shape::{BoundingBox, Circle, Composite, Rect, Shape, Triangle};
pub use state::{FrameSnapshot, SimPhase, SimState, TickContext};
pub use tick::{TickInput, run_frame};
