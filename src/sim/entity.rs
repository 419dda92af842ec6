//! Entities: BattleStars (player and enemies) and Shots
//!
//! A BattleStar composes a shape, a motion rule, health, and a shoot
//! rule. Player and enemies are the same type with different configured
//! behaviors. Identity is the `id` field; entities are never compared by
//! value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::error::{SimError, finite, finite_vec, unit_vec};
use super::shape::Shape;

/// How a BattleStar moves each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MotionRule {
    /// Never moves.
    Stationary,
    /// Moves by the per-tick input direction scaled by `speed`, then
    /// slides back onto the boundary if the step left it.
    PlayerControlled { speed: f32 },
    /// Unconditional drift.
    Glide { velocity: Vec2 },
    /// Drift that reverses the offending component whenever the next
    /// step would leave the boundary.
    Patrol { velocity: Vec2 },
}

impl MotionRule {
    fn validate(&self) -> Result<(), SimError> {
        match self {
            MotionRule::Stationary => Ok(()),
            MotionRule::PlayerControlled { speed } => {
                finite("player speed", *speed)?;
                if *speed < 0.0 {
                    return Err(SimError::OutOfRange {
                        what: "player speed",
                        value: *speed,
                    });
                }
                Ok(())
            }
            MotionRule::Glide { velocity } | MotionRule::Patrol { velocity } => {
                finite_vec("motion velocity", *velocity)?;
                Ok(())
            }
        }
    }
}

/// What a BattleStar's shooter produces when asked to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShootRule {
    /// Never fires.
    None,
    /// One shot along a fixed unit direction, at most once every
    /// `cooldown` fire requests.
    Forward {
        dir: Vec2,
        speed: f32,
        damage: i32,
        cooldown: u32,
        #[serde(default)]
        ready_in: u32,
    },
    /// One shot per direction, same cadence as `Forward`.
    Fan {
        dirs: Vec<Vec2>,
        speed: f32,
        damage: i32,
        cooldown: u32,
        #[serde(default)]
        ready_in: u32,
    },
}

impl ShootRule {
    /// A single fixed-direction shooter.
    pub fn forward(dir: Vec2, speed: f32, damage: i32, cooldown: u32) -> Result<Self, SimError> {
        let dir = unit_vec("shot direction", dir)?;
        Self::check_shot_params(speed, damage)?;
        Ok(ShootRule::Forward {
            dir,
            speed,
            damage,
            cooldown,
            ready_in: 0,
        })
    }

    /// A multi-direction shooter.
    pub fn fan(dirs: Vec<Vec2>, speed: f32, damage: i32, cooldown: u32) -> Result<Self, SimError> {
        for dir in &dirs {
            unit_vec("shot direction", *dir)?;
        }
        Self::check_shot_params(speed, damage)?;
        Ok(ShootRule::Fan {
            dirs,
            speed,
            damage,
            cooldown,
            ready_in: 0,
        })
    }

    fn check_shot_params(speed: f32, damage: i32) -> Result<(), SimError> {
        finite("shot speed", speed)?;
        if speed < 0.0 {
            return Err(SimError::OutOfRange {
                what: "shot speed",
                value: speed,
            });
        }
        if damage < 0 {
            return Err(SimError::OutOfRange {
                what: "shot damage",
                value: damage as f32,
            });
        }
        Ok(())
    }

    /// Produce the shots for one fire request from `origin`. An empty
    /// result means "no shots fired" and is not an error.
    pub fn fire(&mut self, origin: Vec2) -> Vec<ShotSpec> {
        match self {
            ShootRule::None => Vec::new(),
            ShootRule::Forward {
                dir,
                speed,
                damage,
                cooldown,
                ready_in,
            } => {
                if *ready_in > 0 {
                    *ready_in -= 1;
                    return Vec::new();
                }
                *ready_in = *cooldown;
                vec![ShotSpec {
                    pos: origin,
                    dir: *dir,
                    speed: *speed,
                    damage: *damage,
                }]
            }
            ShootRule::Fan {
                dirs,
                speed,
                damage,
                cooldown,
                ready_in,
            } => {
                if *ready_in > 0 {
                    *ready_in -= 1;
                    return Vec::new();
                }
                *ready_in = *cooldown;
                dirs.iter()
                    .map(|dir| ShotSpec {
                        pos: origin,
                        dir: *dir,
                        speed: *speed,
                        damage: *damage,
                    })
                    .collect()
            }
        }
    }
}

/// Parameters of a shot a shooter wants to put in flight. The tick
/// pipeline turns specs into `Shot`s once it has allocated ids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub damage: i32,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    pub pos: Vec2,
    /// Unit-length direction of travel.
    pub dir: Vec2,
    /// Distance covered per tick; non-negative.
    pub speed: f32,
    pub damage: i32,
    pub active: bool,
}

impl Shot {
    pub fn new(id: u32, pos: Vec2, dir: Vec2, speed: f32, damage: i32) -> Result<Self, SimError> {
        finite_vec("shot position", pos)?;
        let dir = unit_vec("shot direction", dir)?;
        finite("shot speed", speed)?;
        if speed < 0.0 {
            return Err(SimError::OutOfRange {
                what: "shot speed",
                value: speed,
            });
        }
        if damage < 0 {
            return Err(SimError::OutOfRange {
                what: "shot damage",
                value: damage as f32,
            });
        }
        Ok(Self {
            id,
            pos,
            dir,
            speed,
            damage,
            active: true,
        })
    }

    pub fn from_spec(id: u32, spec: ShotSpec) -> Result<Self, SimError> {
        Self::new(id, spec.pos, spec.dir, spec.speed, spec.damage)
    }

    /// Advance by one tick; inactive or zero-speed shots stay put.
    pub fn advance(&mut self) {
        if !self.active || self.speed == 0.0 {
            return;
        }
        self.pos += self.dir * self.speed;
    }
}

/// A player or enemy entity: shape + motion + health + shooter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleStar {
    pub id: u32,
    pub pos: Vec2,
    pub shape: Shape,
    pub health: i32,
    pub destroyed: bool,
    pub motion: MotionRule,
    pub shooter: ShootRule,
}

impl BattleStar {
    pub fn new(
        id: u32,
        pos: Vec2,
        shape: Shape,
        health: i32,
        motion: MotionRule,
        shooter: ShootRule,
    ) -> Result<Self, SimError> {
        finite_vec("entity position", pos)?;
        if health <= 0 {
            return Err(SimError::OutOfRange {
                what: "entity health",
                value: health as f32,
            });
        }
        motion.validate()?;
        Ok(Self {
            id,
            pos,
            shape,
            health,
            destroyed: false,
            motion,
            shooter,
        })
    }

    /// World-space membership: translate into local space, then delegate
    /// to the shape.
    #[inline]
    pub fn contains(&self, world_point: Vec2) -> bool {
        self.shape.contains(world_point - self.pos)
    }

    /// Apply one tick of movement.
    pub fn advance(&mut self, move_dir: Vec2, bounds: &Bounds) {
        match &mut self.motion {
            MotionRule::Stationary => {}
            MotionRule::PlayerControlled { speed } => {
                self.pos += move_dir * *speed;
                // Slide back onto the boundary instead of blocking the move.
                let dx = bounds.x_excess(self.pos.x);
                if dx > 0.0 {
                    self.pos.x += if self.pos.x < bounds.min_x() { dx } else { -dx };
                }
                let dy = bounds.y_excess(self.pos.y);
                if dy > 0.0 {
                    self.pos.y += if self.pos.y < bounds.min_y() { dy } else { -dy };
                }
            }
            MotionRule::Glide { velocity } => {
                self.pos += *velocity;
            }
            MotionRule::Patrol { velocity } => {
                let next = self.pos + *velocity;
                if bounds.is_outside_x(next.x) {
                    velocity.x = -velocity.x;
                }
                if bounds.is_outside_y(next.y) {
                    velocity.y = -velocity.y;
                }
                self.pos += *velocity;
            }
        }
    }

    /// Ask the shooter to fire from the current (post-move) position.
    pub fn fire(&mut self) -> Vec<ShotSpec> {
        self.shooter.fire(self.pos)
    }

    /// Subtract damage; flips `destroyed` when health runs out.
    pub fn apply_damage(&mut self, damage: i32) {
        self.health = self.health.saturating_sub(damage);
        if self.health <= 0 {
            self.health = 0;
            self.destroyed = true;
            log::info!("battlestar {} destroyed", self.id);
        }
    }
}
