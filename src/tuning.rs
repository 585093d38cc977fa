//! Data-driven game balance
//!
//! Every value is expressed in pixels per simulation step (or per step²),
//! so the simulation never multiplies by a timestep.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and scoring knobs read by the level builder and the tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub friction: f32,
    pub jump_force: f32,
    pub walk_speed: f32,
    pub enemy_speed: f32,
    pub stomp_threshold: f32,
    pub stomp_bounce: f32,
    /// Camera follow threshold in screen pixels from the left edge
    pub scroll_threshold: f32,
    /// Player falls out of the world once `pos.y` exceeds this
    pub kill_plane_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            jump_force: JUMP_FORCE,
            walk_speed: WALK_SPEED,
            enemy_speed: ENEMY_SPEED,
            stomp_threshold: STOMP_THRESHOLD,
            stomp_bounce: STOMP_BOUNCE,
            scroll_threshold: SCROLL_THRESHOLD,
            kill_plane_y: CANVAS_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override; missing keys keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Horizontal acceleration contributed by one held direction key
    #[inline]
    pub fn walk_accel(&self) -> f32 {
        self.walk_speed * 0.2
    }
}
