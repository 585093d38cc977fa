//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per call, no wall-clock time
//! - Stable iteration order (entity storage order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Side, impact_side, overlaps};
pub use entity::{Entity, EntityId, EntityKind, EntityType, Facing, Rect};
pub use level::{Level, LevelError, LevelLayout, build_level};
pub use state::{Camera, DeathCause, GameEvent, GameState, GameStatus, World};
pub use tick::{TickInput, tick};
