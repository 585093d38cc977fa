//! Actors of the level: player, goombas and static tile geometry
//!
//! Every actor shares one shape (`Entity`); per-type data lives in the
//! `EntityKind` payload instead of an open-ended bag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable identifier, assigned at creation and never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Direction the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Entity variant with its type-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player { facing: Facing },
    /// Patrolling enemy; `squashed_ticks` counts steps since it was stomped
    Goomba { squashed_ticks: u32 },
    /// Brick, or a question block that already paid out
    Block,
    /// Coin block; turns into `Block` when struck from below
    Question,
    Ground,
    /// Pipe segment; `is_top` marks the segment drawn with the lip
    Pipe { is_top: bool },
    Flag,
}

/// Payload-free tag of an `EntityKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Player,
    Goomba,
    Block,
    Question,
    Ground,
    Pipe,
    Flag,
}

impl EntityKind {
    pub fn tag(&self) -> EntityType {
        match self {
            EntityKind::Player { .. } => EntityType::Player,
            EntityKind::Goomba { .. } => EntityType::Goomba,
            EntityKind::Block => EntityType::Block,
            EntityKind::Question => EntityType::Question,
            EntityKind::Ground => EntityType::Ground,
            EntityKind::Pipe { .. } => EntityType::Pipe,
            EntityKind::Flag => EntityType::Flag,
        }
    }

    /// Static geometry the player collides with
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            EntityKind::Ground | EntityKind::Block | EntityKind::Question | EntityKind::Pipe { .. }
        )
    }

    /// Geometry that turns a goomba around (question blocks do not)
    pub fn blocks_enemies(&self) -> bool {
        matches!(
            self,
            EntityKind::Ground | EntityKind::Block | EntityKind::Pipe { .. }
        )
    }
}

/// Axis-aligned rectangle, origin at the top-left corner (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strictly positive overlap on both axes; shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// A simulated actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Stomped enemies stay in storage (for the squash frame) but are skipped
    pub is_dead: bool,
    /// Resting on a surface as of this step's vertical resolution
    pub is_grounded: bool,
}

impl Entity {
    /// A tile-sized entity at rest
    pub fn tile(id: EntityId, kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            width: TILE_SIZE,
            height: TILE_SIZE,
            is_dead: false,
            is_grounded: false,
        }
    }

    /// The player at its spawn point, facing right
    pub fn player(id: EntityId, spawn: Vec2) -> Self {
        Self {
            id,
            kind: EntityKind::Player {
                facing: Facing::Right,
            },
            pos: spawn,
            vel: Vec2::ZERO,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            is_dead: false,
            is_grounded: false,
        }
    }

    /// A goomba walking left at `speed`
    pub fn goomba(id: EntityId, pos: Vec2, speed: f32) -> Self {
        Self {
            vel: Vec2::new(-speed, 0.0),
            ..Self::tile(id, EntityKind::Goomba { squashed_ticks: 0 }, pos)
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Facing of a player entity; other kinds report the default
    pub fn facing(&self) -> Facing {
        match self.kind {
            EntityKind::Player { facing } => facing,
            _ => Facing::default(),
        }
    }

    pub fn set_facing(&mut self, new_facing: Facing) {
        if let EntityKind::Player { facing } = &mut self.kind {
            *facing = new_facing;
        }
    }

    /// Whether a stomped goomba should still be drawn flattened
    pub fn is_squash_visible(&self) -> bool {
        match self.kind {
            EntityKind::Goomba { squashed_ticks } => self.is_dead && squashed_ticks < SQUASH_TICKS,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert!(EntityKind::Question.is_solid());
        assert!(!EntityKind::Question.blocks_enemies());
        assert!(EntityKind::Pipe { is_top: false }.blocks_enemies());
        assert!(!EntityKind::Flag.is_solid());
        assert!(!EntityKind::Goomba { squashed_ticks: 0 }.is_solid());
        assert_eq!(EntityKind::Pipe { is_top: true }.tag(), EntityType::Pipe);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let b = Rect::new(32.0, 0.0, 32.0, 32.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.translated(-0.5, 0.0)));
    }

    #[test]
    fn test_facing_only_on_player() {
        let mut p = Entity::player(EntityId(0), Vec2::new(100.0, 100.0));
        assert_eq!(p.facing(), Facing::Right);
        p.set_facing(Facing::Left);
        assert_eq!(p.facing(), Facing::Left);

        let mut g = Entity::goomba(EntityId(1), Vec2::ZERO, 1.5);
        g.set_facing(Facing::Left);
        assert_eq!(g.kind, EntityKind::Goomba { squashed_ticks: 0 });
        assert_eq!(g.vel.x, -1.5);
    }
}
