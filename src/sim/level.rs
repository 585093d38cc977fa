//! Level construction from a text tile grid
//!
//! One character per tile:
//! - `G` ground, `B` brick, `Q` question block
//! - `P` pipe segment (the lip is drawn on the configured top row)
//! - `F` flag, anchored so an 8-tile pole stands on that row
//! - anything else is empty
//!
//! Enemies are not part of the grid; they come from a separate list of
//! tile-column spawns.

use glam::Vec2;
use thiserror::Error;

use super::entity::{Entity, EntityId, EntityKind};
use super::state::Camera;
use crate::consts::*;
use crate::tuning::Tuning;

/// Errors from building a level
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level layout has no tiles")]
    EmptyLayout,
    #[error("level layout has no flag, it cannot be won")]
    NoFlag,
    #[error("enemy spawn column {index} is outside the level (width {width})")]
    SpawnOutOfBounds { index: u32, width: usize },
}

/// Authored level description
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    /// Tile rows, top to bottom. Rows may be ragged; missing cells are empty.
    pub rows: Vec<String>,
    /// Tile columns where goombas spawn
    pub enemy_spawns: Vec<u32>,
    /// Tile row goombas spawn on
    pub enemy_row: u32,
    /// Row whose pipe segments carry the lip
    pub pipe_top_row: u32,
    /// Player spawn in pixels
    pub player_spawn: Vec2,
}

const WORLD_1_1: [&str; 13] = [
    "                                                                                                                                                                    ",
    "                                                                                                                                                                    ",
    "                                                                                                                                                                    ",
    "                                                                                                                                                                    ",
    "                                                                                                                                                                    ",
    "      Q  B Q B Q                                              Q  Q  Q                                                                                       ",
    "                                                                                                                                                                    ",
    "                                      B Q B                                       B B B                                                                     ",
    "                                                                                                                                                                    ",
    "                P                                                                                                                                   F               ",
    "                P                     B   B            P                     B B B B B                                                              F               ",
    "GGGGGGGGGGGGGGGGGGGGGGGG   GGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG",
    "GGGGGGGGGGGGGGGGGGGGGGGG   GGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG",
];

const WORLD_1_1_GOOMBAS: [u32; 8] = [15, 25, 35, 45, 55, 65, 85, 105];

impl LevelLayout {
    /// The single shipped level
    pub fn world_1_1() -> Self {
        Self {
            rows: WORLD_1_1.iter().map(|r| r.to_string()).collect(),
            enemy_spawns: WORLD_1_1_GOOMBAS.to_vec(),
            enemy_row: 10,
            pipe_top_row: 9,
            player_spawn: Vec2::new(100.0, 100.0),
        }
    }

    /// Width in tiles (longest row)
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }
}

/// A freshly built level, ready to be wrapped in a `World`
#[derive(Debug, Clone)]
pub struct Level {
    /// Static geometry in grid order, followed by enemies in spawn order
    pub entities: Vec<Entity>,
    pub player: Entity,
    pub camera: Camera,
    /// Width in tiles
    pub width: usize,
}

impl Level {
    pub fn width_px(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }
}

/// Turn a layout into entities. Same input always gives the same level.
pub fn build_level(layout: &LevelLayout, tuning: &Tuning) -> Result<Level, LevelError> {
    let width = layout.width();
    let mut next_id = 0u32;
    let mut alloc = || {
        let id = EntityId(next_id);
        next_id += 1;
        id
    };

    let mut entities = Vec::new();
    for (row, line) in layout.rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let pos = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
            let kind = match ch {
                'G' => EntityKind::Ground,
                'B' => EntityKind::Block,
                'Q' => EntityKind::Question,
                'P' => EntityKind::Pipe {
                    is_top: row as u32 == layout.pipe_top_row,
                },
                'F' => EntityKind::Flag,
                _ => continue,
            };

            let mut entity = Entity::tile(alloc(), kind, pos);
            if kind == EntityKind::Flag {
                entity.height = TILE_SIZE * FLAG_HEIGHT_TILES;
                entity.pos.y -= TILE_SIZE * (FLAG_HEIGHT_TILES - 1.0);
            }
            entities.push(entity);
        }
    }

    if entities.is_empty() {
        return Err(LevelError::EmptyLayout);
    }
    if !entities.iter().any(|e| e.kind == EntityKind::Flag) {
        return Err(LevelError::NoFlag);
    }

    for &index in &layout.enemy_spawns {
        if index as usize >= width {
            return Err(LevelError::SpawnOutOfBounds { index, width });
        }
        let pos = Vec2::new(
            index as f32 * TILE_SIZE,
            layout.enemy_row as f32 * TILE_SIZE,
        );
        entities.push(Entity::goomba(alloc(), pos, tuning.enemy_speed));
    }

    let player = Entity::player(alloc(), layout.player_spawn);

    log::debug!(
        "Built level: {} entities, {} enemies, {} tiles wide",
        entities.len(),
        layout.enemy_spawns.len(),
        width
    );

    Ok(Level {
        entities,
        player,
        camera: Camera::default(),
        width,
    })
}
