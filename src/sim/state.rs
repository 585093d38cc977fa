//! Game state and the owned world the tick mutates
//!
//! A session is one `World`. Start and retry build a new one and replace the
//! old wholesale; nothing is reset field by field.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::level::{LevelError, LevelLayout, build_level};
use crate::consts::*;
use crate::tuning::Tuning;

/// Session status
///
/// `Menu -> Playing -> {Won, GameOver}`; only a fresh level load returns to
/// `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Menu,
    Playing,
    Won,
    GameOver,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::GameOver)
    }
}

/// Scoreboard and status of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub score: u64,
    /// Never decreases while playing
    pub coins: u32,
    pub lives: u8,
    pub timer: u32,
}

impl GameState {
    /// State shown before the first start
    pub fn menu() -> Self {
        Self {
            status: GameStatus::Menu,
            ..Self::fresh()
        }
    }

    /// State of a freshly (re)started session
    pub fn fresh() -> Self {
        Self {
            status: GameStatus::Playing,
            score: 0,
            coins: 0,
            lives: START_LIVES,
            timer: START_TIMER,
        }
    }

    /// Leave `Playing` for a terminal status. Later calls in the same run
    /// are ignored, so the first outcome wins.
    pub fn finish(&mut self, status: GameStatus) {
        if self.status == GameStatus::Playing {
            self.status = status;
        }
    }
}

/// Horizontal scroll offset applied to every draw position. `y` stays 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

/// Why the run ended in `GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched a live goomba without stomping it
    Enemy,
    /// Fell below the bottom of the screen
    Pit,
}

/// Things that happened during one tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    CoinCollected { block: EntityId },
    EnemyStomped { enemy: EntityId },
    FlagReached,
    PlayerDied { cause: DeathCause },
}

/// Everything one play session owns
#[derive(Debug, Clone)]
pub struct World {
    pub state: GameState,
    /// Static geometry and enemies. Slots are stable for the whole session.
    pub entities: Vec<Entity>,
    /// Held apart from `entities`; only the pit can end it
    pub player: Entity,
    pub camera: Camera,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    /// Level width in tiles
    pub width: usize,
}

impl World {
    /// Build the level and start playing
    pub fn start(layout: &LevelLayout, tuning: Tuning) -> Result<Self, LevelError> {
        Self::build(layout, tuning, GameState::fresh())
    }

    /// Build the level as a backdrop for the title screen
    pub fn menu(layout: &LevelLayout, tuning: Tuning) -> Result<Self, LevelError> {
        Self::build(layout, tuning, GameState::menu())
    }

    fn build(layout: &LevelLayout, tuning: Tuning, state: GameState) -> Result<Self, LevelError> {
        let level = build_level(layout, &tuning)?;
        log::info!(
            "Level ready: {} entities, {} px wide",
            level.entities.len(),
            level.width_px()
        );
        Ok(Self {
            state,
            entities: level.entities,
            player: level.player,
            camera: level.camera,
            events: Vec::new(),
            tuning,
            width: level.width,
        })
    }

    pub fn width_px(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    /// How far across the level the player is, 0 to 1
    pub fn progress(&self) -> f32 {
        (self.player.pos.x / self.width_px()).clamp(0.0, 1.0)
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Look up an entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
