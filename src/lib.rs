//! Super Neko Bros - A side-scrolling tile platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, tile collisions, enemies, camera)
//! - `renderer`: WebGPU rendering of the simulation state
//! - `platform`: Browser key-state table and event listeners
//! - `tuning`: Data-driven physics constants
//! - `ui`: HUD and overlay model derived from the game state

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Tuning values are expressed per step.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Edge length of one level tile in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Viewport dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Downward acceleration added to vertical velocity every step
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal velocity multiplier applied every step
    pub const FRICTION: f32 = 0.85;
    /// Vertical velocity set when a grounded player jumps
    pub const JUMP_FORCE: f32 = -14.0;
    /// Walk speed; one held step adds a fifth of it
    pub const WALK_SPEED: f32 = 4.0;
    /// Goomba patrol speed
    pub const ENEMY_SPEED: f32 = 1.5;

    /// Max vertical overlap (px) that still counts as landing on a goomba
    pub const STOMP_THRESHOLD: f32 = 20.0;
    /// Vertical velocity given to the player after a stomp
    pub const STOMP_BOUNCE: f32 = -10.0;

    /// Player hitbox (narrower than a tile)
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;

    /// Flag pole height in tiles
    pub const FLAG_HEIGHT_TILES: f32 = 8.0;

    /// Camera starts following once the player passes this screen x
    pub const SCROLL_THRESHOLD: f32 = CANVAS_WIDTH / 2.5;

    /// Steps a stomped goomba stays visible (half a second)
    pub const SQUASH_TICKS: u32 = 30;

    /// Rewards
    pub const COIN_SCORE: u64 = 100;
    pub const STOMP_SCORE: u64 = 200;

    /// Fresh session values
    pub const START_LIVES: u8 = 3;
    pub const START_TIMER: u32 = 400;
}
