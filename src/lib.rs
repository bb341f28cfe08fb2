//! Duel Arena - A two-player platform brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (players, weapons, items, collisions, match state)
//! - `settings`: Driver configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Command, Engine, GamePhase, MatchSnapshot, Side};

/// Game configuration constants
pub mod consts {
    /// Default driver timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will simulate in one go (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f64 = 1200.0;
    pub const WORLD_HEIGHT: f64 = 800.0;
    /// Top of the ground strip; nothing rests below this line
    pub const GROUND_LEVEL: f64 = 750.0;

    /// Physics
    pub const GRAVITY: f64 = 800.0;
    /// Per-tick horizontal velocity multiplier when no direction is held
    pub const FRICTION: f64 = 0.8;
    /// Horizontal speeds under this snap to zero
    pub const FRICTION_STOP_SPEED: f64 = 10.0;

    /// Player defaults
    pub const PLAYER_SPEED: f64 = 300.0;
    pub const PLAYER_JUMP_SPEED: f64 = -500.0;
    pub const PLAYER_MAX_HP: i32 = 100;
    pub const PLAYER_WIDTH: f64 = 40.0;
    pub const PLAYER_HEIGHT: f64 = 60.0;
    /// Player-level attack throttle, stacked on top of weapon cooldowns
    pub const PLAYER_ATTACK_INTERVAL_MS: f64 = 100.0;

    /// Grounding tolerances
    pub const GROUND_SNAP_TOLERANCE: f64 = 5.0;
    pub const PLATFORM_STAND_TOLERANCE: f64 = 10.0;
    /// Terrain probe band around a platform (above top, below bottom)
    pub const TERRAIN_PROBE_ABOVE: f64 = 5.0;
    pub const TERRAIN_PROBE_BELOW: f64 = 15.0;

    /// Terrain modifiers
    pub const ICE_SPEED_MULTIPLIER: f64 = 1.5;

    /// Projectiles
    pub const BULLET_SPEED: f64 = 600.0;
    pub const SNIPER_SPEED_MULTIPLIER: f64 = 1.5;
    pub const BALL_THROW_SPEED: f64 = 400.0;
    /// Launch angle in degrees (negative is upward)
    pub const BALL_THROW_ANGLE: f64 = -30.0;
    pub const BULLET_RADIUS: f64 = 3.0;
    pub const THROWN_RADIUS: f64 = 8.0;
    pub const PROJECTILE_LIFETIME_MS: f64 = 5000.0;
    /// Projectiles survive this far outside the playfield
    pub const PROJECTILE_BOUNDS_MARGIN: f64 = 100.0;

    /// Weapon damage
    pub const FIST_DAMAGE: i32 = 15;
    pub const KNIFE_DAMAGE: i32 = 25;
    pub const BALL_DAMAGE: i32 = 35;
    pub const RIFLE_DAMAGE: i32 = 20;
    pub const SNIPER_DAMAGE: i32 = 60;

    /// Weapon ammunition
    pub const BALL_COUNT: u32 = 3;
    pub const RIFLE_AMMO: u32 = 30;
    pub const SNIPER_AMMO: u32 = 5;

    /// Weapon cooldowns (milliseconds)
    pub const FIST_COOLDOWN_MS: f64 = 800.0;
    pub const KNIFE_COOLDOWN_MS: f64 = 600.0;
    pub const BALL_COOLDOWN_MS: f64 = 1000.0;
    pub const RIFLE_COOLDOWN_MS: f64 = 150.0;
    pub const SNIPER_COOLDOWN_MS: f64 = 2000.0;

    /// Weapon reach
    pub const FIST_RANGE: f64 = 50.0;
    pub const KNIFE_RANGE: f64 = 60.0;
    pub const BALL_RANGE: f64 = 400.0;
    pub const RIFLE_RANGE: f64 = 600.0;
    pub const SNIPER_RANGE: f64 = 800.0;

    /// Consumables
    pub const BANDAGE_HEAL: i32 = 20;
    pub const MEDKIT_HEAL: i32 = 100;
    /// Adrenaline heal per second while active
    pub const ADRENALINE_HEAL: i32 = 5;
    pub const ADRENALINE_HEAL_INTERVAL_MS: f64 = 1000.0;
    pub const ADRENALINE_DURATION_MS: f64 = 10_000.0;
    pub const ADRENALINE_SPEED_MULTIPLIER: f64 = 1.3;

    /// Item drops
    pub const ITEM_DROP_INTERVAL_MS: f64 = 3000.0;
    pub const ITEM_DROP_HEIGHT: f64 = 50.0;
    /// Keep drops this far from either side wall
    pub const ITEM_DROP_MARGIN: f64 = 100.0;
    pub const ITEM_INITIAL_FALL_SPEED: f64 = 200.0;
    pub const ITEM_LIFETIME_MS: f64 = 30_000.0;
    /// Player hitbox is grown by this much on every side when looking for pickups
    pub const PICKUP_REACH: f64 = 30.0;
}
