//! Match state and shared simulation types
//!
//! Everything the engine owns lives in [`GameState`]: both players, the live
//! projectile and item lists, the static platform layout, the simulation
//! clock and the seeded RNG used for item drops.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::item::Item;
use super::player::Player;
use super::vector::Vector2D;
use super::weapon::Projectile;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Tick processing and item drops are frozen
    Paused,
    /// One player is down; terminal until reset
    GameOver,
}

/// Which of the two players an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// Slot index (0 for player one, 1 for player two)
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::One),
            1 => Some(Side::Two),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Winner code reported to collaborators (1 or 2)
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// RGB color carried by entities for collaborators that draw them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BROWN: Self = Self::rgb(139, 69, 19);
    pub const SILVER: Self = Self::rgb(192, 192, 192);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GRAY: Self = Self::rgb(64, 64, 64);
    pub const FOREST_GREEN: Self = Self::rgb(34, 139, 34);
    pub const LIGHT_BLUE: Self = Self::rgb(173, 216, 230);
}

/// Surface category of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerrainType {
    #[default]
    Ground,
    /// Crouching here hides the player
    Grass,
    /// Movement speed bonus
    Ice,
}

impl TerrainType {
    pub const fn color(self) -> Color {
        match self {
            TerrainType::Ground => Color::BROWN,
            TerrainType::Grass => Color::FOREST_GREEN,
            TerrainType::Ice => Color::LIGHT_BLUE,
        }
    }
}

/// A static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub terrain: TerrainType,
    pub color: Color,
}

impl Platform {
    pub const fn new(x: f64, y: f64, width: f64, height: f64, terrain: TerrainType) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            terrain,
            color: terrain.color(),
        }
    }
}

/// The fixed seven-platform arena
pub fn arena_layout() -> Vec<Platform> {
    use TerrainType::*;
    vec![
        // Ground strip spanning the play width
        Platform::new(0.0, GROUND_LEVEL, WORLD_WIDTH, WORLD_HEIGHT - GROUND_LEVEL, Ground),
        // Centre
        Platform::new(450.0, 600.0, 300.0, 20.0, Grass),
        // Left and right mid platforms
        Platform::new(100.0, 500.0, 200.0, 20.0, Ice),
        Platform::new(900.0, 500.0, 200.0, 20.0, Ground),
        // Wide upper
        Platform::new(350.0, 400.0, 400.0, 20.0, Ice),
        // Top corners
        Platform::new(50.0, 300.0, 150.0, 20.0, Grass),
        Platform::new(1000.0, 300.0, 150.0, 20.0, Grass),
    ]
}

/// Starting top-left corner for each side
pub fn spawn_point(side: Side) -> Vector2D {
    let y = GROUND_LEVEL - PLAYER_HEIGHT;
    match side {
        Side::One => Vector2D::new(200.0, y),
        Side::Two => Vector2D::new(1000.0, y),
    }
}

/// Fixed-interval item drop timer driven by simulation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub interval_ms: f64,
    /// Next drop time; `None` while stopped
    next_due_ms: Option<f64>,
}

impl SpawnSchedule {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    /// (Re)start the timer; the first drop lands one full interval from `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Number of drops that came due up to `now_ms`, advancing the timer past them
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(mut due) = self.next_due_ms else {
            return 0;
        };
        if self.interval_ms <= 0.0 {
            return 0;
        }

        let mut fired = 0;
        while due <= now_ms {
            fired += 1;
            due += self.interval_ms;
        }
        self.next_due_ms = Some(due);
        fired
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for the item drop RNG
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation clock (milliseconds), advanced only by ticks
    pub time_ms: f64,
    /// Number of ticks processed
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub players: [Player; 2],
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Live items (sorted by id)
    pub items: Vec<Item>,
    pub platforms: Vec<Platform>,
    pub winner: Option<Side>,
    pub spawner: SpawnSchedule,
    next_id: u32,
}

impl GameState {
    /// Create a fresh match with the given seed; item drops are not running yet
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ms: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            players: fresh_players(),
            projectiles: Vec::new(),
            items: Vec::new(),
            platforms: arena_layout(),
            winner: None,
            spawner: SpawnSchedule::new(ITEM_DROP_INTERVAL_MS),
            next_id: 1,
        }
    }

    /// Rebuild players, platforms and entity lists; keeps the clock and RNG running
    pub fn reinitialize(&mut self) {
        self.players = fresh_players();
        self.platforms = arena_layout();
        self.projectiles.clear();
        self.items.clear();
        self.winner = None;
        self.phase = GamePhase::Playing;
        self.spawner.stop();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    /// Add a projectile, assigning it a fresh id
    pub fn spawn_projectile(&mut self, mut projectile: Projectile) -> u32 {
        let id = self.next_entity_id();
        projectile.id = id;
        self.projectiles.push(projectile);
        id
    }

    /// Add an item, assigning it a fresh id
    pub fn spawn_item(&mut self, mut item: Item) -> u32 {
        let id = self.next_entity_id();
        item.id = id;
        self.items.push(item);
        id
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
        self.items.sort_by_key(|i| i.id);
    }
}

fn fresh_players() -> [Player; 2] {
    [
        Player::new(Side::One, spawn_point(Side::One), Color::BLUE),
        Player::new(Side::Two, spawn_point(Side::Two), Color::RED),
    ]
}
