//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only advances through `tick` (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod item;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod vector;
pub mod weapon;

pub use collision::{Contact, Rect, circle_rect_overlap, classify_contact};
pub use engine::{Engine, FrameClock};
pub use item::{Item, ItemKind};
pub use player::{Adrenaline, Player, PlayerState};
pub use snapshot::{MatchSnapshot, PlayerView};
pub use state::{
    Color, GamePhase, GameState, Platform, Side, SpawnSchedule, TerrainType, arena_layout,
    spawn_point,
};
pub use tick::{AttackOutcome, Command, apply_command, resolve_attack, tick};
pub use vector::Vector2D;
pub use weapon::{Ammo, AmmoKind, Delivery, Muzzle, Projectile, Weapon, WeaponKind, WeaponStats};
