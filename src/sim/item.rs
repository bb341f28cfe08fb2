//! Pickups dropped into the arena
//!
//! Items fall from the sky, come to rest on the first platform they touch and
//! expire after [`ITEM_LIFETIME_MS`]. Each kind applies its own effect to the
//! player who grabs it.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::player::Player;
use super::state::Color;
use super::vector::Vector2D;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::*;

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Knife,
    Ball,
    Rifle,
    Sniper,
    Bandage,
    Medkit,
    Adrenaline,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Knife,
        ItemKind::Ball,
        ItemKind::Rifle,
        ItemKind::Sniper,
        ItemKind::Bandage,
        ItemKind::Medkit,
        ItemKind::Adrenaline,
    ];

    /// Width and height of the pickup box
    pub fn size(self) -> Vector2D {
        let (w, h) = match self {
            ItemKind::Knife => (25.0, 8.0),
            ItemKind::Ball => (16.0, 16.0),
            ItemKind::Rifle => (40.0, 12.0),
            ItemKind::Sniper => (50.0, 15.0),
            ItemKind::Bandage => (20.0, 15.0),
            ItemKind::Medkit => (25.0, 20.0),
            ItemKind::Adrenaline => (15.0, 25.0),
        };
        Vector2D::new(w, h)
    }

    pub fn color(self) -> Color {
        match self {
            ItemKind::Knife => Color::SILVER,
            ItemKind::Ball => Color::ORANGE,
            ItemKind::Rifle => Color::GRAY,
            ItemKind::Sniper => Color::DARK_GRAY,
            ItemKind::Bandage => Color::WHITE,
            ItemKind::Medkit => Color::RED,
            ItemKind::Adrenaline => Color::GREEN,
        }
    }

    /// Weapon granted by this pickup, if it is a weapon pickup
    pub fn weapon(self) -> Option<WeaponKind> {
        match self {
            ItemKind::Knife => Some(WeaponKind::Knife),
            ItemKind::Ball => Some(WeaponKind::Ball),
            ItemKind::Rifle => Some(WeaponKind::Rifle),
            ItemKind::Sniper => Some(WeaponKind::Sniper),
            ItemKind::Bandage | ItemKind::Medkit | ItemKind::Adrenaline => None,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vector2D,
    pub vel: Vector2D,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub grounded: bool,
    /// Cleared once consumed; an invalid item is never pickable
    valid: bool,
    pub spawn_ms: f64,
}

impl Item {
    /// New falling item; the id is assigned when it joins the match state
    pub fn new(kind: ItemKind, pos: Vector2D, spawn_ms: f64) -> Self {
        let size = kind.size();
        Self {
            id: 0,
            kind,
            pos,
            vel: Vector2D::new(0.0, ITEM_INITIAL_FALL_SPEED),
            width: size.x,
            height: size.y,
            color: kind.color(),
            grounded: false,
            valid: true,
            spawn_ms,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Free fall while not resting
    pub fn update(&mut self, dt: f64) {
        if self.grounded {
            return;
        }
        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt;
    }

    /// Come to rest on a surface whose top edge is at `surface_y`
    pub fn land_on(&mut self, surface_y: f64) {
        self.pos.y = surface_y - self.height;
        self.vel = Vector2D::ZERO;
        self.grounded = true;
    }

    pub fn is_valid(&self, now_ms: f64) -> bool {
        self.valid && now_ms - self.spawn_ms < ITEM_LIFETIME_MS
    }

    /// Apply this item to `player`; on success the item is consumed
    ///
    /// Healing items refuse a player already at full health and stay in the
    /// world. Weapon pickups replace whatever the player was holding.
    pub fn try_pickup(&mut self, player: &mut Player, now_ms: f64) -> bool {
        if !self.is_valid(now_ms) {
            return false;
        }

        let applied = match self.kind {
            ItemKind::Bandage => heal_if_hurt(player, BANDAGE_HEAL),
            ItemKind::Medkit => heal_if_hurt(player, MEDKIT_HEAL),
            ItemKind::Adrenaline => {
                player.apply_adrenaline(now_ms, ADRENALINE_DURATION_MS);
                true
            }
            ItemKind::Knife | ItemKind::Ball | ItemKind::Rifle | ItemKind::Sniper => {
                match self.kind.weapon() {
                    Some(kind) => {
                        player.set_weapon(Weapon::new(kind));
                        true
                    }
                    None => false,
                }
            }
        };

        if applied {
            self.valid = false;
            log::debug!("{:?} picked up {:?} (item {})", player.side(), self.kind, self.id);
        }
        applied
    }
}

fn heal_if_hurt(player: &mut Player, amount: i32) -> bool {
    if player.hp() >= player.max_hp() {
        return false;
    }
    player.heal(amount);
    true
}
