//! Weapons and projectiles
//!
//! Every weapon variant is described by a row in [`WeaponKind::stats`].
//! Melee variants (Fist, Knife) resolve their hit in the engine by range and
//! facing; ranged variants (Ball, Rifle, Sniper) emit one [`Projectile`] per
//! successful fire.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Color, Side};
use super::vector::Vector2D;
use crate::consts::*;

/// Weapon variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Fist,
    Knife,
    Ball,
    Rifle,
    Sniper,
}

/// Remaining shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Infinite,
    Rounds(u32),
}

impl Ammo {
    pub fn is_empty(self) -> bool {
        matches!(self, Ammo::Rounds(0))
    }

    /// Shot count for collaborators that expect the `-1 = infinite` convention
    pub fn as_count(self) -> i32 {
        match self {
            Ammo::Infinite => -1,
            Ammo::Rounds(n) => n as i32,
        }
    }
}

/// How a weapon delivers damage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delivery {
    /// Direct hit within `range` of the attacker
    Melee,
    /// Flat shot at `speed` in the facing direction
    Bullet { speed: f64 },
    /// Lobbed at `speed` and `angle_deg` (negative is upward), pulled by gravity
    Thrown { speed: f64, angle_deg: f64 },
}

/// Per-variant constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub damage: i32,
    pub ammo: Ammo,
    pub cooldown_ms: f64,
    pub range: f64,
    pub color: Color,
    pub delivery: Delivery,
}

impl WeaponKind {
    pub const fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::Fist => WeaponStats {
                damage: FIST_DAMAGE,
                ammo: Ammo::Infinite,
                cooldown_ms: FIST_COOLDOWN_MS,
                range: FIST_RANGE,
                color: Color::BROWN,
                delivery: Delivery::Melee,
            },
            WeaponKind::Knife => WeaponStats {
                damage: KNIFE_DAMAGE,
                ammo: Ammo::Infinite,
                cooldown_ms: KNIFE_COOLDOWN_MS,
                range: KNIFE_RANGE,
                color: Color::SILVER,
                delivery: Delivery::Melee,
            },
            WeaponKind::Ball => WeaponStats {
                damage: BALL_DAMAGE,
                ammo: Ammo::Rounds(BALL_COUNT),
                cooldown_ms: BALL_COOLDOWN_MS,
                range: BALL_RANGE,
                color: Color::ORANGE,
                delivery: Delivery::Thrown {
                    speed: BALL_THROW_SPEED,
                    angle_deg: BALL_THROW_ANGLE,
                },
            },
            WeaponKind::Rifle => WeaponStats {
                damage: RIFLE_DAMAGE,
                ammo: Ammo::Rounds(RIFLE_AMMO),
                cooldown_ms: RIFLE_COOLDOWN_MS,
                range: RIFLE_RANGE,
                color: Color::GRAY,
                delivery: Delivery::Bullet {
                    speed: BULLET_SPEED,
                },
            },
            WeaponKind::Sniper => WeaponStats {
                damage: SNIPER_DAMAGE,
                ammo: Ammo::Rounds(SNIPER_AMMO),
                cooldown_ms: SNIPER_COOLDOWN_MS,
                range: SNIPER_RANGE,
                color: Color::DARK_GRAY,
                delivery: Delivery::Bullet {
                    speed: BULLET_SPEED * SNIPER_SPEED_MULTIPLIER,
                },
            },
        }
    }

    pub fn is_melee(self) -> bool {
        matches!(self.stats().delivery, Delivery::Melee)
    }
}

/// Where a shot leaves from: the shooter's box, facing and side
#[derive(Debug, Clone, Copy)]
pub struct Muzzle {
    pub body: Rect,
    pub facing_right: bool,
    pub owner: Side,
}

/// A weapon held by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    kind: WeaponKind,
    ammo: Ammo,
    damage: i32,
    cooldown_ms: f64,
    /// Simulation time of the last successful use; `None` if never used
    last_fire_ms: Option<f64>,
    color: Color,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponKind::Fist)
    }
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            ammo: stats.ammo,
            damage: stats.damage,
            cooldown_ms: stats.cooldown_ms,
            last_fire_ms: None,
            color: stats.color,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn ammo(&self) -> Ammo {
        self.ammo
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn attack_range(&self) -> f64 {
        self.kind.stats().range
    }

    pub fn has_ammo(&self) -> bool {
        !self.ammo.is_empty()
    }

    /// True once the cooldown has elapsed and there is ammo left
    pub fn can_attack(&self, now_ms: f64) -> bool {
        if !self.has_ammo() {
            return false;
        }
        match self.last_fire_ms {
            Some(last) => now_ms - last >= self.cooldown_ms,
            None => true,
        }
    }

    /// Remaining cooldown in milliseconds (0 when ready)
    pub fn cooldown_remaining(&self, now_ms: f64) -> f64 {
        match self.last_fire_ms {
            Some(last) => (self.cooldown_ms - (now_ms - last)).max(0.0),
            None => 0.0,
        }
    }

    fn consume_ammo(&mut self) {
        if let Ammo::Rounds(n) = &mut self.ammo {
            *n = n.saturating_sub(1);
        }
    }

    fn reset_cooldown(&mut self, now_ms: f64) {
        self.last_fire_ms = Some(now_ms);
    }

    /// Commit a melee swing: restarts the cooldown if the weapon is ready
    pub fn strike(&mut self, now_ms: f64) -> bool {
        if !self.kind.is_melee() || !self.can_attack(now_ms) {
            return false;
        }
        self.reset_cooldown(now_ms);
        true
    }

    /// Fire a ranged weapon, returning the launched projectile
    ///
    /// Yields `None` for melee weapons, while on cooldown, or when out of ammo.
    pub fn fire(&mut self, now_ms: f64, muzzle: &Muzzle) -> Option<Projectile> {
        let delivery = self.kind.stats().delivery;
        if matches!(delivery, Delivery::Melee) || !self.can_attack(now_ms) {
            return None;
        }

        self.consume_ammo();
        self.reset_cooldown(now_ms);

        let body = muzzle.body;
        let w = body.size.x;
        let h = body.size.y;
        let direction = if muzzle.facing_right { 1.0 } else { -1.0 };

        let projectile = match delivery {
            Delivery::Thrown { speed, angle_deg } => {
                let offset = Vector2D::new(
                    if muzzle.facing_right { w * 0.8 } else { w * 0.2 - 20.0 },
                    h * 0.3,
                );
                let angle = angle_deg.to_radians();
                let vel = Vector2D::new(speed * angle.cos() * direction, speed * angle.sin());
                Projectile::new(
                    body.pos + offset,
                    vel,
                    self.damage,
                    AmmoKind::Thrown,
                    muzzle.owner,
                    now_ms,
                )
            }
            Delivery::Bullet { speed } => {
                let offset = Vector2D::new(if muzzle.facing_right { w } else { -5.0 }, h * 0.4);
                let vel = Vector2D::new(speed * direction, 0.0);
                Projectile::new(
                    body.pos + offset,
                    vel,
                    self.damage,
                    AmmoKind::Bullet,
                    muzzle.owner,
                    now_ms,
                )
            }
            Delivery::Melee => return None,
        };

        log::debug!(
            "{:?} fired {:?} from ({:.0}, {:.0}), ammo left {:?}",
            muzzle.owner,
            self.kind,
            projectile.pos.x,
            projectile.pos.y,
            self.ammo
        );
        Some(projectile)
    }
}

/// Projectile flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmmoKind {
    /// Flat trajectory
    Bullet,
    /// Affected by gravity
    Thrown,
}

impl AmmoKind {
    pub fn radius(self) -> f64 {
        match self {
            AmmoKind::Bullet => BULLET_RADIUS,
            AmmoKind::Thrown => THROWN_RADIUS,
        }
    }
}

/// A moving hazard fired by a ranged weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vector2D,
    pub vel: Vector2D,
    pub damage: i32,
    pub kind: AmmoKind,
    pub owner: Side,
    pub radius: f64,
    pub spawn_ms: f64,
}

impl Projectile {
    /// The id is assigned when the projectile joins the match state
    pub fn new(
        pos: Vector2D,
        vel: Vector2D,
        damage: i32,
        kind: AmmoKind,
        owner: Side,
        spawn_ms: f64,
    ) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            damage,
            kind,
            owner,
            radius: kind.radius(),
            spawn_ms,
        }
    }

    /// Integrate one step; thrown projectiles also pick up gravity
    pub fn update(&mut self, dt: f64) {
        self.pos += self.vel * dt;
        if self.kind == AmmoKind::Thrown {
            self.vel.y += GRAVITY * dt;
        }
    }

    /// Alive while young enough and inside the padded playfield
    pub fn is_valid(&self, now_ms: f64) -> bool {
        if now_ms - self.spawn_ms > PROJECTILE_LIFETIME_MS {
            return false;
        }
        let m = PROJECTILE_BOUNDS_MARGIN;
        self.pos.x >= -m
            && self.pos.x <= WORLD_WIDTH + m
            && self.pos.y >= -m
            && self.pos.y <= WORLD_HEIGHT + m
    }
}
